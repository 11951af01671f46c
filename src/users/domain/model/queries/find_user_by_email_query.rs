/// Lookup by email; matching ignores case.
#[derive(Clone, Debug)]
pub struct FindUserByEmailQuery {
    email: String,
}

impl FindUserByEmailQuery {
    pub fn new(email: impl AsRef<str>) -> Self {
        Self {
            email: email.as_ref().trim().to_lowercase(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}
