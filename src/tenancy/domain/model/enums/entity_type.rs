use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum EntityType {
    Tenant,
    Organization,
    Partnership,
    User,
    Trip,
    Settings,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tenant => "tenant",
            Self::Organization => "organization",
            Self::Partnership => "partnership",
            Self::User => "user",
            Self::Trip => "trip",
            Self::Settings => "settings",
        }
    }

    pub fn all() -> &'static [Self] {
        const VALUES: [EntityType; 6] = [
            EntityType::Tenant,
            EntityType::Organization,
            EntityType::Partnership,
            EntityType::User,
            EntityType::Trip,
            EntityType::Settings,
        ];
        &VALUES
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
