use crate::shared::domain::model::enums::user_role::UserRole;

/// Identity of the caller, as established by the authentication layer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ActorContext {
    user_id: String,
    display_name: String,
    email: String,
    role: UserRole,
    allowed_org_ids: Vec<String>,
}

impl ActorContext {
    pub fn new(
        user_id: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            email: email.into(),
            role,
            allowed_org_ids: Vec::new(),
        }
    }

    /// Restricts the actor to the given organizations.
    pub fn with_allowed_org_ids(mut self, allowed_org_ids: Vec<String>) -> Self {
        self.allowed_org_ids = allowed_org_ids;
        self
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn allowed_org_ids(&self) -> &[String] {
        &self.allowed_org_ids
    }

    pub fn has_role(&self, roles: &[UserRole]) -> bool {
        roles.contains(&self.role)
    }

    /// An actor without an organization scope reaches every organization.
    pub fn can_reach_org(&self, org_id: &str) -> bool {
        self.allowed_org_ids.is_empty() || self.allowed_org_ids.iter().any(|id| id == org_id)
    }
}
