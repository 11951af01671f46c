use validator::Validate;

use crate::{
    shared::domain::model::enums::user_role::UserRole,
    users::domain::model::enums::user_domain_error::UserDomainError,
};

pub struct RegisterUserCommandParts {
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    pub organization_id: Option<String>,
    pub assigned_schools: Vec<String>,
    pub allowed_org_ids: Vec<String>,
}

#[derive(Clone, Debug, Validate)]
pub struct RegisterUserCommand {
    #[validate(email, length(max = 254))]
    email: String,
    #[validate(length(min = 1, max = 120))]
    display_name: String,
    role: UserRole,
    #[validate(length(min = 1, max = 128))]
    organization_id: Option<String>,
    #[validate(length(max = 100))]
    assigned_schools: Vec<String>,
    #[validate(length(max = 100))]
    allowed_org_ids: Vec<String>,
}

impl RegisterUserCommand {
    /// The email is trimmed and lower-cased; it identifies the user within
    /// a tenant.
    pub fn new(parts: RegisterUserCommandParts) -> Result<Self, UserDomainError> {
        let command = Self {
            email: parts.email.trim().to_lowercase(),
            display_name: parts.display_name.trim().to_string(),
            role: parts.role,
            organization_id: parts.organization_id,
            assigned_schools: parts.assigned_schools,
            allowed_org_ids: parts.allowed_org_ids,
        };

        command
            .validate()
            .map_err(|e| UserDomainError::InvalidCommand(e.to_string()))?;

        Ok(command)
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn organization_id(&self) -> Option<&str> {
        self.organization_id.as_deref()
    }

    pub fn assigned_schools(&self) -> &[String] {
        &self.assigned_schools
    }

    pub fn allowed_org_ids(&self) -> &[String] {
        &self.allowed_org_ids
    }
}
