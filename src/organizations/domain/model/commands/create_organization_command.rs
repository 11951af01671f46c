use regex::Regex;
use validator::Validate;

use crate::organizations::domain::model::enums::{
    organization_domain_error::OrganizationDomainError, organization_type::OrganizationType,
};

lazy_static::lazy_static! {
    pub static ref SHORT_CODE_REGEX: Regex =
        Regex::new(r"^[A-Z0-9][A-Z0-9-]{1,15}$").expect("valid regex");
}

#[derive(Clone, Debug, Validate)]
pub struct CreateOrganizationCommand {
    org_type: OrganizationType,
    #[validate(length(min = 1, max = 200))]
    name: String,
    short_code: Option<String>,
    #[validate(length(min = 1, max = 128))]
    parent_org_id: Option<String>,
}

impl CreateOrganizationCommand {
    /// Short codes are upper-cased before they are checked.
    pub fn new(
        org_type: OrganizationType,
        name: String,
        short_code: Option<String>,
        parent_org_id: Option<String>,
    ) -> Result<Self, OrganizationDomainError> {
        let short_code = short_code
            .map(|code| code.trim().to_ascii_uppercase())
            .filter(|code| !code.is_empty());
        if let Some(code) = &short_code {
            if !SHORT_CODE_REGEX.is_match(code) {
                return Err(OrganizationDomainError::InvalidCommand(format!(
                    "short code '{code}' must be 2-16 letters, digits or dashes"
                )));
            }
        }

        let command = Self {
            org_type,
            name: name.trim().to_string(),
            short_code,
            parent_org_id: parent_org_id.map(|id| id.trim().to_string()),
        };

        command
            .validate()
            .map_err(|e| OrganizationDomainError::InvalidCommand(e.to_string()))?;

        if command.parent_org_id.is_some() && !command.org_type.accepts_parent() {
            return Err(OrganizationDomainError::ParentNotAllowed(command.org_type));
        }

        Ok(command)
    }

    pub fn org_type(&self) -> OrganizationType {
        self.org_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_code(&self) -> Option<&str> {
        self.short_code.as_deref()
    }

    pub fn parent_org_id(&self) -> Option<&str> {
        self.parent_org_id.as_deref()
    }
}
