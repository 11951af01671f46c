use validator::Validate;

use crate::{
    organizations::domain::model::enums::organization_domain_error::OrganizationDomainError,
    tenancy::domain::model::value_objects::record_id::RecordId,
};

#[derive(Clone, Debug, Validate)]
pub struct RenameOrganizationCommand {
    organization_id: RecordId,
    #[validate(length(min = 1, max = 200))]
    name: String,
}

impl RenameOrganizationCommand {
    pub fn new(
        organization_id: impl Into<RecordId>,
        name: String,
    ) -> Result<Self, OrganizationDomainError> {
        let command = Self {
            organization_id: organization_id.into(),
            name: name.trim().to_string(),
        };

        command
            .validate()
            .map_err(|e| OrganizationDomainError::InvalidCommand(e.to_string()))?;

        Ok(command)
    }

    pub fn organization_id(&self) -> &RecordId {
        &self.organization_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
