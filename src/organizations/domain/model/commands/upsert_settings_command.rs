use serde_json::{Map, Value};

use crate::{
    organizations::domain::model::enums::organization_domain_error::OrganizationDomainError,
    tenancy::domain::model::value_objects::record_id::RecordId,
};

#[derive(Clone, Debug)]
pub struct UpsertSettingsCommand {
    organization_id: RecordId,
    values: Map<String, Value>,
}

impl UpsertSettingsCommand {
    pub fn new(
        organization_id: impl Into<RecordId>,
        values: Value,
    ) -> Result<Self, OrganizationDomainError> {
        let Value::Object(values) = values else {
            return Err(OrganizationDomainError::InvalidCommand(
                "settings values must be a JSON object".to_string(),
            ));
        };

        Ok(Self {
            organization_id: organization_id.into(),
            values,
        })
    }

    pub fn organization_id(&self) -> &RecordId {
        &self.organization_id
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }
}
