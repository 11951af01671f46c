use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::tenancy::domain::model::{
    entities::entity_record::EntityRecord, value_objects::record_id::RecordId,
};

pub const ORGANIZATION_ID_FIELD: &str = "organizationId";
pub const VALUES_FIELD: &str = "values";

/// Free-form settings attached to one organization.
#[derive(Clone, Debug, PartialEq)]
pub struct OrganizationSettings {
    record: EntityRecord,
}

impl OrganizationSettings {
    pub fn from_record(record: EntityRecord) -> Self {
        Self { record }
    }

    pub fn id(&self) -> &RecordId {
        &self.record.id
    }

    pub fn organization_id(&self) -> Option<&str> {
        self.record.get_str(ORGANIZATION_ID_FIELD)
    }

    pub fn values(&self) -> Map<String, Value> {
        self.record
            .get(VALUES_FIELD)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    }

    pub fn record(&self) -> &EntityRecord {
        &self.record
    }
}

impl Serialize for OrganizationSettings {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.record.serialize(serializer)
    }
}
