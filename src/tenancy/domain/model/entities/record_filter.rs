use std::collections::BTreeMap;

use serde_json::Value;

use crate::tenancy::domain::model::entities::entity_record::{
    CREATED_AT_FIELD, EntityRecord, ID_FIELD, TENANT_ID_FIELD, UPDATED_AT_FIELD,
    format_timestamp,
};

/// Field-equality conditions for `find_all`. All conditions must hold.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordFilter {
    conditions: BTreeMap<String, Value>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.insert(field.into(), value.into());
        self
    }

    pub fn conditions(&self) -> &BTreeMap<String, Value> {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, record: &EntityRecord) -> bool {
        self.conditions.iter().all(|(field, expected)| {
            let actual = match field.as_str() {
                ID_FIELD => Some(record.id.to_json()),
                TENANT_ID_FIELD => Some(Value::String(record.tenant_id.clone())),
                CREATED_AT_FIELD => Some(Value::String(format_timestamp(&record.created_at))),
                UPDATED_AT_FIELD => Some(Value::String(format_timestamp(&record.updated_at))),
                _ => record.get(field).cloned(),
            };

            match actual {
                Some(actual) => &actual == expected,
                None => expected.is_null(),
            }
        })
    }
}
