use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::tenancy::domain::model::{
    enums::{entity_type::EntityType, persistence_error::PersistenceError},
    value_objects::record_id::RecordId,
};

pub type FieldMap = Map<String, Value>;

pub const ID_FIELD: &str = "id";
pub const TENANT_ID_FIELD: &str = "tenantId";
pub const CREATED_AT_FIELD: &str = "createdAt";
pub const UPDATED_AT_FIELD: &str = "updatedAt";

/// Fields owned by the repository layer. Callers cannot set them.
pub const RESERVED_FIELDS: [&str; 4] = [ID_FIELD, TENANT_ID_FIELD, CREATED_AT_FIELD, UPDATED_AT_FIELD];

/// Repository clock. Millisecond precision is the finest every provider keeps.
pub fn repository_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|timestamp| timestamp.with_timezone(&Utc).trunc_subsecs(3))
}

/// A record as returned by any provider: the identity and audit fields
/// every entity shares, plus an open map of semantic fields.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityRecord {
    pub id: RecordId,
    pub tenant_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub fields: FieldMap,
}

impl EntityRecord {
    /// Builds a record from a document already keyed by semantic names.
    pub fn from_normalized(
        entity: EntityType,
        mut document: FieldMap,
    ) -> Result<Self, PersistenceError> {
        let id = document
            .remove(ID_FIELD)
            .as_ref()
            .and_then(RecordId::from_json)
            .ok_or_else(|| PersistenceError::Storage(format!("{entity} record has no id")))?;

        let tenant_id = match document.remove(TENANT_ID_FIELD) {
            Some(Value::String(tenant_id)) => tenant_id,
            _ => {
                return Err(PersistenceError::Storage(format!(
                    "{entity} record {id} has no tenant"
                )));
            }
        };

        let created_at = document
            .remove(CREATED_AT_FIELD)
            .as_ref()
            .and_then(Value::as_str)
            .and_then(parse_timestamp)
            .ok_or_else(|| {
                PersistenceError::Storage(format!("{entity} record {id} has no creation time"))
            })?;

        let updated_at = document
            .remove(UPDATED_AT_FIELD)
            .as_ref()
            .and_then(Value::as_str)
            .and_then(parse_timestamp)
            .unwrap_or(created_at);

        Ok(Self {
            id,
            tenant_id,
            created_at,
            updated_at,
            fields: document,
        })
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.fields.get(field).and_then(Value::as_i64)
    }

    /// Flat JSON view: `id`, `tenantId`, `createdAt`, `updatedAt` and every
    /// semantic field side by side.
    pub fn to_json(&self) -> Value {
        let mut object = Map::with_capacity(self.fields.len() + RESERVED_FIELDS.len());
        object.insert(ID_FIELD.to_string(), self.id.to_json());
        object.insert(
            TENANT_ID_FIELD.to_string(),
            Value::String(self.tenant_id.clone()),
        );
        object.insert(
            CREATED_AT_FIELD.to_string(),
            Value::String(format_timestamp(&self.created_at)),
        );
        object.insert(
            UPDATED_AT_FIELD.to_string(),
            Value::String(format_timestamp(&self.updated_at)),
        );
        for (field, value) in &self.fields {
            object.insert(field.clone(), value.clone());
        }
        Value::Object(object)
    }
}

impl Serialize for EntityRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}
