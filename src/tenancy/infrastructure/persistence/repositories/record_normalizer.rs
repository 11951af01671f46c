use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::Value;

use crate::tenancy::domain::model::{
    entities::{
        entity_record::{
            CREATED_AT_FIELD, FieldMap, RESERVED_FIELDS, TENANT_ID_FIELD, UPDATED_AT_FIELD,
            format_timestamp, parse_timestamp,
        },
        entity_schema::EntitySchema,
    },
    enums::{field_kind::FieldKind, persistence_error::PersistenceError},
    value_objects::tenant_id::TenantId,
};

lazy_static::lazy_static! {
    static ref FIELD_NAME_REGEX: Regex =
        Regex::new(r"^[A-Za-z][A-Za-z0-9_]{0,63}$").expect("valid regex");
}

/// Removes repository-owned fields, including the provider's own storage
/// key fields, and canonicalises timestamp fields the schema declares, so
/// every provider stores the same representation.
pub fn sanitize_input(
    schema: &EntitySchema,
    internal_fields: &[&str],
    mut fields: FieldMap,
) -> FieldMap {
    for reserved in RESERVED_FIELDS.iter().chain(internal_fields) {
        fields.remove(*reserved);
    }

    for spec in schema.fields {
        if spec.kind != FieldKind::Timestamp {
            continue;
        }
        if let Some(value) = fields.remove(spec.name) {
            fields.insert(spec.name.to_string(), canonical_timestamp(value));
        }
    }

    fields
}

/// RFC 3339 strings are rewritten to UTC with millisecond precision. Any
/// other value is returned untouched.
pub fn canonical_timestamp(value: Value) -> Value {
    match value.as_str().and_then(parse_timestamp) {
        Some(parsed) => Value::String(format_timestamp(&parsed)),
        None => value,
    }
}

/// Adds tenant ownership and both audit timestamps to a new document.
pub fn stamp_new(mut fields: FieldMap, tenant_id: &TenantId, now: &DateTime<Utc>) -> FieldMap {
    let timestamp = format_timestamp(now);
    fields.insert(
        TENANT_ID_FIELD.to_string(),
        Value::String(tenant_id.value().to_string()),
    );
    fields.insert(CREATED_AT_FIELD.to_string(), Value::String(timestamp.clone()));
    fields.insert(UPDATED_AT_FIELD.to_string(), Value::String(timestamp));
    fields
}

pub fn stamp_update(mut fields: FieldMap, now: &DateTime<Utc>) -> FieldMap {
    fields.insert(
        UPDATED_AT_FIELD.to_string(),
        Value::String(format_timestamp(now)),
    );
    fields
}

/// Document providers interpolate filter field names into their query
/// language, so only plain identifiers are accepted.
pub fn ensure_field_name(field: &str) -> Result<(), PersistenceError> {
    if !FIELD_NAME_REGEX.is_match(field) {
        return Err(PersistenceError::Validation(format!(
            "invalid field name '{field}'"
        )));
    }

    Ok(())
}
