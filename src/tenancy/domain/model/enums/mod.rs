pub mod entity_type;
pub mod field_kind;
pub mod persistence_error;
pub mod provider_type;
