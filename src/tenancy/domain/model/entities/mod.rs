pub mod entity_record;
pub mod entity_schema;
pub mod record_filter;
pub mod tenant_config;
