pub mod record_id;
pub mod tenant_id;
