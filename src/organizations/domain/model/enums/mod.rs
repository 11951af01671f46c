pub mod organization_domain_error;
pub mod organization_type;
pub mod partnership_status;
