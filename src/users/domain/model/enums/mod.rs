pub mod approval_status;
pub mod user_domain_error;
