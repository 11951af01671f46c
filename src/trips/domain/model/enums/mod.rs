pub mod trip_domain_error;
pub mod trip_status;
