pub mod organization_query_service_impl;
pub mod partnership_query_service_impl;
pub mod settings_query_service_impl;
