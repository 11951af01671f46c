pub mod organization_command_service;
pub mod organization_query_service;
pub mod partnership_command_service;
pub mod partnership_query_service;
pub mod settings_command_service;
pub mod settings_query_service;
