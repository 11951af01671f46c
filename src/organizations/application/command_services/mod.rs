pub mod organization_command_service_impl;
pub mod partnership_command_service_impl;
pub mod settings_command_service_impl;
