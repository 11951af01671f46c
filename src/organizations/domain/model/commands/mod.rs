pub mod create_organization_command;
pub mod create_partnership_command;
pub mod rename_organization_command;
pub mod upsert_settings_command;
