pub mod organization;
pub mod organization_settings;
pub mod partnership;
