pub mod get_organization_query;
pub mod get_settings_query;
pub mod list_organizations_query;
pub mod list_partnerships_for_school_query;
