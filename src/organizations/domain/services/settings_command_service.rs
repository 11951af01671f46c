use async_trait::async_trait;

use crate::{
    organizations::domain::model::{
        commands::upsert_settings_command::UpsertSettingsCommand,
        entities::organization_settings::OrganizationSettings,
        enums::organization_domain_error::OrganizationDomainError,
    },
    tenancy::domain::model::value_objects::tenant_id::TenantId,
};

#[async_trait]
pub trait SettingsCommandService: Send + Sync {
    /// Inserts on the first write for an organization, replaces the stored
    /// values afterwards.
    async fn handle_upsert(
        &self,
        tenant_id: &TenantId,
        command: UpsertSettingsCommand,
    ) -> Result<OrganizationSettings, OrganizationDomainError>;
}
