use async_trait::async_trait;

use crate::{
    organizations::domain::model::{
        entities::organization_settings::OrganizationSettings,
        enums::organization_domain_error::OrganizationDomainError,
        queries::get_settings_query::GetSettingsQuery,
    },
    tenancy::domain::model::value_objects::tenant_id::TenantId,
};

#[async_trait]
pub trait SettingsQueryService: Send + Sync {
    /// `None` until settings are first written.
    async fn handle_get(
        &self,
        tenant_id: &TenantId,
        query: GetSettingsQuery,
    ) -> Result<Option<OrganizationSettings>, OrganizationDomainError>;
}
