use async_trait::async_trait;

use crate::tenancy::domain::model::{
    entities::tenant_config::TenantConfig, enums::persistence_error::PersistenceError,
    value_objects::tenant_id::TenantId,
};

#[async_trait]
pub trait TenantConfigResolverService: Send + Sync {
    async fn resolve(&self, tenant_id: &TenantId) -> Result<TenantConfig, PersistenceError>;

    /// Drops the cached configuration. Returns whether an entry existed.
    async fn invalidate(&self, tenant_id: &TenantId) -> bool;
}
