use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::tenancy::{
    domain::{
        model::{
            entities::tenant_config::{TenantConfig, TenantConfigParts},
            enums::{persistence_error::PersistenceError, provider_type::ProviderType},
            value_objects::tenant_id::TenantId,
        },
        services::tenant_config_resolver_service::TenantConfigResolverService,
    },
    infrastructure::persistence::repositories::tenant_config_store_repository::{
        StoredTenantConfiguration, TenantConfigStoreRepository,
    },
};

/// Resolves tenant configurations from a store and keeps them for the life
/// of the process.
///
/// Concurrent first resolutions of the same tenant may both hit the store;
/// they produce equal values and the last insert wins.
pub struct CachedTenantConfigResolverServiceImpl {
    store: Arc<dyn TenantConfigStoreRepository>,
    cache: RwLock<HashMap<TenantId, TenantConfig>>,
}

impl CachedTenantConfigResolverServiceImpl {
    pub fn new(store: Arc<dyn TenantConfigStoreRepository>) -> Self {
        Self {
            store,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub async fn cached_tenants(&self) -> Vec<TenantId> {
        let mut tenants = self.cache.read().await.keys().cloned().collect::<Vec<_>>();
        tenants.sort();
        tenants
    }

    fn to_config(
        tenant_id: &TenantId,
        stored: StoredTenantConfiguration,
    ) -> Result<TenantConfig, PersistenceError> {
        if stored.is_disabled() {
            return Err(PersistenceError::TenantDisabled(tenant_id.to_string()));
        }

        let provider_type = ProviderType::parse(&stored.provider_type).map_err(|_| {
            PersistenceError::UnsupportedProviderType(format!(
                "tenant {tenant_id} is configured for '{}'",
                stored.provider_type
            ))
        })?;

        Ok(TenantConfig::new(TenantConfigParts {
            tenant_id: tenant_id.clone(),
            display_name: stored.display_name,
            provider_type,
            provider_params: stored.provider_params,
            feature_flags: stored.feature_flags,
            subscription_plan: stored.subscription_plan,
        }))
    }
}

#[async_trait]
impl TenantConfigResolverService for CachedTenantConfigResolverServiceImpl {
    async fn resolve(&self, tenant_id: &TenantId) -> Result<TenantConfig, PersistenceError> {
        if let Some(config) = self.cache.read().await.get(tenant_id) {
            debug!(tenant_id = %tenant_id, "tenant configuration cache hit");
            return Ok(config.clone());
        }

        let stored = self
            .store
            .find_by_tenant_id(tenant_id)
            .await?
            .ok_or_else(|| PersistenceError::TenantNotFound(tenant_id.to_string()))?;

        let config = Self::to_config(tenant_id, stored)?;
        info!(
            tenant_id = %tenant_id,
            provider = %config.provider_type(),
            "tenant configuration resolved"
        );

        self.cache
            .write()
            .await
            .insert(tenant_id.clone(), config.clone());

        Ok(config)
    }

    async fn invalidate(&self, tenant_id: &TenantId) -> bool {
        let removed = self.cache.write().await.remove(tenant_id).is_some();
        if removed {
            info!(tenant_id = %tenant_id, "tenant configuration invalidated");
        }
        removed
    }
}
