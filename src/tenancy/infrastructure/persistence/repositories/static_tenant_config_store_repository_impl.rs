use std::{collections::HashMap, path::Path};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::tenancy::{
    domain::model::{
        enums::persistence_error::PersistenceError, value_objects::tenant_id::TenantId,
    },
    infrastructure::persistence::repositories::tenant_config_store_repository::{
        StoredTenantConfiguration, TenantConfigStoreRepository,
    },
};

/// In-process tenant registry, loaded from a JSON array or built in code.
pub struct StaticTenantConfigStoreRepositoryImpl {
    configurations: RwLock<HashMap<String, StoredTenantConfiguration>>,
}

impl StaticTenantConfigStoreRepositoryImpl {
    pub fn new(configurations: Vec<StoredTenantConfiguration>) -> Self {
        Self {
            configurations: RwLock::new(
                configurations
                    .into_iter()
                    .map(|configuration| (configuration.tenant_id.clone(), configuration))
                    .collect(),
            ),
        }
    }

    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            PersistenceError::Storage(format!(
                "tenant configuration file {} could not be read: {e}",
                path.display()
            ))
        })?;

        let configurations: Vec<StoredTenantConfiguration> = serde_json::from_str(&contents)
            .map_err(|e| {
                PersistenceError::Storage(format!(
                    "tenant configuration file {} is invalid: {e}",
                    path.display()
                ))
            })?;

        Ok(Self::new(configurations))
    }

    /// Adds or replaces a configuration. Resolvers keep serving their cached
    /// copy until the tenant is invalidated.
    pub async fn upsert(&self, configuration: StoredTenantConfiguration) {
        self.configurations
            .write()
            .await
            .insert(configuration.tenant_id.clone(), configuration);
    }
}

impl Default for StaticTenantConfigStoreRepositoryImpl {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl TenantConfigStoreRepository for StaticTenantConfigStoreRepositoryImpl {
    async fn find_by_tenant_id(
        &self,
        tenant_id: &TenantId,
    ) -> Result<Option<StoredTenantConfiguration>, PersistenceError> {
        Ok(self
            .configurations
            .read()
            .await
            .get(tenant_id.value())
            .cloned())
    }
}
