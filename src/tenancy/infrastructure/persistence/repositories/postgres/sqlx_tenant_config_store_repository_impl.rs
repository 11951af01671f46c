use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Row};

use crate::tenancy::{
    domain::model::{
        enums::persistence_error::PersistenceError, value_objects::tenant_id::TenantId,
    },
    infrastructure::persistence::repositories::{
        postgres::sqlx_persistence_error_mapper::map_sqlx_error,
        tenant_config_store_repository::{StoredTenantConfiguration, TenantConfigStoreRepository},
    },
};

/// Reads tenant configurations from the `tenant_configurations` registry
/// table of the admin database.
pub struct SqlxTenantConfigStoreRepositoryImpl {
    admin_pool: PgPool,
}

impl SqlxTenantConfigStoreRepositoryImpl {
    pub fn new(admin_pool: PgPool) -> Self {
        Self { admin_pool }
    }
}

#[async_trait]
impl TenantConfigStoreRepository for SqlxTenantConfigStoreRepositoryImpl {
    async fn find_by_tenant_id(
        &self,
        tenant_id: &TenantId,
    ) -> Result<Option<StoredTenantConfiguration>, PersistenceError> {
        let statement = r#"
            SELECT
                tenant_id,
                display_name,
                provider_type,
                provider_params,
                feature_flags,
                subscription_plan,
                status
            FROM tenant_configurations
            WHERE tenant_id = $1
        "#;

        let Some(row) = sqlx::query(statement)
            .bind(tenant_id.value())
            .fetch_optional(&self.admin_pool)
            .await
            .map_err(map_sqlx_error)?
        else {
            return Ok(None);
        };

        let feature_flags: Value = row.try_get("feature_flags").map_err(map_sqlx_error)?;
        let feature_flags: BTreeMap<String, bool> = serde_json::from_value(feature_flags)
            .map_err(|e| {
                PersistenceError::Storage(format!(
                    "invalid feature flags for tenant {tenant_id}: {e}"
                ))
            })?;

        Ok(Some(StoredTenantConfiguration {
            tenant_id: row.try_get("tenant_id").map_err(map_sqlx_error)?,
            display_name: row.try_get("display_name").map_err(map_sqlx_error)?,
            provider_type: row.try_get("provider_type").map_err(map_sqlx_error)?,
            provider_params: row.try_get("provider_params").map_err(map_sqlx_error)?,
            feature_flags,
            subscription_plan: row.try_get("subscription_plan").map_err(map_sqlx_error)?,
            status: row.try_get("status").map_err(map_sqlx_error)?,
        }))
    }
}
