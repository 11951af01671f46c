use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use sqlx::{PgPool, migrate, postgres::PgPoolOptions};
use tracing::info;

use crate::tenancy::{
    domain::model::{
        enums::{persistence_error::PersistenceError, provider_type::ProviderType},
        value_objects::tenant_id::TenantId,
    },
    infrastructure::persistence::connections::provider_connector::{
        ProviderConnector, parse_provider_params,
    },
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostgresProviderParams {
    database_url: String,
    max_connections: Option<u32>,
    /// Creates the entity tables on first connect.
    #[serde(default)]
    apply_migrations: bool,
}

/// Opens one `PgPool` per tenant database.
pub struct PostgresProviderConnector {
    default_max_connections: u32,
    acquire_timeout: Duration,
}

impl PostgresProviderConnector {
    pub fn new(default_max_connections: u32, acquire_timeout: Duration) -> Self {
        Self {
            default_max_connections,
            acquire_timeout,
        }
    }
}

#[async_trait]
impl ProviderConnector for PostgresProviderConnector {
    type Connection = PgPool;

    fn provider_type(&self) -> ProviderType {
        ProviderType::Postgres
    }

    async fn connect(
        &self,
        tenant_id: &TenantId,
        provider_params: &Value,
    ) -> Result<PgPool, PersistenceError> {
        let params: PostgresProviderParams =
            parse_provider_params(ProviderType::Postgres, provider_params)?;

        let pool = PgPoolOptions::new()
            .max_connections(params.max_connections.unwrap_or(self.default_max_connections))
            .acquire_timeout(self.acquire_timeout)
            .connect(&params.database_url)
            .await
            .map_err(|e| PersistenceError::Connection(e.to_string()))?;

        if params.apply_migrations {
            info!(tenant_id = %tenant_id, "applying entity table migrations");
            let mut migrator = migrate!("./migrations/tenant");
            migrator.set_ignore_missing(true);
            migrator
                .run(&pool)
                .await
                .map_err(|e| PersistenceError::Storage(e.to_string()))?;
        }

        Ok(pool)
    }

    async fn close(&self, connection: &PgPool) {
        connection.close().await;
    }
}
