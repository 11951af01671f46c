use std::sync::Arc;

use sqlx::{migrate, postgres::PgPoolOptions};
use tracing::{info, warn};

use crate::{
    config::app_config::AppConfig,
    tenancy::{
        application::services::{
            cached_tenant_config_resolver_service_impl::CachedTenantConfigResolverServiceImpl,
            repository_factory_service_impl::RepositoryFactoryServiceImpl,
        },
        domain::{
            model::{
                enums::{entity_type::EntityType, persistence_error::PersistenceError},
                value_objects::tenant_id::TenantId,
            },
            services::{
                repository_factory_service::RepositoryFactoryService,
                tenant_config_resolver_service::TenantConfigResolverService,
            },
        },
        infrastructure::persistence::{
            connections::{
                mongo_provider_connector::MongoProviderConnector,
                postgres_provider_connector::PostgresProviderConnector,
                provider_connection_manager::{ConnectionLifecycle, ProviderConnectionManager},
                surreal_provider_connector::SurrealProviderConnector,
            },
            repositories::{
                mongo::mongo_entity_repository_impl::MongoEntityRepositoryImpl,
                postgres::{
                    sqlx_entity_repository_impl::SqlxEntityRepositoryImpl,
                    sqlx_tenant_config_store_repository_impl::SqlxTenantConfigStoreRepositoryImpl,
                },
                repository_registry::RepositoryRegistry,
                static_tenant_config_store_repository_impl::StaticTenantConfigStoreRepositoryImpl,
                surreal::surreal_entity_repository_impl::SurrealEntityRepositoryImpl,
                tenant_config_store_repository::TenantConfigStoreRepository,
            },
        },
    },
};

pub mod application;
pub mod domain;
pub mod infrastructure;

/// Process-wide persistence wiring: the tenant resolver, the repository
/// factory and the connection managers behind it. Build once at startup
/// and call [`shutdown`](Self::shutdown) on teardown.
#[derive(Clone)]
pub struct PersistenceContext {
    pub tenant_config_resolver: Arc<dyn TenantConfigResolverService>,
    pub repository_factory: Arc<dyn RepositoryFactoryService>,
    connection_managers: Vec<Arc<dyn ConnectionLifecycle>>,
}

impl PersistenceContext {
    /// Wires every provider against the given configuration store.
    pub fn with_store(store: Arc<dyn TenantConfigStoreRepository>, config: &AppConfig) -> Self {
        let surreal_connections = Arc::new(ProviderConnectionManager::new(
            SurrealProviderConnector::new(),
        ));
        let mongo_connections = Arc::new(ProviderConnectionManager::new(
            MongoProviderConnector::new(),
        ));
        let postgres_connections = Arc::new(ProviderConnectionManager::new(
            PostgresProviderConnector::new(
                config.postgres_max_connections,
                config.postgres_acquire_timeout(),
            ),
        ));

        let connection_managers: Vec<Arc<dyn ConnectionLifecycle>> = vec![
            surreal_connections.clone(),
            mongo_connections.clone(),
            postgres_connections.clone(),
        ];

        let mut registry = RepositoryRegistry::new();
        registry.register_provider(surreal_connections, |db, tenant_id, schema| {
            Arc::new(SurrealEntityRepositoryImpl::new(db, tenant_id, schema))
        });
        registry.register_provider(mongo_connections, |connection, tenant_id, schema| {
            Arc::new(MongoEntityRepositoryImpl::new(connection, tenant_id, schema))
        });
        registry.register_provider(postgres_connections, |pool, tenant_id, schema| {
            Arc::new(SqlxEntityRepositoryImpl::new(pool, tenant_id, schema))
        });

        let mut repository_factory = RepositoryFactoryServiceImpl::new(registry);
        if let Some(deadline) = config.repository_operation_timeout() {
            repository_factory = repository_factory.with_default_deadline(deadline);
        }

        Self {
            tenant_config_resolver: Arc::new(CachedTenantConfigResolverServiceImpl::new(store)),
            repository_factory: Arc::new(repository_factory),
            connection_managers,
        }
    }

    /// Opens the tenant's connection ahead of its first request.
    pub async fn warm_up(&self, tenant_id: &TenantId) -> Result<(), PersistenceError> {
        let tenant_config = self.tenant_config_resolver.resolve(tenant_id).await?;
        self.repository_factory
            .get_repository(EntityType::Tenant, &tenant_config)
            .await?;
        Ok(())
    }

    /// Forgets the tenant's configuration and closes its connections, so the
    /// next request reads the store again.
    pub async fn invalidate_tenant(&self, tenant_id: &TenantId) -> bool {
        let mut invalidated = self.tenant_config_resolver.invalidate(tenant_id).await;
        for manager in &self.connection_managers {
            invalidated |= manager.invalidate(tenant_id).await;
        }
        invalidated
    }

    pub async fn shutdown(&self) {
        for manager in &self.connection_managers {
            info!(provider = %manager.provider_type(), "closing provider connections");
            manager.shutdown().await;
        }
    }
}

/// Chooses the configuration store from the environment: the registry
/// database when one is configured, then a JSON file, then an empty store.
pub async fn build_persistence_context(
    config: &AppConfig,
) -> Result<PersistenceContext, PersistenceError> {
    let store: Arc<dyn TenantConfigStoreRepository> =
        if let Some(database_url) = &config.tenant_registry_database_url {
            let admin_pool = PgPoolOptions::new()
                .max_connections(config.postgres_max_connections)
                .acquire_timeout(config.postgres_acquire_timeout())
                .connect(database_url)
                .await
                .map_err(|e| PersistenceError::Connection(e.to_string()))?;

            let mut migrator = migrate!("./migrations/registry");
            migrator.set_ignore_missing(true);
            migrator
                .run(&admin_pool)
                .await
                .map_err(|e| PersistenceError::Storage(e.to_string()))?;

            info!("tenant registry database ready");
            Arc::new(SqlxTenantConfigStoreRepositoryImpl::new(admin_pool))
        } else if let Some(path) = &config.tenant_config_file {
            Arc::new(StaticTenantConfigStoreRepositoryImpl::from_json_file(path).await?)
        } else {
            warn!("no tenant configuration source configured; every tenant will be unknown");
            Arc::new(StaticTenantConfigStoreRepositoryImpl::default())
        };

    Ok(PersistenceContext::with_store(store, config))
}
