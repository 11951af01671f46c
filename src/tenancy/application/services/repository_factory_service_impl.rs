use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tracing::debug;

use crate::tenancy::{
    domain::{
        model::{
            entities::tenant_config::TenantConfig,
            enums::{entity_type::EntityType, persistence_error::PersistenceError},
        },
        services::repository_factory_service::RepositoryFactoryService,
    },
    infrastructure::persistence::repositories::{
        deadline_entity_repository_impl::DeadlineEntityRepositoryImpl,
        entity_repository::EntityRepository, repository_registry::RepositoryRegistry,
    },
};

/// Dispatches on (entity, provider) through the registry. Repositories are
/// built on every call; only the connections behind them are shared.
pub struct RepositoryFactoryServiceImpl {
    registry: RepositoryRegistry,
    default_deadline: Option<Duration>,
}

impl RepositoryFactoryServiceImpl {
    pub fn new(registry: RepositoryRegistry) -> Self {
        Self {
            registry,
            default_deadline: None,
        }
    }

    /// Every repository handed out is bounded by `deadline`.
    pub fn with_default_deadline(mut self, deadline: Duration) -> Self {
        self.default_deadline = Some(deadline);
        self
    }

    async fn bind(
        &self,
        entity_type: EntityType,
        tenant_config: &TenantConfig,
    ) -> Result<Arc<dyn EntityRepository>, PersistenceError> {
        let provider_type = tenant_config.provider_type();
        let binding = self
            .registry
            .lookup(entity_type, provider_type)
            .ok_or_else(|| {
                PersistenceError::UnsupportedProviderType(format!(
                    "{entity_type} on {provider_type}"
                ))
            })?;

        debug!(
            tenant_id = %tenant_config.tenant_id(),
            entity = %entity_type,
            provider = %provider_type,
            "binding repository"
        );
        binding.bind(tenant_config).await
    }
}

#[async_trait]
impl RepositoryFactoryService for RepositoryFactoryServiceImpl {
    async fn get_repository(
        &self,
        entity_type: EntityType,
        tenant_config: &TenantConfig,
    ) -> Result<Arc<dyn EntityRepository>, PersistenceError> {
        let repository = self.bind(entity_type, tenant_config).await?;

        Ok(match self.default_deadline {
            Some(deadline) => Arc::new(DeadlineEntityRepositoryImpl::new(repository, deadline)),
            None => repository,
        })
    }

    /// An explicit deadline replaces the default one rather than nesting
    /// inside it.
    async fn get_repository_with_deadline(
        &self,
        entity_type: EntityType,
        tenant_config: &TenantConfig,
        deadline: Duration,
    ) -> Result<Arc<dyn EntityRepository>, PersistenceError> {
        let repository = self.bind(entity_type, tenant_config).await?;
        Ok(Arc::new(DeadlineEntityRepositoryImpl::new(repository, deadline)))
    }
}
