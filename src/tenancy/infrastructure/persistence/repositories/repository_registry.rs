use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;

use crate::tenancy::{
    domain::model::{
        entities::{entity_schema::EntitySchema, tenant_config::TenantConfig},
        enums::{
            entity_type::EntityType, persistence_error::PersistenceError,
            provider_type::ProviderType,
        },
        value_objects::tenant_id::TenantId,
    },
    infrastructure::persistence::{
        connections::{
            provider_connection_manager::ProviderConnectionManager,
            provider_connector::ProviderConnector,
        },
        repositories::entity_repository::EntityRepository,
    },
};

/// Builds the repository of one (entity, provider) pair for a tenant.
#[async_trait]
pub trait RepositoryBinding: Send + Sync {
    async fn bind(
        &self,
        tenant_config: &TenantConfig,
    ) -> Result<Arc<dyn EntityRepository>, PersistenceError>;
}

pub type RepositoryConstructor<C> =
    fn(Arc<C>, TenantId, &'static EntitySchema) -> Arc<dyn EntityRepository>;

/// Binding that fetches the tenant's connection from a provider connection
/// manager and hands it to a repository constructor.
pub struct ConnectionRepositoryBinding<P: ProviderConnector> {
    connections: Arc<ProviderConnectionManager<P>>,
    schema: &'static EntitySchema,
    construct: RepositoryConstructor<P::Connection>,
}

impl<P: ProviderConnector> ConnectionRepositoryBinding<P> {
    pub fn new(
        connections: Arc<ProviderConnectionManager<P>>,
        schema: &'static EntitySchema,
        construct: RepositoryConstructor<P::Connection>,
    ) -> Self {
        Self {
            connections,
            schema,
            construct,
        }
    }
}

#[async_trait]
impl<P> RepositoryBinding for ConnectionRepositoryBinding<P>
where
    P: ProviderConnector + 'static,
{
    async fn bind(
        &self,
        tenant_config: &TenantConfig,
    ) -> Result<Arc<dyn EntityRepository>, PersistenceError> {
        let connection = self
            .connections
            .get_connection(tenant_config.tenant_id(), tenant_config.provider_params())
            .await?;

        Ok((self.construct)(
            connection,
            tenant_config.tenant_id().clone(),
            self.schema,
        ))
    }
}

/// Lookup table from (entity, provider) to binding, filled once at startup.
#[derive(Default)]
pub struct RepositoryRegistry {
    bindings: HashMap<(EntityType, ProviderType), Arc<dyn RepositoryBinding>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        entity_type: EntityType,
        provider_type: ProviderType,
        binding: Arc<dyn RepositoryBinding>,
    ) {
        self.bindings.insert((entity_type, provider_type), binding);
    }

    /// Registers every entity for a provider, binding each to its schema.
    pub fn register_provider<P>(
        &mut self,
        connections: Arc<ProviderConnectionManager<P>>,
        construct: RepositoryConstructor<P::Connection>,
    ) where
        P: ProviderConnector + 'static,
    {
        let provider_type = connections.provider_type();
        for entity_type in EntityType::all() {
            self.register(
                *entity_type,
                provider_type,
                Arc::new(ConnectionRepositoryBinding::new(
                    connections.clone(),
                    EntitySchema::for_entity(*entity_type),
                    construct,
                )),
            );
        }
    }

    pub fn lookup(
        &self,
        entity_type: EntityType,
        provider_type: ProviderType,
    ) -> Option<Arc<dyn RepositoryBinding>> {
        self.bindings.get(&(entity_type, provider_type)).cloned()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
