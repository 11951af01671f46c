use std::{sync::Arc, time::Duration};

use async_trait::async_trait;

use crate::tenancy::{
    domain::model::{
        entities::tenant_config::TenantConfig,
        enums::{entity_type::EntityType, persistence_error::PersistenceError},
    },
    infrastructure::persistence::repositories::entity_repository::EntityRepository,
};

#[async_trait]
pub trait RepositoryFactoryService: Send + Sync {
    async fn get_repository(
        &self,
        entity_type: EntityType,
        tenant_config: &TenantConfig,
    ) -> Result<Arc<dyn EntityRepository>, PersistenceError>;

    /// Same as [`get_repository`](Self::get_repository), with every
    /// operation bounded by `deadline`.
    async fn get_repository_with_deadline(
        &self,
        entity_type: EntityType,
        tenant_config: &TenantConfig,
        deadline: Duration,
    ) -> Result<Arc<dyn EntityRepository>, PersistenceError>;
}
