use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use polyglot_tenancy::tenancy::{
    domain::{
        model::{
            entities::{
                entity_record::{EntityRecord, FieldMap},
                record_filter::RecordFilter,
                tenant_config::TenantConfig,
            },
            enums::{
                entity_type::EntityType, persistence_error::PersistenceError,
                provider_type::ProviderType,
            },
            value_objects::record_id::RecordId,
        },
        services::repository_factory_service::RepositoryFactoryService,
    },
    infrastructure::persistence::repositories::entity_repository::EntityRepository,
};

/// User repository where another writer stores the same record between
/// the caller's lookup and its first insert, which then fails the way a
/// unique index rejects a duplicate.
pub struct ConcurrentWriterRepository {
    inner: Arc<dyn EntityRepository>,
    raced: Mutex<bool>,
}

impl ConcurrentWriterRepository {
    pub fn new(inner: Arc<dyn EntityRepository>) -> Self {
        Self {
            inner,
            raced: Mutex::new(false),
        }
    }
}

#[async_trait]
impl EntityRepository for ConcurrentWriterRepository {
    fn entity_type(&self) -> EntityType {
        self.inner.entity_type()
    }

    fn provider_type(&self) -> ProviderType {
        self.inner.provider_type()
    }

    async fn insert(&self, fields: FieldMap) -> Result<EntityRecord, PersistenceError> {
        let first = {
            let mut raced = self.raced.lock().expect("mutex poisoned");
            !std::mem::replace(&mut *raced, true)
        };
        if !first {
            return self.inner.insert(fields).await;
        }

        self.inner.insert(fields).await?;
        Err(PersistenceError::Validation(
            "duplicate key value violates unique constraint \"users_tenant_email_idx\"".to_string(),
        ))
    }

    async fn find_all(
        &self,
        filter: Option<RecordFilter>,
    ) -> Result<Vec<EntityRecord>, PersistenceError> {
        self.inner.find_all(filter).await
    }

    async fn find_by_id(&self, id: &RecordId) -> Result<EntityRecord, PersistenceError> {
        self.inner.find_by_id(id).await
    }

    async fn update(
        &self,
        id: &RecordId,
        patch: FieldMap,
    ) -> Result<EntityRecord, PersistenceError> {
        self.inner.update(id, patch).await
    }
}

/// Hands out the real repositories, with user repositories wrapped in
/// [`ConcurrentWriterRepository`].
pub struct ConcurrentWriterRepositoryFactory {
    inner: Arc<dyn RepositoryFactoryService>,
}

impl ConcurrentWriterRepositoryFactory {
    pub fn new(inner: Arc<dyn RepositoryFactoryService>) -> Self {
        Self { inner }
    }

    fn wrap(repository: Arc<dyn EntityRepository>) -> Arc<dyn EntityRepository> {
        if repository.entity_type() == EntityType::User {
            Arc::new(ConcurrentWriterRepository::new(repository))
        } else {
            repository
        }
    }
}

#[async_trait]
impl RepositoryFactoryService for ConcurrentWriterRepositoryFactory {
    async fn get_repository(
        &self,
        entity_type: EntityType,
        tenant_config: &TenantConfig,
    ) -> Result<Arc<dyn EntityRepository>, PersistenceError> {
        let repository = self.inner.get_repository(entity_type, tenant_config).await?;
        Ok(Self::wrap(repository))
    }

    async fn get_repository_with_deadline(
        &self,
        entity_type: EntityType,
        tenant_config: &TenantConfig,
        deadline: Duration,
    ) -> Result<Arc<dyn EntityRepository>, PersistenceError> {
        let repository = self
            .inner
            .get_repository_with_deadline(entity_type, tenant_config, deadline)
            .await?;
        Ok(Self::wrap(repository))
    }
}
