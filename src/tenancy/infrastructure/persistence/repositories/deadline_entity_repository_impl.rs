use std::{future::Future, sync::Arc, time::Duration};

use async_trait::async_trait;

use crate::tenancy::{
    domain::model::{
        entities::{
            entity_record::{EntityRecord, FieldMap},
            record_filter::RecordFilter,
        },
        enums::{
            entity_type::EntityType, persistence_error::PersistenceError,
            provider_type::ProviderType,
        },
        value_objects::record_id::RecordId,
    },
    infrastructure::persistence::repositories::entity_repository::EntityRepository,
};

/// Bounds every operation of the wrapped repository by a fixed deadline.
/// An expired deadline drops the in-flight provider call.
pub struct DeadlineEntityRepositoryImpl {
    inner: Arc<dyn EntityRepository>,
    deadline: Duration,
}

impl DeadlineEntityRepositoryImpl {
    pub fn new(inner: Arc<dyn EntityRepository>, deadline: Duration) -> Self {
        Self { inner, deadline }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    async fn bounded<T, F>(&self, operation: F) -> Result<T, PersistenceError>
    where
        F: Future<Output = Result<T, PersistenceError>> + Send,
    {
        match tokio::time::timeout(self.deadline, operation).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    entity = %self.inner.entity_type(),
                    provider = %self.inner.provider_type(),
                    deadline_ms = self.deadline.as_millis() as u64,
                    "repository operation timed out"
                );
                Err(PersistenceError::Timeout(self.deadline))
            }
        }
    }
}

#[async_trait]
impl EntityRepository for DeadlineEntityRepositoryImpl {
    fn entity_type(&self) -> EntityType {
        self.inner.entity_type()
    }

    fn provider_type(&self) -> ProviderType {
        self.inner.provider_type()
    }

    async fn insert(&self, fields: FieldMap) -> Result<EntityRecord, PersistenceError> {
        self.bounded(self.inner.insert(fields)).await
    }

    async fn find_all(
        &self,
        filter: Option<RecordFilter>,
    ) -> Result<Vec<EntityRecord>, PersistenceError> {
        self.bounded(self.inner.find_all(filter)).await
    }

    async fn find_by_id(&self, id: &RecordId) -> Result<EntityRecord, PersistenceError> {
        self.bounded(self.inner.find_by_id(id)).await
    }

    async fn update(
        &self,
        id: &RecordId,
        patch: FieldMap,
    ) -> Result<EntityRecord, PersistenceError> {
        self.bounded(self.inner.update(id, patch)).await
    }
}
