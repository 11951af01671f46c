use async_trait::async_trait;

use crate::tenancy::domain::model::{
    entities::{
        entity_record::{EntityRecord, FieldMap},
        record_filter::RecordFilter,
    },
    enums::{entity_type::EntityType, persistence_error::PersistenceError, provider_type::ProviderType},
    value_objects::record_id::RecordId,
};

/// The four operations every (entity, provider) pair implements.
///
/// Implementations are bound to one tenant and never return records of
/// another tenant. `id`, `tenantId`, `createdAt` and `updatedAt` are owned
/// by the repository; values supplied for them by callers are ignored.
#[async_trait]
pub trait EntityRepository: Send + Sync {
    fn entity_type(&self) -> EntityType;

    fn provider_type(&self) -> ProviderType;

    async fn insert(&self, fields: FieldMap) -> Result<EntityRecord, PersistenceError>;

    /// Records in creation order. No match is an empty list.
    async fn find_all(
        &self,
        filter: Option<RecordFilter>,
    ) -> Result<Vec<EntityRecord>, PersistenceError>;

    async fn find_by_id(&self, id: &RecordId) -> Result<EntityRecord, PersistenceError>;

    async fn update(&self, id: &RecordId, patch: FieldMap)
    -> Result<EntityRecord, PersistenceError>;
}
