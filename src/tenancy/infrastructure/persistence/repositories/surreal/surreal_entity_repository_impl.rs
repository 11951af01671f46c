use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use surrealdb::{Surreal, engine::any::Any};
use uuid::Uuid;

use crate::tenancy::{
    domain::model::{
        entities::{
            entity_record::{EntityRecord, FieldMap, ID_FIELD, repository_now},
            entity_schema::EntitySchema,
            record_filter::RecordFilter,
        },
        enums::{
            entity_type::EntityType, persistence_error::PersistenceError,
            provider_type::ProviderType,
        },
        value_objects::{record_id::RecordId, tenant_id::TenantId},
    },
    infrastructure::persistence::repositories::{
        entity_repository::EntityRepository,
        record_normalizer::{ensure_field_name, sanitize_input, stamp_new, stamp_update},
    },
};

/// Stored copy of the record key. Record ids are omitted from every
/// projection, so the key travels as a plain field instead.
const KEY_FIELD: &str = "_key";

fn map_surreal_error(error: surrealdb::Error) -> PersistenceError {
    PersistenceError::Storage(error.to_string())
}

/// Schemaless SurrealDB repository. One table per entity; records are
/// keyed by time-ordered UUIDs and carry `tenantId` for scoping.
pub struct SurrealEntityRepositoryImpl {
    db: Arc<Surreal<Any>>,
    tenant_id: TenantId,
    schema: &'static EntitySchema,
}

impl SurrealEntityRepositoryImpl {
    pub fn new(db: Arc<Surreal<Any>>, tenant_id: TenantId, schema: &'static EntitySchema) -> Self {
        Self {
            db,
            tenant_id,
            schema,
        }
    }

    fn to_record(&self, document: Value) -> Result<EntityRecord, PersistenceError> {
        let Value::Object(mut document) = document else {
            return Err(PersistenceError::Storage(format!(
                "{} document is not an object",
                self.schema.entity
            )));
        };

        if let Some(key) = document.remove(KEY_FIELD) {
            document.insert(ID_FIELD.to_string(), key);
        }

        EntityRecord::from_normalized(self.schema.entity, document)
    }

    async fn select(
        &self,
        statement: String,
        key: Option<String>,
        filter: Option<Value>,
    ) -> Result<Vec<EntityRecord>, PersistenceError> {
        let mut query = self
            .db
            .query(statement)
            .bind(("tenant", self.tenant_id.value().to_string()));
        if let Some(key) = key {
            query = query.bind(("key", key));
        }
        if let Some(filter) = filter {
            query = query.bind(("filter", filter));
        }

        let mut response = query
            .await
            .map_err(map_surreal_error)?
            .check()
            .map_err(map_surreal_error)?;

        let documents: Vec<Value> = response.take(0).map_err(map_surreal_error)?;
        documents
            .into_iter()
            .map(|document| self.to_record(document))
            .collect()
    }
}

#[async_trait]
impl EntityRepository for SurrealEntityRepositoryImpl {
    fn entity_type(&self) -> EntityType {
        self.schema.entity
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::SurrealDb
    }

    async fn insert(&self, fields: FieldMap) -> Result<EntityRecord, PersistenceError> {
        let key = Uuid::now_v7().to_string();
        let mut content = stamp_new(
            sanitize_input(self.schema, &[KEY_FIELD], fields),
            &self.tenant_id,
            &repository_now(),
        );
        content.insert(KEY_FIELD.to_string(), Value::String(key.clone()));

        let statement = format!(
            "CREATE type::record('{}', $key) CONTENT $content RETURN NONE",
            self.schema.collection
        );

        self.db
            .query(statement)
            .bind(("key", key.clone()))
            .bind(("content", Value::Object(content)))
            .await
            .map_err(map_surreal_error)?
            .check()
            .map_err(map_surreal_error)?;

        self.find_by_id(&RecordId::Text(key)).await
    }

    async fn find_all(
        &self,
        filter: Option<RecordFilter>,
    ) -> Result<Vec<EntityRecord>, PersistenceError> {
        let mut statement = format!(
            "SELECT * OMIT id FROM {} WHERE tenantId = $tenant",
            self.schema.collection
        );
        let mut bound = FieldMap::new();

        for (field, value) in filter.iter().flat_map(|filter| filter.conditions()) {
            ensure_field_name(field)?;
            let column = if field == ID_FIELD { KEY_FIELD } else { field.as_str() };

            if value.is_null() {
                statement.push_str(&format!(
                    " AND (`{column}` = NONE OR `{column}` = NULL)"
                ));
            } else {
                statement.push_str(&format!(" AND `{column}` = $filter.`{field}`"));
                bound.insert(field.clone(), value.clone());
            }
        }
        statement.push_str(&format!(" ORDER BY createdAt ASC, {KEY_FIELD} ASC"));

        let filter = (!bound.is_empty()).then(|| Value::Object(bound));
        self.select(statement, None, filter).await
    }

    async fn find_by_id(&self, id: &RecordId) -> Result<EntityRecord, PersistenceError> {
        let statement = format!(
            "SELECT * OMIT id FROM type::record('{}', $key) WHERE tenantId = $tenant",
            self.schema.collection
        );

        self.select(statement, Some(id.to_string()), None)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| PersistenceError::not_found(self.schema.entity, id))
    }

    async fn update(
        &self,
        id: &RecordId,
        patch: FieldMap,
    ) -> Result<EntityRecord, PersistenceError> {
        self.find_by_id(id).await?;

        let patch = stamp_update(
            sanitize_input(self.schema, &[KEY_FIELD], patch),
            &repository_now(),
        );
        let statement = format!(
            "UPDATE type::record('{}', $key) MERGE $patch WHERE tenantId = $tenant RETURN NONE",
            self.schema.collection
        );

        self.db
            .query(statement)
            .bind(("key", id.to_string()))
            .bind(("patch", Value::Object(patch)))
            .bind(("tenant", self.tenant_id.value().to_string()))
            .await
            .map_err(map_surreal_error)?
            .check()
            .map_err(map_surreal_error)?;

        self.find_by_id(id).await
    }
}
