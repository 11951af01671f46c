use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::{
    Collection,
    bson::{self, Bson, Document, doc, oid::ObjectId},
    error::ErrorKind,
    options::ReturnDocument,
};
use serde_json::Value;

use crate::tenancy::{
    domain::model::{
        entities::{
            entity_record::{
                CREATED_AT_FIELD, EntityRecord, FieldMap, ID_FIELD, TENANT_ID_FIELD,
                UPDATED_AT_FIELD, format_timestamp, parse_timestamp, repository_now,
            },
            entity_schema::EntitySchema,
            record_filter::RecordFilter,
        },
        enums::{
            entity_type::EntityType, persistence_error::PersistenceError,
            provider_type::ProviderType,
        },
        value_objects::{record_id::RecordId, tenant_id::TenantId},
    },
    infrastructure::persistence::{
        connections::mongo_provider_connector::MongoConnection,
        repositories::{
            entity_repository::EntityRepository,
            record_normalizer::{ensure_field_name, sanitize_input},
        },
    },
};

const OBJECT_ID_FIELD: &str = "_id";

pub fn map_mongo_error(error: mongodb::error::Error) -> PersistenceError {
    match error.kind.as_ref() {
        ErrorKind::Write(_) | ErrorKind::InvalidArgument { .. } | ErrorKind::BsonSerialization(_) => {
            PersistenceError::Validation(error.to_string())
        }
        ErrorKind::Io(_)
        | ErrorKind::ServerSelection { .. }
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::Authentication { .. }
        | ErrorKind::DnsResolve { .. } => PersistenceError::Connection(error.to_string()),
        _ => PersistenceError::Storage(error.to_string()),
    }
}

fn bson_datetime(timestamp: &DateTime<Utc>) -> Bson {
    Bson::DateTime(bson::DateTime::from_millis(timestamp.timestamp_millis()))
}

fn to_document(fields: FieldMap) -> Result<Document, PersistenceError> {
    bson::to_document(&Value::Object(fields))
        .map_err(|e| PersistenceError::Validation(e.to_string()))
}

/// MongoDB repository. Audit timestamps are stored as BSON dates so the
/// collection sorts natively; records are keyed by `ObjectId`.
pub struct MongoEntityRepositoryImpl {
    connection: Arc<MongoConnection>,
    tenant_id: TenantId,
    schema: &'static EntitySchema,
}

impl MongoEntityRepositoryImpl {
    pub fn new(
        connection: Arc<MongoConnection>,
        tenant_id: TenantId,
        schema: &'static EntitySchema,
    ) -> Self {
        Self {
            connection,
            tenant_id,
            schema,
        }
    }

    fn collection(&self) -> Collection<Document> {
        self.connection
            .database()
            .collection::<Document>(self.schema.collection)
    }

    fn scoped(&self, object_id: ObjectId) -> Document {
        doc! {
            OBJECT_ID_FIELD: object_id,
            TENANT_ID_FIELD: self.tenant_id.value(),
        }
    }

    fn to_record(&self, mut document: Document) -> Result<EntityRecord, PersistenceError> {
        let object_id = document.get_object_id(OBJECT_ID_FIELD).map_err(|e| {
            PersistenceError::Storage(format!("{} document has no id: {e}", self.schema.entity))
        })?;
        document.remove(OBJECT_ID_FIELD);
        document.insert(ID_FIELD, object_id.to_hex());

        for field in [CREATED_AT_FIELD, UPDATED_AT_FIELD] {
            if let Ok(stored) = document.get_datetime(field) {
                let timestamp = DateTime::<Utc>::from_timestamp_millis(stored.timestamp_millis())
                    .ok_or_else(|| {
                        PersistenceError::Storage(format!("{field} out of range on {object_id}"))
                    })?;
                document.insert(field, format_timestamp(&timestamp));
            }
        }

        match Bson::Document(document).into_relaxed_extjson() {
            Value::Object(fields) => EntityRecord::from_normalized(self.schema.entity, fields),
            _ => Err(PersistenceError::Storage(format!(
                "{} document is not an object",
                self.schema.entity
            ))),
        }
    }

    /// Translates an equality filter into a query document. `None` means no
    /// record can match.
    fn to_query(&self, filter: &RecordFilter) -> Result<Option<Document>, PersistenceError> {
        let mut query = doc! { TENANT_ID_FIELD: self.tenant_id.value() };

        for (field, value) in filter.conditions() {
            ensure_field_name(field)?;

            match field.as_str() {
                ID_FIELD => {
                    let Some(object_id) = value.as_str().and_then(|v| ObjectId::parse_str(v).ok())
                    else {
                        return Ok(None);
                    };
                    query.insert(OBJECT_ID_FIELD, object_id);
                }
                TENANT_ID_FIELD => {
                    if value.as_str() != Some(self.tenant_id.value()) {
                        return Ok(None);
                    }
                }
                CREATED_AT_FIELD | UPDATED_AT_FIELD => {
                    let Some(timestamp) = value.as_str().and_then(parse_timestamp) else {
                        return Ok(None);
                    };
                    query.insert(field.as_str(), bson_datetime(&timestamp));
                }
                _ => {
                    let value = bson::to_bson(value)
                        .map_err(|e| PersistenceError::Validation(e.to_string()))?;
                    query.insert(field.as_str(), value);
                }
            }
        }

        Ok(Some(query))
    }
}

#[async_trait]
impl EntityRepository for MongoEntityRepositoryImpl {
    fn entity_type(&self) -> EntityType {
        self.schema.entity
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::MongoDb
    }

    async fn insert(&self, fields: FieldMap) -> Result<EntityRecord, PersistenceError> {
        let now = repository_now();
        let mut document =
            to_document(sanitize_input(self.schema, &[OBJECT_ID_FIELD], fields))?;
        document.insert(TENANT_ID_FIELD, self.tenant_id.value());
        document.insert(CREATED_AT_FIELD, bson_datetime(&now));
        document.insert(UPDATED_AT_FIELD, bson_datetime(&now));

        let inserted = self
            .collection()
            .insert_one(document)
            .await
            .map_err(map_mongo_error)?;

        let object_id = inserted.inserted_id.as_object_id().ok_or_else(|| {
            PersistenceError::Storage(format!("{} insert returned no id", self.schema.entity))
        })?;

        self.find_by_id(&RecordId::Text(object_id.to_hex())).await
    }

    async fn find_all(
        &self,
        filter: Option<RecordFilter>,
    ) -> Result<Vec<EntityRecord>, PersistenceError> {
        let query = match filter {
            Some(filter) => match self.to_query(&filter)? {
                Some(query) => query,
                None => return Ok(Vec::new()),
            },
            None => doc! { TENANT_ID_FIELD: self.tenant_id.value() },
        };

        let mut cursor = self
            .collection()
            .find(query)
            .sort(doc! { CREATED_AT_FIELD: 1, OBJECT_ID_FIELD: 1 })
            .await
            .map_err(map_mongo_error)?;

        let mut records = Vec::new();
        while cursor.advance().await.map_err(map_mongo_error)? {
            let document = cursor.deserialize_current().map_err(map_mongo_error)?;
            records.push(self.to_record(document)?);
        }

        Ok(records)
    }

    async fn find_by_id(&self, id: &RecordId) -> Result<EntityRecord, PersistenceError> {
        let Ok(object_id) = ObjectId::parse_str(id.to_string()) else {
            return Err(PersistenceError::not_found(self.schema.entity, id));
        };

        match self
            .collection()
            .find_one(self.scoped(object_id))
            .await
            .map_err(map_mongo_error)?
        {
            Some(document) => self.to_record(document),
            None => Err(PersistenceError::not_found(self.schema.entity, id)),
        }
    }

    async fn update(
        &self,
        id: &RecordId,
        patch: FieldMap,
    ) -> Result<EntityRecord, PersistenceError> {
        let Ok(object_id) = ObjectId::parse_str(id.to_string()) else {
            return Err(PersistenceError::not_found(self.schema.entity, id));
        };

        let mut changes =
            to_document(sanitize_input(self.schema, &[OBJECT_ID_FIELD], patch))?;
        changes.insert(UPDATED_AT_FIELD, bson_datetime(&repository_now()));

        match self
            .collection()
            .find_one_and_update(self.scoped(object_id), doc! { "$set": changes })
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_mongo_error)?
        {
            Some(document) => self.to_record(document),
            None => Err(PersistenceError::not_found(self.schema.entity, id)),
        }
    }
}
