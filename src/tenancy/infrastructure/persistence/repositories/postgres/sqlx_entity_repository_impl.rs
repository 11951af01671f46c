use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};

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
            entity_type::EntityType, field_kind::FieldKind, persistence_error::PersistenceError,
            provider_type::ProviderType,
        },
        value_objects::{record_id::RecordId, tenant_id::TenantId},
    },
    infrastructure::persistence::repositories::{
        entity_repository::EntityRepository,
        postgres::sqlx_persistence_error_mapper::map_sqlx_error,
        record_normalizer::{canonical_timestamp, sanitize_input},
    },
};

const ID_COLUMN: &str = "id";
const TENANT_ID_COLUMN: &str = "tenant_id";
const CREATED_AT_COLUMN: &str = "created_at";
const UPDATED_AT_COLUMN: &str = "updated_at";

/// Relational repository over one table per entity.
///
/// Rows carry a `BIGSERIAL` id, the owning tenant and both audit columns
/// next to the columns declared in the entity schema. Input fields outside
/// the schema are not stored.
pub struct SqlxEntityRepositoryImpl {
    pool: Arc<PgPool>,
    tenant_id: TenantId,
    schema: &'static EntitySchema,
}

impl SqlxEntityRepositoryImpl {
    pub fn new(pool: Arc<PgPool>, tenant_id: TenantId, schema: &'static EntitySchema) -> Self {
        Self {
            pool,
            tenant_id,
            schema,
        }
    }

    fn quote_identifier(identifier: &str) -> Result<String, PersistenceError> {
        if identifier.is_empty()
            || !identifier
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(PersistenceError::Validation(format!(
                "invalid identifier '{identifier}'"
            )));
        }

        Ok(format!("\"{}\"", identifier))
    }

    fn table(&self) -> Result<String, PersistenceError> {
        Self::quote_identifier(self.schema.collection)
    }

    /// Semantic fields keyed by column name, restricted to the schema.
    fn to_columns(&self, fields: FieldMap) -> FieldMap {
        fields
            .into_iter()
            .filter_map(|(name, value)| {
                self.schema
                    .field(&name)
                    .map(|spec| (spec.column.to_string(), value))
            })
            .collect()
    }

    fn filter_column(&self, field: &str) -> Option<(&'static str, FieldKind)> {
        match field {
            ID_FIELD => Some((ID_COLUMN, FieldKind::Integer)),
            TENANT_ID_FIELD => Some((TENANT_ID_COLUMN, FieldKind::Text)),
            CREATED_AT_FIELD => Some((CREATED_AT_COLUMN, FieldKind::Timestamp)),
            UPDATED_AT_FIELD => Some((UPDATED_AT_COLUMN, FieldKind::Timestamp)),
            _ => self.schema.field(field).map(|spec| (spec.column, spec.kind)),
        }
    }

    fn to_record(&self, row: PgRow) -> Result<EntityRecord, PersistenceError> {
        let payload: Value = row.try_get("payload").map_err(map_sqlx_error)?;
        let Value::Object(columns) = payload else {
            return Err(PersistenceError::Storage(format!(
                "{} row is not an object",
                self.schema.entity
            )));
        };

        let mut document = FieldMap::new();
        for (column, value) in columns {
            match column.as_str() {
                ID_COLUMN => {
                    document.insert(ID_FIELD.to_string(), value);
                }
                TENANT_ID_COLUMN => {
                    document.insert(TENANT_ID_FIELD.to_string(), value);
                }
                CREATED_AT_COLUMN => {
                    document.insert(CREATED_AT_FIELD.to_string(), value);
                }
                UPDATED_AT_COLUMN => {
                    document.insert(UPDATED_AT_FIELD.to_string(), value);
                }
                _ => {
                    let Some(spec) = self.schema.field_by_column(&column) else {
                        continue;
                    };
                    if value.is_null() {
                        continue;
                    }
                    let value = match spec.kind {
                        FieldKind::Timestamp => canonical_timestamp(value),
                        _ => value,
                    };
                    document.insert(spec.name.to_string(), value);
                }
            }
        }

        EntityRecord::from_normalized(self.schema.entity, document)
    }
}

#[async_trait]
impl EntityRepository for SqlxEntityRepositoryImpl {
    fn entity_type(&self) -> EntityType {
        self.schema.entity
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::Postgres
    }

    async fn insert(&self, fields: FieldMap) -> Result<EntityRecord, PersistenceError> {
        let table = self.table()?;
        let now = format_timestamp(&repository_now());

        let mut row = self.to_columns(sanitize_input(self.schema, &[], fields));
        row.insert(
            TENANT_ID_COLUMN.to_string(),
            Value::String(self.tenant_id.value().to_string()),
        );
        row.insert(CREATED_AT_COLUMN.to_string(), Value::String(now.clone()));
        row.insert(UPDATED_AT_COLUMN.to_string(), Value::String(now));

        let columns = row
            .keys()
            .map(|column| Self::quote_identifier(column))
            .collect::<Result<Vec<_>, _>>()?;

        let statement = format!(
            "INSERT INTO {table} AS t ({}) SELECT {} FROM jsonb_populate_record(NULL::{table}, $1::jsonb) AS r RETURNING to_jsonb(t) AS payload",
            columns.join(", "),
            columns
                .iter()
                .map(|c| format!("r.{c}"))
                .collect::<Vec<_>>()
                .join(", "),
        );

        let row = sqlx::query(&statement)
            .bind(Value::Object(row))
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        self.to_record(row)
    }

    async fn find_all(
        &self,
        filter: Option<RecordFilter>,
    ) -> Result<Vec<EntityRecord>, PersistenceError> {
        let table = self.table()?;

        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT to_jsonb(t) AS payload FROM {table} AS t WHERE t.{} = ",
            Self::quote_identifier(TENANT_ID_COLUMN)?
        ));
        builder.push_bind(self.tenant_id.value().to_string());

        if let Some(filter) = filter {
            for (field, value) in filter.conditions() {
                // A field without a column can never equal anything.
                let Some((column, kind)) = self.filter_column(field) else {
                    return Ok(Vec::new());
                };
                let quoted = Self::quote_identifier(column)?;

                if value.is_null() {
                    builder.push(format!(" AND t.{quoted} IS NULL"));
                    continue;
                }

                match kind {
                    FieldKind::Timestamp => {
                        let Some(timestamp) = value.as_str().and_then(parse_timestamp) else {
                            return Ok(Vec::new());
                        };
                        builder.push(format!(" AND t.{quoted} = "));
                        builder.push_bind(timestamp);
                    }
                    _ => {
                        builder.push(format!(" AND to_jsonb(t.{quoted}) = "));
                        builder.push_bind(value.clone());
                        builder.push("::jsonb");
                    }
                }
            }
        }

        builder.push(format!(
            " ORDER BY t.{} ASC, t.{} ASC",
            Self::quote_identifier(CREATED_AT_COLUMN)?,
            Self::quote_identifier(ID_COLUMN)?
        ));

        let rows = builder
            .build()
            .fetch_all(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        rows.into_iter().map(|row| self.to_record(row)).collect()
    }

    async fn find_by_id(&self, id: &RecordId) -> Result<EntityRecord, PersistenceError> {
        let Some(numeric_id) = id.as_i64() else {
            return Err(PersistenceError::not_found(self.schema.entity, id));
        };
        let table = self.table()?;

        let statement = format!(
            "SELECT to_jsonb(t) AS payload FROM {table} AS t WHERE t.id = $1 AND t.tenant_id = $2"
        );

        let row = sqlx::query(&statement)
            .bind(numeric_id)
            .bind(self.tenant_id.value())
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        match row {
            Some(row) => self.to_record(row),
            None => Err(PersistenceError::not_found(self.schema.entity, id)),
        }
    }

    async fn update(
        &self,
        id: &RecordId,
        patch: FieldMap,
    ) -> Result<EntityRecord, PersistenceError> {
        let Some(numeric_id) = id.as_i64() else {
            return Err(PersistenceError::not_found(self.schema.entity, id));
        };
        let table = self.table()?;

        let mut row = self.to_columns(sanitize_input(self.schema, &[], patch));
        row.insert(
            UPDATED_AT_COLUMN.to_string(),
            Value::String(format_timestamp(&repository_now())),
        );

        let set_clause = row
            .keys()
            .map(|column| {
                let quoted = Self::quote_identifier(column)?;
                Ok::<String, PersistenceError>(format!("{quoted} = r.{quoted}"))
            })
            .collect::<Result<Vec<_>, _>>()?
            .join(", ");

        let statement = format!(
            "UPDATE {table} AS t SET {set_clause} FROM jsonb_populate_record(NULL::{table}, $1::jsonb) AS r WHERE t.id = $2 AND t.tenant_id = $3 RETURNING to_jsonb(t) AS payload"
        );

        let row = sqlx::query(&statement)
            .bind(Value::Object(row))
            .bind(numeric_id)
            .bind(self.tenant_id.value())
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        match row {
            Some(row) => self.to_record(row),
            None => Err(PersistenceError::not_found(self.schema.entity, id)),
        }
    }
}
