//! SurrealDB connections.
//!
//! `mem://` addresses start the embedded in-memory engine; `ws://` and
//! `http://` addresses reach a remote server.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use surrealdb::{
    Surreal,
    engine::any::{self, Any},
    opt::auth::Root,
};

use crate::tenancy::{
    domain::model::{
        entities::entity_schema::EntitySchema,
        enums::{
            entity_type::EntityType, persistence_error::PersistenceError,
            provider_type::ProviderType,
        },
        value_objects::tenant_id::TenantId,
    },
    infrastructure::persistence::connections::provider_connector::{
        ProviderConnector, parse_provider_params,
    },
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SurrealProviderParams {
    url: String,
    namespace: String,
    database: String,
    username: Option<String>,
    password: Option<String>,
}

#[derive(Default)]
pub struct SurrealProviderConnector;

impl SurrealProviderConnector {
    pub fn new() -> Self {
        Self
    }

    /// One schemaless table per entity, so reads before the first write
    /// see an empty table.
    fn table_definitions() -> String {
        EntityType::all()
            .iter()
            .map(|entity| {
                format!(
                    "DEFINE TABLE IF NOT EXISTS {} SCHEMALESS;",
                    EntitySchema::for_entity(*entity).collection
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl ProviderConnector for SurrealProviderConnector {
    type Connection = Surreal<Any>;

    fn provider_type(&self) -> ProviderType {
        ProviderType::SurrealDb
    }

    async fn connect(
        &self,
        _tenant_id: &TenantId,
        provider_params: &Value,
    ) -> Result<Surreal<Any>, PersistenceError> {
        let params: SurrealProviderParams =
            parse_provider_params(ProviderType::SurrealDb, provider_params)?;

        let db = any::connect(params.url.as_str())
            .await
            .map_err(|e| PersistenceError::Connection(e.to_string()))?;

        if let (Some(username), Some(password)) = (params.username, params.password) {
            db.signin(Root { username, password })
                .await
                .map_err(|e| PersistenceError::Connection(e.to_string()))?;
        }

        db.use_ns(&params.namespace)
            .use_db(&params.database)
            .await
            .map_err(|e| PersistenceError::Connection(e.to_string()))?;

        db.query(Self::table_definitions())
            .await
            .map_err(|e| PersistenceError::Connection(e.to_string()))?
            .check()
            .map_err(|e| PersistenceError::Connection(e.to_string()))?;

        Ok(db)
    }
}
