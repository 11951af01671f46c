use async_trait::async_trait;
use mongodb::{Client, Database, bson::doc};
use serde::Deserialize;
use serde_json::Value;

use crate::tenancy::{
    domain::model::{
        enums::{persistence_error::PersistenceError, provider_type::ProviderType},
        value_objects::tenant_id::TenantId,
    },
    infrastructure::persistence::connections::provider_connector::{
        ProviderConnector, parse_provider_params,
    },
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MongoProviderParams {
    uri: String,
    database: String,
}

/// A driver client together with the tenant's database handle.
#[derive(Clone, Debug)]
pub struct MongoConnection {
    client: Client,
    database: Database,
}

impl MongoConnection {
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.database
    }
}

#[derive(Default)]
pub struct MongoProviderConnector;

impl MongoProviderConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProviderConnector for MongoProviderConnector {
    type Connection = MongoConnection;

    fn provider_type(&self) -> ProviderType {
        ProviderType::MongoDb
    }

    async fn connect(
        &self,
        _tenant_id: &TenantId,
        provider_params: &Value,
    ) -> Result<MongoConnection, PersistenceError> {
        let params: MongoProviderParams =
            parse_provider_params(ProviderType::MongoDb, provider_params)?;

        let client = Client::with_uri_str(&params.uri)
            .await
            .map_err(|e| PersistenceError::Connection(e.to_string()))?;
        let database = client.database(&params.database);

        // The driver connects lazily; ping so bad addresses fail here.
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| PersistenceError::Connection(e.to_string()))?;

        Ok(MongoConnection { client, database })
    }

    async fn close(&self, connection: &MongoConnection) {
        connection.client.clone().shutdown().await;
    }
}
