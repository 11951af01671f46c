use async_trait::async_trait;
use serde_json::Value;

use crate::tenancy::domain::model::{
    enums::{persistence_error::PersistenceError, provider_type::ProviderType},
    value_objects::tenant_id::TenantId,
};

/// Opens the low-level client of one storage technology.
#[async_trait]
pub trait ProviderConnector: Send + Sync {
    type Connection: Send + Sync + 'static;

    fn provider_type(&self) -> ProviderType;

    async fn connect(
        &self,
        tenant_id: &TenantId,
        provider_params: &Value,
    ) -> Result<Self::Connection, PersistenceError>;

    async fn close(&self, _connection: &Self::Connection) {}
}

pub(crate) fn parse_provider_params<T>(
    provider: ProviderType,
    provider_params: &Value,
) -> Result<T, PersistenceError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(provider_params.clone()).map_err(|e| {
        PersistenceError::Connection(format!("invalid {provider} connection parameters: {e}"))
    })
}
