use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tenancy::domain::model::{
    enums::persistence_error::PersistenceError, value_objects::tenant_id::TenantId,
};

pub const TENANT_STATUS_ACTIVE: &str = "active";
pub const TENANT_STATUS_DISABLED: &str = "disabled";

/// A tenant configuration exactly as the registry holds it. The provider
/// type is kept as text until the resolver parses it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTenantConfiguration {
    pub tenant_id: String,
    #[serde(default)]
    pub display_name: String,
    pub provider_type: String,
    #[serde(default = "empty_object")]
    pub provider_params: Value,
    #[serde(default)]
    pub feature_flags: BTreeMap<String, bool>,
    #[serde(default = "default_subscription_plan")]
    pub subscription_plan: String,
    #[serde(default = "default_status")]
    pub status: String,
}

impl StoredTenantConfiguration {
    pub fn is_disabled(&self) -> bool {
        self.status.eq_ignore_ascii_case(TENANT_STATUS_DISABLED)
    }
}

fn empty_object() -> Value {
    Value::Object(Default::default())
}

fn default_subscription_plan() -> String {
    "standard".to_string()
}

fn default_status() -> String {
    TENANT_STATUS_ACTIVE.to_string()
}

/// Source of truth for tenant configurations.
#[async_trait]
pub trait TenantConfigStoreRepository: Send + Sync {
    async fn find_by_tenant_id(
        &self,
        tenant_id: &TenantId,
    ) -> Result<Option<StoredTenantConfiguration>, PersistenceError>;
}
