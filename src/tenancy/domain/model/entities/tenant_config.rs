use std::collections::BTreeMap;

use serde_json::Value;

use crate::tenancy::domain::model::{
    enums::provider_type::ProviderType, value_objects::tenant_id::TenantId,
};

pub struct TenantConfigParts {
    pub tenant_id: TenantId,
    pub display_name: String,
    pub provider_type: ProviderType,
    pub provider_params: Value,
    pub feature_flags: BTreeMap<String, bool>,
    pub subscription_plan: String,
}

/// Which provider serves a tenant and how to reach it.
#[derive(Clone, Debug, PartialEq)]
pub struct TenantConfig {
    tenant_id: TenantId,
    display_name: String,
    provider_type: ProviderType,
    provider_params: Value,
    feature_flags: BTreeMap<String, bool>,
    subscription_plan: String,
}

impl TenantConfig {
    pub fn new(parts: TenantConfigParts) -> Self {
        Self {
            tenant_id: parts.tenant_id,
            display_name: parts.display_name,
            provider_type: parts.provider_type,
            provider_params: parts.provider_params,
            feature_flags: parts.feature_flags,
            subscription_plan: parts.subscription_plan,
        }
    }

    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
    pub fn provider_type(&self) -> ProviderType {
        self.provider_type
    }
    pub fn provider_params(&self) -> &Value {
        &self.provider_params
    }
    pub fn feature_flags(&self) -> &BTreeMap<String, bool> {
        &self.feature_flags
    }
    pub fn subscription_plan(&self) -> &str {
        &self.subscription_plan
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.feature_flags.get(feature).copied().unwrap_or(false)
    }
}
