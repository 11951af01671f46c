use std::time::Duration;

use thiserror::Error;

use crate::tenancy::domain::model::enums::entity_type::EntityType;

/// Provider-independent failures surfaced by the persistence core.
///
/// Every driver error is translated into one of these variants before it
/// leaves a repository or a connection manager.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum PersistenceError {
    #[error("tenant id is required")]
    InvalidTenantId,

    #[error("tenant configuration not found: {0}")]
    TenantNotFound(String),

    #[error("tenant is disabled: {0}")]
    TenantDisabled(String),

    #[error("unsupported provider type: {0}")]
    UnsupportedProviderType(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("operation exceeded its deadline of {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("storage error: {0}")]
    Storage(String),
}

impl PersistenceError {
    pub fn not_found(entity: EntityType, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.as_str().to_string(),
            id: id.to_string(),
        }
    }

    /// Connection failures and deadlines may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout(_))
    }

    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTenantId
                | Self::TenantNotFound(_)
                | Self::TenantDisabled(_)
                | Self::UnsupportedProviderType(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
