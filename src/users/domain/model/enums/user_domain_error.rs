use thiserror::Error;

use crate::{
    shared::domain::model::enums::user_role::UserRole,
    tenancy::domain::model::enums::persistence_error::PersistenceError,
};

#[derive(Debug, Error)]
pub enum UserDomainError {
    #[error("invalid user command: {0}")]
    InvalidCommand(String),

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("email already registered: {0}")]
    EmailAlreadyRegistered(String),

    #[error("role {role} may not {action}")]
    ActionNotPermitted { role: UserRole, action: String },

    #[error("stored user is malformed: {0}")]
    MalformedUser(String),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
