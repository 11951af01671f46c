use thiserror::Error;

use crate::{
    shared::domain::model::enums::user_role::UserRole,
    tenancy::domain::model::enums::persistence_error::PersistenceError,
    trips::domain::model::enums::trip_status::TripStatus,
};

#[derive(Debug, Error)]
pub enum TripDomainError {
    #[error("invalid trip command: {0}")]
    InvalidCommand(String),

    #[error("trip not found: {0}")]
    TripNotFound(String),

    #[error("invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: TripStatus, to: TripStatus },

    #[error("role {role} may not {action}")]
    ActionNotPermitted { role: UserRole, action: String },

    #[error("organization {0} is outside the caller's scope")]
    OrganizationOutOfScope(String),

    #[error("buses can only be assigned to Pending or Accepted trips; trip is {0}")]
    BusAssignmentClosed(TripStatus),

    #[error("stored trip is malformed: {0}")]
    MalformedTrip(String),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
