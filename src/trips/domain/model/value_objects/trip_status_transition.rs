use crate::{
    shared::domain::model::{enums::user_role::UserRole, value_objects::actor_context::ActorContext},
    trips::domain::model::enums::{trip_domain_error::TripDomainError, trip_status::TripStatus},
};

const OPERATOR_ROLES: &[UserRole] = &[UserRole::BusCompany, UserRole::Admin];
const ORGANIZER_ROLES: &[UserRole] = &[UserRole::SchoolStaff, UserRole::TripManager, UserRole::Admin];
const COMPLETION_ROLES: &[UserRole] = &[UserRole::BusCompany, UserRole::TripManager, UserRole::Admin];

/// A validated edge of the trip lifecycle graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TripStatusTransition {
    from: TripStatus,
    to: TripStatus,
}

impl TripStatusTransition {
    pub fn new(from: TripStatus, to: TripStatus) -> Result<Self, TripDomainError> {
        if !from.can_transition_to(to) {
            return Err(TripDomainError::InvalidStatusTransition { from, to });
        }

        Ok(Self { from, to })
    }

    pub fn from(&self) -> TripStatus {
        self.from
    }

    pub fn to(&self) -> TripStatus {
        self.to
    }

    pub fn allowed_roles(&self) -> &'static [UserRole] {
        match self.to {
            TripStatus::Accepted | TripStatus::Rejected => OPERATOR_ROLES,
            TripStatus::Confirmed | TripStatus::Canceled => ORGANIZER_ROLES,
            TripStatus::Completed => COMPLETION_ROLES,
            TripStatus::Pending => &[],
        }
    }

    pub fn authorize(&self, actor: &ActorContext) -> Result<(), TripDomainError> {
        if !actor.has_role(self.allowed_roles()) {
            return Err(TripDomainError::ActionNotPermitted {
                role: actor.role(),
                action: format!("move a trip from {} to {}", self.from, self.to),
            });
        }

        Ok(())
    }
}
