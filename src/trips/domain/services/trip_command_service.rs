use async_trait::async_trait;

use crate::{
    shared::domain::model::value_objects::actor_context::ActorContext,
    tenancy::domain::model::value_objects::tenant_id::TenantId,
    trips::domain::model::{
        commands::{
            assign_buses_command::AssignBusesCommand, create_trip_command::CreateTripCommand,
            transition_trip_status_command::TransitionTripStatusCommand,
        },
        entities::{bus_assignment_outcome::BusAssignmentOutcome, trip::Trip},
        enums::trip_domain_error::TripDomainError,
    },
};

#[async_trait]
pub trait TripCommandService: Send + Sync {
    async fn handle_create(
        &self,
        tenant_id: &TenantId,
        actor: &ActorContext,
        command: CreateTripCommand,
    ) -> Result<Trip, TripDomainError>;

    /// Rejects invalid transitions and unauthorized actors before the
    /// trip is written.
    async fn handle_transition(
        &self,
        tenant_id: &TenantId,
        actor: &ActorContext,
        command: TransitionTripStatusCommand,
    ) -> Result<Trip, TripDomainError>;

    async fn handle_assign_buses(
        &self,
        tenant_id: &TenantId,
        actor: &ActorContext,
        command: AssignBusesCommand,
    ) -> Result<BusAssignmentOutcome, TripDomainError>;
}
