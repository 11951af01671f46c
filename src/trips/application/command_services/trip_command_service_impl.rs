use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::{
    shared::domain::model::{enums::user_role::UserRole, value_objects::actor_context::ActorContext},
    tenancy::{
        domain::{
            model::{
                entities::{
                    entity_record::{FieldMap, format_timestamp},
                    record_filter::RecordFilter,
                },
                enums::entity_type::EntityType,
                value_objects::{record_id::RecordId, tenant_id::TenantId},
            },
            services::{
                repository_factory_service::RepositoryFactoryService,
                tenant_config_resolver_service::TenantConfigResolverService,
            },
        },
        infrastructure::persistence::repositories::entity_repository::EntityRepository,
    },
    trips::domain::{
        model::{
            commands::{
                assign_buses_command::AssignBusesCommand, create_trip_command::CreateTripCommand,
                transition_trip_status_command::TransitionTripStatusCommand,
            },
            entities::{
                bus_assignment_outcome::BusAssignmentOutcome,
                trip::{
                    BUS_COMPANY_ORG_ID_FIELD, BUSES_FIELD, CREATED_BY_EMAIL_FIELD,
                    CREATED_BY_NAME_FIELD, CREATED_BY_USER_ID_FIELD, DESTINATION_FIELD,
                    ORGANIZATION_ID_FIELD, PARENT_TRIP_ID_FIELD, PASSENGER_COUNT_FIELD,
                    RETURN_AT_FIELD, SCHEDULED_AT_FIELD, STATUS_CHANGED_BY_FIELD, STATUS_FIELD,
                    STATUS_NOTE_FIELD, Trip,
                },
            },
            enums::{trip_domain_error::TripDomainError, trip_status::TripStatus},
            value_objects::{
                bus_assignment::BusAssignment, trip_status_transition::TripStatusTransition,
            },
        },
        services::trip_command_service::TripCommandService,
    },
};

const CREATOR_ROLES: &[UserRole] = &[UserRole::SchoolStaff, UserRole::TripManager, UserRole::Admin];
const BUS_ASSIGNER_ROLES: &[UserRole] = &[UserRole::BusCompany, UserRole::Admin];

/// Fields a sub-trip inherits from its parent.
const INHERITED_FIELDS: [&str; 8] = [
    DESTINATION_FIELD,
    SCHEDULED_AT_FIELD,
    RETURN_AT_FIELD,
    ORGANIZATION_ID_FIELD,
    BUS_COMPANY_ORG_ID_FIELD,
    CREATED_BY_USER_ID_FIELD,
    CREATED_BY_NAME_FIELD,
    CREATED_BY_EMAIL_FIELD,
];

pub struct TripCommandServiceImpl {
    tenant_config_resolver: Arc<dyn TenantConfigResolverService>,
    repository_factory: Arc<dyn RepositoryFactoryService>,
}

impl TripCommandServiceImpl {
    pub fn new(
        tenant_config_resolver: Arc<dyn TenantConfigResolverService>,
        repository_factory: Arc<dyn RepositoryFactoryService>,
    ) -> Self {
        Self {
            tenant_config_resolver,
            repository_factory,
        }
    }

    async fn trip_repository(
        &self,
        tenant_id: &TenantId,
    ) -> Result<Arc<dyn EntityRepository>, TripDomainError> {
        let tenant_config = self.tenant_config_resolver.resolve(tenant_id).await?;
        Ok(self
            .repository_factory
            .get_repository(EntityType::Trip, &tenant_config)
            .await?)
    }

    async fn load_trip(
        repository: &dyn EntityRepository,
        trip_id: &RecordId,
    ) -> Result<Trip, TripDomainError> {
        match repository.find_by_id(trip_id).await {
            Ok(record) => Trip::from_record(record),
            Err(error) if error.is_not_found() => {
                Err(TripDomainError::TripNotFound(trip_id.to_string()))
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn write_trip(
        repository: &dyn EntityRepository,
        trip_id: &RecordId,
        patch: FieldMap,
    ) -> Result<Trip, TripDomainError> {
        match repository.update(trip_id, patch).await {
            Ok(record) => Trip::from_record(record),
            Err(error) if error.is_not_found() => {
                Err(TripDomainError::TripNotFound(trip_id.to_string()))
            }
            Err(error) => Err(error.into()),
        }
    }

    fn ensure_role(
        actor: &ActorContext,
        roles: &[UserRole],
        action: &str,
    ) -> Result<(), TripDomainError> {
        if !actor.has_role(roles) {
            return Err(TripDomainError::ActionNotPermitted {
                role: actor.role(),
                action: action.to_string(),
            });
        }

        Ok(())
    }

    /// A scoped bus-company actor only reaches trips of its own companies.
    fn ensure_bus_company_scope(actor: &ActorContext, trip: &Trip) -> Result<(), TripDomainError> {
        if actor.role() != UserRole::BusCompany || actor.allowed_org_ids().is_empty() {
            return Ok(());
        }

        match trip.bus_company_org_id() {
            Some(org_id) if actor.can_reach_org(org_id) => Ok(()),
            Some(org_id) => Err(TripDomainError::OrganizationOutOfScope(org_id.to_string())),
            None => Err(TripDomainError::OrganizationOutOfScope(
                "unassigned bus company".to_string(),
            )),
        }
    }

    fn sub_trip_fields(parent: &Trip, bus: &BusAssignment) -> Result<FieldMap, TripDomainError> {
        let mut fields = FieldMap::new();
        for field in INHERITED_FIELDS {
            if let Some(value) = parent.record().get(field) {
                fields.insert(field.to_string(), value.clone());
            }
        }

        fields.insert(
            STATUS_FIELD.to_string(),
            Value::String(parent.status().as_str().to_string()),
        );
        fields.insert(
            PARENT_TRIP_ID_FIELD.to_string(),
            Value::String(parent.id().to_string()),
        );
        if let Some(passengers) = bus.passengers {
            fields.insert(PASSENGER_COUNT_FIELD.to_string(), Value::from(passengers));
        }
        fields.insert(
            BUSES_FIELD.to_string(),
            serde_json::to_value(vec![bus])
                .map_err(|e| TripDomainError::InvalidCommand(e.to_string()))?,
        );

        Ok(fields)
    }
}

#[async_trait]
impl TripCommandService for TripCommandServiceImpl {
    async fn handle_create(
        &self,
        tenant_id: &TenantId,
        actor: &ActorContext,
        command: CreateTripCommand,
    ) -> Result<Trip, TripDomainError> {
        Self::ensure_role(actor, CREATOR_ROLES, "create trips")?;
        if let Some(organization_id) = command.organization_id() {
            if !actor.can_reach_org(organization_id) {
                return Err(TripDomainError::OrganizationOutOfScope(
                    organization_id.to_string(),
                ));
            }
        }

        let mut fields = FieldMap::new();
        fields.insert(
            DESTINATION_FIELD.to_string(),
            Value::String(command.destination().to_string()),
        );
        fields.insert(
            STATUS_FIELD.to_string(),
            Value::String(TripStatus::Pending.as_str().to_string()),
        );
        if let Some(scheduled_at) = command.scheduled_at() {
            fields.insert(
                SCHEDULED_AT_FIELD.to_string(),
                Value::String(format_timestamp(&scheduled_at)),
            );
        }
        if let Some(return_at) = command.return_at() {
            fields.insert(
                RETURN_AT_FIELD.to_string(),
                Value::String(format_timestamp(&return_at)),
            );
        }
        if let Some(passenger_count) = command.passenger_count() {
            fields.insert(
                PASSENGER_COUNT_FIELD.to_string(),
                Value::from(passenger_count),
            );
        }
        if let Some(organization_id) = command.organization_id() {
            fields.insert(
                ORGANIZATION_ID_FIELD.to_string(),
                Value::String(organization_id.to_string()),
            );
        }
        if let Some(bus_company_org_id) = command.bus_company_org_id() {
            fields.insert(
                BUS_COMPANY_ORG_ID_FIELD.to_string(),
                Value::String(bus_company_org_id.to_string()),
            );
        }
        fields.insert(
            CREATED_BY_USER_ID_FIELD.to_string(),
            Value::String(actor.user_id().to_string()),
        );
        fields.insert(
            CREATED_BY_NAME_FIELD.to_string(),
            Value::String(actor.display_name().to_string()),
        );
        fields.insert(
            CREATED_BY_EMAIL_FIELD.to_string(),
            Value::String(actor.email().to_string()),
        );
        fields.insert(BUSES_FIELD.to_string(), Value::Array(Vec::new()));

        let repository = self.trip_repository(tenant_id).await?;
        let trip = Trip::from_record(repository.insert(fields).await?)?;

        info!(
            tenant_id = %tenant_id,
            trip_id = %trip.id(),
            created_by = actor.user_id(),
            "trip created"
        );
        Ok(trip)
    }

    async fn handle_transition(
        &self,
        tenant_id: &TenantId,
        actor: &ActorContext,
        command: TransitionTripStatusCommand,
    ) -> Result<Trip, TripDomainError> {
        let repository = self.trip_repository(tenant_id).await?;
        let trip = Self::load_trip(repository.as_ref(), command.trip_id()).await?;

        let transition = TripStatusTransition::new(trip.status(), command.target_status())?;
        transition.authorize(actor)?;
        Self::ensure_bus_company_scope(actor, &trip)?;

        let mut patch = FieldMap::new();
        patch.insert(
            STATUS_FIELD.to_string(),
            Value::String(transition.to().as_str().to_string()),
        );
        patch.insert(
            STATUS_CHANGED_BY_FIELD.to_string(),
            Value::String(actor.user_id().to_string()),
        );
        if let Some(note) = command.note() {
            patch.insert(STATUS_NOTE_FIELD.to_string(), Value::String(note.to_string()));
        }

        let updated = Self::write_trip(repository.as_ref(), trip.id(), patch).await?;

        info!(
            tenant_id = %tenant_id,
            trip_id = %updated.id(),
            from = %transition.from(),
            to = %transition.to(),
            role = %actor.role(),
            "trip status changed"
        );
        Ok(updated)
    }

    async fn handle_assign_buses(
        &self,
        tenant_id: &TenantId,
        actor: &ActorContext,
        command: AssignBusesCommand,
    ) -> Result<BusAssignmentOutcome, TripDomainError> {
        Self::ensure_role(actor, BUS_ASSIGNER_ROLES, "assign buses")?;

        let repository = self.trip_repository(tenant_id).await?;
        let trip = Self::load_trip(repository.as_ref(), command.trip_id()).await?;

        if !matches!(trip.status(), TripStatus::Pending | TripStatus::Accepted) {
            return Err(TripDomainError::BusAssignmentClosed(trip.status()));
        }
        Self::ensure_bus_company_scope(actor, &trip)?;

        let mut patch = FieldMap::new();
        patch.insert(
            BUSES_FIELD.to_string(),
            serde_json::to_value(command.buses())
                .map_err(|e| TripDomainError::InvalidCommand(e.to_string()))?,
        );
        let trip = Self::write_trip(repository.as_ref(), trip.id(), patch).await?;

        if !command.splits_into_sub_trips() {
            return Ok(BusAssignmentOutcome {
                trip,
                sub_trips: Vec::new(),
            });
        }

        let mut sub_trips = repository
            .find_all(Some(
                RecordFilter::new().where_eq(PARENT_TRIP_ID_FIELD, trip.id().to_string()),
            ))
            .await?
            .into_iter()
            .map(Trip::from_record)
            .collect::<Result<Vec<_>, _>>()?;

        // Buses that already have a sub-trip keep it.
        let covered = sub_trips
            .iter()
            .flat_map(|sub_trip| sub_trip.buses())
            .map(|bus| bus.bus_id)
            .collect::<HashSet<_>>();

        for bus in command.buses() {
            if covered.contains(&bus.bus_id) {
                continue;
            }
            let fields = Self::sub_trip_fields(&trip, bus)?;
            sub_trips.push(Trip::from_record(repository.insert(fields).await?)?);
        }

        info!(
            tenant_id = %tenant_id,
            trip_id = %trip.id(),
            buses = command.buses().len(),
            sub_trips = sub_trips.len(),
            "buses assigned"
        );
        Ok(BusAssignmentOutcome { trip, sub_trips })
    }
}
