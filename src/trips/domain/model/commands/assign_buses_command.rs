use std::collections::HashSet;

use validator::Validate;

use crate::{
    tenancy::domain::model::value_objects::record_id::RecordId,
    trips::domain::model::{
        enums::trip_domain_error::TripDomainError, value_objects::bus_assignment::BusAssignment,
    },
};

#[derive(Clone, Debug, Validate)]
pub struct AssignBusesCommand {
    trip_id: RecordId,
    #[validate(length(min = 1, max = 20), nested)]
    buses: Vec<BusAssignment>,
}

impl AssignBusesCommand {
    pub fn new(
        trip_id: impl Into<RecordId>,
        buses: Vec<BusAssignment>,
    ) -> Result<Self, TripDomainError> {
        let command = Self {
            trip_id: trip_id.into(),
            buses,
        };

        command
            .validate()
            .map_err(|e| TripDomainError::InvalidCommand(e.to_string()))?;

        let mut seen = HashSet::new();
        for bus in &command.buses {
            if !seen.insert(bus.bus_id.as_str()) {
                return Err(TripDomainError::InvalidCommand(format!(
                    "bus {} is assigned twice",
                    bus.bus_id
                )));
            }
            if bus.is_overbooked() {
                return Err(TripDomainError::InvalidCommand(format!(
                    "bus {} carries more passengers than its capacity",
                    bus.bus_id
                )));
            }
        }

        Ok(command)
    }

    pub fn trip_id(&self) -> &RecordId {
        &self.trip_id
    }

    pub fn buses(&self) -> &[BusAssignment] {
        &self.buses
    }

    pub fn splits_into_sub_trips(&self) -> bool {
        self.buses.len() > 1
    }
}
