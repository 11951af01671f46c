use serde::{Serialize, Serializer};

use crate::{
    tenancy::domain::model::{
        entities::entity_record::EntityRecord, value_objects::record_id::RecordId,
    },
    trips::domain::model::{
        enums::{trip_domain_error::TripDomainError, trip_status::TripStatus},
        value_objects::bus_assignment::BusAssignment,
    },
};

pub const DESTINATION_FIELD: &str = "destination";
pub const SCHEDULED_AT_FIELD: &str = "scheduledAt";
pub const RETURN_AT_FIELD: &str = "returnAt";
pub const PASSENGER_COUNT_FIELD: &str = "passengerCount";
pub const STATUS_FIELD: &str = "status";
pub const BUSES_FIELD: &str = "buses";
pub const PARENT_TRIP_ID_FIELD: &str = "parentTripId";
pub const ORGANIZATION_ID_FIELD: &str = "organizationId";
pub const BUS_COMPANY_ORG_ID_FIELD: &str = "busCompanyOrgId";
pub const CREATED_BY_USER_ID_FIELD: &str = "createdByUserId";
pub const CREATED_BY_NAME_FIELD: &str = "createdByName";
pub const CREATED_BY_EMAIL_FIELD: &str = "createdByEmail";
pub const STATUS_CHANGED_BY_FIELD: &str = "statusChangedBy";
pub const STATUS_NOTE_FIELD: &str = "statusNote";

/// Typed view over a stored trip record.
#[derive(Clone, Debug, PartialEq)]
pub struct Trip {
    record: EntityRecord,
    status: TripStatus,
}

impl Trip {
    pub fn from_record(record: EntityRecord) -> Result<Self, TripDomainError> {
        let status = record
            .get_str(STATUS_FIELD)
            .ok_or_else(|| TripDomainError::MalformedTrip(format!("trip {} has no status", record.id)))?
            .parse::<TripStatus>()
            .map_err(|_| {
                TripDomainError::MalformedTrip(format!("trip {} has an unknown status", record.id))
            })?;

        Ok(Self { record, status })
    }

    pub fn id(&self) -> &RecordId {
        &self.record.id
    }

    pub fn status(&self) -> TripStatus {
        self.status
    }

    pub fn destination(&self) -> Option<&str> {
        self.record.get_str(DESTINATION_FIELD)
    }

    pub fn passenger_count(&self) -> Option<i64> {
        self.record.get_i64(PASSENGER_COUNT_FIELD)
    }

    pub fn organization_id(&self) -> Option<&str> {
        self.record.get_str(ORGANIZATION_ID_FIELD)
    }

    pub fn bus_company_org_id(&self) -> Option<&str> {
        self.record.get_str(BUS_COMPANY_ORG_ID_FIELD)
    }

    pub fn parent_trip_id(&self) -> Option<&str> {
        self.record.get_str(PARENT_TRIP_ID_FIELD)
    }

    pub fn created_by_user_id(&self) -> Option<&str> {
        self.record.get_str(CREATED_BY_USER_ID_FIELD)
    }

    pub fn status_changed_by(&self) -> Option<&str> {
        self.record.get_str(STATUS_CHANGED_BY_FIELD)
    }

    pub fn status_note(&self) -> Option<&str> {
        self.record.get_str(STATUS_NOTE_FIELD)
    }

    /// Buses as stored; entries that do not parse are skipped.
    pub fn buses(&self) -> Vec<BusAssignment> {
        self.record
            .get(BUSES_FIELD)
            .and_then(|value| value.as_array())
            .map(|buses| {
                buses
                    .iter()
                    .filter_map(|bus| serde_json::from_value(bus.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn record(&self) -> &EntityRecord {
        &self.record
    }

    pub fn into_record(self) -> EntityRecord {
        self.record
    }
}

impl Serialize for Trip {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.record.serialize(serializer)
    }
}
