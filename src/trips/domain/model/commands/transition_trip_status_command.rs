use validator::Validate;

use crate::{
    tenancy::domain::model::value_objects::record_id::RecordId,
    trips::domain::model::enums::{trip_domain_error::TripDomainError, trip_status::TripStatus},
};

#[derive(Clone, Debug, Validate)]
pub struct TransitionTripStatusCommand {
    trip_id: RecordId,
    target_status: TripStatus,
    #[validate(length(max = 500))]
    note: Option<String>,
}

impl TransitionTripStatusCommand {
    pub fn new(
        trip_id: impl Into<RecordId>,
        target_status: TripStatus,
        note: Option<String>,
    ) -> Result<Self, TripDomainError> {
        let command = Self {
            trip_id: trip_id.into(),
            target_status,
            note: note
                .map(|note| note.trim().to_string())
                .filter(|note| !note.is_empty()),
        };

        command
            .validate()
            .map_err(|e| TripDomainError::InvalidCommand(e.to_string()))?;

        Ok(command)
    }

    pub fn trip_id(&self) -> &RecordId {
        &self.trip_id
    }

    pub fn target_status(&self) -> TripStatus {
        self.target_status
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}
