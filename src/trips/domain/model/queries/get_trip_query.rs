use crate::tenancy::domain::model::value_objects::record_id::RecordId;

#[derive(Clone, Debug)]
pub struct GetTripQuery {
    trip_id: RecordId,
}

impl GetTripQuery {
    pub fn new(trip_id: impl Into<RecordId>) -> Self {
        Self {
            trip_id: trip_id.into(),
        }
    }

    pub fn trip_id(&self) -> &RecordId {
        &self.trip_id
    }
}
