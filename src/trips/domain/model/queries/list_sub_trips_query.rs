use crate::tenancy::domain::model::value_objects::record_id::RecordId;

#[derive(Clone, Debug)]
pub struct ListSubTripsQuery {
    parent_trip_id: RecordId,
}

impl ListSubTripsQuery {
    pub fn new(parent_trip_id: impl Into<RecordId>) -> Self {
        Self {
            parent_trip_id: parent_trip_id.into(),
        }
    }

    pub fn parent_trip_id(&self) -> &RecordId {
        &self.parent_trip_id
    }
}
