use crate::trips::domain::model::entities::trip::Trip;

/// Result of assigning buses: the updated trip and the sub-trips created
/// for it, one per bus when more than one bus serves the trip.
#[derive(Clone, Debug)]
pub struct BusAssignmentOutcome {
    pub trip: Trip,
    pub sub_trips: Vec<Trip>,
}
