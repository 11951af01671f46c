pub mod bus_assignment;
pub mod trip_status_transition;
