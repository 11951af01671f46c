pub mod bus_assignment_outcome;
pub mod trip;
