pub mod assign_buses_command;
pub mod create_trip_command;
pub mod transition_trip_status_command;
