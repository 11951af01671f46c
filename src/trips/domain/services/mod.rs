pub mod trip_command_service;
pub mod trip_query_service;
