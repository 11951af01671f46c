pub mod trip_command_service_impl;
