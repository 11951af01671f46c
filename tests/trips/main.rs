
mod postgres_trip_scenario_tests;
