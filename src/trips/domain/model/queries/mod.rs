pub mod get_trip_query;
pub mod list_sub_trips_query;
pub mod list_trips_query;
