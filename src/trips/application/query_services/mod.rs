pub mod trip_query_service_impl;
