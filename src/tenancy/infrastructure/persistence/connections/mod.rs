pub mod mongo_provider_connector;
pub mod postgres_provider_connector;
pub mod provider_connection_manager;
pub mod provider_connector;
pub mod surreal_provider_connector;
