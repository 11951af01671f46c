pub mod deadline_entity_repository_impl;
pub mod entity_repository;
pub mod mongo;
pub mod postgres;
pub mod record_normalizer;
pub mod repository_registry;
pub mod static_tenant_config_store_repository_impl;
pub mod surreal;
pub mod tenant_config_store_repository;
