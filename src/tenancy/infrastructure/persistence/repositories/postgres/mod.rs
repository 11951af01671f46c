pub mod sqlx_entity_repository_impl;
pub mod sqlx_persistence_error_mapper;
pub mod sqlx_tenant_config_store_repository_impl;
