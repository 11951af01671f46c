pub mod repository_factory_service;
pub mod tenant_config_resolver_service;
