pub mod cached_tenant_config_resolver_service_impl;
pub mod repository_factory_service_impl;
