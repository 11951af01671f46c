use std::sync::Arc;

use polyglot_tenancy::tenancy::{
    application::services::cached_tenant_config_resolver_service_impl::CachedTenantConfigResolverServiceImpl,
    domain::{
        model::enums::{persistence_error::PersistenceError, provider_type::ProviderType},
        services::tenant_config_resolver_service::TenantConfigResolverService,
    },
};
use serde_json::json;

use crate::support::{
    FakeTenantConfigStore, active_configuration, disabled_configuration, surreal_mem_params,
    tenant_id,
};

#[tokio::test]
async fn resolve_reads_the_store_once_and_serves_the_cache_afterwards() {
    let store = Arc::new(FakeTenantConfigStore::with_configurations(vec![
        active_configuration("north", "postgres", json!({ "databaseUrl": "postgres://db/north" })),
    ]));
    let resolver = CachedTenantConfigResolverServiceImpl::new(store.clone());

    let first = resolver
        .resolve(&tenant_id("north"))
        .await
        .expect("tenant resolves");
    let second = resolver
        .resolve(&tenant_id("north"))
        .await
        .expect("tenant resolves from cache");

    assert_eq!(first, second);
    assert_eq!(first.provider_type(), ProviderType::Postgres);
    assert_eq!(first.display_name(), "north schools");
    assert_eq!(store.lookups(), 1);
    assert_eq!(resolver.cached_tenants().await, vec![tenant_id("north")]);
}

#[tokio::test]
async fn resolve_returns_tenant_not_found_for_unknown_tenants() {
    let store = Arc::new(FakeTenantConfigStore::with_configurations(vec![]));
    let resolver = CachedTenantConfigResolverServiceImpl::new(store);

    let result = resolver.resolve(&tenant_id("ghost")).await;

    assert!(matches!(result, Err(PersistenceError::TenantNotFound(id)) if id == "ghost"));
}

#[tokio::test]
async fn resolve_rejects_disabled_tenants_without_caching_them() {
    let store = Arc::new(FakeTenantConfigStore::with_configurations(vec![
        disabled_configuration("north"),
    ]));
    let resolver = CachedTenantConfigResolverServiceImpl::new(store.clone());

    let result = resolver.resolve(&tenant_id("north")).await;
    assert!(matches!(result, Err(PersistenceError::TenantDisabled(_))));
    assert!(resolver.cached_tenants().await.is_empty());

    store.replace(active_configuration("north", "surrealdb", surreal_mem_params()));
    let reenabled = resolver.resolve(&tenant_id("north")).await;
    assert!(reenabled.is_ok());
    assert_eq!(store.lookups(), 2);
}

#[tokio::test]
async fn resolve_rejects_unknown_provider_types() {
    let store = Arc::new(FakeTenantConfigStore::with_configurations(vec![
        active_configuration("north", "cassandra", json!({})),
    ]));
    let resolver = CachedTenantConfigResolverServiceImpl::new(store);

    let result = resolver.resolve(&tenant_id("north")).await;

    match result {
        Err(error @ PersistenceError::UnsupportedProviderType(_)) => {
            assert!(error.is_configuration_error());
            assert!(error.to_string().contains("cassandra"));
        }
        other => panic!("expected unsupported provider, got {other:?}"),
    }
}

#[tokio::test]
async fn invalidate_forces_the_next_resolve_to_read_the_store() {
    let store = Arc::new(FakeTenantConfigStore::with_configurations(vec![
        active_configuration("north", "surrealdb", surreal_mem_params()),
    ]));
    let resolver = CachedTenantConfigResolverServiceImpl::new(store.clone());

    resolver
        .resolve(&tenant_id("north"))
        .await
        .expect("tenant resolves");
    store.replace(active_configuration("north", "mongodb", json!({ "uri": "mongodb://db", "database": "north" })));

    let stale = resolver
        .resolve(&tenant_id("north"))
        .await
        .expect("cached tenant resolves");
    assert_eq!(stale.provider_type(), ProviderType::SurrealDb);

    assert!(resolver.invalidate(&tenant_id("north")).await);
    assert!(!resolver.invalidate(&tenant_id("north")).await);

    let fresh = resolver
        .resolve(&tenant_id("north"))
        .await
        .expect("tenant resolves again");
    assert_eq!(fresh.provider_type(), ProviderType::MongoDb);
    assert_eq!(store.lookups(), 2);
}
