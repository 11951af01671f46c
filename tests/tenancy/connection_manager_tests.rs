use std::{sync::Arc, time::Duration};

use polyglot_tenancy::tenancy::{
    domain::model::enums::persistence_error::PersistenceError,
    infrastructure::persistence::connections::provider_connection_manager::{
        ConnectionLifecycle, ProviderConnectionManager,
    },
};
use serde_json::json;
use tokio::task::JoinSet;

use crate::support::{CountingConnector, tenant_id};

#[tokio::test]
async fn get_connection_returns_the_cached_instance_for_a_tenant() {
    let connector = CountingConnector::new();
    let manager = ProviderConnectionManager::new(connector.clone());
    let tenant = tenant_id("north");

    let first = manager
        .get_connection(&tenant, &json!({}))
        .await
        .expect("connection opens");
    let second = manager
        .get_connection(&tenant, &json!({}))
        .await
        .expect("connection is cached");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.tenant_id, "north");
    assert_eq!(connector.stats(), (1, 0));
}

#[tokio::test]
async fn get_connection_keeps_tenants_apart() {
    let connector = CountingConnector::new();
    let manager = ProviderConnectionManager::new(connector.clone());

    let north = manager
        .get_connection(&tenant_id("north"), &json!({}))
        .await
        .expect("connection opens");
    let south = manager
        .get_connection(&tenant_id("south"), &json!({}))
        .await
        .expect("connection opens");

    assert!(!Arc::ptr_eq(&north, &south));
    assert_eq!(south.tenant_id, "south");
    assert_eq!(connector.stats(), (2, 0));
    assert_eq!(
        manager.cached_tenants().await,
        vec![tenant_id("north"), tenant_id("south")]
    );
}

#[tokio::test]
async fn concurrent_first_requests_share_one_construction() {
    let connector = CountingConnector::with_delay(Duration::from_millis(50));
    let manager = Arc::new(ProviderConnectionManager::new(connector.clone()));

    let mut tasks = JoinSet::new();
    for _ in 0..16 {
        let manager = manager.clone();
        tasks.spawn(async move {
            manager
                .get_connection(&tenant_id("north"), &json!({}))
                .await
                .expect("connection opens")
        });
    }

    let mut connections = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        connections.push(joined.expect("task completes"));
    }

    assert_eq!(connections.len(), 16);
    assert!(
        connections
            .iter()
            .all(|connection| Arc::ptr_eq(connection, &connections[0]))
    );
    assert_eq!(connector.stats(), (1, 0));
}

#[tokio::test]
async fn failed_construction_is_retried_on_the_next_request() {
    let connector = CountingConnector::failing_times(1);
    let manager = ProviderConnectionManager::new(connector.clone());
    let tenant = tenant_id("north");

    let first = manager.get_connection(&tenant, &json!({})).await;
    assert!(matches!(first, Err(PersistenceError::Connection(_))));
    assert!(manager.cached_tenants().await.is_empty());

    let second = manager
        .get_connection(&tenant, &json!({}))
        .await
        .expect("second attempt succeeds");
    assert_eq!(second.serial, 2);
    assert_eq!(connector.stats(), (2, 0));
}

#[tokio::test]
async fn invalidate_closes_the_connection_and_forces_a_new_one() {
    let connector = CountingConnector::new();
    let manager = ProviderConnectionManager::new(connector.clone());
    let tenant = tenant_id("north");

    let before = manager
        .get_connection(&tenant, &json!({}))
        .await
        .expect("connection opens");

    assert!(manager.invalidate(&tenant).await);
    assert!(!manager.invalidate(&tenant).await);

    let after = manager
        .get_connection(&tenant, &json!({}))
        .await
        .expect("connection reopens");

    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(connector.stats(), (2, 1));
}

#[tokio::test]
async fn invalidate_during_construction_closes_the_late_connection_once() {
    let connector = CountingConnector::with_delay(Duration::from_millis(100));
    let manager = Arc::new(ProviderConnectionManager::new(connector.clone()));
    let tenant = tenant_id("north");

    let mut tasks = JoinSet::new();
    for _ in 0..4 {
        let manager = manager.clone();
        tasks.spawn(async move {
            manager
                .get_connection(&tenant_id("north"), &json!({}))
                .await
        });
    }

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!manager.invalidate(&tenant).await);

    while let Some(joined) = tasks.join_next().await {
        match joined.expect("task completes") {
            Err(error @ PersistenceError::Connection(_)) => assert!(error.is_retryable()),
            Err(other) => panic!("expected a connection error, got {other:?}"),
            Ok(_) => panic!("expected a connection error, got an evicted connection"),
        }
    }

    assert_eq!(connector.stats(), (1, 1));
    assert!(manager.cached_tenants().await.is_empty());

    let fresh = manager
        .get_connection(&tenant, &json!({}))
        .await
        .expect("connection reopens");
    assert_eq!(fresh.serial, 2);
    assert_eq!(connector.stats(), (2, 1));
}

#[tokio::test]
async fn shutdown_closes_every_open_connection() {
    let connector = CountingConnector::new();
    let manager = ProviderConnectionManager::new(connector.clone());
    for tenant in ["north", "south", "east"] {
        manager
            .get_connection(&tenant_id(tenant), &json!({}))
            .await
            .expect("connection opens");
    }

    manager.shutdown().await;

    assert_eq!(connector.stats(), (3, 3));
    assert!(manager.cached_tenants().await.is_empty());
}
