use std::{sync::Arc, time::Duration};

use polyglot_tenancy::tenancy::{
    domain::model::{
        entities::{entity_schema::EntitySchema, record_filter::RecordFilter},
        enums::{entity_type::EntityType, persistence_error::PersistenceError},
        value_objects::record_id::RecordId,
    },
    infrastructure::persistence::{
        connections::{
            postgres_provider_connector::PostgresProviderConnector,
            provider_connector::ProviderConnector,
        },
        repositories::{
            entity_repository::EntityRepository,
            postgres::sqlx_entity_repository_impl::SqlxEntityRepositoryImpl,
        },
    },
};
use serde_json::{Value, json};
use sqlx::PgPool;
use uuid::Uuid;

use crate::support::{fields, representative_fields, tenant_id};

/// Opens the database in `TEST_POSTGRES_URL`; tests return early without it.
async fn connect() -> Option<Arc<PgPool>> {
    let database_url = std::env::var("TEST_POSTGRES_URL").ok()?;
    let pool = PostgresProviderConnector::new(2, Duration::from_secs(3))
        .connect(
            &tenant_id("contract"),
            &json!({ "databaseUrl": database_url, "applyMigrations": true }),
        )
        .await
        .expect("postgres connection opens");
    Some(Arc::new(pool))
}

/// Tenants get unique names so reruns against the same database do not
/// see each other's rows.
#[tokio::test]
async fn relational_repository_honours_the_repository_contract() {
    let Some(pool) = connect().await else {
        return;
    };
    let suffix = Uuid::now_v7().simple().to_string();
    let repository = |tenant: &str| -> Arc<dyn EntityRepository> {
        Arc::new(SqlxEntityRepositoryImpl::new(
            pool.clone(),
            tenant_id(&format!("{tenant}-{suffix}")),
            EntitySchema::for_entity(EntityType::Trip),
        ))
    };
    let north = repository("north");
    let south = repository("south");

    let inserted = north
        .insert(fields(json!({
            "destination": "Museum",
            "passengerCount": 40,
            "status": "Pending",
            "scheduledAt": "2026-05-04T09:30:00+02:00",
            "buses": [{ "busId": "bus-1", "capacity": 50 }],
            "notAColumn": "dropped"
        })))
        .await
        .expect("insert succeeds");
    assert!(matches!(inserted.id, RecordId::Number(_)));
    assert_eq!(inserted.get_str("scheduledAt"), Some("2026-05-04T07:30:00.000Z"));
    assert_eq!(inserted.get("buses"), Some(&json!([{ "busId": "bus-1", "capacity": 50 }])));
    assert!(inserted.get("notAColumn").is_none());
    assert!(inserted.get("parentTripId").is_none());

    let found = north
        .find_by_id(&RecordId::from(inserted.id.to_string()))
        .await
        .expect("numeric text ids are accepted");
    assert_eq!(found, inserted);

    let patch = fields(json!({ "status": "Accepted", "statusChangedBy": "driver-7" }));
    let first = north
        .update(&inserted.id, patch.clone())
        .await
        .expect("update succeeds");
    let second = north.update(&inserted.id, patch).await.expect("update succeeds");
    assert_eq!(first.fields, second.fields);
    assert_eq!(second.created_at, inserted.created_at);

    assert!(matches!(
        north.find_by_id(&RecordId::from("not-a-number")).await,
        Err(PersistenceError::NotFound { .. })
    ));
    assert!(matches!(
        south.find_by_id(&inserted.id).await,
        Err(PersistenceError::NotFound { .. })
    ));
    assert!(matches!(
        south.update(&inserted.id, fields(json!({ "status": "Canceled" }))).await,
        Err(PersistenceError::NotFound { .. })
    ));
    assert!(south.find_all(None).await.expect("list succeeds").is_empty());

    let zoo = north
        .insert(fields(json!({ "destination": "Zoo", "status": "Pending" })))
        .await
        .expect("insert succeeds");
    let all = north.find_all(None).await.expect("list succeeds");
    assert_eq!(
        all.iter().map(|record| &record.id).collect::<Vec<_>>(),
        vec![&inserted.id, &zoo.id]
    );

    let by_schedule = north
        .find_all(Some(
            RecordFilter::new().where_eq("scheduledAt", "2026-05-04T07:30:00Z"),
        ))
        .await
        .expect("timestamp filter succeeds");
    assert_eq!(by_schedule.len(), 1);

    let top_level = north
        .find_all(Some(RecordFilter::new().where_eq("parentTripId", Value::Null)))
        .await
        .expect("null filter succeeds");
    assert_eq!(top_level.len(), 2);

    let unknown_field = north
        .find_all(Some(RecordFilter::new().where_eq("notAColumn", "dropped")))
        .await
        .expect("unknown fields match nothing");
    assert!(unknown_field.is_empty());
}

#[tokio::test]
async fn every_entity_type_reads_back_what_was_inserted() {
    let Some(pool) = connect().await else {
        return;
    };
    let tenant = tenant_id(&format!("north-{}", Uuid::now_v7().simple()));

    for entity in EntityType::all() {
        let repository = SqlxEntityRepositoryImpl::new(
            pool.clone(),
            tenant.clone(),
            EntitySchema::for_entity(*entity),
        );
        let inserted = repository
            .insert(representative_fields(*entity))
            .await
            .unwrap_or_else(|error| panic!("{entity:?} insert failed: {error}"));

        for (name, value) in representative_fields(*entity) {
            assert_eq!(inserted.get(&name), Some(&value), "{entity:?}.{name}");
        }

        let found = repository
            .find_by_id(&inserted.id)
            .await
            .unwrap_or_else(|error| panic!("{entity:?} read failed: {error}"));
        assert_eq!(found, inserted, "{entity:?}");
    }
}
