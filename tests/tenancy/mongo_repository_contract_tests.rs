use std::sync::Arc;

use polyglot_tenancy::tenancy::{
    domain::model::{
        entities::{entity_schema::EntitySchema, record_filter::RecordFilter},
        enums::{entity_type::EntityType, persistence_error::PersistenceError},
        value_objects::record_id::RecordId,
    },
    infrastructure::persistence::{
        connections::{
            mongo_provider_connector::{MongoConnection, MongoProviderConnector},
            provider_connector::ProviderConnector,
        },
        repositories::{
            entity_repository::EntityRepository,
            mongo::mongo_entity_repository_impl::MongoEntityRepositoryImpl,
        },
    },
};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::support::{fields, representative_fields, tenant_id};

/// Opens the server in `TEST_MONGODB_URI`; tests return early without it.
async fn connect() -> Option<(MongoProviderConnector, Arc<MongoConnection>)> {
    let uri = std::env::var("TEST_MONGODB_URI").ok()?;
    let connector = MongoProviderConnector::new();
    let connection = connector
        .connect(
            &tenant_id("contract"),
            &json!({ "uri": uri, "database": "polyglot_tenancy_contract" }),
        )
        .await
        .expect("mongodb connection opens");
    Some((connector, Arc::new(connection)))
}

/// Tenants get unique names so reruns against the same database do not
/// see each other's documents.
fn repository_for(
    connection: &Arc<MongoConnection>,
    tenant: &str,
    entity: EntityType,
) -> Arc<dyn EntityRepository> {
    Arc::new(MongoEntityRepositoryImpl::new(
        connection.clone(),
        tenant_id(&format!("{tenant}-{}", Uuid::now_v7().simple())),
        EntitySchema::for_entity(entity),
    ))
}

#[tokio::test]
async fn document_repository_honours_the_repository_contract() {
    let Some((connector, connection)) = connect().await else {
        return;
    };
    let suffix = Uuid::now_v7().simple().to_string();
    let repository = |tenant: &str| -> Arc<dyn EntityRepository> {
        Arc::new(MongoEntityRepositoryImpl::new(
            connection.clone(),
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
            "scheduledAt": "2026-05-04T09:30:00+02:00"
        })))
        .await
        .expect("insert succeeds");
    assert!(matches!(inserted.id, RecordId::Text(_)));
    assert_eq!(inserted.get_str("scheduledAt"), Some("2026-05-04T07:30:00.000Z"));
    assert_eq!(inserted.get_i64("passengerCount"), Some(40));

    let found = north.find_by_id(&inserted.id).await.expect("record is found");
    assert_eq!(found, inserted);

    let patch = fields(json!({ "status": "Accepted" }));
    let first = north
        .update(&inserted.id, patch.clone())
        .await
        .expect("update succeeds");
    let second = north.update(&inserted.id, patch).await.expect("update succeeds");
    assert_eq!(first.fields, second.fields);

    assert!(matches!(
        north.find_by_id(&RecordId::from("not-an-object-id")).await,
        Err(PersistenceError::NotFound { .. })
    ));
    assert!(matches!(
        south.find_by_id(&inserted.id).await,
        Err(PersistenceError::NotFound { .. })
    ));
    assert!(south.find_all(None).await.expect("list succeeds").is_empty());

    let zoo = north
        .insert(fields(json!({ "destination": "Zoo", "status": "Pending", "parentTripId": inserted.id.to_string() })))
        .await
        .expect("insert succeeds");
    let all = north.find_all(None).await.expect("list succeeds");
    assert_eq!(
        all.iter().map(|record| &record.id).collect::<Vec<_>>(),
        vec![&inserted.id, &zoo.id]
    );

    let top_level = north
        .find_all(Some(RecordFilter::new().where_eq("parentTripId", Value::Null)))
        .await
        .expect("null filter succeeds");
    assert_eq!(top_level.len(), 1);

    connector.close(&connection).await;
}

#[tokio::test]
async fn object_id_field_cannot_be_set_on_insert_or_update() {
    let Some((connector, connection)) = connect().await else {
        return;
    };
    let trips = repository_for(&connection, "north", EntityType::Trip);

    let inserted = trips
        .insert(fields(json!({ "_id": "forged", "destination": "Zoo", "status": "Pending" })))
        .await
        .expect("insert succeeds");
    assert_ne!(inserted.id, RecordId::from("forged"));
    assert!(inserted.get("_id").is_none());

    let updated = trips
        .update(
            &inserted.id,
            fields(json!({ "_id": "hijacked", "status": "Accepted" })),
        )
        .await
        .expect("update succeeds");
    assert_eq!(updated.id, inserted.id);
    assert_eq!(updated.get_str("status"), Some("Accepted"));

    let all = trips.find_all(None).await.expect("list succeeds");
    assert_eq!(all, vec![updated]);

    connector.close(&connection).await;
}

#[tokio::test]
async fn every_entity_type_reads_back_what_was_inserted() {
    let Some((connector, connection)) = connect().await else {
        return;
    };

    for entity in EntityType::all() {
        let repository = repository_for(&connection, "north", *entity);
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

    connector.close(&connection).await;
}
