use polyglot_tenancy::tenancy::domain::model::{
    entities::record_filter::RecordFilter,
    enums::{entity_type::EntityType, persistence_error::PersistenceError, provider_type::ProviderType},
    value_objects::record_id::RecordId,
};
use serde_json::{Value, json};

use crate::support::{create_surreal_harness, fields, representative_fields};

#[tokio::test]
async fn insert_then_find_by_id_returns_the_same_fields() {
    let harness = create_surreal_harness().await;
    let trips = harness.repository("north", EntityType::Trip);

    let inserted = trips
        .insert(fields(json!({
            "destination": "Museum",
            "passengerCount": 40,
            "status": "Pending",
            "scheduledAt": "2026-05-04T09:30:00+02:00",
            "buses": []
        })))
        .await
        .expect("insert succeeds");

    assert_eq!(trips.provider_type(), ProviderType::SurrealDb);
    assert!(matches!(inserted.id, RecordId::Text(_)));
    assert_eq!(inserted.tenant_id, "north");
    assert_eq!(inserted.created_at, inserted.updated_at);
    assert_eq!(inserted.get_str("scheduledAt"), Some("2026-05-04T07:30:00.000Z"));

    let found = trips
        .find_by_id(&inserted.id)
        .await
        .expect("record is found");
    assert_eq!(found, inserted);
    assert_eq!(found.get_str("destination"), Some("Museum"));
    assert_eq!(found.get_i64("passengerCount"), Some(40));
}

#[tokio::test]
async fn insert_ignores_caller_supplied_identity_fields() {
    let harness = create_surreal_harness().await;
    let trips = harness.repository("north", EntityType::Trip);

    let inserted = trips
        .insert(fields(json!({
            "id": "forged",
            "tenantId": "south",
            "createdAt": "2001-01-01T00:00:00Z",
            "destination": "Zoo",
            "status": "Pending"
        })))
        .await
        .expect("insert succeeds");

    assert_ne!(inserted.id, RecordId::from("forged"));
    assert_eq!(inserted.tenant_id, "north");
    assert!(inserted.created_at.timestamp() > 978_307_200);
    assert!(inserted.get("id").is_none());
}

#[tokio::test]
async fn storage_key_field_cannot_be_set_on_insert_or_update() {
    let harness = create_surreal_harness().await;
    let trips = harness.repository("north", EntityType::Trip);

    let inserted = trips
        .insert(fields(json!({ "_key": "forged", "destination": "Zoo", "status": "Pending" })))
        .await
        .expect("insert succeeds");
    assert_ne!(inserted.id, RecordId::from("forged"));
    assert!(inserted.get("_key").is_none());

    let updated = trips
        .update(
            &inserted.id,
            fields(json!({ "_key": "hijacked", "status": "Accepted" })),
        )
        .await
        .expect("update succeeds");
    assert_eq!(updated.id, inserted.id);
    assert_eq!(updated.get_str("status"), Some("Accepted"));

    let found = trips
        .find_by_id(&inserted.id)
        .await
        .expect("record keeps its id");
    assert_eq!(found, updated);
    assert!(matches!(
        trips.find_by_id(&RecordId::from("hijacked")).await,
        Err(PersistenceError::NotFound { .. })
    ));

    let by_id = trips
        .find_all(Some(RecordFilter::new().where_eq("id", inserted.id.to_string())))
        .await
        .expect("id filter succeeds");
    assert_eq!(by_id, vec![found]);
}

#[tokio::test]
async fn every_entity_type_reads_back_what_was_inserted() {
    let harness = create_surreal_harness().await;

    for entity in EntityType::all() {
        let repository = harness.repository("north", *entity);
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

#[tokio::test]
async fn repeating_an_update_leaves_the_same_fields() {
    let harness = create_surreal_harness().await;
    let trips = harness.repository("north", EntityType::Trip);
    let inserted = trips
        .insert(fields(json!({ "destination": "Museum", "status": "Pending" })))
        .await
        .expect("insert succeeds");

    let patch = fields(json!({ "status": "Accepted", "statusChangedBy": "driver-7" }));
    let first = trips
        .update(&inserted.id, patch.clone())
        .await
        .expect("first update succeeds");
    let second = trips
        .update(&inserted.id, patch)
        .await
        .expect("second update succeeds");

    assert_eq!(first.fields, second.fields);
    assert_eq!(second.get_str("status"), Some("Accepted"));
    assert_eq!(second.get_str("destination"), Some("Museum"));
    assert_eq!(second.created_at, inserted.created_at);
    assert!(second.updated_at >= first.updated_at);
}

#[tokio::test]
async fn missing_records_report_not_found_on_read_and_update() {
    let harness = create_surreal_harness().await;
    let trips = harness.repository("north", EntityType::Trip);
    let missing = RecordId::from("0190a1b2-0000-7000-8000-000000000000");

    let read = trips.find_by_id(&missing).await;
    let write = trips
        .update(&missing, fields(json!({ "status": "Accepted" })))
        .await;

    assert!(matches!(read, Err(PersistenceError::NotFound { .. })));
    assert!(matches!(write, Err(PersistenceError::NotFound { .. })));
    assert!(trips.find_all(None).await.expect("list succeeds").is_empty());
}

#[tokio::test]
async fn records_of_one_tenant_are_invisible_to_another() {
    let harness = create_surreal_harness().await;
    let north = harness.repository("north", EntityType::Trip);
    let south = harness.repository("south", EntityType::Trip);

    let inserted = north
        .insert(fields(json!({ "destination": "Museum", "status": "Pending" })))
        .await
        .expect("insert succeeds");

    assert!(south.find_all(None).await.expect("list succeeds").is_empty());
    assert!(matches!(
        south.find_by_id(&inserted.id).await,
        Err(PersistenceError::NotFound { .. })
    ));
    assert!(matches!(
        south
            .update(&inserted.id, fields(json!({ "status": "Canceled" })))
            .await,
        Err(PersistenceError::NotFound { .. })
    ));

    let untouched = north
        .find_by_id(&inserted.id)
        .await
        .expect("owner still reads it");
    assert_eq!(untouched.get_str("status"), Some("Pending"));
}

#[tokio::test]
async fn find_all_lists_in_creation_order_and_applies_filters() {
    let harness = create_surreal_harness().await;
    let trips = harness.repository("north", EntityType::Trip);

    let museum = trips
        .insert(fields(json!({ "destination": "Museum", "status": "Pending" })))
        .await
        .expect("insert succeeds");
    let zoo = trips
        .insert(fields(json!({ "destination": "Zoo", "status": "Accepted" })))
        .await
        .expect("insert succeeds");
    let sub_trip = trips
        .insert(fields(json!({
            "destination": "Museum",
            "status": "Pending",
            "parentTripId": museum.id.to_string()
        })))
        .await
        .expect("insert succeeds");

    let all = trips.find_all(None).await.expect("list succeeds");
    let ids = all.iter().map(|record| record.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids, vec![museum.id.clone(), zoo.id.clone(), sub_trip.id.clone()]);

    let pending = trips
        .find_all(Some(RecordFilter::new().where_eq("status", "Pending")))
        .await
        .expect("filtered list succeeds");
    assert_eq!(pending.len(), 2);

    let top_level = trips
        .find_all(Some(RecordFilter::new().where_eq("parentTripId", Value::Null)))
        .await
        .expect("null filter succeeds");
    assert_eq!(
        top_level.iter().map(|record| &record.id).collect::<Vec<_>>(),
        vec![&museum.id, &zoo.id]
    );

    let none = trips
        .find_all(Some(RecordFilter::new().where_eq("destination", "Aquarium")))
        .await
        .expect("empty result is not an error");
    assert!(none.is_empty());
}

#[tokio::test]
async fn find_all_rejects_field_names_that_are_not_identifiers() {
    let harness = create_surreal_harness().await;
    let trips = harness.repository("north", EntityType::Trip);

    let result = trips
        .find_all(Some(
            RecordFilter::new().where_eq("status` = 1 OR true OR `x", "Pending"),
        ))
        .await;

    assert!(matches!(result, Err(PersistenceError::Validation(_))));
}
