use std::{collections::BTreeMap, sync::Arc};

use polyglot_tenancy::{
    config::app_config::AppConfig,
    shared::domain::model::enums::user_role::UserRole,
    tenancy::{
        PersistenceContext,
        domain::model::value_objects::tenant_id::TenantId,
        infrastructure::persistence::repositories::{
            static_tenant_config_store_repository_impl::StaticTenantConfigStoreRepositoryImpl,
            tenant_config_store_repository::StoredTenantConfiguration,
        },
    },
    trips::{
        application::{
            command_services::trip_command_service_impl::TripCommandServiceImpl,
            query_services::trip_query_service_impl::TripQueryServiceImpl,
        },
        domain::{
            model::{
                commands::transition_trip_status_command::TransitionTripStatusCommand,
                enums::{trip_domain_error::TripDomainError, trip_status::TripStatus},
                queries::get_trip_query::GetTripQuery,
            },
            services::{
                trip_command_service::TripCommandService, trip_query_service::TripQueryService,
            },
        },
    },
};
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::support::{actor, create_command};

/// Full stack against `TEST_POSTGRES_URL`: resolver, factory, pooled
/// connection and relational repository. Skipped without a database.
/// Empties the `trips` table first so the Museum trip is row 1.
#[tokio::test]
async fn museum_trip_cannot_skip_confirmation_on_postgres() {
    let Ok(database_url) = std::env::var("TEST_POSTGRES_URL") else {
        return;
    };

    let tenant = format!("museum-{}", Uuid::now_v7().simple());
    let params = json!({ "databaseUrl": database_url, "applyMigrations": true });
    let tenant_id = TenantId::new(tenant.clone()).expect("valid tenant id");
    let context = PersistenceContext::with_store(
        Arc::new(StaticTenantConfigStoreRepositoryImpl::new(vec![
            StoredTenantConfiguration {
                tenant_id: tenant.clone(),
                display_name: "Museum schools".to_string(),
                provider_type: "postgres".to_string(),
                provider_params: params,
                feature_flags: BTreeMap::new(),
                subscription_plan: "standard".to_string(),
                status: "active".to_string(),
            },
        ])),
        &AppConfig::default(),
    );
    context.warm_up(&tenant_id).await.expect("tenant database is migrated");

    let admin_pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .expect("admin connection opens");
    sqlx::query("TRUNCATE trips RESTART IDENTITY")
        .execute(&admin_pool)
        .await
        .expect("trips table is reset");
    admin_pool.close().await;

    let commands = TripCommandServiceImpl::new(
        context.tenant_config_resolver.clone(),
        context.repository_factory.clone(),
    );
    let queries = TripQueryServiceImpl::new(
        context.tenant_config_resolver.clone(),
        context.repository_factory.clone(),
    );

    let trip = commands
        .handle_create(&tenant_id, &actor(UserRole::SchoolStaff), create_command("Museum"))
        .await
        .expect("trip is created");
    assert_eq!(trip.status(), TripStatus::Pending);
    assert_eq!(trip.id().as_i64(), Some(1));

    let accepted = commands
        .handle_transition(
            &tenant_id,
            &actor(UserRole::BusCompany),
            TransitionTripStatusCommand::new(trip.id().clone(), TripStatus::Accepted, None)
                .expect("valid command"),
        )
        .await
        .expect("bus company accepts");
    assert_eq!(accepted.status(), TripStatus::Accepted);

    let skipped = commands
        .handle_transition(
            &tenant_id,
            &actor(UserRole::BusCompany),
            TransitionTripStatusCommand::new(trip.id().clone(), TripStatus::Completed, None)
                .expect("valid command"),
        )
        .await;
    assert!(matches!(
        skipped,
        Err(TripDomainError::InvalidStatusTransition {
            from: TripStatus::Accepted,
            to: TripStatus::Completed,
        })
    ));

    let stored = queries
        .handle_get(&tenant_id, GetTripQuery::new(trip.id().clone()))
        .await
        .expect("trip is still readable");
    assert_eq!(stored.status(), TripStatus::Accepted);
    assert_eq!(stored.status_changed_by(), Some("user-bus_company"));

    context.shutdown().await;
}
