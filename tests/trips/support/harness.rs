use std::{collections::BTreeMap, sync::Arc};

use polyglot_tenancy::{
    tenancy::domain::model::{
        entities::tenant_config::{TenantConfig, TenantConfigParts},
        enums::{entity_type::EntityType, provider_type::ProviderType},
        value_objects::tenant_id::TenantId,
    },
    trips::application::{
        command_services::trip_command_service_impl::TripCommandServiceImpl,
        query_services::trip_query_service_impl::TripQueryServiceImpl,
    },
};
use serde_json::json;

use super::fakes::{FakeRepositoryFactory, FixedTenantConfigResolver, InMemoryEntityRepository};

pub struct TripTestHarness {
    pub tenant_id: TenantId,
    pub trips: Arc<InMemoryEntityRepository>,
    pub command_service: TripCommandServiceImpl,
    pub query_service: TripQueryServiceImpl,
}

pub fn create_harness() -> TripTestHarness {
    let tenant_id = TenantId::new("north".to_string()).expect("valid tenant id");
    let config = TenantConfig::new(TenantConfigParts {
        tenant_id: tenant_id.clone(),
        display_name: "North schools".to_string(),
        provider_type: ProviderType::Postgres,
        provider_params: json!({}),
        feature_flags: BTreeMap::new(),
        subscription_plan: "standard".to_string(),
    });

    let trips = Arc::new(InMemoryEntityRepository::new(EntityType::Trip, "north"));
    let resolver = Arc::new(FixedTenantConfigResolver::new(config));
    let factory = Arc::new(FakeRepositoryFactory::new(vec![trips.clone()]));

    TripTestHarness {
        tenant_id,
        trips,
        command_service: TripCommandServiceImpl::new(resolver.clone(), factory.clone()),
        query_service: TripQueryServiceImpl::new(resolver, factory),
    }
}
