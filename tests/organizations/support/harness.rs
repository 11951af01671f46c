use std::{collections::BTreeMap, sync::Arc};

use polyglot_tenancy::{
    config::app_config::AppConfig,
    organizations::{
        application::{
            command_services::{
                organization_command_service_impl::OrganizationCommandServiceImpl,
                partnership_command_service_impl::PartnershipCommandServiceImpl,
                settings_command_service_impl::SettingsCommandServiceImpl,
            },
            query_services::{
                organization_query_service_impl::OrganizationQueryServiceImpl,
                partnership_query_service_impl::PartnershipQueryServiceImpl,
                settings_query_service_impl::SettingsQueryServiceImpl,
            },
        },
        domain::{
            model::{
                entities::organization::Organization, enums::organization_type::OrganizationType,
            },
            services::organization_command_service::OrganizationCommandService,
        },
    },
    tenancy::{
        PersistenceContext,
        domain::model::value_objects::tenant_id::TenantId,
        infrastructure::persistence::repositories::{
            static_tenant_config_store_repository_impl::StaticTenantConfigStoreRepositoryImpl,
            tenant_config_store_repository::StoredTenantConfiguration,
        },
    },
};
use serde_json::json;

use super::fixtures::{create_organization, tenant_id};

/// Organization services over embedded SurrealDB. Tenants `north` and
/// `south` each get their own in-memory store.
pub struct OrganizationTestHarness {
    pub north: TenantId,
    pub south: TenantId,
    pub context: PersistenceContext,
    pub organizations: OrganizationCommandServiceImpl,
    pub organization_queries: OrganizationQueryServiceImpl,
    pub partnerships: PartnershipCommandServiceImpl,
    pub partnership_queries: PartnershipQueryServiceImpl,
    pub settings: SettingsCommandServiceImpl,
    pub settings_queries: SettingsQueryServiceImpl,
}

impl OrganizationTestHarness {
    pub async fn organization(
        &self,
        tenant_id: &TenantId,
        org_type: OrganizationType,
        name: &str,
    ) -> Organization {
        self.organizations
            .handle_create(tenant_id, create_organization(org_type, name, None))
            .await
            .expect("organization is created")
    }
}

fn surreal_tenant(tenant: &str) -> StoredTenantConfiguration {
    StoredTenantConfiguration {
        tenant_id: tenant.to_string(),
        display_name: format!("{tenant} schools"),
        provider_type: "surrealdb".to_string(),
        provider_params: json!({ "url": "mem://", "namespace": "fleet", "database": tenant }),
        feature_flags: BTreeMap::new(),
        subscription_plan: "standard".to_string(),
        status: "active".to_string(),
    }
}

pub fn create_harness() -> OrganizationTestHarness {
    let context = PersistenceContext::with_store(
        Arc::new(StaticTenantConfigStoreRepositoryImpl::new(vec![
            surreal_tenant("north"),
            surreal_tenant("south"),
        ])),
        &AppConfig::default(),
    );
    let resolver = context.tenant_config_resolver.clone();
    let factory = context.repository_factory.clone();

    OrganizationTestHarness {
        north: tenant_id("north"),
        south: tenant_id("south"),
        organizations: OrganizationCommandServiceImpl::new(resolver.clone(), factory.clone()),
        organization_queries: OrganizationQueryServiceImpl::new(resolver.clone(), factory.clone()),
        partnerships: PartnershipCommandServiceImpl::new(resolver.clone(), factory.clone()),
        partnership_queries: PartnershipQueryServiceImpl::new(resolver.clone(), factory.clone()),
        settings: SettingsCommandServiceImpl::new(resolver.clone(), factory.clone()),
        settings_queries: SettingsQueryServiceImpl::new(resolver, factory),
        context,
    }
}
