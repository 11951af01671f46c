use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    organizations::{
        application::organization_repositories::OrganizationRepositories,
        domain::{
            model::{
                entities::organization_settings::{ORGANIZATION_ID_FIELD, OrganizationSettings},
                enums::organization_domain_error::OrganizationDomainError,
                queries::get_settings_query::GetSettingsQuery,
            },
            services::settings_query_service::SettingsQueryService,
        },
    },
    tenancy::domain::{
        model::{
            entities::record_filter::RecordFilter, enums::entity_type::EntityType,
            value_objects::tenant_id::TenantId,
        },
        services::{
            repository_factory_service::RepositoryFactoryService,
            tenant_config_resolver_service::TenantConfigResolverService,
        },
    },
};

pub struct SettingsQueryServiceImpl {
    repositories: OrganizationRepositories,
}

impl SettingsQueryServiceImpl {
    pub fn new(
        tenant_config_resolver: Arc<dyn TenantConfigResolverService>,
        repository_factory: Arc<dyn RepositoryFactoryService>,
    ) -> Self {
        Self {
            repositories: OrganizationRepositories::new(tenant_config_resolver, repository_factory),
        }
    }
}

#[async_trait]
impl SettingsQueryService for SettingsQueryServiceImpl {
    async fn handle_get(
        &self,
        tenant_id: &TenantId,
        query: GetSettingsQuery,
    ) -> Result<Option<OrganizationSettings>, OrganizationDomainError> {
        let records = self
            .repositories
            .repository(tenant_id, EntityType::Settings)
            .await?
            .find_all(Some(RecordFilter::new().where_eq(
                ORGANIZATION_ID_FIELD,
                query.organization_id().to_string(),
            )))
            .await?;

        Ok(records.into_iter().next().map(OrganizationSettings::from_record))
    }
}
