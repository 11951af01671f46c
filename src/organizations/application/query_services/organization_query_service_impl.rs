use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    organizations::{
        application::organization_repositories::OrganizationRepositories,
        domain::{
            model::{
                entities::organization::{ORG_TYPE_FIELD, Organization, PARENT_ORG_ID_FIELD},
                enums::organization_domain_error::OrganizationDomainError,
                queries::{
                    get_organization_query::GetOrganizationQuery,
                    list_organizations_query::ListOrganizationsQuery,
                },
            },
            services::organization_query_service::OrganizationQueryService,
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

pub struct OrganizationQueryServiceImpl {
    repositories: OrganizationRepositories,
}

impl OrganizationQueryServiceImpl {
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
impl OrganizationQueryService for OrganizationQueryServiceImpl {
    async fn handle_get(
        &self,
        tenant_id: &TenantId,
        query: GetOrganizationQuery,
    ) -> Result<Organization, OrganizationDomainError> {
        let repository = self
            .repositories
            .repository(tenant_id, EntityType::Organization)
            .await?;
        OrganizationRepositories::load_organization(
            repository.as_ref(),
            tenant_id,
            query.organization_id(),
        )
        .await
    }

    async fn handle_list(
        &self,
        tenant_id: &TenantId,
        query: ListOrganizationsQuery,
    ) -> Result<Vec<Organization>, OrganizationDomainError> {
        let mut filter = RecordFilter::new();
        if let Some(org_type) = query.org_type() {
            filter = filter.where_eq(ORG_TYPE_FIELD, org_type.as_str());
        }
        if let Some(parent_org_id) = query.parent_org_id() {
            filter = filter.where_eq(PARENT_ORG_ID_FIELD, parent_org_id);
        }

        self.repositories
            .repository(tenant_id, EntityType::Organization)
            .await?
            .find_all((!filter.is_empty()).then_some(filter))
            .await?
            .into_iter()
            .map(Organization::from_record)
            .collect()
    }
}
