use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    organizations::{
        application::organization_repositories::OrganizationRepositories,
        domain::{
            model::{
                entities::partnership::{Partnership, SCHOOL_ORG_ID_FIELD},
                enums::organization_domain_error::OrganizationDomainError,
                queries::list_partnerships_for_school_query::ListPartnershipsForSchoolQuery,
            },
            services::partnership_query_service::PartnershipQueryService,
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

pub struct PartnershipQueryServiceImpl {
    repositories: OrganizationRepositories,
}

impl PartnershipQueryServiceImpl {
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
impl PartnershipQueryService for PartnershipQueryServiceImpl {
    async fn handle_list_for_school(
        &self,
        tenant_id: &TenantId,
        query: ListPartnershipsForSchoolQuery,
    ) -> Result<Vec<Partnership>, OrganizationDomainError> {
        self.repositories
            .repository(tenant_id, EntityType::Partnership)
            .await?
            .find_all(Some(
                RecordFilter::new()
                    .where_eq(SCHOOL_ORG_ID_FIELD, query.school_org_id().to_string()),
            ))
            .await?
            .into_iter()
            .map(Partnership::from_record)
            .collect()
    }
}
