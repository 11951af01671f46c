use std::sync::Arc;

use crate::{
    organizations::domain::model::{
        entities::organization::Organization,
        enums::organization_domain_error::OrganizationDomainError,
    },
    tenancy::{
        domain::{
            model::{
                enums::entity_type::EntityType,
                value_objects::{record_id::RecordId, tenant_id::TenantId},
            },
            services::{
                repository_factory_service::RepositoryFactoryService,
                tenant_config_resolver_service::TenantConfigResolverService,
            },
        },
        infrastructure::persistence::repositories::entity_repository::EntityRepository,
    },
};

/// Resolves the tenant and hands out the repositories the organization
/// services share.
#[derive(Clone)]
pub(crate) struct OrganizationRepositories {
    tenant_config_resolver: Arc<dyn TenantConfigResolverService>,
    repository_factory: Arc<dyn RepositoryFactoryService>,
}

impl OrganizationRepositories {
    pub(crate) fn new(
        tenant_config_resolver: Arc<dyn TenantConfigResolverService>,
        repository_factory: Arc<dyn RepositoryFactoryService>,
    ) -> Self {
        Self {
            tenant_config_resolver,
            repository_factory,
        }
    }

    pub(crate) async fn repository(
        &self,
        tenant_id: &TenantId,
        entity_type: EntityType,
    ) -> Result<Arc<dyn EntityRepository>, OrganizationDomainError> {
        let tenant_config = self.tenant_config_resolver.resolve(tenant_id).await?;
        Ok(self
            .repository_factory
            .get_repository(entity_type, &tenant_config)
            .await?)
    }

    /// Loads an organization of `tenant_id`; records owned by another
    /// tenant read as missing.
    pub(crate) async fn load_organization(
        repository: &dyn EntityRepository,
        tenant_id: &TenantId,
        organization_id: &RecordId,
    ) -> Result<Organization, OrganizationDomainError> {
        let record = match repository.find_by_id(organization_id).await {
            Ok(record) => record,
            Err(error) if error.is_not_found() => {
                return Err(OrganizationDomainError::OrganizationNotFound(
                    organization_id.to_string(),
                ));
            }
            Err(error) => return Err(error.into()),
        };

        if record.tenant_id != tenant_id.value() {
            return Err(OrganizationDomainError::OrganizationNotFound(
                organization_id.to_string(),
            ));
        }

        Organization::from_record(record)
    }
}
