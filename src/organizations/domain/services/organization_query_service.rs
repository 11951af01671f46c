use async_trait::async_trait;

use crate::{
    organizations::domain::model::{
        entities::organization::Organization,
        enums::organization_domain_error::OrganizationDomainError,
        queries::{
            get_organization_query::GetOrganizationQuery,
            list_organizations_query::ListOrganizationsQuery,
        },
    },
    tenancy::domain::model::value_objects::tenant_id::TenantId,
};

#[async_trait]
pub trait OrganizationQueryService: Send + Sync {
    async fn handle_get(
        &self,
        tenant_id: &TenantId,
        query: GetOrganizationQuery,
    ) -> Result<Organization, OrganizationDomainError>;

    async fn handle_list(
        &self,
        tenant_id: &TenantId,
        query: ListOrganizationsQuery,
    ) -> Result<Vec<Organization>, OrganizationDomainError>;
}
