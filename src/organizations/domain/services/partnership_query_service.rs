use async_trait::async_trait;

use crate::{
    organizations::domain::model::{
        entities::partnership::Partnership,
        enums::organization_domain_error::OrganizationDomainError,
        queries::list_partnerships_for_school_query::ListPartnershipsForSchoolQuery,
    },
    tenancy::domain::model::value_objects::tenant_id::TenantId,
};

#[async_trait]
pub trait PartnershipQueryService: Send + Sync {
    async fn handle_list_for_school(
        &self,
        tenant_id: &TenantId,
        query: ListPartnershipsForSchoolQuery,
    ) -> Result<Vec<Partnership>, OrganizationDomainError>;
}
