use async_trait::async_trait;

use crate::{
    organizations::domain::model::{
        commands::create_partnership_command::CreatePartnershipCommand,
        entities::partnership::Partnership,
        enums::organization_domain_error::OrganizationDomainError,
    },
    tenancy::domain::model::value_objects::tenant_id::TenantId,
};

#[async_trait]
pub trait PartnershipCommandService: Send + Sync {
    async fn handle_create(
        &self,
        tenant_id: &TenantId,
        command: CreatePartnershipCommand,
    ) -> Result<Partnership, OrganizationDomainError>;
}
