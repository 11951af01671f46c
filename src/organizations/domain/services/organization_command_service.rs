use async_trait::async_trait;

use crate::{
    organizations::domain::model::{
        commands::{
            create_organization_command::CreateOrganizationCommand,
            rename_organization_command::RenameOrganizationCommand,
        },
        entities::organization::Organization,
        enums::organization_domain_error::OrganizationDomainError,
    },
    tenancy::domain::model::value_objects::tenant_id::TenantId,
};

#[async_trait]
pub trait OrganizationCommandService: Send + Sync {
    /// A parent, when given, must be a parent_group of the same tenant.
    async fn handle_create(
        &self,
        tenant_id: &TenantId,
        command: CreateOrganizationCommand,
    ) -> Result<Organization, OrganizationDomainError>;

    async fn handle_rename(
        &self,
        tenant_id: &TenantId,
        command: RenameOrganizationCommand,
    ) -> Result<Organization, OrganizationDomainError>;
}
