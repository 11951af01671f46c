use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::{
    organizations::{
        application::organization_repositories::OrganizationRepositories,
        domain::{
            model::{
                commands::{
                    create_organization_command::CreateOrganizationCommand,
                    rename_organization_command::RenameOrganizationCommand,
                },
                entities::organization::{
                    NAME_FIELD, ORG_TYPE_FIELD, Organization, PARENT_ORG_ID_FIELD,
                    SHORT_CODE_FIELD,
                },
                enums::{
                    organization_domain_error::OrganizationDomainError,
                    organization_type::OrganizationType,
                },
            },
            services::organization_command_service::OrganizationCommandService,
        },
    },
    tenancy::domain::{
        model::{
            entities::entity_record::FieldMap,
            enums::entity_type::EntityType,
            value_objects::{record_id::RecordId, tenant_id::TenantId},
        },
        services::{
            repository_factory_service::RepositoryFactoryService,
            tenant_config_resolver_service::TenantConfigResolverService,
        },
    },
};

pub struct OrganizationCommandServiceImpl {
    repositories: OrganizationRepositories,
}

impl OrganizationCommandServiceImpl {
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
impl OrganizationCommandService for OrganizationCommandServiceImpl {
    async fn handle_create(
        &self,
        tenant_id: &TenantId,
        command: CreateOrganizationCommand,
    ) -> Result<Organization, OrganizationDomainError> {
        let repository = self
            .repositories
            .repository(tenant_id, EntityType::Organization)
            .await?;

        if let Some(parent_org_id) = command.parent_org_id() {
            let parent = OrganizationRepositories::load_organization(
                repository.as_ref(),
                tenant_id,
                &RecordId::from(parent_org_id),
            )
            .await?;
            if parent.org_type() != OrganizationType::ParentGroup {
                return Err(OrganizationDomainError::InvalidParentType {
                    id: parent_org_id.to_string(),
                    actual: parent.org_type(),
                });
            }
        }

        let mut fields = FieldMap::new();
        fields.insert(
            ORG_TYPE_FIELD.to_string(),
            Value::String(command.org_type().as_str().to_string()),
        );
        fields.insert(
            NAME_FIELD.to_string(),
            Value::String(command.name().to_string()),
        );
        if let Some(short_code) = command.short_code() {
            fields.insert(
                SHORT_CODE_FIELD.to_string(),
                Value::String(short_code.to_string()),
            );
        }
        if let Some(parent_org_id) = command.parent_org_id() {
            fields.insert(
                PARENT_ORG_ID_FIELD.to_string(),
                Value::String(parent_org_id.to_string()),
            );
        }

        let organization = Organization::from_record(repository.insert(fields).await?)?;
        info!(
            tenant_id = %tenant_id,
            organization_id = %organization.id(),
            org_type = %organization.org_type(),
            "organization created"
        );

        Ok(organization)
    }

    async fn handle_rename(
        &self,
        tenant_id: &TenantId,
        command: RenameOrganizationCommand,
    ) -> Result<Organization, OrganizationDomainError> {
        let repository = self
            .repositories
            .repository(tenant_id, EntityType::Organization)
            .await?;
        OrganizationRepositories::load_organization(
            repository.as_ref(),
            tenant_id,
            command.organization_id(),
        )
        .await?;

        let mut patch = FieldMap::new();
        patch.insert(
            NAME_FIELD.to_string(),
            Value::String(command.name().to_string()),
        );

        let record = repository.update(command.organization_id(), patch).await?;
        Organization::from_record(record)
    }
}
