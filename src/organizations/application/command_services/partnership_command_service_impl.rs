use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::{
    organizations::{
        application::organization_repositories::OrganizationRepositories,
        domain::{
            model::{
                commands::create_partnership_command::CreatePartnershipCommand,
                entities::{
                    organization::Organization,
                    partnership::{
                        BUS_COMPANY_ORG_ID_FIELD, Partnership, SCHOOL_ORG_ID_FIELD, STATUS_FIELD,
                    },
                },
                enums::{
                    organization_domain_error::OrganizationDomainError,
                    organization_type::OrganizationType, partnership_status::PartnershipStatus,
                },
            },
            services::partnership_command_service::PartnershipCommandService,
        },
    },
    tenancy::{
        domain::{
            model::{
                entities::{entity_record::FieldMap, record_filter::RecordFilter},
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

pub struct PartnershipCommandServiceImpl {
    repositories: OrganizationRepositories,
}

impl PartnershipCommandServiceImpl {
    pub fn new(
        tenant_config_resolver: Arc<dyn TenantConfigResolverService>,
        repository_factory: Arc<dyn RepositoryFactoryService>,
    ) -> Self {
        Self {
            repositories: OrganizationRepositories::new(tenant_config_resolver, repository_factory),
        }
    }

    async fn load_typed(
        organizations: &dyn EntityRepository,
        tenant_id: &TenantId,
        organization_id: &RecordId,
        expected: OrganizationType,
    ) -> Result<Organization, OrganizationDomainError> {
        let organization =
            OrganizationRepositories::load_organization(organizations, tenant_id, organization_id)
                .await?;
        if organization.org_type() != expected {
            return Err(OrganizationDomainError::UnexpectedOrganizationType {
                id: organization_id.to_string(),
                expected,
                actual: organization.org_type(),
            });
        }

        Ok(organization)
    }
}

#[async_trait]
impl PartnershipCommandService for PartnershipCommandServiceImpl {
    async fn handle_create(
        &self,
        tenant_id: &TenantId,
        command: CreatePartnershipCommand,
    ) -> Result<Partnership, OrganizationDomainError> {
        let organizations = self
            .repositories
            .repository(tenant_id, EntityType::Organization)
            .await?;
        let school = Self::load_typed(
            organizations.as_ref(),
            tenant_id,
            command.school_org_id(),
            OrganizationType::School,
        )
        .await?;
        let bus_company = Self::load_typed(
            organizations.as_ref(),
            tenant_id,
            command.bus_company_org_id(),
            OrganizationType::BusCompany,
        )
        .await?;

        let school_org_id = school.id().to_string();
        let bus_company_org_id = bus_company.id().to_string();

        let partnerships = self
            .repositories
            .repository(tenant_id, EntityType::Partnership)
            .await?;
        let existing = partnerships
            .find_all(Some(
                RecordFilter::new()
                    .where_eq(SCHOOL_ORG_ID_FIELD, school_org_id.as_str())
                    .where_eq(BUS_COMPANY_ORG_ID_FIELD, bus_company_org_id.as_str()),
            ))
            .await?;
        if !existing.is_empty() {
            return Err(OrganizationDomainError::DuplicatePartnership {
                school_org_id,
                bus_company_org_id,
            });
        }

        let mut fields = FieldMap::new();
        fields.insert(
            SCHOOL_ORG_ID_FIELD.to_string(),
            Value::String(school_org_id),
        );
        fields.insert(
            BUS_COMPANY_ORG_ID_FIELD.to_string(),
            Value::String(bus_company_org_id),
        );
        fields.insert(
            STATUS_FIELD.to_string(),
            Value::String(PartnershipStatus::Active.as_str().to_string()),
        );

        let partnership = Partnership::from_record(partnerships.insert(fields).await?)?;
        info!(
            tenant_id = %tenant_id,
            partnership_id = %partnership.id(),
            "partnership created"
        );

        Ok(partnership)
    }
}
