use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::{
    organizations::{
        application::organization_repositories::OrganizationRepositories,
        domain::{
            model::{
                commands::upsert_settings_command::UpsertSettingsCommand,
                entities::organization_settings::{
                    ORGANIZATION_ID_FIELD, OrganizationSettings, VALUES_FIELD,
                },
                enums::organization_domain_error::OrganizationDomainError,
            },
            services::settings_command_service::SettingsCommandService,
        },
    },
    tenancy::domain::{
        model::{
            entities::{entity_record::FieldMap, record_filter::RecordFilter},
            enums::entity_type::EntityType,
            value_objects::tenant_id::TenantId,
        },
        services::{
            repository_factory_service::RepositoryFactoryService,
            tenant_config_resolver_service::TenantConfigResolverService,
        },
    },
};

pub struct SettingsCommandServiceImpl {
    repositories: OrganizationRepositories,
}

impl SettingsCommandServiceImpl {
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
impl SettingsCommandService for SettingsCommandServiceImpl {
    async fn handle_upsert(
        &self,
        tenant_id: &TenantId,
        command: UpsertSettingsCommand,
    ) -> Result<OrganizationSettings, OrganizationDomainError> {
        let organizations = self
            .repositories
            .repository(tenant_id, EntityType::Organization)
            .await?;
        let organization = OrganizationRepositories::load_organization(
            organizations.as_ref(),
            tenant_id,
            command.organization_id(),
        )
        .await?;
        let organization_id = organization.id().to_string();

        let settings = self
            .repositories
            .repository(tenant_id, EntityType::Settings)
            .await?;
        let existing = settings
            .find_all(Some(
                RecordFilter::new().where_eq(ORGANIZATION_ID_FIELD, organization_id.as_str()),
            ))
            .await?;

        let mut fields = FieldMap::new();
        fields.insert(
            VALUES_FIELD.to_string(),
            Value::Object(command.values().clone()),
        );

        let record = match existing.into_iter().next() {
            Some(current) => {
                debug!(tenant_id = %tenant_id, organization_id = %organization_id, "updating settings");
                settings.update(&current.id, fields).await?
            }
            None => {
                debug!(tenant_id = %tenant_id, organization_id = %organization_id, "inserting settings");
                fields.insert(
                    ORGANIZATION_ID_FIELD.to_string(),
                    Value::String(organization_id),
                );
                settings.insert(fields).await?
            }
        };

        Ok(OrganizationSettings::from_record(record))
    }
}
