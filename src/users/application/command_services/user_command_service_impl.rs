use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::{
    shared::domain::model::{
        enums::user_role::UserRole, value_objects::actor_context::ActorContext,
    },
    tenancy::{
        domain::{
            model::{
                entities::{entity_record::FieldMap, record_filter::RecordFilter},
                enums::{entity_type::EntityType, persistence_error::PersistenceError},
                value_objects::tenant_id::TenantId,
            },
            services::{
                repository_factory_service::RepositoryFactoryService,
                tenant_config_resolver_service::TenantConfigResolverService,
            },
        },
        infrastructure::persistence::repositories::entity_repository::EntityRepository,
    },
    users::domain::{
        model::{
            commands::{
                approve_user_command::ApproveUserCommand,
                register_user_command::RegisterUserCommand,
            },
            entities::user::{
                ALLOWED_ORG_IDS_FIELD, APPROVAL_STATUS_FIELD, ASSIGNED_SCHOOLS_FIELD,
                DISPLAY_NAME_FIELD, EMAIL_FIELD, ORGANIZATION_ID_FIELD, ROLE_FIELD, User,
            },
            enums::{approval_status::ApprovalStatus, user_domain_error::UserDomainError},
        },
        services::user_command_service::UserCommandService,
    },
};

pub struct UserCommandServiceImpl {
    tenant_config_resolver: Arc<dyn TenantConfigResolverService>,
    repository_factory: Arc<dyn RepositoryFactoryService>,
}

impl UserCommandServiceImpl {
    pub fn new(
        tenant_config_resolver: Arc<dyn TenantConfigResolverService>,
        repository_factory: Arc<dyn RepositoryFactoryService>,
    ) -> Self {
        Self {
            tenant_config_resolver,
            repository_factory,
        }
    }

    async fn user_repository(
        &self,
        tenant_id: &TenantId,
    ) -> Result<Arc<dyn EntityRepository>, UserDomainError> {
        let tenant_config = self.tenant_config_resolver.resolve(tenant_id).await?;
        Ok(self
            .repository_factory
            .get_repository(EntityType::User, &tenant_config)
            .await?)
    }

    async fn registered_with(
        repository: &dyn EntityRepository,
        email: &str,
    ) -> Result<bool, PersistenceError> {
        let existing = repository
            .find_all(Some(RecordFilter::new().where_eq(EMAIL_FIELD, email)))
            .await?;
        Ok(!existing.is_empty())
    }

    fn string_array(values: &[String]) -> Value {
        Value::Array(values.iter().cloned().map(Value::String).collect())
    }
}

#[async_trait]
impl UserCommandService for UserCommandServiceImpl {
    async fn handle_register(
        &self,
        tenant_id: &TenantId,
        command: RegisterUserCommand,
    ) -> Result<User, UserDomainError> {
        let repository = self.user_repository(tenant_id).await?;

        if Self::registered_with(repository.as_ref(), command.email()).await? {
            return Err(UserDomainError::EmailAlreadyRegistered(
                command.email().to_string(),
            ));
        }

        let mut fields = FieldMap::new();
        fields.insert(
            EMAIL_FIELD.to_string(),
            Value::String(command.email().to_string()),
        );
        fields.insert(
            DISPLAY_NAME_FIELD.to_string(),
            Value::String(command.display_name().to_string()),
        );
        fields.insert(
            ROLE_FIELD.to_string(),
            Value::String(command.role().as_str().to_string()),
        );
        fields.insert(
            APPROVAL_STATUS_FIELD.to_string(),
            Value::String(ApprovalStatus::Pending.as_str().to_string()),
        );
        if let Some(organization_id) = command.organization_id() {
            fields.insert(
                ORGANIZATION_ID_FIELD.to_string(),
                Value::String(organization_id.to_string()),
            );
        }
        fields.insert(
            ASSIGNED_SCHOOLS_FIELD.to_string(),
            Self::string_array(command.assigned_schools()),
        );
        fields.insert(
            ALLOWED_ORG_IDS_FIELD.to_string(),
            Self::string_array(command.allowed_org_ids()),
        );

        // A concurrent registration can pass the check above and then trip
        // the store's unique email constraint.
        let record = match repository.insert(fields).await {
            Ok(record) => record,
            Err(error @ PersistenceError::Validation(_)) => {
                return match Self::registered_with(repository.as_ref(), command.email()).await {
                    Ok(true) => Err(UserDomainError::EmailAlreadyRegistered(
                        command.email().to_string(),
                    )),
                    _ => Err(error.into()),
                };
            }
            Err(error) => return Err(error.into()),
        };
        let user = User::from_record(record)?;
        info!(tenant_id = %tenant_id, user_id = %user.id(), role = %user.role(), "user registered");

        Ok(user)
    }

    async fn handle_approve(
        &self,
        tenant_id: &TenantId,
        actor: &ActorContext,
        command: ApproveUserCommand,
    ) -> Result<User, UserDomainError> {
        if !actor.has_role(&[UserRole::Admin]) {
            return Err(UserDomainError::ActionNotPermitted {
                role: actor.role(),
                action: "approve users".to_string(),
            });
        }

        let repository = self.user_repository(tenant_id).await?;
        let user = match repository.find_by_id(command.user_id()).await {
            Ok(record) => User::from_record(record)?,
            Err(error) if error.is_not_found() => {
                return Err(UserDomainError::UserNotFound(command.user_id().to_string()));
            }
            Err(error) => return Err(error.into()),
        };
        if user.is_approved() {
            return Ok(user);
        }

        let mut patch = FieldMap::new();
        patch.insert(
            APPROVAL_STATUS_FIELD.to_string(),
            Value::String(ApprovalStatus::Approved.as_str().to_string()),
        );

        let approved = User::from_record(repository.update(command.user_id(), patch).await?)?;
        info!(
            tenant_id = %tenant_id,
            user_id = %approved.id(),
            approved_by = actor.user_id(),
            "user approved"
        );

        Ok(approved)
    }
}
