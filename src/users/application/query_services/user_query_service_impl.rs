use std::sync::Arc;

use async_trait::async_trait;

use crate::{
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
    users::domain::{
        model::{
            entities::user::{EMAIL_FIELD, User},
            enums::user_domain_error::UserDomainError,
            queries::find_user_by_email_query::FindUserByEmailQuery,
        },
        services::user_query_service::UserQueryService,
    },
};

pub struct UserQueryServiceImpl {
    tenant_config_resolver: Arc<dyn TenantConfigResolverService>,
    repository_factory: Arc<dyn RepositoryFactoryService>,
}

impl UserQueryServiceImpl {
    pub fn new(
        tenant_config_resolver: Arc<dyn TenantConfigResolverService>,
        repository_factory: Arc<dyn RepositoryFactoryService>,
    ) -> Self {
        Self {
            tenant_config_resolver,
            repository_factory,
        }
    }
}

#[async_trait]
impl UserQueryService for UserQueryServiceImpl {
    async fn handle_find_by_email(
        &self,
        tenant_id: &TenantId,
        query: FindUserByEmailQuery,
    ) -> Result<Option<User>, UserDomainError> {
        let tenant_config = self.tenant_config_resolver.resolve(tenant_id).await?;
        let records = self
            .repository_factory
            .get_repository(EntityType::User, &tenant_config)
            .await?
            .find_all(Some(RecordFilter::new().where_eq(EMAIL_FIELD, query.email())))
            .await?;

        records.into_iter().next().map(User::from_record).transpose()
    }
}
