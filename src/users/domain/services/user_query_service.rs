use async_trait::async_trait;

use crate::{
    tenancy::domain::model::value_objects::tenant_id::TenantId,
    users::domain::model::{
        entities::user::User, enums::user_domain_error::UserDomainError,
        queries::find_user_by_email_query::FindUserByEmailQuery,
    },
};

#[async_trait]
pub trait UserQueryService: Send + Sync {
    async fn handle_find_by_email(
        &self,
        tenant_id: &TenantId,
        query: FindUserByEmailQuery,
    ) -> Result<Option<User>, UserDomainError>;
}
