use async_trait::async_trait;

use crate::{
    shared::domain::model::value_objects::actor_context::ActorContext,
    tenancy::domain::model::value_objects::tenant_id::TenantId,
    users::domain::model::{
        commands::{
            approve_user_command::ApproveUserCommand, register_user_command::RegisterUserCommand,
        },
        entities::user::User,
        enums::user_domain_error::UserDomainError,
    },
};

#[async_trait]
pub trait UserCommandService: Send + Sync {
    /// New users start `pending`. Emails are unique per tenant.
    async fn handle_register(
        &self,
        tenant_id: &TenantId,
        command: RegisterUserCommand,
    ) -> Result<User, UserDomainError>;

    /// Admins only. Approving an approved user changes nothing.
    async fn handle_approve(
        &self,
        tenant_id: &TenantId,
        actor: &ActorContext,
        command: ApproveUserCommand,
    ) -> Result<User, UserDomainError>;
}
