use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::{
    shared::domain::model::{
        enums::user_role::UserRole, value_objects::actor_context::ActorContext,
    },
    tenancy::domain::model::{
        entities::entity_record::EntityRecord, value_objects::record_id::RecordId,
    },
    users::domain::model::enums::{
        approval_status::ApprovalStatus, user_domain_error::UserDomainError,
    },
};

pub const EMAIL_FIELD: &str = "email";
pub const DISPLAY_NAME_FIELD: &str = "displayName";
pub const ROLE_FIELD: &str = "role";
pub const APPROVAL_STATUS_FIELD: &str = "approvalStatus";
pub const ORGANIZATION_ID_FIELD: &str = "organizationId";
pub const ASSIGNED_SCHOOLS_FIELD: &str = "assignedSchools";
pub const ALLOWED_ORG_IDS_FIELD: &str = "allowedOrgIds";

#[derive(Clone, Debug, PartialEq)]
pub struct User {
    record: EntityRecord,
    role: UserRole,
    approval_status: ApprovalStatus,
}

impl User {
    pub fn from_record(record: EntityRecord) -> Result<Self, UserDomainError> {
        let role = record
            .get_str(ROLE_FIELD)
            .and_then(|value| value.parse::<UserRole>().ok())
            .ok_or_else(|| {
                UserDomainError::MalformedUser(format!("user {} has no valid role", record.id))
            })?;
        let approval_status = match record.get_str(APPROVAL_STATUS_FIELD) {
            Some(value) => value.parse::<ApprovalStatus>().map_err(|_| {
                UserDomainError::MalformedUser(format!(
                    "user {} has an unknown approval status",
                    record.id
                ))
            })?,
            None => ApprovalStatus::default(),
        };

        Ok(Self {
            record,
            role,
            approval_status,
        })
    }

    pub fn id(&self) -> &RecordId {
        &self.record.id
    }

    pub fn email(&self) -> &str {
        self.record.get_str(EMAIL_FIELD).unwrap_or_default()
    }

    pub fn display_name(&self) -> &str {
        self.record.get_str(DISPLAY_NAME_FIELD).unwrap_or_default()
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn approval_status(&self) -> ApprovalStatus {
        self.approval_status
    }

    pub fn is_approved(&self) -> bool {
        self.approval_status == ApprovalStatus::Approved
    }

    pub fn organization_id(&self) -> Option<&str> {
        self.record.get_str(ORGANIZATION_ID_FIELD)
    }

    pub fn assigned_schools(&self) -> Vec<String> {
        self.string_list(ASSIGNED_SCHOOLS_FIELD)
    }

    pub fn allowed_org_ids(&self) -> Vec<String> {
        self.string_list(ALLOWED_ORG_IDS_FIELD)
    }

    /// The identity this user acts with once signed in.
    pub fn to_actor_context(&self) -> ActorContext {
        ActorContext::new(
            self.id().to_string(),
            self.display_name(),
            self.email(),
            self.role,
        )
        .with_allowed_org_ids(self.allowed_org_ids())
    }

    pub fn record(&self) -> &EntityRecord {
        &self.record
    }

    fn string_list(&self, field: &str) -> Vec<String> {
        self.record
            .get(field)
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Serialize for User {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.record.serialize(serializer)
    }
}
