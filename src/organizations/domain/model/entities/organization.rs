use serde::{Serialize, Serializer};

use crate::{
    organizations::domain::model::enums::{
        organization_domain_error::OrganizationDomainError, organization_type::OrganizationType,
    },
    tenancy::domain::model::{
        entities::entity_record::EntityRecord, value_objects::record_id::RecordId,
    },
};

pub const ORG_TYPE_FIELD: &str = "type";
pub const PARENT_ORG_ID_FIELD: &str = "parentOrgId";
pub const NAME_FIELD: &str = "name";
pub const SHORT_CODE_FIELD: &str = "shortCode";

#[derive(Clone, Debug, PartialEq)]
pub struct Organization {
    record: EntityRecord,
    org_type: OrganizationType,
}

impl Organization {
    pub fn from_record(record: EntityRecord) -> Result<Self, OrganizationDomainError> {
        let org_type = record
            .get_str(ORG_TYPE_FIELD)
            .and_then(|value| value.parse::<OrganizationType>().ok())
            .ok_or_else(|| {
                OrganizationDomainError::MalformedRecord(format!(
                    "organization {} has no valid type",
                    record.id
                ))
            })?;

        Ok(Self { record, org_type })
    }

    pub fn id(&self) -> &RecordId {
        &self.record.id
    }

    pub fn org_type(&self) -> OrganizationType {
        self.org_type
    }

    pub fn parent_org_id(&self) -> Option<&str> {
        self.record.get_str(PARENT_ORG_ID_FIELD)
    }

    pub fn name(&self) -> Option<&str> {
        self.record.get_str(NAME_FIELD)
    }

    pub fn short_code(&self) -> Option<&str> {
        self.record.get_str(SHORT_CODE_FIELD)
    }

    pub fn record(&self) -> &EntityRecord {
        &self.record
    }
}

impl Serialize for Organization {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.record.serialize(serializer)
    }
}
