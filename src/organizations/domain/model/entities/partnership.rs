use serde::{Serialize, Serializer};

use crate::{
    organizations::domain::model::enums::{
        organization_domain_error::OrganizationDomainError,
        partnership_status::PartnershipStatus,
    },
    tenancy::domain::model::{
        entities::entity_record::EntityRecord, value_objects::record_id::RecordId,
    },
};

pub const SCHOOL_ORG_ID_FIELD: &str = "schoolOrgId";
pub const BUS_COMPANY_ORG_ID_FIELD: &str = "busCompanyOrgId";
pub const STATUS_FIELD: &str = "status";

/// A school working with a bus company.
#[derive(Clone, Debug, PartialEq)]
pub struct Partnership {
    record: EntityRecord,
    status: PartnershipStatus,
}

impl Partnership {
    pub fn from_record(record: EntityRecord) -> Result<Self, OrganizationDomainError> {
        let status = match record.get_str(STATUS_FIELD) {
            Some(value) => value.parse::<PartnershipStatus>().map_err(|_| {
                OrganizationDomainError::MalformedRecord(format!(
                    "partnership {} has an unknown status",
                    record.id
                ))
            })?,
            None => PartnershipStatus::default(),
        };

        Ok(Self { record, status })
    }

    pub fn id(&self) -> &RecordId {
        &self.record.id
    }

    pub fn school_org_id(&self) -> Option<&str> {
        self.record.get_str(SCHOOL_ORG_ID_FIELD)
    }

    pub fn bus_company_org_id(&self) -> Option<&str> {
        self.record.get_str(BUS_COMPANY_ORG_ID_FIELD)
    }

    pub fn status(&self) -> PartnershipStatus {
        self.status
    }

    pub fn record(&self) -> &EntityRecord {
        &self.record
    }
}

impl Serialize for Partnership {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.record.serialize(serializer)
    }
}
