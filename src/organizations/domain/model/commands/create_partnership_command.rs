use crate::{
    organizations::domain::model::enums::organization_domain_error::OrganizationDomainError,
    tenancy::domain::model::value_objects::record_id::RecordId,
};

#[derive(Clone, Debug)]
pub struct CreatePartnershipCommand {
    school_org_id: RecordId,
    bus_company_org_id: RecordId,
}

impl CreatePartnershipCommand {
    pub fn new(
        school_org_id: impl Into<RecordId>,
        bus_company_org_id: impl Into<RecordId>,
    ) -> Result<Self, OrganizationDomainError> {
        let school_org_id = school_org_id.into();
        let bus_company_org_id = bus_company_org_id.into();
        if school_org_id == bus_company_org_id {
            return Err(OrganizationDomainError::InvalidCommand(
                "an organization cannot partner with itself".to_string(),
            ));
        }

        Ok(Self {
            school_org_id,
            bus_company_org_id,
        })
    }

    pub fn school_org_id(&self) -> &RecordId {
        &self.school_org_id
    }

    pub fn bus_company_org_id(&self) -> &RecordId {
        &self.bus_company_org_id
    }
}
