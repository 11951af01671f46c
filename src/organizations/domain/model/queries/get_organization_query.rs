use crate::tenancy::domain::model::value_objects::record_id::RecordId;

#[derive(Clone, Debug)]
pub struct GetOrganizationQuery {
    organization_id: RecordId,
}

impl GetOrganizationQuery {
    pub fn new(organization_id: impl Into<RecordId>) -> Self {
        Self {
            organization_id: organization_id.into(),
        }
    }

    pub fn organization_id(&self) -> &RecordId {
        &self.organization_id
    }
}
