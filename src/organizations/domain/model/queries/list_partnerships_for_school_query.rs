use crate::tenancy::domain::model::value_objects::record_id::RecordId;

#[derive(Clone, Debug)]
pub struct ListPartnershipsForSchoolQuery {
    school_org_id: RecordId,
}

impl ListPartnershipsForSchoolQuery {
    pub fn new(school_org_id: impl Into<RecordId>) -> Self {
        Self {
            school_org_id: school_org_id.into(),
        }
    }

    pub fn school_org_id(&self) -> &RecordId {
        &self.school_org_id
    }
}
