use crate::organizations::domain::model::enums::organization_type::OrganizationType;

#[derive(Clone, Debug, Default)]
pub struct ListOrganizationsQuery {
    org_type: Option<OrganizationType>,
    parent_org_id: Option<String>,
}

impl ListOrganizationsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, org_type: OrganizationType) -> Self {
        self.org_type = Some(org_type);
        self
    }

    pub fn with_parent(mut self, parent_org_id: impl Into<String>) -> Self {
        self.parent_org_id = Some(parent_org_id.into());
        self
    }

    pub fn org_type(&self) -> Option<OrganizationType> {
        self.org_type
    }

    pub fn parent_org_id(&self) -> Option<&str> {
        self.parent_org_id.as_deref()
    }
}
