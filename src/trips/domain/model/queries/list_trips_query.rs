use crate::trips::domain::model::enums::trip_status::TripStatus;

/// Top-level trips, optionally narrowed by status and organization.
#[derive(Clone, Debug, Default)]
pub struct ListTripsQuery {
    status: Option<TripStatus>,
    organization_id: Option<String>,
    include_sub_trips: bool,
}

impl ListTripsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: TripStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_organization(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    pub fn including_sub_trips(mut self) -> Self {
        self.include_sub_trips = true;
        self
    }

    pub fn status(&self) -> Option<TripStatus> {
        self.status
    }

    pub fn organization_id(&self) -> Option<&str> {
        self.organization_id.as_deref()
    }

    pub fn include_sub_trips(&self) -> bool {
        self.include_sub_trips
    }
}
