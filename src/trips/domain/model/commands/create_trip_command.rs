use chrono::{DateTime, Utc};
use validator::Validate;

use crate::trips::domain::model::enums::trip_domain_error::TripDomainError;

pub struct CreateTripCommandParts {
    pub destination: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub return_at: Option<DateTime<Utc>>,
    pub passenger_count: Option<u32>,
    pub organization_id: Option<String>,
    pub bus_company_org_id: Option<String>,
}

#[derive(Clone, Debug, Validate)]
pub struct CreateTripCommand {
    #[validate(length(min = 1, max = 200))]
    destination: String,
    scheduled_at: Option<DateTime<Utc>>,
    return_at: Option<DateTime<Utc>>,
    #[validate(range(min = 1, max = 1000))]
    passenger_count: Option<u32>,
    #[validate(length(min = 1, max = 128))]
    organization_id: Option<String>,
    #[validate(length(min = 1, max = 128))]
    bus_company_org_id: Option<String>,
}

impl CreateTripCommand {
    pub fn new(parts: CreateTripCommandParts) -> Result<Self, TripDomainError> {
        let command = Self {
            destination: parts.destination.trim().to_string(),
            scheduled_at: parts.scheduled_at,
            return_at: parts.return_at,
            passenger_count: parts.passenger_count,
            organization_id: parts.organization_id,
            bus_company_org_id: parts.bus_company_org_id,
        };

        command
            .validate()
            .map_err(|e| TripDomainError::InvalidCommand(e.to_string()))?;

        if let (Some(scheduled_at), Some(return_at)) = (command.scheduled_at, command.return_at) {
            if return_at < scheduled_at {
                return Err(TripDomainError::InvalidCommand(
                    "returnAt must not precede scheduledAt".to_string(),
                ));
            }
        }

        Ok(command)
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn scheduled_at(&self) -> Option<DateTime<Utc>> {
        self.scheduled_at
    }

    pub fn return_at(&self) -> Option<DateTime<Utc>> {
        self.return_at
    }

    pub fn passenger_count(&self) -> Option<u32> {
        self.passenger_count
    }

    pub fn organization_id(&self) -> Option<&str> {
        self.organization_id.as_deref()
    }

    pub fn bus_company_org_id(&self) -> Option<&str> {
        self.bus_company_org_id.as_deref()
    }
}
