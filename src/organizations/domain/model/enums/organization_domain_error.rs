use thiserror::Error;

use crate::{
    organizations::domain::model::enums::organization_type::OrganizationType,
    tenancy::domain::model::enums::persistence_error::PersistenceError,
};

#[derive(Debug, Error)]
pub enum OrganizationDomainError {
    #[error("invalid organization command: {0}")]
    InvalidCommand(String),

    #[error("organization not found: {0}")]
    OrganizationNotFound(String),

    #[error("a {0} organization cannot have a parent")]
    ParentNotAllowed(OrganizationType),

    #[error("parent organization {id} is a {actual}, expected parent_group")]
    InvalidParentType { id: String, actual: OrganizationType },

    #[error("organization {id} is a {actual}, expected {expected}")]
    UnexpectedOrganizationType {
        id: String,
        expected: OrganizationType,
        actual: OrganizationType,
    },

    #[error("partnership between school {school_org_id} and bus company {bus_company_org_id} already exists")]
    DuplicatePartnership {
        school_org_id: String,
        bus_company_org_id: String,
    },

    #[error("stored record is malformed: {0}")]
    MalformedRecord(String),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
