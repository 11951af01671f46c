use std::fmt;

use regex::Regex;

use crate::tenancy::domain::model::enums::persistence_error::PersistenceError;

lazy_static::lazy_static! {
    static ref TENANT_ID_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]{0,127}$").expect("valid regex");
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TenantId(String);

impl TenantId {
    pub fn new(value: String) -> Result<Self, PersistenceError> {
        let trimmed = value.trim();
        if !TENANT_ID_REGEX.is_match(trimmed) {
            return Err(PersistenceError::InvalidTenantId);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
