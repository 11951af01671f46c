use std::fmt;

use crate::tenancy::domain::model::enums::persistence_error::PersistenceError;

/// Storage technology backing a tenant.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ProviderType {
    /// Schema-less document store.
    SurrealDb,
    /// Document-oriented NoSQL store.
    MongoDb,
    /// Relational store with a fixed schema per entity.
    Postgres,
}

impl ProviderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SurrealDb => "surrealdb",
            Self::MongoDb => "mongodb",
            Self::Postgres => "postgres",
        }
    }

    pub fn parse(value: &str) -> Result<Self, PersistenceError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "surrealdb" | "surreal" => Ok(Self::SurrealDb),
            "mongodb" | "mongo" => Ok(Self::MongoDb),
            "postgres" | "postgresql" | "relational" => Ok(Self::Postgres),
            other => Err(PersistenceError::UnsupportedProviderType(format!(
                "unknown provider '{other}'"
            ))),
        }
    }

    pub fn all() -> &'static [Self] {
        const VALUES: [ProviderType; 3] = [
            ProviderType::SurrealDb,
            ProviderType::MongoDb,
            ProviderType::Postgres,
        ];
        &VALUES
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
