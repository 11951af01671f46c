use crate::tenancy::domain::model::enums::persistence_error::PersistenceError;

/// Translates a sqlx failure into the provider-independent taxonomy.
///
/// SQLSTATE classes 22 (data exception) and 23 (integrity constraint
/// violation) are caller errors; transport and pool failures are
/// connection errors.
pub fn map_sqlx_error(error: sqlx::Error) -> PersistenceError {
    match &error {
        sqlx::Error::Database(database_error) => match database_error.code() {
            Some(code) if code.starts_with("22") || code.starts_with("23") => {
                PersistenceError::Validation(database_error.message().to_string())
            }
            _ => PersistenceError::Storage(error.to_string()),
        },
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => PersistenceError::Connection(error.to_string()),
        _ => PersistenceError::Storage(error.to_string()),
    }
}
