use std::fmt;

/// Failure reported by a customer repository.
///
/// The kind tells callers what went wrong at the store; the HTTP status a
/// failure maps to is decided per operation by the control layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No record with the given id
    NotFound(String),
    /// A record with the given id already exists
    Conflict(String),
    /// The store refused the record's contents
    ValidationFailed(String),
    /// The store could not be reached
    StoreUnavailable(String),
    /// Any other store failure, carrying the driver message
    Store(String),
}

impl RepositoryError {
    /// Short name of the failure kind, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            RepositoryError::NotFound(_) => "not_found",
            RepositoryError::Conflict(_) => "conflict",
            RepositoryError::ValidationFailed(_) => "validation_failed",
            RepositoryError::StoreUnavailable(_) => "store_unavailable",
            RepositoryError::Store(_) => "store",
        }
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::NotFound(id) => write!(f, "customer not found: {}", id),
            RepositoryError::Conflict(id) => write!(f, "customer already exists: {}", id),
            RepositoryError::ValidationFailed(msg) => write!(f, "invalid customer: {}", msg),
            RepositoryError::StoreUnavailable(msg) => write!(f, "store unavailable: {}", msg),
            RepositoryError::Store(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RepositoryError {}

/// Conversion from sqlx errors
#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound("record".to_string()),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                RepositoryError::StoreUnavailable(err.to_string())
            }
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                RepositoryError::Conflict(db.message().to_string())
            }
            sqlx::Error::Database(ref db) if db.is_check_violation() => {
                RepositoryError::ValidationFailed(db.message().to_string())
            }
            _ => RepositoryError::Store(err.to_string()),
        }
    }
}
