use sea_orm::DbErr;

/// Failure taxonomy shared by every service operation.
///
/// The message of each domain variant is safe to show to the caller;
/// `Internal` is logged and never surfaced verbatim.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Role or ownership violation.
    #[error("{0}")]
    Forbidden(String),

    /// Missing resource, or one the caller may not see.
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    /// The resource is in a state that forbids the operation.
    #[error("{0}")]
    Conflict(String),

    /// The caller could not be resolved to a known user.
    #[error("{0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    Internal(DbErr),
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        match err {
            // A row vanished between the read and the write.
            DbErr::RecordNotFound(msg) => ServiceError::NotFound(msg),
            other => ServiceError::Internal(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
