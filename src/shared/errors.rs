use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("No available spots in lot {0}")]
    NoSpotAvailable(i32),

    #[error("Reservation {0} is not active")]
    NotActive(i32),

    #[error("Blocked: {0}")]
    Blocked(String),

    #[error("Failed to release reservation {0}")]
    ReleaseFailed(i32),

    #[error("Storage error: {0}")]
    Storage(String),
}
