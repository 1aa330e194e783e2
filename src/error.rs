//! Error types and handling
//!
//! One domain error enum covers every client-facing failure kind plus an
//! `Internal` catch-all for store and serialization faults. All validation
//! errors are raised before any record is mutated, and the engine never
//! retries on behalf of the caller.

use crate::types::{AccessId, FacilityId};
use thiserror::Error;

/// Errors surfaced by the parking engine and its surrounding registries
#[derive(Debug, Error)]
pub enum ParkingError {
    /// A referenced entity does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// The principal is not allowed to see or mutate the record
    #[error("{0}")]
    Forbidden(String),

    /// The request collides with existing data (overlap, duplicate key)
    #[error("{0}")]
    Conflict(String),

    /// The facility has no free spaces left
    #[error("facility {0} is at capacity")]
    CapacityExceeded(FacilityId),

    /// Exit was already registered for this access; the operation is never
    /// idempotent and the first result is never altered
    #[error("exit already registered for access {0}")]
    AlreadyClosed(AccessId),

    /// The input fails a structural check (empty plate, inverted window, …)
    #[error("invalid input: {0}")]
    Validation(String),

    /// Store or serialization failure; callers must retry the whole operation
    #[error("internal error: {0}")]
    Internal(String),
}

impl ParkingError {
    /// Create a not-found error naming the missing entity
    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound(entity.into())
    }

    /// Create a forbidden error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable client-facing code for this error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ParkingError::NotFound(_) => "not_found",
            ParkingError::Forbidden(_) => "forbidden",
            ParkingError::Conflict(_) => "conflict",
            ParkingError::CapacityExceeded(_) => "capacity_exceeded",
            ParkingError::AlreadyClosed(_) => "already_closed",
            ParkingError::Validation(_) => "validation",
            ParkingError::Internal(_) => "internal",
        }
    }

    /// Whether the error is the caller's fault rather than a server fault
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ParkingError::Internal(_))
    }
}

impl From<std::io::Error> for ParkingError {
    fn from(error: std::io::Error) -> Self {
        ParkingError::Internal(error.to_string())
    }
}

impl From<serde_json::Error> for ParkingError {
    fn from(error: serde_json::Error) -> Self {
        ParkingError::Internal(error.to_string())
    }
}

impl From<anyhow::Error> for ParkingError {
    fn from(error: anyhow::Error) -> Self {
        ParkingError::Internal(error.to_string())
    }
}

/// Result type for parking operations
pub type ParkingResult<T> = Result<T, ParkingError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_messages_name_the_entity() {
        let err = ParkingError::not_found("facility");
        assert_eq!(err.to_string(), "facility not found");

        let err = ParkingError::conflict("time conflict with event 'Rock Night'");
        assert!(err.to_string().contains("Rock Night"));
    }

    #[test]
    fn test_capacity_message_names_facility() {
        let id = FacilityId::new();
        let err = ParkingError::CapacityExceeded(id);
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn test_kind_codes_are_stable() {
        assert_eq!(ParkingError::not_found("x").kind(), "not_found");
        assert_eq!(ParkingError::forbidden("x").kind(), "forbidden");
        assert_eq!(ParkingError::conflict("x").kind(), "conflict");
        assert_eq!(ParkingError::AlreadyClosed(AccessId::new()).kind(), "already_closed");
        assert_eq!(ParkingError::validation("x").kind(), "validation");
        assert_eq!(ParkingError::internal("x").kind(), "internal");
    }

    #[test]
    fn test_client_error_split() {
        assert!(ParkingError::CapacityExceeded(FacilityId::new()).is_client_error());
        assert!(ParkingError::forbidden("nope").is_client_error());
        assert!(!ParkingError::internal("disk on fire").is_client_error());
    }

    #[test]
    fn test_io_errors_map_to_internal() {
        let io_error = io::Error::new(io::ErrorKind::Other, "boom");
        let err: ParkingError = io_error.into();
        assert!(matches!(err, ParkingError::Internal(_)));
    }
}
