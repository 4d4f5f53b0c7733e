//! Per-call result type for external service lookups
//!
//! Remote lookups never raise for service failures; they report one of three
//! outcomes and the caller picks the user-facing fallback. This keeps the
//! degraded paths inspectable in logs and tests while the composed response
//! stays crash-free.

/// Outcome of a single external service call
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    /// The service answered and the payload decoded
    Success(T),
    /// The service could not be reached or answered with a failure status
    Unavailable,
    /// The service answered but the payload could not be decoded
    Malformed,
}

impl<T> FetchOutcome<T> {
    /// The payload, if the call succeeded
    pub fn success(self) -> Option<T> {
        match self {
            FetchOutcome::Success(value) => Some(value),
            _ => None,
        }
    }
}
