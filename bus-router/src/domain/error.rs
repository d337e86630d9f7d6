//! Domain error types.
//!
//! These errors represent construction failures for domain values.
//! They are distinct from storage and query errors.

use super::StopCode;

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A path needs an origin and a destination
    #[error("path must have at least 2 stops, got {0}")]
    PathTooShort(usize),

    /// A path visits each stop at most once
    #[error("path visits stop {0} more than once")]
    RepeatedStop(StopCode),

    /// An itinerary needs exactly one service per hop
    #[error("itinerary has {services} services for {hops} hops")]
    HopCountMismatch { services: usize, hops: usize },
}
