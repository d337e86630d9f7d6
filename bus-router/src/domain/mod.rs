//! Domain types for the bus route finder.
//!
//! Stops and services are immutable value objects shared between paths
//! and itineraries. Identity is by stop code, or by service number and
//! direction, never by descriptive attributes.

mod error;
mod itinerary;
mod service;
mod stop;

pub use error::DomainError;
pub use itinerary::{Criterion, InvalidCriterion, Itinerary, Path};
pub use service::{RouteEntry, ServiceKey, serves_in_order, stops_after};
pub use stop::{Stop, StopCode};
