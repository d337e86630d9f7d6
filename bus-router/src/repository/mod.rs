//! Read access to stops and the services that call at them.
//!
//! The [`Repository`] trait is the boundary to storage. Everything above it
//! (graph construction, search, ranking) only ever reads through it, which
//! keeps the core testable with in-memory data.

mod cached;
mod error;
pub mod feed;
mod memory;

use std::sync::Arc;

use crate::domain::{RouteEntry, ServiceKey, Stop, StopCode, serves_in_order, stops_after};

pub use cached::{CachedRepository, RepositoryCacheConfig};
pub use error::RepositoryError;
pub use memory::{MemoryRepository, RouteRecord, StopRecord};

/// Read-only source of stop and service data.
///
/// Lookups are synchronous and may block on storage.
pub trait Repository {
    /// Look up a stop by code.
    ///
    /// Returns [`RepositoryError::StopNotFound`] for unknown codes.
    fn stop(&self, code: &StopCode) -> Result<Arc<Stop>, RepositoryError>;

    /// Every stop code known to the repository.
    fn stop_codes(&self) -> Result<Vec<StopCode>, RepositoryError>;

    /// Distinct services calling at a stop. Unknown stops have none.
    fn services_at(&self, code: &StopCode) -> Result<Arc<[ServiceKey]>, RepositoryError>;

    /// A service's stops in calling order.
    fn service_stops(&self, service: &ServiceKey) -> Result<Arc<[RouteEntry]>, RepositoryError>;

    /// Cumulative distance of the service at each call at `code`, in calling
    /// order. Empty if the service does not call there.
    fn cumulative_distances(
        &self,
        code: &StopCode,
        service: &ServiceKey,
    ) -> Result<Arc<[f64]>, RepositoryError>;

    /// Stops reachable from `code` without changing service.
    ///
    /// One entry per (service, call at `code`, later stop); duplicates are
    /// kept and placeholder entries skipped.
    fn direct_connections(&self, code: &StopCode) -> Result<Vec<StopCode>, RepositoryError> {
        let mut connections = Vec::new();
        for service in self.services_at(code)?.iter() {
            let sequence = self.service_stops(service)?;
            connections.extend(stops_after(&sequence, code).cloned());
        }
        Ok(connections)
    }

    /// Services calling at `from` and then later at `to`.
    fn services_between(
        &self,
        from: &StopCode,
        to: &StopCode,
    ) -> Result<Vec<ServiceKey>, RepositoryError> {
        let mut services = Vec::new();
        for service in self.services_at(from)?.iter() {
            if serves_in_order(&self.service_stops(service)?, from, to) {
                services.push(service.clone());
            }
        }
        Ok(services)
    }
}
