//! Caching layer over a repository.
//!
//! Stops and services are looked up by identifier many times during one
//! query: every hop of every candidate path asks for the services at its
//! endpoints and their stop sequences. This wrapper keeps the first result
//! of each lookup and hands out the same shared value afterwards, so a
//! given code is fetched from storage once.
//!
//! Failed lookups are not cached.

use std::sync::Arc;

use moka::sync::Cache as MokaCache;

use super::{Repository, RepositoryError};
use crate::domain::{RouteEntry, ServiceKey, Stop, StopCode};

type DistanceKey = (StopCode, ServiceKey);

/// Configuration for the repository cache.
#[derive(Debug, Clone)]
pub struct RepositoryCacheConfig {
    /// Maximum number of cached entries per lookup kind.
    pub max_capacity: u64,
}

impl Default for RepositoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 100_000,
        }
    }
}

/// Repository wrapper that caches every successful lookup by identifier.
pub struct CachedRepository<R> {
    inner: R,
    stops: MokaCache<StopCode, Arc<Stop>>,
    services_at: MokaCache<StopCode, Arc<[ServiceKey]>>,
    sequences: MokaCache<ServiceKey, Arc<[RouteEntry]>>,
    distances: MokaCache<DistanceKey, Arc<[f64]>>,
}

impl<R: Repository> CachedRepository<R> {
    /// Wrap a repository.
    pub fn new(inner: R, config: &RepositoryCacheConfig) -> Self {
        Self {
            inner,
            stops: MokaCache::new(config.max_capacity),
            services_at: MokaCache::new(config.max_capacity),
            sequences: MokaCache::new(config.max_capacity),
            distances: MokaCache::new(config.max_capacity),
        }
    }

    /// The wrapped repository.
    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: Repository> Repository for CachedRepository<R> {
    fn stop(&self, code: &StopCode) -> Result<Arc<Stop>, RepositoryError> {
        if let Some(stop) = self.stops.get(code) {
            return Ok(stop);
        }
        let stop = self.inner.stop(code)?;
        self.stops.insert(code.clone(), stop.clone());
        Ok(stop)
    }

    fn stop_codes(&self) -> Result<Vec<StopCode>, RepositoryError> {
        self.inner.stop_codes()
    }

    fn services_at(&self, code: &StopCode) -> Result<Arc<[ServiceKey]>, RepositoryError> {
        if let Some(services) = self.services_at.get(code) {
            return Ok(services);
        }
        let services = self.inner.services_at(code)?;
        self.services_at.insert(code.clone(), services.clone());
        Ok(services)
    }

    fn service_stops(&self, service: &ServiceKey) -> Result<Arc<[RouteEntry]>, RepositoryError> {
        if let Some(sequence) = self.sequences.get(service) {
            return Ok(sequence);
        }
        let sequence = self.inner.service_stops(service)?;
        self.sequences.insert(service.clone(), sequence.clone());
        Ok(sequence)
    }

    fn cumulative_distances(
        &self,
        code: &StopCode,
        service: &ServiceKey,
    ) -> Result<Arc<[f64]>, RepositoryError> {
        let key = (code.clone(), service.clone());
        if let Some(distances) = self.distances.get(&key) {
            return Ok(distances);
        }
        let distances = self.inner.cumulative_distances(code, service)?;
        self.distances.insert(key, distances.clone());
        Ok(distances)
    }
}
