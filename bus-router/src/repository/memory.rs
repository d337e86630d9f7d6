//! In-memory repository built from stop and route rows.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::{Repository, RepositoryError};
use crate::domain::{RouteEntry, ServiceKey, Stop, StopCode};

/// One row of the stops table.
#[derive(Debug, Clone, PartialEq)]
pub struct StopRecord {
    pub code: String,
    pub road_name: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl StopRecord {
    /// A stop row with only a code.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            road_name: None,
            description: None,
            latitude: None,
            longitude: None,
        }
    }
}

/// One row of the routes table: a service calling at a stop.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord {
    pub service_no: String,
    pub direction: u8,
    pub stop_sequence: u32,
    pub stop_code: String,
    /// Cumulative distance along the service at this call, if published.
    pub distance: Option<f64>,
}

impl RouteRecord {
    /// A row with a known distance.
    pub fn new(
        service_no: impl Into<String>,
        direction: u8,
        stop_sequence: u32,
        stop_code: impl Into<String>,
        distance: f64,
    ) -> Self {
        Self {
            service_no: service_no.into(),
            direction,
            stop_sequence,
            stop_code: stop_code.into(),
            distance: Some(distance),
        }
    }
}

type DistanceKey = (StopCode, ServiceKey);

/// Repository holding all stop and route data in memory.
///
/// Route rows naming a code that is not in the stops table become
/// [`RouteEntry::Placeholder`] entries in the service's sequence. Rows
/// without a distance still call at their stop but add nothing to its
/// distance table.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    stops: HashMap<StopCode, Arc<Stop>>,
    stop_order: Vec<StopCode>,
    services_at: HashMap<StopCode, Arc<[ServiceKey]>>,
    sequences: HashMap<ServiceKey, Arc<[RouteEntry]>>,
    distances: HashMap<DistanceKey, Arc<[f64]>>,
}

impl MemoryRepository {
    /// Build the repository from table rows.
    ///
    /// Stops keep their row order; a repeated stop code keeps its first row.
    /// Services at a stop are listed in first-seen row order.
    pub fn new(stop_rows: Vec<StopRecord>, route_rows: Vec<RouteRecord>) -> Self {
        let mut stops = HashMap::with_capacity(stop_rows.len());
        let mut stop_order = Vec::with_capacity(stop_rows.len());
        for row in stop_rows {
            let code = StopCode::new(row.code);
            if stops.contains_key(&code) {
                continue;
            }
            let stop = Stop {
                code: code.clone(),
                road_name: row.road_name,
                description: row.description,
                latitude: row.latitude,
                longitude: row.longitude,
            };
            stops.insert(code.clone(), Arc::new(stop));
            stop_order.push(code);
        }

        let mut services_at: HashMap<StopCode, Vec<ServiceKey>> = HashMap::new();
        let mut rows_by_service: HashMap<ServiceKey, Vec<RouteRecord>> = HashMap::new();
        for row in route_rows {
            let key = ServiceKey::new(row.service_no.as_str(), row.direction);
            if let Some((code, _)) = stops.get_key_value(row.stop_code.as_str()) {
                let at = services_at.entry(code.clone()).or_default();
                if !at.contains(&key) {
                    at.push(key.clone());
                }
            }
            rows_by_service.entry(key).or_default().push(row);
        }

        let mut sequences = HashMap::with_capacity(rows_by_service.len());
        let mut distances: HashMap<DistanceKey, Vec<f64>> = HashMap::new();
        for (key, mut rows) in rows_by_service {
            rows.sort_by_key(|row| row.stop_sequence);
            let mut sequence = Vec::with_capacity(rows.len());
            for row in rows {
                match stops.get_key_value(row.stop_code.as_str()) {
                    Some((code, _)) => {
                        distances
                            .entry((code.clone(), key.clone()))
                            .or_default()
                            .extend(row.distance);
                        sequence.push(RouteEntry::Stop(code.clone()));
                    }
                    None => sequence.push(RouteEntry::Placeholder),
                }
            }
            sequences.insert(key, sequence.into());
        }

        debug!(
            stops = stop_order.len(),
            services = sequences.len(),
            "Built in-memory repository"
        );

        Self {
            stops,
            stop_order,
            services_at: services_at
                .into_iter()
                .map(|(code, keys)| (code, keys.into()))
                .collect(),
            sequences,
            distances: distances
                .into_iter()
                .map(|(key, values)| (key, values.into()))
                .collect(),
        }
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stop_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stop_order.is_empty()
    }

    /// Number of distinct services.
    pub fn service_count(&self) -> usize {
        self.sequences.len()
    }
}

impl Repository for MemoryRepository {
    fn stop(&self, code: &StopCode) -> Result<Arc<Stop>, RepositoryError> {
        self.stops
            .get(code)
            .cloned()
            .ok_or_else(|| RepositoryError::StopNotFound(code.clone()))
    }

    fn stop_codes(&self) -> Result<Vec<StopCode>, RepositoryError> {
        Ok(self.stop_order.clone())
    }

    fn services_at(&self, code: &StopCode) -> Result<Arc<[ServiceKey]>, RepositoryError> {
        Ok(self
            .services_at
            .get(code)
            .cloned()
            .unwrap_or_else(|| Arc::from(Vec::new())))
    }

    fn service_stops(&self, service: &ServiceKey) -> Result<Arc<[RouteEntry]>, RepositoryError> {
        self.sequences
            .get(service)
            .cloned()
            .ok_or_else(|| RepositoryError::ServiceNotFound(service.clone()))
    }

    fn cumulative_distances(
        &self,
        code: &StopCode,
        service: &ServiceKey,
    ) -> Result<Arc<[f64]>, RepositoryError> {
        Ok(self
            .distances
            .get(&(code.clone(), service.clone()))
            .cloned()
            .unwrap_or_else(|| Arc::from(Vec::new())))
    }
}
