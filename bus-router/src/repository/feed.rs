//! Loader for the source feed's JSON exports.
//!
//! The feed publishes two arrays: bus stops and bus route rows, with
//! PascalCase field names. Files are expected as `bus_stops.json` and
//! `bus_routes.json` in one directory.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::{MemoryRepository, RepositoryError, RouteRecord, StopRecord};

/// File name of the stops export.
pub const STOPS_FILE: &str = "bus_stops.json";

/// File name of the route rows export.
pub const ROUTES_FILE: &str = "bus_routes.json";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FeedStop {
    bus_stop_code: String,
    road_name: Option<String>,
    description: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FeedRoute {
    service_no: String,
    direction: u8,
    stop_sequence: u32,
    bus_stop_code: String,
    distance: Option<f64>,
}

impl From<FeedStop> for StopRecord {
    fn from(stop: FeedStop) -> Self {
        StopRecord {
            code: stop.bus_stop_code,
            road_name: stop.road_name,
            description: stop.description,
            latitude: stop.latitude,
            longitude: stop.longitude,
        }
    }
}

impl From<FeedRoute> for RouteRecord {
    fn from(route: FeedRoute) -> Self {
        RouteRecord {
            service_no: route.service_no,
            direction: route.direction,
            stop_sequence: route.stop_sequence,
            stop_code: route.bus_stop_code,
            distance: route.distance,
        }
    }
}

/// Parse a stops export.
pub fn parse_stops(json: &str) -> Result<Vec<StopRecord>, serde_json::Error> {
    let stops: Vec<FeedStop> = serde_json::from_str(json)?;
    Ok(stops.into_iter().map(StopRecord::from).collect())
}

/// Parse a route rows export.
///
/// A null `Distance` stays unknown rather than reading as 0, so pricing a
/// hop that needs it fails instead of undercounting.
pub fn parse_routes(json: &str) -> Result<Vec<RouteRecord>, serde_json::Error> {
    let routes: Vec<FeedRoute> = serde_json::from_str(json)?;
    Ok(routes.into_iter().map(RouteRecord::from).collect())
}

fn read(path: &Path) -> Result<String, RepositoryError> {
    std::fs::read_to_string(path).map_err(|e| RepositoryError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load both exports from `dir` into an in-memory repository.
pub fn load_dir(dir: impl AsRef<Path>) -> Result<MemoryRepository, RepositoryError> {
    let dir = dir.as_ref();

    let stops_path = dir.join(STOPS_FILE);
    let stops = parse_stops(&read(&stops_path)?).map_err(|e| RepositoryError::Load {
        path: stops_path.display().to_string(),
        message: e.to_string(),
    })?;

    let routes_path = dir.join(ROUTES_FILE);
    let routes = parse_routes(&read(&routes_path)?).map_err(|e| RepositoryError::Load {
        path: routes_path.display().to_string(),
        message: e.to_string(),
    })?;

    info!(
        stops = stops.len(),
        route_rows = routes.len(),
        dir = %dir.display(),
        "Loaded feed exports"
    );

    Ok(MemoryRepository::new(stops, routes))
}
