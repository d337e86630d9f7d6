//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Itinerary, Stop, StopCode};

/// Query for ranked paths between two stops.
#[derive(Debug, Deserialize)]
pub struct PathsRequest {
    /// Origin stop code
    pub origin: String,

    /// Destination stop code
    pub destination: String,

    /// "dist" or "transfer" (defaults to "dist")
    pub criterion: Option<String>,
}

/// Query for the itineraries along one explicit path.
#[derive(Debug, Deserialize)]
pub struct PathDetailsRequest {
    /// Stop codes separated by spaces or `+`, e.g. "01012+01013+01019"
    pub path: String,

    /// Optional total distance to select among itineraries
    pub distance: Option<f64>,
}

/// Split a path parameter into stop codes.
///
/// Codes are separated by `+`, spaces or both; empty segments are ignored.
pub fn parse_path_param(path: &str) -> Vec<StopCode> {
    path.split(|c: char| c == '+' || c.is_whitespace())
        .filter(|segment| !segment.is_empty())
        .map(StopCode::from)
        .collect()
}

/// A stop with its attributes.
#[derive(Debug, Serialize, PartialEq)]
pub struct StopResult {
    /// Stop code
    pub code: String,

    /// Road the stop is on
    pub road_name: Option<String>,

    /// Free-text description
    pub description: Option<String>,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<&Stop> for StopResult {
    fn from(stop: &Stop) -> Self {
        Self {
            code: stop.code.to_string(),
            road_name: stop.road_name.clone(),
            description: stop.description.clone(),
            latitude: stop.latitude,
            longitude: stop.longitude,
        }
    }
}

/// Response listing every stop.
#[derive(Debug, Serialize)]
pub struct StopsResponse {
    pub stops: Vec<StopResult>,
}

/// One itinerary in a response.
#[derive(Debug, Serialize, PartialEq)]
pub struct ItineraryResult {
    /// Service numbers, one per hop
    pub services: Vec<String>,

    /// Stop codes from origin to destination
    pub path: Vec<String>,

    /// Total distance
    pub distance: f64,

    /// Number of services ridden
    pub transfer: usize,
}

impl From<&Itinerary> for ItineraryResult {
    fn from(itinerary: &Itinerary) -> Self {
        Self {
            services: itinerary
                .service_numbers()
                .into_iter()
                .map(String::from)
                .collect(),
            path: itinerary
                .path()
                .stops()
                .iter()
                .map(StopCode::to_string)
                .collect(),
            distance: itinerary.distance(),
            transfer: itinerary.transfers(),
        }
    }
}

/// Ranked itineraries for a query.
#[derive(Debug, Serialize)]
pub struct PathsResponse {
    /// Criterion the itineraries are ordered by
    pub criterion: String,

    /// Itineraries, best first
    pub itineraries: Vec<ItineraryResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
