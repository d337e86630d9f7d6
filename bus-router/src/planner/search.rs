//! Ranked path queries.
//!
//! The [`Planner`] answers "how can I get from this stop to that one?" by
//! chaining the stages of the planner: bounded path search over the
//! connectivity graph, expansion of each path into service itineraries,
//! deduplication, then ranking under the requested criterion.

use tracing::{debug, info};

use super::bfs::search_paths;
use super::config::SearchConfig;
use super::expand::Expander;
use super::rank::{deduplicate, rank_itineraries};
use crate::domain::{
    Criterion, DomainError, InvalidCriterion, Itinerary, Path, ServiceKey, StopCode,
};
use crate::graph::ConnectivityGraph;
use crate::repository::{Repository, RepositoryError};

/// Error from a planner query.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlannerError {
    /// Origin, destination or path stop is unknown
    #[error("stop not found: {0}")]
    NotFound(StopCode),

    /// Malformed query
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A service calls at a stop but has no distance recorded there
    #[error("no distance for service {service} at stop {stop}")]
    MissingDistance { stop: StopCode, service: ServiceKey },

    /// Repository lookup failed
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for PlannerError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::StopNotFound(code) => PlannerError::NotFound(code),
            other => PlannerError::Repository(other),
        }
    }
}

impl From<InvalidCriterion> for PlannerError {
    fn from(err: InvalidCriterion) -> Self {
        PlannerError::InvalidArgument(err.to_string())
    }
}

impl From<DomainError> for PlannerError {
    fn from(err: DomainError) -> Self {
        PlannerError::InvalidArgument(err.to_string())
    }
}

/// Result of a ranked path query.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Itineraries, ranked best-first.
    pub itineraries: Vec<Itinerary>,

    /// Number of stop-sequence paths the search found.
    pub paths_found: usize,

    /// Number of itineraries before deduplication.
    pub candidates: usize,

    /// Whether the search was cut short by the early-stop rule.
    pub stopped_early: bool,
}

/// Path planner over a stop repository.
///
/// The planner holds no graph of its own: each query takes the graph it
/// should search, which may be repaired in place as missing stops are
/// reached. Concurrent queries need their own graph.
pub struct Planner<'a, R: ?Sized> {
    repository: &'a R,
    config: &'a SearchConfig,
}

impl<'a, R: Repository + ?Sized> Planner<'a, R> {
    /// Create a new planner.
    pub fn new(repository: &'a R, config: &'a SearchConfig) -> Self {
        Self { repository, config }
    }

    /// Find and rank itineraries from `origin` to `destination`.
    ///
    /// The criterion is checked first, then both endpoints, before the
    /// graph is touched. No route is an empty result, not an error.
    pub fn find_ranked_paths(
        &self,
        graph: &mut ConnectivityGraph,
        origin: &str,
        destination: &str,
        criterion: &str,
    ) -> Result<Vec<Itinerary>, PlannerError> {
        Ok(self.search(graph, origin, destination, criterion)?.itineraries)
    }

    /// As [`Planner::find_ranked_paths`], with search statistics.
    pub fn search(
        &self,
        graph: &mut ConnectivityGraph,
        origin: &str,
        destination: &str,
        criterion: &str,
    ) -> Result<SearchResult, PlannerError> {
        let criterion: Criterion = criterion.parse()?;
        let origin = self.resolve(origin)?;
        let destination = self.resolve(destination)?;
        if origin == destination {
            return Err(PlannerError::InvalidArgument(
                "origin and destination are the same stop".to_string(),
            ));
        }

        let found = search_paths(graph, self.repository, &origin, &destination, self.config)?;
        let mut expander = Expander::new(self.repository, self.config);
        let candidates = expander.expand_all(&found.paths)?;
        let candidate_count = candidates.len();
        let itineraries = rank_itineraries(deduplicate(candidates), criterion).into_vec();

        info!(
            origin = %origin,
            destination = %destination,
            criterion = %criterion,
            paths = found.paths.len(),
            candidates = candidate_count,
            itineraries = itineraries.len(),
            "Ranked path query complete"
        );

        Ok(SearchResult {
            itineraries,
            paths_found: found.paths.len(),
            candidates: candidate_count,
            stopped_early: found.stopped_early,
        })
    }

    /// Every itinerary along one explicit path, ranked by distance.
    ///
    /// With `distance` given, only itineraries of that (rounded) distance
    /// are kept, unless none match, in which case all are returned. No
    /// deduplication is applied.
    pub fn path_details(
        &self,
        stops: &[StopCode],
        distance: Option<f64>,
    ) -> Result<Vec<Itinerary>, PlannerError> {
        let path = Path::new(stops.to_vec())?;
        for stop in path.stops() {
            self.repository.stop(stop)?;
        }

        let itineraries = Expander::new(self.repository, self.config).expand(&path)?;
        let ranked = rank_itineraries(itineraries, Criterion::Distance).into_vec();

        let Some(distance) = distance else {
            return Ok(ranked);
        };
        let wanted = self.config.round_distance(distance);
        let matching: Vec<Itinerary> = ranked
            .iter()
            .filter(|it| it.distance() == wanted)
            .cloned()
            .collect();

        if matching.is_empty() {
            debug!(path = %path, distance, "No itinerary matches distance, returning all");
            Ok(ranked)
        } else {
            Ok(matching)
        }
    }

    fn resolve(&self, code: &str) -> Result<StopCode, PlannerError> {
        let code = StopCode::from(code);
        self.repository.stop(&code)?;
        Ok(code)
    }
}
