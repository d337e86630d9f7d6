//! Stop connectivity graph.
//!
//! An edge `A -> B` means some service calls at `A` and later at `B`, so
//! `B` is reachable from `A` without changing bus. The graph carries no
//! weights; distances are looked up per service when itineraries are
//! priced.

mod cache;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::{debug, info};

use crate::domain::StopCode;
use crate::repository::{Repository, RepositoryError};

pub use cache::{GraphCache, GraphCacheConfig, GraphCacheError};

/// Adjacency lists from each stop to the stops directly reachable from it.
///
/// Adjacency order is not meaningful and duplicate edges are allowed. A
/// stop with an entry but no neighbours is a known dead end; a stop with
/// no entry has not been looked at yet and can be filled in with
/// [`ConnectivityGraph::repair`].
#[derive(Debug, Clone, Default)]
pub struct ConnectivityGraph {
    adjacency: HashMap<StopCode, Vec<StopCode>>,
}

impl ConnectivityGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an edge, creating the origin's entry if absent.
    ///
    /// Does not check for an existing identical edge.
    pub fn insert(&mut self, origin: StopCode, destination: StopCode) {
        self.adjacency.entry(origin).or_default().push(destination);
    }

    /// Ensure `stop` has an entry, leaving existing edges untouched.
    pub fn insert_node(&mut self, stop: StopCode) {
        self.adjacency.entry(stop).or_default();
    }

    /// Whether `stop` has an entry (possibly with no edges).
    pub fn contains(&self, stop: &StopCode) -> bool {
        self.adjacency.contains_key(stop)
    }

    /// Stops directly reachable from `stop`; empty if it has no entry.
    pub fn neighbors(&self, stop: &StopCode) -> &[StopCode] {
        self.adjacency.get(stop).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of stops with an entry.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of stored edges, counting duplicates.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Build the graph from every stop in the repository.
    ///
    /// Stops with no onward connections get an explicit empty entry.
    pub fn build<R: Repository + ?Sized>(repository: &R) -> Result<Self, RepositoryError> {
        let mut graph = Self::new();
        for stop in repository.stop_codes()? {
            let connections = repository.direct_connections(&stop)?;
            if connections.is_empty() {
                graph.insert_node(stop);
                continue;
            }
            for connection in connections {
                graph.insert(stop.clone(), connection);
            }
        }
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Built connectivity graph"
        );
        Ok(graph)
    }

    /// Fill in the entry for a stop the graph has not seen.
    ///
    /// Does nothing if `stop` already has an entry. Afterwards the stop
    /// always has one, empty if it has no connections. Returns the number
    /// of edges added.
    pub fn repair<R: Repository + ?Sized>(
        &mut self,
        stop: &StopCode,
        repository: &R,
    ) -> Result<usize, RepositoryError> {
        if self.contains(stop) {
            return Ok(0);
        }
        let connections = repository.direct_connections(stop)?;
        let added = connections.len();
        self.insert_node(stop.clone());
        for connection in connections {
            self.insert(stop.clone(), connection);
        }
        debug!(stop = %stop, edges = added, "Repaired missing graph entry");
        Ok(added)
    }

    /// Whether both graphs have the same stops and the same neighbour set
    /// for each stop, ignoring edge order and duplicates.
    pub fn same_connectivity(&self, other: &Self) -> bool {
        self.node_count() == other.node_count()
            && self.adjacency.iter().all(|(stop, neighbors)| {
                other.adjacency.get(stop).is_some_and(|theirs| {
                    neighbors.iter().collect::<BTreeSet<_>>()
                        == theirs.iter().collect::<BTreeSet<_>>()
                })
            })
    }

    /// Serialize as a JSON object from stop code to neighbour codes.
    ///
    /// Keys are written in sorted order so the output is stable.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let map: BTreeMap<&str, Vec<&str>> = self
            .adjacency
            .iter()
            .map(|(stop, neighbors)| {
                (
                    stop.as_str(),
                    neighbors.iter().map(StopCode::as_str).collect(),
                )
            })
            .collect();
        serde_json::to_string_pretty(&map)
    }

    /// Parse the JSON form written by [`ConnectivityGraph::to_json`].
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let map: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
        let adjacency = map
            .into_iter()
            .map(|(stop, neighbors)| {
                (
                    StopCode::from(stop),
                    neighbors.into_iter().map(StopCode::from).collect(),
                )
            })
            .collect();
        Ok(Self { adjacency })
    }
}
