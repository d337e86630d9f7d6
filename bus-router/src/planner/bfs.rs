//! Bounded breadth-first search over the connectivity graph.
//!
//! Finds stop-sequence paths from an origin to a destination without
//! regard to which service covers each hop. The search is deliberately
//! incomplete in two ways that keep output small:
//!
//! - Visited stops are tracked for the whole search, not per path, so each
//!   stop is enqueued by exactly one partial path (the first in BFS order).
//!   The destination is the exception on the recording side: every expanded
//!   partial path with an edge to it yields a solution, while the
//!   destination itself is enqueued once and expanded like any other stop.
//! - Once any solution is known, the search stops at the first queued
//!   partial path longer than `early_stop_path_len`, even if shorter
//!   queued paths remain unexplored behind it.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, trace};

use super::config::SearchConfig;
use crate::domain::{Path, StopCode};
use crate::graph::ConnectivityGraph;
use crate::repository::{Repository, RepositoryError};

/// Result of path search.
#[derive(Debug, Clone, Default)]
pub struct PathSearchResult {
    /// Solutions in the order they were found.
    pub paths: Vec<Path>,

    /// Number of partial paths whose last stop was expanded.
    pub expanded: usize,

    /// Whether the early-stop rule ended the search.
    pub stopped_early: bool,
}

/// Search for paths from `origin` to `destination`.
///
/// Stops missing from `graph` are repaired from `repository` as they are
/// reached, so the graph may gain entries.
///
/// Solutions are recorded in BFS order, so they never get shorter. Each
/// has distinct stops: a partial path that already passes through the
/// destination is not recorded again, and duplicate edges from one stop
/// record a single solution.
pub fn search_paths<R: Repository + ?Sized>(
    graph: &mut ConnectivityGraph,
    repository: &R,
    origin: &StopCode,
    destination: &StopCode,
    config: &SearchConfig,
) -> Result<PathSearchResult, RepositoryError> {
    let mut result = PathSearchResult::default();

    let mut visited: HashSet<StopCode> = HashSet::new();
    visited.insert(origin.clone());

    let mut queue: VecDeque<Vec<StopCode>> = VecDeque::new();
    queue.push_back(vec![origin.clone()]);

    while let Some(partial) = queue.pop_front() {
        if !result.paths.is_empty() && partial.len() > config.early_stop_path_len {
            result.stopped_early = true;
            break;
        }

        let Some(last) = partial.last() else {
            continue;
        };
        if !graph.contains(last) {
            graph.repair(last, repository)?;
        }
        result.expanded += 1;

        let neighbors = graph.neighbors(last);
        trace!(
            stop = %last,
            depth = partial.len(),
            neighbors = neighbors.len(),
            "Expanding partial path"
        );

        let mut recorded = partial.contains(destination);
        for neighbor in neighbors {
            if neighbor == destination && !recorded {
                result.paths.push(Path::extending(&partial, neighbor.clone()));
                recorded = true;
            }
            if visited.insert(neighbor.clone()) {
                let mut extended = partial.clone();
                extended.push(neighbor.clone());
                queue.push_back(extended);
            }
        }
    }

    debug!(
        origin = %origin,
        destination = %destination,
        paths = result.paths.len(),
        expanded = result.expanded,
        stopped_early = result.stopped_early,
        "Path search complete"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryRepository;

    fn code(s: &str) -> StopCode {
        StopCode::new(s)
    }

    fn graph(edges: &[(&str, &str)]) -> ConnectivityGraph {
        let mut graph = ConnectivityGraph::new();
        for (a, b) in edges {
            graph.insert(code(a), code(b));
        }
        graph
    }

    fn search(graph: &mut ConnectivityGraph, from: &str, to: &str) -> PathSearchResult {
        search_with(graph, from, to, &SearchConfig::default())
    }

    fn search_with(
        graph: &mut ConnectivityGraph,
        from: &str,
        to: &str,
        config: &SearchConfig,
    ) -> PathSearchResult {
        search_paths(graph, &MemoryRepository::default(), &code(from), &code(to), config).unwrap()
    }

    fn as_strs(result: &PathSearchResult) -> Vec<Vec<&str>> {
        result
            .paths
            .iter()
            .map(|p| p.stops().iter().map(StopCode::as_str).collect())
            .collect()
    }

    #[test]
    fn direct_edge() {
        let mut g = graph(&[("A", "B")]);
        let result = search(&mut g, "A", "B");
        assert_eq!(as_strs(&result), vec![vec!["A", "B"]]);
        assert!(!result.stopped_early);
    }

    #[test]
    fn no_route_is_empty() {
        let mut g = graph(&[("A", "B"), ("C", "D")]);
        let result = search(&mut g, "A", "D");
        assert!(result.paths.is_empty());
        assert!(!result.stopped_early);
    }

    #[test]
    fn destination_recorded_from_every_predecessor() {
        // D is already visited when [A, C] is expanded, but is still a solution
        let mut g = graph(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]);
        let result = search(&mut g, "A", "D");
        assert_eq!(
            as_strs(&result),
            vec![vec!["A", "B", "D"], vec!["A", "C", "D"]]
        );
        // D itself is expanded once
        assert_eq!(result.expanded, 4);
    }

    #[test]
    fn destination_is_not_pruned() {
        // [A, B] is expanded further after being recorded; the cycle back
        // to B through C is not a second solution
        let mut g = graph(&[("A", "B"), ("B", "C"), ("C", "B")]);
        let result = search(&mut g, "A", "B");
        assert_eq!(as_strs(&result), vec![vec!["A", "B"]]);
        assert_eq!(result.expanded, 3);
    }

    #[test]
    fn interior_stop_reached_once() {
        // C is first reached via B, so the A -> D -> C route is never explored
        let mut g = graph(&[
            ("A", "B"),
            ("A", "D"),
            ("B", "C"),
            ("D", "C"),
            ("C", "E"),
        ]);
        let result = search(&mut g, "A", "E");
        assert_eq!(as_strs(&result), vec![vec!["A", "B", "C", "E"]]);
    }

    #[test]
    fn stops_early_after_first_solution() {
        // [A, B, D] is found; the 5-stop route via C, E, F is cut off
        let mut g = graph(&[
            ("A", "B"),
            ("A", "C"),
            ("B", "D"),
            ("C", "E"),
            ("E", "F"),
            ("F", "D"),
        ]);
        let result = search(&mut g, "A", "D");
        assert_eq!(as_strs(&result), vec![vec!["A", "B", "D"]]);
        assert!(result.stopped_early);
    }

    #[test]
    fn early_stop_cuts_off_queued_solution() {
        // Same graph as above: [A, C, E, F] is queued with an edge to D but
        // is only expanded once the threshold allows 4-stop partial paths
        let edges = [
            ("A", "B"),
            ("A", "C"),
            ("B", "D"),
            ("C", "E"),
            ("E", "F"),
            ("F", "D"),
        ];
        let relaxed = SearchConfig::new(4, 1);
        let result = search_with(&mut graph(&edges), "A", "D", &relaxed);
        assert_eq!(
            as_strs(&result),
            vec![vec!["A", "B", "D"], vec!["A", "C", "E", "F", "D"]]
        );
        assert!(!result.stopped_early);
    }

    #[test]
    fn keeps_searching_deep_without_solution() {
        let mut g = graph(&[("A", "B"), ("B", "C"), ("C", "D"), ("D", "E"), ("E", "F")]);
        let result = search(&mut g, "A", "F");
        assert_eq!(as_strs(&result), vec![vec!["A", "B", "C", "D", "E", "F"]]);
        assert_eq!(result.expanded, 5);
    }

    #[test]
    fn origin_is_never_revisited() {
        let mut g = graph(&[("A", "B"), ("B", "A"), ("A", "C")]);
        let result = search(&mut g, "A", "C");
        assert_eq!(as_strs(&result), vec![vec!["A", "C"]]);
    }

    #[test]
    fn duplicate_edges_are_harmless() {
        let mut g = graph(&[("A", "B"), ("A", "B"), ("A", "C"), ("A", "C"), ("C", "B")]);
        let result = search(&mut g, "A", "B");
        assert_eq!(as_strs(&result), vec![vec!["A", "B"], vec!["A", "C", "B"]]);
        assert_eq!(result.expanded, 3);
    }

    #[test]
    fn repairs_missing_stops_from_repository() {
        use crate::repository::{RouteRecord, StopRecord};

        let repository = MemoryRepository::new(
            vec![StopRecord::new("A"), StopRecord::new("B"), StopRecord::new("C")],
            vec![
                RouteRecord::new("10", 1, 1, "B", 0.0),
                RouteRecord::new("10", 1, 2, "C", 1.0),
            ],
        );
        // Stale graph: knows A -> B but nothing about B
        let mut g = graph(&[("A", "B")]);

        let result = search_paths(
            &mut g,
            &repository,
            &code("A"),
            &code("C"),
            &SearchConfig::default(),
        )
        .unwrap();

        assert_eq!(as_strs(&result), vec![vec!["A", "B", "C"]]);
        assert!(g.contains(&code("B")));
        assert!(g.contains(&code("C")));
    }
}
