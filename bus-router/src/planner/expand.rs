//! Expansion of stop-sequence paths into priced itineraries.
//!
//! A path only says which stops are visited. Each hop may be covered by
//! several services, so one path expands to the Cartesian product of its
//! per-hop service choices.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::config::SearchConfig;
use super::search::PlannerError;
use crate::domain::{Itinerary, Path, ServiceKey, StopCode};
use crate::repository::Repository;

/// One service that can ride a hop, with the distance it covers.
#[derive(Debug, Clone, PartialEq)]
struct HopChoice {
    service: ServiceKey,
    distance: f64,
}

/// Expands paths into itineraries, remembering the choices for each hop.
///
/// Paths from one search often share hops, so candidates are looked up
/// once per `(from, to)` pair.
pub struct Expander<'a, R: ?Sized> {
    repository: &'a R,
    config: &'a SearchConfig,
    hops: HashMap<(StopCode, StopCode), Arc<[HopChoice]>>,
}

impl<'a, R: Repository + ?Sized> Expander<'a, R> {
    pub fn new(repository: &'a R, config: &'a SearchConfig) -> Self {
        Self {
            repository,
            config,
            hops: HashMap::new(),
        }
    }

    /// Every itinerary realizing `path`.
    ///
    /// Empty if some hop has no service. Totals are rounded to the
    /// configured precision after summing.
    pub fn expand(&mut self, path: &Path) -> Result<Vec<Itinerary>, PlannerError> {
        let mut partials: Vec<(Vec<ServiceKey>, f64)> = Vec::new();

        for (index, (from, to)) in path.hops().enumerate() {
            let choices = self.choices(from, to)?;
            if choices.is_empty() {
                return Ok(Vec::new());
            }

            if index == 0 {
                partials = choices
                    .iter()
                    .map(|choice| (vec![choice.service.clone()], choice.distance))
                    .collect();
                continue;
            }

            let mut next = Vec::with_capacity(partials.len() * choices.len());
            for choice in choices.iter() {
                for (services, total) in &partials {
                    let mut services = services.clone();
                    services.push(choice.service.clone());
                    next.push((services, total + choice.distance));
                }
            }
            partials = next;
        }

        partials
            .into_iter()
            .map(|(services, total)| {
                Itinerary::new(services, path.clone(), self.config.round_distance(total))
                    .map_err(PlannerError::from)
            })
            .collect()
    }

    /// Expand every path, concatenating results in path order.
    pub fn expand_all(&mut self, paths: &[Path]) -> Result<Vec<Itinerary>, PlannerError> {
        let mut itineraries = Vec::new();
        for (i, path) in paths.iter().enumerate() {
            itineraries.extend(self.expand(path)?);
            debug!(
                path = %path,
                itineraries = itineraries.len(),
                "expanded {}/{} paths",
                i + 1,
                paths.len()
            );
        }
        Ok(itineraries)
    }

    fn choices(&mut self, from: &StopCode, to: &StopCode) -> Result<Arc<[HopChoice]>, PlannerError> {
        let key = (from.clone(), to.clone());
        if let Some(choices) = self.hops.get(&key) {
            return Ok(choices.clone());
        }

        let mut choices = Vec::new();
        for service in self.repository.services_between(from, to)? {
            let distance = hop_distance(self.repository, from, to, &service)?;
            choices.push(HopChoice { service, distance });
        }
        let choices: Arc<[HopChoice]> = choices.into();
        self.hops.insert(key, choices.clone());
        Ok(choices)
    }
}

/// Distance covered by `service` from `from` to `to`.
///
/// Measured from the first call at `from` to the last call at `to`, as an
/// absolute difference so a service with decreasing cumulative distances
/// still yields a non-negative hop.
pub fn hop_distance<R: Repository + ?Sized>(
    repository: &R,
    from: &StopCode,
    to: &StopCode,
    service: &ServiceKey,
) -> Result<f64, PlannerError> {
    let missing = |stop: &StopCode| PlannerError::MissingDistance {
        stop: stop.clone(),
        service: service.clone(),
    };

    let start = repository
        .cumulative_distances(from, service)?
        .first()
        .copied()
        .ok_or_else(|| missing(from))?;
    let end = repository
        .cumulative_distances(to, service)?
        .last()
        .copied()
        .ok_or_else(|| missing(to))?;

    Ok((end - start).abs())
}

/// Expand a single path with a fresh hop memo.
pub fn expand_path<R: Repository + ?Sized>(
    path: &Path,
    repository: &R,
    config: &SearchConfig,
) -> Result<Vec<Itinerary>, PlannerError> {
    Expander::new(repository, config).expand(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MemoryRepository, RouteRecord, StopRecord};

    fn code(s: &str) -> StopCode {
        StopCode::new(s)
    }

    fn path(stops: &[&str]) -> Path {
        Path::new(stops.iter().copied().map(code).collect()).unwrap()
    }

    fn repo(routes: Vec<RouteRecord>) -> MemoryRepository {
        let stops = ["A", "B", "C", "D"]
            .into_iter()
            .map(StopRecord::new)
            .collect();
        MemoryRepository::new(stops, routes)
    }

    fn summary(itineraries: &[Itinerary]) -> Vec<(Vec<&str>, f64)> {
        itineraries
            .iter()
            .map(|it| (it.service_numbers(), it.distance()))
            .collect()
    }

    #[test]
    fn single_hop_single_service() {
        let repository = repo(vec![
            RouteRecord::new("10", 1, 1, "A", 0.0),
            RouteRecord::new("10", 1, 2, "B", 2.5),
            RouteRecord::new("10", 1, 3, "C", 6.0),
        ]);

        let itineraries =
            expand_path(&path(&["A", "C"]), &repository, &SearchConfig::default()).unwrap();
        assert_eq!(summary(&itineraries), vec![(vec!["10"], 6.0)]);
        assert_eq!(itineraries[0].transfers(), 1);
    }

    #[test]
    fn cartesian_product_over_hops() {
        // Two services on A -> B, two on B -> C
        let repository = repo(vec![
            RouteRecord::new("1", 1, 1, "A", 0.0),
            RouteRecord::new("1", 1, 2, "B", 1.0),
            RouteRecord::new("2", 1, 1, "A", 0.0),
            RouteRecord::new("2", 1, 2, "B", 2.0),
            RouteRecord::new("3", 1, 1, "B", 0.0),
            RouteRecord::new("3", 1, 2, "C", 10.0),
            RouteRecord::new("4", 1, 1, "B", 0.0),
            RouteRecord::new("4", 1, 2, "C", 20.0),
        ]);

        let itineraries =
            expand_path(&path(&["A", "B", "C"]), &repository, &SearchConfig::default()).unwrap();
        // Outer loop over the new hop's services, inner over existing prefixes
        assert_eq!(
            summary(&itineraries),
            vec![
                (vec!["1", "3"], 11.0),
                (vec!["2", "3"], 12.0),
                (vec!["1", "4"], 21.0),
                (vec!["2", "4"], 22.0),
            ]
        );
    }

    #[test]
    fn hop_without_service_yields_nothing() {
        let repository = repo(vec![
            RouteRecord::new("1", 1, 1, "A", 0.0),
            RouteRecord::new("1", 1, 2, "B", 1.0),
        ]);

        let itineraries =
            expand_path(&path(&["A", "B", "C"]), &repository, &SearchConfig::default()).unwrap();
        assert!(itineraries.is_empty());
    }

    #[test]
    fn wrong_order_is_not_a_candidate() {
        let repository = repo(vec![
            RouteRecord::new("1", 1, 1, "B", 0.0),
            RouteRecord::new("1", 1, 2, "A", 1.0),
        ]);

        let itineraries =
            expand_path(&path(&["A", "B"]), &repository, &SearchConfig::default()).unwrap();
        assert!(itineraries.is_empty());
    }

    #[test]
    fn loop_service_uses_first_board_and_last_alight() {
        // Service visits A twice and B twice
        let repository = repo(vec![
            RouteRecord::new("L", 1, 1, "A", 0.0),
            RouteRecord::new("L", 1, 2, "B", 1.0),
            RouteRecord::new("L", 1, 3, "A", 2.0),
            RouteRecord::new("L", 1, 4, "B", 3.0),
        ]);

        let itineraries =
            expand_path(&path(&["A", "B"]), &repository, &SearchConfig::default()).unwrap();
        assert_eq!(summary(&itineraries), vec![(vec!["L"], 3.0)]);
    }

    #[test]
    fn decreasing_distances_are_absolute() {
        let repository = repo(vec![
            RouteRecord::new("R", 2, 1, "A", 9.0),
            RouteRecord::new("R", 2, 2, "B", 4.0),
        ]);

        let itineraries =
            expand_path(&path(&["A", "B"]), &repository, &SearchConfig::default()).unwrap();
        assert_eq!(summary(&itineraries), vec![(vec!["R"], 5.0)]);
    }

    #[test]
    fn total_is_rounded_after_summing() {
        let repository = repo(vec![
            RouteRecord::new("1", 1, 1, "A", 0.0),
            RouteRecord::new("1", 1, 2, "B", 0.04),
            RouteRecord::new("2", 1, 1, "B", 0.0),
            RouteRecord::new("2", 1, 2, "C", 0.04),
        ]);

        let itineraries =
            expand_path(&path(&["A", "B", "C"]), &repository, &SearchConfig::default()).unwrap();
        assert_eq!(summary(&itineraries), vec![(vec!["1", "2"], 0.1)]);
    }

    #[test]
    fn same_number_different_direction_are_distinct() {
        let repository = repo(vec![
            RouteRecord::new("10", 1, 1, "A", 0.0),
            RouteRecord::new("10", 1, 2, "B", 1.0),
            RouteRecord::new("10", 2, 1, "A", 5.0),
            RouteRecord::new("10", 2, 2, "B", 7.0),
        ]);

        let itineraries =
            expand_path(&path(&["A", "B"]), &repository, &SearchConfig::default()).unwrap();
        let directions: Vec<u8> = itineraries
            .iter()
            .map(|it| it.services()[0].direction())
            .collect();
        assert_eq!(directions, vec![1, 2]);
    }

    #[test]
    fn expand_all_concatenates_in_path_order() {
        let repository = repo(vec![
            RouteRecord::new("1", 1, 1, "A", 0.0),
            RouteRecord::new("1", 1, 2, "B", 1.0),
            RouteRecord::new("1", 1, 3, "C", 3.0),
        ]);
        let config = SearchConfig::default();
        let mut expander = Expander::new(&repository, &config);

        let itineraries = expander
            .expand_all(&[path(&["A", "C"]), path(&["A", "B", "C"])])
            .unwrap();
        assert_eq!(
            summary(&itineraries),
            vec![(vec!["1"], 3.0), (vec!["1", "1"], 3.0)]
        );
    }

    #[test]
    fn hop_distance_reports_missing_table() {
        struct NoDistances(MemoryRepository);

        impl Repository for NoDistances {
            fn stop(
                &self,
                code: &StopCode,
            ) -> Result<Arc<crate::domain::Stop>, crate::repository::RepositoryError> {
                self.0.stop(code)
            }
            fn stop_codes(&self) -> Result<Vec<StopCode>, crate::repository::RepositoryError> {
                self.0.stop_codes()
            }
            fn services_at(
                &self,
                code: &StopCode,
            ) -> Result<Arc<[ServiceKey]>, crate::repository::RepositoryError> {
                self.0.services_at(code)
            }
            fn service_stops(
                &self,
                service: &ServiceKey,
            ) -> Result<Arc<[crate::domain::RouteEntry]>, crate::repository::RepositoryError>
            {
                self.0.service_stops(service)
            }
            fn cumulative_distances(
                &self,
                _code: &StopCode,
                _service: &ServiceKey,
            ) -> Result<Arc<[f64]>, crate::repository::RepositoryError> {
                Ok(Arc::from(Vec::new()))
            }
        }

        let repository = NoDistances(repo(vec![
            RouteRecord::new("1", 1, 1, "A", 0.0),
            RouteRecord::new("1", 1, 2, "B", 1.0),
        ]));

        let err = expand_path(&path(&["A", "B"]), &repository, &SearchConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            PlannerError::MissingDistance { ref stop, .. } if stop.as_str() == "A"
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::repository::{MemoryRepository, RouteRecord, StopRecord};
    use proptest::prelude::*;

    /// Up to four services, each calling at A, B and C in order with
    /// arbitrary (possibly decreasing) cumulative distances.
    fn services() -> impl Strategy<Value = Vec<[f64; 3]>> {
        prop::collection::vec(
            [-100.0f64..100.0, -100.0f64..100.0, -100.0f64..100.0],
            1..4,
        )
    }

    proptest! {
        /// Every expanded itinerary has a non-negative distance and one
        /// service per hop.
        #[test]
        fn distances_are_non_negative(services in services()) {
            let mut routes = Vec::new();
            for (i, distances) in services.iter().enumerate() {
                for (seq, (stop, distance)) in ["A", "B", "C"].iter().zip(distances).enumerate() {
                    routes.push(RouteRecord::new(i.to_string(), 1, seq as u32 + 1, *stop, *distance));
                }
            }
            let repository = MemoryRepository::new(
                ["A", "B", "C"].into_iter().map(StopRecord::new).collect(),
                routes,
            );
            let path = Path::new(vec![StopCode::new("A"), StopCode::new("B"), StopCode::new("C")]).unwrap();

            let itineraries = expand_path(&path, &repository, &SearchConfig::default()).unwrap();
            prop_assert_eq!(itineraries.len(), services.len() * services.len());
            for itinerary in &itineraries {
                prop_assert!(itinerary.distance() >= 0.0);
                prop_assert_eq!(itinerary.transfers(), 2);
            }
        }
    }
}
