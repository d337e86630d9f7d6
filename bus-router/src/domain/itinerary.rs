//! Paths, itineraries and ranking criteria.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::{DomainError, ServiceKey, StopCode};

/// An ordered stop sequence from origin to destination, service-agnostic.
///
/// Always has at least two stops, all distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path(Vec<StopCode>);

impl Path {
    /// Create a path, rejecting sequences shorter than two stops or that
    /// visit a stop twice.
    pub fn new(stops: Vec<StopCode>) -> Result<Self, DomainError> {
        if stops.len() < 2 {
            return Err(DomainError::PathTooShort(stops.len()));
        }
        let mut seen = HashSet::with_capacity(stops.len());
        if let Some(repeated) = stops.iter().find(|stop| !seen.insert(*stop)) {
            return Err(DomainError::RepeatedStop(repeated.clone()));
        }
        Ok(Self(stops))
    }

    /// A non-empty prefix followed by one more stop not already in it.
    pub(crate) fn extending(prefix: &[StopCode], next: StopCode) -> Self {
        debug_assert!(!prefix.is_empty());
        debug_assert!(!prefix.contains(&next));
        let mut stops = Vec::with_capacity(prefix.len() + 1);
        stops.extend_from_slice(prefix);
        stops.push(next);
        Self(stops)
    }

    pub fn stops(&self) -> &[StopCode] {
        &self.0
    }

    pub fn origin(&self) -> &StopCode {
        &self.0[0]
    }

    pub fn destination(&self) -> &StopCode {
        &self.0[self.0.len() - 1]
    }

    /// Number of consecutive stop pairs.
    pub fn hop_count(&self) -> usize {
        self.0.len() - 1
    }

    /// Consecutive `(from, to)` stop pairs.
    pub fn hops(&self) -> impl Iterator<Item = (&StopCode, &StopCode)> {
        self.0.windows(2).map(|pair| (&pair[0], &pair[1]))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stop) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{stop}")?;
        }
        Ok(())
    }
}

/// A path bound to one service per hop, with its total distance.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    services: Vec<ServiceKey>,
    path: Path,
    distance: f64,
}

impl Itinerary {
    /// Create an itinerary. `services[i]` is ridden over hop `i` of `path`.
    pub fn new(services: Vec<ServiceKey>, path: Path, distance: f64) -> Result<Self, DomainError> {
        if services.len() != path.hop_count() {
            return Err(DomainError::HopCountMismatch {
                services: services.len(),
                hops: path.hop_count(),
            });
        }
        Ok(Self {
            services,
            path,
            distance,
        })
    }

    pub fn services(&self) -> &[ServiceKey] {
        &self.services
    }

    /// Service numbers in riding order, as shown to passengers.
    pub fn service_numbers(&self) -> Vec<&str> {
        self.services.iter().map(ServiceKey::number).collect()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total distance over all hops.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Number of services ridden (one per hop).
    pub fn transfers(&self) -> usize {
        self.services.len()
    }

    /// The numeric value this itinerary is ordered by under `criterion`.
    pub fn rank_key(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Distance => self.distance,
            Criterion::Transfers => self.transfers() as f64,
        }
    }
}

/// Error returned when parsing an unknown ranking criterion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid criterion {0:?}: expected \"dist\" or \"transfer\"")]
pub struct InvalidCriterion(pub String);

/// The key itineraries are ranked by, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    /// Total distance travelled ("dist").
    Distance,
    /// Number of services ridden ("transfer").
    Transfers,
}

impl Criterion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Distance => "dist",
            Criterion::Transfers => "transfer",
        }
    }
}

impl FromStr for Criterion {
    type Err = InvalidCriterion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dist" => Ok(Criterion::Distance),
            "transfer" => Ok(Criterion::Transfers),
            other => Err(InvalidCriterion(other.to_string())),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(codes: &[&str]) -> Path {
        Path::new(codes.iter().map(|c| StopCode::new(*c)).collect()).unwrap()
    }

    #[test]
    fn path_rejects_short_sequences() {
        assert_eq!(Path::new(vec![]), Err(DomainError::PathTooShort(0)));
        assert_eq!(
            Path::new(vec![StopCode::new("A")]),
            Err(DomainError::PathTooShort(1))
        );
    }

    #[test]
    fn path_rejects_repeated_stops() {
        let codes = |stops: &[&str]| -> Vec<StopCode> {
            stops.iter().copied().map(StopCode::new).collect()
        };
        assert_eq!(
            Path::new(codes(&["A", "B", "A"])),
            Err(DomainError::RepeatedStop(StopCode::new("A")))
        );
        assert_eq!(
            Path::new(codes(&["A", "B", "C", "C"])),
            Err(DomainError::RepeatedStop(StopCode::new("C")))
        );
    }

    #[test]
    fn path_accessors() {
        let p = path(&["A", "B", "C"]);
        assert_eq!(p.origin().as_str(), "A");
        assert_eq!(p.destination().as_str(), "C");
        assert_eq!(p.hop_count(), 2);

        let hops: Vec<_> = p.hops().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        assert_eq!(hops, vec![("A", "B"), ("B", "C")]);
        assert_eq!(p.to_string(), "A -> B -> C");
    }

    #[test]
    fn path_extending() {
        let prefix = [StopCode::new("A"), StopCode::new("B")];
        let p = Path::extending(&prefix, StopCode::new("C"));
        assert_eq!(p, path(&["A", "B", "C"]));
    }

    #[test]
    fn itinerary_requires_service_per_hop() {
        let err = Itinerary::new(vec![ServiceKey::new("10", 1)], path(&["A", "B", "C"]), 1.0);
        assert_eq!(
            err,
            Err(DomainError::HopCountMismatch {
                services: 1,
                hops: 2
            })
        );
    }

    #[test]
    fn itinerary_rank_keys() {
        let it = Itinerary::new(
            vec![ServiceKey::new("10", 1), ServiceKey::new("11", 2)],
            path(&["A", "B", "C"]),
            7.5,
        )
        .unwrap();

        assert_eq!(it.transfers(), 2);
        assert_eq!(it.service_numbers(), vec!["10", "11"]);
        assert_eq!(it.rank_key(Criterion::Distance), 7.5);
        assert_eq!(it.rank_key(Criterion::Transfers), 2.0);
    }

    #[test]
    fn criterion_parse() {
        assert_eq!("dist".parse::<Criterion>(), Ok(Criterion::Distance));
        assert_eq!("transfer".parse::<Criterion>(), Ok(Criterion::Transfers));
        assert_eq!(
            "time".parse::<Criterion>(),
            Err(InvalidCriterion("time".into()))
        );
        assert!("Dist".parse::<Criterion>().is_err());
    }

    #[test]
    fn criterion_display_roundtrip() {
        for criterion in [Criterion::Distance, Criterion::Transfers] {
            assert_eq!(criterion.to_string().parse::<Criterion>(), Ok(criterion));
        }
    }
}
