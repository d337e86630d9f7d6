//! Bus service types and stop-sequence helpers.

use std::fmt;
use std::sync::Arc;

use super::StopCode;

/// A directed bus service: service number plus direction.
///
/// Two keys name the same line only if both parts match; service "10" in
/// direction 1 and service "10" in direction 2 are different services.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceKey {
    number: Arc<str>,
    direction: u8,
}

impl ServiceKey {
    pub fn new(number: impl Into<Arc<str>>, direction: u8) -> Self {
        Self {
            number: number.into(),
            direction,
        }
    }

    /// The public service number, e.g. "10" or "961M".
    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn direction(&self) -> u8 {
        self.direction
    }
}

impl fmt::Debug for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceKey({}/{})", self.number, self.direction)
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.number, self.direction)
    }
}

/// One entry in a service's ordered stop sequence.
///
/// Route data may contain rows that do not name a real stop (for example a
/// marker for an expressway segment). Those are kept as `Placeholder` so
/// sequence positions stay intact, and are skipped when deriving
/// connections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteEntry {
    Stop(StopCode),
    Placeholder,
}

impl RouteEntry {
    /// The stop code, if this entry is a real stop.
    pub fn stop(&self) -> Option<&StopCode> {
        match self {
            RouteEntry::Stop(code) => Some(code),
            RouteEntry::Placeholder => None,
        }
    }

    fn is(&self, code: &StopCode) -> bool {
        self.stop() == Some(code)
    }
}

/// Stops reachable by staying on the service after calling at `from`.
///
/// Every occurrence of `from` contributes every later real stop, so a loop
/// service that calls at `from` twice yields the tail after each call.
/// Duplicates are kept.
pub fn stops_after<'a>(
    sequence: &'a [RouteEntry],
    from: &'a StopCode,
) -> impl Iterator<Item = &'a StopCode> + 'a {
    sequence
        .iter()
        .enumerate()
        .filter(move |(_, entry)| entry.is(from))
        .flat_map(move |(idx, _)| sequence[idx + 1..].iter().filter_map(RouteEntry::stop))
}

/// Whether the service calls at `from` strictly before some call at `to`.
pub fn serves_in_order(sequence: &[RouteEntry], from: &StopCode, to: &StopCode) -> bool {
    let Some(first) = sequence.iter().position(|entry| entry.is(from)) else {
        return false;
    };
    sequence[first + 1..].iter().any(|entry| entry.is(to))
}
