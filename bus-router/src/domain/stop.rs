//! Bus stop types.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A bus stop code.
///
/// Stop codes are opaque identifiers; two codes are the same stop if and
/// only if their text is equal. Cloning is cheap (shared string), so codes
/// can be copied freely into paths and adjacency lists.
///
/// # Examples
///
/// ```
/// use bus_router::domain::StopCode;
///
/// let a = StopCode::new("01012");
/// let b = StopCode::from("01012");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "01012");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopCode(Arc<str>);

impl StopCode {
    /// Create a stop code from any string-like value.
    pub fn new(code: impl Into<Arc<str>>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StopCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StopCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for StopCode {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopCode({})", self.as_str())
    }
}

impl fmt::Display for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bus stop with its descriptive attributes.
///
/// Equality and hashing use the code only: two `Stop` values with the same
/// code are the same stop regardless of attributes.
#[derive(Debug, Clone)]
pub struct Stop {
    pub code: StopCode,
    pub road_name: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Stop {
    /// Create a stop with no descriptive attributes.
    pub fn new(code: impl Into<StopCode>) -> Self {
        Self {
            code: code.into(),
            road_name: None,
            description: None,
            latitude: None,
            longitude: None,
        }
    }

    /// Human-readable label: the description if known, else the code.
    pub fn label(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(self.code.as_str())
    }
}

impl PartialEq for Stop {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Stop {}

impl Hash for Stop {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Codes compare exactly like their text.
        #[test]
        fn equality_matches_text(a in "[0-9A-Z]{1,6}", b in "[0-9A-Z]{1,6}") {
            prop_assert_eq!(StopCode::new(a.as_str()) == StopCode::new(b.as_str()), a == b);
        }

        /// Roundtrip: construct then as_str returns the original
        #[test]
        fn roundtrip(s in "\\PC{0,12}") {
            let code = StopCode::from(s.clone());
            prop_assert_eq!(code.as_str(), s.as_str());
        }
    }
}
