//! Search configuration for the path planner.

/// Configuration parameters for path search and pricing.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Once a solution is known, the search stops at the first queued
    /// partial path with more stops than this.
    pub early_stop_path_len: usize,

    /// Decimal places itinerary distances are rounded to.
    pub distance_precision: u32,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(early_stop_path_len: usize, distance_precision: u32) -> Self {
        Self {
            early_stop_path_len,
            distance_precision,
        }
    }

    /// Round a distance to the configured precision.
    pub fn round_distance(&self, distance: f64) -> f64 {
        let scale = 10f64.powi(self.distance_precision as i32);
        (distance * scale).round() / scale
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            early_stop_path_len: 3,
            distance_precision: 1,
        }
    }
}
