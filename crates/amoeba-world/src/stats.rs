//! Cumulative population statistics.

use serde::{Deserialize, Serialize};

/// Running totals across every epoch of a world, resets included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldStats {
    /// Offspring added to the population
    pub births: u64,
    /// Organisms removed after their lifespan ran out
    pub deaths: u64,
    /// Sexual reproduction events
    pub reproductions: u64,
    pub plants_eaten: u64,
    pub plants_grown: u64,
    /// Reinitializations, whether from extinction or a host request
    pub resets: u64,
}
