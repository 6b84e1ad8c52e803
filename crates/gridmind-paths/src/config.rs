//! Tunables for graph building, search and smoothing.
//!
//! With the `serde` feature every section deserializes with per-field
//! defaults, so a config file only needs the keys it overrides.

use crate::graph::Connectivity;
use crate::layout::GridLayout;

/// Search settings.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// When `false`, a diagonal move is rejected if both orthogonal cells
    /// it cuts between are blocked.
    pub diagonals_walkable: bool,

    /// Weight of the distance-to-goal term in a node's priority. `1.0` makes
    /// the search A* with a Euclidean heuristic; `0.0` makes it uniform-cost.
    pub goal_weight: f32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            diagonals_walkable: false,
            goal_weight: 1.0,
        }
    }
}

/// Path smoothing settings.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SmoothingConfig {
    /// Install the string-pulling modifier.
    pub enabled: bool,

    /// Clearance the smoothed path keeps from blocked cells, in world units.
    pub radius: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 0.0,
        }
    }
}

/// Everything a [`Seeker`](crate::Seeker) needs besides occupancy data.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathfindingConfig {
    pub layout: GridLayout,
    pub connectivity: Connectivity,
    pub search: SearchConfig,
    pub smoothing: SmoothingConfig,
}
