use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use gridmind_core::Vec2;
use gridmind_paths::{GridLayout, PathfindingConfig};

/// Everything the demo can be told from a JSON file. Missing keys keep their
/// defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub pathfinding: PathfindingConfig,
    /// Circular obstacles as `[x, y, radius]` in world units.
    pub obstacles: Vec<[f32; 3]>,
    pub from: Vec2,
    pub to: Vec2,
    /// Agent ticks to simulate.
    pub ticks: u32,
    pub tick_seconds: f32,
    pub seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        let mut pathfinding = PathfindingConfig::default();
        pathfinding.layout = GridLayout::with_cell_size(24, 16, 1.0);
        Self {
            pathfinding,
            obstacles: vec![[8.0, 8.0, 3.0], [16.0, 4.0, 2.5], [17.0, 12.5, 2.0]],
            from: Vec2::new(1.5, 1.5),
            to: Vec2::new(22.5, 14.5),
            ticks: 80,
            tick_seconds: 0.25,
            seed: 7,
        }
    }
}

impl DemoConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Whether a cell box of `size` centred on `center` overlaps an obstacle.
    pub fn is_obstructed(&self, center: Vec2, size: Vec2) -> bool {
        self.obstacles.iter().any(|&[x, y, r]| {
            let half = size / 2.0;
            // Closest point of the box to the circle centre.
            let cx = x.clamp(center.x - half.x, center.x + half.x);
            let cy = y.clamp(center.y - half.y, center.y + half.y);
            Vec2::new(cx, cy).distance(Vec2::new(x, y)) < r
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg: DemoConfig = serde_json::from_str(r#"{ "ticks": 3, "obstacles": [] }"#).unwrap();
        assert_eq!(cfg.ticks, 3);
        assert!(cfg.obstacles.is_empty());
        assert_eq!(cfg.pathfinding.layout.columns, 24);
    }

    #[test]
    fn obstacle_overlap() {
        let cfg = DemoConfig {
            obstacles: vec![[0.0, 0.0, 1.0]],
            ..DemoConfig::default()
        };
        let cell = Vec2::new(1.0, 1.0);
        assert!(cfg.is_obstructed(Vec2::new(0.5, 0.5), cell));
        assert!(cfg.is_obstructed(Vec2::new(1.4, 0.0), cell));
        assert!(!cfg.is_obstructed(Vec2::new(2.0, 2.0), cell));
    }
}
