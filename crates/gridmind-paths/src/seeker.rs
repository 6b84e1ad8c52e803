//! World-space path queries.

use gridmind_core::Vec2;

use crate::config::{PathfindingConfig, SmoothingConfig};
use crate::error::{PathError, PathResult};
use crate::graph::{Connectivity, Graph};
use crate::layout::GridLayout;
use crate::modifier::StringPullModifier;
use crate::occupancy::Occupancy;
use crate::path::Path;
use crate::pathfinder::Pathfinder;
use crate::sight::GridLineOfSight;

/// Owns a layout, the graph built from it and a pathfinder bound to that
/// graph, and answers path queries between world positions.
pub struct Seeker {
    layout: GridLayout,
    connectivity: Connectivity,
    smoothing: SmoothingConfig,
    graph: Graph,
    pathfinder: Pathfinder,
}

impl Seeker {
    /// Build the graph for `occupancy`, which must have one cell per layout
    /// cell.
    pub fn new(config: &PathfindingConfig, occupancy: Occupancy) -> PathResult<Self> {
        config.layout.validate()?;
        check_dimensions(&config.layout, &occupancy)?;

        let layout = config.layout;
        let graph = Graph::new(&occupancy, config.connectivity, |p| {
            layout.node_position(p)
        });
        let mut seeker = Self {
            layout,
            connectivity: config.connectivity,
            smoothing: config.smoothing,
            graph,
            pathfinder: Pathfinder::new(config.search),
        };
        seeker.install_modifiers(occupancy)?;

        log::debug!(
            "seeker ready: {}x{} cells, {} blocked",
            layout.columns,
            layout.rows,
            seeker.graph.nodes().iter().filter(|n| n.is_blocked()).count()
        );
        Ok(seeker)
    }

    /// Path between the cells containing `from` and `to`.
    pub fn search(&mut self, from: Vec2, to: Vec2) -> Option<Path> {
        let start = self.layout.cell_at(from);
        let goal = self.layout.cell_at(to);
        self.pathfinder.search(&self.graph, start, goal)
    }

    /// Rebuild the graph from new occupancy data.
    ///
    /// The pathfinder's modifiers are replaced by the configured smoothing
    /// modifier; custom modifiers have to be added again.
    pub fn refresh(&mut self, occupancy: Occupancy) -> PathResult<()> {
        check_dimensions(&self.layout, &occupancy)?;
        let layout = self.layout;
        self.graph.refresh(&occupancy, |p| layout.node_position(p));
        self.pathfinder.clear_modifiers();
        self.install_modifiers(occupancy)
    }

    fn install_modifiers(&mut self, occupancy: Occupancy) -> PathResult<()> {
        if self.smoothing.enabled {
            let los = GridLineOfSight::new(self.layout, occupancy, self.smoothing.radius)?;
            self.pathfinder.add_modifier(StringPullModifier::new(los));
        }
        Ok(())
    }

    /// Graph built from the latest occupancy.
    #[inline]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    #[inline]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    #[inline]
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    pub fn pathfinder(&self) -> &Pathfinder {
        &self.pathfinder
    }

    /// Mutable access for adding modifiers or changing search settings.
    pub fn pathfinder_mut(&mut self) -> &mut Pathfinder {
        &mut self.pathfinder
    }
}

fn check_dimensions(layout: &GridLayout, occupancy: &Occupancy) -> PathResult<()> {
    if occupancy.width() != layout.columns || occupancy.height() != layout.rows {
        return Err(PathError::LayoutMismatch {
            columns: layout.columns,
            rows: layout.rows,
            width: occupancy.width(),
            height: occupancy.height(),
        });
    }
    Ok(())
}
