//! Best-first search over a [`Graph`].
//!
//! A [`Pathfinder`] owns every buffer a search needs (frontier heap, scratch
//! distances, membership sets), so it can be reused across searches without
//! allocating, and several pathfinders can search the same graph.

use gridmind_core::{Point, Range};

use crate::config::SearchConfig;
use crate::graph::{Graph, NodeId};
use crate::heap::PriorityQueue;
use crate::modifier::Modifier;
use crate::path::Path;
use crate::scratch::{FrontierEntry, SearchScratch};

/// How a node took part in the last search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// On the returned path.
    Path,
    /// Still queued when the search stopped.
    Frontier,
    /// Dequeued and expanded.
    Explored,
    /// Not reached, or outside the graph.
    Untouched,
}

/// Reusable best-first search state plus the modifiers applied to every
/// path it returns.
pub struct Pathfinder {
    config: SearchConfig,
    frontier: PriorityQueue<FrontierEntry>,
    scratch: SearchScratch,
    explored: Vec<bool>,
    in_frontier: Vec<bool>,
    on_path: Vec<bool>,
    bound_range: Range,
    bound_revision: u32,
    modifiers: Vec<Box<dyn Modifier>>,
}

impl Default for Pathfinder {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Pathfinder {
    /// Create a pathfinder with no modifiers.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            frontier: PriorityQueue::new(),
            scratch: SearchScratch::new(),
            explored: Vec::new(),
            in_frontier: Vec::new(),
            on_path: Vec::new(),
            bound_range: Range::default(),
            bound_revision: 0,
            modifiers: Vec::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Replace the search settings. Takes effect on the next search.
    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    /// Append a modifier; modifiers run in registration order.
    pub fn add_modifier(&mut self, modifier: impl Modifier + 'static) {
        self.modifiers.push(Box::new(modifier));
    }

    /// Remove every modifier.
    pub fn clear_modifiers(&mut self) {
        self.modifiers.clear();
    }

    /// Number of installed modifiers.
    #[inline]
    pub fn modifier_count(&self) -> usize {
        self.modifiers.len()
    }

    /// Per-node distances and back-references from the last search.
    pub fn scratch(&self) -> &SearchScratch {
        &self.scratch
    }

    /// Find a path from `start` to `goal`.
    ///
    /// Returns `None` when either endpoint is outside the graph or blocked, or
    /// when the goal cannot be reached. `start == goal` gives a one-node path.
    /// The search stops as soon as the goal enters the frontier, so the result
    /// is not guaranteed to be the shortest one when `goal_weight` overestimates.
    pub fn search(&mut self, graph: &Graph, start: Point, goal: Point) -> Option<Path> {
        self.bind(graph);

        let (Some(start_id), Some(goal_id)) = (graph.id_of(start), graph.id_of(goal)) else {
            log::debug!("search {start} -> {goal}: endpoint outside the graph");
            return None;
        };
        if graph.get(start_id).is_blocked() || graph.get(goal_id).is_blocked() {
            log::debug!("search {start} -> {goal}: endpoint is blocked");
            return None;
        }

        self.frontier.clear();
        self.explored.fill(false);
        self.in_frontier.fill(false);
        self.on_path.fill(false);
        graph.reset_nodes(&mut self.scratch);

        if start_id == goal_id {
            return Some(self.finish(graph, vec![start_id]));
        }

        self.scratch.node_mut(start_id).distance_traveled = 0.0;
        self.frontier.enqueue(FrontierEntry {
            priority: 0.0,
            node: start_id,
        });
        self.in_frontier[start_id.0] = true;

        let found = 'search: loop {
            if self.frontier.is_empty() {
                break 'search false;
            }
            let current = self.frontier.dequeue().node;
            self.in_frontier[current.0] = false;
            self.explored[current.0] = true;

            let current_point = graph.get(current).point();
            let current_distance = self.scratch.distance_traveled(current);

            for &next in graph.get(current).neighbors() {
                if self.explored[next.0] {
                    continue;
                }
                let next_point = graph.get(next).point();
                if !self.config.diagonals_walkable && cuts_corner(graph, current_point, next_point) {
                    continue;
                }

                let tentative = current_distance + graph.node_distance(current, next);
                let node = self.scratch.node_mut(next);
                if tentative < node.distance_traveled {
                    node.distance_traveled = tentative;
                    node.previous = Some(current);
                }

                if !self.in_frontier[next.0] {
                    let priority = tentative + graph.node_distance(next, goal_id) * self.config.goal_weight;
                    self.frontier.enqueue(FrontierEntry { priority, node: next });
                    self.in_frontier[next.0] = true;
                }
            }

            if self.in_frontier[goal_id.0] {
                break 'search true;
            }
        };

        if !found {
            log::debug!(
                "search {start} -> {goal}: no path, {} nodes explored",
                self.explored.iter().filter(|&&e| e).count()
            );
            return None;
        }

        let mut ids = Vec::new();
        let mut cursor = Some(goal_id);
        while let Some(id) = cursor {
            ids.push(id);
            cursor = self.scratch.previous(id);
        }
        ids.reverse();

        log::debug!("search {start} -> {goal}: {} nodes", ids.len());
        Some(self.finish(graph, ids))
    }

    /// Classify `p` according to the last search. Points outside the last
    /// searched graph are [`NodeKind::Untouched`].
    pub fn node_kind(&self, p: Point) -> NodeKind {
        let Some(i) = self.bound_range.index_of(p) else {
            return NodeKind::Untouched;
        };
        if self.on_path.get(i).copied().unwrap_or(false) {
            NodeKind::Path
        } else if self.in_frontier.get(i).copied().unwrap_or(false) {
            NodeKind::Frontier
        } else if self.explored.get(i).copied().unwrap_or(false) {
            NodeKind::Explored
        } else {
            NodeKind::Untouched
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Size the per-node buffers for `graph`, dropping state left over from a
    /// different graph or an older revision.
    fn bind(&mut self, graph: &Graph) {
        if self.explored.len() == graph.len()
            && self.bound_range == graph.range()
            && self.bound_revision == graph.revision()
        {
            return;
        }
        log::trace!(
            "pathfinder rebound to {} graph, revision {}",
            graph.range(),
            graph.revision()
        );
        self.bound_range = graph.range();
        self.bound_revision = graph.revision();
        for set in [&mut self.explored, &mut self.in_frontier, &mut self.on_path] {
            set.clear();
            set.resize(graph.len(), false);
        }
        self.frontier.clear();
        graph.reset_nodes(&mut self.scratch);
    }

    fn finish(&mut self, graph: &Graph, ids: Vec<NodeId>) -> Path {
        for id in &ids {
            self.on_path[id.0] = true;
        }
        let mut path = Path {
            nodes: ids.iter().map(|&id| graph.get(id).point()).collect(),
            vector_path: ids.iter().map(|&id| graph.get(id).position()).collect(),
        };
        for modifier in &self.modifiers {
            modifier.apply(&mut path);
        }
        path
    }
}

/// A diagonal step squeezes between two blocked orthogonal cells.
fn cuts_corner(graph: &Graph, from: Point, to: Point) -> bool {
    from.is_diagonal_to(to)
        && graph.is_blocked(Point::new(to.x, from.y))
        && graph.is_blocked(Point::new(from.x, to.y))
}
