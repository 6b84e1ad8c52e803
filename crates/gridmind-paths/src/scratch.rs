use std::cmp::Ordering;

use crate::graph::NodeId;

// ---------------------------------------------------------------------------
// Per-node transient search state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub(crate) struct ScratchNode {
    pub(crate) distance_traveled: f32,
    pub(crate) previous: Option<NodeId>,
}

impl Default for ScratchNode {
    fn default() -> Self {
        Self {
            distance_traveled: f32::INFINITY,
            previous: None,
        }
    }
}

/// Transient per-node search state, kept outside the [`Graph`](crate::Graph)
/// so the graph itself stays immutable during a search.
///
/// Indexed by [`NodeId`]. Only meaningful during and right after a search.
#[derive(Debug, Clone, Default)]
pub struct SearchScratch {
    nodes: Vec<ScratchNode>,
}

impl SearchScratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resize to `len` nodes and reset every node to "unvisited".
    pub(crate) fn reset(&mut self, len: usize) {
        self.nodes.clear();
        self.nodes.resize(len, ScratchNode::default());
    }

    /// Best known cost from the start to `id` (+∞ when unvisited).
    #[inline]
    pub fn distance_traveled(&self, id: NodeId) -> f32 {
        self.nodes
            .get(id.0)
            .map_or(f32::INFINITY, |n| n.distance_traveled)
    }

    /// Back-reference used for path reconstruction.
    #[inline]
    pub fn previous(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.previous)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut ScratchNode {
        &mut self.nodes[id.0]
    }
}

// ---------------------------------------------------------------------------
// Frontier entry
// ---------------------------------------------------------------------------

/// A queued node, ordered by ascending `priority` for the min-heap.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FrontierEntry {
    pub(crate) priority: f32,
    pub(crate) node: NodeId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then(self.node.cmp(&other.node))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_marks_every_node_unvisited() {
        let mut scratch = SearchScratch::new();
        scratch.reset(4);
        {
            let n = scratch.node_mut(NodeId(2));
            n.distance_traveled = 3.0;
            n.previous = Some(NodeId(1));
        }
        assert_eq!(scratch.distance_traveled(NodeId(2)), 3.0);
        assert_eq!(scratch.previous(NodeId(2)), Some(NodeId(1)));

        scratch.reset(4);
        assert!(scratch.distance_traveled(NodeId(2)).is_infinite());
        assert_eq!(scratch.previous(NodeId(2)), None);
    }

    #[test]
    fn frontier_entries_order_by_priority() {
        let a = FrontierEntry {
            priority: 1.5,
            node: NodeId(9),
        };
        let b = FrontierEntry {
            priority: 2.0,
            node: NodeId(0),
        };
        assert!(a < b);
    }
}
