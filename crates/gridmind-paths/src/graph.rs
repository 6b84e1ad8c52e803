//! The grid graph: an arena of nodes with precomputed neighbour lists.

use std::fmt;

use gridmind_core::{Point, Range, Vec2};

use crate::occupancy::{NodeType, Occupancy};
use crate::scratch::SearchScratch;

/// Index of a node in its [`Graph`]'s arena (`width * y + x`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which moves connect a cell to its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Connectivity {
    /// N, E, S, W.
    Four,
    /// The four cardinal moves plus the diagonals.
    #[default]
    Eight,
}

impl Connectivity {
    /// Neighbour offsets, clockwise starting from +Y.
    pub fn directions(self) -> &'static [Point] {
        const EIGHT: [Point; 8] = [
            Point::new(0, 1),
            Point::new(1, 1),
            Point::new(1, 0),
            Point::new(1, -1),
            Point::new(0, -1),
            Point::new(-1, -1),
            Point::new(-1, 0),
            Point::new(-1, 1),
        ];
        const FOUR: [Point; 4] = [
            Point::new(0, 1),
            Point::new(1, 0),
            Point::new(0, -1),
            Point::new(-1, 0),
        ];
        match self {
            Connectivity::Four => &FOUR,
            Connectivity::Eight => &EIGHT,
        }
    }
}

/// A single grid cell in the graph.
#[derive(Debug, Clone)]
pub struct Node {
    point: Point,
    kind: NodeType,
    position: Vec2,
    neighbors: Vec<NodeId>,
}

impl Node {
    /// Grid coordinate; the node's identity.
    #[inline]
    pub fn point(&self) -> Point {
        self.point
    }

    /// Open or blocked, as sampled.
    #[inline]
    pub fn kind(&self) -> NodeType {
        self.kind
    }

    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.kind.is_blocked()
    }

    /// World-space position assigned when the graph was built.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Adjacent open nodes. Always empty for blocked nodes.
    #[inline]
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }
}

/// A fixed-size grid of nodes.
///
/// Neighbour lists are computed once at construction and only change through
/// [`refresh`](Self::refresh), which rebuilds everything and bumps
/// [`revision`](Self::revision).
#[derive(Debug, Clone)]
pub struct Graph {
    range: Range,
    connectivity: Connectivity,
    nodes: Vec<Node>,
    revision: u32,
}

impl Graph {
    /// Build a graph from occupancy data. `position` assigns the world-space
    /// position of each cell.
    pub fn new(
        occupancy: &Occupancy,
        connectivity: Connectivity,
        position: impl Fn(Point) -> Vec2,
    ) -> Self {
        let mut graph = Self {
            range: occupancy.range(),
            connectivity,
            nodes: Vec::new(),
            revision: 0,
        };
        graph.build(occupancy, &position);
        graph
    }

    /// Rebuild all nodes and neighbour lists from fresh occupancy data.
    ///
    /// Pathfinders bound to the previous revision discard their per-search
    /// state on their next search.
    pub fn refresh(&mut self, occupancy: &Occupancy, position: impl Fn(Point) -> Vec2) {
        self.range = occupancy.range();
        self.build(occupancy, &position);
        self.revision = self.revision.wrapping_add(1);
        log::debug!(
            "graph rebuilt: {}x{}, revision {}",
            self.width(),
            self.height(),
            self.revision
        );
    }

    fn build(&mut self, occupancy: &Occupancy, position: &impl Fn(Point) -> Vec2) {
        self.nodes.clear();
        self.nodes.extend(self.range.iter().map(|p| Node {
            point: p,
            kind: occupancy.get(p).unwrap_or_default(),
            position: position(p),
            neighbors: Vec::new(),
        }));

        for i in 0..self.nodes.len() {
            if self.nodes[i].is_blocked() {
                continue;
            }
            let p = self.nodes[i].point;
            let neighbors: Vec<NodeId> = self
                .connectivity
                .directions()
                .iter()
                .filter_map(|&d| self.id_of(p + d))
                .filter(|id| !self.nodes[id.0].is_blocked())
                .collect();
            self.nodes[i].neighbors = neighbors;
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.range.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.range.height()
    }

    /// The cell rectangle covered by the graph.
    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    /// Moves used to build the neighbour lists.
    #[inline]
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Number of nodes (open and blocked).
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Incremented by every [`refresh`](Self::refresh).
    #[inline]
    pub fn revision(&self) -> u32 {
        self.revision
    }

    /// All nodes in row-major order.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Whether `(x, y)` lies inside the graph.
    #[inline]
    pub fn is_within_bounds(&self, x: i32, y: i32) -> bool {
        self.range.contains(Point::new(x, y))
    }

    /// Arena id of the cell at `p`, or `None` out of bounds.
    #[inline]
    pub fn id_of(&self, p: Point) -> Option<NodeId> {
        self.range.index_of(p).map(NodeId)
    }

    /// Node at `(x, y)`, or `None` out of bounds.
    #[inline]
    pub fn node(&self, x: i32, y: i32) -> Option<&Node> {
        self.node_at(Point::new(x, y))
    }

    /// Node at `p`, or `None` out of bounds.
    #[inline]
    pub fn node_at(&self, p: Point) -> Option<&Node> {
        self.id_of(p).map(|id| &self.nodes[id.0])
    }

    /// Node by arena id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this graph.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Whether `p` is inside the graph and blocked. Out-of-bounds cells are
    /// not considered blocked.
    #[inline]
    pub fn is_blocked(&self, p: Point) -> bool {
        self.node_at(p).is_some_and(Node::is_blocked)
    }

    /// Euclidean distance between the world positions of two nodes.
    #[inline]
    pub fn node_distance(&self, a: NodeId, b: NodeId) -> f32 {
        self.nodes[a.0].position.distance(self.nodes[b.0].position)
    }

    /// Clear every node's transient search state held in `scratch`.
    pub fn reset_nodes(&self, scratch: &mut SearchScratch) {
        scratch.reset(self.nodes.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_position(p: Point) -> Vec2 {
        Vec2::new(p.x as f32, p.y as f32)
    }

    fn points(graph: &Graph, ids: &[NodeId]) -> Vec<Point> {
        ids.iter().map(|&id| graph.get(id).point()).collect()
    }

    #[test]
    fn interior_node_has_eight_neighbors() {
        let graph = Graph::new(&Occupancy::open(3, 3), Connectivity::Eight, unit_position);
        let center = graph.node(1, 1).unwrap();
        assert_eq!(center.neighbors().len(), 8);
        assert_eq!(
            points(&graph, center.neighbors())[..3],
            [Point::new(1, 2), Point::new(2, 2), Point::new(2, 1)]
        );
    }

    #[test]
    fn four_connectivity_skips_diagonals() {
        let graph = Graph::new(&Occupancy::open(3, 3), Connectivity::Four, unit_position);
        let center = graph.node(1, 1).unwrap();
        assert_eq!(
            points(&graph, center.neighbors()),
            vec![
                Point::new(1, 2),
                Point::new(2, 1),
                Point::new(1, 0),
                Point::new(0, 1)
            ]
        );
    }

    #[test]
    fn corner_neighbors_are_clipped() {
        let graph = Graph::new(&Occupancy::open(3, 3), Connectivity::Eight, unit_position);
        assert_eq!(graph.node(0, 0).unwrap().neighbors().len(), 3);
        assert_eq!(graph.node(2, 1).unwrap().neighbors().len(), 5);
    }

    #[test]
    fn blocked_nodes_have_no_neighbors_and_are_never_neighbors() {
        let occ = Occupancy::parse(
            "
            ...
            .#.
            ...
            ",
        )
        .unwrap();
        let graph = Graph::new(&occ, Connectivity::Eight, unit_position);
        let blocked = graph.id_of(Point::new(1, 1)).unwrap();
        assert!(graph.get(blocked).neighbors().is_empty());
        for node in graph.nodes() {
            assert!(!node.neighbors().contains(&blocked));
        }
        assert_eq!(graph.node(0, 0).unwrap().neighbors().len(), 2);
    }

    #[test]
    fn node_lookup_out_of_bounds() {
        let graph = Graph::new(&Occupancy::open(4, 2), Connectivity::Eight, unit_position);
        assert!(graph.node(-1, 0).is_none());
        assert!(graph.node(4, 0).is_none());
        assert!(graph.node(0, 2).is_none());
        assert!(graph.is_within_bounds(3, 1));
        assert!(!graph.is_within_bounds(3, 2));
        assert_eq!(graph.node(3, 1).unwrap().point(), Point::new(3, 1));
    }

    #[test]
    fn distance_uses_world_positions() {
        // Cells twice as tall as they are wide.
        let graph = Graph::new(&Occupancy::open(3, 3), Connectivity::Eight, |p| {
            Vec2::new(p.x as f32, p.y as f32 * 2.0)
        });
        let a = graph.id_of(Point::new(0, 0)).unwrap();
        let b = graph.id_of(Point::new(0, 1)).unwrap();
        let c = graph.id_of(Point::new(1, 1)).unwrap();
        assert!((graph.node_distance(a, b) - 2.0).abs() < 1e-6);
        assert!((graph.node_distance(a, c) - 5f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn refresh_rebuilds_and_bumps_revision() {
        let mut graph = Graph::new(&Occupancy::open(3, 3), Connectivity::Eight, unit_position);
        assert_eq!(graph.revision(), 0);

        let occ = Occupancy::parse("##\n..").unwrap();
        graph.refresh(&occ, unit_position);

        assert_eq!(graph.revision(), 1);
        assert_eq!(graph.len(), 4);
        assert!(graph.is_blocked(Point::new(0, 0)));
        assert_eq!(graph.node(0, 1).unwrap().neighbors().len(), 1);
    }
}
