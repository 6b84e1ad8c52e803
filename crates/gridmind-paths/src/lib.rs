//! Grid pathfinding for game agents.
//!
//! Occupancy data becomes a [`Graph`] of cells with precomputed neighbour
//! lists. A [`Pathfinder`] runs a best-first search over it using a 4-ary
//! [`PriorityQueue`] and hands the raw [`Path`] to its [`Modifier`]s, such
//! as [`StringPullModifier`], which drops waypoints that are in line of sight
//! of each other.
//!
//! [`Seeker`] ties everything to world space: it owns a [`GridLayout`], the
//! graph built from it and a pathfinder, and answers queries between two
//! world positions.
//!
//! | Type | Role |
//! |---|---|
//! | [`Occupancy`] | open/blocked cells, from raw values, text or [`GridLayout::sample`] |
//! | [`Graph`] | node arena, neighbour lists, world positions |
//! | [`Pathfinder`] | search buffers, modifiers, last-search diagnostics |
//! | [`LineOfSight`] | visibility test used by string pulling |
//! | [`PathfindingConfig`] | layout, connectivity, search and smoothing settings |

mod config;
mod error;
mod graph;
mod heap;
mod layout;
mod modifier;
mod occupancy;
mod path;
mod pathfinder;
mod scratch;
mod seeker;
mod sight;

pub use config::{PathfindingConfig, SearchConfig, SmoothingConfig};
pub use error::{PathError, PathResult};
pub use graph::{Connectivity, Graph, Node, NodeId};
pub use heap::{ARITY, PriorityQueue};
pub use layout::GridLayout;
pub use modifier::{LineOfSight, Modifier, StringPullModifier};
pub use occupancy::{NodeType, Occupancy};
pub use path::Path;
pub use pathfinder::{NodeKind, Pathfinder};
pub use scratch::SearchScratch;
pub use seeker::Seeker;
pub use sight::GridLineOfSight;
