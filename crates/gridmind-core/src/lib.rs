//! **gridmind-core**: geometry primitives for the *gridmind* crates.
//!
//! Grid cells are addressed with integer [`Point`]s inside half-open
//! [`Range`]s; world-space positions assigned to cells are [`Vec2`]s.

pub mod geom;

pub use geom::{Point, Range, RangeIter, Vec2};
