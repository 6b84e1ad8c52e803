//! Errors for rejected construction inputs.
//!
//! Searching never fails with an error: missing endpoints and unreachable
//! goals come back as `None`.

use thiserror::Error;

use gridmind_core::Point;

/// Errors produced by `gridmind-paths`.
#[derive(Debug, Error, PartialEq)]
pub enum PathError {
    #[error("occupancy has {actual} cells, expected {width}x{height} = {expected}")]
    DimensionMismatch {
        width: i32,
        height: i32,
        expected: usize,
        actual: usize,
    },

    #[error("unknown cell value {value} at {at}")]
    InvalidCell { value: i32, at: Point },

    #[error("unknown map character {ch:?} at {at}")]
    InvalidChar { ch: char, at: Point },

    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },

    #[error("grid layout needs a positive size, got {columns}x{rows} cells over {width}x{height}")]
    InvalidLayout {
        columns: i32,
        rows: i32,
        width: f32,
        height: f32,
    },

    #[error("layout is {columns}x{rows} cells but occupancy is {width}x{height}")]
    LayoutMismatch {
        columns: i32,
        rows: i32,
        width: i32,
        height: i32,
    },

    #[error("line-of-sight radius must be finite and non-negative, got {0}")]
    InvalidRadius(f32),
}

pub type PathResult<T> = Result<T, PathError>;
