//! Mapping between grid cells and world space.

use gridmind_core::{Point, Range, Vec2};

use crate::error::{PathError, PathResult};
use crate::occupancy::{NodeType, Occupancy};

/// A world-space rectangle of `width × height` centred on `center`, split
/// into `columns × rows` equal cells. Cell (0, 0) sits at the minimum corner.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridLayout {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
    pub columns: i32,
    pub rows: i32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            width: 10.0,
            height: 10.0,
            columns: 10,
            rows: 10,
        }
    }
}

impl GridLayout {
    /// Layout whose cells are `cell_size` wide and tall with cell (0, 0)
    /// centred on `cell_size / 2` on both axes.
    pub fn with_cell_size(columns: i32, rows: i32, cell_size: f32) -> Self {
        let width = columns as f32 * cell_size;
        let height = rows as f32 * cell_size;
        Self {
            center: Vec2::new(width / 2.0, height / 2.0),
            width,
            height,
            columns,
            rows,
        }
    }

    /// Reject layouts without any cell area.
    pub fn validate(&self) -> PathResult<()> {
        if self.columns <= 0 || self.rows <= 0 || self.width <= 0.0 || self.height <= 0.0 {
            return Err(PathError::InvalidLayout {
                columns: self.columns,
                rows: self.rows,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn cell_width(&self) -> f32 {
        self.width / self.columns as f32
    }

    #[inline]
    pub fn cell_height(&self) -> f32 {
        self.height / self.rows as f32
    }

    /// The cell rectangle `[0, columns) × [0, rows)`.
    #[inline]
    pub fn range(&self) -> Range {
        Range::with_size(self.columns, self.rows)
    }

    /// World-space minimum corner of the layout.
    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(
            self.center.x - self.width / 2.0,
            self.center.y - self.height / 2.0,
        )
    }

    /// World-space centre of cell `p`.
    pub fn node_position(&self, p: Point) -> Vec2 {
        let origin = self.origin();
        let (cw, ch) = (self.cell_width(), self.cell_height());
        Vec2::new(
            origin.x + cw / 2.0 + p.x as f32 * cw,
            origin.y + ch / 2.0 + p.y as f32 * ch,
        )
    }

    /// Cell containing world position `v`. The result may lie outside
    /// [`range`](Self::range).
    pub fn cell_at(&self, v: Vec2) -> Point {
        let local = v - self.origin();
        Point::new(
            (local.x / self.cell_width()).floor() as i32,
            (local.y / self.cell_height()).floor() as i32,
        )
    }

    /// Build occupancy by asking `is_obstructed(center, size)` about every
    /// cell box.
    pub fn sample(&self, is_obstructed: impl Fn(Vec2, Vec2) -> bool) -> Occupancy {
        let size = Vec2::new(self.cell_width(), self.cell_height());
        let mut occupancy = Occupancy::open(self.columns, self.rows);
        for p in self.range() {
            if is_obstructed(self.node_position(p), size) {
                occupancy.set(p, NodeType::Blocked);
            }
        }
        occupancy
    }
}
