//! Occupancy grids: which cells can be walked on.

use gridmind_core::{Point, Range};

use crate::error::{PathError, PathResult};

/// Walkability of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeType {
    #[default]
    Open,
    Blocked,
}

impl NodeType {
    /// Raw value used by integer occupancy data (`0` open, `1` blocked).
    pub const fn value(self) -> i32 {
        match self {
            NodeType::Open => 0,
            NodeType::Blocked => 1,
        }
    }

    #[inline]
    pub fn is_blocked(self) -> bool {
        self == NodeType::Blocked
    }
}

impl TryFrom<i32> for NodeType {
    type Error = i32;

    fn try_from(v: i32) -> Result<Self, i32> {
        match v {
            0 => Ok(NodeType::Open),
            1 => Ok(NodeType::Blocked),
            other => Err(other),
        }
    }
}

/// A `width × height` grid of [`NodeType`]s, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occupancy {
    width: i32,
    height: i32,
    cells: Vec<NodeType>,
}

impl Occupancy {
    /// A fully open grid.
    pub fn open(width: i32, height: i32) -> Self {
        let (w, h) = (width.max(0), height.max(0));
        Self {
            width: w,
            height: h,
            cells: vec![NodeType::Open; (w * h) as usize],
        }
    }

    /// Build from raw row-major values, `0` = open and `1` = blocked.
    pub fn from_values(width: i32, height: i32, values: &[i32]) -> PathResult<Self> {
        let (w, h) = (width.max(0), height.max(0));
        let expected = (w * h) as usize;
        if values.len() != expected {
            return Err(PathError::DimensionMismatch {
                width: w,
                height: h,
                expected,
                actual: values.len(),
            });
        }

        let range = Range::with_size(w, h);
        let cells = values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                NodeType::try_from(value).map_err(|value| PathError::InvalidCell {
                    value,
                    at: range.point_at(i),
                })
            })
            .collect::<PathResult<Vec<_>>>()?;

        Ok(Self {
            width: w,
            height: h,
            cells,
        })
    }

    /// Parse a text map: one line per row (row 0 first), `.` open and `#`
    /// blocked. Surrounding whitespace on each line is ignored, as are empty
    /// lines.
    pub fn parse(text: &str) -> PathResult<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut cells = Vec::with_capacity(width * rows.len());

        for (y, row) in rows.iter().enumerate() {
            let len = row.chars().count();
            if len != width {
                return Err(PathError::RaggedRow {
                    row: y,
                    len,
                    expected: width,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let kind = match ch {
                    '.' => NodeType::Open,
                    '#' => NodeType::Blocked,
                    ch => {
                        return Err(PathError::InvalidChar {
                            ch,
                            at: Point::new(x as i32, y as i32),
                        });
                    }
                };
                cells.push(kind);
            }
        }

        Ok(Self {
            width: width as i32,
            height: rows.len() as i32,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The cell rectangle `[0, width) × [0, height)`.
    #[inline]
    pub fn range(&self) -> Range {
        Range::with_size(self.width, self.height)
    }

    /// Cell kind at `p`, or `None` out of bounds.
    pub fn get(&self, p: Point) -> Option<NodeType> {
        self.range().index_of(p).map(|i| self.cells[i])
    }

    /// Set the kind at `p`. Returns `false` if `p` is out of bounds.
    pub fn set(&mut self, p: Point, kind: NodeType) -> bool {
        match self.range().index_of(p) {
            Some(i) => {
                self.cells[i] = kind;
                true
            }
            None => false,
        }
    }

    /// Whether `p` is inside the grid and blocked.
    #[inline]
    pub fn is_blocked(&self, p: Point) -> bool {
        self.get(p).is_some_and(NodeType::is_blocked)
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_blocked()).count()
    }
}
