use gridmind_core::{Point, Vec2};

use crate::error::{PathError, PathResult};
use crate::layout::GridLayout;
use crate::modifier::LineOfSight;
use crate::occupancy::Occupancy;

/// Crossings closer than this (in segment parameter) go through a corner.
const CORNER_EPSILON: f32 = 1e-6;

/// Line of sight against an occupancy grid.
///
/// The segment is walked cell by cell, visiting every cell it enters. Where
/// it passes exactly through a cell corner, it is obstructed only if both
/// cells beside the corner are blocked, the same rule the search applies to
/// diagonal moves. With a positive `radius`, every cell within
/// `ceil(radius / cell size)` of a visited cell must be open too.
///
/// Cells outside the layout are treated as clear, matching
/// [`Graph::is_blocked`](crate::Graph::is_blocked).
#[derive(Debug, Clone)]
pub struct GridLineOfSight {
    layout: GridLayout,
    occupancy: Occupancy,
    radius: f32,
    reach: Point,
}

impl GridLineOfSight {
    pub fn new(layout: GridLayout, occupancy: Occupancy, radius: f32) -> PathResult<Self> {
        if !(radius >= 0.0 && radius.is_finite()) {
            return Err(PathError::InvalidRadius(radius));
        }
        let reach = Point::new(
            (radius / layout.cell_width()).ceil() as i32,
            (radius / layout.cell_height()).ceil() as i32,
        );
        Ok(Self {
            layout,
            occupancy,
            radius,
            reach,
        })
    }

    /// Clearance kept around the segment, in world units.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    fn obstructed(&self, cell: Point) -> bool {
        if self.reach == Point::ZERO {
            return self.occupancy.is_blocked(cell);
        }
        (-self.reach.y..=self.reach.y).any(|dy| {
            (-self.reach.x..=self.reach.x)
                .any(|dx| self.occupancy.is_blocked(Point::new(cell.x + dx, cell.y + dy)))
        })
    }

    /// `v` in cell units relative to the layout origin.
    fn cell_space(&self, v: Vec2) -> Vec2 {
        let local = v - self.layout.origin();
        Vec2::new(
            local.x / self.layout.cell_width(),
            local.y / self.layout.cell_height(),
        )
    }
}

impl LineOfSight for GridLineOfSight {
    fn is_clear(&self, from: Vec2, to: Vec2) -> bool {
        let a = self.cell_space(from);
        let b = self.cell_space(to);
        let mut cell = Point::new(a.x.floor() as i32, a.y.floor() as i32);
        let end = Point::new(b.x.floor() as i32, b.y.floor() as i32);
        if self.obstructed(cell) {
            return false;
        }

        let (step_x, mut next_x, delta_x) = axis(a.x, b.x - a.x);
        let (step_y, mut next_y, delta_y) = axis(a.y, b.y - a.y);

        while cell != end {
            if next_x.min(next_y) > 1.0 {
                break;
            }
            if (next_x - next_y).abs() <= CORNER_EPSILON {
                let beside_x = Point::new(cell.x + step_x, cell.y);
                let beside_y = Point::new(cell.x, cell.y + step_y);
                if self.obstructed(beside_x) && self.obstructed(beside_y) {
                    return false;
                }
                cell = Point::new(cell.x + step_x, cell.y + step_y);
                next_x += delta_x;
                next_y += delta_y;
            } else if next_x < next_y {
                cell.x += step_x;
                next_x += delta_x;
            } else {
                cell.y += step_y;
                next_y += delta_y;
            }
            if self.obstructed(cell) {
                return false;
            }
        }
        true
    }
}

/// Direction, parameter of the first cell boundary and parameter per cell
/// along one axis of a segment starting at `start` with extent `delta`.
fn axis(start: f32, delta: f32) -> (i32, f32, f32) {
    if delta > 0.0 {
        (1, (start.floor() + 1.0 - start) / delta, 1.0 / delta)
    } else if delta < 0.0 {
        (-1, (start - start.floor()) / -delta, -1.0 / delta)
    } else {
        (0, f32::INFINITY, f32::INFINITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sight(map: &str, radius: f32) -> GridLineOfSight {
        let occupancy = Occupancy::parse(map).unwrap();
        let layout = GridLayout::with_cell_size(occupancy.width(), occupancy.height(), 1.0);
        GridLineOfSight::new(layout, occupancy, radius).unwrap()
    }

    #[test]
    fn wall_blocks_sight() {
        let los = sight(
            "...
             .#.
             ...",
            0.0,
        );
        assert!(!los.is_clear(Vec2::new(0.5, 1.5), Vec2::new(2.5, 1.5)));
        assert!(!los.is_clear(Vec2::new(2.5, 1.5), Vec2::new(0.5, 1.5)));
        assert!(los.is_clear(Vec2::new(0.5, 0.5), Vec2::new(2.5, 0.5)));
    }

    #[test]
    fn pinched_corner_blocks_sight() {
        let los = sight(
            "...#..
             ..#...
             ......",
            0.0,
        );
        assert!(!los.is_clear(Vec2::new(0.5, 0.5), Vec2::new(5.5, 1.5)));
        assert!(!los.is_clear(Vec2::new(5.5, 1.5), Vec2::new(0.5, 0.5)));
        assert!(los.is_clear(Vec2::new(0.5, 2.5), Vec2::new(5.5, 2.5)));
    }

    #[test]
    fn grazing_one_blocked_corner_is_clear() {
        let los = sight(
            ".#
             ..",
            0.0,
        );
        assert!(los.is_clear(Vec2::new(0.5, 0.5), Vec2::new(1.5, 1.5)));
    }

    #[test]
    fn thin_clip_through_a_cell_blocks_sight() {
        let los = sight(
            ".#
             ..",
            0.0,
        );
        // Enters cell (1, 0) only for x in [1.0, 1.05].
        assert!(!los.is_clear(Vec2::new(0.5, 0.5), Vec2::new(1.6, 1.5)));
    }

    #[test]
    fn radius_keeps_clearance_from_walls() {
        let map = ".....
                   .....
                   ..#..";
        let (from, to) = (Vec2::new(0.5, 0.5), Vec2::new(4.5, 0.5));
        assert!(sight(map, 0.0).is_clear(from, to));
        assert!(sight(map, 0.5).is_clear(from, to));
        assert!(!sight(map, 1.5).is_clear(from, to));
    }

    #[test]
    fn outside_the_layout_is_clear() {
        let los = sight("..", 0.0);
        assert!(los.is_clear(Vec2::new(-3.0, 0.5), Vec2::new(0.5, 0.5)));
    }

    #[test]
    fn zero_length_segment_checks_its_cell() {
        let los = sight(".#", 0.0);
        assert!(los.is_clear(Vec2::new(0.5, 0.5), Vec2::new(0.5, 0.5)));
        assert!(!los.is_clear(Vec2::new(1.5, 0.5), Vec2::new(1.5, 0.5)));
    }

    #[test]
    fn rejects_negative_radius() {
        let occupancy = Occupancy::open(2, 2);
        let layout = GridLayout::with_cell_size(2, 2, 1.0);
        assert_eq!(
            GridLineOfSight::new(layout, occupancy, -1.0).unwrap_err(),
            PathError::InvalidRadius(-1.0)
        );
    }
}
