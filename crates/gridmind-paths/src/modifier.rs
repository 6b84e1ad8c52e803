//! Path post-processing.
//!
//! A [`Pathfinder`](crate::Pathfinder) runs its modifiers, in registration
//! order, over every path it returns.

use gridmind_core::Vec2;

use crate::path::Path;

/// A transform applied to a freshly found path.
pub trait Modifier {
    fn apply(&self, path: &mut Path);
}

/// Straight-line visibility test between two world positions.
pub trait LineOfSight {
    /// `true` when nothing obstructs the segment `from → to`.
    fn is_clear(&self, from: Vec2, to: Vec2) -> bool;
}

impl<F: Fn(Vec2, Vec2) -> bool> LineOfSight for F {
    fn is_clear(&self, from: Vec2, to: Vec2) -> bool {
        self(from, to)
    }
}

/// Removes waypoints that can be skipped without losing line of sight.
///
/// From each anchor the farthest visible waypoint is found by doubling the
/// look-ahead until a check fails, then binary searching between the last
/// success and the failure. The first and last points are always kept.
pub struct StringPullModifier<L> {
    los: L,
    enabled: bool,
}

impl<L: LineOfSight> StringPullModifier<L> {
    pub fn new(los: L) -> Self {
        Self { los, enabled: true }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn line_of_sight(&self) -> &L {
        &self.los
    }

    fn pull(&self, points: &[Vec2]) -> Vec<Vec2> {
        let mut out = Vec::with_capacity(points.len());
        let mut start = 0;

        while start < points.len() {
            let anchor = points[start];
            out.push(anchor);

            // Exponential look-ahead: `lo` is visible, `hi` is not (or is
            // past the end).
            let (mut lo, mut hi) = (1, 2);
            loop {
                let end = start + hi;
                if end >= points.len() {
                    hi = points.len() - start;
                    break;
                }
                if !self.los.is_clear(anchor, points[end]) {
                    break;
                }
                lo = hi;
                hi *= 2;
            }

            while lo + 1 < hi {
                let mid = (lo + hi) / 2;
                if self.los.is_clear(anchor, points[start + mid]) {
                    lo = mid;
                } else {
                    hi = mid;
                }
            }

            start += lo;
        }

        out
    }
}

impl<L: LineOfSight> Modifier for StringPullModifier<L> {
    fn apply(&self, path: &mut Path) {
        if !self.enabled || path.vector_path.len() < 2 {
            return;
        }

        let points = &path.vector_path;
        let (first, last) = (points[0], points[points.len() - 1]);

        let pulled = if self.los.is_clear(first, last) {
            vec![first, last]
        } else {
            self.pull(points)
        };

        log::trace!(
            "string pulling: {} -> {} waypoints",
            path.vector_path.len(),
            pulled.len()
        );
        path.vector_path = pulled;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use gridmind_core::Point;

    use super::*;

    fn straight_path(n: usize) -> Path {
        Path {
            nodes: (0..n as i32).map(|x| Point::new(x, 0)).collect(),
            vector_path: (0..n).map(|x| Vec2::new(x as f32, 0.0)).collect(),
        }
    }

    #[test]
    fn clear_path_collapses_to_endpoints() {
        let mut path = straight_path(6);
        StringPullModifier::new(|_: Vec2, _: Vec2| true).apply(&mut path);
        assert_eq!(path.vector_path, vec![Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0)]);
        assert_eq!(path.nodes.len(), 6);
    }

    #[test]
    fn nothing_visible_keeps_every_point() {
        let mut path = straight_path(5);
        // Only adjacent waypoints can see each other.
        let los = |a: Vec2, b: Vec2| a.distance(b) <= 1.0 + 1e-4;
        StringPullModifier::new(los).apply(&mut path);
        assert_eq!(path.vector_path.len(), 5);
    }

    #[test]
    fn pulls_to_farthest_visible_point() {
        // An L-shaped route; the corner at (4, 0) must stay.
        let vector_path = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 1.0),
            Vec2::new(4.0, 2.0),
        ];
        let mut path = Path {
            nodes: vec![Point::ZERO; vector_path.len()],
            vector_path,
        };
        // Visible only along a shared axis.
        let los = |a: Vec2, b: Vec2| a.x == b.x || a.y == b.y;
        StringPullModifier::new(los).apply(&mut path);
        assert_eq!(
            path.vector_path,
            vec![Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(4.0, 2.0)]
        );
    }

    #[test]
    fn endpoints_are_preserved_exactly() {
        let mut path = straight_path(9);
        path.vector_path[3].y = 0.5;
        let los = |a: Vec2, b: Vec2| (a.y - b.y).abs() < 0.25 && a.distance(b) < 3.5;
        StringPullModifier::new(los).apply(&mut path);
        assert_eq!(path.vector_path.first(), Some(&Vec2::new(0.0, 0.0)));
        assert_eq!(path.vector_path.last(), Some(&Vec2::new(8.0, 0.0)));
    }

    #[test]
    fn uses_fewer_checks_than_waypoints() {
        let checks = Cell::new(0usize);
        let los = |a: Vec2, b: Vec2| {
            checks.set(checks.get() + 1);
            // Blocked only when the segment spans the whole path.
            a.distance(b) < 60.0
        };
        let modifier = StringPullModifier::new(los);
        let mut path = straight_path(64);
        modifier.apply(&mut path);
        assert_eq!(path.vector_path.len(), 3);
        assert!(checks.get() < 32, "made {} checks", checks.get());
    }

    #[test]
    fn disabled_modifier_is_a_no_op() {
        let mut path = straight_path(4);
        let mut modifier = StringPullModifier::new(|_: Vec2, _: Vec2| true);
        modifier.set_enabled(false);
        modifier.apply(&mut path);
        assert_eq!(path.vector_path.len(), 4);
    }

    #[test]
    fn short_paths_are_untouched() {
        let mut path = straight_path(1);
        StringPullModifier::new(|_: Vec2, _: Vec2| false).apply(&mut path);
        assert_eq!(path.vector_path, vec![Vec2::ZERO]);
    }
}
