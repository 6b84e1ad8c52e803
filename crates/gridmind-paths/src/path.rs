use gridmind_core::{Point, Vec2};

/// The result of a successful search.
///
/// `nodes` is the raw cell sequence from start to goal. `vector_path` starts
/// as the world positions of those cells and may be simplified by
/// [`Modifier`](crate::Modifier)s, so the two can differ in length.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    pub nodes: Vec<Point>,
    pub vector_path: Vec<Vec2>,
}

impl Path {
    /// Number of cells in the raw path.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Polyline length of `vector_path` in world units.
    pub fn length(&self) -> f32 {
        self.vector_path
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .sum()
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.nodes.first().copied()
    }

    #[inline]
    pub fn goal(&self) -> Option<Point> {
        self.nodes.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_sums_segments() {
        let path = Path {
            nodes: vec![Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)],
            vector_path: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(3.0, 4.0),
                Vec2::new(3.0, 6.0),
            ],
        };
        assert!((path.length() - 7.0).abs() < 1e-6);
        assert_eq!(path.start(), Some(Point::new(0, 0)));
        assert_eq!(path.goal(), Some(Point::new(1, 1)));
    }

    #[test]
    fn empty_path_has_zero_length() {
        let path = Path::default();
        assert!(path.is_empty());
        assert_eq!(path.length(), 0.0);
        assert_eq!(path.start(), None);
    }
}
