//! Connected components and their bounding boxes.

use serde::Serialize;

use crate::types::Point;

/// A maximal set of connected, non-transparent pixels.
///
/// Points are kept in discovery order; the first one is the seed found by
/// the row-major scan and serves as the component's anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    points: Vec<Point>,
}

impl Component {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// The seed point, used as the component's naming key.
    pub fn anchor(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest rectangle containing every point, or `None` when empty.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first = *self.points.first()?;
        let init = BoundingBox {
            min_row: first.row,
            max_row: first.row,
            min_col: first.col,
            max_col: first.col,
        };

        Some(self.points.iter().fold(init, |bbox, p| BoundingBox {
            min_row: bbox.min_row.min(p.row),
            max_row: bbox.max_row.max(p.row),
            min_col: bbox.min_col.min(p.col),
            max_col: bbox.max_col.max(p.col),
        }))
    }
}

/// Inclusive axis-aligned bounds of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub min_row: u32,
    pub max_row: u32,
    pub min_col: u32,
    pub max_col: u32,
}

impl BoundingBox {
    pub fn width(&self) -> u32 {
        self.max_col.saturating_sub(self.min_col) + 1
    }

    pub fn height(&self) -> u32 {
        self.max_row.saturating_sub(self.min_row) + 1
    }

    /// Translate a source point into box-local `(x, y)` coordinates.
    pub fn local(&self, point: Point) -> Option<(u32, u32)> {
        let x = point.col.checked_sub(self.min_col)?;
        let y = point.row.checked_sub(self.min_row)?;
        (x < self.width() && y < self.height()).then_some((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_is_first_point() {
        let c = Component::new(vec![Point::new(4, 2), Point::new(4, 3), Point::new(5, 1)]);
        assert_eq!(c.anchor(), Some(Point::new(4, 2)));
    }

    #[test]
    fn test_bounding_box() {
        let c = Component::new(vec![Point::new(4, 2), Point::new(4, 3), Point::new(6, 1)]);
        let bbox = c.bounding_box().unwrap();

        assert_eq!(
            bbox,
            BoundingBox {
                min_row: 4,
                max_row: 6,
                min_col: 1,
                max_col: 3,
            }
        );
        assert_eq!((bbox.width(), bbox.height()), (3, 3));
    }

    #[test]
    fn test_single_point_box_is_one_by_one() {
        let bbox = Component::new(vec![Point::new(7, 7)]).bounding_box().unwrap();
        assert_eq!((bbox.width(), bbox.height()), (1, 1));
        assert_eq!(bbox.local(Point::new(7, 7)), Some((0, 0)));
    }

    #[test]
    fn test_empty_component_has_no_box() {
        let c = Component::new(vec![]);
        assert!(c.is_empty());
        assert_eq!(c.anchor(), None);
        assert_eq!(c.bounding_box(), None);
    }

    #[test]
    fn test_local_outside_box() {
        let bbox = Component::new(vec![Point::new(2, 2), Point::new(3, 3)])
            .bounding_box()
            .unwrap();
        assert_eq!(bbox.local(Point::new(3, 2)), Some((0, 1)));
        assert_eq!(bbox.local(Point::new(1, 2)), None);
        assert_eq!(bbox.local(Point::new(2, 4)), None);
    }
}
