//! Grid coordinates.

use std::fmt;

use serde::Serialize;

/// A pixel coordinate, addressed row first.
///
/// Ordering is row-major, which is also the order the extractor discovers
/// component anchors in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Point {
    pub row: u32,
    pub col: u32,
}

impl Point {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Offset this point, returning `None` if either coordinate would go negative.
    pub fn offset(self, d_row: i32, d_col: i32) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_within_range() {
        assert_eq!(Point::new(2, 3).offset(-1, 1), Some(Point::new(1, 4)));
    }

    #[test]
    fn test_offset_below_zero() {
        assert_eq!(Point::new(0, 3).offset(-1, 0), None);
        assert_eq!(Point::new(3, 0).offset(0, -1), None);
    }

    #[test]
    fn test_row_major_ordering() {
        let mut points = vec![Point::new(1, 0), Point::new(0, 5), Point::new(0, 1)];
        points.sort();
        assert_eq!(
            points,
            vec![Point::new(0, 1), Point::new(0, 5), Point::new(1, 0)]
        );
    }
}
