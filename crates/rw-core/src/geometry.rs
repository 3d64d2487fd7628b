//! Plane geometry for room layout
//!
//! Points on an integer grid, axis-aligned rectangles, and the lazy
//! boundary walk used to find the closest cells of two rooms.

use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

/// A position on the layout canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`, floored to a whole number.
    ///
    /// Truncates rather than rounds: (0,0) to (1,1) is 1, not 1.414.
    pub fn distance_to(&self, other: &Point) -> u32 {
        let dx = (i64::from(self.x) - i64::from(other.x)) as f64;
        let dy = (i64::from(self.y) - i64::from(other.y)) as f64;
        (dx * dx + dy * dy).sqrt().floor() as u32
    }

    /// Offset by (dx, dy)
    pub fn offset(&self, dx: i32, dy: i32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn as_tuple(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// An axis-aligned rectangle of grid cells
///
/// `origin` is the top-left cell; the rectangle covers
/// `origin.x ..= right()` and `origin.y ..= bottom()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle anchored at its top-left cell
    pub fn new(origin: Point, width: u32, height: u32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// Create a rectangle whose center cell is `center`
    ///
    /// For even sizes the center sits just below and right of the middle.
    pub fn centered_on(center: Point, width: u32, height: u32) -> Self {
        let origin = center.offset(-((width / 2) as i32), -((height / 2) as i32));
        Self::new(origin, width, height)
    }

    pub fn left(&self) -> i32 {
        self.origin.x
    }

    pub fn top(&self) -> i32 {
        self.origin.y
    }

    /// Rightmost column (inclusive)
    pub fn right(&self) -> i32 {
        self.origin.x + self.width as i32 - 1
    }

    /// Bottom row (inclusive)
    pub fn bottom(&self) -> i32 {
        self.origin.y + self.height as i32 - 1
    }

    /// Center cell, rounded toward the origin
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + (self.width / 2) as i32,
            self.origin.y + (self.height / 2) as i32,
        )
    }

    /// Check if the rectangle has positive area
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Check if a cell lies inside this rectangle
    pub fn contains(&self, p: &Point) -> bool {
        self.is_valid()
            && p.x >= self.left()
            && p.x <= self.right()
            && p.y >= self.top()
            && p.y <= self.bottom()
    }

    /// Lazily walk the boundary cells of this rectangle
    pub fn periphery(&self) -> Periphery {
        Periphery::new(*self)
    }
}

/// Boundary cells of a [`Rect`], each emitted exactly once
///
/// Order: the whole top row, the whole bottom row, then the interior of
/// the left column and the interior of the right column. Thin rectangles
/// collapse: a single row is emitted once, and a single column has no
/// separate right side.
///
/// The iterator is `Clone`, so a walk can be restarted from any point.
#[derive(Debug, Clone)]
pub struct Periphery {
    rect: Rect,
    index: u32,
    len: u32,
}

impl Periphery {
    fn new(rect: Rect) -> Self {
        let len = Self::boundary_len(&rect);
        Self {
            rect,
            index: 0,
            len,
        }
    }

    fn boundary_len(rect: &Rect) -> u32 {
        let (w, h) = (rect.width, rect.height);
        match (w, h) {
            (0, _) | (_, 0) => 0,
            (_, 1) => w,
            (1, _) => h,
            _ => 2 * w + 2 * (h - 2),
        }
    }

    fn point_at(&self, i: u32) -> Point {
        let r = &self.rect;
        let w = r.width;
        if i < w {
            return Point::new(r.left() + i as i32, r.top());
        }
        let i = i - w;
        if i < w {
            return Point::new(r.left() + i as i32, r.bottom());
        }
        let i = i - w;
        let sides = r.height - 2;
        if i < sides {
            Point::new(r.left(), r.top() + 1 + i as i32)
        } else {
            Point::new(r.right(), r.top() + 1 + (i - sides) as i32)
        }
    }
}

impl Iterator for Periphery {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.index >= self.len {
            return None;
        }
        let p = self.point_at(self.index);
        self.index += 1;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.len - self.index) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Periphery {}

impl FusedIterator for Periphery {}

/// Closest pair of boundary cells between two rectangles
///
/// Returns `(distance, cell_on_a, cell_on_b)`; the first pair found wins
/// ties. This compares every boundary cell of `a` with every boundary cell
/// of `b`, O(perimeter_a * perimeter_b), so keep it to small rooms.
/// Returns `None` if either rectangle is empty.
pub fn nearest_point(a: &Rect, b: &Rect) -> Option<(u32, Point, Point)> {
    let mut best: Option<(u32, Point, Point)> = None;
    for mine in a.periphery() {
        for yours in b.periphery() {
            let d = mine.distance_to(&yours);
            if best.is_none_or(|(bd, _, _)| d < bd) {
                best = Some((d, mine, yours));
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashSet;

    #[test]
    fn test_distance_exact_and_floored() {
        assert_eq!(Point::new(0, 0).distance_to(&Point::new(3, 4)), 5);
        assert_eq!(Point::new(0, 0).distance_to(&Point::new(1, 1)), 1);
        assert_eq!(Point::new(5, 5).distance_to(&Point::new(5, 5)), 0);
        assert_eq!(Point::new(-3, 0).distance_to(&Point::new(0, -4)), 5);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Point::new(12, -7);
        let b = Point::new(-40, 19);
        assert_eq!(a.distance_to(&b), b.distance_to(&a));
    }

    #[test]
    fn test_point_value_equality() {
        let mut set = HashSet::new();
        set.insert(Point::new(1, 2));
        set.insert(Point::from((1, 2)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_periphery_two_by_five() {
        let r = Rect::new(Point::new(0, 0), 2, 5);
        let got: Vec<Point> = r.periphery().collect();
        let expected: HashSet<Point> = [
            (0, 0),
            (1, 0),
            (0, 1),
            (1, 1),
            (0, 2),
            (1, 2),
            (0, 3),
            (1, 3),
            (0, 4),
            (1, 4),
        ]
        .into_iter()
        .map(Point::from)
        .collect();
        assert_eq!(got.len(), 10);
        assert_eq!(got.into_iter().collect::<HashSet<_>>(), expected);
    }

    #[test]
    fn test_periphery_three_by_three_skips_center() {
        let r = Rect::new(Point::new(0, 0), 3, 3);
        let p: Vec<Point> = r.periphery().collect();
        assert_eq!(p.len(), 8);
        assert!(!p.contains(&Point::new(1, 1)));
    }

    #[test]
    fn test_periphery_ten_by_ten() {
        let r = Rect::new(Point::new(0, 0), 10, 10);
        let p: HashSet<Point> = r.periphery().collect();
        assert_eq!(p.len(), 10 + 2 * 8 + 10);
        assert!(p.contains(&Point::new(0, 1)));
    }

    #[test]
    fn test_periphery_order() {
        let r = Rect::new(Point::new(10, 20), 3, 4);
        let p: Vec<(i32, i32)> = r.periphery().map(|p| p.as_tuple()).collect();
        assert_eq!(
            p,
            vec![
                (10, 20),
                (11, 20),
                (12, 20),
                (10, 23),
                (11, 23),
                (12, 23),
                (10, 21),
                (10, 22),
                (12, 21),
                (12, 22),
            ]
        );
    }

    #[test]
    fn test_periphery_thin_rects() {
        let one = Rect::new(Point::new(4, 4), 1, 1);
        assert_eq!(one.periphery().collect::<Vec<_>>(), vec![Point::new(4, 4)]);

        let column = Rect::new(Point::new(0, 0), 1, 4);
        let col: HashSet<Point> = column.periphery().collect();
        assert_eq!(column.periphery().len(), 4);
        assert_eq!(col.len(), 4);

        let row = Rect::new(Point::new(0, 0), 4, 1);
        assert_eq!(row.periphery().count(), 4);

        let flat = Rect::new(Point::new(0, 0), 5, 2);
        assert_eq!(flat.periphery().count(), 10);
    }

    #[test]
    fn test_periphery_is_restartable() {
        let r = Rect::new(Point::new(0, 0), 4, 4);
        let mut walk = r.periphery();
        walk.next();
        let resumed = walk.clone();
        assert_eq!(walk.count(), 11);
        assert_eq!(resumed.len(), 11);
        assert_eq!(r.periphery().count(), 12);
    }

    #[test]
    fn test_centered_on() {
        let r = Rect::centered_on(Point::new(10, 10), 4, 4);
        assert_eq!(r.origin, Point::new(8, 8));
        assert_eq!(r.center(), Point::new(10, 10));
        let odd = Rect::centered_on(Point::new(10, 10), 5, 3);
        assert_eq!(odd.origin, Point::new(8, 9));
        assert!(odd.contains(&Point::new(10, 10)));
    }

    #[test]
    fn test_nearest_point_between_rooms() {
        let a = Rect::new(Point::new(0, 0), 3, 3);
        let b = Rect::new(Point::new(6, 0), 3, 3);
        let (d, pa, pb) = nearest_point(&a, &b).unwrap();
        assert_eq!(d, 4);
        assert_eq!(pa.x, 2);
        assert_eq!(pb.x, 6);
        assert_eq!(pa.y, pb.y);
    }

    #[test]
    fn test_nearest_point_overlapping_is_zero() {
        let a = Rect::new(Point::new(0, 0), 5, 5);
        let b = Rect::new(Point::new(4, 4), 5, 5);
        let (d, pa, pb) = nearest_point(&a, &b).unwrap();
        assert_eq!(d, 0);
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_nearest_point_empty_rect() {
        let a = Rect::new(Point::new(0, 0), 0, 5);
        let b = Rect::new(Point::new(4, 4), 5, 5);
        assert!(nearest_point(&a, &b).is_none());
    }
}
