use super::linear::Linear;
use crate::math::Point2;

/// Segments joining consecutive points of a closed contour, including the
/// closing edge from the last point back to the first.
pub fn contour_edges(points: &[Point2]) -> impl Iterator<Item = Linear> + '_ {
    let n = points.len();
    (0..n).map(move |i| Linear::segment(points[i], points[(i + 1) % n]))
}

/// A triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Point2,
    pub b: Point2,
    pub c: Point2,
}

impl Triangle {
    #[must_use]
    pub fn new(a: Point2, b: Point2, c: Point2) -> Self {
        Self { a, b, c }
    }

    #[must_use]
    pub fn vertices(&self) -> [Point2; 3] {
        [self.a, self.b, self.c]
    }
}

/// An axis-aligned rectangle with `min ≤ max` component-wise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    min: Point2,
    max: Point2,
}

impl Rect {
    /// Creates the rectangle spanned by two opposite corners in any order.
    #[must_use]
    pub fn new(a: Point2, b: Point2) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    #[must_use]
    pub fn min(&self) -> Point2 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Point2 {
        self.max
    }

    /// Corners in counter-clockwise order starting at `min`.
    #[must_use]
    pub fn vertices(&self) -> [Point2; 4] {
        [
            self.min,
            Point2::new(self.max.x, self.min.y),
            self.max,
            Point2::new(self.min.x, self.max.y),
        ]
    }
}

/// A closed polygon contour; the last point connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub points: Vec<Point2>,
}

impl Polygon {
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    pub fn edges(&self) -> impl Iterator<Item = Linear> + '_ {
        contour_edges(&self.points)
    }
}

/// A set of contours filled by the even-odd rule: the first is usually the
/// outer boundary and the rest holes, but nesting is not required.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonWithHoles {
    pub contours: Vec<Polygon>,
}

impl PolygonWithHoles {
    #[must_use]
    pub fn new(contours: Vec<Polygon>) -> Self {
        Self { contours }
    }

    /// Edges of every contour in turn.
    pub fn edges(&self) -> impl Iterator<Item = Linear> + '_ {
        self.contours.iter().flat_map(Polygon::edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_normalizes_corners() {
        let r = Rect::new(Point2::new(3.0, -1.0), Point2::new(1.0, 2.0));
        assert_eq!(r.min(), Point2::new(1.0, -1.0));
        assert_eq!(r.max(), Point2::new(3.0, 2.0));
        assert_eq!(r.vertices()[1], Point2::new(3.0, -1.0));
    }

    #[test]
    fn polygon_edges_close_the_contour() {
        let poly = Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ]);
        let edges: Vec<_> = poly.edges().collect();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[2].origin, Point2::new(0.0, 1.0));
        assert_eq!(edges[2].end(), Point2::new(0.0, 0.0));
    }

    #[test]
    fn holes_contribute_edges() {
        let outer = Polygon::new(Rect::new(Point2::new(0.0, 0.0), Point2::new(4.0, 4.0)).vertices().to_vec());
        let hole = Polygon::new(Rect::new(Point2::new(1.0, 1.0), Point2::new(2.0, 2.0)).vertices().to_vec());
        let shape = PolygonWithHoles::new(vec![outer, hole]);
        assert_eq!(shape.edges().count(), 8);
    }
}
