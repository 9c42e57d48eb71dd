use super::bezier::{CubicBezier, QuadraticBezier};
use super::conic::EllipticalArc;
use super::linear::Linear;
use crate::math::{Point2, Tolerance};

/// One edge of a [`Polycurve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PolycurveEdge {
    Point(Point2),
    Segment(Linear),
    Quadratic(QuadraticBezier),
    Cubic(CubicBezier),
    Arc(EllipticalArc),
}

impl PolycurveEdge {
    /// Straight edge between two points.
    #[must_use]
    pub fn segment(start: Point2, end: Point2) -> Self {
        Self::Segment(Linear::segment(start, end))
    }

    #[must_use]
    pub fn start(&self) -> Point2 {
        match self {
            Self::Point(p) => *p,
            Self::Segment(l) => l.origin,
            Self::Quadratic(q) => q.p0,
            Self::Cubic(c) => c.p0,
            Self::Arc(a) => a.start(),
        }
    }

    #[must_use]
    pub fn end(&self) -> Point2 {
        match self {
            Self::Point(p) => *p,
            Self::Segment(l) => l.end(),
            Self::Quadratic(q) => q.p2,
            Self::Cubic(c) => c.p3,
            Self::Arc(a) => a.end(),
        }
    }
}

/// A closed contour of mixed edges. When the last edge does not end where
/// the first starts, a straight closing edge joins them.
#[derive(Debug, Clone, PartialEq)]
pub struct Polycurve {
    pub edges: Vec<PolycurveEdge>,
}

impl Polycurve {
    #[must_use]
    pub fn new(edges: Vec<PolycurveEdge>) -> Self {
        Self { edges }
    }

    /// The implicit closing segment, if the contour is not already closed.
    #[must_use]
    pub fn closing_edge(&self, tol: &Tolerance) -> Option<PolycurveEdge> {
        let first = self.edges.first()?.start();
        let last = self.edges.last()?.end();
        (!tol.points_eq(&first, &last)).then(|| PolycurveEdge::segment(last, first))
    }

    /// Explicit edges followed by the closing segment, if any.
    pub fn closed_edges(&self, tol: &Tolerance) -> impl Iterator<Item = PolycurveEdge> + '_ {
        self.edges.iter().copied().chain(self.closing_edge(tol))
    }
}
