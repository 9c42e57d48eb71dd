//! Routing of arbitrary shape pairs to the primitive solvers.

use tracing::debug;

use super::aggregate::aggregate;
use super::conic::{
    arc_arc, circle_circle, conic_arc, ellipse_ellipse, linear_arc, linear_circle, linear_ellipse,
    point_arc, point_conic,
};
use super::curve::{bezier_arc, bezier_bezier, bezier_conic, bezier_linear, point_bezier};
use super::linear::{linear_linear, point_linear, point_point};
use super::Intersection;
use crate::error::{IntersectError, Result};
use crate::geometry::{BezierCurve, Circle, Ellipse, EllipticalArc, Linear, Shape, ShapeKind};
use crate::math::{Point2, Tolerance};

/// Shape pairs that are recognised but not solved yet. Order within a pair
/// does not matter.
pub const UNSUPPORTED_PAIRS: &[(ShapeKind, ShapeKind)] = &[(ShapeKind::Polycurve, ShapeKind::Polycurve)];

/// Whether [`intersect`] can solve the pair `(a, b)`.
#[must_use]
pub fn is_supported(a: ShapeKind, b: ShapeKind) -> bool {
    !UNSUPPORTED_PAIRS
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}

/// Solver-level view of a primitive shape. Variants are declared in
/// dispatch order.
enum Primitive {
    Point(Point2),
    Linear(Linear),
    Circle(Circle),
    Ellipse(Ellipse),
    Arc(EllipticalArc),
    Bezier(BezierCurve),
}

impl Primitive {
    fn from_shape(shape: &Shape) -> Option<Self> {
        let p = match shape {
            Shape::Point(p) => Self::Point(*p),
            Shape::Linear(l) => Self::Linear(*l),
            Shape::Circle(c) => Self::Circle(*c),
            Shape::Ellipse(e) => Self::Ellipse(*e),
            Shape::CircularArc(a) => Self::Arc(a.to_elliptical()),
            Shape::EllipticalArc(a) => Self::Arc(*a),
            Shape::QuadraticBezier(q) => Self::Bezier(BezierCurve::from_quadratic(q)),
            Shape::CubicBezier(c) => Self::Bezier(BezierCurve::from_cubic(c)),
            _ => return None,
        };
        Some(p)
    }
}

/// Solves a primitive pair. Each unordered pair has one arm with the lower
/// variant first; the mirrored order falls through to the last arm.
fn solve(a: &Primitive, b: &Primitive, tol: &Tolerance) -> Intersection {
    use Primitive as P;
    match (a, b) {
        (P::Point(p), P::Point(q)) => point_point(p, q, tol),
        (P::Point(p), P::Linear(l)) => point_linear(p, l, tol),
        (P::Point(p), P::Circle(c)) => point_conic(p, &c.to_ellipse(), tol),
        (P::Point(p), P::Ellipse(e)) => point_conic(p, e, tol),
        (P::Point(p), P::Arc(arc)) => point_arc(p, arc, tol),
        (P::Point(p), P::Bezier(c)) => point_bezier(p, c, tol),

        (P::Linear(l), P::Linear(m)) => linear_linear(l, m, tol),
        (P::Linear(l), P::Circle(c)) => linear_circle(l, c, tol),
        (P::Linear(l), P::Ellipse(e)) => linear_ellipse(l, e, tol),
        (P::Linear(l), P::Arc(arc)) => linear_arc(l, arc, tol),
        (P::Linear(l), P::Bezier(c)) => bezier_linear(c, l, tol),

        (P::Circle(c), P::Circle(d)) => circle_circle(c, d, tol),
        (P::Circle(c), P::Ellipse(e)) => ellipse_ellipse(&c.to_ellipse(), e, tol),
        (P::Circle(c), P::Arc(arc)) => conic_arc(&c.to_ellipse(), arc, tol),
        (P::Circle(c), P::Bezier(curve)) => bezier_conic(curve, &c.to_ellipse(), tol),

        (P::Ellipse(e), P::Ellipse(f)) => ellipse_ellipse(e, f, tol),
        (P::Ellipse(e), P::Arc(arc)) => conic_arc(e, arc, tol),
        (P::Ellipse(e), P::Bezier(curve)) => bezier_conic(curve, e, tol),

        (P::Arc(x), P::Arc(y)) => arc_arc(x, y, tol),
        (P::Arc(arc), P::Bezier(curve)) => bezier_arc(curve, arc, tol),

        (P::Bezier(x), P::Bezier(y)) => bezier_bezier(x, y, tol),

        (a, b) => solve(b, a, tol),
    }
}

/// Intersects every edge of `composite` with `other`.
fn solve_composite(composite: &Shape, other: &Shape, tol: &Tolerance) -> Intersection {
    let edges = composite.edges(tol).unwrap_or_default();
    aggregate(edges.iter().map(|edge| route(edge, other, tol)), tol)
}

fn route(a: &Shape, b: &Shape, tol: &Tolerance) -> Intersection {
    let (lo, hi) = if a.kind() <= b.kind() { (a, b) } else { (b, a) };
    match (Primitive::from_shape(lo), Primitive::from_shape(hi)) {
        (Some(x), Some(y)) => solve(&x, &y, tol),
        (Some(_), None) => solve_composite(hi, lo, tol),
        (None, _) => solve_composite(lo, hi, tol),
    }
}

/// Intersects two shapes of any supported kinds.
///
/// The pair is ordered by [`ShapeKind`] so that `intersect(a, b)` and
/// `intersect(b, a)` run the same solver. Composite shapes are reduced to
/// their edges and the per-edge results combined with [`aggregate`].
///
/// # Errors
///
/// Returns [`crate::error::GeometryError`] when either shape fails
/// validation and [`IntersectError::Unsupported`] for pairs listed in
/// [`UNSUPPORTED_PAIRS`].
pub fn intersect(a: &Shape, b: &Shape, tol: &Tolerance) -> Result<Intersection> {
    a.validate()?;
    b.validate()?;
    let (ka, kb) = (a.kind(), b.kind());
    if !is_supported(ka, kb) {
        debug!(a = %ka, b = %kb, "unsupported shape pair");
        return Err(IntersectError::Unsupported { a: ka, b: kb }.into());
    }
    debug!(a = %ka, b = %kb, "routing shape pair");
    Ok(route(a, b, tol))
}

/// Query object for [`intersect`].
pub struct ShapeIntersect<'a> {
    a: &'a Shape,
    b: &'a Shape,
    tolerance: Tolerance,
}

impl<'a> ShapeIntersect<'a> {
    /// Creates a new `ShapeIntersect` query with the default tolerance.
    #[must_use]
    pub fn new(a: &'a Shape, b: &'a Shape) -> Self {
        Self {
            a,
            b,
            tolerance: Tolerance::default(),
        }
    }

    /// Overrides the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// See [`intersect`].
    pub fn execute(&self) -> Result<Intersection> {
        intersect(self.a, self.b, &self.tolerance)
    }
}
