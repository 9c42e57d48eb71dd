use tracing::debug;

use super::polycurve::polycurve_inclusion;
use super::polygon::{
    ellipse_inclusion, polygon_inclusion, polygon_with_holes_inclusion, rect_inclusion, triangle_inclusion,
};
use super::Inclusion;
use crate::error::{GeometryError, Result};
use crate::geometry::{Ellipse, Shape};
use crate::math::{all_finite, Point2, Tolerance};
use crate::operations::intersect::intersect;

/// A filled conic; one with a vanishing radius only contains its center.
fn conic_inclusion(p: &Point2, e: &Ellipse, tol: &Tolerance) -> Inclusion {
    if e.is_degenerate(tol) {
        if tol.points_eq(p, &e.center) {
            Inclusion::Boundary
        } else {
            Inclusion::Outside
        }
    } else {
        ellipse_inclusion(p, e, tol)
    }
}

/// Classifies a point against any shape.
///
/// Closed shapes report their interior as [`Inclusion::Inside`]. Open
/// shapes (points, lines, arcs, curves) have no interior: the point is
/// either on them or outside.
///
/// # Errors
///
/// Returns [`GeometryError`] when the point is not finite or the shape
/// fails validation.
pub fn classify_point(p: &Point2, shape: &Shape, tol: &Tolerance) -> Result<Inclusion> {
    if !all_finite([p]) {
        return Err(GeometryError::NonFinite("point").into());
    }
    shape.validate()?;
    let inclusion = match shape {
        Shape::Circle(c) => conic_inclusion(p, &c.to_ellipse(), tol),
        Shape::Ellipse(e) => conic_inclusion(p, e, tol),
        Shape::Triangle(t) => triangle_inclusion(p, t, tol),
        Shape::Rectangle(r) => rect_inclusion(p, r, tol),
        Shape::Polygon(poly) => polygon_inclusion(p, poly, tol),
        Shape::PolygonWithHoles(poly) => polygon_with_holes_inclusion(p, poly, tol),
        Shape::Polycurve(pc) => polycurve_inclusion(p, pc, tol),
        open => {
            if intersect(&Shape::Point(*p), open, tol)?.is_empty() {
                Inclusion::Outside
            } else {
                Inclusion::Boundary
            }
        }
    };
    debug!(shape = %shape.kind(), ?inclusion, "classified point");
    Ok(inclusion)
}

/// Query object for [`classify_point`].
pub struct PointInShape<'a> {
    point: Point2,
    shape: &'a Shape,
    tolerance: Tolerance,
}

impl<'a> PointInShape<'a> {
    /// Creates a new `PointInShape` query with the default tolerance.
    #[must_use]
    pub fn new(point: Point2, shape: &'a Shape) -> Self {
        Self {
            point,
            shape,
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
    /// See [`classify_point`].
    pub fn execute(&self) -> Result<Inclusion> {
        classify_point(&self.point, self.shape, &self.tolerance)
    }
}
