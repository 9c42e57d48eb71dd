//! Scan-beam containment for polycurves.
//!
//! A ray is cast from the query point toward `x = +∞` and every edge counts
//! how often it crosses the ray. An edge end point counts as above the ray
//! only when its `y` is greater than the point's by more than the tolerance
//! (half-open rule), so a vertex shared by two edges is counted once even
//! when the edges evaluate it with different rounding.

use super::Inclusion;
use crate::geometry::{BezierCurve, CubicBezier, EllipticalArc, Linear, Polycurve, PolycurveEdge, QuadraticBezier};
use crate::math::{cross_2d, Point2, Tolerance, Vector2};
use crate::operations::intersect::conic::{linear_ellipse, point_arc};
use crate::operations::intersect::curve::point_bezier;
use crate::operations::intersect::linear::point_linear;
use crate::operations::intersect::IntersectionState;

/// Bisection steps on a y-monotone curve piece.
const BISECT_STEPS: usize = 64;

/// Outcome of testing one edge against the scan ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    /// Number of times the edge crosses the ray.
    Count(usize),
    /// The query point lies on the edge.
    Boundary,
}

/// Half-open side test shared by every edge type.
fn above(y: f64, p: &Point2, tol: &Tolerance) -> bool {
    y > p.y && !tol.is_negligible(y - p.y, y.abs().max(p.y.abs()))
}

/// An edge that can count its crossings with the ray from `p` toward
/// `x = +∞`.
pub trait ScanEdge {
    fn crossings(&self, p: &Point2, tol: &Tolerance) -> Crossing;
}

impl ScanEdge for Point2 {
    fn crossings(&self, p: &Point2, tol: &Tolerance) -> Crossing {
        if tol.points_eq(self, p) {
            Crossing::Boundary
        } else {
            Crossing::Count(0)
        }
    }
}

impl ScanEdge for Linear {
    fn crossings(&self, p: &Point2, tol: &Tolerance) -> Crossing {
        if !point_linear(p, self, tol).is_empty() {
            return Crossing::Boundary;
        }
        let (a, b) = (self.origin, self.end());
        if above(a.y, p, tol) == above(b.y, p, tol) {
            return Crossing::Count(0);
        }
        // The crossing is right of `p` when `p` is left of an upward edge or
        // right of a downward one.
        let det = cross_2d(&(b - a), &(p - a));
        Crossing::Count(usize::from((det > 0.0) == (b.y > a.y)))
    }
}

impl ScanEdge for QuadraticBezier {
    fn crossings(&self, p: &Point2, tol: &Tolerance) -> Crossing {
        bezier_crossings(&BezierCurve::from_quadratic(self), self.p0, self.p2, p, tol)
    }
}

impl ScanEdge for CubicBezier {
    fn crossings(&self, p: &Point2, tol: &Tolerance) -> Crossing {
        bezier_crossings(&BezierCurve::from_cubic(self), self.p0, self.p3, p, tol)
    }
}

/// Splits the curve into y-monotone pieces at the roots of `y'(t)` and
/// counts the pieces whose crossing lies right of `p`.
///
/// `start` and `end` are the control end points, used instead of `curve(0)`
/// and `curve(1)` so that shared vertices compare exactly like the
/// neighbouring edges see them.
fn bezier_crossings(curve: &BezierCurve, start: Point2, end: Point2, p: &Point2, tol: &Tolerance) -> Crossing {
    if !point_bezier(p, curve, tol).is_empty() {
        return Crossing::Boundary;
    }
    let slack = tol.param_slack();
    let mut breaks = vec![0.0];
    breaks.extend(
        curve
            .y
            .derivative()
            .roots_in_interval(0.0, 1.0, tol)
            .into_iter()
            .filter(|t| *t > slack && *t < 1.0 - slack),
    );
    breaks.push(1.0);

    let y_at = |t: f64| {
        if t <= 0.0 {
            start.y
        } else if t >= 1.0 {
            end.y
        } else {
            curve.y.eval(t)
        }
    };

    let mut count = 0;
    for w in breaks.windows(2) {
        let (mut lo, mut hi) = (w[0], w[1]);
        let lo_above = above(y_at(lo), p, tol);
        if lo_above == above(y_at(hi), p, tol) {
            continue;
        }
        for _ in 0..BISECT_STEPS {
            let mid = 0.5 * (lo + hi);
            if (curve.y.eval(mid) > p.y) == lo_above {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        if curve.x.eval(0.5 * (lo + hi)) > p.x {
            count += 1;
        }
    }
    Crossing::Count(count)
}

impl ScanEdge for EllipticalArc {
    fn crossings(&self, p: &Point2, tol: &Tolerance) -> Crossing {
        if !point_arc(p, self, tol).is_empty() {
            return Crossing::Boundary;
        }
        let ray = Linear::ray(*p, Vector2::new(1.0, 0.0));
        let hits = linear_ellipse(&ray, &self.ellipse, tol);
        let tangent = hits.has(IntersectionState::TANGENT);
        let full = self.is_full(tol);
        let (start, end) = (self.start(), self.end());

        let mut count = 0;
        for q in hits.points() {
            if q.x <= p.x || !self.accepts(q, tol) {
                continue;
            }
            // At an end point the arc crosses only if it leaves to the other
            // side of the ray than the end point itself sits on.
            let crosses = if !full && tol.points_eq(q, &start) {
                locally_above(self, true, p, tol) != above(start.y, p, tol)
            } else if !full && tol.points_eq(q, &end) {
                locally_above(self, false, p, tol) != above(end.y, p, tol)
            } else {
                !tangent
            };
            count += usize::from(crosses);
        }
        Crossing::Count(count)
    }
}

/// Whether the arc lies above the ray next to one of its end points.
fn locally_above(arc: &EllipticalArc, at_start: bool, p: &Point2, tol: &Tolerance) -> bool {
    let (u, sign) = if at_start { (0.0, 1.0) } else { (1.0, -1.0) };
    let theta = arc.start_angle + arc.sweep_angle * u;
    let e = &arc.ellipse;
    let (s, c) = theta.sin_cos();
    let (dx, dy) = (-e.rx * s, e.ry * c);
    let dir = Vector2::new(e.cos * dx - e.sin * dy, e.sin * dx + e.cos * dy) * (arc.sweep_angle * sign);
    if tol.is_negligible(dir.y, dir.norm()) {
        arc.point_at(0.5).y > p.y
    } else {
        dir.y > 0.0
    }
}

impl ScanEdge for PolycurveEdge {
    fn crossings(&self, p: &Point2, tol: &Tolerance) -> Crossing {
        match self {
            Self::Point(q) => q.crossings(p, tol),
            Self::Segment(l) => l.crossings(p, tol),
            Self::Quadratic(q) => q.crossings(p, tol),
            Self::Cubic(c) => c.crossings(p, tol),
            Self::Arc(a) => a.crossings(p, tol),
        }
    }
}

/// Even-odd containment in a polycurve, closing edge included.
#[must_use]
pub fn polycurve_inclusion(p: &Point2, pc: &Polycurve, tol: &Tolerance) -> Inclusion {
    let mut count = 0;
    for edge in pc.closed_edges(tol) {
        match edge.crossings(p, tol) {
            Crossing::Boundary => return Inclusion::Boundary,
            Crossing::Count(n) => count += n,
        }
    }
    Inclusion::from_parity(count % 2 == 1)
}
