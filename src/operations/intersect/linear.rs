//! Point and straight-line solvers.

use super::{Intersection, IntersectionState};
use crate::geometry::{Extent, Linear};
use crate::math::{cross_2d, Point2, Tolerance};

/// Two points intersect when they are equal within tolerance.
#[must_use]
pub fn point_point(a: &Point2, b: &Point2, tol: &Tolerance) -> Intersection {
    let mut out = Intersection::new();
    if tol.points_eq(a, b) {
        out.push(*a, tol);
    }
    out
}

/// Whether `p` lies on the carrier line of `l`, within tolerance.
fn on_carrier(p: &Point2, l: &Linear, tol: &Tolerance) -> bool {
    let offset = p - l.origin;
    let dist = cross_2d(&l.direction, &offset).abs() / l.direction.norm();
    let scale = p.coords.amax().max(l.origin.coords.amax());
    tol.is_negligible(dist, scale)
}

/// Point on a line, ray or segment.
#[must_use]
pub fn point_linear(p: &Point2, l: &Linear, tol: &Tolerance) -> Intersection {
    if l.is_degenerate(tol) {
        return point_point(p, &l.origin, tol);
    }
    let mut out = Intersection::new();
    if on_carrier(p, l, tol) && l.contains_param(l.project(p), tol) {
        out.push(*p, tol);
    }
    out
}

/// Parameter interval of `b` measured along `a`'s carrier.
fn interval_on(a: &Linear, b: &Linear) -> (f64, f64) {
    let t0 = a.project(&b.origin);
    let forward = a.direction.dot(&b.direction) > 0.0;
    match b.extent {
        Extent::Line => (f64::NEG_INFINITY, f64::INFINITY),
        Extent::Ray if forward => (t0, f64::INFINITY),
        Extent::Ray => (f64::NEG_INFINITY, t0),
        Extent::Segment => {
            let t1 = a.project(&b.end());
            (t0.min(t1), t0.max(t1))
        }
    }
}

/// Any pair of lines, rays and segments.
///
/// Parallel carriers give [`IntersectionState::PARALLEL`]. Collinear
/// extents sharing more than a point give [`IntersectionState::COINCIDENT`]
/// without points; extents touching at a single point report that point.
#[must_use]
pub fn linear_linear(a: &Linear, b: &Linear, tol: &Tolerance) -> Intersection {
    match (a.is_degenerate(tol), b.is_degenerate(tol)) {
        (true, true) => return point_point(&a.origin, &b.origin, tol),
        (true, false) => return point_linear(&a.origin, b, tol),
        (false, true) => return point_linear(&b.origin, a, tol),
        (false, false) => {}
    }

    let denom = cross_2d(&a.direction, &b.direction);
    if denom.abs() <= tol.epsilon * a.direction.norm() * b.direction.norm() {
        if !on_carrier(&b.origin, a, tol) {
            return Intersection::with_state(IntersectionState::PARALLEL);
        }
        let (a_lo, a_hi) = a.param_bounds();
        let (b_lo, b_hi) = interval_on(a, b);
        let lo = a_lo.max(b_lo);
        let hi = a_hi.min(b_hi);
        let slack = tol.param_slack();
        if lo > hi + slack {
            return Intersection::with_state(IntersectionState::PARALLEL);
        }
        if hi - lo <= slack {
            let mut out = Intersection::new();
            out.push(a.point_at(0.5 * (lo + hi)), tol);
            return out;
        }
        return Intersection::with_state(IntersectionState::COINCIDENT);
    }

    let w = b.origin - a.origin;
    let t = cross_2d(&w, &b.direction) / denom;
    let u = cross_2d(&w, &a.direction) / denom;
    let mut out = Intersection::new();
    if a.contains_param(t, tol) && b.contains_param(u, tol) {
        let (lo, hi) = a.param_bounds();
        out.push(a.point_at(t.clamp(lo, hi)), tol);
    }
    out
}
