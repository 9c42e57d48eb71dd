//! Solvers involving quadratic and cubic Bézier curves.
//!
//! Curves against lines and conics substitute the parametrization into the
//! implicit form of the other shape. Curve pairs eliminate one parameter
//! with a Bezout resultant and recover the other by root matching.

use tracing::{debug, trace};

use super::linear::point_point;
use super::{Intersection, IntersectionState};
use crate::geometry::{BezierCurve, Ellipse, EllipticalArc, Extent, Linear};
use crate::math::resultant::bezout_resultant;
use crate::math::{cross_2d, Point2, Polynomial, Tolerance, Vector2};

/// Threshold under which a coordinate polynomial counts as identically
/// zero.
fn zero_threshold(curve: &BezierCurve, tol: &Tolerance) -> f64 {
    tol.epsilon * curve.scale().max(1.0)
}

/// Actual degree of a curve once vanishing leading terms are dropped.
fn effective_degree(curve: &BezierCurve, tol: &Tolerance) -> usize {
    let zero = zero_threshold(curve, tol);
    let degree = |p: &Polynomial| {
        let mut p = p.trimmed(tol.epsilon);
        while p.degree() > 0 && p.leading().abs() <= zero {
            p = Polynomial::new(p.coeffs()[..p.degree()].iter().copied());
        }
        p.degree()
    };
    degree(&curve.x).max(degree(&curve.y))
}

/// Parameter `t ∈ [0, 1]` at which `curve` passes through `p`.
///
/// `x(t) = p.x` and `y(t) = p.y` are solved independently and a pair of
/// roots closer than `window` is accepted. A coordinate that is constant and
/// equal to the target imposes no constraint.
fn match_parameter(curve: &BezierCurve, p: &Point2, window: f64, tol: &Tolerance) -> Option<f64> {
    let zero = zero_threshold(curve, tol);
    let fx = &curve.x - &Polynomial::constant(p.x);
    let fy = &curve.y - &Polynomial::constant(p.y);
    let free_x = fx.is_zero(zero);
    let free_y = fy.is_zero(zero);
    match (free_x, free_y) {
        (true, true) => Some(0.0),
        (true, false) => fy.roots_in_interval(0.0, 1.0, tol).first().copied(),
        (false, true) => fx.roots_in_interval(0.0, 1.0, tol).first().copied(),
        (false, false) => {
            let tx = fx.roots_in_interval(0.0, 1.0, tol);
            let ty = fy.roots_in_interval(0.0, 1.0, tol);
            tx.iter()
                .flat_map(|a| ty.iter().map(move |b| (*a, *b)))
                .filter(|(a, b)| (a - b).abs() <= window)
                .min_by(|x, y| (x.0 - x.1).abs().total_cmp(&(y.0 - y.1).abs()))
                .map(|(a, b)| 0.5 * (a + b))
        }
    }
}

/// Whether two tangent directions are parallel within `window`.
fn tangential(a: &Vector2, b: &Vector2, window: f64) -> bool {
    cross_2d(a, b).abs() <= window * a.norm() * b.norm()
}

/// Point on a Bézier curve.
#[must_use]
pub fn point_bezier(p: &Point2, curve: &BezierCurve, tol: &Tolerance) -> Intersection {
    let mut out = Intersection::new();
    let window = tol.root_match(curve.degree(), 1);
    if match_parameter(curve, p, window, tol).is_some() {
        out.push(*p, tol);
    }
    out
}

/// Bézier curve against a line, ray or segment.
#[must_use]
pub fn bezier_linear(curve: &BezierCurve, l: &Linear, tol: &Tolerance) -> Intersection {
    if l.is_degenerate(tol) {
        return point_bezier(&l.origin, curve, tol);
    }
    let (n, c) = l.implicit();
    let poly = &(&(&curve.x * n.x) + &(&curve.y * n.y)) + &Polynomial::constant(c);
    let scale = curve.scale().max(l.origin.coords.amax());
    let window = tol.root_match(curve.degree(), 1);

    let mut out = Intersection::new();
    if poly.is_zero(tol.epsilon * n.norm() * scale.max(1.0)) {
        out.state.insert(IntersectionState::COINCIDENT);
        for p in [curve.start(), curve.end()] {
            if l.contains_param(l.project(&p), tol) {
                out.push(p, tol);
            }
        }
        if l.extent == Extent::Segment {
            for p in [l.origin, l.end()] {
                if match_parameter(curve, &p, window, tol).is_some() {
                    out.push(p, tol);
                }
            }
        }
        return out;
    }

    let hodograph = curve.derivative();
    for t in poly.roots_in_interval(0.0, 1.0, tol) {
        let p = curve.eval(t);
        if !l.contains_param(l.project(&p), tol) {
            continue;
        }
        let d = hodograph.eval(t).coords;
        if tangential(&d, &l.direction, window) {
            out.state.insert(IntersectionState::TANGENT);
        }
        out.push(p, tol);
    }
    out
}

/// Bézier curve against a full circle or ellipse.
#[must_use]
pub fn bezier_conic(curve: &BezierCurve, e: &Ellipse, tol: &Tolerance) -> Intersection {
    if e.is_degenerate(tol) {
        return Intersection::with_state(IntersectionState::OUTSIDE);
    }
    let conic = e.implicit();
    let poly = conic.substitute(&curve.x, &curve.y);
    let window = tol.root_match(curve.degree(), 2);

    let mut out = Intersection::new();
    if poly.is_zero(tol.epsilon * conic.magnitude() * curve.scale().max(1.0).powi(2)) {
        return Intersection::with_state(IntersectionState::COINCIDENT);
    }
    let hodograph = curve.derivative();
    for t in poly.roots_in_interval(0.0, 1.0, tol) {
        let p = curve.eval(t);
        let d = hodograph.eval(t).coords;
        let g = conic.gradient(&p);
        if g.dot(&d).abs() <= window * g.norm() * d.norm() {
            out.state.insert(IntersectionState::TANGENT);
        }
        out.push(p, tol);
    }
    if out.is_empty() {
        out.state = if e.level(&curve.start()) < 0.0 {
            IntersectionState::INSIDE
        } else {
            IntersectionState::OUTSIDE
        };
    }
    out
}

/// Bézier curve against an arc.
#[must_use]
pub fn bezier_arc(curve: &BezierCurve, arc: &EllipticalArc, tol: &Tolerance) -> Intersection {
    let mut out = bezier_conic(curve, &arc.ellipse, tol);
    if !out.has(IntersectionState::COINCIDENT) {
        out.retain(|p| arc.accepts(p, tol));
    }
    out
}

/// Bézier curve against Bézier curve.
///
/// With `f = xA(t) − xB(s)` and `g = yA(t) − yB(s)` viewed as polynomials in
/// `t` whose coefficients are polynomials in `s`, the Bezout resultant is a
/// polynomial in `s` of degree `deg A · deg B`. Each root `s ∈ [0, 1]` gives
/// a candidate `B(s)`, kept when `A` passes through it.
///
/// Both curves are first mapped into a frame where `A` starts at the origin
/// and the largest coefficient is one, so the thresholds below do not depend
/// on where the curves sit or how large they are.
#[must_use]
pub fn bezier_bezier(a: &BezierCurve, b: &BezierCurve, tol: &Tolerance) -> Intersection {
    let origin = a.start();
    let factor = a.spread(&origin).max(b.spread(&origin));
    if factor == 0.0 {
        return point_point(&a.start(), &b.start(), tol);
    }
    let ua = a.normalized(&origin, factor);
    let ub = b.normalized(&origin, factor);
    let on = |p: &Point2, unit: &BezierCurve, curve: &BezierCurve| -> Intersection {
        let mut out = Intersection::new();
        if !point_bezier(p, unit, tol).is_empty() {
            out.push(curve.eval(0.0), tol);
        }
        out
    };

    let da = effective_degree(&ua, tol);
    let db = effective_degree(&ub, tol);
    if da == 0 && db == 0 {
        return point_point(&a.start(), &b.start(), tol);
    }
    if da == 0 {
        return on(&ua.start(), &ub, a);
    }
    if db == 0 {
        return on(&ub.start(), &ua, b);
    }

    let coefficients = |pa: &Polynomial, pb: &Polynomial| -> Vec<Polynomial> {
        (0..=da)
            .map(|i| {
                let c = Polynomial::constant(pa.coeff(i));
                if i == 0 {
                    &c - pb
                } else {
                    c
                }
            })
            .collect()
    };
    let f = coefficients(&ua.x, &ub.x);
    let g = coefficients(&ua.y, &ub.y);
    let resultant = bezout_resultant(&f, &g);
    debug!(
        degree_a = da,
        degree_b = db,
        degree = resultant.trimmed(tol.epsilon).degree(),
        "built elimination polynomial"
    );

    // The resultant is homogeneous of degree `da` in the coefficients of
    // each of `f` and `g`.
    let magnitude = |ps: &[Polynomial]| ps.iter().fold(0.0_f64, |m, p| m.max(p.magnitude()));
    let reference = (magnitude(&f) * magnitude(&g)).powi(i32::try_from(da).unwrap_or(i32::MAX));
    let window = tol.root_match(da, db);

    let mut out = Intersection::new();
    if resultant.magnitude() <= tol.param_slack() * reference {
        out.state.insert(IntersectionState::COINCIDENT);
        for t in [0.0, 1.0] {
            if match_parameter(&ua, &ub.eval(t), window, tol).is_some() {
                out.push(b.eval(t), tol);
            }
            if match_parameter(&ub, &ua.eval(t), window, tol).is_some() {
                out.push(a.eval(t), tol);
            }
        }
        return out;
    }

    let (ha, hb) = (ua.derivative(), ub.derivative());
    for s in resultant.roots_in_interval(0.0, 1.0, tol) {
        let Some(t) = match_parameter(&ua, &ub.eval(s), window, tol) else {
            trace!(s, "no matching parameter on the first curve");
            continue;
        };
        if tangential(&ha.eval(t).coords, &hb.eval(s).coords, window) {
            out.state.insert(IntersectionState::TANGENT);
        }
        out.push(b.eval(s), tol);
    }
    out
}
