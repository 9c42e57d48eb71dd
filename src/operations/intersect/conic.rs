//! Solvers involving circles, ellipses and their arcs.
//!
//! Every arc solver works on the supporting conic and then drops the points
//! on the wrong side of the arc's chord.

use tracing::trace;

use super::linear::point_point;
use super::{Intersection, IntersectionState};
use crate::geometry::{Circle, Conic, Ellipse, EllipticalArc, Extent, Linear};
use crate::math::resultant::bezout_resultant;
use crate::math::roots::solve_quadratic;
use crate::math::{cross_2d, Point2, Tolerance, Vector2};
use crate::operations::contain::polygon::ellipse_inclusion;
use crate::operations::contain::Inclusion;

/// Newton refinements applied to conic/conic candidates.
const REFINE_STEPS: usize = 4;

/// Point against a full circle or ellipse: on it, inside or outside.
#[must_use]
pub fn point_conic(p: &Point2, e: &Ellipse, tol: &Tolerance) -> Intersection {
    if e.is_degenerate(tol) {
        return point_point(p, &e.center, tol);
    }
    match ellipse_inclusion(p, e, tol) {
        Inclusion::Boundary => {
            let mut out = Intersection::with_state(IntersectionState::BOUNDARY);
            out.push(*p, tol);
            out
        }
        Inclusion::Inside => Intersection::with_state(IntersectionState::INSIDE),
        Inclusion::Outside => Intersection::with_state(IntersectionState::OUTSIDE),
    }
}

/// Point against an arc.
#[must_use]
pub fn point_arc(p: &Point2, arc: &EllipticalArc, tol: &Tolerance) -> Intersection {
    let mut out = Intersection::new();
    if ellipse_inclusion(p, &arc.ellipse, tol) == Inclusion::Boundary && arc.accepts(p, tol) {
        out.push(*p, tol);
    }
    out
}

/// Line, ray or segment against a circle.
#[must_use]
pub fn linear_circle(l: &Linear, c: &Circle, tol: &Tolerance) -> Intersection {
    linear_ellipse(l, &c.to_ellipse(), tol)
}

/// Line, ray or segment against an ellipse.
///
/// The line is mapped into the frame where the ellipse is the unit circle.
/// The map is affine, so the line parameter carries over unchanged.
#[must_use]
pub fn linear_ellipse(l: &Linear, e: &Ellipse, tol: &Tolerance) -> Intersection {
    if e.is_degenerate(tol) {
        return Intersection::with_state(IntersectionState::OUTSIDE);
    }
    if l.is_degenerate(tol) {
        return point_conic(&l.origin, e, tol);
    }

    let o = e.to_unit(&l.origin);
    let d = e.to_unit_vector(&l.direction);
    let dd = d.norm_squared();
    // Squared distance of the carrier from the unit circle's center.
    let h2 = cross_2d(&d, &o.coords).powi(2) / dd;
    let gap = 1.0 - h2;
    let t_mid = -o.coords.dot(&d) / dd;

    let mut out = Intersection::new();
    if tol.is_negligible(gap, 2.0) {
        if l.contains_param(t_mid, tol) {
            out.state.insert(IntersectionState::TANGENT);
            out.push(l.point_at(t_mid), tol);
        }
    } else if gap > 0.0 {
        let half = (gap / dd).sqrt();
        for t in [t_mid - half, t_mid + half] {
            if l.contains_param(t, tol) {
                out.push(l.point_at(t), tol);
            }
        }
    }

    if out.is_empty() {
        let inside = l.extent == Extent::Segment
            && e.level(&l.origin) < 0.0
            && e.level(&l.end()) < 0.0;
        out.state = if inside {
            IntersectionState::INSIDE
        } else {
            IntersectionState::OUTSIDE
        };
    }
    out
}

/// Line, ray or segment against an arc.
#[must_use]
pub fn linear_arc(l: &Linear, arc: &EllipticalArc, tol: &Tolerance) -> Intersection {
    let mut out = linear_ellipse(l, &arc.ellipse, tol);
    out.retain(|p| arc.accepts(p, tol));
    out
}

/// Circle against circle by the radical line.
///
/// Identical circles are [`IntersectionState::COINCIDENT`] with no points.
#[must_use]
pub fn circle_circle(a: &Circle, b: &Circle, tol: &Tolerance) -> Intersection {
    if a.is_degenerate(tol) || b.is_degenerate(tol) {
        return Intersection::with_state(IntersectionState::OUTSIDE);
    }
    let (r1, r2) = (a.radius.abs(), b.radius.abs());
    let delta = b.center - a.center;
    let d = delta.norm();
    let scale = r1
        .max(r2)
        .max(a.center.coords.amax())
        .max(b.center.coords.amax());
    let near = |x: f64| tol.is_negligible(x, scale);

    if near(d) {
        let state = if near(r1 - r2) {
            IntersectionState::COINCIDENT
        } else {
            IntersectionState::INSIDE
        };
        return Intersection::with_state(state);
    }

    let mut out = Intersection::new();
    let u = delta / d;
    let outer = d - (r1 + r2);
    let inner = d - (r1 - r2).abs();
    if near(outer) {
        out.state.insert(IntersectionState::TANGENT);
        out.push(a.center + u * r1, tol);
    } else if near(inner) {
        let sign = if r1 >= r2 { 1.0 } else { -1.0 };
        out.state.insert(IntersectionState::TANGENT);
        out.push(a.center + u * (sign * r1), tol);
    } else if outer > 0.0 {
        out.state = IntersectionState::OUTSIDE;
    } else if inner < 0.0 {
        out.state = IntersectionState::INSIDE;
    } else {
        let along = (d * d + r1 * r1 - r2 * r2) / (2.0 * d);
        let h = (r1 * r1 - along * along).max(0.0).sqrt();
        let mid = a.center + u * along;
        let perp = Vector2::new(-u.y, u.x) * h;
        out.push(mid + perp, tol);
        out.push(mid - perp, tol);
    }
    out
}

/// Whether two ellipses describe the same curve.
fn same_conic(a: &Conic, b: &Conic, tol: &Tolerance) -> bool {
    let ca = [a.a, a.b, a.c, a.d, a.e, a.f];
    let cb = [b.a, b.b, b.c, b.d, b.e, b.f];
    let scale = a.magnitude().max(b.magnitude());
    let slack = tol.param_slack() * scale;
    ca.iter().zip(cb.iter()).all(|(x, y)| (x - y).abs() <= slack)
}

/// Newton steps on the pair of implicit equations.
fn refine(p: Point2, c1: &Conic, c2: &Conic) -> Point2 {
    let mut p = p;
    for _ in 0..REFINE_STEPS {
        let g1 = c1.gradient(&p);
        let g2 = c2.gradient(&p);
        let det = cross_2d(&g1, &g2);
        if det.abs() <= f64::EPSILON * g1.norm() * g2.norm() {
            break;
        }
        let (f1, f2) = (c1.eval(&p), c2.eval(&p));
        let dx = (f1 * g2.y - f2 * g1.y) / det;
        let dy = (g1.x * f2 - g2.x * f1) / det;
        p -= Vector2::new(dx, dy);
    }
    p
}

/// Ellipse against ellipse (circles included).
///
/// `x` is eliminated between the two implicit conics with a Bezout
/// resultant, leaving a quartic in `y`. Each real root gives up to two `x`
/// values on the first conic; those that also lie on the second are
/// refined and kept.
#[must_use]
pub fn ellipse_ellipse(a: &Ellipse, b: &Ellipse, tol: &Tolerance) -> Intersection {
    if a.is_degenerate(tol) || b.is_degenerate(tol) {
        return Intersection::with_state(IntersectionState::OUTSIDE);
    }
    let (c1, c2) = (a.implicit(), b.implicit());
    if same_conic(&c1, &c2, tol) {
        return Intersection::with_state(IntersectionState::COINCIDENT);
    }

    let resultant = bezout_resultant(&c1.x_coefficients(), &c2.x_coefficients());
    let accept = tol.root_match(2, 2);
    let [k0, k1, k2] = c1.x_coefficients();
    let mut out = Intersection::new();
    for y in resultant.roots(tol) {
        for x in solve_quadratic(k0.eval(y), k1.eval(y), k2.eval(y)) {
            let candidate = Point2::new(x, y);
            if b.level(&candidate).abs() > accept {
                trace!(x, y, "discarding resultant artifact");
                continue;
            }
            let p = refine(candidate, &c1, &c2);
            let (g1, g2) = (c1.gradient(&p), c2.gradient(&p));
            if cross_2d(&g1, &g2).abs() <= accept * g1.norm() * g2.norm() {
                out.state.insert(IntersectionState::TANGENT);
            }
            out.push(p, tol);
        }
    }

    if out.is_empty() {
        let nested = a.level(&b.center) < 0.0 || b.level(&a.center) < 0.0;
        out.state = if nested {
            IntersectionState::INSIDE
        } else {
            IntersectionState::OUTSIDE
        };
    }
    out
}

/// Full conic against an arc.
#[must_use]
pub fn conic_arc(e: &Ellipse, arc: &EllipticalArc, tol: &Tolerance) -> Intersection {
    let mut out = ellipse_ellipse(e, &arc.ellipse, tol);
    if out.has(IntersectionState::COINCIDENT) {
        return out;
    }
    out.retain(|p| arc.accepts(p, tol));
    out
}

/// Arc against arc.
///
/// Arcs of the same conic report their shared end points besides
/// [`IntersectionState::COINCIDENT`].
#[must_use]
pub fn arc_arc(a: &EllipticalArc, b: &EllipticalArc, tol: &Tolerance) -> Intersection {
    let mut out = ellipse_ellipse(&a.ellipse, &b.ellipse, tol);
    if out.has(IntersectionState::COINCIDENT) {
        for p in [a.start(), a.end()] {
            if b.accepts(&p, tol) {
                out.push(p, tol);
            }
        }
        for p in [b.start(), b.end()] {
            if a.accepts(&p, tol) {
                out.push(p, tol);
            }
        }
        return out;
    }
    out.retain(|p| a.accepts(p, tol) && b.accepts(p, tol));
    out
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;
    use crate::geometry::CircularArc;

    fn sorted(r: &Intersection) -> Vec<Point2> {
        let mut pts = r.points().to_vec();
        pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        pts
    }

    #[test]
    fn secant_line_through_circle() {
        let tol = Tolerance::default();
        let c = Circle::new(Point2::origin(), 5.0);
        let l = Linear::line(Point2::new(-10.0, 3.0), Vector2::new(1.0, 0.0));
        let r = linear_circle(&l, &c, &tol);
        let pts = sorted(&r);
        assert_eq!(pts.len(), 2);
        assert_relative_eq!(pts[0].x, -4.0, epsilon = 1e-12);
        assert_relative_eq!(pts[1].x, 4.0, epsilon = 1e-12);
        assert!(!r.has(IntersectionState::TANGENT));
    }

    #[test]
    fn tangent_line_touches_once() {
        let tol = Tolerance::default();
        let c = Circle::new(Point2::new(1.0, 1.0), 2.0);
        let l = Linear::line(Point2::new(-5.0, 3.0), Vector2::new(1.0, 0.0));
        let r = linear_circle(&l, &c, &tol);
        assert!(r.has(IntersectionState::TANGENT));
        assert_eq!(r.len(), 1);
        assert_relative_eq!(r.points()[0].x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(r.points()[0].y, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn segment_inside_and_outside() {
        let tol = Tolerance::default();
        let c = Circle::new(Point2::origin(), 5.0);
        let inner = Linear::segment(Point2::new(-1.0, 0.0), Point2::new(1.0, 1.0));
        assert_eq!(linear_circle(&inner, &c, &tol).state, IntersectionState::INSIDE);
        let outer = Linear::segment(Point2::new(6.0, 0.0), Point2::new(7.0, 1.0));
        assert_eq!(linear_circle(&outer, &c, &tol).state, IntersectionState::OUTSIDE);
        let half = Linear::segment(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        assert_eq!(linear_circle(&half, &c, &tol).points(), &[Point2::new(5.0, 0.0)]);
    }

    #[test]
    fn ray_keeps_forward_roots() {
        let tol = Tolerance::default();
        let c = Circle::new(Point2::origin(), 2.0);
        let from_center = Linear::ray(Point2::origin(), Vector2::new(1.0, 0.0));
        assert_eq!(linear_circle(&from_center, &c, &tol).points(), &[Point2::new(2.0, 0.0)]);
        let away = Linear::ray(Point2::new(5.0, 0.0), Vector2::new(1.0, 0.0));
        assert_eq!(linear_circle(&away, &c, &tol).state, IntersectionState::OUTSIDE);
        let toward = Linear::ray(Point2::new(5.0, 0.0), Vector2::new(-1.0, 0.0));
        assert_eq!(linear_circle(&toward, &c, &tol).len(), 2);

        let e = Ellipse::new(Point2::new(1.0, -1.0), 4.0, 2.0, FRAC_PI_4);
        let along_major = Linear::ray(e.center, Vector2::new(1.0, 1.0));
        let r = linear_ellipse(&along_major, &e, &tol);
        assert_eq!(r.len(), 1);
        let p = r.points()[0];
        assert!(p.x > e.center.x && p.y > e.center.y);
        assert_relative_eq!((p - e.center).norm(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_radius_circle_is_outside() {
        let tol = Tolerance::default();
        let c = Circle::new(Point2::origin(), 0.0);
        let l = Linear::line(Point2::new(-1.0, 0.0), Vector2::new(1.0, 0.0));
        assert_eq!(linear_circle(&l, &c, &tol).state, IntersectionState::OUTSIDE);
    }

    #[test]
    fn line_through_rotated_ellipse() {
        let tol = Tolerance::default();
        let e = Ellipse::new(Point2::new(1.0, -1.0), 4.0, 2.0, FRAC_PI_4);
        let l = Linear::line(e.center, Vector2::new(1.0, 1.0));
        let pts = sorted(&linear_ellipse(&l, &e, &tol));
        assert_eq!(pts.len(), 2);
        // The line runs along the major axis.
        assert_relative_eq!((pts[1] - e.center).norm(), 4.0, epsilon = 1e-12);
        assert_relative_eq!((pts[0] - e.center).norm(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn two_circles_cross() {
        let tol = Tolerance::default();
        let a = Circle::new(Point2::origin(), 5.0);
        let b = Circle::new(Point2::new(5.0, 0.0), 5.0);
        let pts = sorted(&circle_circle(&a, &b, &tol));
        assert_eq!(pts.len(), 2);
        assert_relative_eq!(pts[0].x, 2.5, epsilon = 1e-12);
        assert_relative_eq!(pts[0].y, -4.330_127_018_922_193, epsilon = 1e-12);
        assert_relative_eq!(pts[1].y, 4.330_127_018_922_193, epsilon = 1e-12);
    }

    #[test]
    fn circle_tangencies() {
        let tol = Tolerance::default();
        let a = Circle::new(Point2::origin(), 5.0);
        let ext = circle_circle(&a, &Circle::new(Point2::new(10.0, 0.0), 5.0), &tol);
        assert!(ext.has(IntersectionState::TANGENT));
        assert_eq!(ext.points(), &[Point2::new(5.0, 0.0)]);
        let int = circle_circle(&a, &Circle::new(Point2::new(2.0, 0.0), 3.0), &tol);
        assert!(int.has(IntersectionState::TANGENT));
        assert_eq!(int.points(), &[Point2::new(5.0, 0.0)]);
        let rev = circle_circle(&Circle::new(Point2::new(2.0, 0.0), 3.0), &a, &tol);
        assert_eq!(rev.points(), &[Point2::new(5.0, 0.0)]);
    }

    #[test]
    fn circle_nesting_and_coincidence() {
        let tol = Tolerance::default();
        let a = Circle::new(Point2::new(1.0, 1.0), 5.0);
        assert_eq!(
            circle_circle(&a, &a, &tol).state,
            IntersectionState::COINCIDENT
        );
        let small = Circle::new(Point2::new(1.5, 1.0), 1.0);
        assert_eq!(circle_circle(&a, &small, &tol).state, IntersectionState::INSIDE);
        let far = Circle::new(Point2::new(20.0, 1.0), 1.0);
        assert_eq!(circle_circle(&a, &far, &tol).state, IntersectionState::OUTSIDE);
    }

    #[test]
    fn ellipse_pair_four_points() {
        let tol = Tolerance::default();
        let a = Ellipse::new(Point2::origin(), 4.0, 1.0, 0.0);
        for b in [
            Ellipse::new(Point2::origin(), 4.0, 1.0, FRAC_PI_2),
            Ellipse::new(Point2::new(0.3, 0.2), 4.0, 1.0, 1.2),
        ] {
            let r = ellipse_ellipse(&a, &b, &tol);
            assert_eq!(r.len(), 4);
            for p in r.points() {
                assert!(a.level(p).abs() < 1e-9);
                assert!(b.level(p).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn ellipse_tangencies() {
        let tol = Tolerance::default();
        let a = Ellipse::new(Point2::origin(), 4.0, 2.0, 0.0);
        // Touching from outside, then from inside, at (4, 0).
        for b in [
            Ellipse::new(Point2::new(6.0, 0.0), 2.0, 1.0, 0.0),
            Ellipse::new(Point2::new(2.0, 0.0), 2.0, 1.0, 0.0),
        ] {
            for r in [ellipse_ellipse(&a, &b, &tol), ellipse_ellipse(&b, &a, &tol)] {
                assert!(r.has(IntersectionState::TANGENT));
                assert_eq!(r.len(), 1);
                assert_relative_eq!(r.points()[0].x, 4.0, epsilon = 1e-9);
                assert_abs_diff_eq!(r.points()[0].y, 0.0, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn circle_as_ellipse_matches_radical_line() {
        let tol = Tolerance::default();
        let a = Circle::new(Point2::new(0.0, 0.0), 5.0);
        let b = Circle::new(Point2::new(5.0, 0.0), 5.0);
        let pts = sorted(&ellipse_ellipse(&a.to_ellipse(), &b.to_ellipse(), &tol));
        assert_eq!(pts.len(), 2);
        assert_relative_eq!(pts[1].x, 2.5, epsilon = 1e-9);
        assert_relative_eq!(pts[1].y, 4.330_127_018_922_193, epsilon = 1e-9);
    }

    #[test]
    fn ellipse_nesting() {
        let tol = Tolerance::default();
        let a = Ellipse::new(Point2::origin(), 4.0, 2.0, 0.3);
        let b = Ellipse::new(Point2::new(0.5, 0.0), 1.0, 0.5, 1.0);
        assert_eq!(ellipse_ellipse(&a, &b, &tol).state, IntersectionState::INSIDE);
        let c = Ellipse::new(Point2::new(20.0, 0.0), 1.0, 0.5, 1.0);
        assert_eq!(ellipse_ellipse(&a, &c, &tol).state, IntersectionState::OUTSIDE);
        assert_eq!(ellipse_ellipse(&a, &a, &tol).state, IntersectionState::COINCIDENT);
    }

    #[test]
    fn arc_keeps_points_on_its_side() {
        let tol = Tolerance::default();
        // Upper half of the unit circle.
        let arc = CircularArc::new(Point2::origin(), 1.0, 0.0, PI).to_elliptical();
        let l = Linear::line(Point2::new(0.5, -5.0), Vector2::new(0.0, 1.0));
        let r = linear_arc(&l, &arc, &tol);
        assert_eq!(r.len(), 1);
        assert!(r.points()[0].y > 0.0);

        let below = Linear::line(Point2::new(-5.0, -0.5), Vector2::new(1.0, 0.0));
        let r = linear_arc(&below, &arc, &tol);
        assert!(r.is_empty());
        assert!(!r.has(IntersectionState::INTERSECTION));
    }

    #[test]
    fn arcs_of_one_circle_share_end_points() {
        let tol = Tolerance::default();
        let upper = CircularArc::new(Point2::origin(), 1.0, 0.0, PI).to_elliptical();
        let lower = CircularArc::new(Point2::origin(), 1.0, PI, PI).to_elliptical();
        let r = arc_arc(&upper, &lower, &tol);
        assert!(r.has(IntersectionState::COINCIDENT));
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn point_on_arc_and_conic() {
        let tol = Tolerance::default();
        let arc = CircularArc::new(Point2::origin(), 2.0, 0.0, FRAC_PI_2).to_elliptical();
        assert_eq!(point_arc(&arc.point_at(0.3), &arc, &tol).len(), 1);
        assert!(point_arc(&Point2::new(-2.0, 0.0), &arc, &tol).is_empty());
        let e = arc.ellipse;
        assert!(point_conic(&Point2::new(-2.0, 0.0), &e, &tol).has(IntersectionState::BOUNDARY));
        assert_eq!(point_conic(&Point2::origin(), &e, &tol).state, IntersectionState::INSIDE);
    }
}
