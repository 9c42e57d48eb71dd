use tracing::debug;

use super::Intersection;
use crate::geometry::{BezierCurve, CubicBezier};
use crate::math::{cross_2d, Point2, Tolerance, Vector2};

/// Self-intersection (loop) of a cubic Bézier curve.
///
/// With power-basis coefficient vectors `a1, a2, a3`, two distinct
/// parameters `t ≠ s` with `P(t) = P(s)` satisfy
/// `a1 + a2 u + a3 (u² − v) = 0` for `u = t + s` and `v = t s`. Crossing the
/// two coordinate rows eliminates `u² − v`, which gives `u`, then `v`, and
/// `t`, `s` are the roots of `z² − u z + v`.
///
/// The loop point is reported when both parameters lie in `[0, 1]`, differ,
/// and map to the same point.
#[must_use]
pub fn self_intersection(cubic: &CubicBezier, tol: &Tolerance) -> Intersection {
    let curve = BezierCurve::from_cubic(cubic);
    let coeff = |i: usize| Vector2::new(curve.x.coeff(i), curve.y.coeff(i));
    let (a1, a2, a3) = (coeff(1), coeff(2), coeff(3));

    let mut out = Intersection::new();
    let scale = curve.scale().max(1.0);
    let denom = cross_2d(&a2, &a3);
    if tol.is_negligible(a3.norm(), scale) || denom.abs() <= tol.epsilon * a2.norm() * a3.norm() {
        return out;
    }

    let u = -cross_2d(&a1, &a3) / denom;
    let v = if a3.x.abs() >= a3.y.abs() {
        u * u + (a2.x * u + a1.x) / a3.x
    } else {
        u * u + (a2.y * u + a1.y) / a3.y
    };
    let disc = u * u - 4.0 * v;
    let slack = tol.param_slack();
    if disc <= slack * slack {
        return out;
    }
    let root = disc.sqrt();
    let (t, s) = (0.5 * (u - root), 0.5 * (u + root));
    let inside = |x: f64| x >= -slack && x <= 1.0 + slack;
    if !inside(t) || !inside(s) {
        return out;
    }

    let (pt, ps) = (curve.eval(t.clamp(0.0, 1.0)), curve.eval(s.clamp(0.0, 1.0)));
    let gap = (pt - ps).norm();
    if gap > tol.root_match(3, 3) * scale {
        debug!(t, s, gap, "loop parameters do not meet");
        return out;
    }
    out.push(Point2::from(0.5 * (pt.coords + ps.coords)), tol);
    out
}

/// Query object for [`self_intersection`].
pub struct SelfIntersect<'a> {
    curve: &'a CubicBezier,
    tolerance: Tolerance,
}

impl<'a> SelfIntersect<'a> {
    /// Creates a new `SelfIntersect` query with the default tolerance.
    #[must_use]
    pub fn new(curve: &'a CubicBezier) -> Self {
        Self {
            curve,
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
    #[must_use]
    pub fn execute(&self) -> Intersection {
        self_intersection(self.curve, &self.tolerance)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn cubic(p: [(f64, f64); 4]) -> CubicBezier {
        CubicBezier::new(
            Point2::new(p[0].0, p[0].1),
            Point2::new(p[1].0, p[1].1),
            Point2::new(p[2].0, p[2].1),
            Point2::new(p[3].0, p[3].1),
        )
    }

    #[test]
    fn loop_is_found() {
        let c = cubic([(0.0, 0.0), (4.0, 4.0), (-1.0, 4.0), (3.0, 0.0)]);
        let r = SelfIntersect::new(&c).execute();
        assert_eq!(r.len(), 1);
        assert_relative_eq!(r.points()[0].x, 1.5, epsilon = 1e-9);
        assert_relative_eq!(r.points()[0].y, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn arch_has_no_loop() {
        let c = cubic([(0.0, 0.0), (1.0, 1.0), (2.0, 1.0), (3.0, 0.0)]);
        assert!(self_intersection(&c, &Tolerance::default()).is_empty());
    }

    #[test]
    fn cusp_is_not_a_loop() {
        let c = cubic([(0.0, 0.0), (3.0, 3.0), (0.0, 3.0), (3.0, 0.0)]);
        assert!(self_intersection(&c, &Tolerance::default()).is_empty());
    }

    #[test]
    fn gentle_curve_has_no_loop() {
        let c = cubic([(0.0, 0.0), (1.0, 1.0), (1.5, 1.6), (1.8, 1.9)]);
        let r = SelfIntersect::new(&c)
            .with_tolerance(Tolerance::new(1e-9))
            .execute();
        assert!(r.is_empty());
    }
}
