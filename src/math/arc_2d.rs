/// 2D arc predicates shared by circular and elliptical arcs.
///
/// Sweep convention: `sweep > 0` runs counter-clockwise from the start
/// angle, `sweep < 0` clockwise. `|sweep| ≥ 2π` covers the whole conic.
use std::f64::consts::TAU;

use super::{cross_2d, Point2, Tolerance};

/// Returns `true` if `sweep` covers the full conic.
#[must_use]
pub fn is_full_sweep(sweep: f64, tol: &Tolerance) -> bool {
    sweep.abs() >= TAU - tol.epsilon
}

/// Chord-side test for a point already known to lie on the arc's conic.
///
/// A counter-clockwise arc occupies the right side of its directed chord
/// `start → end`, a clockwise arc the left side. The point is accepted when
/// the sign of `det(end − start, p − start)` is opposite to the sign of the
/// sweep, or when the determinant is negligible (the point is a chord
/// endpoint).
#[must_use]
pub fn on_sweep_side(start: &Point2, end: &Point2, sweep: f64, p: &Point2, tol: &Tolerance) -> bool {
    if is_full_sweep(sweep, tol) {
        return true;
    }
    let chord = end - start;
    let offset = p - start;
    let det = cross_2d(&chord, &offset);
    let scale = chord.norm() * offset.norm();
    if det.abs() <= tol.epsilon * 1.0_f64.max(scale) {
        // On the chord line: only the endpoints themselves are on the arc,
        // unless the chord is degenerate (sweep near zero or near 2π).
        return tol.points_eq(p, start) || tol.points_eq(p, end) || chord.norm() <= tol.epsilon;
    }
    (det > 0.0) != (sweep > 0.0)
}

/// Angle of the arc at parameter `u ∈ [0, 1]`.
#[must_use]
pub fn angle_at(start_angle: f64, sweep: f64, u: f64) -> f64 {
    start_angle + sweep * u
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;

    fn on_unit(angle: f64) -> Point2 {
        Point2::new(angle.cos(), angle.sin())
    }

    #[test]
    fn quarter_arc_ccw() {
        let tol = Tolerance::default();
        let (s, e) = (on_unit(0.0), on_unit(FRAC_PI_2));
        assert!(on_sweep_side(&s, &e, FRAC_PI_2, &on_unit(PI / 4.0), &tol));
        assert!(!on_sweep_side(&s, &e, FRAC_PI_2, &on_unit(PI), &tol));
        assert!(!on_sweep_side(&s, &e, FRAC_PI_2, &on_unit(-FRAC_PI_2), &tol));
    }

    #[test]
    fn quarter_arc_cw_takes_the_complement() {
        let tol = Tolerance::default();
        // Clockwise from 0 to π/2 sweeps the long way round.
        let (s, e) = (on_unit(0.0), on_unit(FRAC_PI_2));
        let sweep = -1.5 * PI;
        assert!(!on_sweep_side(&s, &e, sweep, &on_unit(PI / 4.0), &tol));
        assert!(on_sweep_side(&s, &e, sweep, &on_unit(PI), &tol));
        assert!(on_sweep_side(&s, &e, sweep, &on_unit(-FRAC_PI_2), &tol));
    }

    #[test]
    fn major_arc() {
        let tol = Tolerance::default();
        let sweep = 1.5 * PI;
        let (s, e) = (on_unit(0.0), on_unit(sweep));
        assert!(on_sweep_side(&s, &e, sweep, &on_unit(FRAC_PI_2), &tol));
        assert!(on_sweep_side(&s, &e, sweep, &on_unit(PI), &tol));
        assert!(!on_sweep_side(&s, &e, sweep, &on_unit(-PI / 4.0), &tol));
    }

    #[test]
    fn endpoints_are_accepted() {
        let tol = Tolerance::default();
        let (s, e) = (on_unit(0.0), on_unit(FRAC_PI_2));
        assert!(on_sweep_side(&s, &e, FRAC_PI_2, &s, &tol));
        assert!(on_sweep_side(&s, &e, FRAC_PI_2, &e, &tol));
    }

    #[test]
    fn semicircle_chord_is_a_diameter() {
        let tol = Tolerance::default();
        let (s, e) = (on_unit(0.0), on_unit(PI));
        assert!(on_sweep_side(&s, &e, PI, &on_unit(FRAC_PI_2), &tol));
        assert!(!on_sweep_side(&s, &e, PI, &on_unit(-FRAC_PI_2), &tol));
    }

    #[test]
    fn full_sweep_accepts_everything() {
        let tol = Tolerance::default();
        let s = on_unit(0.0);
        assert!(is_full_sweep(TAU, &tol));
        assert!(on_sweep_side(&s, &s, TAU, &on_unit(1.0), &tol));
    }

    #[test]
    fn angle_interpolation() {
        assert!((angle_at(1.0, -2.0, 0.5) - 0.0).abs() < 1e-15);
    }
}
