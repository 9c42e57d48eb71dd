use crate::math::arc_2d::{angle_at, is_full_sweep, on_sweep_side};
use crate::math::{Point2, Polynomial, Tolerance, Vector2};

/// Implicit conic `A x² + B x y + C y² + D x + E y + F = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Conic {
    /// Evaluates the implicit function at `p`.
    #[must_use]
    pub fn eval(&self, p: &Point2) -> f64 {
        let (x, y) = (p.x, p.y);
        self.a * x * x + self.b * x * y + self.c * y * y + self.d * x + self.e * y + self.f
    }

    /// Gradient of the implicit function at `p`.
    #[must_use]
    pub fn gradient(&self, p: &Point2) -> Vector2 {
        Vector2::new(
            2.0 * self.a * p.x + self.b * p.y + self.d,
            self.b * p.x + 2.0 * self.c * p.y + self.e,
        )
    }

    /// Substitutes a parametric curve `(x(t), y(t))`, giving a polynomial in
    /// `t` of twice the curve's degree.
    #[must_use]
    pub fn substitute(&self, x: &Polynomial, y: &Polynomial) -> Polynomial {
        let xx = x * x;
        let xy = x * y;
        let yy = y * y;
        let mut p = &(&(&xx * self.a) + &(&xy * self.b)) + &(&yy * self.c);
        p = &p + &(&(x * self.d) + &(y * self.e));
        &p + &Polynomial::constant(self.f)
    }

    /// Coefficients of the conic as a quadratic in `x`, each a polynomial in
    /// `y`: `[C y² + E y + F, B y + D, A]`.
    #[must_use]
    pub fn x_coefficients(&self) -> [Polynomial; 3] {
        [
            Polynomial::new([self.f, self.e, self.c]),
            Polynomial::new([self.d, self.b]),
            Polynomial::constant(self.a),
        ]
    }

    /// Largest coefficient magnitude, for relative comparisons.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        [self.a, self.b, self.c, self.d, self.e, self.f]
            .iter()
            .fold(0.0_f64, |m, v| m.max(v.abs()))
    }
}

/// A circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point2,
    pub radius: f64,
}

impl Circle {
    /// Creates a circle.
    #[must_use]
    pub fn new(center: Point2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// The circle as an axis-aligned ellipse.
    #[must_use]
    pub fn to_ellipse(&self) -> Ellipse {
        Ellipse::new(self.center, self.radius, self.radius, 0.0)
    }

    /// Whether the radius vanishes.
    #[must_use]
    pub fn is_degenerate(&self, tol: &Tolerance) -> bool {
        tol.is_negligible(self.radius, self.center.coords.amax())
    }
}

/// A rotated ellipse.
///
/// `P(θ) = center + R · (rx cos θ, ry sin θ)` where `R` rotates by the
/// angle whose cosine and sine are stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub center: Point2,
    pub rx: f64,
    pub ry: f64,
    pub cos: f64,
    pub sin: f64,
}

impl Ellipse {
    /// Creates an ellipse rotated by `rotation` radians.
    #[must_use]
    pub fn new(center: Point2, rx: f64, ry: f64, rotation: f64) -> Self {
        let (sin, cos) = rotation.sin_cos();
        Self {
            center,
            rx,
            ry,
            cos,
            sin,
        }
    }

    /// Whether either radius vanishes.
    #[must_use]
    pub fn is_degenerate(&self, tol: &Tolerance) -> bool {
        let scale = self.center.coords.amax();
        tol.is_negligible(self.rx, scale) || tol.is_negligible(self.ry, scale)
    }

    /// Maps a world-space vector into the unit-circle frame.
    #[must_use]
    pub fn to_unit_vector(&self, v: &Vector2) -> Vector2 {
        Vector2::new(
            (self.cos * v.x + self.sin * v.y) / self.rx,
            (-self.sin * v.x + self.cos * v.y) / self.ry,
        )
    }

    /// Maps a world-space point into the frame where the ellipse is the unit
    /// circle at the origin.
    #[must_use]
    pub fn to_unit(&self, p: &Point2) -> Point2 {
        Point2::from(self.to_unit_vector(&(p - self.center)))
    }

    /// Inverse of [`Ellipse::to_unit`].
    #[must_use]
    pub fn from_unit(&self, p: &Point2) -> Point2 {
        let (x, y) = (p.x * self.rx, p.y * self.ry);
        self.center + Vector2::new(self.cos * x - self.sin * y, self.sin * x + self.cos * y)
    }

    /// Point at parametric angle `theta`.
    #[must_use]
    pub fn point_at(&self, theta: f64) -> Point2 {
        let (s, c) = theta.sin_cos();
        self.from_unit(&Point2::new(c, s))
    }

    /// `|u|² − 1` in the unit frame: negative inside, zero on, positive
    /// outside.
    #[must_use]
    pub fn level(&self, p: &Point2) -> f64 {
        self.to_unit(p).coords.norm_squared() - 1.0
    }

    /// Implicit conic of the ellipse.
    #[must_use]
    pub fn implicit(&self) -> Conic {
        let (c, s) = (self.cos, self.sin);
        let irx2 = 1.0 / (self.rx * self.rx);
        let iry2 = 1.0 / (self.ry * self.ry);
        let a = c * c * irx2 + s * s * iry2;
        let b = 2.0 * c * s * (irx2 - iry2);
        let cc = s * s * irx2 + c * c * iry2;
        let (cx, cy) = (self.center.x, self.center.y);
        Conic {
            a,
            b,
            c: cc,
            d: -2.0 * a * cx - b * cy,
            e: -2.0 * cc * cy - b * cx,
            f: a * cx * cx + b * cx * cy + cc * cy * cy - 1.0,
        }
    }
}

/// A circular arc from `start_angle` sweeping by `sweep_angle` (positive is
/// counter-clockwise).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularArc {
    pub center: Point2,
    pub radius: f64,
    pub start_angle: f64,
    pub sweep_angle: f64,
}

impl CircularArc {
    /// Creates a circular arc.
    #[must_use]
    pub fn new(center: Point2, radius: f64, start_angle: f64, sweep_angle: f64) -> Self {
        Self {
            center,
            radius,
            start_angle,
            sweep_angle,
        }
    }

    /// The arc as an elliptical arc with equal radii.
    #[must_use]
    pub fn to_elliptical(&self) -> EllipticalArc {
        EllipticalArc::new(
            Circle::new(self.center, self.radius).to_ellipse(),
            self.start_angle,
            self.sweep_angle,
        )
    }
}

/// An arc of a rotated ellipse; angles are parametric angles of the
/// ellipse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipticalArc {
    pub ellipse: Ellipse,
    pub start_angle: f64,
    pub sweep_angle: f64,
}

impl EllipticalArc {
    /// Creates an elliptical arc.
    #[must_use]
    pub fn new(ellipse: Ellipse, start_angle: f64, sweep_angle: f64) -> Self {
        Self {
            ellipse,
            start_angle,
            sweep_angle,
        }
    }

    /// Point at normalized parameter `u ∈ [0, 1]`.
    #[must_use]
    pub fn point_at(&self, u: f64) -> Point2 {
        self.ellipse
            .point_at(angle_at(self.start_angle, self.sweep_angle, u))
    }

    /// First end point.
    #[must_use]
    pub fn start(&self) -> Point2 {
        self.point_at(0.0)
    }

    /// Second end point.
    #[must_use]
    pub fn end(&self) -> Point2 {
        self.point_at(1.0)
    }

    /// Whether the arc covers its whole ellipse.
    #[must_use]
    pub fn is_full(&self, tol: &Tolerance) -> bool {
        is_full_sweep(self.sweep_angle, tol)
    }

    /// Chord-side filter for a point on the supporting ellipse.
    #[must_use]
    pub fn accepts(&self, p: &Point2, tol: &Tolerance) -> bool {
        on_sweep_side(&self.start(), &self.end(), self.sweep_angle, p, tol)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_6, PI};

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn unit_frame_roundtrip() {
        let e = Ellipse::new(Point2::new(2.0, -1.0), 3.0, 1.5, FRAC_PI_6);
        let p = Point2::new(0.7, 4.2);
        let back = e.from_unit(&e.to_unit(&p));
        assert_relative_eq!(back.x, p.x, epsilon = 1e-12);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-12);
    }

    #[test]
    fn points_on_ellipse_satisfy_implicit() {
        let e = Ellipse::new(Point2::new(2.0, -1.0), 3.0, 1.5, FRAC_PI_6);
        let conic = e.implicit();
        for k in 0..12 {
            let theta = f64::from(k) * PI / 6.0;
            let p = e.point_at(theta);
            assert!(conic.eval(&p).abs() < 1e-12, "theta={theta}");
            assert!(e.level(&p).abs() < 1e-12);
        }
        assert!(conic.eval(&e.center) < 0.0);
    }

    #[test]
    fn rotated_major_axis() {
        let e = Ellipse::new(Point2::origin(), 2.0, 1.0, FRAC_PI_2);
        let p = e.point_at(0.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn conic_substitution() {
        let conic = Circle::new(Point2::origin(), 1.0).to_ellipse().implicit();
        // x = t, y = 0  =>  t² - 1
        let p = conic.substitute(&Polynomial::new([0.0, 1.0]), &Polynomial::zero());
        assert!((p.eval(1.0)).abs() < 1e-12);
        assert!((p.eval(0.0) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn x_coefficients_reassemble() {
        let conic = Ellipse::new(Point2::new(1.0, 2.0), 2.0, 1.0, 0.3).implicit();
        let [c0, c1, c2] = conic.x_coefficients();
        let (x, y) = (0.4, -1.3);
        let v = c0.eval(y) + c1.eval(y) * x + c2.eval(y) * x * x;
        assert_relative_eq!(v, conic.eval(&Point2::new(x, y)), epsilon = 1e-12);
    }

    #[test]
    fn arc_endpoints_and_filter() {
        let tol = Tolerance::default();
        let arc = CircularArc::new(Point2::origin(), 2.0, 0.0, FRAC_PI_2).to_elliptical();
        assert_relative_eq!(arc.start().x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(arc.end().y, 2.0, epsilon = 1e-12);
        assert!(arc.accepts(&arc.point_at(0.5), &tol));
        assert!(!arc.accepts(&Point2::new(-2.0, 0.0), &tol));
        assert!(!arc.is_full(&tol));
    }

    #[test]
    fn degenerate_radii() {
        let tol = Tolerance::default();
        assert!(Circle::new(Point2::new(1.0, 1.0), 0.0).is_degenerate(&tol));
        assert!(Ellipse::new(Point2::origin(), 1.0, 0.0, 0.0).is_degenerate(&tol));
        assert!(!Ellipse::new(Point2::origin(), 1.0, 0.5, 0.0).is_degenerate(&tol));
    }
}
