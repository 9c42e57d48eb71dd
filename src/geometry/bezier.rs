use crate::math::{Point2, Polynomial, Vector2};

/// Quadratic Bézier curve given by its Bernstein control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezier {
    pub p0: Point2,
    pub p1: Point2,
    pub p2: Point2,
}

impl QuadraticBezier {
    #[must_use]
    pub fn new(p0: Point2, p1: Point2, p2: Point2) -> Self {
        Self { p0, p1, p2 }
    }

    /// Control points in order.
    #[must_use]
    pub fn points(&self) -> [Point2; 3] {
        [self.p0, self.p1, self.p2]
    }
}

/// Cubic Bézier curve given by its Bernstein control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: Point2,
    pub p1: Point2,
    pub p2: Point2,
    pub p3: Point2,
}

impl CubicBezier {
    #[must_use]
    pub fn new(p0: Point2, p1: Point2, p2: Point2, p3: Point2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Control points in order.
    #[must_use]
    pub fn points(&self) -> [Point2; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }
}

/// Power-basis parametrization `(x(t), y(t))` over `t ∈ [0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierCurve {
    pub x: Polynomial,
    pub y: Polynomial,
    scale: f64,
}

impl BezierCurve {
    fn from_terms(terms: &[Vector2], scale: f64) -> Self {
        Self {
            x: Polynomial::new(terms.iter().map(|v| v.x)),
            y: Polynomial::new(terms.iter().map(|v| v.y)),
            scale,
        }
    }

    fn control_scale<'a>(points: impl IntoIterator<Item = &'a Point2>) -> f64 {
        points
            .into_iter()
            .fold(0.0_f64, |m, p| m.max(p.coords.amax()))
    }

    /// Degree-one parametrization `P0 + (P1 − P0) t`.
    #[must_use]
    pub fn from_segment(p0: Point2, p1: Point2) -> Self {
        Self::from_terms(&[p0.coords, p1 - p0], Self::control_scale(&[p0, p1]))
    }

    /// `P0 + 2(P1 − P0) t + (P0 − 2P1 + P2) t²`.
    #[must_use]
    pub fn from_quadratic(q: &QuadraticBezier) -> Self {
        let (p0, p1, p2) = (q.p0.coords, q.p1.coords, q.p2.coords);
        Self::from_terms(
            &[p0, 2.0 * (p1 - p0), p0 - 2.0 * p1 + p2],
            Self::control_scale(&q.points()),
        )
    }

    /// `P0 + 3(P1 − P0) t + 3(P0 − 2P1 + P2) t² + (−P0 + 3P1 − 3P2 + P3) t³`.
    #[must_use]
    pub fn from_cubic(c: &CubicBezier) -> Self {
        let (p0, p1, p2, p3) = (c.p0.coords, c.p1.coords, c.p2.coords, c.p3.coords);
        Self::from_terms(
            &[
                p0,
                3.0 * (p1 - p0),
                3.0 * (p0 - 2.0 * p1 + p2),
                -p0 + 3.0 * p1 - 3.0 * p2 + p3,
            ],
            Self::control_scale(&c.points()),
        )
    }

    #[must_use]
    pub fn eval(&self, t: f64) -> Point2 {
        Point2::new(self.x.eval(t), self.y.eval(t))
    }

    /// Nominal degree (the larger of the two coordinate polynomials).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.x.degree().max(self.y.degree())
    }

    /// Hodograph: `(x'(t), y'(t))`.
    #[must_use]
    pub fn derivative(&self) -> Self {
        Self {
            x: self.x.derivative(),
            y: self.y.derivative(),
            scale: self.scale,
        }
    }

    #[must_use]
    pub fn start(&self) -> Point2 {
        self.eval(0.0)
    }

    #[must_use]
    pub fn end(&self) -> Point2 {
        self.eval(1.0)
    }

    /// Largest control-point coordinate magnitude.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Largest power-basis coefficient once `origin` is moved to zero.
    #[must_use]
    pub fn spread(&self, origin: &Point2) -> f64 {
        let x = &self.x - &Polynomial::constant(origin.x);
        let y = &self.y - &Polynomial::constant(origin.y);
        x.magnitude().max(y.magnitude())
    }

    /// The same curve in coordinates `(p − origin) / factor`.
    ///
    /// The parametrization is unchanged, so parameters found on the mapped
    /// curve apply to `self`. The scale of the result is its largest
    /// coefficient.
    #[must_use]
    pub fn normalized(&self, origin: &Point2, factor: f64) -> Self {
        let inv = factor.recip();
        let x = &(&self.x - &Polynomial::constant(origin.x)) * inv;
        let y = &(&self.y - &Polynomial::constant(origin.y)) * inv;
        let scale = x.magnitude().max(y.magnitude());
        Self { x, y, scale }
    }
}

impl From<&QuadraticBezier> for BezierCurve {
    fn from(q: &QuadraticBezier) -> Self {
        Self::from_quadratic(q)
    }
}

impl From<&CubicBezier> for BezierCurve {
    fn from(c: &CubicBezier) -> Self {
        Self::from_cubic(c)
    }
}
