use crate::math::{Point2, Tolerance, Vector2};

/// Parameter range of a [`Linear`] primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    /// Unbounded: `t ∈ ℝ`.
    Line,
    /// Half-bounded: `t ≥ 0`.
    Ray,
    /// Bounded: `t ∈ [0, 1]`.
    Segment,
}

/// A line, ray or segment in parametric form `P(t) = origin + t · direction`.
///
/// Segments store `direction = end − start` so that `t ∈ [0, 1]` spans them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Linear {
    pub origin: Point2,
    pub direction: Vector2,
    pub extent: Extent,
}

impl Linear {
    /// Infinite line through `origin` along `direction`.
    #[must_use]
    pub fn line(origin: Point2, direction: Vector2) -> Self {
        Self {
            origin,
            direction,
            extent: Extent::Line,
        }
    }

    /// Infinite line through two points.
    #[must_use]
    pub fn line_through(a: Point2, b: Point2) -> Self {
        Self::line(a, b - a)
    }

    /// Ray starting at `origin` heading along `direction`.
    #[must_use]
    pub fn ray(origin: Point2, direction: Vector2) -> Self {
        Self {
            origin,
            direction,
            extent: Extent::Ray,
        }
    }

    /// Segment from `start` to `end`.
    #[must_use]
    pub fn segment(start: Point2, end: Point2) -> Self {
        Self {
            origin: start,
            direction: end - start,
            extent: Extent::Segment,
        }
    }

    /// Evaluates `origin + t · direction`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.origin + self.direction * t
    }

    /// End point of a segment (`t = 1`).
    #[must_use]
    pub fn end(&self) -> Point2 {
        self.point_at(1.0)
    }

    /// Whether `t` lies inside the extent, widened by the parameter slack.
    #[must_use]
    pub fn contains_param(&self, t: f64, tol: &Tolerance) -> bool {
        let slack = tol.param_slack();
        match self.extent {
            Extent::Line => t.is_finite(),
            Extent::Ray => t >= -slack,
            Extent::Segment => t >= -slack && t <= 1.0 + slack,
        }
    }

    /// Parameter of the orthogonal projection of `p` onto the carrier line.
    #[must_use]
    pub fn project(&self, p: &Point2) -> f64 {
        (p - self.origin).dot(&self.direction) / self.direction.norm_squared()
    }

    /// Whether the direction vector vanishes (zero-length segment).
    #[must_use]
    pub fn is_degenerate(&self, tol: &Tolerance) -> bool {
        tol.is_negligible(self.direction.norm(), self.origin.coords.amax())
    }

    /// Implicit form `n · P + c = 0` with `n = (−dy, dx)`.
    #[must_use]
    pub fn implicit(&self) -> (Vector2, f64) {
        let n = Vector2::new(-self.direction.y, self.direction.x);
        (n, -n.dot(&self.origin.coords))
    }

    /// Parameter interval `[lo, hi]` covered by the extent.
    #[must_use]
    pub fn param_bounds(&self) -> (f64, f64) {
        match self.extent {
            Extent::Line => (f64::NEG_INFINITY, f64::INFINITY),
            Extent::Ray => (0.0, f64::INFINITY),
            Extent::Segment => (0.0, 1.0),
        }
    }
}
