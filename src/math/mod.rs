pub mod arc_2d;
pub mod polygon_2d;
pub mod polynomial;
pub mod resultant;
pub mod roots;

pub use polynomial::Polynomial;
pub use roots::RootMethod;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Default geometric tolerance for floating-point comparisons.
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// Parameter ranges are widened by `epsilon * PARAM_SLACK_SCALE` before
/// out-of-range roots are rejected.
const PARAM_SLACK_SCALE: f64 = 1e3;

/// Numeric tolerance threaded through every solver call.
///
/// There is no process-wide default: callers either pass
/// [`Tolerance::default`] or their own value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Base epsilon for relative comparisons.
    pub epsilon: f64,
    /// Root isolation method used for polynomials of degree five and above.
    pub high_degree: RootMethod,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            high_degree: RootMethod::Eigenvalue,
        }
    }
}

impl Tolerance {
    /// Creates a tolerance with the given epsilon and the default root method.
    #[must_use]
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            ..Self::default()
        }
    }

    /// Returns a copy with a different epsilon.
    #[must_use]
    pub fn with_epsilon(self, epsilon: f64) -> Self {
        Self { epsilon, ..self }
    }

    /// Returns a copy using `method` for degree ≥ 5 polynomials.
    #[must_use]
    pub fn with_root_method(self, method: RootMethod) -> Self {
        Self {
            high_degree: method,
            ..self
        }
    }

    /// Slack applied to parameter-range checks such as `t ∈ [0, 1]`.
    #[must_use]
    pub fn param_slack(&self) -> f64 {
        self.epsilon * PARAM_SLACK_SCALE
    }

    /// Tolerance for matching parameter roots of curves of degrees `d1` and
    /// `d2` during resultant root matching.
    ///
    /// Higher-degree elimination polynomials lose more precision, so the
    /// base epsilon is scaled by the degree product:
    ///
    /// | `d1 · d2` | scale |
    /// |-----------|-------|
    /// | ≤ 2       | 1e3   |
    /// | ≤ 4       | 1e4   |
    /// | ≤ 6       | 1e5   |
    /// | > 6       | 1e6   |
    #[must_use]
    pub fn root_match(&self, d1: usize, d2: usize) -> f64 {
        let scale = match d1 * d2 {
            0..=2 => 1e3,
            3..=4 => 1e4,
            5..=6 => 1e5,
            _ => 1e6,
        };
        self.epsilon * scale
    }

    /// Relative equality of two scalars.
    #[must_use]
    pub fn approx_eq(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.epsilon * 1.0_f64.max(a.abs()).max(b.abs())
    }

    /// Whether `value` is negligible compared to `scale`.
    #[must_use]
    pub fn is_negligible(&self, value: f64, scale: f64) -> bool {
        value.abs() <= self.epsilon * 1.0_f64.max(scale.abs())
    }

    /// Relative equality of two points.
    #[must_use]
    pub fn points_eq(&self, a: &Point2, b: &Point2) -> bool {
        let scale = a.coords.amax().max(b.coords.amax());
        self.is_negligible((a - b).norm(), scale)
    }
}

/// 2D cross product (determinant) of two vectors.
#[inline]
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Returns `true` if every coordinate is finite.
#[must_use]
pub fn all_finite<'a>(points: impl IntoIterator<Item = &'a Point2>) -> bool {
    points
        .into_iter()
        .all(|p| p.x.is_finite() && p.y.is_finite())
}
