//! Single-variable polynomials in power basis.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use smallvec::{smallvec, SmallVec};

/// Inline capacity: every polynomial built by the solvers (up to the
/// degree-9 cubic/cubic elimination polynomial) fits without allocating.
const INLINE: usize = 10;

type Coeffs = SmallVec<[f64; INLINE]>;

/// A polynomial `c0 + c1 t + c2 t² + …` with coefficients in increasing
/// order of degree.
///
/// The degree is inferred from the number of coefficients, so a polynomial
/// whose leading coefficients are (nearly) zero reports a larger degree than
/// its true one. Call [`Polynomial::trim`] before root finding.
#[derive(Clone, PartialEq)]
pub struct Polynomial {
    coeffs: Coeffs,
}

impl Polynomial {
    /// Creates a polynomial from coefficients, constant term first.
    ///
    /// An empty input yields the zero polynomial.
    #[must_use]
    pub fn new(coeffs: impl IntoIterator<Item = f64>) -> Self {
        let mut coeffs: Coeffs = coeffs.into_iter().collect();
        if coeffs.is_empty() {
            coeffs.push(0.0);
        }
        Self { coeffs }
    }

    /// The zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            coeffs: smallvec![0.0],
        }
    }

    /// A constant polynomial.
    #[must_use]
    pub fn constant(c: f64) -> Self {
        Self {
            coeffs: smallvec![c],
        }
    }

    /// The monic polynomial `(t - r0)(t - r1)…`.
    #[must_use]
    pub fn from_roots(roots: &[f64]) -> Self {
        roots.iter().fold(Self::constant(1.0), |acc, &r| {
            &acc * &Self::new([-r, 1.0])
        })
    }

    /// Coefficients in increasing order of degree.
    #[must_use]
    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    /// Coefficient of `t^i`, zero past the end.
    #[must_use]
    pub fn coeff(&self, i: usize) -> f64 {
        self.coeffs.get(i).copied().unwrap_or(0.0)
    }

    /// Degree as given by the coefficient count.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Leading coefficient.
    #[must_use]
    pub fn leading(&self) -> f64 {
        self.coeffs[self.coeffs.len() - 1]
    }

    /// Largest coefficient magnitude.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.coeffs.iter().fold(0.0_f64, |m, c| m.max(c.abs()))
    }

    /// Whether every coefficient is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.coeffs.iter().all(|c| c.is_finite())
    }

    /// Whether every coefficient is within `eps` of zero.
    ///
    /// A zero polynomial means "every parameter is a solution": solvers
    /// check this before calling [`Polynomial::roots`](crate::math::Polynomial::roots)
    /// to report parallel and coincident configurations.
    #[must_use]
    pub fn is_zero(&self, eps: f64) -> bool {
        self.coeffs.iter().all(|c| c.abs() <= eps)
    }

    /// Evaluates the polynomial at `t` (Horner's scheme).
    #[must_use]
    pub fn eval(&self, t: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0_f64, |acc, &c| acc.mul_add(t, c))
    }

    /// Returns the derivative polynomial.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn derivative(&self) -> Self {
        if self.coeffs.len() == 1 {
            return Self::zero();
        }
        Self::new(
            self.coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(i, c)| c * i as f64),
        )
    }

    /// Drops leading coefficients whose magnitude is at most
    /// `eps · max|cᵢ|`, lowering the degree accordingly.
    ///
    /// Without trimming, a nearly-vanishing leading term produces huge
    /// spurious roots.
    pub fn trim(&mut self, eps: f64) {
        let threshold = eps * self.magnitude();
        while self.coeffs.len() > 1 && self.leading().abs() <= threshold {
            self.coeffs.pop();
        }
    }

    /// Trimmed copy of `self`.
    #[must_use]
    pub fn trimmed(&self, eps: f64) -> Self {
        let mut p = self.clone();
        p.trim(eps);
        p
    }

    /// `c1·a − c2·b + c3`.
    #[must_use]
    pub fn linear_combination(c1: f64, a: &Self, c2: f64, b: &Self, c3: f64) -> Self {
        let mut out = &(a * c1) - &(b * c2);
        out.coeffs[0] += c3;
        out
    }

    /// Divides by `(t - root)` using synthetic division, discarding the
    /// remainder.
    #[must_use]
    pub fn deflate(&self, root: f64) -> Self {
        if self.coeffs.len() == 1 {
            return Self::zero();
        }
        let n = self.degree();
        let mut out: Coeffs = smallvec![0.0; n];
        let mut carry = 0.0_f64;
        for i in (0..n).rev() {
            carry = carry.mul_add(root, self.coeffs[i + 1]);
            out[i] = carry;
        }
        Self { coeffs: out }
    }

    fn zip_with(&self, rhs: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        Self::new((0..len).map(|i| f(self.coeff(i), rhs.coeff(i))))
    }
}

impl fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Polynomial").field(&self.coeffs.as_slice()).finish()
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (i, &c) in self.coeffs.iter().enumerate().rev() {
            if c == 0.0 && self.coeffs.len() > 1 {
                continue;
            }
            if !first {
                f.write_str(if c < 0.0 { " - " } else { " + " })?;
            } else if c < 0.0 {
                f.write_str("-")?;
            }
            first = false;
            match i {
                0 => write!(f, "{}", c.abs())?,
                1 => write!(f, "{}t", c.abs())?,
                _ => write!(f, "{}t^{i}", c.abs())?,
            }
        }
        if first {
            f.write_str("0")?;
        }
        Ok(())
    }
}

impl Add<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Polynomial) -> Polynomial {
        &self + &rhs
    }
}

impl Sub<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Polynomial {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Polynomial) -> Polynomial {
        &self - &rhs
    }
}

impl Mul<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        let mut coeffs: Coeffs = smallvec![0.0; self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        Polynomial { coeffs }
    }
}

impl Mul for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Polynomial) -> Polynomial {
        &self * &rhs
    }
}

impl Mul<f64> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, scale: f64) -> Polynomial {
        Polynomial::new(self.coeffs.iter().map(|c| c * scale))
    }
}

impl Mul<f64> for Polynomial {
    type Output = Polynomial;

    fn mul(mut self, scale: f64) -> Polynomial {
        for c in &mut self.coeffs {
            *c *= scale;
        }
        self
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self * -1.0
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self * -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_horner() {
        // 1 + 2t + 3t²
        let p = Polynomial::new([1.0, 2.0, 3.0]);
        assert!((p.eval(2.0) - 17.0).abs() < 1e-12);
        assert!((p.eval(0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_is_zero() {
        let p = Polynomial::new(Vec::<f64>::new());
        assert_eq!(p.degree(), 0);
        assert!(p.is_zero(0.0));
    }

    #[test]
    fn derivative_of_cubic() {
        let p = Polynomial::new([5.0, 1.0, -2.0, 4.0]);
        let d = p.derivative();
        assert_eq!(d.coeffs(), &[1.0, -4.0, 12.0]);
        assert_eq!(Polynomial::constant(3.0).derivative().coeffs(), &[0.0]);
    }

    #[test]
    fn trim_drops_negligible_leading_terms() {
        let mut p = Polynomial::new([1.0, -3.0, 2.0, 1e-18, 0.0]);
        p.trim(1e-10);
        assert_eq!(p.degree(), 2);
        assert_eq!(p.coeffs(), &[1.0, -3.0, 2.0]);
    }

    #[test]
    fn trim_keeps_zero_polynomial() {
        let mut p = Polynomial::new([0.0, 0.0, 0.0]);
        p.trim(1e-10);
        assert_eq!(p.degree(), 0);
        assert!(p.is_zero(0.0));
    }

    #[test]
    fn arithmetic() {
        let a = Polynomial::new([1.0, 1.0]);
        let b = Polynomial::new([-1.0, 1.0]);
        assert_eq!((&a * &b).coeffs(), &[-1.0, 0.0, 1.0]);
        assert_eq!((&a + &b).coeffs(), &[0.0, 2.0]);
        assert_eq!((&a - &b).coeffs(), &[2.0, 0.0]);
        assert_eq!((-a.clone()).coeffs(), &[-1.0, -1.0]);
        assert_eq!((a * 3.0).coeffs(), &[3.0, 3.0]);
    }

    #[test]
    fn linear_combination_matches_definition() {
        let a = Polynomial::new([1.0, 2.0, 3.0]);
        let b = Polynomial::new([0.5, -1.0]);
        let p = Polynomial::linear_combination(2.0, &a, 4.0, &b, 7.0);
        for &t in &[-1.0, 0.0, 0.3, 2.5] {
            let expected = 2.0 * a.eval(t) - 4.0 * b.eval(t) + 7.0;
            assert!((p.eval(t) - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn from_roots_vanishes_at_roots() {
        let p = Polynomial::from_roots(&[0.25, -2.0, 3.0]);
        assert_eq!(p.degree(), 3);
        for r in [0.25, -2.0, 3.0] {
            assert!(p.eval(r).abs() < 1e-12);
        }
    }

    #[test]
    fn deflate_removes_root() {
        let p = Polynomial::from_roots(&[1.0, 2.0, 3.0]);
        let q = p.deflate(2.0);
        assert_eq!(q.degree(), 2);
        assert!(q.eval(1.0).abs() < 1e-12);
        assert!(q.eval(3.0).abs() < 1e-12);
    }

    #[test]
    fn display_formats_terms() {
        let p = Polynomial::new([1.0, 0.0, -2.0]);
        assert_eq!(p.to_string(), "-2t^2 + 1");
        assert_eq!(Polynomial::zero().to_string(), "0");
    }
}
