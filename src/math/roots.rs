//! Real root isolation for [`Polynomial`].
//!
//! Degrees one through four use closed-form solutions, polished by a few
//! Newton steps. Higher degrees use the numeric method selected by
//! [`Tolerance::high_degree`].

use nalgebra::{DMatrix, Schur};
use smallvec::SmallVec;

use super::{Polynomial, Tolerance};

/// Roots found for a single polynomial; inline up to the degree-9
/// elimination polynomial.
pub type Roots = SmallVec<[f64; 9]>;

/// Iteration cap for the Schur decomposition of the companion matrix.
const SCHUR_MAX_ITER: usize = 1000;

/// Newton steps applied to every closed-form or eigenvalue root.
const POLISH_STEPS: usize = 4;

/// Bisection/Newton iterations for a bracketed root.
const BRACKET_MAX_ITER: usize = 200;

/// A critical point is a double root when `|p|` there is below this
/// fraction of the summed term magnitudes.
const GRAZE_RELATIVE: f64 = 1e-12;

/// How the real roots of a polynomial are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootMethod {
    /// Linear, quadratic, cubic (Blinn) and quartic (Ferrari) formulas.
    /// Only available up to degree four.
    ClosedForm,
    /// Eigenvalues of the companion matrix (real Schur decomposition).
    /// Finds every real root, including even-multiplicity ones.
    Eigenvalue,
    /// Recursive bracketing between critical points of the derivative with
    /// safeguarded Newton steps. Even-multiplicity roots are picked up at
    /// critical points where the polynomial grazes zero.
    Bracketing,
}

impl Polynomial {
    /// Method [`Polynomial::roots`] uses for this polynomial: closed form
    /// up to degree four, `tol.high_degree` above.
    #[must_use]
    pub fn root_method(&self, tol: &Tolerance) -> RootMethod {
        match (self.degree(), tol.high_degree) {
            (0..=4, _) => RootMethod::ClosedForm,
            (_, RootMethod::ClosedForm) => RootMethod::Eigenvalue,
            (_, method) => method,
        }
    }

    /// All real roots, sorted ascending with duplicates merged.
    ///
    /// The polynomial is trimmed first. A zero polynomial has no isolated
    /// roots and yields an empty list; use [`Polynomial::is_zero`] to detect
    /// the infinite-solution case.
    #[must_use]
    pub fn roots(&self, tol: &Tolerance) -> Roots {
        let p = self.trimmed(tol.epsilon);
        if !p.is_finite() || p.degree() == 0 {
            return Roots::new();
        }
        let mut roots = match p.root_method(tol) {
            RootMethod::ClosedForm => closed_form(&p),
            RootMethod::Eigenvalue => eigenvalue_roots(&p)
                .unwrap_or_else(|| bracketed_roots(&p, -cauchy_bound(&p), cauchy_bound(&p))),
            RootMethod::Bracketing => {
                let bound = cauchy_bound(&p);
                bracketed_roots(&p, -bound, bound)
            }
        };
        roots.retain(|r| r.is_finite());
        for r in &mut roots {
            *r = polish(&p, *r);
        }
        finish(&mut roots, tol.epsilon);
        roots
    }

    /// Real roots in `[lo, hi]`.
    ///
    /// Roots within [`Tolerance::param_slack`] outside the interval are
    /// clamped onto its ends so that endpoint hits survive rounding.
    #[must_use]
    pub fn roots_in_interval(&self, lo: f64, hi: f64, tol: &Tolerance) -> Roots {
        let slack = tol.param_slack();
        let p = self.trimmed(tol.epsilon);
        let mut roots = if p.degree() > 4 && tol.high_degree == RootMethod::Bracketing {
            bracketed_roots(&p, lo - slack, hi + slack)
        } else {
            p.roots(tol)
        };
        roots.retain(|r| *r >= lo - slack && *r <= hi + slack);
        for r in &mut roots {
            *r = r.clamp(lo, hi);
        }
        finish(&mut roots, tol.epsilon);
        roots
    }
}

fn finish(roots: &mut Roots, eps: f64) {
    roots.sort_by(f64::total_cmp);
    let merge = eps.sqrt() * 1e-2;
    roots.dedup_by(|a, b| (*a - *b).abs() <= merge * 1.0_f64.max(b.abs()));
}

/// Upper bound on the magnitude of every root.
fn cauchy_bound(p: &Polynomial) -> f64 {
    let lead = p.leading().abs();
    let max = p.coeffs()[..p.degree()]
        .iter()
        .fold(0.0_f64, |m, c| m.max(c.abs()));
    1.0 + max / lead
}

/// Newton steps that are only kept while they reduce `|p(x)|`.
fn polish(p: &Polynomial, mut x: f64) -> f64 {
    let d = p.derivative();
    let mut fx = p.eval(x);
    for _ in 0..POLISH_STEPS {
        let dx = d.eval(x);
        if fx == 0.0 || dx == 0.0 {
            break;
        }
        let next = x - fx / dx;
        let fnext = p.eval(next);
        if !next.is_finite() || fnext.abs() >= fx.abs() {
            break;
        }
        x = next;
        fx = fnext;
    }
    x
}

fn closed_form(p: &Polynomial) -> Roots {
    let c = p.coeffs();
    match p.degree() {
        1 => solve_linear(c[0], c[1]),
        2 => solve_quadratic(c[0], c[1], c[2]),
        3 => solve_cubic(c[0], c[1], c[2], c[3]),
        4 => solve_quartic(c[0], c[1], c[2], c[3], c[4]),
        _ => Roots::new(),
    }
}

/// Root of `c0 + c1 x = 0`.
#[must_use]
pub fn solve_linear(c0: f64, c1: f64) -> Roots {
    let mut out = Roots::new();
    let root = -c0 / c1;
    if root.is_finite() {
        out.push(root);
    }
    out
}

/// Real roots of `c0 + c1 x + c2 x² = 0`.
///
/// Uses the cancellation-free formulation; when the quadratic term is
/// negligible the equation is solved as linear.
#[must_use]
pub fn solve_quadratic(c0: f64, c1: f64, c2: f64) -> Roots {
    let mut out = Roots::new();
    let sc0 = c0 / c2;
    let sc1 = c1 / c2;
    if !sc0.is_finite() || !sc1.is_finite() {
        return solve_linear(c0, c1);
    }
    let disc = sc1 * sc1 - 4.0 * sc0;
    let scale = sc1 * sc1 + 4.0 * sc0.abs();
    if disc < 0.0 {
        // Rounding can push a double root slightly negative.
        if disc >= -f64::EPSILON * 8.0 * scale {
            out.push(-0.5 * sc1);
        }
        return out;
    }
    if disc == 0.0 {
        out.push(-0.5 * sc1);
        return out;
    }
    let root1 = -0.5 * (sc1 + disc.sqrt().copysign(sc1));
    let root2 = sc0 / root1;
    out.push(root1);
    if root2.is_finite() {
        out.push(root2);
    }
    out.sort_by(f64::total_cmp);
    out
}

/// Real roots of `c0 + c1 x + c2 x² + c3 x³ = 0`.
///
/// Blinn's method ("How to Solve a Cubic Equation"), falling back to the
/// quadratic when the cubic coefficient is negligible.
#[must_use]
pub fn solve_cubic(c0: f64, c1: f64, c2: f64, c3: f64) -> Roots {
    const ONE_THIRD: f64 = 1.0 / 3.0;
    let mut out = Roots::new();
    let c3_recip = c3.recip();
    let sc2 = c2 * (ONE_THIRD * c3_recip);
    let sc1 = c1 * (ONE_THIRD * c3_recip);
    let sc0 = c0 * c3_recip;
    if !(sc0.is_finite() && sc1.is_finite() && sc2.is_finite()) {
        return solve_quadratic(c0, c1, c2);
    }
    let (c0, c1, c2) = (sc0, sc1, sc2);
    let d0 = (-c2).mul_add(c2, c1);
    let d1 = (-c1).mul_add(c2, c0);
    let d2 = c2 * c0 - c1 * c1;
    let d = 4.0 * d0 * d2 - d1 * d1;
    let de = (-2.0 * c2).mul_add(d0, d1);
    if d < 0.0 {
        let sq = (-0.25 * d).sqrt();
        let r = -0.5 * de;
        let t1 = (r + sq).cbrt() + (r - sq).cbrt();
        out.push(t1 - c2);
    } else if d == 0.0 {
        let t1 = (-d0).sqrt().copysign(de);
        out.push(t1 - c2);
        out.push(-2.0 * t1 - c2);
    } else {
        let th = d.sqrt().atan2(-de) * ONE_THIRD;
        let (th_sin, th_cos) = th.sin_cos();
        let r0 = th_cos;
        let ss3 = th_sin * 3.0_f64.sqrt();
        let r1 = 0.5 * (-th_cos + ss3);
        let r2 = 0.5 * (-th_cos - ss3);
        let t = 2.0 * (-d0).sqrt();
        out.push(t.mul_add(r0, -c2));
        out.push(t.mul_add(r1, -c2));
        out.push(t.mul_add(r2, -c2));
    }
    out.sort_by(f64::total_cmp);
    out
}

/// Real roots of `c0 + c1 x + c2 x² + c3 x³ + c4 x⁴ = 0`.
///
/// Ferrari's method: depress the quartic, pick the largest root of the
/// resolvent cubic and split into two quadratics.
#[must_use]
pub fn solve_quartic(c0: f64, c1: f64, c2: f64, c3: f64, c4: f64) -> Roots {
    let a = c3 / c4;
    let b = c2 / c4;
    let c = c1 / c4;
    let d = c0 / c4;
    if !(a.is_finite() && b.is_finite() && c.is_finite() && d.is_finite()) {
        return solve_cubic(c0, c1, c2, c3);
    }

    // x = y - a/4  =>  y⁴ + p y² + q y + r = 0
    let a2 = a * a;
    let p = b - 0.375 * a2;
    let q = c - 0.5 * a * b + 0.125 * a2 * a;
    let r = d - 0.25 * a * c + a2 * b / 16.0 - 3.0 * a2 * a2 / 256.0;
    let shift = -0.25 * a;

    let mut out = Roots::new();
    let scale = 1.0_f64.max(p.abs()).max(r.abs().sqrt());
    if q.abs() <= 1e-14 * scale * scale.sqrt() {
        // Biquadratic: z = y².
        for z in solve_quadratic(r, p, 1.0) {
            if z > 0.0 {
                let y = z.sqrt();
                out.push(y + shift);
                out.push(-y + shift);
            } else if z > -1e-14 * scale {
                out.push(shift);
            }
        }
    } else {
        // 8m³ + 8p m² + (2p² − 8r) m − q² = 0 has a positive root.
        let resolvent = solve_cubic(-q * q, 2.0 * p * p - 8.0 * r, 8.0 * p, 8.0);
        let Some(m) = resolvent.iter().copied().filter(|m| *m > 0.0).reduce(f64::max) else {
            return out;
        };
        let s = (2.0 * m).sqrt();
        let half_p = 0.5 * p + m;
        let q_term = q / (2.0 * s);
        for y in solve_quadratic(half_p + q_term, -s, 1.0) {
            out.push(y + shift);
        }
        for y in solve_quadratic(half_p - q_term, s, 1.0) {
            out.push(y + shift);
        }
    }
    out.sort_by(f64::total_cmp);
    out
}

/// Real eigenvalues of the companion matrix.
///
/// Returns `None` when the Schur decomposition fails to converge so the
/// caller can fall back to bracketing.
fn eigenvalue_roots(p: &Polynomial) -> Option<Roots> {
    let n = p.degree();
    let lead = p.leading();
    let c = p.coeffs();
    let mut companion = DMatrix::<f64>::zeros(n, n);
    for i in 1..n {
        companion[(i, i - 1)] = 1.0;
    }
    for i in 0..n {
        companion[(i, n - 1)] = -c[i] / lead;
    }
    let Some(schur) = Schur::try_new(companion, f64::EPSILON, SCHUR_MAX_ITER) else {
        tracing::trace!(degree = n, "companion matrix did not converge, bracketing instead");
        return None;
    };
    let mut out = Roots::new();
    for z in schur.complex_eigenvalues().iter() {
        // Multiple roots split into conjugate pairs with imaginary parts of
        // order sqrt(machine epsilon).
        if z.im.abs() <= 1e-7 * 1.0_f64.max(z.re.abs()) {
            out.push(z.re);
        }
    }
    Some(out)
}

/// Whether `p` vanishes at `x` relative to the size of its terms there.
fn grazes(p: &Polynomial, x: f64) -> bool {
    let size = p
        .coeffs()
        .iter()
        .rev()
        .fold(0.0_f64, |acc, c| acc.mul_add(x.abs(), c.abs()));
    p.eval(x).abs() <= GRAZE_RELATIVE * size
}

/// Roots in `[lo, hi]`: sign changes between consecutive critical points,
/// plus critical points at which `p` touches zero.
fn bracketed_roots(p: &Polynomial, lo: f64, hi: f64) -> Roots {
    let mut out = Roots::new();
    if p.degree() == 0 {
        return out;
    }
    if p.degree() == 1 {
        out.extend(
            solve_linear(p.coeff(0), p.coeff(1))
                .into_iter()
                .filter(|r| *r >= lo && *r <= hi),
        );
        return out;
    }
    let deriv = p.derivative();
    let mut bounds: SmallVec<[f64; 10]> = SmallVec::new();
    bounds.push(lo);
    bounds.extend(
        bracketed_roots(&deriv, lo, hi)
            .into_iter()
            .filter(|r| *r > lo && *r < hi),
    );
    bounds.push(hi);

    for w in bounds.windows(2) {
        let (a, b) = (w[0], w[1]);
        let (fa, fb) = (p.eval(a), p.eval(b));
        if fa == 0.0 {
            out.push(a);
            continue;
        }
        if a > lo && grazes(p, a) {
            out.push(a);
        }
        if fa.signum() != fb.signum() && fb != 0.0 {
            out.push(find_bracketed(p, &deriv, a, b, fa));
        }
    }
    if p.eval(hi) == 0.0 {
        out.push(hi);
    }
    out
}

/// Root of `p` in `[lo, hi]` where `p(lo)` and `p(hi)` differ in sign.
fn find_bracketed(p: &Polynomial, deriv: &Polynomial, mut lo: f64, mut hi: f64, f_lo: f64) -> f64 {
    let mut x = 0.5 * (lo + hi);
    for _ in 0..BRACKET_MAX_ITER {
        let fx = p.eval(x);
        if fx == 0.0 {
            return x;
        }
        if fx.signum() == f_lo.signum() {
            lo = x;
        } else {
            hi = x;
        }
        let mut next = x - fx / deriv.eval(x);
        if !(next > lo && next < hi) {
            next = 0.5 * (lo + hi);
        }
        if next == lo || next == hi || (next - x).abs() <= f64::EPSILON * x.abs().max(1.0) {
            return next;
        }
        x = next;
    }
    x
}
