//! Bezout elimination for pairs of polynomials whose coefficients are
//! themselves polynomials in a second variable.
//!
//! Given `f(t) = Σ fᵢ(s) tⁱ` and `g(t) = Σ gᵢ(s) tⁱ`, the determinant of
//! their Bezout matrix is a polynomial in `s` that vanishes exactly where
//! `f` and `g` share a root in `t`.

use super::Polynomial;

/// Bezout matrix of `f` and `g` (coefficients in increasing degree of `t`).
///
/// Entry `(i, j)` is the coefficient of `tⁱ uʲ` in
/// `(f(t) g(u) − f(u) g(t)) / (t − u)`. Both inputs are padded to the same
/// length; an `n`-degree pair gives an `n × n` matrix.
#[must_use]
pub fn bezout_matrix(f: &[Polynomial], g: &[Polynomial]) -> Vec<Vec<Polynomial>> {
    let len = f.len().max(g.len());
    let n = len.saturating_sub(1);
    let zero = Polynomial::zero();
    let fi = |i: usize| f.get(i).unwrap_or(&zero);
    let gi = |i: usize| g.get(i).unwrap_or(&zero);

    let mut m = vec![vec![Polynomial::zero(); n]; n];
    for (i, row) in m.iter_mut().enumerate() {
        for (j, entry) in row.iter_mut().enumerate() {
            let mut acc = Polynomial::zero();
            for k in 0..=i.min(n - 1 - j) {
                let a = fi(j + k + 1) * gi(i - k);
                let b = fi(i - k) * gi(j + k + 1);
                acc = &acc + &(&a - &b);
            }
            *entry = acc;
        }
    }
    m
}

/// Determinant of a square matrix of polynomials by cofactor expansion.
///
/// Matrices here are at most 3 × 3, so expansion is cheaper than any
/// fraction-free elimination.
#[must_use]
pub fn determinant(m: &[Vec<Polynomial>]) -> Polynomial {
    match m.len() {
        0 => Polynomial::constant(1.0),
        1 => m[0][0].clone(),
        2 => &(&m[0][0] * &m[1][1]) - &(&m[0][1] * &m[1][0]),
        n => {
            let mut det = Polynomial::zero();
            for col in 0..n {
                if m[0][col].is_zero(0.0) {
                    continue;
                }
                let minor: Vec<Vec<Polynomial>> = m[1..]
                    .iter()
                    .map(|row| {
                        row.iter()
                            .enumerate()
                            .filter(|(j, _)| *j != col)
                            .map(|(_, p)| p.clone())
                            .collect()
                    })
                    .collect();
                let term = &m[0][col] * &determinant(&minor);
                det = if col % 2 == 0 { &det + &term } else { &det - &term };
            }
            det
        }
    }
}

/// Resultant of `f` and `g` with respect to `t`, up to sign.
#[must_use]
pub fn bezout_resultant(f: &[Polynomial], g: &[Polynomial]) -> Polynomial {
    determinant(&bezout_matrix(f, g))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consts(c: &[f64]) -> Vec<Polynomial> {
        c.iter().map(|&v| Polynomial::constant(v)).collect()
    }

    #[test]
    fn linear_pair_matches_cross_term() {
        // f = 1 + 2t, g = 3 + 4t => f1 g0 - f0 g1 = 6 - 4 = 2
        let r = bezout_resultant(&consts(&[1.0, 2.0]), &consts(&[3.0, 4.0]));
        assert!((r.eval(0.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn shared_root_gives_zero_resultant() {
        // (t - 1)(t - 2) and (t - 1)(t + 5) share t = 1.
        let f = Polynomial::from_roots(&[1.0, 2.0]);
        let g = Polynomial::from_roots(&[1.0, -5.0]);
        let r = bezout_resultant(&consts(f.coeffs()), &consts(g.coeffs()));
        assert!(r.eval(0.0).abs() < 1e-9);
    }

    #[test]
    fn distinct_roots_give_nonzero_resultant() {
        let f = Polynomial::from_roots(&[1.0, 2.0, 3.0]);
        let g = Polynomial::from_roots(&[-1.0, -2.0, -3.0]);
        let r = bezout_resultant(&consts(f.coeffs()), &consts(g.coeffs()));
        assert!(r.eval(0.0).abs() > 1.0);
    }

    #[test]
    fn eliminates_parameter() {
        // f(t) = t - s, g(t) = t² - 1: common root iff s = ±1.
        let f = vec![Polynomial::new([0.0, -1.0]), Polynomial::constant(1.0)];
        let g = consts(&[-1.0, 0.0, 1.0]);
        let r = bezout_resultant(&f, &g);
        assert_eq!(r.trimmed(1e-12).degree(), 2);
        assert!(r.eval(1.0).abs() < 1e-12);
        assert!(r.eval(-1.0).abs() < 1e-12);
        assert!(r.eval(0.0).abs() > 0.5);
    }

    #[test]
    fn determinant_3x3() {
        let m: Vec<Vec<Polynomial>> = [[2.0, 0.0, 1.0], [1.0, 3.0, 2.0], [1.0, 1.0, 1.0]]
            .iter()
            .map(|row| consts(row))
            .collect();
        // 2(3-2) - 0 + 1(1-3) = 0
        assert!(determinant(&m).eval(0.0).abs() < 1e-12);
    }
}
