//! Matrix functions: integer power and Taylor-series `exp`, `ln`, `sin`, `cos`
//!
//! These are functions of the matrix as a linear operator, not the
//! element-wise maps (`elem_exp` and friends). Every product goes through the
//! multiplication kernel with either the default or a caller-supplied
//! [`MulConfig`].
//!
//! A series is summed until adding the next term leaves every cell of the
//! running sum unchanged at double precision (NaN counts as unchanged
//! against NaN), or until the cumulative scalar coefficient underflows to
//! zero. There is no term limit: `ln` converges slowly when an eigenvalue of
//! `A` approaches 0 or 2, and a divergent `ln` ends once its sum overflows
//! to a non-finite value that no longer changes.

use super::types::Matrix;
use crate::error::MatrixResult;
use matrso_kernels::{matrix_power, MulConfig};

impl Matrix {
    /// Integer power; negative exponents invert the positive power
    ///
    /// # Examples
    ///
    /// ```
    /// use matrso_core::Matrix;
    ///
    /// let a = Matrix::from_rows(&[[2.0, 0.0], [0.0, 3.0]]).unwrap();
    /// assert_eq!(a.power(2).unwrap().to_vec(), vec![4.0, 0.0, 0.0, 9.0]);
    /// assert_eq!(a.power(0).unwrap(), Matrix::identity(2).unwrap());
    /// ```
    pub fn power(&self, exponent: i32) -> MatrixResult<Matrix> {
        self.power_with(exponent, &MulConfig::default())
    }

    /// [`power`](Self::power) with explicit kernel cutoffs
    pub fn power_with(&self, exponent: i32, config: &MulConfig) -> MatrixResult<Matrix> {
        self.require_square("power")?;
        let n = self.rows;
        let data = matrix_power(n, self.as_slice(), exponent.unsigned_abs(), config)?;
        let positive = Matrix::from_parts(n, n, data);
        if exponent < 0 {
            positive.invert()
        } else {
            Ok(positive)
        }
    }

    /// Matrix exponential `Σ Aᵏ/k!`
    pub fn exp(&self) -> MatrixResult<Matrix> {
        self.exp_with(&MulConfig::default())
    }

    pub fn exp_with(&self, config: &MulConfig) -> MatrixResult<Matrix> {
        self.require_square("exp")?;
        let id = Matrix::identity(self.rows)?;
        taylor_series("exp", self, id, config, |k| 1.0 / k as f64)
    }

    /// Matrix logarithm `Σ (-1)ᵏ⁺¹ (A - I)ᵏ/k`
    ///
    /// Meaningful only when the eigenvalues of `A - I` lie strictly inside
    /// the unit disc.
    pub fn ln(&self) -> MatrixResult<Matrix> {
        self.ln_with(&MulConfig::default())
    }

    pub fn ln_with(&self, config: &MulConfig) -> MatrixResult<Matrix> {
        self.require_square("ln")?;
        let x = self.sub(&Matrix::identity(self.rows)?)?;
        let start = x.clone();
        taylor_series("ln", &x, start, config, |k| -(k as f64) / (k + 1) as f64)
    }

    /// Matrix sine `Σ (-1)ᵏ A²ᵏ⁺¹/(2k+1)!`
    pub fn sin(&self) -> MatrixResult<Matrix> {
        self.sin_with(&MulConfig::default())
    }

    pub fn sin_with(&self, config: &MulConfig) -> MatrixResult<Matrix> {
        self.require_square("sin")?;
        let square = self.mul_with(self, config)?;
        taylor_series("sin", &square, self.compact(), config, |k| {
            let k = k as f64;
            -1.0 / ((2.0 * k) * (2.0 * k + 1.0))
        })
    }

    /// Matrix cosine `Σ (-1)ᵏ A²ᵏ/(2k)!`
    pub fn cos(&self) -> MatrixResult<Matrix> {
        self.cos_with(&MulConfig::default())
    }

    pub fn cos_with(&self, config: &MulConfig) -> MatrixResult<Matrix> {
        self.require_square("cos")?;
        let square = self.mul_with(self, config)?;
        let id = Matrix::identity(self.rows)?;
        taylor_series("cos", &square, id, config, |k| {
            let k = k as f64;
            -1.0 / ((2.0 * k - 1.0) * (2.0 * k))
        })
    }
}

/// Sum `start + start·x·r(1) + start·x²·r(1)·r(2) + ...`
///
/// Each term is the previous one times `x` times `ratio(k)`, which keeps the
/// terms bounded even when the raw powers of `x` would overflow.
fn taylor_series<F>(
    name: &'static str,
    x: &Matrix,
    start: Matrix,
    config: &MulConfig,
    mut ratio: F,
) -> MatrixResult<Matrix>
where
    F: FnMut(usize) -> f64,
{
    let mut sum = start.clone();
    let mut term = start;
    let mut coefficient = 1.0f64;
    let mut terms = 1usize;

    for k in 1.. {
        let r = ratio(k);
        coefficient *= r;
        if coefficient == 0.0 {
            break;
        }
        term = term.mul_with(x, config)?;
        term.scale_inplace(r);

        let mut changed = false;
        for (s, &t) in sum.as_mut_slice().iter_mut().zip(term.as_slice()) {
            let next = *s + t;
            if !(next == *s || (next.is_nan() && s.is_nan())) {
                changed = true;
            }
            *s = next;
        }
        terms += 1;
        if !changed {
            break;
        }
    }

    tracing::debug!(function = name, terms, "matrix series converged");
    Ok(sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatrixError;

    fn diag(values: &[f64]) -> Matrix {
        Matrix::from_fn(values.len(), values.len(), |i, j| if i == j { values[i] } else { 0.0 })
            .unwrap()
    }

    #[test]
    fn test_power_positive_and_negative() {
        let a = diag(&[2.0, 3.0]);
        assert_eq!(a.power(2).unwrap().to_vec(), vec![4.0, 0.0, 0.0, 9.0]);
        let inv = a.power(-1).unwrap();
        assert!((inv.get(0, 0) - 0.5).abs() < 1e-15);
        assert!((inv.get(1, 1) - 1.0 / 3.0).abs() < 1e-15);
        assert_eq!(inv.get(0, 1), 0.0);
    }

    #[test]
    fn test_power_matches_repeated_multiplication() {
        let a = Matrix::from_rows(&[[1.0, 2.0, 0.0], [0.5, -1.0, 1.0], [2.0, 0.0, 1.0]]).unwrap();
        let expected = a.mul(&a).unwrap().mul(&a).unwrap().mul(&a).unwrap().mul(&a).unwrap();
        assert!(a.power(5).unwrap().approx_eq(&expected, 1e-12));
        assert!(a
            .power_with(5, &MulConfig::always_recurse())
            .unwrap()
            .approx_eq(&expected, 1e-12));
    }

    #[test]
    fn test_exp_of_zero_and_diagonal() {
        let z = Matrix::zeros(3, 3).unwrap();
        assert_eq!(z.exp().unwrap(), Matrix::identity(3).unwrap());

        let e = diag(&[1.0, -2.0]).exp().unwrap();
        assert!((e.get(0, 0) - 1f64.exp()).abs() < 1e-14);
        assert!((e.get(1, 1) - (-2f64).exp()).abs() < 1e-14);
    }

    #[test]
    fn test_exp_of_nilpotent() {
        // N² = 0, so exp(N) = I + N
        let n = Matrix::from_rows(&[[0.0, 5.0], [0.0, 0.0]]).unwrap();
        let e = n.exp().unwrap();
        assert_eq!(e.to_vec(), vec![1.0, 5.0, 0.0, 1.0]);
    }

    #[test]
    fn test_sin_cos_identity() {
        let a = Matrix::from_rows(&[[0.3, 0.1], [-0.2, 0.4]]).unwrap();
        let s = a.sin().unwrap();
        let c = a.cos().unwrap();
        let sum = s.mul(&s).unwrap().add(&c.mul(&c).unwrap()).unwrap();
        assert!(sum.approx_eq(&Matrix::identity(2).unwrap(), 1e-13));
    }

    #[test]
    fn test_rotation_generator() {
        // exp([[0, -t], [t, 0]]) is a rotation by t
        let t = 0.7f64;
        let g = Matrix::from_rows(&[[0.0, -t], [t, 0.0]]).unwrap();
        let r = g.exp().unwrap();
        let expected = Matrix::from_rows(&[[t.cos(), -t.sin()], [t.sin(), t.cos()]]).unwrap();
        assert!(r.approx_eq(&expected, 1e-14));
    }

    #[test]
    fn test_ln_inverts_exp() {
        let a = diag(&[1.2, 0.8]);
        let l = a.ln().unwrap();
        assert!((l.get(0, 0) - 1.2f64.ln()).abs() < 1e-13);
        assert!((l.get(1, 1) - 0.8f64.ln()).abs() < 1e-13);

        let small = Matrix::from_rows(&[[0.1, 0.05], [0.02, -0.1]]).unwrap();
        assert!(small.exp().unwrap().ln().unwrap().approx_eq(&small, 1e-12));
    }

    #[test]
    fn test_ln_near_the_edge_of_convergence() {
        // eigenvalues of A - I at ±0.999 need tens of thousands of terms
        let l = diag(&[1.999, 0.001]).ln().unwrap();
        assert!((l.get(0, 0) - 1.999f64.ln()).abs() < 1e-10);
        assert!((l.get(1, 1) - 0.001f64.ln()).abs() < 1e-10);
        assert_eq!(l.get(0, 1), 0.0);
    }

    #[test]
    fn test_divergent_ln_terminates() {
        let l = Matrix::from_rows(&[[3.0]]).unwrap().ln().unwrap();
        assert!(!l.get(0, 0).is_finite());
    }

    #[test]
    fn test_requires_square() {
        let a = Matrix::zeros(2, 3).unwrap();
        for result in [a.exp(), a.ln(), a.sin(), a.cos(), a.power(2)] {
            assert!(matches!(result, Err(MatrixError::NotSquare { .. })));
        }
    }
}
