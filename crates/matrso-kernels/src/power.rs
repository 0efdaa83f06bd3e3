//! Integer powers of square buffers by binary exponentiation

use crate::config::MulConfig;
use crate::error::{KernelError, KernelResult};
use crate::multiply::multiply_with;

/// Raise the `n×n` buffer to a non-negative integer power.
///
/// Uses square-and-multiply, so the kernel runs about `2·log₂(exponent)`
/// times. An exponent of 0 yields the identity.
///
/// # Examples
///
/// ```
/// use matrso_kernels::{matrix_power, MulConfig};
///
/// let a = [1.0, 1.0, 1.0, 0.0]; // Fibonacci matrix
/// let p = matrix_power(2, &a, 10, &MulConfig::default()).unwrap();
/// assert_eq!(p, vec![89.0, 55.0, 55.0, 34.0]);
/// ```
pub fn matrix_power(
    n: usize,
    buffer: &[f64],
    exponent: u32,
    config: &MulConfig,
) -> KernelResult<Vec<f64>> {
    if n == 0 {
        return Err(KernelError::empty_input("matrix_power", "n"));
    }
    if buffer.len() < n * n {
        return Err(KernelError::buffer_too_short(
            "matrix_power",
            "buffer",
            n * n,
            buffer.len(),
        ));
    }

    let mut result: Option<Vec<f64>> = None;
    let mut base = buffer[..n * n].to_vec();
    let mut e = exponent;
    while e > 0 {
        if e & 1 == 1 {
            result = Some(match result {
                Some(acc) => multiply_with(config, n, n, n, &acc, &base)?,
                None => base.clone(),
            });
        }
        e >>= 1;
        if e > 0 {
            base = multiply_with(config, n, n, n, &base, &base)?;
        }
    }

    Ok(result.unwrap_or_else(|| identity(n)))
}

fn identity(n: usize) -> Vec<f64> {
    let mut out = vec![0.0f64; n * n];
    for i in 0..n {
        out[i * n + i] = 1.0;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_exponent_is_identity() {
        let a = [3.0, 1.0, 4.0, 1.0];
        let p = matrix_power(2, &a, 0, &MulConfig::default()).unwrap();
        assert_eq!(p, vec![1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_first_power_copies() {
        let a = [3.0, 1.0, 4.0, 1.0];
        let p = matrix_power(2, &a, 1, &MulConfig::default()).unwrap();
        assert_eq!(p, a.to_vec());
    }

    #[test]
    fn test_diagonal_square() {
        let a = [2.0, 0.0, 0.0, 3.0];
        let p = matrix_power(2, &a, 2, &MulConfig::default()).unwrap();
        assert_eq!(p, vec![4.0, 0.0, 0.0, 9.0]);
    }

    #[test]
    fn test_odd_exponent_matches_repeated_products() {
        let n = 5;
        let a: Vec<f64> = (0..n * n).map(|x| ((x % 7) as f64 - 3.0) * 0.1).collect();
        let config = MulConfig::default();
        let mut expected = a.clone();
        for _ in 1..7 {
            expected = multiply_with(&config, n, n, n, &expected, &a).unwrap();
        }
        let p = matrix_power(n, &a, 7, &config).unwrap();
        for (x, y) in p.iter().zip(&expected) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_short_buffer() {
        assert!(matrix_power(3, &[1.0; 4], 2, &MulConfig::default()).is_err());
    }
}
