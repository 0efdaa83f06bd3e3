//! Multiplication entry points and strategy dispatch
//!
//! Every public entry point validates its operands, sizes the Strassen
//! scratch buffer once and then hands off to [`multiply_view`], which picks
//! a strategy per (sub-)problem:
//!
//! 1. `l, m, n <= 3`: one of the 27 unrolled kernels
//! 2. cost heuristic says recurse: one Strassen/Winograd level
//! 3. otherwise: the direct Winograd kernel

use crate::config::{MulConfig, MulStrategy};
use crate::direct::direct_kernel;
use crate::error::{KernelError, KernelResult};
use crate::strassen::{strassen_depth, strassen_scratch_len, strassen_step};
use crate::tiny::multiply_tiny_unchecked;
use crate::view::{MatView, MatViewMut};

/// Recursive dispatcher shared by the top-level entry points and the
/// Strassen levels. Dimensions are assumed valid.
pub(crate) fn multiply_view(
    config: &MulConfig,
    a: MatView<'_>,
    b: MatView<'_>,
    c: &mut MatViewMut<'_>,
    scratch: &mut [f64],
) {
    let (m, l, n) = (a.rows(), a.cols(), b.cols());
    match config.strategy_for(l, m, n) {
        MulStrategy::Tiny => multiply_tiny_unchecked(a, b, c),
        MulStrategy::Recursive => strassen_step(config, a, b, c, scratch),
        MulStrategy::Direct => direct_kernel(a, b, c),
    }
}

fn check_operands(
    operation: &str,
    a: &MatView<'_>,
    b: &MatView<'_>,
    c: &MatViewMut<'_>,
) -> KernelResult<()> {
    if a.cols() != b.rows() || c.rows() != a.rows() || c.cols() != b.cols() {
        return Err(KernelError::dimension_mismatch(
            operation,
            vec![a.rows(), a.cols(), a.cols(), b.cols()],
            vec![a.rows(), a.cols(), b.rows(), b.cols()],
            format!(
                "cannot multiply {}x{} by {}x{} into {}x{}",
                a.rows(),
                a.cols(),
                b.rows(),
                b.cols(),
                c.rows(),
                c.cols()
            ),
        ));
    }
    if a.rows() == 0 || a.cols() == 0 || b.cols() == 0 {
        return Err(KernelError::empty_input(operation, "dimensions"));
    }
    Ok(())
}

fn check_buffer(operation: &str, name: &str, buf: &[f64], required: usize) -> KernelResult<()> {
    if buf.len() < required {
        return Err(KernelError::buffer_too_short(operation, name, required, buf.len()));
    }
    Ok(())
}

/// Multiply two views into `c` using the strategies selected by `config`.
///
/// `c` is overwritten. The Strassen scratch buffer is allocated here, once,
/// and threaded through every recursion level.
pub fn multiply_into(
    config: &MulConfig,
    a: MatView<'_>,
    b: MatView<'_>,
    c: &mut MatViewMut<'_>,
) -> KernelResult<()> {
    check_operands("multiply_into", &a, &b, c)?;
    let (m, l, n) = (a.rows(), a.cols(), b.cols());

    let strategy = config.strategy_for(l, m, n);
    let mut scratch = if strategy == MulStrategy::Recursive {
        let len = strassen_scratch_len(l, m, n);
        tracing::debug!(
            l,
            m,
            n,
            depth = strassen_depth(config, l, m, n),
            scratch = len,
            "strassen scratch allocated"
        );
        vec![0.0f64; len]
    } else {
        tracing::trace!(l, m, n, ?strategy, "multiply");
        Vec::new()
    };

    multiply_view(config, a, b, c, &mut scratch);
    Ok(())
}

/// Multiply an `m×l` buffer by an `l×n` buffer with an explicit configuration.
///
/// # Examples
///
/// ```
/// use matrso_kernels::{multiply_with, MulConfig};
///
/// let a = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]; // 2x3
/// let b = vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]; // 3x2
/// let c = multiply_with(&MulConfig::default(), 3, 2, 2, &a, &b).unwrap();
/// assert_eq!(c, vec![58.0, 64.0, 139.0, 154.0]);
/// ```
pub fn multiply_with(
    config: &MulConfig,
    l: usize,
    m: usize,
    n: usize,
    a: &[f64],
    b: &[f64],
) -> KernelResult<Vec<f64>> {
    if l == 0 || m == 0 || n == 0 {
        return Err(KernelError::empty_input("multiply", "dimensions"));
    }
    check_buffer("multiply", "a", a, m * l)?;
    check_buffer("multiply", "b", b, l * n)?;

    let mut c = vec![0.0f64; m * n];
    multiply_into(
        config,
        MatView::new(a, m, l),
        MatView::new(b, l, n),
        &mut MatViewMut::new(&mut c, m, n),
    )?;
    Ok(c)
}

/// Multiply an `m×l` buffer by an `l×n` buffer with the default cutoffs.
pub fn multiply(l: usize, m: usize, n: usize, a: &[f64], b: &[f64]) -> KernelResult<Vec<f64>> {
    multiply_with(&MulConfig::default(), l, m, n, a, b)
}

/// Multiply with the direct Winograd kernel only, whatever the size.
pub fn multiply_direct(l: usize, m: usize, n: usize, a: &[f64], b: &[f64]) -> KernelResult<Vec<f64>> {
    multiply_with(&MulConfig::direct_only(), l, m, n, a, b)
}

/// Plain `i-k-j` triple loop, used to cross-check the fast paths.
pub fn multiply_reference(
    l: usize,
    m: usize,
    n: usize,
    a: &[f64],
    b: &[f64],
) -> KernelResult<Vec<f64>> {
    check_buffer("multiply_reference", "a", a, m * l)?;
    check_buffer("multiply_reference", "b", b, l * n)?;

    let mut c = vec![0.0f64; m * n];
    for i in 0..m {
        let out = &mut c[i * n..(i + 1) * n];
        for k in 0..l {
            let aik = a[i * l + k];
            for (dst, &bkj) in out.iter_mut().zip(&b[k * n..(k + 1) * n]) {
                *dst += aik * bkj;
            }
        }
    }
    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operands(l: usize, m: usize, n: usize) -> (Vec<f64>, Vec<f64>) {
        let a = (0..m * l).map(|x| ((x * 31 + 7) % 17) as f64 / 4.0 - 2.0).collect();
        let b = (0..l * n).map(|x| ((x * 13 + 3) % 19) as f64 / 8.0 - 1.0).collect();
        (a, b)
    }

    fn assert_close(x: &[f64], y: &[f64], tol: f64) {
        assert_eq!(x.len(), y.len());
        for (i, (a, b)) in x.iter().zip(y).enumerate() {
            assert!((a - b).abs() <= tol * (1.0 + b.abs()), "index {}: {} vs {}", i, a, b);
        }
    }

    #[test]
    fn test_default_matches_reference_across_sizes() {
        for &(l, m, n) in &[(1, 1, 1), (3, 2, 3), (4, 4, 4), (17, 9, 23), (128, 130, 127)] {
            let (a, b) = operands(l, m, n);
            let fast = multiply(l, m, n, &a, &b).unwrap();
            let slow = multiply_reference(l, m, n, &a, &b).unwrap();
            assert_close(&fast, &slow, 1e-10);
        }
    }

    #[test]
    fn test_forced_recursion_matches_reference() {
        let config = MulConfig::always_recurse();
        for &(l, m, n) in &[(4, 4, 4), (5, 7, 9), (16, 3, 16), (33, 31, 29)] {
            let (a, b) = operands(l, m, n);
            let fast = multiply_with(&config, l, m, n, &a, &b).unwrap();
            let slow = multiply_reference(l, m, n, &a, &b).unwrap();
            assert_close(&fast, &slow, 1e-10);
        }
    }

    #[test]
    fn test_direct_only_matches_tiny() {
        let (a, b) = operands(3, 3, 2);
        let tiny = multiply(3, 3, 2, &a, &b).unwrap();
        let direct = multiply_direct(3, 3, 2, &a, &b).unwrap();
        assert_close(&tiny, &direct, 1e-12);
    }

    #[test]
    fn test_odd_inner_correction_propagates_non_finite() {
        // the leftover inner index pairs a zero column with an infinite row
        let (l, m, n) = (5, 4, 4);
        let (mut a, mut b) = operands(l, m, n);
        for i in 0..m {
            a[i * l + 4] = 0.0;
        }
        b[4 * n] = f64::INFINITY;

        let fast = multiply_with(&MulConfig::always_recurse(), l, m, n, &a, &b).unwrap();
        let slow = multiply_reference(l, m, n, &a, &b).unwrap();
        for (i, (x, y)) in fast.iter().zip(&slow).enumerate() {
            assert_eq!(x.is_nan(), y.is_nan(), "index {}: {} vs {}", i, x, y);
            if !y.is_nan() {
                assert!((x - y).abs() <= 1e-10 * (1.0 + y.abs()));
            }
        }
        assert!(fast.iter().step_by(n).all(|x| x.is_nan()));
    }

    #[test]
    fn test_rejects_short_buffers() {
        let a = vec![1.0; 5];
        let b = vec![1.0; 6];
        let err = multiply(3, 2, 2, &a, &b).unwrap_err();
        assert!(matches!(err, KernelError::BufferTooShort { .. }));
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let err = multiply(0, 2, 2, &[], &[]).unwrap_err();
        assert!(matches!(err, KernelError::EmptyInput { .. }));
    }

    #[test]
    fn test_multiply_into_dimension_mismatch() {
        let a = vec![1.0; 6];
        let b = vec![1.0; 6];
        let mut c = vec![0.0f64; 4];
        let err = multiply_into(
            &MulConfig::default(),
            MatView::new(&a, 2, 3),
            MatView::new(&b, 2, 3),
            &mut MatViewMut::new(&mut c, 2, 2),
        )
        .unwrap_err();
        assert!(matches!(err, KernelError::DimensionMismatch { .. }));
    }
}
