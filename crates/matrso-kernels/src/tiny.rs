//! Unrolled kernels for operands with every dimension at most 3
//!
//! There is one kernel per `(l, m, n)` shape, 27 in total, selected by
//! `(l - 1, m - 1, n - 1)`. Each kernel is a monomorphization of
//! `tiny_kernel`; the trip counts are compile-time constants, so the
//! loops unroll into straight-line code.

use crate::error::{KernelError, KernelResult};
use crate::view::{MatView, MatViewMut};

#[inline]
fn tiny_kernel<const L: usize, const M: usize, const N: usize>(
    a: MatView<'_>,
    b: MatView<'_>,
    c: &mut MatViewMut<'_>,
) {
    let mut ra = [[0.0f64; L]; M];
    for (i, row) in ra.iter_mut().enumerate() {
        row.copy_from_slice(a.row(i));
    }
    let mut rb = [[0.0f64; N]; L];
    for (k, row) in rb.iter_mut().enumerate() {
        row.copy_from_slice(b.row(k));
    }
    for i in 0..M {
        let out = c.row_mut(i);
        for j in 0..N {
            let mut s = 0.0f64;
            for k in 0..L {
                s += ra[i][k] * rb[k][j];
            }
            out[j] = s;
        }
    }
}

type TinyKernel = fn(MatView<'_>, MatView<'_>, &mut MatViewMut<'_>);

/// Kernel table indexed by `(l - 1) * 9 + (m - 1) * 3 + (n - 1)`
static TINY_KERNELS: [TinyKernel; 27] = [
    tiny_kernel::<1, 1, 1>,
    tiny_kernel::<1, 1, 2>,
    tiny_kernel::<1, 1, 3>,
    tiny_kernel::<1, 2, 1>,
    tiny_kernel::<1, 2, 2>,
    tiny_kernel::<1, 2, 3>,
    tiny_kernel::<1, 3, 1>,
    tiny_kernel::<1, 3, 2>,
    tiny_kernel::<1, 3, 3>,
    tiny_kernel::<2, 1, 1>,
    tiny_kernel::<2, 1, 2>,
    tiny_kernel::<2, 1, 3>,
    tiny_kernel::<2, 2, 1>,
    tiny_kernel::<2, 2, 2>,
    tiny_kernel::<2, 2, 3>,
    tiny_kernel::<2, 3, 1>,
    tiny_kernel::<2, 3, 2>,
    tiny_kernel::<2, 3, 3>,
    tiny_kernel::<3, 1, 1>,
    tiny_kernel::<3, 1, 2>,
    tiny_kernel::<3, 1, 3>,
    tiny_kernel::<3, 2, 1>,
    tiny_kernel::<3, 2, 2>,
    tiny_kernel::<3, 2, 3>,
    tiny_kernel::<3, 3, 1>,
    tiny_kernel::<3, 3, 2>,
    tiny_kernel::<3, 3, 3>,
];

/// Multiply `a` (m×l) by `b` (l×n) into `c` (m×n) with an unrolled kernel.
///
/// Returns an error if any dimension is zero or exceeds 3.
///
/// # Examples
///
/// ```
/// use matrso_kernels::{multiply_tiny, MatView, MatViewMut};
///
/// let a = [1.0, 2.0, 3.0, 4.0];
/// let b = [5.0, 6.0, 7.0, 8.0];
/// let mut c = [0.0; 4];
/// multiply_tiny(
///     MatView::new(&a, 2, 2),
///     MatView::new(&b, 2, 2),
///     &mut MatViewMut::new(&mut c, 2, 2),
/// ).unwrap();
/// assert_eq!(c, [19.0, 22.0, 43.0, 50.0]);
/// ```
pub fn multiply_tiny(a: MatView<'_>, b: MatView<'_>, c: &mut MatViewMut<'_>) -> KernelResult<()> {
    let (m, l, n) = (a.rows(), a.cols(), b.cols());
    if b.rows() != l || c.rows() != m || c.cols() != n {
        return Err(KernelError::dimension_mismatch(
            "multiply_tiny",
            vec![m, l, l, n],
            vec![a.rows(), a.cols(), b.rows(), b.cols()],
            "operands must be m×l and l×n",
        ));
    }
    if l == 0 || m == 0 || n == 0 {
        return Err(KernelError::empty_input("multiply_tiny", "dimensions"));
    }

    if l > 3 || m > 3 || n > 3 {
        return Err(KernelError::operation_error(
            "multiply_tiny",
            format!("no unrolled kernel for l={}, m={}, n={}", l, m, n),
        ));
    }

    multiply_tiny_unchecked(a, b, c);
    Ok(())
}

/// [`multiply_tiny`] for shapes the caller has already validated
pub(crate) fn multiply_tiny_unchecked(a: MatView<'_>, b: MatView<'_>, c: &mut MatViewMut<'_>) {
    let (m, l, n) = (a.rows(), a.cols(), b.cols());
    debug_assert!((1..=3).contains(&l) && (1..=3).contains(&m) && (1..=3).contains(&n));
    TINY_KERNELS[(l - 1) * 9 + (m - 1) * 3 + (n - 1)](a, b, c);
}
