//! Rank-1 style update routines
//!
//! The recursive kernel only splits even sub-dimensions. The leftover odd
//! row, column or inner index is folded in afterwards with these routines
//! instead of recursing on a ragged block.

use crate::error::{KernelError, KernelResult};
use crate::view::{MatView, MatViewMut};

/// `c += x ⊗ y` where `x` is an m×1 column and `y` a 1×n row.
///
/// # Examples
///
/// ```
/// use matrso_kernels::{outer_accumulate, MatView, MatViewMut};
///
/// let x = [1.0, 2.0];
/// let y = [3.0, 4.0, 5.0];
/// let mut c = [1.0; 6];
/// outer_accumulate(
///     &mut MatViewMut::new(&mut c, 2, 3),
///     MatView::new(&x, 2, 1),
///     MatView::new(&y, 1, 3),
/// ).unwrap();
/// assert_eq!(c, [4.0, 5.0, 6.0, 7.0, 9.0, 11.0]);
/// ```
pub fn outer_accumulate(
    c: &mut MatViewMut<'_>,
    x: MatView<'_>,
    y: MatView<'_>,
) -> KernelResult<()> {
    if x.cols() != 1 || y.rows() != 1 || x.rows() != c.rows() || y.cols() != c.cols() {
        return Err(KernelError::dimension_mismatch(
            "outer_accumulate",
            vec![c.rows(), 1, 1, c.cols()],
            vec![x.rows(), x.cols(), y.rows(), y.cols()],
            "x must be m×1 and y must be 1×n",
        ));
    }

    outer_accumulate_unchecked(c, x, y);
    Ok(())
}

/// [`outer_accumulate`] for shapes the caller has already validated
pub(crate) fn outer_accumulate_unchecked(c: &mut MatViewMut<'_>, x: MatView<'_>, y: MatView<'_>) {
    debug_assert!(x.cols() == 1 && y.rows() == 1 && x.rows() == c.rows() && y.cols() == c.cols());
    let y_row = y.row(0);
    for i in 0..c.rows() {
        let xi = x.get(i, 0);
        for (dst, &yj) in c.row_mut(i).iter_mut().zip(y_row) {
            *dst += xi * yj;
        }
    }
}

/// `c += a · x` where `a` is m×l, `x` is an l×1 column and `c` an m×1 column.
pub fn mat_vec_accumulate(
    c: &mut MatViewMut<'_>,
    a: MatView<'_>,
    x: MatView<'_>,
) -> KernelResult<()> {
    if x.cols() != 1 || c.cols() != 1 || a.cols() != x.rows() || a.rows() != c.rows() {
        return Err(KernelError::dimension_mismatch(
            "mat_vec_accumulate",
            vec![c.rows(), a.cols(), a.cols(), 1],
            vec![a.rows(), a.cols(), x.rows(), x.cols()],
            "a must be m×l, x must be l×1 and c must be m×1",
        ));
    }

    mat_vec_accumulate_unchecked(c, a, x);
    Ok(())
}

/// [`mat_vec_accumulate`] for shapes the caller has already validated
pub(crate) fn mat_vec_accumulate_unchecked(c: &mut MatViewMut<'_>, a: MatView<'_>, x: MatView<'_>) {
    debug_assert!(x.cols() == 1 && c.cols() == 1 && a.cols() == x.rows() && a.rows() == c.rows());
    for i in 0..a.rows() {
        let s: f64 = a
            .row(i)
            .iter()
            .enumerate()
            .map(|(k, &aik)| aik * x.get(k, 0))
            .sum();
        c.add(i, 0, s);
    }
}

/// `c += x · b` where `x` is a 1×l row, `b` is l×n and `c` a 1×n row.
///
/// This is the transpose form of [`mat_vec_accumulate`]; it walks `b` row by
/// row so every access has unit stride.
pub fn vec_mat_accumulate(
    c: &mut MatViewMut<'_>,
    x: MatView<'_>,
    b: MatView<'_>,
) -> KernelResult<()> {
    if x.rows() != 1 || c.rows() != 1 || x.cols() != b.rows() || b.cols() != c.cols() {
        return Err(KernelError::dimension_mismatch(
            "vec_mat_accumulate",
            vec![1, b.rows(), b.rows(), c.cols()],
            vec![x.rows(), x.cols(), b.rows(), b.cols()],
            "x must be 1×l, b must be l×n and c must be 1×n",
        ));
    }

    vec_mat_accumulate_unchecked(c, x, b);
    Ok(())
}

/// [`vec_mat_accumulate`] for shapes the caller has already validated
pub(crate) fn vec_mat_accumulate_unchecked(c: &mut MatViewMut<'_>, x: MatView<'_>, b: MatView<'_>) {
    debug_assert!(x.rows() == 1 && c.rows() == 1 && x.cols() == b.rows() && b.cols() == c.cols());
    for (k, &xk) in x.row(0).iter().enumerate() {
        for (dst, &bkj) in c.row_mut(0).iter_mut().zip(b.row(k)) {
            *dst += xk * bkj;
        }
    }
}
