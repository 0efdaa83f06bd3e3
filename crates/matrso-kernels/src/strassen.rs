//! Recursive Strassen multiplication in Winograd's form
//!
//! Each level splits the even parts of `A` (m×l) and `B` (l×n) into
//! quadrants and forms the product with 7 recursive multiplications and 15
//! block additions:
//!
//! ```text
//! S1 = A21 + A22    T1 = B12 - B11    P1 = A11·B11    P5 = S1·T1
//! S2 = S1 - A11     T2 = B22 - T1     P2 = A12·B21    P6 = S2·T2
//! S3 = A11 - A21    T3 = B22 - B12    P3 = S4·B22     P7 = S3·T3
//! S4 = A12 - S2     T4 = T2 - B21     P4 = A22·T4
//!
//! C11 = P1 + P2
//! C12 = P1 + P6 + P5 + P3
//! C21 = P1 + P6 + P7 - P4
//! C22 = P1 + P6 + P7 + P5
//! ```
//!
//! An odd row, column or inner index is corrected afterwards with the
//! rank-1 routines in [`crate::rank1`].
//!
//! Temporaries come from a single scratch slice sized once per top-level
//! call by [`strassen_scratch_len`]. Every level carves its four blocks off
//! the front and hands the remainder to the next level.

use crate::config::{MulConfig, MulStrategy};
use crate::multiply::multiply_view;
use crate::rank1::{
    mat_vec_accumulate_unchecked, outer_accumulate_unchecked, vec_mat_accumulate_unchecked,
};
use crate::view::{MatView, MatViewMut};

/// Scratch used by one level at dimensions `(l, m, n)`
fn level_scratch(l: usize, m: usize, n: usize) -> usize {
    let (l2, m2, n2) = (l / 2, m / 2, n / 2);
    m2 * l2 + l2 * n2 + 2 * m2 * n2
}

/// Upper bound on the scratch needed by a full recursion at `(l, m, n)`.
///
/// Level `k` uses at most `(m·l + l·n + 2·m·n) / 4ᵏ` elements, so the whole
/// recursion fits in the geometric series sum `(m·l + l·n + 2·m·n) / 3`
/// regardless of depth.
///
/// # Examples
///
/// ```
/// use matrso_kernels::strassen_scratch_len;
///
/// // one level at 4x4x4 uses 4 + 4 + 8 = 16, the next 1 + 1 + 2 = 4
/// assert!(strassen_scratch_len(4, 4, 4) >= 20);
/// ```
pub fn strassen_scratch_len(l: usize, m: usize, n: usize) -> usize {
    (m * l + l * n + 2 * m * n + 2) / 3
}

/// Depth the recursion reaches under `config` starting from `(l, m, n)`
pub fn strassen_depth(config: &MulConfig, l: usize, m: usize, n: usize) -> usize {
    let (mut l, mut m, mut n) = (l, m, n);
    let mut depth = 0;
    while config.strategy_for(l, m, n) == MulStrategy::Recursive {
        depth += 1;
        l /= 2;
        m /= 2;
        n /= 2;
    }
    depth
}

/// One level of the recursion. Dimensions are assumed to agree and
/// `scratch` must hold at least [`strassen_scratch_len`] elements for the
/// current dimensions.
pub(crate) fn strassen_step(
    config: &MulConfig,
    a: MatView<'_>,
    b: MatView<'_>,
    c: &mut MatViewMut<'_>,
    scratch: &mut [f64],
) {
    let (m, l, n) = (a.rows(), a.cols(), b.cols());
    let (m2, l2, n2) = (m / 2, l / 2, n / 2);
    debug_assert!(m2 > 0 && l2 > 0 && n2 > 0);
    debug_assert!(scratch.len() >= level_scratch(l, m, n));

    let (x, rest) = scratch.split_at_mut(m2 * l2);
    let (y, rest) = rest.split_at_mut(l2 * n2);
    let (z, rest) = rest.split_at_mut(m2 * n2);
    let (w, deeper) = rest.split_at_mut(m2 * n2);

    let a11 = a.block(0, 0, m2, l2);
    let a12 = a.block(0, l2, m2, l2);
    let a21 = a.block(m2, 0, m2, l2);
    let a22 = a.block(m2, l2, m2, l2);
    let b11 = b.block(0, 0, l2, n2);
    let b12 = b.block(0, n2, l2, n2);
    let b21 = b.block(l2, 0, l2, n2);
    let b22 = b.block(l2, n2, l2, n2);

    // W = P5 = (A21 + A22)(B12 - B11)
    MatViewMut::new(x, m2, l2).assign_sum(a21, a22);
    MatViewMut::new(y, l2, n2).assign_diff(b12, b11);
    multiply_view(
        config,
        MatView::new(&*x, m2, l2),
        MatView::new(&*y, l2, n2),
        &mut MatViewMut::new(w, m2, n2),
        deeper,
    );

    // Z = P6 = S2·T2
    MatViewMut::new(x, m2, l2).sub_assign(a11);
    MatViewMut::new(y, l2, n2).rsub_assign(b22);
    multiply_view(
        config,
        MatView::new(&*x, m2, l2),
        MatView::new(&*y, l2, n2),
        &mut MatViewMut::new(z, m2, n2),
        deeper,
    );

    // C12 = P3 = (A12 - S2)·B22
    MatViewMut::new(x, m2, l2).rsub_assign(a12);
    multiply_view(
        config,
        MatView::new(&*x, m2, l2),
        b22,
        &mut c.block_mut(0, n2, m2, n2),
        deeper,
    );

    // C21 = P4 = A22·(T2 - B21)
    MatViewMut::new(y, l2, n2).sub_assign(b21);
    multiply_view(
        config,
        a22,
        MatView::new(&*y, l2, n2),
        &mut c.block_mut(m2, 0, m2, n2),
        deeper,
    );

    // C11 = P1, Z = U2 = P1 + P6
    multiply_view(config, a11, b11, &mut c.block_mut(0, 0, m2, n2), deeper);
    MatViewMut::new(z, m2, n2).add_assign(c.as_view().block(0, 0, m2, n2));

    // C12 = U2 + P5 + P3
    {
        let mut c12 = c.block_mut(0, n2, m2, n2);
        c12.add_assign(MatView::new(&*z, m2, n2));
        c12.add_assign(MatView::new(&*w, m2, n2));
    }

    // C22 = P7 = (A11 - A21)(B22 - B12), then U3 = U2 + P7
    MatViewMut::new(x, m2, l2).assign_diff(a11, a21);
    MatViewMut::new(y, l2, n2).assign_diff(b22, b12);
    {
        let mut c22 = c.block_mut(m2, n2, m2, n2);
        multiply_view(
            config,
            MatView::new(&*x, m2, l2),
            MatView::new(&*y, l2, n2),
            &mut c22,
            deeper,
        );
        c22.add_assign(MatView::new(&*z, m2, n2));
    }

    // C21 = U3 - P4, C22 = U3 + P5
    c.combine_blocks((m2, 0), (m2, n2), m2, n2, |p4, u3| u3 - p4);
    c.block_mut(m2, n2, m2, n2)
        .add_assign(MatView::new(&*w, m2, n2));

    // C11 = P1 + P2
    multiply_view(
        config,
        a12,
        b21,
        &mut MatViewMut::new(z, m2, n2),
        deeper,
    );
    c.block_mut(0, 0, m2, n2)
        .add_assign(MatView::new(&*z, m2, n2));

    fix_odd_dimensions(a, b, c, (m2 * 2, l2 * 2, n2 * 2));
}

/// Fold the leftover odd row, column and inner index into `c`.
///
/// `even` holds the even extents `(me, le, ne)` already covered by the
/// recursive product.
fn fix_odd_dimensions(
    a: MatView<'_>,
    b: MatView<'_>,
    c: &mut MatViewMut<'_>,
    even: (usize, usize, usize),
) {
    let (m, l, n) = (a.rows(), a.cols(), b.cols());
    let (me, le, ne) = even;

    if le < l {
        outer_accumulate_unchecked(
            &mut c.block_mut(0, 0, me, ne),
            a.block(0, le, me, 1),
            b.block(le, 0, 1, ne),
        );
    }

    if ne < n {
        let mut col = c.block_mut(0, ne, me, 1);
        col.fill(0.0);
        mat_vec_accumulate_unchecked(&mut col, a.block(0, 0, me, l), b.block(0, ne, l, 1));
    }

    if me < m {
        let mut row = c.block_mut(me, 0, 1, n);
        row.fill(0.0);
        vec_mat_accumulate_unchecked(&mut row, a.block(me, 0, 1, l), b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scratch_bound_covers_every_level() {
        for &(l, m, n) in &[(4, 4, 4), (7, 9, 5), (64, 33, 17), (1000, 3, 999)] {
            let mut needed = 0;
            let (mut l2, mut m2, mut n2) = (l, m, n);
            while l2 >= 2 && m2 >= 2 && n2 >= 2 {
                needed += level_scratch(l2, m2, n2);
                l2 /= 2;
                m2 /= 2;
                n2 /= 2;
            }
            assert!(
                strassen_scratch_len(l, m, n) >= needed,
                "bound too small for {:?}",
                (l, m, n)
            );
        }
    }

    #[test]
    fn test_depth_follows_config() {
        let forced = MulConfig::always_recurse();
        assert_eq!(strassen_depth(&forced, 8, 8, 8), 2);
        assert_eq!(strassen_depth(&forced, 9, 8, 8), 2);
        assert_eq!(strassen_depth(&MulConfig::never_recurse(), 512, 512, 512), 0);
    }

    #[test]
    fn test_single_level_with_odd_dimensions() {
        let (m, l, n) = (5, 7, 3);
        let a: Vec<f64> = (0..m * l).map(|x| (x % 5) as f64 - 2.0).collect();
        let b: Vec<f64> = (0..l * n).map(|x| (x % 4) as f64 + 1.0).collect();
        let mut c = vec![0.0f64; m * n];
        let mut scratch = vec![0.0f64; strassen_scratch_len(l, m, n)];
        strassen_step(
            &MulConfig::never_recurse(),
            MatView::new(&a, m, l),
            MatView::new(&b, l, n),
            &mut MatViewMut::new(&mut c, m, n),
            &mut scratch,
        );

        for i in 0..m {
            for j in 0..n {
                let expected: f64 = (0..l).map(|k| a[i * l + k] * b[k * n + j]).sum();
                assert!((c[i * n + j] - expected).abs() < 1e-9);
            }
        }
    }
}
