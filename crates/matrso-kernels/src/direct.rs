//! Direct multiplication using Winograd's inner-product identity
//!
//! For an even inner dimension,
//!
//! ```text
//! c[i][j] = Σₚ (a[i][2p] + b[2p+1][j]) · (a[i][2p+1] + b[2p][j]) - ρᵢ - γⱼ
//! ρᵢ = Σₚ a[i][2p] · a[i][2p+1]
//! γⱼ = Σₚ b[2p][j] · b[2p+1][j]
//! ```
//!
//! so the `m·n·l` products of the classic kernel become `m·n·l/2` plus the
//! `(m + n)·l/2` correction terms. An odd inner dimension adds the single
//! leftover product `a[i][l-1] · b[l-1][j]`.
//!
//! The columns of `b` are packed once into a contiguous buffer so the inner
//! loop walks both operands with unit stride.

use crate::view::{MatView, MatViewMut};

/// Multiply `a` (m×l) by `b` (l×n) into `c` (m×n) without recursion.
///
/// Dimensions are assumed to agree; callers validate them first.
pub(crate) fn direct_kernel(a: MatView<'_>, b: MatView<'_>, c: &mut MatViewMut<'_>) {
    let (m, l, n) = (a.rows(), a.cols(), b.cols());
    if l == 0 {
        c.fill(0.0);
        return;
    }

    // bt[j * l + k] = b[k][j]
    let mut bt = vec![0.0f64; n * l];
    for k in 0..l {
        for (j, &v) in b.row(k).iter().enumerate() {
            bt[j * l + k] = v;
        }
    }

    let half = l / 2;
    let col_factor: Vec<f64> = bt
        .chunks_exact(l)
        .map(|col| (0..half).map(|p| col[2 * p] * col[2 * p + 1]).sum())
        .collect();

    if l % 2 == 0 {
        for i in 0..m {
            let ar = a.row(i);
            let row_factor: f64 = (0..half).map(|p| ar[2 * p] * ar[2 * p + 1]).sum();
            let out = c.row_mut(i);
            for (j, col) in bt.chunks_exact(l).enumerate() {
                let mut s = -row_factor - col_factor[j];
                for p in 0..half {
                    s += (ar[2 * p] + col[2 * p + 1]) * (ar[2 * p + 1] + col[2 * p]);
                }
                out[j] = s;
            }
        }
    } else {
        let last = l - 1;
        for i in 0..m {
            let ar = a.row(i);
            let row_factor: f64 = (0..half).map(|p| ar[2 * p] * ar[2 * p + 1]).sum();
            let tail = ar[last];
            let out = c.row_mut(i);
            for (j, col) in bt.chunks_exact(l).enumerate() {
                let mut s = tail * col[last] - row_factor - col_factor[j];
                for p in 0..half {
                    s += (ar[2 * p] + col[2 * p + 1]) * (ar[2 * p + 1] + col[2 * p]);
                }
                out[j] = s;
            }
        }
    }
}
