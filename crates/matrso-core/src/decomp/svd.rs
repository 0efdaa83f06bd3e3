//! Singular value decomposition `A = U·S·Vᵀ`
//!
//! Golub-Kahan: Householder bidiagonalization followed by implicit-shift QR
//! sweeps on the bidiagonal form. A wide input (`m < n`) is decomposed
//! through its transpose and the factors are swapped back, so every shape
//! yields `U` of size `m×p`, `V` of size `n×p` and `p = min(m, n)` singular
//! values in non-increasing order.

use super::{load, unload, EPS};
use crate::error::MatrixResult;
use crate::Matrix;
use scirs2_core::ndarray_ext::Array2;

/// Negligibility floor for the bidiagonal deflation tests (2⁻⁹⁶⁶)
const TINY: f64 = 1.6033346880071782e-291;

/// Singular values and, optionally, singular vectors of an `m×n` matrix
///
/// # Examples
///
/// ```
/// use matrso_core::Matrix;
///
/// let a = Matrix::from_rows(&[[3.0, 0.0], [0.0, -4.0]]).unwrap();
/// let svd = a.singular_value_decompose(true, true).unwrap();
/// assert!((svd.norm2() - 4.0).abs() < 1e-12);
/// assert!((svd.cond() - 4.0 / 3.0).abs() < 1e-12);
/// assert_eq!(svd.rank(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SvdDecomposition {
    m: usize,
    n: usize,
    s: Vec<f64>,
    u: Option<Array2<f64>>,
    v: Option<Array2<f64>>,
}

impl SvdDecomposition {
    /// Full decomposition of the `rows×cols` row-major buffer `data`
    pub fn new(rows: usize, cols: usize, data: &[f64]) -> MatrixResult<Self> {
        Self::with_vectors(rows, cols, data, true, true)
    }

    /// Decompose, accumulating the left and right singular vectors only
    /// when asked for
    pub fn with_vectors(
        rows: usize,
        cols: usize,
        data: &[f64],
        want_u: bool,
        want_v: bool,
    ) -> MatrixResult<Self> {
        let a = load(rows, cols, data)?;
        if rows >= cols {
            let (s, u, v) = golub_kahan(a, want_u, want_v);
            Ok(Self {
                m: rows,
                n: cols,
                s,
                u,
                v,
            })
        } else {
            // A = V'·S·U'ᵀ where Aᵀ = U'·S·V'ᵀ
            let (s, u, v) = golub_kahan(a.t().to_owned(), want_v, want_u);
            Ok(Self {
                m: rows,
                n: cols,
                s,
                u: v,
                v: u,
            })
        }
    }

    /// Deep copy
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Left singular vectors (`m×p`), if they were computed
    pub fn u(&self) -> Option<Matrix> {
        self.u.as_ref().map(unload)
    }

    /// Right singular vectors (`n×p`), if they were computed
    pub fn v(&self) -> Option<Matrix> {
        self.v.as_ref().map(unload)
    }

    /// Singular values, largest first
    pub fn singular_values(&self) -> &[f64] {
        &self.s
    }

    /// Singular values as a `p×p` diagonal matrix
    pub fn s(&self) -> Matrix {
        let p = self.s.len();
        let mut data = vec![0.0f64; p * p];
        for (i, &sv) in self.s.iter().enumerate() {
            data[i * p + i] = sv;
        }
        Matrix::from_parts(p, p, data)
    }

    /// Two-norm: the largest singular value
    pub fn norm2(&self) -> f64 {
        self.s[0]
    }

    /// Two-norm condition number: largest over smallest singular value
    pub fn cond(&self) -> f64 {
        self.s[0] / self.s[self.s.len() - 1]
    }

    /// Number of singular values above `max(m, n)·σ₀·ε`
    pub fn rank(&self) -> usize {
        let tol = self.m.max(self.n) as f64 * self.s[0] * EPS;
        self.s.iter().filter(|&&sv| sv > tol).count()
    }
}

type Factors = (Vec<f64>, Option<Array2<f64>>, Option<Array2<f64>>);

/// Decompose a tall (`m >= n`) working array in place; `V` comes back `n×n`
/// and `n` singular values
#[allow(unused_assignments)]
fn golub_kahan(mut a: Array2<f64>, want_u: bool, want_v: bool) -> Factors {
    let (m, n) = a.dim();
    let nu = m.min(n);
    let mut s = vec![0.0f64; (m + 1).min(n)];
    let mut u = Array2::<f64>::zeros((m, nu));
    let mut v = Array2::<f64>::zeros((n, n));
    let mut e = vec![0.0f64; n];
    let mut work = vec![0.0f64; m];

    // Reduce A to bidiagonal form, storing the diagonal in s and the
    // super-diagonal in e
    let nct = (m - 1).min(n);
    let nrt = n.saturating_sub(2).min(m);
    for k in 0..nct.max(nrt) {
        if k < nct {
            // k-th column transformation
            s[k] = 0.0;
            for i in k..m {
                s[k] = s[k].hypot(a[[i, k]]);
            }
            if s[k] != 0.0 {
                if a[[k, k]] < 0.0 {
                    s[k] = -s[k];
                }
                for i in k..m {
                    a[[i, k]] /= s[k];
                }
                a[[k, k]] += 1.0;
            }
            s[k] = -s[k];
        }
        for j in k + 1..n {
            if k < nct && s[k] != 0.0 {
                let mut t = 0.0f64;
                for i in k..m {
                    t += a[[i, k]] * a[[i, j]];
                }
                t = -t / a[[k, k]];
                for i in k..m {
                    let aik = a[[i, k]];
                    a[[i, j]] += t * aik;
                }
            }
            // row vector for the next row transformation
            e[j] = a[[k, j]];
        }
        if want_u && k < nct {
            for i in k..m {
                u[[i, k]] = a[[i, k]];
            }
        }
        if k < nrt {
            // k-th row transformation
            e[k] = 0.0;
            for i in k + 1..n {
                e[k] = e[k].hypot(e[i]);
            }
            if e[k] != 0.0 {
                if e[k + 1] < 0.0 {
                    e[k] = -e[k];
                }
                let ek = e[k];
                for ei in e.iter_mut().skip(k + 1) {
                    *ei /= ek;
                }
                e[k + 1] += 1.0;
            }
            e[k] = -e[k];
            if k + 1 < m && e[k] != 0.0 {
                for wi in work.iter_mut().skip(k + 1) {
                    *wi = 0.0;
                }
                for j in k + 1..n {
                    for i in k + 1..m {
                        work[i] += e[j] * a[[i, j]];
                    }
                }
                for j in k + 1..n {
                    let t = -e[j] / e[k + 1];
                    for i in k + 1..m {
                        a[[i, j]] += t * work[i];
                    }
                }
            }
            if want_v {
                for i in k + 1..n {
                    v[[i, k]] = e[i];
                }
            }
        }
    }

    // Final bidiagonal matrix of order p
    let mut p = n.min(m + 1);
    if nct < n {
        s[nct] = a[[nct, nct]];
    }
    if m < p {
        s[p - 1] = 0.0;
    }
    if nrt + 1 < p {
        e[nrt] = a[[nrt, p - 1]];
    }
    e[p - 1] = 0.0;

    if want_u {
        for j in nct..nu {
            for i in 0..m {
                u[[i, j]] = 0.0;
            }
            u[[j, j]] = 1.0;
        }
        for k in (0..nct).rev() {
            if s[k] != 0.0 {
                for j in k + 1..nu {
                    let mut t = 0.0f64;
                    for i in k..m {
                        t += u[[i, k]] * u[[i, j]];
                    }
                    t = -t / u[[k, k]];
                    for i in k..m {
                        let uik = u[[i, k]];
                        u[[i, j]] += t * uik;
                    }
                }
                for i in k..m {
                    u[[i, k]] = -u[[i, k]];
                }
                u[[k, k]] += 1.0;
                for i in 0..k {
                    u[[i, k]] = 0.0;
                }
            } else {
                for i in 0..m {
                    u[[i, k]] = 0.0;
                }
                u[[k, k]] = 1.0;
            }
        }
    }

    if want_v {
        for k in (0..n).rev() {
            if k < nrt && e[k] != 0.0 {
                for j in k + 1..nu {
                    let mut t = 0.0f64;
                    for i in k + 1..n {
                        t += v[[i, k]] * v[[i, j]];
                    }
                    t = -t / v[[k + 1, k]];
                    for i in k + 1..n {
                        let vik = v[[i, k]];
                        v[[i, j]] += t * vik;
                    }
                }
            }
            for i in 0..n {
                v[[i, k]] = 0.0;
            }
            v[[k, k]] = 1.0;
        }
    }

    // Main iteration loop for the singular values
    let pp = p - 1;
    let mut sweeps = 0usize;
    while p > 0 {
        // Inspect the bidiagonal for negligible elements:
        //   kase 1: s[p-1] and e[k-1] negligible, k < p
        //   kase 2: s[k] negligible, k < p
        //   kase 3: e[k-1] negligible, k < p, s[k..p] not negligible (QR step)
        //   kase 4: e[p-2] negligible (convergence)
        let pi = p as isize;
        let mut k: isize = pi - 2;
        while k >= 0 {
            let ku = k as usize;
            if e[ku].abs() <= TINY + EPS * (s[ku].abs() + s[ku + 1].abs()) {
                e[ku] = 0.0;
                break;
            }
            k -= 1;
        }

        let kase;
        if k == pi - 2 {
            kase = 4;
        } else {
            let mut ks: isize = pi - 1;
            while ks > k {
                let ksu = ks as usize;
                let t = e[ksu].abs() + if ks != k + 1 { e[ksu - 1].abs() } else { 0.0 };
                if s[ksu].abs() <= TINY + EPS * t {
                    s[ksu] = 0.0;
                    break;
                }
                ks -= 1;
            }
            if ks == k {
                kase = 3;
            } else if ks == pi - 1 {
                kase = 1;
            } else {
                kase = 2;
                k = ks;
            }
        }
        let k = (k + 1) as usize;

        match kase {
            // Deflate negligible s[p-1]
            1 => {
                let mut f = e[p - 2];
                e[p - 2] = 0.0;
                for j in (k..=p - 2).rev() {
                    let mut t = s[j].hypot(f);
                    let cs = s[j] / t;
                    let sn = f / t;
                    s[j] = t;
                    if j != k {
                        f = -sn * e[j - 1];
                        e[j - 1] *= cs;
                    }
                    if want_v {
                        for i in 0..n {
                            t = cs * v[[i, j]] + sn * v[[i, p - 1]];
                            v[[i, p - 1]] = -sn * v[[i, j]] + cs * v[[i, p - 1]];
                            v[[i, j]] = t;
                        }
                    }
                }
            }

            // Split at negligible s[k-1]
            2 => {
                let mut f = e[k - 1];
                e[k - 1] = 0.0;
                for j in k..p {
                    let mut t = s[j].hypot(f);
                    let cs = s[j] / t;
                    let sn = f / t;
                    s[j] = t;
                    f = -sn * e[j];
                    e[j] *= cs;
                    if want_u {
                        for i in 0..m {
                            t = cs * u[[i, j]] + sn * u[[i, k - 1]];
                            u[[i, k - 1]] = -sn * u[[i, j]] + cs * u[[i, k - 1]];
                            u[[i, j]] = t;
                        }
                    }
                }
            }

            // One QR step
            3 => {
                let scale = s[p - 1]
                    .abs()
                    .max(s[p - 2].abs())
                    .max(e[p - 2].abs())
                    .max(s[k].abs())
                    .max(e[k].abs());
                let sp = s[p - 1] / scale;
                let spm1 = s[p - 2] / scale;
                let epm1 = e[p - 2] / scale;
                let sk = s[k] / scale;
                let ek = e[k] / scale;
                let b = ((spm1 + sp) * (spm1 - sp) + epm1 * epm1) / 2.0;
                let c = (sp * epm1) * (sp * epm1);
                let mut shift = 0.0f64;
                if b != 0.0 || c != 0.0 {
                    shift = (b * b + c).sqrt();
                    if b < 0.0 {
                        shift = -shift;
                    }
                    shift = c / (b + shift);
                }
                let mut f = (sk + sp) * (sk - sp) + shift;
                let mut g = sk * ek;

                // Chase zeros
                for j in k..p - 1 {
                    let mut t = f.hypot(g);
                    let mut cs = f / t;
                    let mut sn = g / t;
                    if j != k {
                        e[j - 1] = t;
                    }
                    f = cs * s[j] + sn * e[j];
                    e[j] = cs * e[j] - sn * s[j];
                    g = sn * s[j + 1];
                    s[j + 1] *= cs;
                    if want_v {
                        for i in 0..n {
                            t = cs * v[[i, j]] + sn * v[[i, j + 1]];
                            v[[i, j + 1]] = -sn * v[[i, j]] + cs * v[[i, j + 1]];
                            v[[i, j]] = t;
                        }
                    }
                    t = f.hypot(g);
                    cs = f / t;
                    sn = g / t;
                    s[j] = t;
                    f = cs * e[j] + sn * s[j + 1];
                    s[j + 1] = -sn * e[j] + cs * s[j + 1];
                    g = sn * e[j + 1];
                    e[j + 1] *= cs;
                    if want_u && j < m - 1 {
                        for i in 0..m {
                            t = cs * u[[i, j]] + sn * u[[i, j + 1]];
                            u[[i, j + 1]] = -sn * u[[i, j]] + cs * u[[i, j + 1]];
                            u[[i, j]] = t;
                        }
                    }
                }
                e[p - 2] = f;
                sweeps += 1;
            }

            // Convergence
            _ => {
                let mut k = k;
                // Make the singular value non-negative
                if s[k] <= 0.0 {
                    s[k] = if s[k] < 0.0 { -s[k] } else { 0.0 };
                    if want_v {
                        for i in 0..=pp {
                            v[[i, k]] = -v[[i, k]];
                        }
                    }
                }
                // Order the singular values
                while k < pp {
                    if s[k] >= s[k + 1] {
                        break;
                    }
                    s.swap(k, k + 1);
                    if want_v && k < n - 1 {
                        for i in 0..n {
                            v.swap([i, k + 1], [i, k]);
                        }
                    }
                    if want_u && k < m - 1 {
                        for i in 0..m {
                            u.swap([i, k + 1], [i, k]);
                        }
                    }
                    k += 1;
                }
                p -= 1;
            }
        }
    }

    tracing::trace!(m, n, sweeps, "svd converged");
    (s, want_u.then_some(u), want_v.then_some(v))
}
