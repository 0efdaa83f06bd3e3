//! Eigenvalue decomposition of a real square matrix
//!
//! Symmetric input is reduced to tridiagonal form with Householder
//! transformations and then diagonalized by the implicit QL method; the
//! eigenvalues come out real and sorted ascending, with `V` orthogonal.
//!
//! General input is reduced to upper Hessenberg form by orthogonal
//! similarity transforms and then to real Schur form by the double-shift QR
//! algorithm. Complex eigenvalues appear as conjugate pairs, and `D` carries
//! them as 2×2 blocks so that `A·V = V·D` holds in both cases.

use super::{unload, EPS};
use crate::dense::types::check_shape;
use crate::error::{MatrixError, MatrixResult};
use crate::Matrix;
use scirs2_core::ndarray_ext::Array2;

/// Eigenvalues and eigenvectors of an `n×n` matrix
///
/// # Examples
///
/// ```
/// use matrso_core::Matrix;
///
/// let a = Matrix::from_rows(&[[2.0, 1.0], [1.0, 2.0]]).unwrap();
/// let eig = a.eigen_decompose().unwrap();
/// assert!(eig.is_symmetric());
/// let d = eig.real_eigenvalues();
/// assert!((d[0] - 1.0).abs() < 1e-12 && (d[1] - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct EigenDecomposition {
    n: usize,
    is_symmetric: bool,
    d: Vec<f64>,
    e: Vec<f64>,
    v: Array2<f64>,
}

impl EigenDecomposition {
    /// Decompose the square `rows×cols` row-major buffer `data`
    ///
    /// # Errors
    ///
    /// `NotSquare` for rectangular input, `InvalidDimensions` for a short buffer.
    pub fn new(rows: usize, cols: usize, data: &[f64]) -> MatrixResult<Self> {
        check_shape(rows, cols)?;
        if rows != cols {
            return Err(MatrixError::not_square("eigen_decompose", rows, cols));
        }
        let n = rows;
        if data.len() < n * n {
            return Err(MatrixError::InvalidDimensions(format!(
                "buffer of {} elements cannot hold a {}x{} matrix",
                data.len(),
                n,
                n
            )));
        }

        // symmetry is checked while copying, stopping at the first mismatch
        let mut a = Array2::<f64>::zeros((n, n));
        let mut is_symmetric = true;
        for i in 0..n {
            for j in 0..n {
                let x = data[i * n + j];
                a[[i, j]] = x;
                if is_symmetric && j < i && x != data[j * n + i] {
                    is_symmetric = false;
                }
            }
        }

        let mut eig = Self {
            n,
            is_symmetric,
            d: vec![0.0f64; n],
            e: vec![0.0f64; n],
            v: Array2::zeros((n, n)),
        };

        if is_symmetric {
            eig.v = a;
            eig.tred2();
            eig.tql2();
        } else {
            let mut h = a;
            eig.orthes(&mut h);
            eig.hqr2(&mut h);
        }

        tracing::debug!(n, symmetric = is_symmetric, "eigen decomposition");
        Ok(eig)
    }

    /// Deep copy
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Whether the input was exactly symmetric
    pub fn is_symmetric(&self) -> bool {
        self.is_symmetric
    }

    /// Real parts of the eigenvalues
    pub fn real_eigenvalues(&self) -> &[f64] {
        &self.d
    }

    /// Imaginary parts of the eigenvalues
    pub fn imag_eigenvalues(&self) -> &[f64] {
        &self.e
    }

    /// Eigenvector matrix (columns are eigenvectors; complex pairs are stored
    /// as real and imaginary parts in consecutive columns)
    pub fn v(&self) -> Matrix {
        unload(&self.v)
    }

    /// Block diagonal eigenvalue matrix
    pub fn d(&self) -> Matrix {
        let n = self.n;
        let mut data = vec![0.0f64; n * n];
        for i in 0..n {
            data[i * n + i] = self.d[i];
            if self.e[i] > 0.0 {
                data[i * n + i + 1] = self.e[i];
            } else if self.e[i] < 0.0 {
                data[i * n + i - 1] = self.e[i];
            }
        }
        Matrix::from_parts(n, n, data)
    }

    /// Product of the eigenvalues
    ///
    /// # Errors
    ///
    /// `ComplexEigenvalues` if any imaginary part is non-negligible relative
    /// to the largest eigenvalue magnitude.
    pub fn det(&self) -> MatrixResult<f64> {
        let scale = self
            .d
            .iter()
            .zip(&self.e)
            .map(|(re, im)| re.abs() + im.abs())
            .fold(1.0, f64::max);
        if self.e.iter().any(|im| im.abs() > EPS * scale * self.n as f64) {
            return Err(MatrixError::ComplexEigenvalues);
        }
        Ok(self.d.iter().product())
    }

    /// Householder reduction of the symmetric matrix in `v` to tridiagonal form
    fn tred2(&mut self) {
        let n = self.n;
        let (d, e, v) = (&mut self.d, &mut self.e, &mut self.v);

        for j in 0..n {
            d[j] = v[[n - 1, j]];
        }

        for i in (1..n).rev() {
            let mut scale = 0.0f64;
            let mut h = 0.0f64;
            for dk in d.iter().take(i) {
                scale += dk.abs();
            }

            if scale == 0.0 {
                e[i] = d[i - 1];
                for j in 0..i {
                    d[j] = v[[i - 1, j]];
                    v[[i, j]] = 0.0;
                    v[[j, i]] = 0.0;
                }
            } else {
                // Generate the Householder vector
                for dk in d.iter_mut().take(i) {
                    *dk /= scale;
                    h += *dk * *dk;
                }
                let mut f = d[i - 1];
                let mut g = h.sqrt();
                if f > 0.0 {
                    g = -g;
                }
                e[i] = scale * g;
                h -= f * g;
                d[i - 1] = f - g;
                for ej in e.iter_mut().take(i) {
                    *ej = 0.0;
                }

                // Apply the similarity transformation to the remaining columns
                for j in 0..i {
                    f = d[j];
                    v[[j, i]] = f;
                    g = e[j] + v[[j, j]] * f;
                    for k in j + 1..i {
                        g += v[[k, j]] * d[k];
                        e[k] += v[[k, j]] * f;
                    }
                    e[j] = g;
                }
                f = 0.0;
                for j in 0..i {
                    e[j] /= h;
                    f += e[j] * d[j];
                }
                let hh = f / (h + h);
                for j in 0..i {
                    e[j] -= hh * d[j];
                }
                for j in 0..i {
                    f = d[j];
                    g = e[j];
                    for k in j..i {
                        v[[k, j]] -= f * e[k] + g * d[k];
                    }
                    d[j] = v[[i - 1, j]];
                    v[[i, j]] = 0.0;
                }
            }
            d[i] = h;
        }

        // Accumulate transformations
        for i in 0..n.saturating_sub(1) {
            v[[n - 1, i]] = v[[i, i]];
            v[[i, i]] = 1.0;
            let h = d[i + 1];
            if h != 0.0 {
                for k in 0..=i {
                    d[k] = v[[k, i + 1]] / h;
                }
                for j in 0..=i {
                    let mut g = 0.0f64;
                    for k in 0..=i {
                        g += v[[k, i + 1]] * v[[k, j]];
                    }
                    for k in 0..=i {
                        v[[k, j]] -= g * d[k];
                    }
                }
            }
            for k in 0..=i {
                v[[k, i + 1]] = 0.0;
            }
        }
        for j in 0..n {
            d[j] = v[[n - 1, j]];
            v[[n - 1, j]] = 0.0;
        }
        v[[n - 1, n - 1]] = 1.0;
        e[0] = 0.0;
    }

    /// Implicit QL iterations on the tridiagonal form, then an ascending sort
    fn tql2(&mut self) {
        let n = self.n;
        let (d, e, v) = (&mut self.d, &mut self.e, &mut self.v);

        for i in 1..n {
            e[i - 1] = e[i];
        }
        e[n - 1] = 0.0;

        let mut f = 0.0f64;
        let mut tst1 = 0.0f64;
        let mut sweeps = 0usize;
        for l in 0..n {
            // Find a small subdiagonal element
            tst1 = tst1.max(d[l].abs() + e[l].abs());
            let mut m = l;
            while m < n - 1 && e[m].abs() > EPS * tst1 {
                m += 1;
            }

            // If m == l, d[l] is already an eigenvalue; otherwise iterate
            if m > l {
                loop {
                    sweeps += 1;

                    // Compute the implicit shift
                    let mut g = d[l];
                    let mut p = (d[l + 1] - g) / (2.0 * e[l]);
                    let mut r = p.hypot(1.0);
                    if p < 0.0 {
                        r = -r;
                    }
                    d[l] = e[l] / (p + r);
                    d[l + 1] = e[l] * (p + r);
                    let dl1 = d[l + 1];
                    let mut h = g - d[l];
                    for di in d.iter_mut().skip(l + 2) {
                        *di -= h;
                    }
                    f += h;

                    // Implicit QL transformation
                    p = d[m];
                    let mut c = 1.0f64;
                    let mut c2 = c;
                    let mut c3 = c;
                    let el1 = e[l + 1];
                    let mut s = 0.0f64;
                    let mut s2 = 0.0;
                    for i in (l..m).rev() {
                        c3 = c2;
                        c2 = c;
                        s2 = s;
                        g = c * e[i];
                        h = c * p;
                        r = p.hypot(e[i]);
                        e[i + 1] = s * r;
                        s = e[i] / r;
                        c = p / r;
                        p = c * d[i] - s * g;
                        d[i + 1] = h + s * (c * g + s * d[i]);

                        // Accumulate the rotation
                        for k in 0..n {
                            h = v[[k, i + 1]];
                            v[[k, i + 1]] = s * v[[k, i]] + c * h;
                            v[[k, i]] = c * v[[k, i]] - s * h;
                        }
                    }
                    p = -s * s2 * c3 * el1 * e[l] / dl1;
                    e[l] = s * p;
                    d[l] = c * p;

                    if e[l].abs() <= EPS * tst1 {
                        break;
                    }
                }
            }
            d[l] += f;
            e[l] = 0.0;
        }

        // Selection sort of eigenvalues and eigenvectors, ascending
        for i in 0..n.saturating_sub(1) {
            let mut k = i;
            let mut p = d[i];
            for (j, &dj) in d.iter().enumerate().skip(i + 1) {
                if dj < p {
                    k = j;
                    p = dj;
                }
            }
            if k != i {
                d[k] = d[i];
                d[i] = p;
                for j in 0..n {
                    v.swap([j, i], [j, k]);
                }
            }
        }

        tracing::trace!(n, sweeps, "tql2 converged");
    }

    /// Orthogonal reduction to upper Hessenberg form, accumulating `V`
    fn orthes(&mut self, h: &mut Array2<f64>) {
        let n = self.n;
        let low = 0;
        let high = n - 1;
        let mut ort = vec![0.0f64; n];

        for m in low + 1..high {
            let mut scale = 0.0f64;
            for i in m..=high {
                scale += h[[i, m - 1]].abs();
            }
            if scale != 0.0 {
                let mut hh = 0.0f64;
                for i in (m..=high).rev() {
                    ort[i] = h[[i, m - 1]] / scale;
                    hh += ort[i] * ort[i];
                }
                let mut g = hh.sqrt();
                if ort[m] > 0.0 {
                    g = -g;
                }
                hh -= ort[m] * g;
                ort[m] -= g;

                // H = (I - u·uᵀ/h)·H·(I - u·uᵀ/h)
                for j in m..n {
                    let mut f = 0.0f64;
                    for i in (m..=high).rev() {
                        f += ort[i] * h[[i, j]];
                    }
                    f /= hh;
                    for i in m..=high {
                        h[[i, j]] -= f * ort[i];
                    }
                }
                for i in 0..=high {
                    let mut f = 0.0f64;
                    for j in (m..=high).rev() {
                        f += ort[j] * h[[i, j]];
                    }
                    f /= hh;
                    for j in m..=high {
                        h[[i, j]] -= f * ort[j];
                    }
                }
                ort[m] *= scale;
                h[[m, m - 1]] = scale * g;
            }
        }

        let v = &mut self.v;
        v.fill(0.0);
        for i in 0..n {
            v[[i, i]] = 1.0;
        }

        for m in (low + 1..high).rev() {
            if h[[m, m - 1]] != 0.0 {
                for i in m + 1..=high {
                    ort[i] = h[[i, m - 1]];
                }
                for j in m..=high {
                    let mut g = 0.0f64;
                    for i in m..=high {
                        g += ort[i] * v[[i, j]];
                    }
                    // double division avoids possible underflow
                    g = (g / ort[m]) / h[[m, m - 1]];
                    for i in m..=high {
                        v[[i, j]] += g * ort[i];
                    }
                }
            }
        }
    }

    /// Reduction from Hessenberg to real Schur form, then back substitution
    /// for the eigenvectors
    #[allow(unused_assignments)]
    fn hqr2(&mut self, h: &mut Array2<f64>) {
        let nn = self.n;
        let low = 0usize;
        let high = nn - 1;
        let (d, e, v) = (&mut self.d, &mut self.e, &mut self.v);

        let mut exshift = 0.0f64;
        let (mut p, mut q, mut r, mut s, mut z) = (0.0f64, 0.0f64, 0.0f64, 0.0f64, 0.0f64);
        let (mut w, mut x, mut y) = (0.0f64, 0.0f64, 0.0f64);

        // Store roots isolated by balancing and compute the matrix norm
        let mut norm = 0.0f64;
        for i in 0..nn {
            for j in i.saturating_sub(1)..nn {
                norm += h[[i, j]].abs();
            }
        }

        // Outer loop over eigenvalue index; `top` is one past the active block
        let mut top = nn;
        let mut iter = 0usize;
        let mut total_iter = 0usize;
        while top > low {
            let n = top - 1;

            // Look for a single small subdiagonal element
            let mut l = n;
            while l > low {
                s = h[[l - 1, l - 1]].abs() + h[[l, l]].abs();
                if s == 0.0 {
                    s = norm;
                }
                if h[[l, l - 1]].abs() < EPS * s {
                    break;
                }
                l -= 1;
            }

            if l == n {
                // One root found
                h[[n, n]] += exshift;
                d[n] = h[[n, n]];
                e[n] = 0.0;
                top -= 1;
                iter = 0;
            } else if l + 1 == n {
                // Two roots found
                w = h[[n, n - 1]] * h[[n - 1, n]];
                p = (h[[n - 1, n - 1]] - h[[n, n]]) / 2.0;
                q = p * p + w;
                z = q.abs().sqrt();
                h[[n, n]] += exshift;
                h[[n - 1, n - 1]] += exshift;
                x = h[[n, n]];

                if q >= 0.0 {
                    // Real pair
                    z = if p >= 0.0 { p + z } else { p - z };
                    d[n - 1] = x + z;
                    d[n] = d[n - 1];
                    if z != 0.0 {
                        d[n] = x - w / z;
                    }
                    e[n - 1] = 0.0;
                    e[n] = 0.0;
                    x = h[[n, n - 1]];
                    s = x.abs() + z.abs();
                    p = x / s;
                    q = z / s;
                    r = (p * p + q * q).sqrt();
                    p /= r;
                    q /= r;

                    // Row modification
                    for j in n - 1..nn {
                        z = h[[n - 1, j]];
                        h[[n - 1, j]] = q * z + p * h[[n, j]];
                        h[[n, j]] = q * h[[n, j]] - p * z;
                    }
                    // Column modification
                    for i in 0..=n {
                        z = h[[i, n - 1]];
                        h[[i, n - 1]] = q * z + p * h[[i, n]];
                        h[[i, n]] = q * h[[i, n]] - p * z;
                    }
                    // Accumulate transformations
                    for i in low..=high {
                        z = v[[i, n - 1]];
                        v[[i, n - 1]] = q * z + p * v[[i, n]];
                        v[[i, n]] = q * v[[i, n]] - p * z;
                    }
                } else {
                    // Complex pair
                    d[n - 1] = x + p;
                    d[n] = x + p;
                    e[n - 1] = z;
                    e[n] = -z;
                }
                top -= 2;
                iter = 0;
            } else {
                // No convergence yet; form the shift
                x = h[[n, n]];
                y = 0.0;
                w = 0.0;
                if l < n {
                    y = h[[n - 1, n - 1]];
                    w = h[[n, n - 1]] * h[[n - 1, n]];
                }

                // Wilkinson's original ad hoc shift
                if iter == 10 {
                    exshift += x;
                    for i in low..=n {
                        h[[i, i]] -= x;
                    }
                    s = h[[n, n - 1]].abs() + h[[n - 1, n - 2]].abs();
                    x = 0.75 * s;
                    y = x;
                    w = -0.4375 * s * s;
                }

                // MATLAB's new ad hoc shift
                if iter == 30 {
                    s = (y - x) / 2.0;
                    s = s * s + w;
                    if s > 0.0 {
                        s = s.sqrt();
                        if y < x {
                            s = -s;
                        }
                        s = x - w / ((y - x) / 2.0 + s);
                        for i in low..=n {
                            h[[i, i]] -= s;
                        }
                        exshift += s;
                        x = 0.964;
                        y = x;
                        w = x;
                    }
                }

                iter += 1;
                total_iter += 1;

                // Look for two consecutive small subdiagonal elements
                let mut m = n - 2;
                loop {
                    z = h[[m, m]];
                    r = x - z;
                    s = y - z;
                    p = (r * s - w) / h[[m + 1, m]] + h[[m, m + 1]];
                    q = h[[m + 1, m + 1]] - z - r - s;
                    r = h[[m + 2, m + 1]];
                    s = p.abs() + q.abs() + r.abs();
                    p /= s;
                    q /= s;
                    r /= s;
                    if m == l {
                        break;
                    }
                    if h[[m, m - 1]].abs() * (q.abs() + r.abs())
                        < EPS
                            * (p.abs()
                                * (h[[m - 1, m - 1]].abs() + z.abs() + h[[m + 1, m + 1]].abs()))
                    {
                        break;
                    }
                    m -= 1;
                }

                for i in m + 2..=n {
                    h[[i, i - 2]] = 0.0;
                    if i > m + 2 {
                        h[[i, i - 3]] = 0.0;
                    }
                }

                // Double QR step involving rows l..=n and columns m..=n
                for k in m..n {
                    let notlast = k != n - 1;
                    if k != m {
                        p = h[[k, k - 1]];
                        q = h[[k + 1, k - 1]];
                        r = if notlast { h[[k + 2, k - 1]] } else { 0.0 };
                        x = p.abs() + q.abs() + r.abs();
                        if x == 0.0 {
                            continue;
                        }
                        p /= x;
                        q /= x;
                        r /= x;
                    }

                    s = (p * p + q * q + r * r).sqrt();
                    if p < 0.0 {
                        s = -s;
                    }
                    if s != 0.0 {
                        if k != m {
                            h[[k, k - 1]] = -s * x;
                        } else if l != m {
                            h[[k, k - 1]] = -h[[k, k - 1]];
                        }
                        p += s;
                        x = p / s;
                        y = q / s;
                        z = r / s;
                        q /= p;
                        r /= p;

                        // Row modification
                        for j in k..nn {
                            p = h[[k, j]] + q * h[[k + 1, j]];
                            if notlast {
                                p += r * h[[k + 2, j]];
                                h[[k + 2, j]] -= p * z;
                            }
                            h[[k, j]] -= p * x;
                            h[[k + 1, j]] -= p * y;
                        }

                        // Column modification
                        for i in 0..=n.min(k + 3) {
                            p = x * h[[i, k]] + y * h[[i, k + 1]];
                            if notlast {
                                p += z * h[[i, k + 2]];
                                h[[i, k + 2]] -= p * r;
                            }
                            h[[i, k]] -= p;
                            h[[i, k + 1]] -= p * q;
                        }

                        // Accumulate transformations
                        for i in low..=high {
                            p = x * v[[i, k]] + y * v[[i, k + 1]];
                            if notlast {
                                p += z * v[[i, k + 2]];
                                v[[i, k + 2]] -= p * r;
                            }
                            v[[i, k]] -= p;
                            v[[i, k + 1]] -= p * q;
                        }
                    }
                }
            }
        }

        tracing::trace!(n = nn, iterations = total_iter, "hqr2 converged");

        // Back substitute to find vectors of the upper triangular form
        if norm == 0.0 {
            return;
        }

        for n in (0..nn).rev() {
            p = d[n];
            q = e[n];

            if q == 0.0 {
                // Real vector
                let mut l = n;
                h[[n, n]] = 1.0;
                for i in (0..n).rev() {
                    w = h[[i, i]] - p;
                    r = 0.0;
                    for j in l..=n {
                        r += h[[i, j]] * h[[j, n]];
                    }
                    if e[i] < 0.0 {
                        z = w;
                        s = r;
                    } else {
                        l = i;
                        if e[i] == 0.0 {
                            h[[i, n]] = if w != 0.0 { -r / w } else { -r / (EPS * norm) };
                        } else {
                            // Solve real equations
                            x = h[[i, i + 1]];
                            y = h[[i + 1, i]];
                            q = (d[i] - p) * (d[i] - p) + e[i] * e[i];
                            let t = (x * s - z * r) / q;
                            h[[i, n]] = t;
                            h[[i + 1, n]] = if x.abs() > z.abs() {
                                (-r - w * t) / x
                            } else {
                                (-s - y * t) / z
                            };
                        }

                        // Overflow control
                        let t = h[[i, n]].abs();
                        if (EPS * t) * t > 1.0 {
                            for j in i..=n {
                                h[[j, n]] /= t;
                            }
                        }
                    }
                }
            } else if q < 0.0 {
                // Complex vector, last component imaginary
                let mut l = n - 1;
                if h[[n, n - 1]].abs() > h[[n - 1, n]].abs() {
                    h[[n - 1, n - 1]] = q / h[[n, n - 1]];
                    h[[n - 1, n]] = -(h[[n, n]] - p) / h[[n, n - 1]];
                } else {
                    let (cr, ci) = cdiv(0.0, -h[[n - 1, n]], h[[n - 1, n - 1]] - p, q);
                    h[[n - 1, n - 1]] = cr;
                    h[[n - 1, n]] = ci;
                }
                h[[n, n - 1]] = 0.0;
                h[[n, n]] = 1.0;

                for i in (0..n - 1).rev() {
                    let mut ra = 0.0f64;
                    let mut sa = 0.0f64;
                    for j in l..=n {
                        ra += h[[i, j]] * h[[j, n - 1]];
                        sa += h[[i, j]] * h[[j, n]];
                    }
                    w = h[[i, i]] - p;

                    if e[i] < 0.0 {
                        z = w;
                        r = ra;
                        s = sa;
                    } else {
                        l = i;
                        if e[i] == 0.0 {
                            let (cr, ci) = cdiv(-ra, -sa, w, q);
                            h[[i, n - 1]] = cr;
                            h[[i, n]] = ci;
                        } else {
                            // Solve complex equations
                            x = h[[i, i + 1]];
                            y = h[[i + 1, i]];
                            let mut vr = (d[i] - p) * (d[i] - p) + e[i] * e[i] - q * q;
                            let vi = (d[i] - p) * 2.0 * q;
                            if vr == 0.0 && vi == 0.0 {
                                vr = EPS
                                    * norm
                                    * (w.abs() + q.abs() + x.abs() + y.abs() + z.abs());
                            }
                            let (cr, ci) = cdiv(
                                x * r - z * ra + q * sa,
                                x * s - z * sa - q * ra,
                                vr,
                                vi,
                            );
                            h[[i, n - 1]] = cr;
                            h[[i, n]] = ci;
                            if x.abs() > z.abs() + q.abs() {
                                h[[i + 1, n - 1]] =
                                    (-ra - w * h[[i, n - 1]] + q * h[[i, n]]) / x;
                                h[[i + 1, n]] = (-sa - w * h[[i, n]] - q * h[[i, n - 1]]) / x;
                            } else {
                                let (cr, ci) =
                                    cdiv(-r - y * h[[i, n - 1]], -s - y * h[[i, n]], z, q);
                                h[[i + 1, n - 1]] = cr;
                                h[[i + 1, n]] = ci;
                            }
                        }

                        // Overflow control
                        let t = h[[i, n - 1]].abs().max(h[[i, n]].abs());
                        if (EPS * t) * t > 1.0 {
                            for j in i..=n {
                                h[[j, n - 1]] /= t;
                                h[[j, n]] /= t;
                            }
                        }
                    }
                }
            }
        }

        // Back transformation to get eigenvectors of the original matrix
        for j in (low..nn).rev() {
            for i in low..=high {
                z = 0.0;
                for k in low..=j.min(high) {
                    z += v[[i, k]] * h[[k, j]];
                }
                v[[i, j]] = z;
            }
        }
    }
}

/// Complex division `(xr + i·xi) / (yr + i·yi)`
fn cdiv(xr: f64, xi: f64, yr: f64, yi: f64) -> (f64, f64) {
    if yr.abs() > yi.abs() {
        let r = yi / yr;
        let d = yr + r * yi;
        ((xr + r * xi) / d, (xi - r * xr) / d)
    } else {
        let r = yr / yi;
        let d = yi + r * yr;
        ((r * xr + xi) / d, (r * xi - xr) / d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_matrix() {
        let a = Matrix::from_rows(&[[4.0, 0.0], [0.0, 9.0]]).unwrap();
        let eig = a.eigen_decompose().unwrap();
        assert!(eig.is_symmetric());
        assert_eq!(eig.real_eigenvalues(), &[4.0, 9.0]);
        assert_eq!(eig.imag_eigenvalues(), &[0.0, 0.0]);
        let v = eig.v();
        assert!(v.abs().approx_eq(&Matrix::identity(2).unwrap(), 1e-12));
    }

    #[test]
    fn test_symmetric_reconstruction() {
        let a = Matrix::from_rows(&[
            [4.0, 1.0, -2.0, 2.0],
            [1.0, 2.0, 0.0, 1.0],
            [-2.0, 0.0, 3.0, -2.0],
            [2.0, 1.0, -2.0, -1.0],
        ])
        .unwrap();
        let eig = a.eigen_decompose().unwrap();
        let v = eig.v();
        let rebuilt = v.mul(&eig.d()).unwrap().mul(&v.transpose()).unwrap();
        assert!(rebuilt.approx_eq(&a, 1e-10));

        let d = eig.real_eigenvalues();
        assert!(d.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_nonsymmetric_real_eigenvalues() {
        // upper triangular: eigenvalues are the diagonal
        let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [0.0, 4.0, 5.0], [0.0, 0.0, 6.0]]).unwrap();
        let eig = a.eigen_decompose().unwrap();
        assert!(!eig.is_symmetric());
        let mut d = eig.real_eigenvalues().to_vec();
        d.sort_by(|x, y| x.total_cmp(y));
        for (got, want) in d.iter().zip([1.0, 4.0, 6.0]) {
            assert!((got - want).abs() < 1e-10);
        }
        assert!((eig.det().unwrap() - 24.0).abs() < 1e-9);

        // A·V = V·D
        let av = a.mul(&eig.v()).unwrap();
        let vd = eig.v().mul(&eig.d()).unwrap();
        assert!(av.approx_eq(&vd, 1e-10));
    }

    #[test]
    fn test_rotation_has_complex_pair() {
        let a = Matrix::from_rows(&[[0.0, -1.0], [1.0, 0.0]]).unwrap();
        let eig = a.eigen_decompose().unwrap();
        let mut im = eig.imag_eigenvalues().to_vec();
        im.sort_by(|x, y| x.total_cmp(y));
        assert!((im[0] + 1.0).abs() < 1e-12);
        assert!((im[1] - 1.0).abs() < 1e-12);
        assert_eq!(eig.det().unwrap_err(), MatrixError::ComplexEigenvalues);

        let av = a.mul(&eig.v()).unwrap();
        let vd = eig.v().mul(&eig.d()).unwrap();
        assert!(av.approx_eq(&vd, 1e-12));
    }

    #[test]
    fn test_general_matrix_av_equals_vd() {
        let a = Matrix::from_rows(&[
            [1.0, 2.0, 0.0, 1.0],
            [3.0, -1.0, 2.0, 0.0],
            [0.0, 4.0, 1.0, -2.0],
            [2.0, 0.0, -3.0, 1.0],
        ])
        .unwrap();
        let eig = a.eigen_decompose().unwrap();
        let av = a.mul(&eig.v()).unwrap();
        let vd = eig.v().mul(&eig.d()).unwrap();
        assert!(av.approx_eq(&vd, 1e-9));
    }

    #[test]
    fn test_one_by_one() {
        let a = Matrix::filled(1, 1, -3.0).unwrap();
        let eig = a.eigen_decompose().unwrap();
        assert_eq!(eig.real_eigenvalues(), &[-3.0]);
        assert_eq!(eig.det().unwrap(), -3.0);
    }

    #[test]
    fn test_not_square() {
        let a = Matrix::zeros(2, 3).unwrap();
        assert!(matches!(
            a.eigen_decompose(),
            Err(MatrixError::NotSquare { .. })
        ));
    }

    #[test]
    fn test_cdiv() {
        // (1 + 2i) / (3 + 4i) = (11 + 2i) / 25
        let (re, im) = cdiv(1.0, 2.0, 3.0, 4.0);
        assert!((re - 0.44).abs() < 1e-15);
        assert!((im - 0.08).abs() < 1e-15);
    }
}
