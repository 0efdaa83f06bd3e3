//! Transpose, flip (reverse rows) and mirror (reverse columns)

use super::types::Matrix;

impl Matrix {
    /// Transposed copy
    pub fn transpose(&self) -> Matrix {
        let (m, n) = (self.rows, self.cols);
        let mut data = vec![0.0f64; m * n];
        for (i, row) in self.as_slice().chunks_exact(n).enumerate() {
            for (j, &v) in row.iter().enumerate() {
                data[j * m + i] = v;
            }
        }
        Matrix {
            rows: n,
            cols: m,
            data,
        }
    }

    /// Transpose in place.
    ///
    /// Square matrices swap across the diagonal without allocating; other
    /// shapes need a new buffer since the row stride changes.
    pub fn transpose_inplace(&mut self) {
        if self.is_square() {
            let n = self.cols;
            for i in 0..n {
                for j in i + 1..n {
                    self.data.swap(i * n + j, j * n + i);
                }
            }
        } else {
            *self = self.transpose();
        }
    }

    /// Copy with the row order reversed
    pub fn flip(&self) -> Matrix {
        let mut out = self.compact();
        out.flip_inplace();
        out
    }

    pub fn flip_inplace(&mut self) {
        let (m, n) = (self.rows, self.cols);
        for i in 0..m / 2 {
            let (top, bottom) = self.data.split_at_mut((m - 1 - i) * n);
            top[i * n..(i + 1) * n].swap_with_slice(&mut bottom[..n]);
        }
    }

    /// Copy with the column order reversed
    pub fn mirror(&self) -> Matrix {
        let mut out = self.compact();
        out.mirror_inplace();
        out
    }

    pub fn mirror_inplace(&mut self) {
        let n = self.cols;
        for row in self.as_mut_slice().chunks_exact_mut(n) {
            row.reverse();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transpose_rectangular() {
        let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let t = a.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.to_vec(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        let mut b = a.clone();
        b.transpose_inplace();
        assert_eq!(b.to_vec(), t.to_vec());
    }

    #[test]
    fn test_transpose_inplace_square_keeps_buffer() {
        let mut a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0, 0.0, 0.0]).unwrap();
        a.transpose_inplace();
        assert_eq!(a.to_vec(), vec![1.0, 3.0, 2.0, 4.0]);
        assert_eq!(a.capacity(), 6);
    }

    #[test]
    fn test_flip_and_mirror() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
        assert_eq!(a.flip().to_vec(), vec![5.0, 6.0, 3.0, 4.0, 1.0, 2.0]);
        assert_eq!(a.mirror().to_vec(), vec![2.0, 1.0, 4.0, 3.0, 6.0, 5.0]);
        assert_eq!(a.flip().flip().to_vec(), a.to_vec());
    }
}
