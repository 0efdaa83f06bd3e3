//! Element access, row/column extraction and sub-matrix copies

use super::types::Matrix;
use crate::error::{MatrixError, MatrixResult};
use std::ops::{Index, IndexMut};

impl Matrix {
    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.rows && j < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            i,
            j,
            self.rows,
            self.cols
        );
        i * self.cols + j
    }

    /// Element at `(i, j)`
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds; see [`Matrix::try_get`].
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[self.offset(i, j)]
    }

    /// Element at `(i, j)`, or `None` outside the matrix
    #[inline]
    pub fn try_get(&self, i: usize, j: usize) -> Option<f64> {
        (i < self.rows && j < self.cols).then(|| self.data[i * self.cols + j])
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        let k = self.offset(i, j);
        self.data[k] = value;
    }

    /// `a[i][j] += value`
    #[inline]
    pub fn add_at(&mut self, i: usize, j: usize, value: f64) {
        let k = self.offset(i, j);
        self.data[k] += value;
    }

    /// `a[i][j] -= value`
    #[inline]
    pub fn sub_at(&mut self, i: usize, j: usize, value: f64) {
        let k = self.offset(i, j);
        self.data[k] -= value;
    }

    /// `a[i][j] *= value`
    #[inline]
    pub fn mul_at(&mut self, i: usize, j: usize, value: f64) {
        let k = self.offset(i, j);
        self.data[k] *= value;
    }

    /// `a[i][j] /= value`
    #[inline]
    pub fn div_at(&mut self, i: usize, j: usize, value: f64) {
        let k = self.offset(i, j);
        self.data[k] /= value;
    }

    /// Row `i` as a slice
    pub fn row(&self, i: usize) -> MatrixResult<&[f64]> {
        if i >= self.rows {
            return Err(MatrixError::IndexOutOfBounds {
                operation: "row",
                index: i,
                bound: self.rows,
            });
        }
        Ok(&self.data[i * self.cols..(i + 1) * self.cols])
    }

    /// Copy of column `j`
    pub fn column(&self, j: usize) -> MatrixResult<Vec<f64>> {
        if j >= self.cols {
            return Err(MatrixError::IndexOutOfBounds {
                operation: "column",
                index: j,
                bound: self.cols,
            });
        }
        Ok((0..self.rows).map(|i| self.data[i * self.cols + j]).collect())
    }

    /// Copy the block spanning rows `r0..=r1` and columns `c0..=c1`
    ///
    /// # Examples
    ///
    /// ```
    /// use matrso_core::Matrix;
    ///
    /// let a = Matrix::from_fn(4, 4, |i, j| (i * 4 + j) as f64).unwrap();
    /// let b = a.get_submatrix(1, 2, 2, 3).unwrap();
    /// assert_eq!(b.to_vec(), vec![6.0, 7.0, 10.0, 11.0]);
    /// ```
    pub fn get_submatrix(&self, r0: usize, r1: usize, c0: usize, c1: usize) -> MatrixResult<Matrix> {
        self.check_block("get_submatrix", r0, r1, c0, c1)?;
        Matrix::from_fn(r1 - r0 + 1, c1 - c0 + 1, |i, j| {
            self.data[(r0 + i) * self.cols + c0 + j]
        })
    }

    /// Overwrite the block whose top-left corner is `(r0, c0)` with `block`
    pub fn set_submatrix(&mut self, r0: usize, c0: usize, block: &Matrix) -> MatrixResult<()> {
        self.check_block(
            "set_submatrix",
            r0,
            r0 + block.rows - 1,
            c0,
            c0 + block.cols - 1,
        )?;
        for i in 0..block.rows {
            let dst = (r0 + i) * self.cols + c0;
            self.data[dst..dst + block.cols]
                .copy_from_slice(&block.data[i * block.cols..(i + 1) * block.cols]);
        }
        Ok(())
    }

    fn check_block(
        &self,
        operation: &'static str,
        r0: usize,
        r1: usize,
        c0: usize,
        c1: usize,
    ) -> MatrixResult<()> {
        if r0 > r1 || r1 >= self.rows {
            return Err(MatrixError::IndexOutOfBounds {
                operation,
                index: r1.max(r0),
                bound: self.rows,
            });
        }
        if c0 > c1 || c1 >= self.cols {
            return Err(MatrixError::IndexOutOfBounds {
                operation,
                index: c1.max(c0),
                bound: self.cols,
            });
        }
        Ok(())
    }

    /// Iterate over the rows as slices
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.as_slice().chunks_exact(self.cols)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[self.offset(i, j)]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        let k = self.offset(i, j);
        &mut self.data[k]
    }
}
