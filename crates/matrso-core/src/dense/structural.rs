//! Row and column insertion, appending and deletion
//!
//! Growable edits reuse spare buffer capacity when there is enough of it.
//! Otherwise the buffer grows to twice the required size, or to exactly the
//! required size when the doubled allocation is refused.
//!
//! The circular variants never grow: the buffer is a fixed-capacity ring and
//! the oldest rows (or columns) are discarded to make room.

use super::types::Matrix;
use crate::error::{MatrixError, MatrixResult};

impl Matrix {
    /// Make the buffer hold at least `required` elements
    fn ensure_capacity(&mut self, required: usize) {
        let current = self.data.len();
        if current >= required {
            return;
        }
        let doubled = required.saturating_mul(2);
        let target = match self.data.try_reserve_exact(doubled - current) {
            Ok(()) => doubled,
            Err(err) => {
                tracing::warn!(
                    required,
                    doubled,
                    error = %err,
                    "doubled matrix allocation refused, growing to exact size"
                );
                required
            }
        };
        self.data.resize(target, 0.0);
    }

    /// Insert the rows of `block` before row `index`
    ///
    /// # Examples
    ///
    /// ```
    /// use matrso_core::Matrix;
    ///
    /// let mut a = Matrix::from_rows(&[[1.0, 1.0], [3.0, 3.0]]).unwrap();
    /// a.insert_rows(1, &Matrix::filled(1, 2, 2.0).unwrap()).unwrap();
    /// assert_eq!(a.to_vec(), vec![1.0, 1.0, 2.0, 2.0, 3.0, 3.0]);
    /// ```
    pub fn insert_rows(&mut self, index: usize, block: &Matrix) -> MatrixResult<()> {
        if block.cols != self.cols {
            return Err(MatrixError::mismatch(
                "insert_rows",
                (block.rows, self.cols),
                block.shape(),
            ));
        }
        if index > self.rows {
            return Err(MatrixError::IndexOutOfBounds {
                operation: "insert_rows",
                index,
                bound: self.rows,
            });
        }

        let n = self.cols;
        let old_len = self.rows * n;
        let added = block.rows * n;
        self.ensure_capacity(old_len + added);

        let at = index * n;
        self.data.copy_within(at..old_len, at + added);
        self.data[at..at + added].copy_from_slice(block.as_slice());
        self.rows += block.rows;
        Ok(())
    }

    /// Insert the columns of `block` before column `index`
    pub fn insert_columns(&mut self, index: usize, block: &Matrix) -> MatrixResult<()> {
        if block.rows != self.rows {
            return Err(MatrixError::mismatch(
                "insert_columns",
                (self.rows, block.cols),
                block.shape(),
            ));
        }
        if index > self.cols {
            return Err(MatrixError::IndexOutOfBounds {
                operation: "insert_columns",
                index,
                bound: self.cols,
            });
        }

        let (m, n, k) = (self.rows, self.cols, block.cols);
        let wide = n + k;
        self.ensure_capacity(m * wide);

        // Back to front, so no row overwrites one that has not moved yet
        for i in (0..m).rev() {
            let src = i * n;
            let dst = i * wide;
            self.data.copy_within(src + index..src + n, dst + index + k);
            self.data.copy_within(src..src + index, dst);
            self.data[dst + index..dst + index + k]
                .copy_from_slice(&block.data[i * k..(i + 1) * k]);
        }
        self.cols = wide;
        Ok(())
    }

    /// Append the rows of `block` at the bottom
    pub fn append_rows(&mut self, block: &Matrix) -> MatrixResult<()> {
        self.insert_rows(self.rows, block)
    }

    /// Append the columns of `block` on the right
    pub fn append_columns(&mut self, block: &Matrix) -> MatrixResult<()> {
        self.insert_columns(self.cols, block)
    }

    /// Delete `count` rows starting at `index`
    pub fn delete_rows(&mut self, index: usize, count: usize) -> MatrixResult<()> {
        let end = index.saturating_add(count);
        if end > self.rows {
            return Err(MatrixError::IndexOutOfBounds {
                operation: "delete_rows",
                index: end,
                bound: self.rows,
            });
        }
        if count == self.rows {
            return Err(MatrixError::InvalidDimensions(
                "cannot delete every row of a matrix".to_string(),
            ));
        }
        let n = self.cols;
        self.data.copy_within(end * n..self.rows * n, index * n);
        self.rows -= count;
        Ok(())
    }

    /// Delete `count` columns starting at `index`
    pub fn delete_columns(&mut self, index: usize, count: usize) -> MatrixResult<()> {
        let end = index.saturating_add(count);
        if end > self.cols {
            return Err(MatrixError::IndexOutOfBounds {
                operation: "delete_columns",
                index: end,
                bound: self.cols,
            });
        }
        if count == self.cols {
            return Err(MatrixError::InvalidDimensions(
                "cannot delete every column of a matrix".to_string(),
            ));
        }

        let (m, n) = (self.rows, self.cols);
        let narrow = n - count;
        // Front to back, the destination never runs ahead of the source
        for i in 0..m {
            let src = i * n;
            let dst = i * narrow;
            self.data.copy_within(src..src + index, dst);
            self.data.copy_within(src + end..src + n, dst + index);
        }
        self.cols = narrow;
        Ok(())
    }

    /// Number of rows the current buffer can hold at this width
    pub fn row_capacity(&self) -> usize {
        self.data.len() / self.cols
    }

    /// Number of columns the current buffer can hold at this height
    pub fn column_capacity(&self) -> usize {
        self.data.len() / self.rows
    }

    /// Append rows without growing the buffer.
    ///
    /// When `block` fits in the free row capacity it is appended as with
    /// [`Matrix::append_rows`]. Otherwise the height is kept and the window
    /// slides: the `block.rows` oldest rows are discarded (and, if `block` is
    /// taller than the window, its leading rows too). Returns the number of
    /// rows dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use matrso_core::Matrix;
    ///
    /// // two rows live, room for three
    /// let mut window = Matrix::from_vec(2, 1, vec![1.0, 2.0, 0.0]).unwrap();
    /// let next = |v: f64| Matrix::from_rows(&[[v]]).unwrap();
    ///
    /// assert_eq!(window.append_rows_circular(&next(3.0)).unwrap(), 0);
    /// assert_eq!(window.append_rows_circular(&next(4.0)).unwrap(), 1);
    /// assert_eq!(window.rows(), 3);
    /// assert_eq!(window.to_vec(), vec![2.0, 3.0, 4.0]);
    /// ```
    pub fn append_rows_circular(&mut self, block: &Matrix) -> MatrixResult<usize> {
        if block.cols != self.cols {
            return Err(MatrixError::mismatch(
                "append_rows_circular",
                (block.rows, self.cols),
                block.shape(),
            ));
        }

        if self.rows + block.rows <= self.row_capacity() {
            self.append_rows(block)?;
            return Ok(0);
        }

        let (n, height, k) = (self.cols, self.rows, block.rows);
        if k < height {
            let keep = height - k;
            self.data.copy_within(k * n..height * n, 0);
            self.data[keep * n..height * n].copy_from_slice(block.as_slice());
        } else {
            // The block alone fills the window; keep its newest rows
            let skip = k - height;
            self.data[..height * n].copy_from_slice(&block.as_slice()[skip * n..]);
        }

        tracing::debug!(dropped = k, height, "circular row append discarded oldest rows");
        Ok(k)
    }

    /// Append columns without growing the buffer.
    ///
    /// Column counterpart of [`Matrix::append_rows_circular`]: when `block`
    /// does not fit, the width is kept and the `block.cols` oldest (leftmost)
    /// columns are discarded. Returns the number of columns dropped.
    pub fn append_columns_circular(&mut self, block: &Matrix) -> MatrixResult<usize> {
        if block.rows != self.rows {
            return Err(MatrixError::mismatch(
                "append_columns_circular",
                (self.rows, block.cols),
                block.shape(),
            ));
        }

        if self.cols + block.cols <= self.column_capacity() {
            self.append_columns(block)?;
            return Ok(0);
        }

        let (width, k) = (self.cols, block.cols);
        let (drop_old, drop_new) = if k < width { (k, 0) } else { (width, k - width) };
        let keep = width - drop_old;
        for i in 0..self.rows {
            let row = &mut self.data[i * width..(i + 1) * width];
            row.copy_within(drop_old.., 0);
            row[keep..].copy_from_slice(&block.data[i * k + drop_new..(i + 1) * k]);
        }

        tracing::debug!(dropped = k, width, "circular column append discarded oldest columns");
        Ok(k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(rows: usize, cols: usize) -> Matrix {
        Matrix::from_fn(rows, cols, |i, j| (i * cols + j) as f64).unwrap()
    }

    #[test]
    fn test_insert_rows_grows_to_double() {
        let mut a = seq(2, 2);
        a.append_rows(&Matrix::filled(1, 2, 9.0).unwrap()).unwrap();
        assert_eq!(a.shape(), (3, 2));
        assert_eq!(a.capacity(), 12);
        assert_eq!(a.to_vec(), vec![0.0, 1.0, 2.0, 3.0, 9.0, 9.0]);
    }

    #[test]
    fn test_insert_rows_within_capacity_does_not_grow() {
        let mut a = Matrix::with_capacity(1, 2, 8).unwrap();
        a.insert_rows(0, &seq(2, 2)).unwrap();
        assert_eq!(a.capacity(), 8);
        assert_eq!(a.to_vec(), vec![0.0, 1.0, 2.0, 3.0, 0.0, 0.0]);
    }

    #[test]
    fn test_insert_columns_in_the_middle() {
        let mut a = seq(2, 3);
        a.insert_columns(1, &Matrix::filled(2, 2, -1.0).unwrap()).unwrap();
        assert_eq!(a.shape(), (2, 5));
        assert_eq!(
            a.to_vec(),
            vec![0.0, -1.0, -1.0, 1.0, 2.0, 3.0, -1.0, -1.0, 4.0, 5.0]
        );
    }

    #[test]
    fn test_append_columns() {
        let mut a = seq(2, 1);
        a.append_columns(&seq(2, 1)).unwrap();
        assert_eq!(a.to_vec(), vec![0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_delete_rows_and_columns() {
        let mut a = seq(4, 3);
        a.delete_rows(1, 2).unwrap();
        assert_eq!(a.to_vec(), vec![0.0, 1.0, 2.0, 9.0, 10.0, 11.0]);
        a.delete_columns(0, 2).unwrap();
        assert_eq!(a.to_vec(), vec![2.0, 11.0]);
        assert!(a.delete_columns(0, 1).is_err());
        assert!(a.delete_rows(1, 2).is_err());
    }

    #[test]
    fn test_insert_errors() {
        let mut a = seq(2, 2);
        assert!(a.insert_rows(3, &seq(1, 2)).is_err());
        assert!(a.insert_rows(0, &seq(1, 3)).is_err());
        assert!(a.insert_columns(0, &seq(3, 1)).is_err());
    }

    #[test]
    fn test_circular_rows_fit_without_drop() {
        let mut a = Matrix::from_vec(1, 2, vec![1.0, 1.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
        let dropped = a.append_rows_circular(&seq(2, 2)).unwrap();
        assert_eq!(dropped, 0);
        assert_eq!(a.rows(), 3);
        assert_eq!(a.capacity(), 6);
    }

    #[test]
    fn test_circular_rows_slide_at_constant_height() {
        // two rows live, one free row
        let mut a = Matrix::from_vec(2, 1, vec![1.0, 2.0, 0.0]).unwrap();
        let dropped = a.append_rows_circular(&Matrix::from_rows(&[[3.0], [4.0]]).unwrap()).unwrap();
        assert_eq!(dropped, 2);
        assert_eq!(a.rows(), 2);
        assert_eq!(a.to_vec(), vec![3.0, 4.0]);
        assert_eq!(a.capacity(), 3);
    }

    #[test]
    fn test_circular_rows_block_taller_than_window() {
        let mut a = Matrix::from_vec(1, 1, vec![7.0, 0.0]).unwrap();
        let dropped = a.append_rows_circular(&seq(3, 1)).unwrap();
        assert_eq!(dropped, 3);
        assert_eq!(a.rows(), 1);
        assert_eq!(a.to_vec(), vec![2.0]);
    }

    #[test]
    fn test_circular_columns_drop_oldest() {
        // 2x2 live, room for 3 columns
        let mut a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0, 0.0, 0.0]).unwrap();
        let dropped = a
            .append_columns_circular(&Matrix::from_rows(&[[5.0], [6.0]]).unwrap())
            .unwrap();
        assert_eq!(dropped, 0);
        assert_eq!(a.shape(), (2, 3));

        let dropped = a
            .append_columns_circular(&Matrix::from_rows(&[[7.0], [8.0]]).unwrap())
            .unwrap();
        assert_eq!(dropped, 1);
        assert_eq!(a.shape(), (2, 3));
        assert_eq!(a.to_vec(), vec![2.0, 5.0, 7.0, 4.0, 6.0, 8.0]);
        assert_eq!(a.capacity(), 6);
    }

    #[test]
    fn test_circular_columns_block_wider_than_window() {
        let mut a = Matrix::from_vec(2, 1, vec![1.0, 2.0, 0.0, 0.0]).unwrap();
        let dropped = a.append_columns_circular(&seq(2, 3)).unwrap();
        assert_eq!(dropped, 3);
        assert_eq!(a.shape(), (2, 1));
        assert_eq!(a.to_vec(), vec![2.0, 5.0]);
    }
}
