//! Strided views over flat row-major buffers
//!
//! A view is `(buffer, offset, stride, rows, cols)`: element `(i, j)` lives at
//! `buffer[offset + i * stride + j]`. Views are passed by value and every
//! sub-block is a new view, so recursive kernels never renegotiate raw
//! offsets inline.

/// Read-only strided view of a row-major matrix block
#[derive(Debug, Clone, Copy)]
pub struct MatView<'a> {
    data: &'a [f64],
    offset: usize,
    stride: usize,
    rows: usize,
    cols: usize,
}

impl<'a> MatView<'a> {
    /// View `rows×cols` contiguous elements at the start of `data`
    ///
    /// # Panics
    ///
    /// Panics if `data` holds fewer than `rows * cols` elements.
    pub fn new(data: &'a [f64], rows: usize, cols: usize) -> Self {
        Self::with_stride(data, 0, cols, rows, cols)
    }

    /// View with an explicit offset and row stride
    ///
    /// # Panics
    ///
    /// Panics if the last element of the block lies outside `data`.
    pub fn with_stride(
        data: &'a [f64],
        offset: usize,
        stride: usize,
        rows: usize,
        cols: usize,
    ) -> Self {
        assert!(
            rows == 0 || cols == 0 || offset + (rows - 1) * stride + cols <= data.len(),
            "view {}x{} at offset {} with stride {} exceeds buffer of {}",
            rows,
            cols,
            offset,
            stride,
            data.len()
        );
        Self {
            data,
            offset,
            stride,
            rows,
            cols,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.rows && j < self.cols);
        self.data[self.offset + i * self.stride + j]
    }

    /// Row `i` as a contiguous slice
    #[inline]
    pub fn row(&self, i: usize) -> &'a [f64] {
        let start = self.offset + i * self.stride;
        &self.data[start..start + self.cols]
    }

    /// Sub-block starting at `(row, col)`
    pub fn block(&self, row: usize, col: usize, rows: usize, cols: usize) -> MatView<'a> {
        debug_assert!(row + rows <= self.rows && col + cols <= self.cols);
        MatView {
            data: self.data,
            offset: self.offset + row * self.stride + col,
            stride: self.stride,
            rows,
            cols,
        }
    }
}

/// Mutable strided view of a row-major matrix block
#[derive(Debug)]
pub struct MatViewMut<'a> {
    data: &'a mut [f64],
    offset: usize,
    stride: usize,
    rows: usize,
    cols: usize,
}

impl<'a> MatViewMut<'a> {
    /// View `rows×cols` contiguous elements at the start of `data`
    ///
    /// # Panics
    ///
    /// Panics if `data` holds fewer than `rows * cols` elements.
    pub fn new(data: &'a mut [f64], rows: usize, cols: usize) -> Self {
        Self::with_stride(data, 0, cols, rows, cols)
    }

    /// View with an explicit offset and row stride
    ///
    /// # Panics
    ///
    /// Panics if the last element of the block lies outside `data`.
    pub fn with_stride(
        data: &'a mut [f64],
        offset: usize,
        stride: usize,
        rows: usize,
        cols: usize,
    ) -> Self {
        assert!(
            rows == 0 || cols == 0 || offset + (rows - 1) * stride + cols <= data.len(),
            "view {}x{} at offset {} with stride {} exceeds buffer of {}",
            rows,
            cols,
            offset,
            stride,
            data.len()
        );
        Self {
            data,
            offset,
            stride,
            rows,
            cols,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.rows && j < self.cols);
        self.offset + i * self.stride + j
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[self.index(i, j)]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        let idx = self.index(i, j);
        self.data[idx] = value;
    }

    #[inline]
    pub fn add(&mut self, i: usize, j: usize, value: f64) {
        let idx = self.index(i, j);
        self.data[idx] += value;
    }

    /// Row `i` as a mutable contiguous slice
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        let start = self.offset + i * self.stride;
        &mut self.data[start..start + self.cols]
    }

    /// Reborrow as a read-only view
    pub fn as_view(&self) -> MatView<'_> {
        MatView {
            data: &*self.data,
            offset: self.offset,
            stride: self.stride,
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Mutable sub-block starting at `(row, col)`, reborrowing `self`
    pub fn block_mut(&mut self, row: usize, col: usize, rows: usize, cols: usize) -> MatViewMut<'_> {
        debug_assert!(row + rows <= self.rows && col + cols <= self.cols);
        MatViewMut {
            data: &mut *self.data,
            offset: self.offset + row * self.stride + col,
            stride: self.stride,
            rows,
            cols,
        }
    }

    /// Set every element of the view to `value`
    pub fn fill(&mut self, value: f64) {
        for i in 0..self.rows {
            self.row_mut(i).fill(value);
        }
    }

    /// Overwrite with `a + b`
    pub fn assign_sum(&mut self, a: MatView<'_>, b: MatView<'_>) {
        self.zip_assign(a, b, |x, y| x + y);
    }

    /// Overwrite with `a - b`
    pub fn assign_diff(&mut self, a: MatView<'_>, b: MatView<'_>) {
        self.zip_assign(a, b, |x, y| x - y);
    }

    /// Accumulate `a` element-wise
    pub fn add_assign(&mut self, a: MatView<'_>) {
        debug_assert!(a.rows() == self.rows && a.cols() == self.cols);
        for i in 0..self.rows {
            let src = a.row(i);
            for (dst, &x) in self.row_mut(i).iter_mut().zip(src) {
                *dst += x;
            }
        }
    }

    /// Subtract `a` element-wise
    pub fn sub_assign(&mut self, a: MatView<'_>) {
        debug_assert!(a.rows() == self.rows && a.cols() == self.cols);
        for i in 0..self.rows {
            let src = a.row(i);
            for (dst, &x) in self.row_mut(i).iter_mut().zip(src) {
                *dst -= x;
            }
        }
    }

    /// Overwrite with `a - self`
    pub fn rsub_assign(&mut self, a: MatView<'_>) {
        debug_assert!(a.rows() == self.rows && a.cols() == self.cols);
        for i in 0..self.rows {
            let src = a.row(i);
            for (dst, &x) in self.row_mut(i).iter_mut().zip(src) {
                *dst = x - *dst;
            }
        }
    }

    /// Apply `op(dst, src)` between two equally sized blocks of this view.
    ///
    /// Both blocks are addressed relative to the view, so they may share the
    /// underlying buffer; they must not overlap.
    pub fn combine_blocks<F>(
        &mut self,
        dst: (usize, usize),
        src: (usize, usize),
        rows: usize,
        cols: usize,
        op: F,
    ) where
        F: Fn(f64, f64) -> f64,
    {
        for i in 0..rows {
            for j in 0..cols {
                let s = self.get(src.0 + i, src.1 + j);
                let d = self.index(dst.0 + i, dst.1 + j);
                self.data[d] = op(self.data[d], s);
            }
        }
    }

    fn zip_assign<F>(&mut self, a: MatView<'_>, b: MatView<'_>, op: F)
    where
        F: Fn(f64, f64) -> f64,
    {
        debug_assert!(a.rows() == self.rows && a.cols() == self.cols);
        debug_assert!(b.rows() == self.rows && b.cols() == self.cols);
        for i in 0..self.rows {
            let (ra, rb) = (a.row(i), b.row(i));
            for ((dst, &x), &y) in self.row_mut(i).iter_mut().zip(ra).zip(rb) {
                *dst = op(x, y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_indexing_with_stride() {
        let data: Vec<f64> = (0..12).map(|x| x as f64).collect();
        // 3x4 buffer, view the 2x2 block at (1, 1)
        let v = MatView::with_stride(&data, 5, 4, 2, 2);
        assert_eq!(v.get(0, 0), 5.0);
        assert_eq!(v.get(0, 1), 6.0);
        assert_eq!(v.get(1, 0), 9.0);
        assert_eq!(v.row(1), &[9.0, 10.0]);
    }

    #[test]
    fn test_nested_blocks() {
        let data: Vec<f64> = (0..16).map(|x| x as f64).collect();
        let v = MatView::new(&data, 4, 4);
        let q = v.block(2, 2, 2, 2).block(1, 0, 1, 2);
        assert_eq!(q.get(0, 0), 14.0);
        assert_eq!(q.get(0, 1), 15.0);
    }

    #[test]
    fn test_combine_blocks_in_same_view() {
        let mut data = vec![1.0, 2.0, 3.0, 4.0];
        let mut v = MatViewMut::new(&mut data, 2, 2);
        // right column -= left column
        v.combine_blocks((0, 1), (0, 0), 2, 1, |d, s| d - s);
        assert_eq!(data, vec![1.0, 1.0, 3.0, 1.0]);
    }

    #[test]
    fn test_assign_sum_and_diff() {
        let a = vec![1.0, 2.0, 3.0, 4.0];
        let b = vec![4.0, 3.0, 2.0, 1.0];
        let mut out = vec![0.0f64; 4];
        {
            let mut v = MatViewMut::new(&mut out, 2, 2);
            v.assign_sum(MatView::new(&a, 2, 2), MatView::new(&b, 2, 2));
        }
        assert_eq!(out, vec![5.0; 4]);
        {
            let mut v = MatViewMut::new(&mut out, 2, 2);
            v.assign_diff(MatView::new(&a, 2, 2), MatView::new(&b, 2, 2));
        }
        assert_eq!(out, vec![-3.0, -1.0, 1.0, 3.0]);
    }

    #[test]
    #[should_panic(expected = "exceeds buffer")]
    fn test_view_out_of_range_panics() {
        let data = vec![0.0f64; 5];
        let _ = MatView::new(&data, 2, 3);
    }
}
