//! Whole-matrix arithmetic and the operator overloads
//!
//! Every operation has a copying form returning a new matrix and an
//! `_inplace` form mutating the receiver. Operator overloads on references
//! call the copying forms and panic on dimension mismatch.

use super::types::Matrix;
use crate::error::{MatrixError, MatrixResult};
use matrso_kernels::{multiply_with, MulConfig};

impl Matrix {
    fn zip_inplace<F>(&mut self, other: &Matrix, operation: &'static str, op: F) -> MatrixResult<()>
    where
        F: Fn(f64, f64) -> f64,
    {
        self.require_same_shape(other, operation)?;
        for (a, &b) in self.as_mut_slice().iter_mut().zip(other.as_slice()) {
            *a = op(*a, b);
        }
        Ok(())
    }

    /// Element-wise sum
    pub fn add(&self, other: &Matrix) -> MatrixResult<Matrix> {
        let mut out = self.compact();
        out.add_inplace(other)?;
        Ok(out)
    }

    pub fn add_inplace(&mut self, other: &Matrix) -> MatrixResult<()> {
        self.zip_inplace(other, "add", |a, b| a + b)
    }

    /// Element-wise difference
    pub fn sub(&self, other: &Matrix) -> MatrixResult<Matrix> {
        let mut out = self.compact();
        out.sub_inplace(other)?;
        Ok(out)
    }

    pub fn sub_inplace(&mut self, other: &Matrix) -> MatrixResult<()> {
        self.zip_inplace(other, "sub", |a, b| a - b)
    }

    /// Element-wise (Hadamard) product
    pub fn elem_mul(&self, other: &Matrix) -> MatrixResult<Matrix> {
        let mut out = self.compact();
        out.elem_mul_inplace(other)?;
        Ok(out)
    }

    pub fn elem_mul_inplace(&mut self, other: &Matrix) -> MatrixResult<()> {
        self.zip_inplace(other, "elem_mul", |a, b| a * b)
    }

    /// Element-wise quotient
    pub fn elem_div(&self, other: &Matrix) -> MatrixResult<Matrix> {
        let mut out = self.compact();
        out.elem_div_inplace(other)?;
        Ok(out)
    }

    pub fn elem_div_inplace(&mut self, other: &Matrix) -> MatrixResult<()> {
        self.zip_inplace(other, "elem_div", |a, b| a / b)
    }

    /// Multiply every element by `factor`
    pub fn scale(&self, factor: f64) -> Matrix {
        self.map(|x| x * factor)
    }

    pub fn scale_inplace(&mut self, factor: f64) {
        self.map_inplace(|x| x * factor);
    }

    /// Add `value` to every element
    pub fn add_scalar(&self, value: f64) -> Matrix {
        self.map(|x| x + value)
    }

    pub fn add_scalar_inplace(&mut self, value: f64) {
        self.map_inplace(|x| x + value);
    }

    /// Subtract `value` from every element
    pub fn sub_scalar(&self, value: f64) -> Matrix {
        self.map(|x| x - value)
    }

    pub fn sub_scalar_inplace(&mut self, value: f64) {
        self.map_inplace(|x| x - value);
    }

    /// Divide every element by `value`
    pub fn div_scalar(&self, value: f64) -> Matrix {
        self.map(|x| x / value)
    }

    pub fn div_scalar_inplace(&mut self, value: f64) {
        self.map_inplace(|x| x / value);
    }

    /// Matrix product `self · other` with the default kernel cutoffs
    ///
    /// # Examples
    ///
    /// ```
    /// use matrso_core::Matrix;
    ///
    /// let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// let b = Matrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]).unwrap();
    /// let c = a.mul(&b).unwrap();
    /// assert_eq!(c.to_vec(), vec![19.0, 22.0, 43.0, 50.0]);
    /// ```
    pub fn mul(&self, other: &Matrix) -> MatrixResult<Matrix> {
        self.mul_with(other, &MulConfig::default())
    }

    /// Matrix product with explicit kernel cutoffs
    pub fn mul_with(&self, other: &Matrix, config: &MulConfig) -> MatrixResult<Matrix> {
        if self.cols != other.rows {
            return Err(MatrixError::mismatch(
                "mul",
                (self.cols, other.cols),
                other.shape(),
            ));
        }
        let data = multiply_with(
            config,
            self.cols,
            self.rows,
            other.cols,
            self.as_slice(),
            other.as_slice(),
        )?;
        Matrix::from_vec(self.rows, other.cols, data)
    }

    /// Replace `self` with `self · other`
    pub fn mul_inplace(&mut self, other: &Matrix) -> MatrixResult<()> {
        *self = self.mul(other)?;
        Ok(())
    }

    /// Copy with the buffer trimmed to exactly `rows * cols`
    pub(crate) fn compact(&self) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.to_vec(),
        }
    }
}

impl<'b> std::ops::Add<&'b Matrix> for &Matrix {
    type Output = Matrix;

    fn add(self, other: &'b Matrix) -> Matrix {
        Matrix::add(self, other).expect("Matrix addition failed: dimension mismatch")
    }
}

impl<'b> std::ops::Sub<&'b Matrix> for &Matrix {
    type Output = Matrix;

    fn sub(self, other: &'b Matrix) -> Matrix {
        Matrix::sub(self, other).expect("Matrix subtraction failed: dimension mismatch")
    }
}

impl<'b> std::ops::Mul<&'b Matrix> for &Matrix {
    type Output = Matrix;

    fn mul(self, other: &'b Matrix) -> Matrix {
        Matrix::mul(self, other).expect("Matrix multiplication failed: dimension mismatch")
    }
}

impl std::ops::Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, factor: f64) -> Matrix {
        self.scale(factor)
    }
}

impl std::ops::Div<f64> for &Matrix {
    type Output = Matrix;

    fn div(self, value: f64) -> Matrix {
        self.div_scalar(value)
    }
}

impl std::ops::Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        self.map(|x| -x)
    }
}

impl std::ops::AddAssign<&Matrix> for Matrix {
    fn add_assign(&mut self, other: &Matrix) {
        self.add_inplace(other)
            .expect("Matrix addition failed: dimension mismatch");
    }
}

impl std::ops::SubAssign<&Matrix> for Matrix {
    fn sub_assign(&mut self, other: &Matrix) {
        self.sub_inplace(other)
            .expect("Matrix subtraction failed: dimension mismatch");
    }
}

impl std::ops::MulAssign<f64> for Matrix {
    fn mul_assign(&mut self, factor: f64) {
        self.scale_inplace(factor);
    }
}
