//! Element-wise maps
//!
//! These apply a scalar function to every cell and are distinct from the
//! matrix functions in `functions.rs` (`exp`, `ln`, ...), which are true
//! matrix functions computed through the multiplication kernel.

use super::types::Matrix;

macro_rules! elementwise_maps {
    ($($(#[$doc:meta])* $name:ident, $inplace:ident => $f:expr;)*) => {
        impl Matrix {
            $(
                $(#[$doc])*
                pub fn $name(&self) -> Matrix {
                    self.map($f)
                }

                $(#[$doc])*
                pub fn $inplace(&mut self) {
                    self.map_inplace($f);
                }
            )*
        }
    };
}

elementwise_maps! {
    /// Element-wise `eˣ`
    elem_exp, elem_exp_inplace => f64::exp;
    /// Element-wise natural logarithm
    elem_ln, elem_ln_inplace => f64::ln;
    elem_sin, elem_sin_inplace => f64::sin;
    elem_cos, elem_cos_inplace => f64::cos;
    elem_tan, elem_tan_inplace => f64::tan;
    elem_asin, elem_asin_inplace => f64::asin;
    elem_acos, elem_acos_inplace => f64::acos;
    elem_atan, elem_atan_inplace => f64::atan;
    elem_sinh, elem_sinh_inplace => f64::sinh;
    elem_cosh, elem_cosh_inplace => f64::cosh;
    elem_tanh, elem_tanh_inplace => f64::tanh;
    elem_asinh, elem_asinh_inplace => f64::asinh;
    elem_acosh, elem_acosh_inplace => f64::acosh;
    elem_atanh, elem_atanh_inplace => f64::atanh;
    abs, abs_inplace => f64::abs;
    floor, floor_inplace => f64::floor;
    ceil, ceil_inplace => f64::ceil;
    /// Round half away from zero
    round, round_inplace => f64::round;
    /// `-1`, `0` or `1` by sign; NaN stays NaN
    signum, signum_inplace => |x: f64| if x == 0.0 { 0.0 } else { x.signum() };
    sqrt, sqrt_inplace => f64::sqrt;
}

impl Matrix {
    /// Apply `f` to every element, returning a new matrix
    ///
    /// # Examples
    ///
    /// ```
    /// use matrso_core::Matrix;
    ///
    /// let a = Matrix::from_rows(&[[1.0, -2.0]]).unwrap();
    /// assert_eq!(a.map(|x| x * x).to_vec(), vec![1.0, 4.0]);
    /// ```
    pub fn map<F>(&self, f: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.as_slice().iter().map(|&x| f(x)).collect(),
        }
    }

    /// Apply `f` to every element in place
    pub fn map_inplace<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64,
    {
        for x in self.as_mut_slice() {
            *x = f(*x);
        }
    }

    /// `atan2(self, other)` element-wise
    pub fn elem_atan2(&self, other: &Matrix) -> crate::MatrixResult<Matrix> {
        self.require_same_shape(other, "elem_atan2")?;
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .as_slice()
                .iter()
                .zip(other.as_slice())
                .map(|(&y, &x)| y.atan2(x))
                .collect(),
        })
    }

    /// Raise every element to the power `p`
    pub fn elem_powf(&self, p: f64) -> Matrix {
        self.map(|x| x.powf(p))
    }

    pub fn elem_powf_inplace(&mut self, p: f64) {
        self.map_inplace(|x| x.powf(p));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_and_inplace_agree() {
        let a = Matrix::from_rows(&[[0.25, -0.5], [1.5, 2.0]]).unwrap();
        let mut b = a.clone();
        b.elem_sin_inplace();
        assert_eq!(a.elem_sin().to_vec(), b.to_vec());
        // the copying form leaves the receiver untouched
        assert_eq!(a.get(0, 0), 0.25);
    }

    #[test]
    fn test_rounding_family() {
        let a = Matrix::from_rows(&[[-1.5, 0.0, 2.4, 2.5]]).unwrap();
        assert_eq!(a.floor().to_vec(), vec![-2.0, 0.0, 2.0, 2.0]);
        assert_eq!(a.ceil().to_vec(), vec![-1.0, 0.0, 3.0, 3.0]);
        assert_eq!(a.round().to_vec(), vec![-2.0, 0.0, 2.0, 3.0]);
        assert_eq!(a.signum().to_vec(), vec![-1.0, 0.0, 1.0, 1.0]);
        assert_eq!(a.abs().to_vec(), vec![1.5, 0.0, 2.4, 2.5]);
    }

    #[test]
    fn test_inverse_pairs() {
        let a = Matrix::from_rows(&[[0.1, 0.2], [0.3, 0.4]]).unwrap();
        assert!(a.elem_tanh().elem_atanh().approx_eq(&a, 1e-12));
        assert!(a.elem_exp().elem_ln().approx_eq(&a, 1e-12));
        assert!(a.elem_sinh().elem_asinh().approx_eq(&a, 1e-12));
        assert!(a.sqrt().elem_powf(2.0).approx_eq(&a, 1e-12));
    }
}
