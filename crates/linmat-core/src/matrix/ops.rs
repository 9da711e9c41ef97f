//! Element-wise arithmetic, scaling, transpose and approximate equality.
//!
//! Implements `Add`, `Sub` for `Matrix op Matrix` (same shape, panics on
//! mismatch), `Mul`/`Div` by an `f64` scalar, and `Neg`. The `*_checked`
//! methods return [`CoreError::DimensionMismatch`] instead of panicking.
//! Matrix-matrix `Mul` lives in [`crate::linalg::matmul`].

use core::ops::{Add, Div, DivAssign, Mul, MulAssign, Neg, Sub};

use crate::error::Result;

use super::Matrix;

/// Absolute tolerance used by [`Matrix::feql`] and invertibility checks.
pub const FEQL_EPSILON: f64 = 1e-9;

// ======================================================================
// Matrix + Matrix  (element-wise, same shape, panics on mismatch)
// ======================================================================

macro_rules! impl_matrix_binop {
    ($trait:ident, $method:ident, $checked:ident) => {
        impl $trait for Matrix {
            type Output = Matrix;

            fn $method(self, rhs: Matrix) -> Matrix {
                (&self).$method(&rhs)
            }
        }

        impl $trait for &Matrix {
            type Output = Matrix;

            fn $method(self, rhs: &Matrix) -> Matrix {
                match self.$checked(rhs) {
                    Ok(m) => m,
                    Err(e) => panic!("{e}"),
                }
            }
        }
    };
}

impl_matrix_binop!(Add, add, add_checked);
impl_matrix_binop!(Sub, sub, sub_checked);

// ======================================================================
// Matrix * scalar, Matrix / scalar
// ======================================================================

macro_rules! impl_scalar_binop {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl $trait<f64> for Matrix {
            type Output = Matrix;

            fn $method(mut self, rhs: f64) -> Matrix {
                self.apply(|a| a $op rhs);
                self
            }
        }

        impl $trait<f64> for &Matrix {
            type Output = Matrix;

            fn $method(self, rhs: f64) -> Matrix {
                self.map(|a| a $op rhs)
            }
        }

        impl $assign_trait<f64> for Matrix {
            fn $assign_method(&mut self, rhs: f64) {
                self.apply(|a| a $op rhs);
            }
        }
    };
}

impl_scalar_binop!(Mul, mul, MulAssign, mul_assign, *);
impl_scalar_binop!(Div, div, DivAssign, div_assign, /);

impl Mul<Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        rhs * self
    }
}

impl Mul<&Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Matrix {
        rhs * self
    }
}

// ======================================================================
// Negation
// ======================================================================

impl Neg for Matrix {
    type Output = Matrix;

    fn neg(mut self) -> Matrix {
        self.apply(|a| -a);
        self
    }
}

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        self.map(|a| -a)
    }
}

// ======================================================================
// Fallible arithmetic, transpose, comparison
// ======================================================================

impl Matrix {
    /// Element-wise addition, returning `Err` on shape mismatch.
    pub fn add_checked(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_map(other, "add", |a, b| a + b)
    }

    /// Element-wise subtraction, returning `Err` on shape mismatch.
    pub fn sub_checked(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_map(other, "sub", |a, b| a - b)
    }

    /// A new `cols x rows` matrix with `result[(c, r)] == self[(r, c)]`.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let m = Matrix::from_rows(&[[1.0, 2.0, 3.0]]).unwrap();
    /// let t = m.transpose();
    /// assert_eq!(t.shape(), (3, 1));
    /// assert_eq!(t[(2, 0)], 3.0);
    /// ```
    pub fn transpose(&self) -> Matrix {
        let (rows, cols) = self.shape();
        let mut data = vec![0.0; self.len()];
        for c in 0..cols {
            let src = &self.data[c * rows..(c + 1) * rows];
            // Column c of `self` becomes row c of the result, which has `cols` rows.
            for (r, &v) in src.iter().enumerate() {
                data[r * cols + c] = v;
            }
        }
        Matrix::from_raw(cols, rows, data)
    }

    /// Approximate equality with the default [`FEQL_EPSILON`] tolerance.
    pub fn feql(&self, other: &Matrix) -> bool {
        self.feql_eps(other, FEQL_EPSILON)
    }

    /// `true` if shapes match and every pair of elements differs by at most
    /// `eps` in absolute value.
    pub fn feql_eps(&self, other: &Matrix, eps: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(&a, &b)| a == b || (a - b).abs() <= eps)
    }

    /// Largest absolute element-wise difference, or `None` on shape mismatch.
    pub fn max_abs_diff(&self, other: &Matrix) -> Option<f64> {
        if self.shape() != other.shape() {
            return None;
        }
        Some(
            self.data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| (a - b).abs())
                .fold(0.0, f64::max),
        )
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn m(rows: &[[f64; 2]]) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_add_sub() {
        let a = m(&[[1.0, 2.0], [3.0, 4.0]]);
        let b = m(&[[10.0, 20.0], [30.0, 40.0]]);
        assert_eq!(&a + &b, m(&[[11.0, 22.0], [33.0, 44.0]]));
        assert_eq!(b.clone() - a.clone(), m(&[[9.0, 18.0], [27.0, 36.0]]));
    }

    #[test]
    fn test_add_checked_mismatch() {
        let a = Matrix::zeros(2, 2);
        let b = Matrix::zeros(2, 3);
        assert_eq!(
            a.add_checked(&b),
            Err(CoreError::DimensionMismatch {
                op: "add",
                lhs: (2, 2),
                rhs: (2, 3)
            })
        );
        assert!(a.sub_checked(&b).is_err());
    }

    #[test]
    #[should_panic(expected = "dimension mismatch in sub")]
    fn test_sub_operator_mismatch_panics() {
        let _ = Matrix::zeros(2, 2) - Matrix::zeros(3, 2);
    }

    #[test]
    fn test_scalar_mul_div() {
        let a = m(&[[1.0, -2.0], [3.0, 4.5]]);
        let s = 2.5;
        let scaled = &a * s;
        for r in 0..2 {
            for c in 0..2 {
                assert_eq!(scaled[(r, c)], s * a[(r, c)]);
            }
        }
        assert_eq!(s * &a, scaled);
        assert_eq!(&scaled / s, a);
    }

    #[test]
    fn test_scalar_assign() {
        let mut a = m(&[[1.0, 2.0], [3.0, 4.0]]);
        a *= 3.0;
        assert_eq!(a, m(&[[3.0, 6.0], [9.0, 12.0]]));
        a /= 3.0;
        assert_eq!(a, m(&[[1.0, 2.0], [3.0, 4.0]]));
    }

    #[test]
    fn test_neg() {
        let a = m(&[[1.0, -2.0], [0.0, 4.0]]);
        assert_eq!(-&a, m(&[[-1.0, 2.0], [-0.0, -4.0]]));
    }

    #[test]
    fn test_transpose() {
        let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let t = a.transpose();
        assert_eq!(t.shape(), (3, 2));
        for r in 0..2 {
            for c in 0..3 {
                assert_eq!(t[(c, r)], a[(r, c)]);
            }
        }
    }

    #[test]
    fn test_transpose_involution() {
        let a = Matrix::from_fn(5, 3, |r, c| (r as f64) * 0.3 - (c as f64) * 1.7);
        assert_eq!(a.transpose().transpose(), a);
    }

    #[test]
    fn test_feql() {
        let a = m(&[[1.0, 2.0], [3.0, 4.0]]);
        let b = a.map(|x| x + 1e-12);
        assert_ne!(a, b);
        assert!(a.feql(&b));
        assert!(!a.feql(&a.map(|x| x + 1e-3)));
        assert!(a.feql_eps(&a.map(|x| x + 1e-3), 1e-2));
        assert!(!a.feql(&Matrix::zeros(1, 4)));
    }

    #[test]
    fn test_max_abs_diff() {
        let a = m(&[[1.0, 2.0], [3.0, 4.0]]);
        let b = m(&[[1.0, 2.5], [3.0, 3.0]]);
        assert_eq!(a.max_abs_diff(&b), Some(1.0));
        assert_eq!(a.max_abs_diff(&Matrix::zeros(1, 1)), None);
    }
}
