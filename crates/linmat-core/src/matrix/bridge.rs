//! Conversion between [`Matrix`] and fixed-size matrix types.
//!
//! Fixed-size types only need to expose their values as a flat column-major
//! sequence of known length and rebuild themselves from one.

use crate::error::{CoreError, Result};

use super::{check_dims, Matrix};

/// A matrix type whose dimensions are known at compile time.
pub trait FixedMatrix: Sized {
    const ROWS: usize;
    const COLS: usize;

    /// All `ROWS * COLS` values in column-major order.
    fn to_col_major(&self) -> Vec<f64>;

    /// Rebuild from exactly `ROWS * COLS` column-major values.
    fn from_col_major(values: &[f64]) -> Result<Self>;
}

/// Row-major nested arrays: `[[f64; C]; R]` is an `R x C` matrix.
impl<const R: usize, const C: usize> FixedMatrix for [[f64; C]; R] {
    const ROWS: usize = R;
    const COLS: usize = C;

    fn to_col_major(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(R * C);
        for c in 0..C {
            out.extend(self.iter().map(|row| row[c]));
        }
        out
    }

    fn from_col_major(values: &[f64]) -> Result<Self> {
        if values.len() != R * C {
            return Err(CoreError::DataCountMismatch {
                expected: R * C,
                got: values.len(),
            });
        }
        let mut out = [[0.0; C]; R];
        for (c, col) in values.chunks_exact(R.max(1)).enumerate().take(C) {
            for (r, &v) in col.iter().enumerate() {
                out[r][c] = v;
            }
        }
        Ok(out)
    }
}

impl Matrix {
    /// Copy a fixed-size matrix into a dynamically sized one.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let m = Matrix::from_fixed(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
    /// assert_eq!(m.shape(), (3, 2));
    /// assert_eq!(m[(2, 1)], 6.0);
    /// ```
    pub fn from_fixed<T: FixedMatrix>(fixed: &T) -> Result<Self> {
        check_dims(T::ROWS, T::COLS)?;
        Matrix::from_vec(T::ROWS, T::COLS, fixed.to_col_major())
    }

    /// Copy into a fixed-size matrix of the same shape.
    pub fn to_fixed<T: FixedMatrix>(&self) -> Result<T> {
        if self.shape() != (T::ROWS, T::COLS) {
            return Err(CoreError::DimensionMismatch {
                op: "to_fixed",
                lhs: self.shape(),
                rhs: (T::ROWS, T::COLS),
            });
        }
        T::from_col_major(&self.data)
    }

    /// Approximate equality against a fixed-size matrix.
    pub fn feql_fixed<T: FixedMatrix>(&self, fixed: &T) -> bool {
        self.shape() == (T::ROWS, T::COLS)
            && self
                .data
                .iter()
                .zip(fixed.to_col_major())
                .all(|(&a, b)| a == b || (a - b).abs() <= super::FEQL_EPSILON)
    }
}
