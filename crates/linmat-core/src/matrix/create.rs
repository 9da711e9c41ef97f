//! Matrix creation functions: zeros, identity, row/column vectors.

use crate::error::{CoreError, Result};

use super::{check_dims, Matrix};

impl Matrix {
    /// Create a `rows x cols` matrix filled with zeros.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let m = Matrix::zeros(2, 3);
    /// assert_eq!(m.shape(), (2, 3));
    /// assert!(m.iter().all(|&x| x == 0.0));
    /// ```
    pub fn zeros(rows: usize, cols: usize) -> Self {
        assert!(
            rows > 0 && cols > 0,
            "matrix dimensions must be positive, got {rows}x{cols}"
        );
        Self::from_raw(rows, cols, vec![0.0; rows * cols])
    }

    /// Ones along the diagonal up to `min(rows, cols)`, zero elsewhere.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let eye = Matrix::identity(2, 3);
    /// assert_eq!(eye[(1, 1)], 1.0);
    /// assert_eq!(eye[(1, 2)], 0.0);
    /// ```
    pub fn identity(rows: usize, cols: usize) -> Self {
        let mut m = Self::zeros(rows, cols);
        for i in 0..rows.min(cols) {
            let k = m.offset(i, i);
            m.data[k] = 1.0;
        }
        m
    }

    /// A `1 x n` row vector.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn as_row(values: &[f64]) -> Self {
        assert!(!values.is_empty(), "row vector needs at least one value");
        Self::from_raw(1, values.len(), values.to_vec())
    }

    /// An `n x 1` column vector.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn as_col(values: &[f64]) -> Self {
        assert!(!values.is_empty(), "column vector needs at least one value");
        Self::from_raw(values.len(), 1, values.to_vec())
    }

    /// Create a matrix where each element is `f(row, col)`.
    ///
    /// `f` is called in storage order: down each column, left to right.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut m = Self::zeros(rows, cols);
        for c in 0..cols {
            for r in 0..rows {
                let k = m.offset(r, c);
                m.data[k] = f(r, c);
            }
        }
        m
    }

    /// Create a matrix from row-major nested rows.
    ///
    /// Every row must have the same length as the first one.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// assert_eq!(m[(1, 0)], 3.0);
    /// assert_eq!(m.as_slice(), &[1.0, 3.0, 2.0, 4.0]);
    /// ```
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |r| r.as_ref().len());
        check_dims(n_rows, n_cols)?;

        let mut data = vec![0.0; n_rows * n_cols];
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n_cols {
                return Err(CoreError::DataCountMismatch {
                    expected: n_cols,
                    got: row.len(),
                });
            }
            for (c, &v) in row.iter().enumerate() {
                data[c * n_rows + r] = v;
            }
        }
        Ok(Self::from_raw(n_rows, n_cols, data))
    }
}
