//! Dense, arbitrary-size matrix of `f64` with column-major storage.
//!
//! The [`Matrix`] type owns a flat buffer where element `(r, c)` lives at
//! `data[c * rows + r]`. Dimensions are fixed at construction; contents are
//! freely mutable. Cloning performs a deep copy, so two matrices never share
//! storage.

mod bridge;
mod create;
mod format;
mod ops;
mod parse;
mod view;

use core::ops::{Index, IndexMut};

use crate::error::{CoreError, Result};

pub use bridge::FixedMatrix;
pub use ops::FEQL_EPSILON;
pub use view::{ColMut, ColRef, RowMut, RowRef};

/// A dense `rows x cols` matrix of `f64` stored in column-major order.
#[derive(Debug, Clone)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    // ------------------------------------------------------------------
    // Construction from raw parts
    // ------------------------------------------------------------------

    /// Create a matrix from a column-major data vector.
    ///
    /// Returns [`CoreError::DataCountMismatch`] if `data.len() != rows * cols`
    /// and [`CoreError::EmptyDimension`] if either dimension is zero.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// // [[1, 3],
    /// //  [2, 4]]
    /// let m = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(m[(0, 1)], 3.0);
    /// ```
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        check_dims(rows, cols)?;
        let expected = rows * cols;
        if data.len() != expected {
            return Err(CoreError::DataCountMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Create a matrix from an iterator of column-major values.
    ///
    /// Fails if the iterator yields too few or too many values. Consumption
    /// stops one element past `rows * cols`, so unbounded iterators are fine.
    pub fn from_values<I>(rows: usize, cols: usize, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        check_dims(rows, cols)?;
        let expected = rows * cols;
        let data: Vec<f64> = values.into_iter().take(expected + 1).collect();
        if data.len() > expected {
            // Only one extra element was pulled; the real count is unknown.
            return Err(CoreError::DataCountMismatch {
                expected,
                got: data.len(),
            });
        }
        Self::from_vec(rows, cols, data)
    }

    /// Build a matrix from a raw buffer already known to have the right size.
    #[inline]
    pub(crate) fn from_raw(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { data, rows, cols }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// The total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`; a matrix has at least one element.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// All elements in column-major order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// All elements in column-major order, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Consume the matrix and return the column-major buffer.
    #[inline]
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    // ------------------------------------------------------------------
    // Element access
    // ------------------------------------------------------------------

    #[inline]
    pub(crate) fn offset(&self, row: usize, col: usize) -> usize {
        col * self.rows + row
    }

    fn checked_offset(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(CoreError::IndexOutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.offset(row, col))
    }

    /// The element at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        let i = self.checked_offset(row, col)?;
        Ok(self.data[i])
    }

    /// A mutable reference to the element at `(row, col)`.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut f64> {
        let i = self.checked_offset(row, col)?;
        Ok(&mut self.data[i])
    }

    /// Overwrite the element at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let i = self.checked_offset(row, col)?;
        self.data[i] = value;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Iterators
    // ------------------------------------------------------------------

    /// Iterate over all elements in column-major order.
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.data.iter()
    }

    /// Iterate mutably over all elements in column-major order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut f64> {
        self.data.iter_mut()
    }

    // ------------------------------------------------------------------
    // Map / apply
    // ------------------------------------------------------------------

    /// Apply a function to every element, returning a new matrix.
    pub fn map<F>(&self, f: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            data: self.data.iter().map(|&x| f(x)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Apply a function element-wise to two matrices of the same shape.
    pub fn zip_map<F>(&self, other: &Matrix, op: &'static str, f: F) -> Result<Matrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.shape() != other.shape() {
            return Err(CoreError::DimensionMismatch {
                op,
                lhs: self.shape(),
                rhs: other.shape(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Matrix {
            data,
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// Apply a function to every element in place.
    pub fn apply<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64,
    {
        for x in &mut self.data {
            *x = f(*x);
        }
    }
}

/// Exact comparison of shape and every element.
///
/// Use [`Matrix::feql`] for tolerance-based comparison.
impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.data == other.data
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of range for {}x{} matrix",
            self.rows,
            self.cols,
        );
        &self.data[self.offset(row, col)]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of range for {}x{} matrix",
            self.rows,
            self.cols,
        );
        let i = self.offset(row, col);
        &mut self.data[i]
    }
}

// ======================================================================
// Utility functions
// ======================================================================

pub(crate) fn check_dims(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Err(CoreError::EmptyDimension { rows, cols });
    }
    Ok(())
}
