//! Row and column views over a [`Matrix`] buffer.
//!
//! A view borrows the matrix storage and computes element positions on the
//! fly; it never copies. Under column-major layout a column is a contiguous
//! slice and a row is a strided walk with stride `rows`.

use crate::error::{CoreError, Result};

use super::Matrix;

/// Immutable view over one row, a strided walk through the buffer.
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    data: &'a [f64],
    row: usize,
    stride: usize,
}

/// Immutable view over one column, a contiguous slice of the buffer.
#[derive(Debug, Clone, Copy)]
pub struct ColRef<'a> {
    data: &'a [f64],
}

/// Mutable view over one row.
#[derive(Debug)]
pub struct RowMut<'a> {
    data: &'a mut [f64],
    row: usize,
    stride: usize,
}

/// Mutable view over one column.
#[derive(Debug)]
pub struct ColMut<'a> {
    data: &'a mut [f64],
}

impl<'a> RowRef<'a> {
    /// Number of elements (the matrix column count).
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len() / self.stride
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element in column `col`, or `None` past the end.
    #[inline]
    pub fn get(&self, col: usize) -> Option<f64> {
        self.data.get(col * self.stride + self.row).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + 'a {
        self.data.iter().skip(self.row).step_by(self.stride).copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }
}

impl<'a> ColRef<'a> {
    /// Number of elements (the matrix row count).
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, row: usize) -> Option<f64> {
        self.data.get(row).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &'a [f64] {
        self.data
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + 'a {
        self.data.iter().copied()
    }
}

impl RowMut<'_> {
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len() / self.stride
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn get_mut(&mut self, col: usize) -> Option<&mut f64> {
        self.data.get_mut(col * self.stride + self.row)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut f64> {
        self.data.iter_mut().skip(self.row).step_by(self.stride)
    }

    /// Overwrite the row with `values`, which must have exactly `len()` items.
    pub fn copy_from(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.len() {
            return Err(CoreError::DataCountMismatch {
                expected: self.len(),
                got: values.len(),
            });
        }
        for (dst, &v) in self.iter_mut().zip(values) {
            *dst = v;
        }
        Ok(())
    }
}

impl ColMut<'_> {
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get_mut(&mut self, row: usize) -> Option<&mut f64> {
        self.data.get_mut(row)
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        self.data
    }

    /// Overwrite the column with `values`, which must have exactly `len()` items.
    pub fn copy_from(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.data.len() {
            return Err(CoreError::DataCountMismatch {
                expected: self.data.len(),
                got: values.len(),
            });
        }
        self.data.copy_from_slice(values);
        Ok(())
    }
}

impl Matrix {
    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.rows {
            return Err(CoreError::IndexOutOfRange {
                row,
                col: 0,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    fn check_col(&self, col: usize) -> Result<()> {
        if col >= self.cols {
            return Err(CoreError::IndexOutOfRange {
                row: 0,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// A view over row `row`.
    pub fn row(&self, row: usize) -> Result<RowRef<'_>> {
        self.check_row(row)?;
        Ok(RowRef {
            data: &self.data,
            row,
            stride: self.rows,
        })
    }

    /// A view over column `col`.
    pub fn col(&self, col: usize) -> Result<ColRef<'_>> {
        self.check_col(col)?;
        let rows = self.rows;
        Ok(ColRef {
            data: &self.data[col * rows..(col + 1) * rows],
        })
    }

    /// A mutable view over row `row`.
    pub fn row_mut(&mut self, row: usize) -> Result<RowMut<'_>> {
        self.check_row(row)?;
        Ok(RowMut {
            stride: self.rows,
            data: &mut self.data,
            row,
        })
    }

    /// A mutable view over column `col`.
    pub fn col_mut(&mut self, col: usize) -> Result<ColMut<'_>> {
        self.check_col(col)?;
        let rows = self.rows;
        Ok(ColMut {
            data: &mut self.data[col * rows..(col + 1) * rows],
        })
    }
}
