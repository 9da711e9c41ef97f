//! LU decomposition with partial pivoting.
//!
//! Decomposes a square matrix `A` into `PA = LU` where:
//! - `P` is a row permutation (stored as a vector `pi`, `pi[i]` being the
//!   original row now at position `i`)
//! - `L` is lower triangular with unit diagonal
//! - `U` is upper triangular

use log::debug;

use crate::error::{CoreError, Result};
use crate::matrix::{Matrix, FEQL_EPSILON};

/// Result of an LU decomposition with partial pivoting.
///
/// `L` and `U` share one column-major `n x n` buffer: `U` occupies the
/// diagonal and everything above it, `L` everything strictly below. The unit
/// diagonal of `L` is implicit. The decomposition is immutable once built.
#[derive(Debug, Clone)]
pub struct MatrixLu {
    lu: Vec<f64>,
    /// `pi[i]` is the original row now occupying position `i`.
    pi: Vec<usize>,
    /// Parity of `pi`: `+1.0` or `-1.0`.
    det_of_p: f64,
    n: usize,
}

impl MatrixLu {
    /// Decompose a square matrix.
    ///
    /// Fails with [`CoreError::NonSquareMatrix`] for non-square input and
    /// with [`CoreError::SingularMatrix`] when a pivot column has no nonzero
    /// candidate.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// # use linmat_core::linalg::MatrixLu;
    /// let a = Matrix::from_rows(&[[4.0, 7.0], [2.0, 6.0]]).unwrap();
    /// let lu = MatrixLu::decompose(&a).unwrap();
    /// assert!((lu.determinant() - 10.0).abs() < 1e-12);
    /// ```
    pub fn decompose(a: &Matrix) -> Result<Self> {
        if !a.is_square() {
            return Err(CoreError::NonSquareMatrix {
                rows: a.rows(),
                cols: a.cols(),
            });
        }
        let n = a.rows();

        let mut lu: Vec<f64> = a.as_slice().to_vec();
        let mut pi: Vec<usize> = (0..n).collect();
        let mut det_of_p = 1.0;
        let mut swaps = 0usize;

        for k in 0..n.saturating_sub(1) {
            // Column k is contiguous: rows k..n live at lu[k*n + k .. k*n + n].
            let col_k = &lu[k * n..(k + 1) * n];
            let mut best = 0.0;
            let mut k0 = k;
            for (i, &v) in col_k.iter().enumerate().skip(k) {
                if v.abs() > best {
                    best = v.abs();
                    k0 = i;
                }
            }
            if best == 0.0 {
                return Err(CoreError::SingularMatrix);
            }

            pi.swap(k, k0);
            if k0 != k {
                // Whole-row swap moves both the computed L entries (columns
                // < k) and the remaining U entries.
                for j in 0..n {
                    lu.swap(j * n + k, j * n + k0);
                }
                det_of_p = -det_of_p;
                swaps += 1;
            }

            let pivot = lu[k * n + k];
            for i in (k + 1)..n {
                let factor = lu[k * n + i] / pivot;
                lu[k * n + i] = factor;
                if factor == 0.0 {
                    continue;
                }
                for j in (k + 1)..n {
                    let ukj = lu[j * n + k];
                    lu[j * n + i] -= factor * ukj;
                }
            }
        }

        debug!("lu decomposition of {n}x{n} matrix: {swaps} row swaps");
        Ok(Self {
            lu,
            pi,
            det_of_p,
            n,
        })
    }

    /// Dimension `n` of the decomposed `n x n` matrix.
    #[inline]
    pub fn rows(&self) -> usize {
        self.n
    }

    /// The row permutation: `permutation()[i]` is the original row at `i`.
    pub fn permutation(&self) -> &[usize] {
        &self.pi
    }

    /// Sign of the permutation, `+1.0` or `-1.0`.
    pub fn det_of_p(&self) -> f64 {
        self.det_of_p
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> f64 {
        self.lu[col * self.n + row]
    }

    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.n || col >= self.n {
            return Err(CoreError::IndexOutOfRange {
                row,
                col,
                rows: self.n,
                cols: self.n,
            });
        }
        Ok(())
    }

    /// `L[row, col]`: stored below the diagonal, `1` on it, `0` above.
    pub fn l_at(&self, row: usize, col: usize) -> Result<f64> {
        self.check_index(row, col)?;
        Ok(match row.cmp(&col) {
            core::cmp::Ordering::Greater => self.at(row, col),
            core::cmp::Ordering::Equal => 1.0,
            core::cmp::Ordering::Less => 0.0,
        })
    }

    /// `U[row, col]`: stored on and above the diagonal, `0` below.
    pub fn u_at(&self, row: usize, col: usize) -> Result<f64> {
        self.check_index(row, col)?;
        Ok(if row <= col { self.at(row, col) } else { 0.0 })
    }

    /// The lower triangular factor `L` with unit diagonal.
    pub fn l(&self) -> Matrix {
        Matrix::from_fn(self.n, self.n, |r, c| match r.cmp(&c) {
            core::cmp::Ordering::Greater => self.at(r, c),
            core::cmp::Ordering::Equal => 1.0,
            core::cmp::Ordering::Less => 0.0,
        })
    }

    /// The upper triangular factor `U`.
    pub fn u(&self) -> Matrix {
        Matrix::from_fn(self.n, self.n, |r, c| if r <= c { self.at(r, c) } else { 0.0 })
    }

    /// The permutation matrix `P` with `PA = LU`.
    pub fn p(&self) -> Matrix {
        Matrix::from_fn(self.n, self.n, |r, c| if self.pi[r] == c { 1.0 } else { 0.0 })
    }

    /// `det(A) = det(P) * prod(diag(U))`.
    pub fn determinant(&self) -> f64 {
        (0..self.n).fold(self.det_of_p, |d, i| d * self.at(i, i))
    }

    /// `false` when the determinant is within [`FEQL_EPSILON`] of zero.
    pub fn is_invertible(&self) -> bool {
        self.determinant().abs() > FEQL_EPSILON
    }

    /// Solve `A x = v` for every column of `v`.
    ///
    /// `v` must have `n` rows; the result has the same shape as `v`.
    /// Returns [`CoreError::SingularMatrix`] if `U` has a zero on its
    /// diagonal.
    pub fn solve(&self, v: &Matrix) -> Result<Matrix> {
        if v.rows() != self.n {
            return Err(CoreError::DimensionMismatch {
                op: "solve",
                lhs: (self.n, self.n),
                rhs: v.shape(),
            });
        }
        if (0..self.n).any(|i| self.at(i, i) == 0.0) {
            return Err(CoreError::SingularMatrix);
        }

        let n = self.n;
        let mut out = vec![0.0; v.len()];
        for (b, x) in v.as_slice().chunks_exact(n).zip(out.chunks_exact_mut(n)) {
            self.solve_column(b, x);
        }
        Matrix::from_vec(n, v.cols(), out)
    }

    /// Forward then back substitution for one right-hand side.
    fn solve_column(&self, b: &[f64], x: &mut [f64]) {
        let n = self.n;

        // Apply permutation: a = P b
        for (xi, &p) in x.iter_mut().zip(&self.pi) {
            *xi = b[p];
        }

        // Forward substitution: L y = a (unit diagonal, no division).
        for i in 1..n {
            let mut sum = x[i];
            for j in 0..i {
                sum -= self.at(i, j) * x[j];
            }
            x[i] = sum;
        }

        // Back substitution: U x = y, last row first.
        for i in (0..n).rev() {
            let mut sum = x[i];
            for j in (i + 1)..n {
                sum -= self.at(i, j) * x[j];
            }
            x[i] = sum / self.at(i, i);
        }
    }

    /// Compute `A^-1` by solving against each standard basis vector.
    ///
    /// Returns [`CoreError::SingularMatrix`] unless [`Self::is_invertible`].
    pub fn inverse(&self) -> Result<Matrix> {
        if !self.is_invertible() {
            return Err(CoreError::SingularMatrix);
        }
        let n = self.n;
        let mut inv = Matrix::zeros(n, n);
        let mut e = vec![0.0; n];
        for col in 0..n {
            e[col] = 1.0;
            self.solve_column(&e, inv.col_mut(col)?.as_mut_slice());
            e[col] = 0.0;
        }
        Ok(inv)
    }
}
