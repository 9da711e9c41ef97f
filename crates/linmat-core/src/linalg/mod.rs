//! Linear algebra on [`Matrix`].
//!
//! | Operation      | Entry point                     | Method                      |
//! |----------------|---------------------------------|-----------------------------|
//! | multiply       | [`Matrix::matmul`]              | naive / Strassen            |
//! | decomposition  | [`MatrixLu::decompose`]         | Gaussian elimination, partial pivoting |
//! | determinant    | [`det`]                         | `det(P) * prod(diag(U))`    |
//! | solve `Ax = b` | [`solve`]                       | forward + back substitution |
//! | inverse        | [`inv`]                         | `n` solves against `e_i`    |
//! | integer power  | [`power`]                       | exponentiation by squaring  |

pub mod lu;
pub mod matmul;

pub use lu::MatrixLu;
pub use matmul::{MatmulAlgorithm, MatmulPolicy, STRASSEN_THRESHOLD};

use crate::error::Result;
use crate::matrix::Matrix;

/// Solve the linear system `Ax = b` for a square matrix `A`.
///
/// ```
/// # use linmat_core::{linalg, Matrix};
/// let a = Matrix::from_rows(&[[2.0, 1.0], [1.0, 4.0]]).unwrap();
/// let b = Matrix::as_col(&[5.0, 6.0]);
/// let x = linalg::solve(&a, &b).unwrap();
/// assert!((x[(0, 0)] - 2.0).abs() < 1e-10);
/// assert!((x[(1, 0)] - 1.0).abs() < 1e-10);
/// ```
pub fn solve(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    MatrixLu::decompose(a)?.solve(b)
}

/// Compute the inverse of a square matrix.
///
/// Returns [`CoreError::SingularMatrix`](crate::CoreError::SingularMatrix) if
/// the matrix is not invertible.
pub fn inv(a: &Matrix) -> Result<Matrix> {
    MatrixLu::decompose(a)?.inverse()
}

/// Compute the determinant of a square matrix.
///
/// ```
/// # use linmat_core::{linalg, Matrix};
/// let a = Matrix::from_rows(&[[4.0, 7.0], [2.0, 6.0]]).unwrap();
/// assert!((linalg::det(&a).unwrap() - 10.0).abs() < 1e-12);
/// ```
pub fn det(a: &Matrix) -> Result<f64> {
    Ok(MatrixLu::decompose(a)?.determinant())
}

/// Whether a square matrix is invertible.
///
/// A matrix whose elimination meets an all-zero pivot column is reported as
/// not invertible rather than as an error.
pub fn is_invertible(a: &Matrix) -> Result<bool> {
    match MatrixLu::decompose(a) {
        Ok(lu) => Ok(lu.is_invertible()),
        Err(crate::CoreError::SingularMatrix) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Raise `m` to an integer power.
///
/// - `pow == 0`: identity of `m`'s shape
/// - `pow == 1`: a copy of `m`
/// - `pow == -1`: the inverse of `m`
/// - otherwise: exponentiation by squaring on `|pow|`, inverting first when
///   `pow < 0`
pub fn power(m: &Matrix, pow: i32) -> Result<Matrix> {
    match pow {
        0 => return Ok(Matrix::identity(m.rows(), m.cols())),
        1 => return Ok(m.clone()),
        -1 => return inv(m),
        _ => {}
    }

    let mut base = if pow < 0 { inv(m)? } else { m.clone() };
    let mut e = pow.unsigned_abs();
    let mut acc: Option<Matrix> = None;
    loop {
        if e & 1 == 1 {
            acc = Some(match acc {
                Some(a) => a.matmul(&base)?,
                None => base.clone(),
            });
        }
        e >>= 1;
        if e == 0 {
            break;
        }
        base = base.matmul(&base)?;
    }
    // |pow| >= 2 always sets a bit, so `acc` is populated here.
    Ok(acc.unwrap_or(base))
}

// ======================================================================
// Convenience methods on Matrix
// ======================================================================

impl Matrix {
    /// LU decomposition of this (square) matrix.
    pub fn lu(&self) -> Result<MatrixLu> {
        MatrixLu::decompose(self)
    }

    /// Determinant via LU decomposition.
    pub fn det(&self) -> Result<f64> {
        det(self)
    }

    /// Inverse via LU decomposition.
    pub fn inv(&self) -> Result<Matrix> {
        inv(self)
    }

    /// Solve `self * x = b`.
    pub fn solve(&self, b: &Matrix) -> Result<Matrix> {
        solve(self, b)
    }

    /// Integer power, see [`power`].
    pub fn pow(&self, pow: i32) -> Result<Matrix> {
        power(self, pow)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::random::{uniform_range, Rng};

    fn a() -> Matrix {
        Matrix::from_rows(&[[4.0, 7.0], [2.0, 6.0]]).unwrap()
    }

    #[test]
    fn test_det_inv_free_functions() {
        assert!((det(&a()).unwrap() - 10.0).abs() < 1e-12);
        let expected = Matrix::from_rows(&[[0.6, -0.7], [-0.2, 0.4]]).unwrap();
        assert!(inv(&a()).unwrap().feql(&expected));
        assert!(a().inv().unwrap().feql(&expected));
    }

    #[test]
    fn test_solve_free_function() {
        let b = Matrix::as_col(&[11.0, 8.0]);
        let x = a().solve(&b).unwrap();
        assert!(x.feql(&Matrix::as_col(&[1.0, 1.0])));
    }

    #[test]
    fn test_is_invertible() {
        assert!(is_invertible(&a()).unwrap());
        let singular = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        assert!(!is_invertible(&singular).unwrap());
        let zero_col = Matrix::from_rows(&[[0.0, 1.0], [0.0, 2.0]]).unwrap();
        assert!(!is_invertible(&zero_col).unwrap());
        assert!(is_invertible(&Matrix::zeros(2, 3)).is_err());
    }

    #[test]
    fn test_power_small_cases() {
        let m = a();
        assert_eq!(power(&m, 0).unwrap(), Matrix::identity(2, 2));
        assert_eq!(power(&m, 1).unwrap(), m);
        assert!(power(&m, -1).unwrap().feql(&inv(&m).unwrap()));
    }

    #[test]
    fn test_power_by_squaring() {
        let m = a();
        let mut expected = m.clone();
        for _ in 1..5 {
            expected = expected.matmul(&m).unwrap();
        }
        assert_eq!(m.pow(5).unwrap(), expected);
        assert_eq!(m.pow(2).unwrap(), m.matmul(&m).unwrap());
    }

    #[test]
    fn test_power_negative() {
        let m = a();
        let p = m.pow(-3).unwrap();
        let check = p.matmul(&m.pow(3).unwrap()).unwrap();
        assert!(check.feql_eps(&Matrix::identity(2, 2), 1e-9));
    }

    #[test]
    fn test_power_non_square() {
        let m = Matrix::zeros(2, 3);
        assert_eq!(power(&m, 0).unwrap(), Matrix::identity(2, 3));
        assert!(matches!(
            power(&m, 2),
            Err(CoreError::DimensionMismatch { op: "matmul", .. })
        ));
        assert!(matches!(
            power(&m, -2),
            Err(CoreError::NonSquareMatrix { .. })
        ));
    }

    #[test]
    fn test_power_singular_negative() {
        let singular = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        assert!(singular.pow(-2).is_err());
    }

    #[test]
    fn test_solve_and_multiply_random() {
        let mut rng = Rng::new(99);
        let m = uniform_range(&mut rng, 40, 40, -1.0, 1.0).unwrap();
        let v = uniform_range(&mut rng, 40, 1, -1.0, 1.0).unwrap();
        let x = m.solve(&v).unwrap();
        assert!(m.matmul(&x).unwrap().feql_eps(&v, 1e-9));
    }
}
