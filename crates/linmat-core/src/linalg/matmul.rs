//! Dimension-checked matrix multiplication.
//!
//! Two kernels share one entry point:
//!
//! | Kernel   | Used when                          | Complexity   |
//! |----------|------------------------------------|--------------|
//! | naive    | largest extent `< threshold`       | O(m·k·n)     |
//! | Strassen | largest extent `>= threshold`      | O(n^2.807)   |
//!
//! The Strassen path pads every operand with zeros up to the next power of
//! two of the largest extent, splits into quadrants, computes the seven
//! Strassen products recursively, and crops the result back to
//! `lhs.rows() x rhs.cols()`. Recursion bottoms out in the naive kernel.

use core::ops::Mul;

use log::{debug, trace};

use crate::error::{CoreError, Result};
use crate::matrix::Matrix;

/// Operand extent at which multiplication switches to Strassen.
///
/// Below this size recursion overhead outweighs the saved multiplication.
pub const STRASSEN_THRESHOLD: usize = 32;

/// Which kernel [`Matrix::matmul_with`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatmulAlgorithm {
    /// Naive below the threshold, Strassen at or above it.
    #[default]
    Auto,
    /// Always the triple loop.
    Naive,
    /// Always enter the Strassen recursion; it still bottoms out in the
    /// naive kernel once blocks fall below the threshold.
    Strassen,
}

/// Configuration for matrix multiplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatmulPolicy {
    pub algorithm: MatmulAlgorithm,
    /// Block size below which the naive kernel is used.
    pub strassen_threshold: usize,
}

impl Default for MatmulPolicy {
    fn default() -> Self {
        Self {
            algorithm: MatmulAlgorithm::Auto,
            strassen_threshold: STRASSEN_THRESHOLD,
        }
    }
}

impl MatmulPolicy {
    /// Policy forcing the naive kernel.
    pub fn naive() -> Self {
        Self {
            algorithm: MatmulAlgorithm::Naive,
            ..Self::default()
        }
    }

    /// Policy forcing the Strassen recursion.
    pub fn strassen() -> Self {
        Self {
            algorithm: MatmulAlgorithm::Strassen,
            ..Self::default()
        }
    }

    /// Replace the recursion threshold. Values below 2 are treated as 2.
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.strassen_threshold = threshold;
        self
    }

    #[inline]
    fn threshold(&self) -> usize {
        self.strassen_threshold.max(2)
    }
}

// ======================================================================
// Entry points
// ======================================================================

impl Matrix {
    /// Matrix product `self * rhs` with the default policy.
    ///
    /// Requires `self.cols() == rhs.rows()`; the result is
    /// `self.rows() x rhs.cols()`.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// let b = Matrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]).unwrap();
    /// let c = a.matmul(&b).unwrap();
    /// assert_eq!(c, Matrix::from_rows(&[[19.0, 22.0], [43.0, 50.0]]).unwrap());
    /// ```
    pub fn matmul(&self, rhs: &Matrix) -> Result<Matrix> {
        self.matmul_with(rhs, &MatmulPolicy::default())
    }

    /// Matrix product `self * rhs` using an explicit [`MatmulPolicy`].
    pub fn matmul_with(&self, rhs: &Matrix, policy: &MatmulPolicy) -> Result<Matrix> {
        if self.cols() != rhs.rows() {
            return Err(CoreError::DimensionMismatch {
                op: "matmul",
                lhs: self.shape(),
                rhs: rhs.shape(),
            });
        }

        let threshold = policy.threshold();
        let msize = max_extent(self, rhs);
        let use_strassen = match policy.algorithm {
            MatmulAlgorithm::Naive => false,
            MatmulAlgorithm::Auto => msize >= threshold,
            // A 1x1 problem has no quadrants to split.
            MatmulAlgorithm::Strassen => msize >= 2,
        };

        if !use_strassen {
            return Ok(naive(self, rhs));
        }
        debug!(
            "strassen multiply {}x{} * {}x{} (padded to {}, threshold {})",
            self.rows(),
            self.cols(),
            rhs.rows(),
            rhs.cols(),
            msize.next_power_of_two(),
            threshold,
        );
        Ok(strassen(self, rhs, threshold, 0))
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    /// Panics on a dimension mismatch; use [`Matrix::matmul`] to get an error.
    fn mul(self, rhs: &Matrix) -> Matrix {
        match self.matmul(rhs) {
            Ok(m) => m,
            Err(e) => panic!("{e}"),
        }
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        &self * &rhs
    }
}

// ======================================================================
// Kernels
// ======================================================================

#[inline]
fn max_extent(lhs: &Matrix, rhs: &Matrix) -> usize {
    lhs.rows().max(lhs.cols()).max(rhs.rows()).max(rhs.cols())
}

/// Threshold dispatch shared by the top level and every recursion step.
fn multiply(lhs: &Matrix, rhs: &Matrix, threshold: usize, depth: usize) -> Matrix {
    if max_extent(lhs, rhs) < threshold {
        naive(lhs, rhs)
    } else {
        strassen(lhs, rhs, threshold, depth)
    }
}

/// Triple-loop product. Caller guarantees `lhs.cols() == rhs.rows()`.
///
/// Loop order is column of the result, then inner dimension, then row, so
/// every inner pass walks contiguous columns.
fn naive(lhs: &Matrix, rhs: &Matrix) -> Matrix {
    let (m, k) = lhs.shape();
    let n = rhs.cols();
    let a = lhs.as_slice();
    let b = rhs.as_slice();
    let mut out = vec![0.0; m * n];

    for (j, out_col) in out.chunks_exact_mut(m).enumerate() {
        let b_col = &b[j * k..(j + 1) * k];
        for (p, &bpj) in b_col.iter().enumerate() {
            let a_col = &a[p * m..(p + 1) * m];
            for (o, &aip) in out_col.iter_mut().zip(a_col) {
                *o += aip * bpj;
            }
        }
    }

    Matrix::from_raw(m, n, out)
}

/// One level of Strassen recursion on zero-padded operands.
#[allow(clippy::many_single_char_names)]
fn strassen(lhs: &Matrix, rhs: &Matrix, threshold: usize, depth: usize) -> Matrix {
    let size = max_extent(lhs, rhs).next_power_of_two();
    let h = size / 2;
    trace!("strassen depth {depth}: padded size {size}");

    let a11 = quadrant(lhs, 0, 0, h);
    let a12 = quadrant(lhs, 0, 1, h);
    let a21 = quadrant(lhs, 1, 0, h);
    let a22 = quadrant(lhs, 1, 1, h);
    let b11 = quadrant(rhs, 0, 0, h);
    let b12 = quadrant(rhs, 0, 1, h);
    let b21 = quadrant(rhs, 1, 0, h);
    let b22 = quadrant(rhs, 1, 1, h);

    let next = depth + 1;
    let m1 = multiply(&add(&a11, &a22), &add(&b11, &b22), threshold, next);
    let m2 = multiply(&add(&a21, &a22), &b11, threshold, next);
    let m3 = multiply(&a11, &sub(&b12, &b22), threshold, next);
    let m4 = multiply(&a22, &sub(&b21, &b11), threshold, next);
    let m5 = multiply(&add(&a11, &a12), &b22, threshold, next);
    let m6 = multiply(&sub(&a21, &a11), &add(&b11, &b12), threshold, next);
    let m7 = multiply(&sub(&a12, &a22), &add(&b21, &b22), threshold, next);

    // C11 = M1 + M4 - M5 + M7
    let c11 = add(&sub(&add(&m1, &m4), &m5), &m7);
    // C12 = M3 + M5
    let c12 = add(&m3, &m5);
    // C21 = M2 + M4
    let c21 = add(&m2, &m4);
    // C22 = M1 - M2 + M3 + M6
    let c22 = add(&add(&sub(&m1, &m2), &m3), &m6);

    crop([&c11, &c12, &c21, &c22], h, lhs.rows(), rhs.cols())
}

/// The `h x h` block `(qr, qc)` of `m` zero-padded to `2h x 2h`.
///
/// Any index beyond `m`'s extent reads as zero, so non-square and
/// non-power-of-two operands split cleanly.
fn quadrant(m: &Matrix, qr: usize, qc: usize, h: usize) -> Matrix {
    let mut out = vec![0.0; h * h];
    let (r0, c0) = (qr * h, qc * h);
    let rows = m.rows().saturating_sub(r0).min(h);
    let cols = m.cols().saturating_sub(c0).min(h);
    if rows == 0 || cols == 0 {
        return Matrix::from_raw(h, h, out);
    }
    let src = m.as_slice();
    let stride = m.rows();

    for c in 0..cols {
        let s = (c0 + c) * stride + r0;
        out[c * h..c * h + rows].copy_from_slice(&src[s..s + rows]);
    }
    Matrix::from_raw(h, h, out)
}

/// Copy the valid `rows x cols` region out of the four result quadrants.
fn crop(quads: [&Matrix; 4], h: usize, rows: usize, cols: usize) -> Matrix {
    let mut out = vec![0.0; rows * cols];
    for c in 0..cols {
        let (qc, lc) = (c / h, c % h);
        for r in 0..rows {
            let (qr, lr) = (r / h, r % h);
            let q = quads[qr * 2 + qc];
            out[c * rows + r] = q.as_slice()[lc * h + lr];
        }
    }
    Matrix::from_raw(rows, cols, out)
}

#[inline]
fn add(a: &Matrix, b: &Matrix) -> Matrix {
    let data = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(&x, &y)| x + y)
        .collect();
    Matrix::from_raw(a.rows(), a.cols(), data)
}

#[inline]
fn sub(a: &Matrix, b: &Matrix) -> Matrix {
    let data = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(&x, &y)| x - y)
        .collect();
    Matrix::from_raw(a.rows(), a.cols(), data)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::random::{uniform_range, Rng};

    fn random(rng: &mut Rng, rows: usize, cols: usize) -> Matrix {
        uniform_range(rng, rows, cols, -1.0, 1.0).unwrap()
    }

    fn assert_paths_agree(m: usize, k: usize, n: usize, seed: u64) {
        let mut rng = Rng::new(seed);
        let a = random(&mut rng, m, k);
        let b = random(&mut rng, k, n);
        let slow = a.matmul_with(&b, &MatmulPolicy::naive()).unwrap();
        let fast = a.matmul_with(&b, &MatmulPolicy::strassen()).unwrap();
        assert_eq!(fast.shape(), (m, n));
        assert!(
            fast.feql_eps(&slow, 1e-9),
            "{m}x{k} * {k}x{n}: max diff {:?}",
            fast.max_abs_diff(&slow)
        );
    }

    #[test]
    fn test_matmul_2x2() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let b = Matrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]).unwrap();
        let expected = Matrix::from_rows(&[[19.0, 22.0], [43.0, 50.0]]).unwrap();
        assert_eq!(&a * &b, expected);
    }

    #[test]
    fn test_matmul_rectangular() {
        // [2x3] * [3x1]
        let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let x = Matrix::as_col(&[1.0, 0.0, -1.0]);
        let y = a.matmul(&x).unwrap();
        assert_eq!(y, Matrix::as_col(&[-2.0, -2.0]));
    }

    #[test]
    fn test_matmul_dimension_mismatch() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(2, 3);
        assert_eq!(
            a.matmul(&b),
            Err(CoreError::DimensionMismatch {
                op: "matmul",
                lhs: (2, 3),
                rhs: (2, 3)
            })
        );
    }

    #[test]
    #[should_panic(expected = "dimension mismatch in matmul")]
    fn test_mul_operator_mismatch_panics() {
        let _ = Matrix::zeros(2, 3) * Matrix::zeros(2, 3);
    }

    #[test]
    fn test_strassen_matches_naive_below_threshold() {
        assert_paths_agree(10, 10, 10, 1);
        assert_paths_agree(31, 31, 31, 2);
    }

    #[test]
    fn test_strassen_matches_naive_at_threshold() {
        assert_paths_agree(32, 32, 32, 3);
        assert_paths_agree(64, 64, 64, 4);
    }

    #[test]
    fn test_strassen_matches_naive_non_power_of_two() {
        assert_paths_agree(100, 100, 100, 5);
        assert_paths_agree(33, 33, 33, 6);
    }

    #[test]
    fn test_strassen_matches_naive_non_square() {
        assert_paths_agree(50, 37, 50, 7);
        assert_paths_agree(50, 37, 3, 8);
        assert_paths_agree(1, 40, 70, 9);
    }

    #[test]
    fn test_strassen_small_threshold_deep_recursion() {
        let mut rng = Rng::new(10);
        let a = random(&mut rng, 13, 9);
        let b = random(&mut rng, 9, 11);
        let slow = a.matmul_with(&b, &MatmulPolicy::naive()).unwrap();
        for t in [0, 1, 2, 3, 4] {
            let policy = MatmulPolicy::strassen().with_threshold(t);
            let fast = a.matmul_with(&b, &policy).unwrap();
            assert!(fast.feql_eps(&slow, 1e-12), "threshold {t}");
        }
    }

    #[test]
    fn test_strassen_exact_on_integers() {
        let a = Matrix::from_fn(40, 40, |r, c| ((r * 3 + c * 7) % 5) as f64 - 2.0);
        let b = Matrix::from_fn(40, 40, |r, c| ((r + 2 * c) % 3) as f64);
        let slow = a.matmul_with(&b, &MatmulPolicy::naive()).unwrap();
        let fast = a.matmul_with(&b, &MatmulPolicy::default()).unwrap();
        assert_eq!(fast, slow);
    }

    #[test]
    fn test_identity_laws() {
        let mut rng = Rng::new(11);
        for &(r, c) in &[(5, 7), (40, 33), (64, 64)] {
            let m = random(&mut rng, r, c);
            let right = m.matmul(&Matrix::identity(c, c)).unwrap();
            let left = Matrix::identity(r, r).matmul(&m).unwrap();
            assert!(right.feql(&m));
            assert!(left.feql(&m));
        }
    }

    #[test]
    fn test_quadrant_padding() {
        let m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]).unwrap();
        let q22 = quadrant(&m, 1, 1, 2);
        assert_eq!(q22, Matrix::from_rows(&[[9.0, 0.0], [0.0, 0.0]]).unwrap());
        let q12 = quadrant(&m, 0, 1, 2);
        assert_eq!(q12, Matrix::from_rows(&[[3.0, 0.0], [6.0, 0.0]]).unwrap());

        // Block lying entirely below a single-row matrix.
        let row = Matrix::as_row(&[1.0, 2.0, 3.0]);
        assert_eq!(quadrant(&row, 1, 1, 2), Matrix::zeros(2, 2));
    }

    #[test]
    fn test_policy_defaults() {
        let p = MatmulPolicy::default();
        assert_eq!(p.algorithm, MatmulAlgorithm::Auto);
        assert_eq!(p.strassen_threshold, STRASSEN_THRESHOLD);
        assert_eq!(MatmulPolicy::naive().with_threshold(1).threshold(), 2);
    }
}
