//! Pseudo-random number generation and random matrix creation.
//!
//! Provides a small, fast PRNG ([`Rng`]) based on the xoshiro256\*\*
//! algorithm and helpers that fill a [`Matrix`] with samples.
//!
//! Every function takes `&mut Rng` explicitly; there is no global generator.
//! Matrices are filled in storage order, so one seed always reproduces the
//! same matrix.

use crate::error::{CoreError, Result};
use crate::matrix::Matrix;

/// Golden-ratio increment of the SplitMix64 seeding sequence.
const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// One SplitMix64 step. Only used to expand a seed into generator state.
fn split_mix(seq: &mut u64) -> u64 {
    *seq = seq.wrapping_add(GOLDEN_GAMMA);
    let mut z = *seq;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Deterministic xoshiro256** generator.
///
/// ```
/// use linmat_core::random::Rng;
///
/// let mut rng = Rng::new(42);
/// let x = rng.next_f64();
/// assert!(x >= 0.0 && x < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Rng {
    state: [u64; 4],
    cached_normal: Option<f64>,
}

impl Rng {
    /// Seed the generator. Any `seed`, including zero, yields a valid state.
    pub fn new(seed: u64) -> Self {
        let mut seq = seed;
        Self {
            state: core::array::from_fn(|_| split_mix(&mut seq)),
            cached_normal: None,
        }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let [s0, s1, s2, s3] = &mut self.state;
        let out = s1.wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let shifted = *s1 << 17;

        *s2 ^= *s0;
        *s3 ^= *s1;
        *s1 ^= *s2;
        *s0 ^= *s3;
        *s2 ^= shifted;
        *s3 = s3.rotate_left(45);

        out
    }

    /// Uniform in `[0, 1)` with 53 bits of precision.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (1u64 << 53) as f64;
        (self.next_u64() >> 11) as f64 * SCALE
    }

    /// A sample from N(0, 1) using the Marsaglia polar method. Each accepted
    /// pair yields two samples; the second is cached for the next call.
    pub fn next_normal(&mut self) -> f64 {
        if let Some(z) = self.cached_normal.take() {
            return z;
        }
        loop {
            let x = 2.0 * self.next_f64() - 1.0;
            let y = 2.0 * self.next_f64() - 1.0;
            let r2 = x * x + y * y;
            if r2 == 0.0 || r2 >= 1.0 {
                continue;
            }
            let k = (-2.0 * r2.ln() / r2).sqrt();
            self.cached_normal = Some(y * k);
            return x * k;
        }
    }
}

// ---------------------------------------------------------------------------
// Random matrices
// ---------------------------------------------------------------------------

/// A `rows x cols` matrix of samples uniform in [0, 1).
///
/// # Panics
///
/// Panics if `rows` or `cols` is zero.
///
/// ```
/// use linmat_core::random::{uniform, Rng};
///
/// let mut rng = Rng::new(0);
/// let m = uniform(&mut rng, 2, 3);
/// assert_eq!(m.shape(), (2, 3));
/// assert!(m.iter().all(|&x| (0.0..1.0).contains(&x)));
/// ```
pub fn uniform(rng: &mut Rng, rows: usize, cols: usize) -> Matrix {
    Matrix::from_fn(rows, cols, |_, _| rng.next_f64())
}

/// A `rows x cols` matrix of samples uniform in [`low`, `high`).
///
/// Returns an error if `low >= high` or either bound is not finite.
pub fn uniform_range(
    rng: &mut Rng,
    rows: usize,
    cols: usize,
    low: f64,
    high: f64,
) -> Result<Matrix> {
    if !(low.is_finite() && high.is_finite() && low < high) {
        return Err(CoreError::InvalidArgument {
            reason: "uniform_range requires finite low < high",
        });
    }
    let range = high - low;
    Ok(Matrix::from_fn(rows, cols, |_, _| low + rng.next_f64() * range))
}

/// A `rows x cols` matrix of samples from N(0, 1).
pub fn standard_normal(rng: &mut Rng, rows: usize, cols: usize) -> Matrix {
    Matrix::from_fn(rows, cols, |_, _| rng.next_normal())
}
