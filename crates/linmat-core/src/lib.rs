//! `linmat-core`: dense matrix engine.
//!
//! Provides an arbitrary-size, column-major [`Matrix`] of `f64`, element-wise
//! arithmetic, dimension-checked multiplication with a recursive Strassen
//! fast path, and an LU decomposition engine ([`linalg::MatrixLu`]) for
//! determinants, linear solves and inversion.
//!
//! # Design
//!
//! - Every [`Matrix`] owns its buffer; clones are deep copies and there is no
//!   shared mutable state, so independent computations can run on separate
//!   threads without synchronization.
//! - Fallible operations return [`Result`]; operator overloads (`+`, `-`,
//!   `*`, indexing) panic on shape or index violations instead.
//! - Diagnostics go through the [`log`] facade; no logger is installed here.

pub mod error;
pub mod linalg;
pub mod matrix;
pub mod random;

// Re-export key types at crate root for convenience.
pub use error::{CoreError, Result};
pub use linalg::{MatmulAlgorithm, MatmulPolicy, MatrixLu};
pub use matrix::{FixedMatrix, Matrix};

/// Items intended for glob-import: `use linmat_core::prelude::*;`
pub mod prelude {
    pub use crate::error::{CoreError, Result};
    pub use crate::linalg::{MatmulAlgorithm, MatmulPolicy, MatrixLu};
    pub use crate::matrix::{FixedMatrix, Matrix};
}
