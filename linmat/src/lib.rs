//! # linmat
//!
//! Dense matrix storage, Strassen multiplication, and LU-based determinant,
//! solve and inversion.
//!
//! One `use linmat::prelude::*;` gives you [`Matrix`](linmat_core::Matrix),
//! [`MatrixLu`](linmat_core::MatrixLu) and the error type.
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `core` *(default)* | Matrix storage, multiplication, LU decomposition |
//!
//! ```
//! use linmat::prelude::*;
//!
//! let a = Matrix::from_rows(&[[4.0, 7.0], [2.0, 6.0]]).unwrap();
//! let lu = MatrixLu::decompose(&a).unwrap();
//! assert!((lu.determinant() - 10.0).abs() < 1e-12);
//! ```

pub use linmat_core as core;

/// Glob-import convenience: `use linmat::prelude::*;`
pub mod prelude {
    pub use linmat_core::prelude::*;
}
