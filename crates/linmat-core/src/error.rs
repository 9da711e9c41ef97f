use thiserror::Error;

/// All errors returned by `linmat-core`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Operand shapes are incompatible for the requested operation.
    /// Shapes are `(rows, cols)`.
    #[error("dimension mismatch in {op}: lhs is {lhs:?}, rhs is {rhs:?}")]
    DimensionMismatch {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    /// A value sequence does not hold exactly `rows * cols` elements.
    #[error("expected {expected} values, got {got}")]
    DataCountMismatch { expected: usize, got: usize },

    /// A matrix needs at least one row and one column.
    #[error("matrix dimensions must be positive, got {rows}x{cols}")]
    EmptyDimension { rows: usize, cols: usize },

    /// Indexer access outside `[0, rows) x [0, cols)`.
    #[error("index ({row}, {col}) out of range for {rows}x{cols} matrix")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Decomposition requested on a non-square matrix.
    #[error("expected a square matrix, got {rows}x{cols}")]
    NonSquareMatrix { rows: usize, cols: usize },

    /// Matrix is singular and cannot be decomposed or inverted.
    #[error("singular matrix")]
    SingularMatrix,

    /// Malformed matrix text. `line` is 1-based.
    #[error("parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// The operation is not supported for the given input.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },
}

/// Convenience alias used throughout `linmat-core`.
pub type Result<T> = std::result::Result<T, CoreError>;
