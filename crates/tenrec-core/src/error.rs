use crate::shape::Shape;

/// All errors that can occur within the tensor engine.
///
/// Every failure is a precondition violation: mismatched shapes, an
/// out-of-range row index, an impossible shape request, or a storage
/// reservation that could not be satisfied. The engine never continues
/// past one of these with invalid state; callers decide whether to
/// report and stop or to bubble the error further up.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Operand or destination shape disagreement for an elementwise,
    /// concat, or activation operation.
    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: Shape, got: Shape },

    /// Matrix multiplication inner-dimension disagreement.
    #[error("matmul shape mismatch: [{m}x{k1}] @ [{k2}x{n}], inner dims must match")]
    MatmulShapeMismatch {
        m: usize,
        k1: usize,
        k2: usize,
        n: usize,
    },

    /// Row view index past the first axis of the source tensor.
    #[error("row out of bounds: index {index} for tensor with {rows} rows")]
    RowOutOfBounds { index: usize, rows: usize },

    /// Requested rank outside [1, 2], or an axis of size 0.
    #[error("invalid dimensions {dims:?}: rank must be 1 or 2 and every axis at least 1")]
    InvalidDimensions { dims: Vec<usize> },

    /// Data length does not match the shape when building from a slice.
    #[error("element count mismatch: shape {shape} requires {expected} elements, got {got}")]
    ElementCountMismatch {
        shape: Shape,
        expected: usize,
        got: usize,
    },

    /// Storage reservation failed.
    #[error("allocation failure: could not reserve storage for {elems} elements")]
    AllocationFailure { elems: usize },

    /// The destination of an operation that forbids aliasing shares
    /// storage with one of its operands.
    #[error("aliased destination: {op} requires a destination disjoint from its operands")]
    AliasedDestination { op: &'static str },

    /// Generic message for cases not covered above.
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an error from any string message.
    pub fn msg(s: impl Into<String>) -> Self {
        Error::Msg(s.into())
    }
}

/// Convenience Result type used throughout the engine.
pub type Result<T> = std::result::Result<T, Error>;
