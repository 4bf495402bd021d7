//! errors — shared error taxonomy for every subtree of the crate.
//!
//! Each subtree (`distributions`, `estimators`, `regression`, `persistence`)
//! defines its own error enum and result alias. All of them classify their
//! variants into the coarse [`ErrorKind`] below so callers can branch on the
//! *kind* of failure without matching every variant.

/// Coarse classification of a failure.
///
/// - `InvalidArgument`: malformed construction parameters or call arguments
///   (out-of-range probabilities, mismatched lengths, non-positive scales,
///   NaN/∞ where finite values are required, inconsistent epoch bounds).
/// - `InvalidState`: the operation needs state that is absent (querying an
///   empty estimator, removing more observations than were recorded).
/// - `OutOfRange`: a dimension index past the end of a per-dimension array.
/// - `Persistence`: byte-stream read/write or decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    InvalidState,
    OutOfRange,
    Persistence,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidArgument => write!(f, "invalid argument"),
            ErrorKind::InvalidState => write!(f, "invalid state"),
            ErrorKind::OutOfRange => write!(f, "out of range"),
            ErrorKind::Persistence => write!(f, "persistence failure"),
        }
    }
}
