use thiserror::Error;

/// Failures reported by [`Vector`](crate::Vector) operations.
///
/// Every variant is detected before the failing call touches the vector, so
/// an `Err` always leaves size, capacity and contents as they were.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VectorError {
    /// Element access or removal on a vector with no live elements.
    #[error("{operation}: vector is empty")]
    Empty { operation: &'static str },

    #[error("index {index} out of range for vector of size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// A position whose offset falls outside `[0, limit)`.
    #[error("position offset {offset} out of bounds (limit {limit})")]
    PositionOutOfRange { offset: isize, limit: usize },

    /// The position was issued before a reallocation or element shift.
    #[error("position is stale: issued at generation {issued}, vector is at {current}")]
    StalePosition { issued: u64, current: u64 },

    #[error("position was issued by a different vector")]
    ForeignPosition,

    #[error("cannot shrink an empty vector to a zero-capacity buffer")]
    ShrinkEmpty,
}

pub type Result<T, E = VectorError> = core::result::Result<T, E>;
