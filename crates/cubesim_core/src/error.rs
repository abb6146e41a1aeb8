use thiserror::Error;

use crate::{Axis, MAX_SIZE, MIN_SIZE};

/// Error produced by the cube state engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CubeError {
    /// Cube size outside the supported range.
    #[error("invalid cube size {size}; must be between {MIN_SIZE} and {MAX_SIZE}")]
    InvalidSize {
        /// Requested size.
        size: usize,
    },
    /// No piece has the given coordinate along the axis.
    #[error("no slice at {axis} = {index}")]
    InvalidSlice {
        /// Rotation axis.
        axis: Axis,
        /// Requested slice coordinate.
        index: f32,
    },
    /// Another rotation is still animating.
    #[error("a rotation is already in progress")]
    RotationInProgress,
    /// Logical state disagrees with itself. This indicates a bug, not a
    /// transient condition.
    #[error("consistency fault: {0}")]
    ConsistencyFault(String),
    /// Rotation direction other than `+1` or `-1`.
    #[error("invalid direction {0}; must be 1 or -1")]
    InvalidDirection(i8),
    /// Move string that could not be parsed.
    #[error("invalid move notation {0:?}")]
    InvalidNotation(String),
}
