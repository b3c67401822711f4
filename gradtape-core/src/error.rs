use crate::device::StorageDevice;
use crate::types::DType;
use thiserror::Error;

/// Custom error type for the gradtape crate.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum GradTapeError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Device mismatch for operation '{operation}': expected {expected:?}, got {actual:?}")]
    DeviceMismatch {
        expected: StorageDevice,
        actual: StorageDevice,
        operation: String,
    },

    #[error("DType mismatch for operation '{operation}': expected {expected:?}, got {actual:?}")]
    DataTypeMismatch {
        expected: DType,
        actual: DType,
        operation: String,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    /// A gradient contribution does not line up with the owner structure it is
    /// accumulated into.
    #[error("Number of gradients does not match: owner has {expected} entries, gradient has {actual}")]
    StructureMismatch { expected: usize, actual: usize },

    #[error("Expected a single value, found {0}")]
    NotAValue(String),

    #[error("A recording session is already active on this thread")]
    SessionAlreadyActive,

    #[error("The active tape is busy and cannot record while it is being traversed")]
    TapeBusy,

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}
