// src/tensor_data.rs
use std::sync::Arc;

use crate::buffer::Buffer;
use crate::device::StorageDevice;
use crate::error::GradTapeError;
use crate::types::DType;

/// Internal storage and metadata for an array.
///
/// Holds the data buffer, shape, device and data type. Arrays are never
/// mutated after creation, so `Tensor` wraps this in a plain `Arc`.
#[derive(Debug)]
pub struct TensorData {
    /// The underlying typed buffer, shared for cheap clones and device copies.
    pub(crate) buffer: Arc<Buffer>,
    /// The device where the buffer resides.
    pub(crate) device: StorageDevice,
    /// The data type of the elements in the buffer.
    pub(crate) dtype: DType,
    /// The shape (dimensions) of the array, row-major.
    pub(crate) shape: Vec<usize>,
}

impl TensorData {
    /// Creates a new `TensorData` from a buffer, checking that the buffer
    /// length matches the number of elements implied by `shape`.
    ///
    /// # Errors
    /// Returns `GradTapeError::TensorCreationError` on a length mismatch.
    pub fn new(
        buffer: Buffer,
        shape: Vec<usize>,
        device: StorageDevice,
    ) -> Result<Self, GradTapeError> {
        let numel: usize = shape.iter().product();
        let data_len = buffer.len();
        if data_len != numel {
            return Err(GradTapeError::TensorCreationError { data_len, shape });
        }
        Ok(TensorData {
            dtype: buffer.dtype(),
            buffer: Arc::new(buffer),
            device,
            shape,
        })
    }

    /// Returns the number of elements.
    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }
}
