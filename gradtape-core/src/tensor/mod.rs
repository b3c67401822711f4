// src/tensor/mod.rs

use crate::buffer::Buffer;
use crate::device::StorageDevice;
use crate::error::GradTapeError;
use crate::tensor_data::TensorData;
use crate::types::DType;
use std::sync::Arc;

mod traits;
pub mod create;

pub use create::{
    from_vec_f32, from_vec_f64, full, ones, ones_like, randn, randn_with, zeros, zeros_like,
};

/// Represents a multi-dimensional array.
///
/// `Tensor` is a cheap handle around `Arc<TensorData>`. Clones share the
/// same data and the same identity; two tensors built from equal numbers are
/// still distinct values as far as the gradient tape is concerned.
pub struct Tensor {
    pub(crate) data: Arc<TensorData>,
}

impl Tensor {
    /// Creates a new F32 tensor on the CPU from row-major data.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, GradTapeError> {
        Self::from_buffer(Buffer::F32(Arc::new(data_vec)), shape, StorageDevice::CPU)
    }

    /// Creates a new F64 tensor on the CPU from row-major data.
    pub fn new_f64(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Self, GradTapeError> {
        Self::from_buffer(Buffer::F64(Arc::new(data_vec)), shape, StorageDevice::CPU)
    }

    /// Wraps an existing buffer. The buffer length must match `shape`.
    pub fn from_buffer(
        buffer: Buffer,
        shape: Vec<usize>,
        device: StorageDevice,
    ) -> Result<Self, GradTapeError> {
        let tensor_data = TensorData::new(buffer, shape, device)?;
        Ok(Tensor {
            data: Arc::new(tensor_data),
        })
    }

    /// Builds a tensor of the given dtype and device from f64 values.
    pub(crate) fn from_f64_data(
        data_vec: Vec<f64>,
        shape: Vec<usize>,
        dtype: DType,
        device: StorageDevice,
    ) -> Result<Self, GradTapeError> {
        Self::from_buffer(Buffer::from_f64(dtype, data_vec)?, shape, device)
    }

    /// Returns the data type (`DType`) of the tensor elements.
    pub fn dtype(&self) -> DType {
        self.data.dtype
    }

    /// Returns the device (`StorageDevice`) where the tensor's data resides.
    pub fn device(&self) -> StorageDevice {
        self.data.device
    }

    /// Returns a clone of the tensor's shape.
    pub fn shape(&self) -> Vec<usize> {
        self.data.shape.clone()
    }

    /// Returns the number of dimensions.
    pub fn rank(&self) -> usize {
        self.data.shape.len()
    }

    /// Returns the number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.data.numel()
    }

    pub fn buffer(&self) -> &Buffer {
        self.data.buffer()
    }

    /// Copies the elements out as f64 regardless of dtype.
    pub fn to_f64_vec(&self) -> Result<Vec<f64>, GradTapeError> {
        self.data.buffer.to_f64_vec()
    }

    /// Attempts to get the tensor data as a `Vec<f32>`.
    /// Returns an error if the tensor is not F32.
    pub fn get_f32_data(&self) -> Result<Vec<f32>, GradTapeError> {
        Ok(self.data.buffer.try_get_f32()?.as_ref().clone())
    }

    /// Attempts to get the tensor data as a `Vec<f64>`.
    /// Returns an error if the tensor is not F64.
    pub fn get_f64_data(&self) -> Result<Vec<f64>, GradTapeError> {
        Ok(self.data.buffer.try_get_f64()?.as_ref().clone())
    }

    /// Returns a new tensor with the same contents placed on `device`.
    ///
    /// The buffer is shared, but the result is a distinct tensor.
    pub fn to_device(&self, device: StorageDevice) -> Tensor {
        Tensor {
            data: Arc::new(TensorData {
                buffer: Arc::clone(&self.data.buffer),
                device,
                dtype: self.data.dtype,
                shape: self.data.shape.clone(),
            }),
        }
    }

    /// Stable address used as the tensor's identity.
    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.data) as usize
    }
}
