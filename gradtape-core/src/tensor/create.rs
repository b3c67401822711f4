// src/tensor/create.rs

use crate::device::StorageDevice;
use crate::error::GradTapeError;
use crate::tensor::Tensor;
use crate::types::DType;

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Creates a tensor filled with `value`, with explicit dtype and device.
pub fn full_on(
    shape: &[usize],
    value: f64,
    dtype: DType,
    device: StorageDevice,
) -> Result<Tensor, GradTapeError> {
    let numel: usize = shape.iter().product();
    Tensor::from_f64_data(vec![value; numel], shape.to_vec(), dtype, device)
}

/// Creates a new F32 tensor filled with zeros on the CPU.
pub fn zeros(shape: &[usize]) -> Result<Tensor, GradTapeError> {
    full_on(shape, 0.0, DType::F32, StorageDevice::CPU)
}

/// Creates a new F32 tensor filled with ones on the CPU.
pub fn ones(shape: &[usize]) -> Result<Tensor, GradTapeError> {
    full_on(shape, 1.0, DType::F32, StorageDevice::CPU)
}

/// Creates a new F32 tensor filled with `value` on the CPU.
pub fn full(shape: &[usize], value: f32) -> Result<Tensor, GradTapeError> {
    full_on(shape, value as f64, DType::F32, StorageDevice::CPU)
}

/// Creates a new CPU F32 Tensor from a Vec<f32> and shape.
pub fn from_vec_f32(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Tensor, GradTapeError> {
    Tensor::new(data_vec, shape)
}

/// Creates a new CPU F64 Tensor from a Vec<f64> and shape.
pub fn from_vec_f64(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Tensor, GradTapeError> {
    Tensor::new_f64(data_vec, shape)
}

/// Creates a zero tensor with the same shape, dtype and device as `tensor`.
pub fn zeros_like(tensor: &Tensor) -> Result<Tensor, GradTapeError> {
    full_on(&tensor.shape(), 0.0, tensor.dtype(), tensor.device())
}

/// Creates a tensor of ones with the same shape, dtype and device as `tensor`.
pub fn ones_like(tensor: &Tensor) -> Result<Tensor, GradTapeError> {
    full_on(&tensor.shape(), 1.0, tensor.dtype(), tensor.device())
}

/// Samples an F32 CPU tensor from the standard normal distribution.
pub fn randn(shape: &[usize]) -> Result<Tensor, GradTapeError> {
    randn_with(shape, &mut rand::thread_rng())
}

/// Like [`randn`], drawing from the supplied generator (useful for seeded runs).
pub fn randn_with<R: Rng + ?Sized>(shape: &[usize], rng: &mut R) -> Result<Tensor, GradTapeError> {
    let numel: usize = shape.iter().product();
    let data_vec: Vec<f32> = (0..numel)
        .map(|_| StandardNormal.sample(&mut *rng))
        .collect();
    Tensor::new(data_vec, shape.to_vec())
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
