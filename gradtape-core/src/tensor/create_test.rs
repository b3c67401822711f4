use super::*;
use crate::device::StorageDevice;
use crate::tensor::Tensor;
use crate::types::DType;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_zeros_like() {
    let tensor = Tensor::new(vec![1.0f32, 2.0, 3.0], vec![1, 3]).unwrap();
    let zeros_t = zeros_like(&tensor).unwrap();
    assert_eq!(zeros_t.shape(), tensor.shape());
    assert_eq!(zeros_t.numel(), tensor.numel());
    assert_eq!(zeros_t.device(), tensor.device());
    assert_eq!(zeros_t.dtype(), DType::F32);
    assert!(zeros_t.get_f32_data().unwrap().iter().all(|&x| x == 0.0));
}

#[test]
fn test_zeros_like_keeps_device_and_dtype() {
    let tensor = Tensor::new_f64(vec![1.0, 2.0], vec![2])
        .unwrap()
        .to_device(StorageDevice::GPU(1));
    let zeros_t = zeros_like(&tensor).unwrap();
    assert_eq!(zeros_t.device(), StorageDevice::GPU(1));
    assert_eq!(zeros_t.dtype(), DType::F64);
    assert_eq!(zeros_t.get_f64_data().unwrap(), vec![0.0, 0.0]);
}

#[test]
fn test_zeros() {
    let shape = vec![2, 3];
    let t = zeros(&shape).unwrap();
    assert_eq!(t.shape(), shape);
    assert_eq!(t.numel(), 6);
    assert_eq!(t.device(), StorageDevice::CPU);
    assert_eq!(t.dtype(), DType::F32);
    assert!(t.get_f32_data().unwrap().iter().all(|&x| x == 0.0));
}

#[test]
fn test_ones_like() {
    let tensor = Tensor::new(vec![5.0f32; 6], vec![3, 2]).unwrap();
    let t = ones_like(&tensor).unwrap();
    assert_eq!(t.shape(), vec![3, 2]);
    assert!(t.get_f32_data().unwrap().iter().all(|&x| x == 1.0));
}

#[test]
fn test_full() {
    let t = full(&[2, 2], 7.5).unwrap();
    assert_eq!(t.get_f32_data().unwrap(), vec![7.5; 4]);
}

#[test]
fn test_creation_length_mismatch() {
    let result = from_vec_f32(vec![1.0, 2.0, 3.0], vec![2, 2]);
    assert!(matches!(
        result,
        Err(crate::error::GradTapeError::TensorCreationError { data_len: 3, .. })
    ));
}

#[test]
fn test_randn_seeded_is_reproducible() {
    let a = randn_with(&[4, 3], &mut StdRng::seed_from_u64(7)).unwrap();
    let b = randn_with(&[4, 3], &mut StdRng::seed_from_u64(7)).unwrap();
    assert_eq!(a.shape(), vec![4, 3]);
    assert_eq!(a.get_f32_data().unwrap(), b.get_f32_data().unwrap());
    // Distinct tensors even with equal contents.
    assert_ne!(a, b);
}
