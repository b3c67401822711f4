use super::*;
use crate::autograd::grad_check::check_grad;
use crate::autograd::session::with_session;
use crate::device::StorageDevice;
use crate::tensor::Tensor;
use crate::utils::testing::check_value_near;

#[test]
fn test_matmul_forward() -> Result<(), GradTapeError> {
    let a = Value::array(Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2])?);
    let b = Value::array(Tensor::new(vec![5.0, 6.0, 7.0, 8.0], vec![2, 2])?);
    let c = matmul_op(&a, &b)?;
    check_value_near(&c, &[2, 2], &[19.0, 22.0, 43.0, 50.0], 1e-5);
    Ok(())
}

#[test]
fn test_matmul_inner_dim_mismatch() {
    let a = Value::array(Tensor::new(vec![1.0; 6], vec![2, 3]).unwrap());
    let b = Value::array(Tensor::new(vec![1.0; 4], vec![2, 2]).unwrap());
    assert!(matches!(
        matmul_op(&a, &b),
        Err(GradTapeError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_matmul_device_mismatch() {
    let a = Value::array(Tensor::new(vec![1.0; 4], vec![2, 2]).unwrap());
    let b = Value::array(
        Tensor::new(vec![1.0; 4], vec![2, 2])
            .unwrap()
            .to_device(StorageDevice::GPU(0)),
    );
    assert!(matches!(
        matmul_op(&a, &b),
        Err(GradTapeError::DeviceMismatch { .. })
    ));
}

#[test]
fn test_matmul_backward() -> Result<(), GradTapeError> {
    let a = Value::array(Tensor::new_f64(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3])?);
    let b = Value::array(Tensor::new_f64(vec![1.0, 0.0, 0.0, 1.0, 1.0, 1.0], vec![3, 2])?);
    let (grad_a, grad_b) = with_session(|tape| {
        let c = matmul_op(&a, &b)?;
        tape.set_gradient_target(&Node::from(&c))?;
        Ok((tape.get_gradient(&a)?, tape.get_gradient(&b)?))
    })?;
    // ones(2,2) @ b^T and a^T @ ones(2,2)
    check_value_near(&grad_a, &[2, 3], &[1.0, 1.0, 2.0, 1.0, 1.0, 2.0], 1e-12);
    check_value_near(&grad_b, &[3, 2], &[5.0, 5.0, 7.0, 7.0, 9.0, 9.0], 1e-12);
    Ok(())
}

#[test]
fn test_matmul_grad_check() {
    let a = Value::array(Tensor::new_f64(vec![0.1, -0.4, 0.9, 1.3, -2.0, 0.7], vec![3, 2]).unwrap());
    let b = Value::array(Tensor::new_f64(vec![0.5, -1.0, 2.0, 0.25], vec![2, 2]).unwrap());
    let result = check_grad(|xs| matmul_op(&xs[0], &xs[1]), &[a, b], 1e-6, 1e-5);
    assert!(result.is_ok(), "{:?}", result);
}
