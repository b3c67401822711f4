use super::*;
use crate::autograd::session::with_session;
use crate::device::StorageDevice;
use crate::tensor::Tensor;
use crate::utils::testing::check_value_near;
use approx::assert_relative_eq;

#[test]
fn test_sum_forward() -> Result<(), GradTapeError> {
    let x = Value::array(Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2])?);
    let s = sum_op(&x)?;
    assert!(s.is_number());
    assert_relative_eq!(s.scalar()?, 10.0);
    Ok(())
}

#[test]
fn test_sum_backward_broadcasts_on_input_device() -> Result<(), GradTapeError> {
    let x = Value::array(
        Tensor::new(vec![1.0, 2.0, 3.0], vec![3])?.to_device(StorageDevice::GPU(0)),
    );
    let grad = with_session(|tape| {
        let s = sum_op(&x)?;
        tape.set_gradient_target(&Node::from(&s))?;
        tape.get_gradient(&x)
    })?;
    assert_eq!(grad.device(), Some(StorageDevice::GPU(0)));
    check_value_near(&grad, &[3], &[1.0, 1.0, 1.0], 1e-6);
    Ok(())
}
