use super::*;
use crate::autograd::session::{session, with_session};
use crate::device::StorageDevice;
use crate::tensor::Tensor;
use crate::types::DType;
use crate::utils::testing::check_value_near;

fn array(data: Vec<f32>, shape: Vec<usize>) -> Value {
    Value::array(Tensor::new(data, shape).unwrap())
}

#[test]
fn test_add_tensors_ok() -> Result<(), GradTapeError> {
    let t1 = array(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let t2 = array(vec![5.0, 6.0, 7.0, 8.0], vec![2, 2]);
    let result = add_op(&t1, &t2)?;
    check_value_near(&result, &[2, 2], &[6.0, 8.0, 10.0, 12.0], 1e-6);
    assert_eq!(result.dtype(), DType::F32);
    assert_eq!(result.device(), Some(StorageDevice::CPU));
    Ok(())
}

#[test]
fn test_add_tensors_shape_mismatch() {
    let t1 = array(vec![1.0, 2.0], vec![2]);
    let t2 = array(vec![1.0, 2.0, 3.0], vec![3]);
    let result = add_op(&t1, &t2);
    assert!(matches!(result, Err(GradTapeError::ShapeMismatch { .. })));
}

#[test]
fn test_add_without_session_records_nothing() -> Result<(), GradTapeError> {
    let a = array(vec![1.0], vec![1]);
    let b = array(vec![2.0], vec![1]);
    let _ = add_op(&a, &b)?;
    // The records of the call above went nowhere; a new tape starts empty.
    let session = session()?;
    assert_eq!(session.tape().borrow().pending_records(&a), 0);
    Ok(())
}

#[test]
fn test_add_backward() -> Result<(), GradTapeError> {
    let a = array(vec![1.0, 2.0, 3.0], vec![3]);
    let b = array(vec![4.0, 5.0, 6.0], vec![3]);
    let (grad_a, grad_b) = with_session(|tape| {
        let out = add_op(&a, &b)?;
        assert_eq!(tape.borrow().pending_records(&a), 1);
        tape.set_gradient_target(&Node::from(&out))?;
        Ok((tape.get_gradient(&a)?, tape.get_gradient(&b)?))
    })?;
    check_value_near(&grad_a, &[3], &[1.0, 1.0, 1.0], 1e-6);
    check_value_near(&grad_b, &[3], &[1.0, 1.0, 1.0], 1e-6);
    Ok(())
}

#[test]
fn test_add_same_operand_twice() -> Result<(), GradTapeError> {
    let a = array(vec![1.0, -1.0], vec![2]);
    let grad = with_session(|tape| {
        let out = add_op(&a, &a)?;
        tape.set_gradient_target(&Node::from(&out))?;
        tape.get_gradient(&a)
    })?;
    check_value_near(&grad, &[2], &[2.0, 2.0], 1e-6);
    Ok(())
}

#[test]
fn test_add_scalar_operand_gets_summed_gradient() -> Result<(), GradTapeError> {
    let a = array(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let s = Value::number(10.0);
    let grad_s = with_session(|tape| {
        let out = add_op(&s, &a)?;
        tape.set_gradient_target(&Node::from(&out))?;
        tape.get_gradient(&s)
    })?;
    assert!(grad_s.is_number());
    assert_eq!(grad_s.scalar()?, 4.0);
    Ok(())
}
