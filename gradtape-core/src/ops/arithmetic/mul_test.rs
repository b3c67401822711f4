use super::*;
use crate::autograd::grad_check::check_grad;
use crate::autograd::session::with_session;
use crate::tensor::Tensor;
use crate::utils::testing::check_value_near;
use approx::assert_relative_eq;

#[test]
fn test_mul_forward() -> Result<(), GradTapeError> {
    let a = Value::array(Tensor::new(vec![1.0, 2.0, 3.0], vec![3])?);
    let b = Value::array(Tensor::new(vec![4.0, 5.0, 6.0], vec![3])?);
    let out = mul_op(&a, &b)?;
    check_value_near(&out, &[3], &[4.0, 10.0, 18.0], 1e-6);
    Ok(())
}

#[test]
fn test_mul_backward() -> Result<(), GradTapeError> {
    let a = Value::array(Tensor::new_f64(vec![1.0, 2.0, 3.0], vec![3])?);
    let b = Value::array(Tensor::new_f64(vec![4.0, 5.0, 6.0], vec![3])?);
    let (grad_a, grad_b) = with_session(|tape| {
        let out = mul_op(&a, &b)?;
        tape.set_gradient_target(&Node::from(&out))?;
        Ok((tape.get_gradient(&a)?, tape.get_gradient(&b)?))
    })?;
    check_value_near(&grad_a, &[3], &[4.0, 5.0, 6.0], 1e-12);
    check_value_near(&grad_b, &[3], &[1.0, 2.0, 3.0], 1e-12);
    Ok(())
}

#[test]
fn test_square_via_mul() -> Result<(), GradTapeError> {
    let x = Value::number(3.0);
    let grad = with_session(|tape| {
        let y = mul_op(&x, &x)?;
        tape.set_gradient_target(&Node::from(&y))?;
        tape.get_gradient(&x)
    })?;
    assert_relative_eq!(grad.scalar()?, 6.0);
    Ok(())
}

#[test]
fn test_mul_grad_check() {
    let a = Value::array(Tensor::new_f64(vec![0.5, -1.5, 2.0, 3.0], vec![2, 2]).unwrap());
    let b = Value::array(Tensor::new_f64(vec![1.0, 2.0, -0.5, 0.25], vec![2, 2]).unwrap());
    let result = check_grad(|xs| mul_op(&xs[0], &xs[1]), &[a, b], 1e-6, 1e-6);
    assert!(result.is_ok(), "{:?}", result);
}
