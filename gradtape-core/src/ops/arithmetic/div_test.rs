use super::*;
use crate::autograd::grad_check::check_grad;
use crate::autograd::session::with_session;
use crate::tensor::Tensor;
use approx::assert_relative_eq;

#[test]
fn test_div_backward_scalars() -> Result<(), GradTapeError> {
    let a = Value::number(6.0);
    let b = Value::number(3.0);
    let (out, grad_a, grad_b) = with_session(|tape| {
        let out = div_op(&a, &b)?;
        tape.set_gradient_target(&Node::from(&out))?;
        Ok((out, tape.get_gradient(&a)?, tape.get_gradient(&b)?))
    })?;
    assert_relative_eq!(out.scalar()?, 2.0);
    assert_relative_eq!(grad_a.scalar()?, 1.0 / 3.0);
    assert_relative_eq!(grad_b.scalar()?, -6.0 / 9.0);
    Ok(())
}

#[test]
fn test_div_by_zero_is_infinite() -> Result<(), GradTapeError> {
    let out = div_op(&Value::number(1.0), &Value::number(0.0))?;
    assert!(out.scalar()?.is_infinite());
    Ok(())
}

#[test]
fn test_div_grad_check_with_scalar_denominator() {
    let a = Value::array(Tensor::new_f64(vec![1.0, -2.0, 4.0], vec![3]).unwrap());
    let b = Value::number(1.5);
    let result = check_grad(|xs| div_op(&xs[0], &xs[1]), &[a, b], 1e-6, 1e-5);
    assert!(result.is_ok(), "{:?}", result);
}
