use crate::autograd::backward_op::BackwardOp;
use crate::autograd::node::Node;
use crate::error::GradTapeError;
use crate::ops::record;
use crate::value::{kernel, Value};

/// Backward operation for [`split_op`]: the per-output gradients are stacked
/// back into the input's shape.
#[derive(Debug)]
struct SplitBackward;

impl BackwardOp for SplitBackward {
    fn backward(&self, grad_output: &Node) -> Result<Node, GradTapeError> {
        let parts = grad_output.as_composite().ok_or_else(|| {
            GradTapeError::NotAValue("split backward expects one gradient per output".to_string())
        })?;
        let grads = parts
            .iter()
            .map(|part| part.as_value().cloned())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Node::Leaf(kernel::stack(&grads)?))
    }
}

/// Splits an array along its leading axis.
///
/// A multi-output primitive: the single record's result is the composite of
/// all outputs, so the input is finalized only after every output is.
pub fn split_op(a: &Value) -> Result<Vec<Value>, GradTapeError> {
    let outputs = kernel::split(a)?;
    if !outputs.is_empty() {
        record(Node::from(a), Node::from(outputs.clone()), || SplitBackward)?;
    }
    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autograd::session::with_session;
    use crate::ops::{add_op, exp_op, mul_op, sum_op};
    use crate::tensor::Tensor;
    use crate::utils::testing::check_value_near;

    #[test]
    fn test_split_forward() -> Result<(), GradTapeError> {
        let x = Value::array(Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![3, 2])?);
        let parts = split_op(&x)?;
        assert_eq!(parts.len(), 3);
        check_value_near(&parts[2], &[2], &[5.0, 6.0], 1e-6);
        Ok(())
    }

    #[test]
    fn test_split_backward_waits_for_every_output() -> Result<(), GradTapeError> {
        // loss = sum(p0 * 2) + sum(exp(p1)) + sum(p1)
        let x = Value::array(Tensor::new_f64(vec![0.0, 1.0, 2.0, 3.0], vec![2, 2])?);
        let grad = with_session(|tape| {
            let parts = split_op(&x)?;
            let left = sum_op(&mul_op(&parts[0], &Value::number(2.0))?)?;
            let right = sum_op(&exp_op(&parts[1])?)?;
            let extra = sum_op(&parts[1])?;
            let loss = add_op(&add_op(&left, &right)?, &extra)?;
            tape.set_gradient_target(&Node::from(&loss))?;
            tape.get_gradient(&x)
        })?;
        let e2 = 2.0f64.exp();
        let e3 = 3.0f64.exp();
        check_value_near(&grad, &[2, 2], &[2.0, 2.0, e2 + 1.0, e3 + 1.0], 1e-9);
        Ok(())
    }

    #[test]
    fn test_split_unused_output_contributes_zero() -> Result<(), GradTapeError> {
        let x = Value::array(Tensor::new_f64(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2])?);
        let grad = with_session(|tape| {
            let parts = split_op(&x)?;
            let loss = sum_op(&parts[1])?;
            tape.set_gradient_target(&Node::from(&loss))?;
            tape.get_gradient(&x)
        })?;
        check_value_near(&grad, &[2, 2], &[0.0, 0.0, 1.0, 1.0], 1e-12);
        Ok(())
    }
}
