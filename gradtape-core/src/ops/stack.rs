use crate::autograd::backward_op::BackwardOp;
use crate::autograd::node::Node;
use crate::error::GradTapeError;
use crate::ops::record;
use crate::value::{kernel, Value};

/// Backward operation for [`stack_op`].
///
/// Splits the upstream gradient along the stacked axis and hands one slice
/// to each input position. Scalar inputs get their slice back as a scalar.
#[derive(Debug)]
struct StackBackward {
    inputs: Vec<Value>,
}

impl BackwardOp for StackBackward {
    fn backward(&self, grad_output: &Node) -> Result<Node, GradTapeError> {
        let chunks = kernel::split(grad_output.as_value()?)?;
        if chunks.len() != self.inputs.len() {
            return Err(GradTapeError::ShapeMismatch {
                expected: vec![self.inputs.len()],
                actual: vec![chunks.len()],
                operation: "stack backward".to_string(),
            });
        }
        chunks
            .into_iter()
            .zip(&self.inputs)
            .map(|(chunk, input)| {
                if input.is_number() {
                    Ok(Node::Leaf(Value::number(chunk.scalar()?)))
                } else {
                    Ok(Node::Leaf(chunk))
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Node::Composite)
    }
}

/// Stacks values along a new leading axis.
///
/// A multi-input primitive: one record is registered with the whole list as
/// its owner. `None` entries are rejected; every position takes part in the
/// forward result.
pub fn stack_op(values: &[Value]) -> Result<Value, GradTapeError> {
    let output = kernel::stack(values)?;
    record(Node::from(values.to_vec()), Node::from(&output), || StackBackward {
        inputs: values.to_vec(),
    })?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autograd::session::with_session;
    use crate::ops::{mul_op, sum_op};
    use crate::tensor::Tensor;
    use crate::utils::testing::check_value_near;
    use approx::assert_relative_eq;

    #[test]
    fn test_stack_forward() -> Result<(), GradTapeError> {
        let a = Value::array(Tensor::new(vec![1.0, 2.0], vec![2])?);
        let b = Value::array(Tensor::new(vec![3.0, 4.0], vec![2])?);
        let s = stack_op(&[a, b])?;
        check_value_near(&s, &[2, 2], &[1.0, 2.0, 3.0, 4.0], 1e-6);
        Ok(())
    }

    #[test]
    fn test_stack_backward_routes_slices() -> Result<(), GradTapeError> {
        let a = Value::array(Tensor::new_f64(vec![1.0, 2.0], vec![2])?);
        let b = Value::array(Tensor::new_f64(vec![3.0, 4.0], vec![2])?);
        let weights = Value::array(Tensor::new_f64(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2])?);
        let (grad_a, grad_b) = with_session(|tape| {
            let s = stack_op(&[a.clone(), b.clone()])?;
            let loss = sum_op(&mul_op(&s, &weights)?)?;
            tape.set_gradient_target(&Node::from(&loss))?;
            Ok((tape.get_gradient(&a)?, tape.get_gradient(&b)?))
        })?;
        check_value_near(&grad_a, &[2], &[1.0, 2.0], 1e-12);
        check_value_near(&grad_b, &[2], &[3.0, 4.0], 1e-12);
        Ok(())
    }

    #[test]
    fn test_stack_same_value_twice() -> Result<(), GradTapeError> {
        let x = Value::number(2.0);
        let weights = Value::array(Tensor::new_f64(vec![3.0, 5.0], vec![2])?);
        let grad = with_session(|tape| {
            let s = stack_op(&[x.clone(), x.clone()])?;
            let loss = sum_op(&mul_op(&s, &weights)?)?;
            tape.set_gradient_target(&Node::from(&loss))?;
            tape.get_gradient(&x)
        })?;
        assert!(grad.is_number());
        assert_relative_eq!(grad.scalar()?, 8.0);
        Ok(())
    }
}
