use crate::autograd::backward_op::BackwardOp;
use crate::autograd::node::Node;
use crate::error::GradTapeError;
use crate::ops::record;
use crate::value::{kernel, Value};

/// Backward operation for element-wise multiplication:
/// dL/dA = dL/dOut * B, reduced to A's kind.
#[derive(Debug)]
struct MulBackward {
    operand: Value,
    other: Value,
}

impl BackwardOp for MulBackward {
    fn backward(&self, grad_output: &Node) -> Result<Node, GradTapeError> {
        let grad = kernel::mul(grad_output.as_value()?, &self.other)?;
        Ok(Node::Leaf(kernel::unbroadcast(&grad, &self.operand)?))
    }
}

/// Element-wise `a * b`.
pub fn mul_op(a: &Value, b: &Value) -> Result<Value, GradTapeError> {
    let output = kernel::mul(a, b)?;
    let result = Node::from(&output);
    record(Node::from(a), result.clone(), || MulBackward {
        operand: a.clone(),
        other: b.clone(),
    })?;
    record(Node::from(b), result, || MulBackward {
        operand: b.clone(),
        other: a.clone(),
    })?;
    Ok(output)
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
