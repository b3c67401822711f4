use crate::autograd::backward_op::BackwardOp;
use crate::autograd::node::Node;
use crate::error::GradTapeError;
use crate::ops::record;
use crate::value::{kernel, Value};

/// Backward operation for subtraction. The subtrahend receives the negated
/// gradient.
#[derive(Debug)]
struct SubBackward {
    operand: Value,
    negate: bool,
}

impl BackwardOp for SubBackward {
    fn backward(&self, grad_output: &Node) -> Result<Node, GradTapeError> {
        let grad = grad_output.as_value()?;
        let grad = if self.negate {
            kernel::neg(grad)?
        } else {
            grad.clone()
        };
        Ok(Node::Leaf(kernel::unbroadcast(&grad, &self.operand)?))
    }
}

/// Element-wise `a - b`.
pub fn sub_op(a: &Value, b: &Value) -> Result<Value, GradTapeError> {
    let output = kernel::sub(a, b)?;
    let result = Node::from(&output);
    record(Node::from(a), result.clone(), || SubBackward {
        operand: a.clone(),
        negate: false,
    })?;
    record(Node::from(b), result, || SubBackward {
        operand: b.clone(),
        negate: true,
    })?;
    Ok(output)
}
