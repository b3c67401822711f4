// gradtape-core/src/ops/arithmetic/add.rs

use crate::autograd::backward_op::BackwardOp;
use crate::autograd::node::Node;
use crate::error::GradTapeError;
use crate::ops::record;
use crate::value::{kernel, Value};

/// Backward operation for addition with respect to one operand.
///
/// The gradient passes through unchanged, reduced to a scalar when the
/// operand was a scalar broadcast over an array.
#[derive(Debug)]
struct AddBackward {
    operand: Value,
}

impl BackwardOp for AddBackward {
    fn backward(&self, grad_output: &Node) -> Result<Node, GradTapeError> {
        let grad = grad_output.as_value()?;
        Ok(Node::Leaf(kernel::unbroadcast(grad, &self.operand)?))
    }
}

/// Element-wise `a + b`.
///
/// Two arrays must share shape, dtype and device; a scalar operand is
/// broadcast. Records one backward op per operand while a tape is active.
pub fn add_op(a: &Value, b: &Value) -> Result<Value, GradTapeError> {
    let output = kernel::add(a, b)?;
    let result = Node::from(&output);
    record(Node::from(a), result.clone(), || AddBackward { operand: a.clone() })?;
    record(Node::from(b), result, || AddBackward { operand: b.clone() })?;
    Ok(output)
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
