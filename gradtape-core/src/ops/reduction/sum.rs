use crate::autograd::backward_op::BackwardOp;
use crate::autograd::node::Node;
use crate::error::GradTapeError;
use crate::ops::record;
use crate::value::{kernel, Value};

/// Backward for a full sum: every input element receives the (scalar)
/// output gradient.
#[derive(Debug)]
struct SumBackward {
    input: Value,
}

impl BackwardOp for SumBackward {
    fn backward(&self, grad_output: &Node) -> Result<Node, GradTapeError> {
        let grad = grad_output.as_value()?.scalar()?;
        Ok(Node::Leaf(self.input.full_like(grad)?))
    }
}

/// Sums every element of `a` into a pure scalar, the usual loss reduction.
pub fn sum_op(a: &Value) -> Result<Value, GradTapeError> {
    let output = kernel::sum_all(a)?;
    record(Node::from(a), Node::from(&output), || SumBackward { input: a.clone() })?;
    Ok(output)
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
