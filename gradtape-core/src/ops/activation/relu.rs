use crate::autograd::backward_op::BackwardOp;
use crate::autograd::node::Node;
use crate::error::GradTapeError;
use crate::ops::apply_unary_op;
use crate::value::{kernel, Value};

/// Backward for ReLU: the gradient flows where the input was positive.
#[derive(Debug)]
struct ReluBackward {
    input: Value,
}

impl BackwardOp for ReluBackward {
    fn backward(&self, grad_output: &Node) -> Result<Node, GradTapeError> {
        let mask = kernel::unary_map(&self.input, |x| if x > 0.0 { 1.0 } else { 0.0 })?;
        Ok(Node::Leaf(kernel::mul(grad_output.as_value()?, &mask)?))
    }
}

/// Element-wise `max(x, 0)`.
pub fn relu_op(a: &Value) -> Result<Value, GradTapeError> {
    let input = a.clone();
    apply_unary_op(a, |x| x.max(0.0), move |_| ReluBackward { input }, "relu_op")
}

#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
