use crate::autograd::backward_op::BackwardOp;
use crate::autograd::node::Node;
use crate::error::GradTapeError;
use crate::ops::apply_unary_op;
use crate::value::{kernel, Value};

#[derive(Debug)]
struct SinBackward {
    input: Value,
}

impl BackwardOp for SinBackward {
    fn backward(&self, grad_output: &Node) -> Result<Node, GradTapeError> {
        let local = kernel::unary_map(&self.input, f64::cos)?;
        Ok(Node::Leaf(kernel::mul(grad_output.as_value()?, &local)?))
    }
}

/// Element-wise sine.
pub fn sin_op(a: &Value) -> Result<Value, GradTapeError> {
    let input = a.clone();
    apply_unary_op(a, f64::sin, move |_| SinBackward { input }, "sin_op")
}
