use crate::autograd::backward_op::BackwardOp;
use crate::autograd::node::Node;
use crate::error::GradTapeError;
use crate::ops::apply_unary_op;
use crate::value::{kernel, Value};

#[derive(Debug)]
struct NegBackward;

impl BackwardOp for NegBackward {
    fn backward(&self, grad_output: &Node) -> Result<Node, GradTapeError> {
        Ok(Node::Leaf(kernel::neg(grad_output.as_value()?)?))
    }
}

/// Element-wise negation.
pub fn neg_op(a: &Value) -> Result<Value, GradTapeError> {
    apply_unary_op(a, |x| -x, |_| NegBackward, "neg_op")
}
