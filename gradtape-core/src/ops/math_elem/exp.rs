use crate::autograd::backward_op::BackwardOp;
use crate::autograd::node::Node;
use crate::error::GradTapeError;
use crate::ops::apply_unary_op;
use crate::value::{kernel, Value};

/// Backward for exp: dL/dX = dL/dOut * exp(X), reusing the forward output.
#[derive(Debug)]
struct ExpBackward {
    output: Value,
}

impl BackwardOp for ExpBackward {
    fn backward(&self, grad_output: &Node) -> Result<Node, GradTapeError> {
        Ok(Node::Leaf(kernel::mul(grad_output.as_value()?, &self.output)?))
    }
}

/// Element-wise natural exponential.
pub fn exp_op(a: &Value) -> Result<Value, GradTapeError> {
    apply_unary_op(
        a,
        f64::exp,
        |output| ExpBackward {
            output: output.clone(),
        },
        "exp_op",
    )
}
