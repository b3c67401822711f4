use crate::autograd::backward_op::BackwardOp;
use crate::autograd::node::Node;
use crate::error::GradTapeError;
use crate::ops::apply_unary_op;
use crate::value::{kernel, Value};

/// Backward for tanh: dL/dX = dL/dOut * (1 - tanh(X)^2).
#[derive(Debug)]
struct TanhBackward {
    output: Value,
}

impl BackwardOp for TanhBackward {
    fn backward(&self, grad_output: &Node) -> Result<Node, GradTapeError> {
        let local = kernel::unary_map(&self.output, |y| 1.0 - y * y)?;
        Ok(Node::Leaf(kernel::mul(grad_output.as_value()?, &local)?))
    }
}

/// Element-wise hyperbolic tangent.
pub fn tanh_op(a: &Value) -> Result<Value, GradTapeError> {
    apply_unary_op(
        a,
        f64::tanh,
        |output| TanhBackward {
            output: output.clone(),
        },
        "tanh_op",
    )
}
