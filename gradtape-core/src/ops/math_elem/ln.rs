use crate::autograd::backward_op::BackwardOp;
use crate::autograd::node::Node;
use crate::error::GradTapeError;
use crate::ops::apply_unary_op;
use crate::value::{kernel, Value};

/// Backward pass structure for the natural logarithm: dL/dX = dL/dOut / X.
#[derive(Debug)]
struct LnBackward {
    input: Value,
}

impl BackwardOp for LnBackward {
    fn backward(&self, grad_output: &Node) -> Result<Node, GradTapeError> {
        Ok(Node::Leaf(kernel::div(grad_output.as_value()?, &self.input)?))
    }
}

/// Computes the element-wise natural logarithm.
///
/// # Domain Considerations
/// The natural logarithm is only defined for strictly positive numbers.
/// Non-positive inputs yield `NaN` (or `-inf` at zero), as does the gradient
/// \( 1/x \) at \( x=0 \).
pub fn ln_op(a: &Value) -> Result<Value, GradTapeError> {
    let input = a.clone();
    apply_unary_op(a, f64::ln, move |_| LnBackward { input }, "ln_op")
}

#[cfg(test)]
#[path = "ln_test.rs"]
mod tests;
