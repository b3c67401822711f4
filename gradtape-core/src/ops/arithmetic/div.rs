use crate::autograd::backward_op::BackwardOp;
use crate::autograd::node::Node;
use crate::error::GradTapeError;
use crate::ops::record;
use crate::value::{kernel, Value};

#[derive(Debug, Clone, Copy)]
enum DivOperand {
    Numerator,
    Denominator,
}

/// Backward operation for `a / b`:
/// dL/dA = dL/dOut / B, dL/dB = -dL/dOut * A / B^2.
#[derive(Debug)]
struct DivBackward {
    numerator: Value,
    denominator: Value,
    wrt: DivOperand,
}

impl BackwardOp for DivBackward {
    fn backward(&self, grad_output: &Node) -> Result<Node, GradTapeError> {
        let grad = grad_output.as_value()?;
        let (local, operand) = match self.wrt {
            DivOperand::Numerator => (kernel::div(grad, &self.denominator)?, &self.numerator),
            DivOperand::Denominator => {
                let b_sq = kernel::mul(&self.denominator, &self.denominator)?;
                let ratio = kernel::div(&self.numerator, &b_sq)?;
                (kernel::neg(&kernel::mul(grad, &ratio)?)?, &self.denominator)
            }
        };
        Ok(Node::Leaf(kernel::unbroadcast(&local, operand)?))
    }
}

/// Element-wise `a / b`. Division by zero follows IEEE semantics.
pub fn div_op(a: &Value, b: &Value) -> Result<Value, GradTapeError> {
    let output = kernel::div(a, b)?;
    let result = Node::from(&output);
    for (owner, wrt) in [(a, DivOperand::Numerator), (b, DivOperand::Denominator)] {
        record(Node::from(owner), result.clone(), || DivBackward {
            numerator: a.clone(),
            denominator: b.clone(),
            wrt,
        })?;
    }
    Ok(output)
}

#[cfg(test)]
#[path = "div_test.rs"]
mod tests;
