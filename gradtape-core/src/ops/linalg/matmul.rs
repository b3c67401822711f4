use crate::autograd::backward_op::BackwardOp;
use crate::autograd::node::Node;
use crate::error::GradTapeError;
use crate::ops::record;
use crate::value::{kernel, Value};

#[derive(Debug, Clone, Copy)]
enum MatmulSide {
    Lhs,
    Rhs,
}

/// Backward for `C = A @ B`:
/// dL/dA = dL/dC @ B^T, dL/dB = A^T @ dL/dC.
#[derive(Debug)]
struct MatmulBackward {
    lhs: Value,
    rhs: Value,
    side: MatmulSide,
}

impl BackwardOp for MatmulBackward {
    fn backward(&self, grad_output: &Node) -> Result<Node, GradTapeError> {
        let grad = grad_output.as_value()?;
        let local = match self.side {
            MatmulSide::Lhs => kernel::matmul(grad, &kernel::transpose(&self.rhs)?)?,
            MatmulSide::Rhs => kernel::matmul(&kernel::transpose(&self.lhs)?, grad)?,
        };
        Ok(Node::Leaf(local))
    }
}

/// Matrix product of two 2-D arrays on the same device and dtype.
pub fn matmul_op(a: &Value, b: &Value) -> Result<Value, GradTapeError> {
    let output = kernel::matmul(a, b)?;
    let result = Node::from(&output);
    for (owner, side) in [(a, MatmulSide::Lhs), (b, MatmulSide::Rhs)] {
        record(Node::from(owner), result.clone(), || MatmulBackward {
            lhs: a.clone(),
            rhs: b.clone(),
            side,
        })?;
    }
    Ok(output)
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
