use crate::autograd::node::Node;
use crate::error::GradTapeError;
use std::fmt::{self, Debug};

/// Defines the local derivative of one recorded operation with respect to
/// one of its owners.
///
/// An implementation is registered on the tape together with the operation's
/// `result` and the `owner` it differentiates. During traversal the tape
/// passes it the gradient of `result` (dL/dResult, a node congruent to the
/// result) and accumulates the returned node into the owner's gradient.
///
/// Implementations must be pure: they compute with the non-recording kernels
/// in [`crate::value::kernel`] and never call recording primitives.
pub trait BackwardOp: Debug {
    /// Computes the contribution to the owner's gradient.
    ///
    /// # Returns
    /// * `Ok(Node)`: a node congruent to the owner. Composite owners expect a
    ///    composite of the same length; `Skip` entries contribute nothing.
    /// * `Err(GradTapeError)`: if the derivative cannot be computed, which
    ///    aborts the whole traversal.
    fn backward(&self, grad_output: &Node) -> Result<Node, GradTapeError>;
}

/// Adapts a closure into a [`BackwardOp`], carrying a name for debugging.
pub struct FnBackward<F> {
    name: &'static str,
    func: F,
}

impl<F> Debug for FnBackward<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FnBackward({})", self.name)
    }
}

impl<F> BackwardOp for FnBackward<F>
where
    F: Fn(&Node) -> Result<Node, GradTapeError>,
{
    fn backward(&self, grad_output: &Node) -> Result<Node, GradTapeError> {
        (self.func)(grad_output)
    }
}

/// Builds a named derivative function from a closure.
pub fn backward_fn<F>(name: &'static str, func: F) -> FnBackward<F>
where
    F: Fn(&Node) -> Result<Node, GradTapeError>,
{
    FnBackward { name, func }
}
