//! # Differentiable primitives (`ops`)
//!
//! Each primitive computes its forward result with the non-recording kernels
//! of [`crate::value::kernel`] and, when a recording session is active on the
//! current thread, registers one gradient record per input on the tape.
//!
//! ## Structure:
//!
//! - **`_op` functions:** the forward computation plus recording, e.g. `add_op`.
//! - **`Backward` structs:** implement [`BackwardOp`] and hold the forward
//!   context they need (operands, outputs). They only use kernels.
//!
//! ## Key Submodules:
//!
//! - [`arithmetic`]: element-wise add, sub, mul, div, neg.
//! - [`math_elem`]: element-wise exp, ln, tanh, sin.
//! - [`activation`]: relu.
//! - [`reduction`]: sum.
//! - [`linalg`]: matmul.
//! - [`stack`] / [`split`]: multi-input and multi-output primitives.

use crate::autograd::backward_op::BackwardOp;
use crate::autograd::node::Node;
use crate::autograd::session::active_tape;
use crate::error::GradTapeError;
use crate::value::{kernel, Value};

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod math_elem;
pub mod reduction;
pub mod split;
pub mod stack;

pub use activation::relu_op;
pub use arithmetic::{add_op, div_op, mul_op, neg_op, sub_op};
pub use linalg::matmul_op;
pub use math_elem::{exp_op, ln_op, sin_op, tanh_op};
pub use reduction::sum_op;
pub use split::split_op;
pub use stack::stack_op;

/// Registers a derivative on the active tape, if there is one.
///
/// `backward_builder` only runs while recording, so inference pays nothing
/// beyond the active-tape lookup.
pub(crate) fn record<B, F>(owner: Node, result: Node, backward_builder: F) -> Result<(), GradTapeError>
where
    B: BackwardOp + 'static,
    F: FnOnce() -> B,
{
    if let Some(tape) = active_tape() {
        tape.add_partial_derivative(backward_builder(), owner, result)?;
    }
    Ok(())
}

/// Applies a unary element-wise operation and records its backward op.
///
/// # Arguments
/// * `a`: the input value.
/// * `op`: the element function.
/// * `backward_builder`: builds the backward op from the forward output.
/// * `op_name`: name used in trace logs.
pub(crate) fn apply_unary_op<Op, B, F>(
    a: &Value,
    op: Op,
    backward_builder: F,
    op_name: &str,
) -> Result<Value, GradTapeError>
where
    Op: Fn(f64) -> f64,
    B: BackwardOp + 'static,
    F: FnOnce(&Value) -> B,
{
    log::trace!("{} on shape {:?}", op_name, a.shape());
    let output = kernel::unary_map(a, op)?;
    record(Node::from(a), Node::from(&output), || backward_builder(&output))?;
    Ok(output)
}
