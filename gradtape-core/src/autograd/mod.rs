//! Reverse-mode gradient recording.
//!
//! - [`tape`]: the per-session store of gradient records and cached gradients.
//! - [`session`]: the thread-local active tape and its RAII guard.
//! - [`node`]: nested owner/result/gradient structures.
//! - [`backward_op`]: the derivative-function trait.
//! - [`grad_check`]: finite-difference verification of recorded gradients.

pub mod backward_op;
pub mod grad_check;
pub mod node;
pub mod session;
pub mod tape;

pub use backward_op::{backward_fn, BackwardOp, FnBackward};
pub use grad_check::{check_grad, GradCheckError};
pub use node::Node;
pub use session::{active_tape, is_recording, session, with_session, TapeHandle, TapeSession};
pub use tape::{GradRecord, Tape};
