//! Gradient tape for reverse-mode automatic differentiation.
//!
//! Primitives in [`ops`] record partial-derivative functions on the tape of
//! the current thread's session; [`autograd::Tape::get_gradient`] then walks
//! those records backwards on demand.

pub mod autograd;
pub mod buffer;
pub mod device;
pub mod error;
pub mod ops;
pub mod tensor;
pub mod tensor_data;
pub mod types;
pub mod utils;
pub mod value;

pub use autograd::{session, with_session, Node, Tape};
pub use device::StorageDevice;
pub use error::GradTapeError;
pub use tensor::Tensor;
pub use types::DType;
pub use value::Value;

