// src/tensor/traits.rs

use crate::tensor::Tensor;
use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

impl Clone for Tensor {
    /// Shallow clone: the new handle shares data and identity with `self`.
    fn clone(&self) -> Self {
        Tensor {
            data: Arc::clone(&self.data),
        }
    }
}

impl Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let td = &self.data;
        write!(
            f,
            "Tensor(shape={:?}, dtype={:?}, device={:?}, ",
            td.shape, td.dtype, td.device
        )?;
        if td.numel() > 8 {
            return write!(f, "data=[... ~{} elements ...])", td.numel());
        }
        match td.buffer.to_f64_vec() {
            Ok(values) => write!(f, "data={:?})", values),
            Err(_) => write!(f, "data=<unreadable>)"),
        }
    }
}

/// Tensors compare by identity, not by contents.
impl PartialEq for Tensor {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl Eq for Tensor {}

impl Hash for Tensor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}
