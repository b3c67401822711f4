//! # Values
//!
//! [`Value`] is the handle the gradient tape tracks. It is either a pure
//! scalar ([`Number`]) or an array ([`Tensor`]). Values are immutable and
//! compare/hash by identity: two values holding equal numbers are still
//! different nodes of a computation.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::device::StorageDevice;
use crate::error::GradTapeError;
use crate::tensor::{self, Tensor};
use crate::types::DType;

pub mod kernel;

/// A pure scalar value with its own identity.
#[derive(Clone)]
pub struct Number {
    value: Arc<f64>,
}

impl Number {
    pub fn new(value: f64) -> Self {
        Number {
            value: Arc::new(value),
        }
    }

    pub fn get(&self) -> f64 {
        *self.value
    }

    fn id(&self) -> usize {
        Arc::as_ptr(&self.value) as usize
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Number({})", self.get())
    }
}

/// A scalar or array flowing through a computation.
#[derive(Clone)]
pub enum Value {
    Number(Number),
    Array(Tensor),
}

impl Value {
    /// Wraps a fresh scalar.
    pub fn number(value: f64) -> Self {
        Value::Number(Number::new(value))
    }

    /// Wraps an array.
    pub fn array(tensor: Tensor) -> Self {
        Value::Array(tensor)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Shape of the value; pure scalars have an empty shape.
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Value::Number(_) => Vec::new(),
            Value::Array(t) => t.shape(),
        }
    }

    /// Backend tag of an array value. Pure scalars live on no device.
    pub fn device(&self) -> Option<StorageDevice> {
        match self {
            Value::Number(_) => None,
            Value::Array(t) => Some(t.device()),
        }
    }

    /// Element type of an array value. Pure scalars are always f64.
    pub fn dtype(&self) -> DType {
        match self {
            Value::Number(_) => DType::F64,
            Value::Array(t) => t.dtype(),
        }
    }

    pub fn numel(&self) -> usize {
        match self {
            Value::Number(_) => 1,
            Value::Array(t) => t.numel(),
        }
    }

    pub fn as_tensor(&self) -> Option<&Tensor> {
        match self {
            Value::Number(_) => None,
            Value::Array(t) => Some(t),
        }
    }

    /// Returns the single element held by a scalar or a one-element array.
    pub fn scalar(&self) -> Result<f64, GradTapeError> {
        match self {
            Value::Number(n) => Ok(n.get()),
            Value::Array(t) => {
                if t.numel() != 1 {
                    return Err(GradTapeError::ShapeMismatch {
                        expected: vec![1],
                        actual: t.shape(),
                        operation: "scalar".to_string(),
                    });
                }
                Ok(t.to_f64_vec()?[0])
            }
        }
    }

    /// Copies the elements out as f64 in row-major order.
    pub fn to_f64_vec(&self) -> Result<Vec<f64>, GradTapeError> {
        match self {
            Value::Number(n) => Ok(vec![n.get()]),
            Value::Array(t) => t.to_f64_vec(),
        }
    }

    /// A zero of the same kind: scalar zero, or a zero array with the same
    /// shape, dtype and device.
    pub fn zeros_like(&self) -> Result<Value, GradTapeError> {
        self.full_like(0.0)
    }

    /// A one of the same kind, see [`Value::zeros_like`].
    pub fn ones_like(&self) -> Result<Value, GradTapeError> {
        self.full_like(1.0)
    }

    /// A value of the same kind filled with `fill`.
    pub fn full_like(&self, fill: f64) -> Result<Value, GradTapeError> {
        match self {
            Value::Number(_) => Ok(Value::number(fill)),
            Value::Array(t) => Ok(Value::Array(tensor::create::full_on(
                &t.shape(),
                fill,
                t.dtype(),
                t.device(),
            )?)),
        }
    }

    /// Element-wise sum, returning a new value.
    pub fn add(&self, other: &Value) -> Result<Value, GradTapeError> {
        kernel::add(self, other)
    }

    /// Identity key.
    pub fn id(&self) -> usize {
        match self {
            Value::Number(n) => n.id(),
            Value::Array(t) => t.id(),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => n.fmt(f),
            Value::Array(t) => t.fmt(f),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::number(value)
    }
}

impl From<Tensor> for Value {
    fn from(tensor: Tensor) -> Self {
        Value::Array(tensor)
    }
}

#[cfg(test)]
#[path = "value_test.rs"]
mod tests;
