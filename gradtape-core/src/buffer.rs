use std::sync::Arc;

use num_traits::{Float, NumCast};

use crate::error::GradTapeError;
use crate::types::DType;

/// Typed element storage shared between arrays.
///
/// The buffer itself does not know where it lives; the owning `TensorData`
/// carries the device tag.
#[derive(Debug, Clone)]
pub enum Buffer {
    /// Buffer holding f32 data.
    F32(Arc<Vec<f32>>),
    /// Buffer holding f64 data.
    F64(Arc<Vec<f64>>),
}

impl Buffer {
    /// Returns the number of elements in the buffer.
    pub fn len(&self) -> usize {
        match self {
            Buffer::F32(data) => data.len(),
            Buffer::F64(data) => data.len(),
        }
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> DType {
        match self {
            Buffer::F32(_) => DType::F32,
            Buffer::F64(_) => DType::F64,
        }
    }

    /// Builds a buffer of the requested dtype from f64 values.
    pub fn from_f64(dtype: DType, data: Vec<f64>) -> Result<Self, GradTapeError> {
        Ok(match dtype {
            DType::F32 => Buffer::F32(Arc::new(cast_vec::<f64, f32>(&data)?)),
            DType::F64 => Buffer::F64(Arc::new(data)),
        })
    }

    /// Copies the elements out as f64, whatever the stored dtype.
    pub fn to_f64_vec(&self) -> Result<Vec<f64>, GradTapeError> {
        match self {
            Buffer::F32(data) => cast_vec::<f32, f64>(data),
            Buffer::F64(data) => Ok(data.as_ref().clone()),
        }
    }

    /// Attempts to get a reference to the underlying `Arc<Vec<f32>>`.
    pub fn try_get_f32(&self) -> Result<&Arc<Vec<f32>>, GradTapeError> {
        match self {
            Buffer::F32(data_arc) => Ok(data_arc),
            Buffer::F64(_) => Err(GradTapeError::DataTypeMismatch {
                expected: DType::F32,
                actual: DType::F64,
                operation: "try_get_f32".to_string(),
            }),
        }
    }

    /// Attempts to get a reference to the underlying `Arc<Vec<f64>>`.
    pub fn try_get_f64(&self) -> Result<&Arc<Vec<f64>>, GradTapeError> {
        match self {
            Buffer::F64(data_arc) => Ok(data_arc),
            Buffer::F32(_) => Err(GradTapeError::DataTypeMismatch {
                expected: DType::F64,
                actual: DType::F32,
                operation: "try_get_f64".to_string(),
            }),
        }
    }
}

fn cast_vec<S: Float, D: Float>(data: &[S]) -> Result<Vec<D>, GradTapeError> {
    data.iter()
        .map(|&x| {
            <D as NumCast>::from(x).ok_or_else(|| {
                GradTapeError::InternalError("element cast between float types failed".to_string())
            })
        })
        .collect()
}
