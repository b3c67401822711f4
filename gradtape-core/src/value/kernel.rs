//! Non-recording numeric kernels over [`Value`]s.
//!
//! Kernels compute on host copies of the data and tag their results with the
//! dtype and device of the array operand. They never touch the gradient tape,
//! so derivative functions are built from them.

use crate::error::GradTapeError;
use crate::tensor::Tensor;
use crate::value::Value;

fn array_like(template: &Tensor, data: Vec<f64>, shape: Vec<usize>) -> Result<Value, GradTapeError> {
    Ok(Value::Array(Tensor::from_f64_data(
        data,
        shape,
        template.dtype(),
        template.device(),
    )?))
}

fn check_compatible(a: &Tensor, b: &Tensor, operation: &str) -> Result<(), GradTapeError> {
    if a.device() != b.device() {
        return Err(GradTapeError::DeviceMismatch {
            expected: a.device(),
            actual: b.device(),
            operation: operation.to_string(),
        });
    }
    if a.dtype() != b.dtype() {
        return Err(GradTapeError::DataTypeMismatch {
            expected: a.dtype(),
            actual: b.dtype(),
            operation: operation.to_string(),
        });
    }
    Ok(())
}

/// Applies `f` element-wise over two values.
///
/// Two arrays must agree in shape, device and dtype. A pure scalar combined
/// with an array is broadcast over every element.
pub fn binary_map<F>(a: &Value, b: &Value, operation: &str, f: F) -> Result<Value, GradTapeError>
where
    F: Fn(f64, f64) -> f64,
{
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => Ok(Value::number(f(x.get(), y.get()))),
        (Value::Number(x), Value::Array(t)) => {
            let x = x.get();
            let data = t.to_f64_vec()?.into_iter().map(|y| f(x, y)).collect();
            array_like(t, data, t.shape())
        }
        (Value::Array(t), Value::Number(y)) => {
            let y = y.get();
            let data = t.to_f64_vec()?.into_iter().map(|x| f(x, y)).collect();
            array_like(t, data, t.shape())
        }
        (Value::Array(ta), Value::Array(tb)) => {
            if ta.shape() != tb.shape() {
                return Err(GradTapeError::ShapeMismatch {
                    expected: ta.shape(),
                    actual: tb.shape(),
                    operation: operation.to_string(),
                });
            }
            check_compatible(ta, tb, operation)?;
            let data = ta
                .to_f64_vec()?
                .into_iter()
                .zip(tb.to_f64_vec()?)
                .map(|(x, y)| f(x, y))
                .collect();
            array_like(ta, data, ta.shape())
        }
    }
}

/// Applies `f` to every element of `a`.
pub fn unary_map<F>(a: &Value, f: F) -> Result<Value, GradTapeError>
where
    F: Fn(f64) -> f64,
{
    match a {
        Value::Number(x) => Ok(Value::number(f(x.get()))),
        Value::Array(t) => {
            let data = t.to_f64_vec()?.into_iter().map(f).collect();
            array_like(t, data, t.shape())
        }
    }
}

pub fn add(a: &Value, b: &Value) -> Result<Value, GradTapeError> {
    binary_map(a, b, "add", |x, y| x + y)
}

pub fn sub(a: &Value, b: &Value) -> Result<Value, GradTapeError> {
    binary_map(a, b, "sub", |x, y| x - y)
}

pub fn mul(a: &Value, b: &Value) -> Result<Value, GradTapeError> {
    binary_map(a, b, "mul", |x, y| x * y)
}

pub fn div(a: &Value, b: &Value) -> Result<Value, GradTapeError> {
    binary_map(a, b, "div", |x, y| x / y)
}

pub fn neg(a: &Value) -> Result<Value, GradTapeError> {
    unary_map(a, |x| -x)
}

/// Sums every element into a pure scalar.
pub fn sum_all(a: &Value) -> Result<Value, GradTapeError> {
    Ok(Value::number(a.to_f64_vec()?.iter().sum()))
}

/// Reduces a gradient to the kind of `like`: an array gradient flowing to a
/// pure scalar operand is summed, everything else passes through.
pub fn unbroadcast(grad: &Value, like: &Value) -> Result<Value, GradTapeError> {
    match (grad, like) {
        (Value::Array(_), Value::Number(_)) => sum_all(grad),
        _ => Ok(grad.clone()),
    }
}

fn expect_matrix(value: &Value, operation: &str) -> Result<Tensor, GradTapeError> {
    match value {
        Value::Array(t) if t.rank() == 2 => Ok(t.clone()),
        Value::Array(t) => Err(GradTapeError::UnsupportedOperation(format!(
            "{} expects a 2-D array, got shape {:?}",
            operation,
            t.shape()
        ))),
        Value::Number(_) => Err(GradTapeError::UnsupportedOperation(format!(
            "{} expects a 2-D array, got a scalar",
            operation
        ))),
    }
}

/// Matrix product of two 2-D arrays.
pub fn matmul(a: &Value, b: &Value) -> Result<Value, GradTapeError> {
    let ta = expect_matrix(a, "matmul")?;
    let tb = expect_matrix(b, "matmul")?;
    check_compatible(&ta, &tb, "matmul")?;
    let (a_shape, b_shape) = (ta.shape(), tb.shape());
    let (m, k, n) = (a_shape[0], a_shape[1], b_shape[1]);
    if b_shape[0] != k {
        return Err(GradTapeError::ShapeMismatch {
            expected: vec![k, n],
            actual: b_shape,
            operation: "matmul".to_string(),
        });
    }
    let lhs = ta.to_f64_vec()?;
    let rhs = tb.to_f64_vec()?;
    let mut out = vec![0.0; m * n];
    for i in 0..m {
        for p in 0..k {
            let a_ip = lhs[i * k + p];
            for j in 0..n {
                out[i * n + j] += a_ip * rhs[p * n + j];
            }
        }
    }
    array_like(&ta, out, vec![m, n])
}

/// Transpose of a 2-D array.
pub fn transpose(a: &Value) -> Result<Value, GradTapeError> {
    let t = expect_matrix(a, "transpose")?;
    let shape = t.shape();
    let (rows, cols) = (shape[0], shape[1]);
    let data = t.to_f64_vec()?;
    let mut out = vec![0.0; rows * cols];
    for i in 0..rows {
        for j in 0..cols {
            out[j * rows + i] = data[i * cols + j];
        }
    }
    array_like(&t, out, vec![cols, rows])
}

/// Stacks values along a new leading axis.
///
/// Pure scalars stack into a 1-D f64 CPU array; arrays must share shape,
/// device and dtype. Mixing the two is rejected.
pub fn stack(values: &[Value]) -> Result<Value, GradTapeError> {
    let first = values.first().ok_or_else(|| {
        GradTapeError::UnsupportedOperation("cannot stack an empty list of values".to_string())
    })?;
    match first {
        Value::Number(_) => {
            let data = values
                .iter()
                .map(|v| match v {
                    Value::Number(n) => Ok(n.get()),
                    Value::Array(_) => Err(GradTapeError::UnsupportedOperation(
                        "cannot stack scalars with arrays".to_string(),
                    )),
                })
                .collect::<Result<Vec<f64>, _>>()?;
            let len = data.len();
            Ok(Value::Array(Tensor::new_f64(data, vec![len])?))
        }
        Value::Array(template) => {
            let inner_shape = template.shape();
            let mut data = Vec::with_capacity(template.numel() * values.len());
            for v in values {
                let t = v.as_tensor().ok_or_else(|| {
                    GradTapeError::UnsupportedOperation(
                        "cannot stack scalars with arrays".to_string(),
                    )
                })?;
                if t.shape() != inner_shape {
                    return Err(GradTapeError::ShapeMismatch {
                        expected: inner_shape.clone(),
                        actual: t.shape(),
                        operation: "stack".to_string(),
                    });
                }
                check_compatible(template, t, "stack")?;
                data.extend(t.to_f64_vec()?);
            }
            let mut shape = Vec::with_capacity(inner_shape.len() + 1);
            shape.push(values.len());
            shape.extend(inner_shape);
            array_like(template, data, shape)
        }
    }
}

/// Splits an array along its leading axis into `shape[0]` arrays.
pub fn split(a: &Value) -> Result<Vec<Value>, GradTapeError> {
    let t = match a {
        Value::Array(t) if t.rank() >= 1 => t,
        _ => {
            return Err(GradTapeError::UnsupportedOperation(
                "split expects an array with at least one dimension".to_string(),
            ))
        }
    };
    let shape = t.shape();
    let inner_shape = shape[1..].to_vec();
    let chunk: usize = inner_shape.iter().product();
    let data = t.to_f64_vec()?;
    if chunk == 0 {
        return (0..shape[0])
            .map(|_| array_like(t, Vec::new(), inner_shape.clone()))
            .collect();
    }
    data.chunks(chunk)
        .map(|piece| array_like(t, piece.to_vec(), inner_shape.clone()))
        .collect()
}
