use crate::autograd::node::Node;
use crate::autograd::session::session;
use crate::error::GradTapeError;
use crate::tensor::Tensor;
use crate::value::{kernel, Value};
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: Analytical grad {analytical_grad:?} != Numerical grad {numerical_grad:?}. Difference: {difference:?}")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(GradTapeError),
    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(GradTapeError),
    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index}. Details: Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Analytical gradient is NaN or infinite for input {input_index}, element {element_index}. Value: {value:?}")]
    AnalyticalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        value: f64,
    },
    #[error("Analytical gradient for input {input_index} has {actual} elements, expected {expected}")]
    GradientSizeMismatch {
        input_index: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Could not open a recording session for the gradient check: {0}")]
    SessionUnavailable(GradTapeError),
    #[error("Tensor error during intermediate calculation: {0}")]
    TensorError(GradTapeError),
}

impl From<GradTapeError> for GradCheckError {
    fn from(err: GradTapeError) -> Self {
        GradCheckError::TensorError(err)
    }
}

/// Checks tape gradients against central finite differences.
///
/// `func` is run once inside a recording session; its output is seeded with
/// ones, so the analytic gradients are those of `sum(func(inputs))`. Each
/// input element is then perturbed by `±epsilon` and `sum(func(..))` is
/// re-evaluated without recording.
///
/// Opens its own session, so it must be called while no session is active
/// on this thread (`SessionUnavailable` otherwise).
pub fn check_grad<F>(
    func: F,
    inputs: &[Value],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Value]) -> Result<Value, GradTapeError>,
{
    let two = 2.0f64;

    // --- 1. Analytic gradients through the tape ---
    let analytical = {
        let session = session().map_err(GradCheckError::SessionUnavailable)?;
        let tape = session.tape();
        let output = func(inputs).map_err(GradCheckError::ForwardPassError)?;
        tape.set_gradient_target(&Node::from(&output))
            .map_err(GradCheckError::BackwardPassError)?;
        inputs
            .iter()
            .map(|input| tape.get_gradient(input))
            .collect::<Result<Vec<_>, _>>()
            .map_err(GradCheckError::BackwardPassError)?
    };

    // --- 2. Element-wise central differences ---
    for (i, (input, grad)) in inputs.iter().zip(&analytical).enumerate() {
        let analytical_data = grad.to_f64_vec()?;
        let original_data = input.to_f64_vec()?;
        if analytical_data.len() != original_data.len() {
            return Err(GradCheckError::GradientSizeMismatch {
                input_index: i,
                expected: original_data.len(),
                actual: analytical_data.len(),
            });
        }

        for elem_idx in 0..original_data.len() {
            let loss_plus = perturbed_loss(&func, inputs, i, &original_data, elem_idx, epsilon)?;
            let loss_minus = perturbed_loss(&func, inputs, i, &original_data, elem_idx, -epsilon)?;
            let numerical_grad = (loss_plus - loss_minus) / (two * epsilon);
            let analytical_grad = analytical_data[elem_idx];

            if !numerical_grad.is_finite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    input_index: i,
                    element_index: elem_idx,
                    loss_plus,
                    loss_minus,
                });
            }
            if !analytical_grad.is_finite() {
                return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                    input_index: i,
                    element_index: elem_idx,
                    value: analytical_grad,
                });
            }

            let difference = (analytical_grad - numerical_grad).abs();
            if difference > tolerance && (difference / (analytical_grad.abs() + epsilon)) > tolerance {
                return Err(GradCheckError::GradientMismatch {
                    input_index: i,
                    element_index: elem_idx,
                    analytical_grad,
                    numerical_grad,
                    difference,
                });
            }
        }
    }

    Ok(())
}

/// Evaluates `sum(func(inputs'))` where `inputs'` has one element of input
/// `input_index` shifted by `delta`.
fn perturbed_loss<F>(
    func: &F,
    inputs: &[Value],
    input_index: usize,
    original_data: &[f64],
    elem_idx: usize,
    delta: f64,
) -> Result<f64, GradCheckError>
where
    F: Fn(&[Value]) -> Result<Value, GradTapeError>,
{
    let mut data = original_data.to_vec();
    data[elem_idx] += delta;
    let perturbed = match &inputs[input_index] {
        Value::Number(_) => Value::number(data[0]),
        Value::Array(t) => Value::Array(Tensor::from_f64_data(
            data,
            t.shape(),
            t.dtype(),
            t.device(),
        )?),
    };
    let mut perturbed_inputs = inputs.to_vec();
    perturbed_inputs[input_index] = perturbed;

    let output = func(&perturbed_inputs).map_err(GradCheckError::ForwardPassError)?;
    Ok(kernel::sum_all(&output)?.scalar()?)
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
