use crate::value::Value;

/// Checks if a value is approximately equal to the expected shape and data.
/// Works for both scalars (empty shape) and arrays of any dtype.
/// Panics if shapes differ or data differs significantly.
pub fn check_value_near(
    actual: &Value,
    expected_shape: &[usize],
    expected_data: &[f64],
    tolerance: f64,
) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");

    let actual_data_vec = actual
        .to_f64_vec()
        .expect("Failed to read data in check_value_near");

    assert_eq!(
        actual_data_vec.len(),
        expected_data.len(),
        "Data length mismatch"
    );

    for (i, (a, e)) in actual_data_vec.iter().zip(expected_data.iter()).enumerate() {
        let diff = (*a - *e).abs();
        if diff > tolerance {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}
