use gradtape_core::tensor::Tensor;
use gradtape_core::Value;

// Helpers shared by the integration test crates.
// allow(dead_code) because each test crate only uses part of this module.
#[allow(dead_code)]
pub(crate) fn array_f64(data: Vec<f64>, shape: Vec<usize>) -> Value {
    Value::array(Tensor::new_f64(data, shape).expect("Test array creation failed"))
}

#[allow(dead_code)]
pub(crate) fn assert_data_near(actual: &Value, expected: &[f64], tolerance: f64) {
    let data = actual.to_f64_vec().expect("Failed to read value data");
    assert_eq!(data.len(), expected.len(), "Data length mismatch");
    for (i, (a, e)) in data.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() <= tolerance,
            "Data mismatch at index {}: actual={}, expected={}",
            i,
            a,
            e
        );
    }
}

#[allow(dead_code)]
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
