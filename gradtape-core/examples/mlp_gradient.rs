//! # Gradients of a two-layer MLP
//!
//! Records a forward pass `sum(relu(x @ w1) @ w2)` inside a session, seeds the
//! output and queries the gradient of each weight matrix from the tape.
//!
//! Run with `RUST_LOG=debug cargo run --example mlp_gradient` to see every
//! derivative function the tape calls.

use gradtape_core::ops::{matmul_op, relu_op, sum_op};
use gradtape_core::tensor::randn;
use gradtape_core::{with_session, GradTapeError, Node, Value};

fn main() -> Result<(), GradTapeError> {
    env_logger::init();

    let x = Value::array(randn(&[8, 4])?);
    let w1 = Value::array(randn(&[4, 16])?);
    let w2 = Value::array(randn(&[16, 1])?);

    let (loss, grad_w1, grad_w2) = with_session(|tape| {
        let hidden = relu_op(&matmul_op(&x, &w1)?)?;
        let loss = sum_op(&matmul_op(&hidden, &w2)?)?;
        tape.set_gradient_target(&Node::from(&loss))?;
        let grad_w2 = tape.get_gradient(&w2)?;
        let grad_w1 = tape.get_gradient(&w1)?;
        Ok((loss, grad_w1, grad_w2))
    })?;

    println!("loss = {:.6}", loss.scalar()?);
    println!("grad w1: shape {:?}", grad_w1.shape());
    println!("grad w2: shape {:?}, data {:?}", grad_w2.shape(), grad_w2.to_f64_vec()?);
    Ok(())
}
