pub mod matmul;

pub use matmul::matmul_op;
