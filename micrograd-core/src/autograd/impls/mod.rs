//! Concrete autograd node types.

pub mod scalar;
