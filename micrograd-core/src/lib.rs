//! # micrograd-core
//!
//! Scalar reverse-mode autodiff with a small multi-layer perceptron on top:
//! an autograd engine over `f64` nodes, neuron/layer/MLP composition, SGD training,
//! env-driven configuration and an end-to-end demo.

pub mod autograd;
pub mod config;
pub mod demo;
mod error;
pub mod nn;
pub mod train;

pub use error::{Error, Result};
