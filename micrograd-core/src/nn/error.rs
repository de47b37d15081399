//! Errors produced when feeding inputs through neurons, layers and networks.

use thiserror::Error;

/// Errors produced by the [`nn`](super) module.
///
/// # Variants
///
/// - **InputSize**: The input slice length does not match the number of weights.
///   *When*: Calling `forward` on a [`Neuron`](super::Neuron), [`Layer`](super::Layer)
///   or [`Mlp`](super::Mlp) with the wrong number of inputs.
///   *Recovery*: Pass exactly `nin` inputs; see [`Mlp::nin`](super::Mlp::nin).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NnError {
    /// Input slice has the wrong length for the receiving neuron.
    #[error("expected {expected} inputs, got {got}")]
    InputSize {
        /// Number of weights on the neuron.
        expected: usize,
        /// Length of the slice that was passed.
        got: usize,
    },
}
