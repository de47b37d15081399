//! Errors produced by the training loop.

use thiserror::Error;

use crate::config::ConfigError;
use crate::nn::NnError;

/// Errors produced by [`train`](super::train) and [`squared_error_loss`](super::squared_error_loss).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrainError {
    /// No samples to train on.
    #[error("training set is empty")]
    EmptyDataset,

    /// The network must produce exactly one output per sample.
    #[error("network must have exactly 1 output, got {got}")]
    OutputWidth {
        /// Output width of the network.
        got: usize,
    },

    /// Predictions and targets differ in length.
    #[error("{preds} predictions for {targets} targets")]
    LengthMismatch {
        /// Number of predictions.
        preds: usize,
        /// Number of targets.
        targets: usize,
    },

    /// The loss became NaN or infinite; parameters were left as of the previous step.
    #[error("loss is not finite at step {step}")]
    NonFiniteLoss {
        /// Zero-based step index.
        step: usize,
    },

    /// The training config failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A sample could not be fed through the network.
    #[error(transparent)]
    Nn(#[from] NnError),
}
