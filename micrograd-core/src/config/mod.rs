//! Configuration for network shape, initialization and training.
//!
//! Load from environment via [`from_env`] and validate with [`Config::validate`].
//! Default values and env key names are centralized in the `constants` submodule.

mod builder;
mod constants;
mod error;

use constants::{
    DEFAULT_INIT_RANGE, DEFAULT_LAYER_SIZES, DEFAULT_LEARNING_RATE, DEFAULT_LOSS_LOG_EVERY,
    DEFAULT_NUM_STEPS, DEFAULT_SEED,
};

pub use builder::{env_key, env_list, env_parsed, env_string, from_env};
pub use error::ConfigError;

/// Central configuration for the demo and training loop.
///
/// Use [`from_env`] to build from environment variables and [`Config::validate`] before use.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Seed for the parameter-initialization RNG (reproducibility).
    pub seed: u64,
    /// Output width of each MLP layer; the last one must be 1.
    pub layer_sizes: Vec<usize>,
    /// Weights and biases are drawn from `U(-init_range, init_range)`.
    pub init_range: f64,

    /// SGD step size.
    pub learning_rate: f64,
    /// Number of training steps (full passes over the dataset).
    pub num_steps: usize,
    /// Log loss every this many steps (and at the first and last step).
    pub loss_log_every: usize,
}

impl Default for Config {
    /// Returns default configuration (suitable for tests and fallbacks).
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            layer_sizes: DEFAULT_LAYER_SIZES.to_vec(),
            init_range: DEFAULT_INIT_RANGE,
            learning_rate: DEFAULT_LEARNING_RATE,
            num_steps: DEFAULT_NUM_STEPS,
            loss_log_every: DEFAULT_LOSS_LOG_EVERY,
        }
    }
}

impl Config {
    /// Validates configuration. Returns `Ok(())` if valid, or a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layer_sizes.is_empty() {
            return Err(ConfigError::Validation(
                "layer_sizes must not be empty".to_string(),
            ));
        }
        if let Some(i) = self.layer_sizes.iter().position(|&n| n == 0) {
            return Err(ConfigError::Validation(format!(
                "layer_sizes[{i}] must be greater than 0"
            )));
        }
        if self.layer_sizes.last() != Some(&1) {
            return Err(ConfigError::Validation(format!(
                "last layer size must be 1, got {:?}",
                self.layer_sizes
            )));
        }
        if !self.init_range.is_finite() || self.init_range <= 0.0 {
            return Err(ConfigError::Validation(
                "init_range must be finite and greater than 0".to_string(),
            ));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ConfigError::Validation(
                "learning_rate must be finite and greater than 0".to_string(),
            ));
        }
        if self.loss_log_every == 0 {
            return Err(ConfigError::Validation(
                "loss_log_every must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
