//! Central place for all configuration constants.
//!
//! Default values and environment variable key names used by the config builder.

/// Environment variable prefix (e.g. `MICROGRAD_LEARNING_RATE`).
pub(crate) const ENV_PREFIX: &str = "MICROGRAD_";

// --- Env key suffixes (full key = ENV_PREFIX + suffix) ---

pub(crate) const ENV_SEED: &str = "SEED";
pub(crate) const ENV_LAYER_SIZES: &str = "LAYER_SIZES";
pub(crate) const ENV_INIT_RANGE: &str = "INIT_RANGE";
pub(crate) const ENV_LEARNING_RATE: &str = "LEARNING_RATE";
pub(crate) const ENV_NUM_STEPS: &str = "NUM_STEPS";
pub(crate) const ENV_LOSS_LOG_EVERY: &str = "LOSS_LOG_EVERY";

// --- Default values ---

pub(crate) const DEFAULT_SEED: u64 = 42;
pub(crate) const DEFAULT_LAYER_SIZES: [usize; 3] = [4, 4, 1];
pub(crate) const DEFAULT_INIT_RANGE: f64 = 1.0;
pub(crate) const DEFAULT_LEARNING_RATE: f64 = 0.1;
pub(crate) const DEFAULT_NUM_STEPS: usize = 100;
pub(crate) const DEFAULT_LOSS_LOG_EVERY: usize = 1;
