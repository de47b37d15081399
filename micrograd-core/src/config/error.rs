//! Configuration errors.
//!
//! All errors produced by the config module (validation and env loading) use [`ConfigError`].
//! Callers can match on variants to handle specific cases or use [`ConfigError::message`] for logging.

use thiserror::Error;

/// Errors produced when building or validating configuration.
///
/// # Variants
///
/// - **Validation**: Configuration values are inconsistent or out of range (e.g. an empty `layer_sizes`).
///   *When*: After building a `Config` and calling `validate()`.
///   *Recovery*: Fix the values (via env or code) so that `validate()` passes; see the error message for the rule that failed.
///
/// - **EnvVar**: An environment variable could not be read (e.g. invalid Unicode).
///   *When*: When using env helpers to read a key.
///   *Recovery*: Ensure the variable contains valid Unicode, or use a different key.
///
/// - **Parse**: An environment variable was set but could not be parsed into the expected type (e.g. `SEED=abc`).
///   *When*: When using `env_parsed` or `env_list` and the value is not valid for the target type.
///   *Recovery*: Set the env var to a valid value or unset it to use the default; the error message indicates the key and invalid value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Configuration validation failed (e.g. a zero layer size).
    #[error("config validation: {0}")]
    Validation(String),

    /// Failed to read an environment variable (e.g. invalid Unicode).
    #[error("env var {key}: {message}")]
    EnvVar {
        /// The full environment variable name that was read.
        key: String,
        /// Underlying cause (e.g. NotUnicode).
        message: String,
    },

    /// Environment variable was set but could not be parsed into the expected type.
    #[error("env var {key}={value:?}: {message}")]
    Parse {
        /// The full environment variable name.
        key: String,
        /// The raw value that failed to parse.
        value: String,
        /// Human-readable parse reason (e.g. "invalid digit found in string").
        message: String,
    },
}

impl ConfigError {
    /// Returns a short message suitable for logging or user display.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            ConfigError::Validation(m) => m,
            ConfigError::EnvVar { message, .. } => message,
            ConfigError::Parse { message, .. } => message,
        }
    }
}
