//! Crate-level error wrapping every module's error type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::nn::NnError;
use crate::train::TrainError;

/// Any error this crate can produce.
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Nn(#[from] NnError),

    #[error(transparent)]
    Train(#[from] TrainError),
}

/// Shorthand for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
