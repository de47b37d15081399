//! Build [`Config`] from environment variables.
//!
//! Uses [`env_string`], [`env_parsed`] and [`env_list`] to read env vars with a single place
//! for key names (see the config `constants` submodule) and typed errors ([`ConfigError`]).

use super::constants::{
    ENV_INIT_RANGE, ENV_LAYER_SIZES, ENV_LEARNING_RATE, ENV_LOSS_LOG_EVERY, ENV_NUM_STEPS,
    ENV_PREFIX, ENV_SEED,
};
use super::Config;
use super::ConfigError;

/// Returns the full environment variable key for a given suffix (e.g. `SEED` → `MICROGRAD_SEED`).
#[must_use]
pub fn env_key(suffix: &str) -> String {
    format!("{ENV_PREFIX}{suffix}")
}

/// Reads an environment variable as a string.
///
/// Returns `Some(value)` if the variable is set and valid UTF-8, `None` if unset.
/// Returns `Err(ConfigError::EnvVar)` if the variable is set but invalid (e.g. not Unicode).
pub fn env_string(key: &str) -> Result<Option<String>, ConfigError> {
    match std::env::var(key) {
        Ok(s) => Ok(Some(s)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ConfigError::EnvVar {
            key: key.to_string(),
            message: e.to_string(),
        }),
    }
}

/// Reads an environment variable and parses it into type `T`.
///
/// Returns `Ok(Some(value))` if set and parse succeeds, `Ok(None)` if unset, and
/// `Err(ConfigError::Parse)` if set but parsing fails (e.g. `SEED=abc` for `u64`).
pub fn env_parsed<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(s) = env_string(key)? else {
        return Ok(None);
    };
    match s.trim().parse() {
        Ok(t) => Ok(Some(t)),
        Err(e) => Err(ConfigError::Parse {
            key: key.to_string(),
            value: s,
            message: e.to_string(),
        }),
    }
}

/// Reads a comma-separated environment variable (e.g. `4,4,1`) into a `Vec<T>`.
///
/// Whitespace around items is ignored and empty items are skipped, so `""` yields an
/// empty list. Any item that fails to parse yields `Err(ConfigError::Parse)` for the whole value.
pub fn env_list<T>(key: &str) -> Result<Option<Vec<T>>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(s) = env_string(key)? else {
        return Ok(None);
    };
    let parsed: Result<Vec<T>, _> = s
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::parse)
        .collect();
    match parsed {
        Ok(items) => Ok(Some(items)),
        Err(e) => Err(ConfigError::Parse {
            key: key.to_string(),
            value: s,
            message: e.to_string(),
        }),
    }
}

/// Builds [`Config`] from environment variables, falling back to [`Config::default`] for unset values.
///
/// Returns [`ConfigError`] if any *set* variable fails to parse (e.g. `MICROGRAD_SEED=abc`).
/// Does not validate; call [`Config::validate`] on the result.
pub fn from_env() -> Result<Config, ConfigError> {
    let default = Config::default();

    let seed = env_parsed::<u64>(&env_key(ENV_SEED))?.unwrap_or(default.seed);
    let layer_sizes =
        env_list::<usize>(&env_key(ENV_LAYER_SIZES))?.unwrap_or_else(|| default.layer_sizes.clone());
    let init_range = env_parsed::<f64>(&env_key(ENV_INIT_RANGE))?.unwrap_or(default.init_range);
    let learning_rate =
        env_parsed::<f64>(&env_key(ENV_LEARNING_RATE))?.unwrap_or(default.learning_rate);
    let num_steps = env_parsed::<usize>(&env_key(ENV_NUM_STEPS))?.unwrap_or(default.num_steps);
    let loss_log_every =
        env_parsed::<usize>(&env_key(ENV_LOSS_LOG_EVERY))?.unwrap_or(default.loss_log_every);

    Ok(Config {
        seed,
        layer_sizes,
        init_range,
        learning_rate,
        num_steps,
        loss_log_every,
    })
}
