use std::path::PathBuf;

use thiserror::Error;

/// A form value the host refuses to pass to the tuning functions.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("{parameter} must be non-negative, got {value}")]
    Negative { parameter: &'static str, value: f64 },

    #[error("{parameter} must be a finite number, got {value}")]
    NotFinite { parameter: &'static str, value: f64 },

    #[error("{parameter}: '{input}' is not a number")]
    InvalidNumber { parameter: &'static str, input: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown controller type '{0}' (expected PI or PID)")]
pub struct ParseControllerTypeError(pub String);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid default in config: {0}")]
    Invalid(#[from] InputError),
}

pub(crate) fn check_non_negative(parameter: &'static str, value: f64) -> Result<f64, InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite { parameter, value });
    }
    if value < 0.0 {
        return Err(InputError::Negative { parameter, value });
    }
    Ok(value)
}

/// Parses one numeric form entry and applies the non-negativity rule.
pub fn parse_non_negative(parameter: &'static str, input: &str) -> Result<f64, InputError> {
    let value = input
        .trim()
        .parse::<f64>()
        .map_err(|_| InputError::InvalidNumber {
            parameter,
            input: input.trim().to_string(),
        })?;
    check_non_negative(parameter, value)
}
