//! Errors raised while building generators and combinators from numeric configuration.
//!
//! Only construction can fail. Once a value is built, evaluating it never returns an error.
use thiserror::Error;

/// A numeric configuration value that can not produce a well-defined field.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("lacunarity must be positive, got {0}")]
    NonPositiveLacunarity(f64),

    #[error("octave count must not be negative, got {0}")]
    NegativeOctaves(f64),

    #[error("minkowski exponent must be positive, got {0}")]
    NonPositiveMinkowskiExponent(f64),

    #[error("turbulence size must be positive, got {0}")]
    NonPositiveSize(f64),

    #[error("parameter `{name}` must be finite, got {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },
}

/// Rejects NaN and infinities for a named parameter.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        log::warn!("rejecting non-finite `{name}`: {value}");
        Err(ConfigError::NonFiniteParameter { name, value })
    }
}

/// Logs a rejected configuration and hands the error back, for use in `Err(..)` position.
pub(crate) fn rejected(error: ConfigError) -> ConfigError {
    log::warn!("rejecting configuration: {error}");
    error
}
