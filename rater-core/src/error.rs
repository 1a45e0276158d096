//! Error taxonomy for construction and value validation.
use thiserror::Error;

/// Raised while binding a widget. A failed construction leaves nothing attached.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid selector or element: {reason}")]
    InvalidTarget { reason: String },
    #[error("step must be a number between 0 and 1 (got {step})")]
    InvalidStep { step: f64 },
    #[error("initial rating rejected: {0}")]
    InitialRating(#[from] RatingError),
    #[error("options could not be read: {0}")]
    Options(String),
}

impl ConfigError {
    pub(crate) fn invalid_target(reason: impl Into<String>) -> Self {
        Self::InvalidTarget {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Options(err.to_string())
    }
}

/// Raised by `set_rating`. A rejected value leaves the widget untouched.
#[derive(Debug, Error, PartialEq)]
pub enum RatingError {
    #[error("value not set")]
    MissingValue,
    #[error("value cannot be null")]
    NullValue,
    #[error("value must be a number")]
    NotANumber,
    #[error("value {value} out of range, please set a rating between 0 and {max}")]
    OutOfRange { value: f64, max: u32 },
}
