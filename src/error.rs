//! Error types for cost and impact estimation.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FootprintError {
    #[error("Missing configuration field: {0}")]
    MissingConfiguration(&'static str),

    #[error("Unsupported parameter: {name}={value} ({reason})")]
    UnsupportedParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, FootprintError>;
