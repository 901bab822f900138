//! Core error type.
//!
//! Missing optional measurements (accuracy, bearing, speed) are never errors;
//! they travel as `None` and the accuracy policy resolves them to
//! "inaccurate".  The variants below cover the few inputs that are genuinely
//! invalid.

use thiserror::Error;

/// The error type shared by the `nav-*` crates.
#[derive(Debug, Error, PartialEq)]
pub enum NavError {
    #[error("invalid coordinate value {0}: must be finite")]
    InvalidValue(f64),

    #[error("invalid location snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("no current location is known")]
    NoLocation,
}

/// Shorthand result type for the `nav-*` crates.
pub type NavResult<T> = Result<T, NavError>;
