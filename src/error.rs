//! Error types for tokenizing, measuring and styling

use std::io;
use thiserror::Error;

/// Termtext error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error from a stream source or output sink
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A setting outside its valid range (e.g. a zero tab size)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Colour value that is neither a known name nor a hex code
    #[error("Unrecognised color {0:?}")]
    InvalidColor(String),

    /// Style keyword that is not understood
    #[error("Unrecognised {property} value {value:?}")]
    InvalidStyle {
        property: &'static str,
        value: String,
    },
}

/// Result type for termtext operations
pub type Result<T> = std::result::Result<T, Error>;
