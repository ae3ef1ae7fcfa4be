//! Error types for the Refracto core library
//!
//! The rendering core favors silent degradation over raising faults:
//! unresolved references and structural mismatches are skipped, never
//! propagated. The error type here covers the few conditions that are
//! allowed to terminate a render (the recursion-depth guard) and the
//! decode/serialization surfaces around the core walk.

use thiserror::Error;

/// Main error type for Refracto operations
#[derive(Error, Debug)]
pub enum Error {
    /// Recursion-depth guard tripped while resolving nested or cyclic
    /// named types
    #[error("maximum render depth of {limit} exceeded while rendering '{element}'")]
    DepthExceeded {
        limit: usize,
        element: String,
    },

    /// Structurally unusable refract input during decoding
    #[error("malformed refract element: {message}")]
    Refract {
        message: String,
    },

    /// JSON serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Generic internal error with context
    #[error("internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a refract decode error
    pub fn refract(message: impl Into<String>) -> Self {
        Error::Refract {
            message: message.into(),
        }
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}
