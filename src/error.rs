//! Error types for the quadtree spatial join

use thiserror::Error;

pub type Result<T> = std::result::Result<T, JoinError>;

#[derive(Error, Debug)]
pub enum JoinError {
    /// Malformed quadtree, candidate-pair or offset tables
    #[error("Structural error: {0}")]
    Structural(String),

    /// Input-contract violation (scale, max_depth, point counts, ring sizes, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Point and shape coordinates use different numeric types
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl JoinError {
    pub(crate) fn structural(msg: impl Into<String>) -> Self {
        JoinError::Structural(msg.into())
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        JoinError::InvalidArgument(msg.into())
    }

    /// Malformed index or offset tables
    pub fn is_structural(&self) -> bool {
        matches!(self, JoinError::Structural(_))
    }

    /// Caller-supplied parameters or columns violate the call contract
    pub fn is_input_contract(&self) -> bool {
        matches!(
            self,
            JoinError::InvalidArgument(_) | JoinError::TypeMismatch { .. }
        )
    }
}

impl From<serde_json::Error> for JoinError {
    fn from(err: serde_json::Error) -> Self {
        JoinError::Config(err.to_string())
    }
}
