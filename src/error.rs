//! Error handling for rfield
//!
//! The arithmetic itself never fails. Errors only arise when a topology is
//! built from untrusted input (hand-written kernels, topology files).

use thiserror::Error;

/// Result type alias for rfield operations
pub type Result<T> = std::result::Result<T, RfError>;

/// Main error type for rfield operations
#[derive(Error, Debug)]
pub enum RfError {
    // Topology Errors
    #[error("Invalid topology at '{label}': {reason}")]
    InvalidTopology { label: String, reason: String },

    // File Errors
    #[error("Topology file not found: {path}")]
    ConfigNotFound { path: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RfError {
    pub(crate) fn invalid_topology(label: &str, reason: impl Into<String>) -> Self {
        RfError::InvalidTopology {
            label: label.to_string(),
            reason: reason.into(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            RfError::InvalidTopology { .. } => "INVALID_TOPOLOGY",
            RfError::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            RfError::Io(_) => "IO_ERROR",
            RfError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            RfError::InvalidTopology { .. } => vec![
                "Kernel size and stride must both be at least 1",
                "Check the kernel entry named in the message",
            ],
            RfError::ConfigNotFound { .. } => vec![
                "Check the file path is correct",
                "Built-in networks are available via 'rfield-cli show'",
            ],
            RfError::Serialization(_) => vec![
                "Kernels are objects {\"size\", \"stride\", \"padding\", \"label\"}",
                "or compact tuples [size, stride, padding, label]",
            ],
            RfError::Io(_) => vec![],
        }
    }
}
