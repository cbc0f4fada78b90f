//! Error types for Fridge Chef
//!
//! Every failure in the pipeline collapses into one of a small set of kinds.
//! Components render these as text for the console, but the kind stays
//! available so callers can tell "nothing recognized" from "service down".

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Failure taxonomy shared by the gateway and the components above it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Image path does not point at an existing file
    ResourceNotFound,
    /// Model endpoint could not be reached
    EndpointUnreachable,
    /// Endpoint is up but does not know the requested model
    ModelNotFound,
    /// Endpoint answered with something that could not be decoded
    MalformedResponse,
    /// Transport gave up waiting for the endpoint
    Timeout,
    /// Anything the classifier does not recognize
    Unknown,
}

impl ErrorKind {
    /// Short troubleshooting hint shown next to a failure
    pub fn hint(&self) -> &'static str {
        match self {
            ErrorKind::ResourceNotFound => "Check that the image path is correct and the file exists.",
            ErrorKind::EndpointUnreachable => {
                "Could not connect to the model server. Is 'ollama serve' running?"
            }
            ErrorKind::ModelNotFound => {
                "The model is not installed on the server. Check 'ollama list' or pull the model first."
            }
            ErrorKind::MalformedResponse => {
                "Received an unparseable response. Check the model server logs."
            }
            ErrorKind::Timeout => {
                "The request timed out. The model may be slow on large images or low resources."
            }
            ErrorKind::Unknown => "An unexpected error occurred while talking to the model.",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ResourceNotFound => write!(f, "resource_not_found"),
            ErrorKind::EndpointUnreachable => write!(f, "endpoint_unreachable"),
            ErrorKind::ModelNotFound => write!(f, "model_not_found"),
            ErrorKind::MalformedResponse => write!(f, "malformed_response"),
            ErrorKind::Timeout => write!(f, "timeout"),
            ErrorKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Image file not found at {}", .0.display())]
    ResourceNotFound(PathBuf),

    #[error("{message}")]
    Gateway { kind: ErrorKind, message: String },

    #[error("Invalid conversation request: {0}")]
    InvalidRequest(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Build a gateway failure from an already classified description
    pub fn gateway(kind: ErrorKind, message: impl Into<String>) -> Self {
        AppError::Gateway {
            kind,
            message: message.into(),
        }
    }

    /// Position of this error in the failure taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::ResourceNotFound(_) => ErrorKind::ResourceNotFound,
            AppError::Gateway { kind, .. } => *kind,
            AppError::InvalidRequest(_) | AppError::Io(_) => ErrorKind::Unknown,
        }
    }

    /// Human-readable hint for the console
    pub fn hint(&self) -> &'static str {
        self.kind().hint()
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
