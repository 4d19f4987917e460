/*!
 * Error types for the docuflow application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors returned by an extraction/translation service implementation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// The service answered with an `{ "error": ... }` payload
    #[error("{0}")]
    Rejected(String),

    /// The request never produced a usable HTTP response
    #[error("Request failed: {0}")]
    Transport(String),

    /// The response body could not be understood
    #[error("Failed to parse service response: {0}")]
    Parse(String),
}

impl ServiceError {
    /// The message the service itself provided, if it provided a non-blank one
    pub fn service_message(&self) -> Option<&str> {
        match self {
            Self::Rejected(message) if !message.trim().is_empty() => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Errors surfaced by the document workflow coordinator
///
/// The `Display` output of every variant is the user-facing message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkflowError {
    /// Input rejected before any external call was made
    #[error("{0}")]
    InputValidation(String),

    /// The external service returned an error payload
    #[error("{0}")]
    Service(String),

    /// The external call failed at the network layer
    #[error("{message}")]
    Transport {
        /// Generic per-operation fallback shown to the user
        message: String,
        /// Underlying failure, kept for logs
        cause: String,
    },

    /// Copying text to the clipboard failed
    #[error("{0}")]
    Clipboard(String),
}

impl WorkflowError {
    /// Map a service failure onto the workflow taxonomy using the operation's fallback message
    pub fn from_service(error: ServiceError, fallback: &str) -> Self {
        match error {
            ServiceError::Rejected(ref message) if !message.trim().is_empty() => {
                Self::Service(message.clone())
            }
            ServiceError::Rejected(_) => Self::Service(fallback.to_string()),
            ServiceError::Transport(cause) | ServiceError::Parse(cause) => Self::Transport {
                message: fallback.to_string(),
                cause,
            },
        }
    }

    /// User-facing message for this error
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Errors raised by the cloze quiz generator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuizError {
    /// Nothing left after whitespace normalisation
    #[error("No text to generate quiz from")]
    NoText,

    /// No sentence produced a usable blank
    #[error("Could not generate quiz from the text provided")]
    NoCandidates,
}

/// Errors raised by the export adapters
#[derive(Error, Debug)]
pub enum ExportError {
    /// Export requested while no extracted text exists
    #[error("No extracted text to export")]
    NoText,

    /// PDF assembly failed
    #[error("PDF export failed: {0}")]
    Pdf(String),

    /// Word document assembly failed
    #[error("Document export failed: {0}")]
    Document(String),

    /// Writing the exported file failed
    #[error("Failed to save export: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by a clipboard implementation
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// The clipboard could not be written
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
}
