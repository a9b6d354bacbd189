//! Error handling for ProbeKit
//!
//! Provides error types for the processing layers:
//! - Command processing errors (raised while reading a single command line)
//! - Pipeline errors (a processor failed while the pipeline was running)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Command processing error type
///
/// Raised when a command line cannot be interpreted well enough to be
/// processed, e.g. when its comments are malformed. Processors propagate
/// these unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandProcessingError {
    /// A parenthesized comment was opened but never closed
    #[error("Unterminated comment starting at column {column}")]
    UnterminatedComment {
        /// Zero-based byte offset of the opening parenthesis.
        column: usize,
    },

    /// A closing parenthesis appeared outside of any comment
    #[error("Unexpected ')' at column {column}")]
    UnexpectedCommentClose {
        /// Zero-based byte offset of the stray parenthesis.
        column: usize,
    },

    /// Generic processing error
    #[error("Command processing error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

impl CommandProcessingError {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        CommandProcessingError::Other {
            message: msg.into(),
        }
    }
}

/// Pipeline error type
///
/// Identifies which processor in a pipeline failed and on what command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// A registered processor returned an error
    #[error("Processor '{name}' failed on '{command}': {source}")]
    Processor {
        /// The name of the failing processor.
        name: String,
        /// The command the processor was handed.
        command: String,
        /// The underlying processing error.
        #[source]
        source: CommandProcessingError,
    },

    /// Requested processor is not registered
    #[error("Unknown processor: {name}")]
    UnknownProcessor {
        /// The unknown processor name.
        name: String,
    },
}

impl PipelineError {
    /// The processing error behind this failure, if any
    pub fn processing_error(&self) -> Option<&CommandProcessingError> {
        match self {
            PipelineError::Processor { source, .. } => Some(source),
            PipelineError::UnknownProcessor { .. } => None,
        }
    }
}

/// Main error type for ProbeKit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Command processing error
    #[error(transparent)]
    Processing(#[from] CommandProcessingError),

    /// Pipeline error
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a command processing error, directly or via a pipeline
    pub fn is_processing_error(&self) -> bool {
        match self {
            Error::Processing(_) => true,
            Error::Pipeline(e) => e.processing_error().is_some(),
            _ => false,
        }
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_error_display() {
        let err = CommandProcessingError::UnterminatedComment { column: 4 };
        assert_eq!(
            err.to_string(),
            "Unterminated comment starting at column 4"
        );

        let err = CommandProcessingError::UnexpectedCommentClose { column: 0 };
        assert_eq!(err.to_string(), "Unexpected ')' at column 0");

        let err = CommandProcessingError::other("bad line");
        assert_eq!(err.to_string(), "Command processing error: bad line");
    }

    #[test]
    fn test_pipeline_error_display() {
        let err = PipelineError::Processor {
            name: "tool_change".to_string(),
            command: "T1M6 (oops".to_string(),
            source: CommandProcessingError::UnterminatedComment { column: 5 },
        };
        assert_eq!(
            err.to_string(),
            "Processor 'tool_change' failed on 'T1M6 (oops': Unterminated comment starting at column 5"
        );
        assert_eq!(
            err.processing_error(),
            Some(&CommandProcessingError::UnterminatedComment { column: 5 })
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = CommandProcessingError::other("x").into();
        assert!(err.is_processing_error());

        let err: Error = PipelineError::UnknownProcessor {
            name: "nope".to_string(),
        }
        .into();
        assert!(!err.is_processing_error());

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
