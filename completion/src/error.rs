//! Error types for completion handling and script generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while answering a completion query or writing a
/// completion script.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Writing the completion answer failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The completion script file could not be created.
    #[error("open file '{}' failed: {source}", path.display())]
    OpenScriptFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The completion script could not be written to its file.
    #[error("write file '{}' failed: {source}", path.display())]
    WriteScriptFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias for results with [`CompletionError`].
pub type Result<T> = std::result::Result<T, CompletionError>;
