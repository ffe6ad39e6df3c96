//! Error types for command-line classification.

use thiserror::Error;

/// Errors recorded while classifying a command line.
///
/// Classification does not stop at the first error. The first recorded
/// error is the one reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The token list did not even contain the executable name.
    #[error("a command line should at least contain the executable name")]
    EmptyCommandLine,

    /// An option that is not defined for the current command.
    #[error("Unknown option '{0}'")]
    UnknownOption(String),

    /// An option that expects a value reached the end of the command line,
    /// or was given an empty `=` value.
    #[error("option '{0}' expects a value, but was not provided")]
    MissingOptionValue(String),

    /// A short option expecting a value is not the last one of its cluster.
    #[error("Short option '{0}' expects a value, but is not the last")]
    ShortOptionNotLast(char),
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;
