//! Command-line classification and parser results.
//!
//! This crate turns raw command-line tokens into structured data, given a
//! [`ParserDefinition`](argline_core::ParserDefinition):
//!
//! - [`classify`] produces a [`Classification`]: the tagged
//!   [`CommandLine`](argline_core::CommandLine) plus the first error found.
//!   Classification never stops early, so half-typed command lines are still
//!   usable for shell completion.
//! - [`ParserResult`] flattens a command line into main-command and
//!   sub-command options and positional values, with option defaults applied.
//! - [`parse`] does both and fails on the first error, which is what an
//!   ordinary program run wants.
//!
//! # Example
//!
//! ```
//! use argline_core::{CommandDefinition, OptionDefinition, ParserDefinition, ValueType};
//! use argline_parser::parse;
//!
//! let mut definition = ParserDefinition::new("app");
//! definition.add_help_option();
//! definition.add_sub_command(
//!     CommandDefinition::new("copy")
//!         .with_option(OptionDefinition::new("force", "").with_short_name('f'))
//!         .with_positional_argument(ValueType::File, "source", "")
//!         .with_positional_argument(ValueType::Directory, "destination", ""),
//! );
//!
//! let result = parse(&definition, &["app", "copy", "-f", "file.txt", "/tmp"]).unwrap();
//! let copy = result.sub_command.as_ref().unwrap();
//! assert!(copy.is_set_by_name("f"));
//! assert_eq!(copy.positional_arguments, vec!["file.txt", "/tmp"]);
//!
//! let error = parse(&definition, &["app", "--nope"]).unwrap_err();
//! assert_eq!(error.to_string(), "Unknown option 'nope'");
//! ```

mod classify;
mod error;
mod projection;
mod result;

pub use classify::{Classification, classify};
pub use error::{ParseError, Result};
pub use result::{ParserResult, ResultCommand, ResultOption};

use argline_core::ParserDefinition;

/// Classifies `arguments` and projects them into a [`ParserResult`].
///
/// # Errors
///
/// Returns the first [`ParseError`] recorded during classification.
pub fn parse<S: AsRef<str>>(definition: &ParserDefinition, arguments: &[S]) -> Result<ParserResult> {
    let command_line = classify(definition, arguments).into_result()?;
    Ok(ParserResult::from_command_line(&command_line, definition))
}
