//! Bash completion for argline command lines.
//!
//! Completion works in two halves:
//!
//! - A generated bash script ([`script_from_definition`],
//!   [`write_script_to_directory`]) is sourced by the user's shell. On every
//!   completion request it calls the application back with
//!   `completion-find-current-argument $COMP_CWORD $COMP_LINE` and switches
//!   on the name the application prints.
//! - The application answers that call with [`handle_bash_completion`]
//!   before doing anything else. A [`BashCompletionQuery`] locates the
//!   cursor within the classified command line and
//!   [`find_current_argument_name`] turns that position into a name.
//!
//! # Example
//!
//! ```
//! use argline_completion::{handle_bash_completion_arguments, script_from_definition};
//! use argline_core::{ParserDefinition, ValueType};
//!
//! let mut definition = ParserDefinition::new("app");
//! definition.add_help_option();
//! definition.add_positional_argument(ValueType::File, "source", "");
//!
//! let script = script_from_definition(&definition).to_string();
//! assert!(script.contains("    source)\n"));
//!
//! let mut out = Vec::new();
//! let arguments = ["app", "completion-find-current-argument", "1", "app"];
//! assert!(handle_bash_completion_arguments(&definition, &arguments, &mut out).unwrap());
//! assert_eq!(out, b"source");
//! ```

mod compgen;
mod error;
mod generator;
mod handler;
mod query;
mod script;

pub use compgen::{CompgenAction, CompgenArgument, CompgenCommand};
pub use error::{CompletionError, Result};
pub use generator::{script_file_path, script_from_definition, write_script_to_directory};
pub use handler::{
    find_current_argument_name, handle_bash_completion, handle_bash_completion_arguments,
    handle_bash_completion_to,
};
pub use query::{
    BashCompletionQuery, FIND_CURRENT_ARGUMENT, is_bash_completion_invocation,
    is_valid_bash_completion_query,
};
pub use script::{Script, ScriptCaseClause, ScriptVariable};
