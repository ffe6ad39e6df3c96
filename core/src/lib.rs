//! Parser definitions and the classified command-line model.
//!
//! This crate defines the foundational types shared by the parser and the
//! completion engine:
//!
//! - [`ParserDefinition`]: static description of an application command
//!   line: main command, sub-commands, options and positional arguments.
//! - [`OptionDefinition`] / [`PositionalArgumentDefinition`]: the items a
//!   [`CommandDefinition`] accepts.
//! - [`Argument`]: a single classified command-line token.
//! - [`CommandLine`]: the ordered list of classified arguments, with
//!   position based queries.
//!
//! Validation ([`validate_definition`]) checks definitions that were loaded
//! from a file rather than built with the asserting builder methods. Help
//! text is available through [`ParserDefinition::help_text`].
//!
//! # Example
//!
//! ```
//! use argline_core::*;
//!
//! let mut definition = ParserDefinition::new("app");
//! definition.add_help_option();
//! definition.add_option(
//!     OptionDefinition::new("overwrite-behavior", "Behavior if the destination exists")
//!         .with_value_name("behavior"),
//! );
//! definition.add_positional_argument(ValueType::File, "source", "Source file");
//! definition.add_positional_argument(ValueType::Directory, "destination", "Destination");
//!
//! assert!(validate_definition(&definition).is_empty());
//! assert_eq!(definition.usage_text(), "Usage: app [options] source destination");
//! ```

mod argument;
mod command_line;
mod definition;
mod help;
mod validate;

pub use argument::Argument;
pub use command_line::CommandLine;
pub use definition::*;
pub use validate::{DefinitionError, validate_definition};
