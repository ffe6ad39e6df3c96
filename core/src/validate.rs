//! Parser definition validation.
//!
//! Builder methods on the definition types assert their preconditions, but
//! a definition loaded from YAML or JSON bypasses them. [`validate_definition`]
//! checks the same rules and reports every problem found in a command before
//! moving on, so a broken definition file can be fixed in one pass.
//!
//! # Examples
//!
//! ```
//! use argline_core::*;
//!
//! let mut definition = ParserDefinition::new("app");
//! definition.add_help_option();
//! assert!(validate_definition(&definition).is_empty());
//!
//! // Invalid: long name with leading dashes
//! let mut bad = ParserDefinition::new("app");
//! bad.main_command.options.push(OptionDefinition {
//!     name: "--verbose".into(),
//!     ..OptionDefinition::help_option()
//! });
//! assert!(!validate_definition(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{CommandDefinition, OptionDefinition, ParserDefinition, PositionalArgumentDefinition};

/// Definition validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// Application name is empty or whitespace-only.
    #[error("application name cannot be empty")]
    EmptyApplicationName,
    /// Long option name is blank, starts with a dash, or contains `/` or `=`.
    #[error("invalid option name: '{0}'")]
    InvalidOptionName(String),
    /// Short option name is not alphabetic.
    #[error("invalid short option name: '{0}'")]
    InvalidShortName(char),
    /// Value name is present but blank.
    #[error("option '{0}' has an empty value name")]
    EmptyValueName(String),
    /// Two options in the same command share a long name.
    #[error("duplicate option in command: {0}")]
    DuplicateOption(String),
    /// Two options in the same command share a short name.
    #[error("duplicate short option in command: {0}")]
    DuplicateShortName(char),
    /// Positional argument name is empty or whitespace-only.
    #[error("positional argument name cannot be empty")]
    EmptyPositionalArgumentName,
    /// Positional argument name contains whitespace or `)`.
    #[error("invalid positional argument name: '{0}'")]
    InvalidPositionalArgumentName(String),
    /// A sub-command has no name.
    #[error("sub-command name cannot be empty")]
    EmptySubCommandName,
    /// Sub-command name contains whitespace or `)`, or starts with a dash.
    #[error("invalid sub-command name: '{0}'")]
    InvalidSubCommandName(String),
    /// Two sub-commands share a name.
    #[error("duplicate sub-command: {0}")]
    DuplicateSubCommand(String),
}

/// Validates a parser definition.
///
/// # Examples
///
/// ```
/// use argline_core::*;
///
/// let mut definition = ParserDefinition::new("app");
/// definition.sub_commands.push(CommandDefinition::new("copy"));
/// definition.sub_commands.push(CommandDefinition::new("copy"));
///
/// let errors = validate_definition(&definition);
/// assert_eq!(errors, vec![DefinitionError::DuplicateSubCommand("copy".into())]);
/// ```
pub fn validate_definition(definition: &ParserDefinition) -> Vec<DefinitionError> {
    let mut errors = Vec::new();

    if definition.application_name.trim().is_empty() {
        errors.push(DefinitionError::EmptyApplicationName);
    }

    errors.extend(validate_command(&definition.main_command));

    let mut seen: HashSet<&str> = HashSet::new();
    for command in &definition.sub_commands {
        let name = command.name.as_str();
        if name.trim().is_empty() {
            errors.push(DefinitionError::EmptySubCommandName);
            continue;
        }
        if !CommandDefinition::is_valid_name(name) {
            errors.push(DefinitionError::InvalidSubCommandName(name.to_string()));
        } else if !seen.insert(name) {
            errors.push(DefinitionError::DuplicateSubCommand(name.to_string()));
            continue;
        }
        errors.extend(validate_command(command));
    }

    errors
}

fn validate_command(command: &CommandDefinition) -> Vec<DefinitionError> {
    let mut errors = validate_options(&command.options);

    for argument in &command.positional_arguments {
        if argument.name.trim().is_empty() {
            errors.push(DefinitionError::EmptyPositionalArgumentName);
        } else if !PositionalArgumentDefinition::is_valid_name(&argument.name) {
            errors.push(DefinitionError::InvalidPositionalArgumentName(
                argument.name.clone(),
            ));
        }
    }

    errors
}

fn validate_options(options: &[OptionDefinition]) -> Vec<DefinitionError> {
    let mut errors = Vec::new();
    let mut seen_names = HashSet::new();
    let mut seen_short_names = HashSet::new();

    for option in options {
        if !OptionDefinition::is_valid_name(&option.name) {
            errors.push(DefinitionError::InvalidOptionName(option.name.clone()));
        } else if !seen_names.insert(option.name.as_str()) {
            errors.push(DefinitionError::DuplicateOption(option.name.clone()));
        }

        if let Some(short_name) = option.short_name {
            if !OptionDefinition::is_valid_short_name(short_name) {
                errors.push(DefinitionError::InvalidShortName(short_name));
            } else if !seen_short_names.insert(short_name) {
                errors.push(DefinitionError::DuplicateShortName(short_name));
            }
        }

        if option
            .value_name
            .as_deref()
            .is_some_and(|value_name| value_name.trim().is_empty())
        {
            errors.push(DefinitionError::EmptyValueName(option.name.clone()));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValueType;

    fn raw_option(name: &str, short_name: Option<char>) -> OptionDefinition {
        OptionDefinition {
            short_name,
            name: name.to_string(),
            description: String::new(),
            value_name: None,
            possible_values: Vec::new(),
            default_values: Vec::new(),
        }
    }

    #[test]
    fn test_validate_definition_accepts_valid_definition() {
        let mut definition = ParserDefinition::new("app");
        definition.add_help_option();
        definition.add_option(OptionDefinition::new("verbose", "").with_short_name('v'));
        definition.add_positional_argument(ValueType::File, "source", "");
        definition.add_sub_command(CommandDefinition::new("copy").with_help_option());
        assert!(validate_definition(&definition).is_empty());
    }

    #[test]
    fn test_validate_definition_rejects_bad_option_names() {
        let mut definition = ParserDefinition::new("app");
        definition.main_command.options.push(raw_option("-v", None));
        definition.main_command.options.push(raw_option("a=b", None));
        definition.main_command.options.push(raw_option("ok", Some('1')));

        let errors = validate_definition(&definition);
        assert_eq!(
            errors,
            vec![
                DefinitionError::InvalidOptionName("-v".into()),
                DefinitionError::InvalidOptionName("a=b".into()),
                DefinitionError::InvalidShortName('1'),
            ]
        );
    }

    #[test]
    fn test_validate_definition_rejects_duplicates() {
        let mut definition = ParserDefinition::new("app");
        definition.main_command.options.push(raw_option("verbose", Some('v')));
        definition.main_command.options.push(raw_option("verbose", None));
        definition.main_command.options.push(raw_option("version", Some('v')));

        let errors = validate_definition(&definition);
        assert!(errors.contains(&DefinitionError::DuplicateOption("verbose".into())));
        assert!(errors.contains(&DefinitionError::DuplicateShortName('v')));
    }

    #[test]
    fn test_validate_definition_checks_sub_commands() {
        let mut definition = ParserDefinition::new("app");
        let mut copy = CommandDefinition::new("copy");
        copy.positional_arguments
            .push(PositionalArgumentDefinition {
                name: " ".into(),
                ..PositionalArgumentDefinition::new(ValueType::File, "source", "")
            });
        definition.sub_commands.push(copy);
        definition.sub_commands.push(CommandDefinition::default());

        let errors = validate_definition(&definition);
        assert_eq!(
            errors,
            vec![
                DefinitionError::EmptyPositionalArgumentName,
                DefinitionError::EmptySubCommandName,
            ]
        );
    }

    #[test]
    fn test_validate_definition_rejects_names_unusable_for_completion() {
        let mut definition = ParserDefinition::new("app");
        definition
            .main_command
            .positional_arguments
            .push(PositionalArgumentDefinition {
                name: "file)".into(),
                ..PositionalArgumentDefinition::new(ValueType::File, "source", "")
            });
        for name in ["-copy", "co py", "copy)"] {
            definition.sub_commands.push(CommandDefinition {
                name: name.into(),
                ..CommandDefinition::default()
            });
        }

        assert_eq!(
            validate_definition(&definition),
            vec![
                DefinitionError::InvalidPositionalArgumentName("file)".into()),
                DefinitionError::InvalidSubCommandName("-copy".into()),
                DefinitionError::InvalidSubCommandName("co py".into()),
                DefinitionError::InvalidSubCommandName("copy)".into()),
            ]
        );
    }

    #[test]
    fn test_validate_definition_compares_exact_sub_command_names() {
        let mut definition = ParserDefinition::new("app");
        definition.sub_commands.push(CommandDefinition::new("copy"));
        definition.sub_commands.push(CommandDefinition {
            name: " copy".into(),
            ..CommandDefinition::default()
        });
        definition.sub_commands.push(CommandDefinition::new("copy"));

        assert_eq!(
            validate_definition(&definition),
            vec![
                DefinitionError::InvalidSubCommandName(" copy".into()),
                DefinitionError::DuplicateSubCommand("copy".into()),
            ]
        );
    }

    #[test]
    fn test_validate_definition_rejects_empty_application_name() {
        let definition = ParserDefinition::default();
        assert_eq!(
            validate_definition(&definition),
            vec![DefinitionError::EmptyApplicationName]
        );
    }
}
