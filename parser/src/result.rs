//! Parser results.
//!
//! A [`ParserResult`] is the flattened view of a classified command line that
//! applications consume: the options and positional values of the main
//! command and, if one was given, of the sub-command. Options that were
//! absent but declare default values are present with those defaults.

use argline_core::OptionDefinition;
use serde::Serialize;

use crate::error::ParseError;

/// An option found on the command line, with its value if it has one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultOption {
    /// Long name, or the single-letter short name as given.
    pub name: String,
    /// The value, if one was given or defaulted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ResultOption {
    /// Creates an option without a value.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: None,
        }
    }

    /// Creates an option with a value.
    pub fn with_value(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: Some(value.to_string()),
        }
    }
}

/// Options and positional values of one command.
///
/// # Examples
///
/// ```
/// use argline_core::OptionDefinition;
/// use argline_parser::{ResultCommand, ResultOption};
///
/// let verbose = OptionDefinition::new("verbose", "").with_short_name('v');
///
/// let mut command = ResultCommand::default();
/// command.add_option(ResultOption::new("v"));
/// command.add_positional_argument("file.txt");
///
/// assert!(command.is_set(&verbose));
/// assert_eq!(command.positional_argument_at(0), Some("file.txt"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultCommand {
    /// Name of the sub-command; empty for the main command.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Options in command-line order, followed by defaulted options.
    pub options: Vec<ResultOption>,
    /// Positional values in command-line order.
    pub positional_arguments: Vec<String>,
}

impl ResultCommand {
    /// Creates an empty result for the sub-command `name`.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn add_option(&mut self, option: ResultOption) {
        self.options.push(option);
    }

    pub fn add_positional_argument(&mut self, value: &str) {
        self.positional_arguments.push(value.to_string());
    }

    /// Sets the value of the most recently added option.
    ///
    /// # Panics
    ///
    /// Panics if no option was added yet.
    pub fn set_last_option_value(&mut self, value: &str) {
        let option = self
            .options
            .last_mut()
            .expect("an option value must follow an option");
        option.value = Some(value.to_string());
    }

    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    pub fn positional_argument_count(&self) -> usize {
        self.positional_arguments.len()
    }

    pub fn positional_argument_at(&self, index: usize) -> Option<&str> {
        self.positional_arguments.get(index).map(String::as_str)
    }

    /// Returns `true` if an entry for `option` exists, by long or short name.
    pub fn is_set(&self, option: &OptionDefinition) -> bool {
        self.options.iter().any(|entry| option.matches_name(&entry.name))
    }

    /// Returns `true` if an entry named `name` exists.
    pub fn is_set_by_name(&self, name: &str) -> bool {
        self.options.iter().any(|entry| entry.name == name)
    }

    /// Returns `true` if the conventional `help` option is set.
    pub fn is_help_option_set(&self) -> bool {
        self.is_set(&OptionDefinition::help_option())
    }

    /// Returns the values given for `option`, or its default values if none
    /// were given.
    pub fn values(&self, option: &OptionDefinition) -> Vec<String> {
        let values: Vec<String> = self
            .options
            .iter()
            .filter(|entry| option.matches_name(&entry.name))
            .filter_map(|entry| entry.value.clone())
            .collect();
        if values.is_empty() {
            return option.default_values.clone();
        }
        values
    }

    /// Adds one entry per default value for every option of `definitions`
    /// that has defaults and no entry yet.
    pub(crate) fn add_missing_default_values(&mut self, definitions: &[OptionDefinition]) {
        for definition in definitions {
            if !definition.has_default_values() || self.is_set(definition) {
                continue;
            }
            for value in &definition.default_values {
                self.add_option(ResultOption::with_value(&definition.name, value));
            }
        }
    }
}

/// Result of parsing a command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParserResult {
    /// The main command.
    pub main_command: ResultCommand,
    /// The sub-command, if one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_command: Option<ResultCommand>,
    /// The first classification error, if any.
    #[serde(skip)]
    pub error: Option<ParseError>,
}

impl ParserResult {
    pub fn has_sub_command(&self) -> bool {
        self.sub_command.is_some()
    }

    /// Name of the sub-command, if one was given.
    pub fn sub_command_name(&self) -> Option<&str> {
        self.sub_command.as_ref().map(|command| command.name.as_str())
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// The first error as text, empty without error.
    pub fn error_text(&self) -> String {
        self.error
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_set_matches_long_and_short_names() {
        let force = OptionDefinition::new("force", "").with_short_name('f');
        let mut command = ResultCommand::default();
        assert!(!command.is_set(&force));
        command.add_option(ResultOption::new("f"));
        assert!(command.is_set(&force));
        assert!(command.is_set_by_name("f"));
        assert!(!command.is_set_by_name("force"));
    }

    #[test]
    fn test_values_fall_back_to_defaults() {
        let param = OptionDefinition::new("param", "")
            .with_value_name("param")
            .with_default_values(["storage=sql", "render=glx"]);
        let mut command = ResultCommand::default();
        assert_eq!(command.values(&param), vec!["storage=sql", "render=glx"]);

        command.add_option(ResultOption::with_value("param", "storage=file"));
        assert_eq!(command.values(&param), vec!["storage=file"]);
    }

    #[test]
    fn test_set_last_option_value() {
        let mut command = ResultCommand::default();
        command.add_option(ResultOption::new("f"));
        command.add_option(ResultOption::new("m"));
        command.set_last_option_value("keep");
        assert_eq!(command.options[0].value, None);
        assert_eq!(command.options[1].value.as_deref(), Some("keep"));
    }

    #[test]
    #[should_panic(expected = "an option value must follow an option")]
    fn test_set_last_option_value_without_option_panics() {
        ResultCommand::default().set_last_option_value("keep");
    }

    #[test]
    fn test_add_missing_default_values_keeps_given_options() {
        let definitions = vec![
            OptionDefinition::new("param", "")
                .with_value_name("param")
                .with_default_values(["storage=sql", "render=glx"]),
            OptionDefinition::new("mode", "")
                .with_short_name('m')
                .with_value_name("mode")
                .with_default_value("fast"),
        ];
        let mut command = ResultCommand::default();
        command.add_option(ResultOption::with_value("m", "slow"));
        command.add_missing_default_values(&definitions);

        assert_eq!(
            command.options,
            vec![
                ResultOption::with_value("m", "slow"),
                ResultOption::with_value("param", "storage=sql"),
                ResultOption::with_value("param", "render=glx"),
            ]
        );
    }

    #[test]
    fn test_error_text() {
        let result = ParserResult {
            error: Some(ParseError::UnknownOption("he".into())),
            ..Default::default()
        };
        assert!(result.has_error());
        assert_eq!(result.error_text(), "Unknown option 'he'");
        assert_eq!(ParserResult::default().error_text(), "");
    }
}
