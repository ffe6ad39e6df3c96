//! Projection of a classified command line into a [`ParserResult`].

use argline_core::{Argument, CommandLine, ParserDefinition};

use crate::classify::Classification;
use crate::result::{ParserResult, ResultCommand, ResultOption};

fn add_argument(command: &mut ResultCommand, argument: &Argument) {
    match argument {
        Argument::Executable { .. }
        | Argument::SubCommandName { .. }
        | Argument::DoubleDash
        | Argument::UnknownOption { .. } => {}
        Argument::PositionalArgument { value } => command.add_positional_argument(value),
        Argument::SingleDash => command.add_positional_argument("-"),
        Argument::Option { name, .. } => command.add_option(ResultOption::new(name)),
        Argument::OptionWithValue { name, value } => {
            command.add_option(ResultOption::with_value(name, value));
        }
        Argument::ShortOptionList { names, .. } => {
            for name in names {
                command.add_option(ResultOption::new(&name.to_string()));
            }
        }
        Argument::ShortOptionListWithLastHavingValue { names, value } => {
            if let Some((last, others)) = names.split_last() {
                for name in others {
                    command.add_option(ResultOption::new(&name.to_string()));
                }
                command.add_option(ResultOption::with_value(&last.to_string(), value));
            }
        }
        Argument::OptionValue { value } => command.set_last_option_value(value),
    }
}

impl ParserResult {
    /// Builds a result from a classified command line.
    ///
    /// Everything before the sub-command name goes to the main command,
    /// everything after it to the sub-command. Options with default values
    /// that were not given are then added with their defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use argline_core::{OptionDefinition, ParserDefinition};
    /// use argline_parser::{ParserResult, ResultOption, classify};
    ///
    /// let mut definition = ParserDefinition::new("app");
    /// definition.add_option(OptionDefinition::new("force", "").with_short_name('f'));
    /// definition.add_option(
    ///     OptionDefinition::new("mode", "").with_short_name('m').with_value_name("mode"),
    /// );
    ///
    /// let classification = classify(&definition, &["app", "-fm", "keep", "-"]);
    /// let result = ParserResult::from_command_line(classification.command_line(), &definition);
    ///
    /// assert_eq!(
    ///     result.main_command.options,
    ///     vec![ResultOption::new("f"), ResultOption::with_value("m", "keep")]
    /// );
    /// assert_eq!(result.main_command.positional_arguments, vec!["-"]);
    /// ```
    pub fn from_command_line(command_line: &CommandLine, definition: &ParserDefinition) -> Self {
        let mut main_command = ResultCommand::default();
        let mut sub_command: Option<ResultCommand> = None;

        for argument in command_line.arguments() {
            if let Argument::SubCommandName { name } = argument {
                sub_command = Some(ResultCommand::new(name));
                continue;
            }
            match sub_command.as_mut() {
                Some(command) => add_argument(command, argument),
                None => add_argument(&mut main_command, argument),
            }
        }

        main_command.add_missing_default_values(&definition.main_command.options);
        if let Some(command) = sub_command.as_mut() {
            if let Some(command_definition) = definition.find_sub_command_by_name(&command.name) {
                command.add_missing_default_values(&command_definition.options);
            }
        }

        Self {
            main_command,
            sub_command,
            error: None,
        }
    }

    /// Builds a result from a classification, keeping its first error.
    pub fn from_classification(classification: Classification, definition: &ParserDefinition) -> Self {
        let (command_line, error) = classification.into_parts();
        Self {
            error,
            ..Self::from_command_line(&command_line, definition)
        }
    }
}
