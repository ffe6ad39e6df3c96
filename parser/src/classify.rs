//! Command-line classification.
//!
//! Turns a raw token list into a [`CommandLine`] in a single left-to-right
//! pass with one token of lookahead for option values. The first token is
//! the executable. Until a token exactly matches a sub-command name, tokens
//! are classified against the main command's options; after it, against the
//! sub-command's options. A lone `--` makes every remaining token positional.
//!
//! Errors do not stop classification. An unknown option is kept as
//! [`Argument::UnknownOption`](argline_core::Argument::UnknownOption), an
//! option missing its value is kept as an option expecting a value, and the
//! first error is reported alongside the best-effort command line. This is
//! what allows half-typed command lines to be queried during shell
//! completion.

use argline_core::{CommandDefinition, CommandLine, ParserDefinition};
use tracing::debug;

use crate::error::{ParseError, Result};

/// Output of [`classify`]: a command line and the first error, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    command_line: CommandLine,
    error: Option<ParseError>,
    unknown_option_names: Vec<String>,
}

impl Classification {
    /// The classified command line, complete even when errors were recorded.
    pub fn command_line(&self) -> &CommandLine {
        &self.command_line
    }

    /// Consumes the classification, returning the command line.
    pub fn into_command_line(self) -> CommandLine {
        self.command_line
    }

    /// Returns `true` if no error was recorded.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The first recorded error.
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// Names of every unknown option, in command-line order.
    ///
    /// Long options are reported by name, clustered short options by the
    /// first unknown letter.
    pub fn unknown_option_names(&self) -> &[String] {
        &self.unknown_option_names
    }

    /// Converts into a `Result`, failing with the first recorded error.
    pub fn into_result(self) -> Result<CommandLine> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.command_line),
        }
    }

    pub(crate) fn into_parts(self) -> (CommandLine, Option<ParseError>) {
        (self.command_line, self.error)
    }
}

/// Classifies `arguments` against `definition`.
///
/// # Examples
///
/// ```
/// use argline_core::{Argument, OptionDefinition, ParserDefinition};
/// use argline_parser::{ParseError, classify};
///
/// let mut definition = ParserDefinition::new("app");
/// definition.add_option(OptionDefinition::new("verbose", "").with_short_name('v'));
///
/// let classification = classify(&definition, &["app", "-v", "--he", "file.txt"]);
/// assert_eq!(classification.error(), Some(&ParseError::UnknownOption("he".into())));
///
/// let arguments = classification.command_line().arguments();
/// assert_eq!(arguments[2], Argument::UnknownOption { name: "he".into() });
/// assert_eq!(arguments[3], Argument::PositionalArgument { value: "file.txt".into() });
/// ```
pub fn classify<S: AsRef<str>>(definition: &ParserDefinition, arguments: &[S]) -> Classification {
    let classifier = Classifier {
        definition,
        command: &definition.main_command,
        in_sub_command: false,
        command_line: CommandLine::new(),
        error: None,
        unknown_option_names: Vec::new(),
    };
    classifier.run(arguments.iter().map(AsRef::as_ref))
}

struct Classifier<'a> {
    definition: &'a ParserDefinition,
    command: &'a CommandDefinition,
    in_sub_command: bool,
    command_line: CommandLine,
    error: Option<ParseError>,
    unknown_option_names: Vec<String>,
}

impl<'a> Classifier<'a> {
    fn run<'t, I>(mut self, mut tokens: I) -> Classification
    where
        I: Iterator<Item = &'t str>,
    {
        match tokens.next() {
            Some(executable) => self.command_line.set_executable_name(executable),
            None => self.record_error(ParseError::EmptyCommandLine),
        }

        while let Some(token) = tokens.next() {
            if token == "--" {
                self.command_line.append_double_dash();
                for token in tokens.by_ref() {
                    self.command_line.append_positional_argument(token);
                }
                break;
            }

            if !self.in_sub_command {
                if let Some(sub_command) = self.definition.find_sub_command_by_name(token) {
                    self.command = sub_command;
                    self.in_sub_command = true;
                    self.command_line.append_sub_command_name(&sub_command.name);
                    continue;
                }
            }

            if let Some(text) = token.strip_prefix("--") {
                self.classify_long_option(text, &mut tokens);
            } else if token == "-" {
                self.command_line.append_single_dash();
            } else if let Some(text) = token.strip_prefix('-') {
                self.classify_short_options(text, &mut tokens);
            } else {
                self.command_line.append_positional_argument(token);
            }
        }

        debug!(
            argument_count = self.command_line.argument_count(),
            has_error = self.error.is_some(),
            "classified command line"
        );

        Classification {
            command_line: self.command_line,
            error: self.error,
            unknown_option_names: self.unknown_option_names,
        }
    }

    fn record_error(&mut self, error: ParseError) {
        debug!(%error, "command line classification error");
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    fn record_unknown_option(&mut self, argument_name: &str, reported_name: String) {
        self.command_line.append_unknown_option(argument_name);
        self.unknown_option_names.push(reported_name.clone());
        self.record_error(ParseError::UnknownOption(reported_name));
    }

    /// `--name`, `--name=value` or `--name value`; `text` has no leading dashes.
    fn classify_long_option<'t, I>(&mut self, text: &str, tokens: &mut I)
    where
        I: Iterator<Item = &'t str>,
    {
        let (name, embedded_value) = match text.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (text, None),
        };

        let command = self.command;
        let Some(option) = command.find_option_by_long_name(name) else {
            self.record_unknown_option(name, name.to_string());
            return;
        };

        if !option.expects_value() {
            self.command_line.append_option(name);
            return;
        }

        match embedded_value {
            Some(value) => {
                if value.is_empty() {
                    self.record_error(ParseError::MissingOptionValue(name.to_string()));
                }
                self.command_line.append_option_with_value(name, value);
            }
            None => {
                self.command_line.append_option_expecting_value(name);
                self.consume_option_value(name, tokens);
            }
        }
    }

    /// `-x`, `-xyz`, `-xyz=value` or `-xyz value`; `text` has no leading dash.
    fn classify_short_options<'t, I>(&mut self, text: &str, tokens: &mut I)
    where
        I: Iterator<Item = &'t str>,
    {
        let (cluster, embedded_value) = match text.split_once('=') {
            Some((cluster, value)) => (cluster, Some(value)),
            None => (text, None),
        };

        if cluster.is_empty() {
            self.record_unknown_option(cluster, String::new());
            return;
        }

        let command = self.command;
        let cluster_length = cluster.chars().count();
        let mut names = Vec::with_capacity(cluster_length);
        let mut last_expects_value = false;

        for (position, short_name) in cluster.chars().enumerate() {
            let Some(option) = command.find_option_by_short_name(short_name) else {
                self.record_unknown_option(cluster, short_name.to_string());
                return;
            };
            if option.expects_value() {
                if position + 1 < cluster_length {
                    self.record_error(ParseError::ShortOptionNotLast(short_name));
                } else {
                    last_expects_value = true;
                }
            }
            names.push(short_name);
        }

        let last_name = names[names.len() - 1].to_string();

        if !last_expects_value {
            if names.len() == 1 {
                self.command_line.append_option(&last_name);
            } else {
                self.command_line.append_short_option_list(names);
            }
            return;
        }

        match embedded_value {
            Some(value) => {
                if value.is_empty() {
                    self.record_error(ParseError::MissingOptionValue(last_name.clone()));
                }
                if names.len() == 1 {
                    self.command_line.append_option_with_value(&last_name, value);
                } else {
                    self.command_line
                        .append_short_option_list_with_last_having_value(names, value);
                }
            }
            None => {
                if names.len() == 1 {
                    self.command_line.append_option_expecting_value(&last_name);
                } else {
                    self.command_line
                        .append_short_option_list_with_last_expecting_value(names);
                }
                self.consume_option_value(&last_name, tokens);
            }
        }
    }

    fn consume_option_value<'t, I>(&mut self, option_name: &str, tokens: &mut I)
    where
        I: Iterator<Item = &'t str>,
    {
        match tokens.next() {
            Some(value) => self.command_line.append_option_value(value),
            None => self.record_error(ParseError::MissingOptionValue(option_name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argline_core::{Argument, OptionDefinition, ValueType};

    fn copy_definition() -> ParserDefinition {
        let mut definition = ParserDefinition::new("app");
        definition.add_help_option();
        definition.add_option(OptionDefinition::new("force", "").with_short_name('f'));
        definition.add_option(
            OptionDefinition::new("overwrite-behavior", "")
                .with_short_name('m')
                .with_value_name("behavior"),
        );
        definition.add_positional_argument(ValueType::File, "source", "");
        definition.add_positional_argument(ValueType::Directory, "destination", "");
        definition
    }

    fn sub_command_definition() -> ParserDefinition {
        let mut definition = ParserDefinition::new("app");
        definition.add_help_option();
        definition.add_option(OptionDefinition::new("verbose", ""));
        definition.add_sub_command(
            argline_core::CommandDefinition::new("copy")
                .with_help_option()
                .with_option(OptionDefinition::new("dereference", "").with_short_name('L')),
        );
        definition
    }

    fn positional(value: &str) -> Argument {
        Argument::PositionalArgument {
            value: value.into(),
        }
    }

    fn option(name: &str, expects_value: bool) -> Argument {
        Argument::Option {
            name: name.into(),
            expects_value,
        }
    }

    fn executable() -> Argument {
        Argument::Executable { name: "app".into() }
    }

    #[test]
    fn test_empty_token_list_is_an_error() {
        let classification = classify::<&str>(&copy_definition(), &[]);
        assert_eq!(classification.error(), Some(&ParseError::EmptyCommandLine));
        assert!(classification.command_line().is_empty());
    }

    #[test]
    fn test_executable_only() {
        let classification = classify(&copy_definition(), &["app"]);
        assert!(classification.is_ok());
        assert_eq!(classification.command_line().arguments(), &[executable()]);
    }

    #[test]
    fn test_long_options() {
        let classification = classify(
            &copy_definition(),
            &["app", "--help", "--overwrite-behavior", "keep", "--overwrite-behavior=fail"],
        );
        assert!(classification.is_ok());
        assert_eq!(
            classification.command_line().arguments(),
            &[
                executable(),
                option("help", false),
                option("overwrite-behavior", true),
                Argument::OptionValue {
                    value: "keep".into()
                },
                Argument::OptionWithValue {
                    name: "overwrite-behavior".into(),
                    value: "fail".into()
                },
            ]
        );
    }

    #[test]
    fn test_value_of_option_not_expecting_one_is_ignored() {
        let classification = classify(&copy_definition(), &["app", "--help=yes"]);
        assert!(classification.is_ok());
        assert_eq!(classification.command_line().arguments()[1], option("help", false));
    }

    #[test]
    fn test_missing_long_option_value() {
        let classification = classify(&copy_definition(), &["app", "--overwrite-behavior"]);
        assert_eq!(
            classification.error(),
            Some(&ParseError::MissingOptionValue("overwrite-behavior".into()))
        );
        assert_eq!(
            classification.command_line().arguments()[1],
            option("overwrite-behavior", true)
        );
        assert_eq!(
            classification.error().map(ToString::to_string).as_deref(),
            Some("option 'overwrite-behavior' expects a value, but was not provided")
        );
    }

    #[test]
    fn test_empty_embedded_value_is_an_error() {
        let classification = classify(&copy_definition(), &["app", "--overwrite-behavior="]);
        assert_eq!(
            classification.error(),
            Some(&ParseError::MissingOptionValue("overwrite-behavior".into()))
        );
    }

    #[test]
    fn test_short_option_cluster_with_value_in_next_token() {
        let classification = classify(&copy_definition(), &["app", "-fm", "keep", "file.txt"]);
        assert!(classification.is_ok());
        assert_eq!(
            classification.command_line().arguments(),
            &[
                executable(),
                Argument::ShortOptionList {
                    names: vec!['f', 'm'],
                    last_expects_value: true
                },
                Argument::OptionValue {
                    value: "keep".into()
                },
                positional("file.txt"),
            ]
        );
    }

    #[test]
    fn test_short_option_forms() {
        let classification = classify(
            &copy_definition(),
            &["app", "-h", "-hf", "-m=keep", "-fm=fail", "-m", "overwrite"],
        );
        assert!(classification.is_ok());
        assert_eq!(
            classification.command_line().arguments(),
            &[
                executable(),
                option("h", false),
                Argument::ShortOptionList {
                    names: vec!['h', 'f'],
                    last_expects_value: false
                },
                Argument::OptionWithValue {
                    name: "m".into(),
                    value: "keep".into()
                },
                Argument::ShortOptionListWithLastHavingValue {
                    names: vec!['f', 'm'],
                    value: "fail".into()
                },
                option("m", true),
                Argument::OptionValue {
                    value: "overwrite".into()
                },
            ]
        );
    }

    #[test]
    fn test_short_option_expecting_value_must_be_last() {
        let classification = classify(&copy_definition(), &["app", "-mf"]);
        assert_eq!(classification.error(), Some(&ParseError::ShortOptionNotLast('m')));
        assert_eq!(
            classification.error().map(ToString::to_string).as_deref(),
            Some("Short option 'm' expects a value, but is not the last")
        );
    }

    #[test]
    fn test_unknown_options_continue_and_report_first() {
        let classification = classify(&copy_definition(), &["app", "--he", "-x", "file.txt"]);
        assert_eq!(classification.error(), Some(&ParseError::UnknownOption("he".into())));
        assert_eq!(classification.unknown_option_names(), &["he".to_string(), "x".to_string()]);
        assert_eq!(
            classification.command_line().arguments(),
            &[
                executable(),
                Argument::UnknownOption { name: "he".into() },
                Argument::UnknownOption { name: "x".into() },
                positional("file.txt"),
            ]
        );
    }

    #[test]
    fn test_dashes() {
        let classification = classify(&copy_definition(), &["app", "-", "--", "--help", "-f", "copy"]);
        assert!(classification.is_ok());
        assert_eq!(
            classification.command_line().arguments(),
            &[
                executable(),
                Argument::SingleDash,
                Argument::DoubleDash,
                positional("--help"),
                positional("-f"),
                positional("copy"),
            ]
        );
    }

    #[test]
    fn test_sub_command_switches_option_scope() {
        let classification = classify(
            &sub_command_definition(),
            &["app", "--verbose", "copy", "-L", "--verbose", "copy"],
        );
        assert_eq!(classification.error(), Some(&ParseError::UnknownOption("verbose".into())));
        assert_eq!(
            classification.command_line().arguments(),
            &[
                executable(),
                option("verbose", false),
                Argument::SubCommandName {
                    name: "copy".into()
                },
                option("L", false),
                Argument::UnknownOption {
                    name: "verbose".into()
                },
                positional("copy"),
            ]
        );
    }

    #[test]
    fn test_partial_sub_command_name_stays_positional() {
        let classification = classify(&sub_command_definition(), &["app", "co"]);
        assert!(classification.is_ok());
        assert_eq!(classification.command_line().arguments()[1], positional("co"));
        assert_eq!(classification.command_line().sub_command_name_index(), None);
    }

    #[test]
    fn test_double_dash_disables_sub_command_matching() {
        let classification = classify(&sub_command_definition(), &["app", "--", "copy"]);
        assert_eq!(classification.command_line().sub_command_name_index(), None);
        assert_eq!(classification.command_line().arguments()[2], positional("copy"));
    }

    #[test]
    fn test_option_value_is_never_a_sub_command_name() {
        let mut definition = sub_command_definition();
        definition.add_option(OptionDefinition::new("mode", "").with_value_name("mode"));
        let classification = classify(&definition, &["app", "--mode", "copy"]);
        assert!(classification.is_ok());
        assert_eq!(
            classification.command_line().arguments()[2],
            Argument::OptionValue {
                value: "copy".into()
            }
        );
    }

    #[test]
    fn test_classification_is_deterministic() {
        let definition = copy_definition();
        let tokens = ["app", "-fm", "keep", "--", "-x"];
        assert_eq!(classify(&definition, &tokens), classify(&definition, &tokens));
    }

    #[test]
    fn test_into_result() {
        let definition = copy_definition();
        assert!(classify(&definition, &["app", "file.txt"]).into_result().is_ok());
        assert_eq!(
            classify(&definition, &["app", "--nope"]).into_result(),
            Err(ParseError::UnknownOption("nope".into()))
        );
    }
}
