//! Parser definition types.
//!
//! A [`ParserDefinition`] is the static, author-supplied description of what
//! an application accepts on its command line: the options and positional
//! arguments of the main command, plus an optional list of sub-commands with
//! their own options and positional arguments.
//!
//! Builder methods assert their preconditions. Passing an invalid option name
//! or a duplicate sub-command name is a programming error and panics. Use
//! [`validate_definition`](crate::validate_definition) for definitions that
//! were deserialized instead of built in code.

use serde::{Deserialize, Serialize};

/// Semantic type of a positional argument value.
///
/// Only used to choose a shell completion action; values are never checked
/// against it.
///
/// # Examples
///
/// ```
/// use argline_core::ValueType;
///
/// assert_eq!(ValueType::default(), ValueType::Unspecified);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// No particular type (the default).
    #[default]
    Unspecified,
    /// A file path.
    File,
    /// A directory path.
    Directory,
    /// A path to either a directory or a file.
    DirectoryOrFile,
}

/// Definition of an option accepted by a command.
///
/// An option always has a long name (`--name`) and may have a single-letter
/// short name (`-n`). An option with a value name expects a value, either
/// as `--name=value` or as the next token.
///
/// # Examples
///
/// ```
/// use argline_core::OptionDefinition;
///
/// let behavior = OptionDefinition::new("overwrite-behavior", "Behavior when the destination exists")
///     .with_short_name('o')
///     .with_value_name("behavior")
///     .with_possible_values(["keep", "fail", "overwrite"]);
///
/// assert!(behavior.expects_value());
/// assert_eq!(behavior.name_with_dashes(), "--overwrite-behavior");
/// assert_eq!(behavior.short_name_with_dash().as_deref(), Some("-o"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDefinition {
    /// Single letter short name, used as `-x`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<char>,
    /// Long name without leading dashes, used as `--name`.
    pub name: String,
    /// Description shown in help text.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Name of the expected value; presence means the option expects a value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_name: Option<String>,
    /// Values offered by shell completion.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub possible_values: Vec<String>,
    /// Values used when the option is absent from the command line.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_values: Vec<String>,
}

impl OptionDefinition {
    /// Creates an option that does not expect a value.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a valid option name
    /// (see [`is_valid_name`](Self::is_valid_name)).
    pub fn new(name: &str, description: &str) -> Self {
        assert!(
            Self::is_valid_name(name),
            "invalid option name '{name}'"
        );
        Self {
            short_name: None,
            name: name.to_string(),
            description: description.to_string(),
            value_name: None,
            possible_values: Vec::new(),
            default_values: Vec::new(),
        }
    }

    /// Creates the conventional `-h, --help` option.
    ///
    /// # Examples
    ///
    /// ```
    /// use argline_core::OptionDefinition;
    ///
    /// let help = OptionDefinition::help_option();
    /// assert_eq!(help.short_name, Some('h'));
    /// assert_eq!(help.name, "help");
    /// assert!(!help.expects_value());
    /// ```
    pub fn help_option() -> Self {
        Self::new("help", "Displays help on commandline options.").with_short_name('h')
    }

    /// Sets the short name.
    ///
    /// # Panics
    ///
    /// Panics if `short_name` is not an alphabetic character.
    pub fn with_short_name(mut self, short_name: char) -> Self {
        assert!(
            Self::is_valid_short_name(short_name),
            "invalid short option name '{short_name}'"
        );
        self.short_name = Some(short_name);
        self
    }

    /// Sets the value name, making the option expect a value.
    pub fn with_value_name(mut self, value_name: &str) -> Self {
        assert!(!value_name.trim().is_empty(), "value name cannot be empty");
        self.value_name = Some(value_name.to_string());
        self
    }

    /// Sets the values offered by shell completion.
    pub fn with_possible_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.possible_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a default value.
    pub fn with_default_value(mut self, value: &str) -> Self {
        self.default_values.push(value.to_string());
        self
    }

    /// Sets all default values, replacing any previous ones.
    pub fn with_default_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` if this option expects a value.
    pub fn expects_value(&self) -> bool {
        self.value_name.is_some()
    }

    /// Returns `true` if this option has default values.
    pub fn has_default_values(&self) -> bool {
        !self.default_values.is_empty()
    }

    /// Returns the long name prefixed with `--`.
    pub fn name_with_dashes(&self) -> String {
        format!("--{}", self.name)
    }

    /// Returns the short name prefixed with `-`, if any.
    pub fn short_name_with_dash(&self) -> Option<String> {
        self.short_name.map(|c| format!("-{c}"))
    }

    /// Returns `true` if `name` is this option's long name or short name.
    ///
    /// # Examples
    ///
    /// ```
    /// use argline_core::OptionDefinition;
    ///
    /// let help = OptionDefinition::help_option();
    /// assert!(help.matches_name("help"));
    /// assert!(help.matches_name("h"));
    /// assert!(!help.matches_name("verbose"));
    /// ```
    pub fn matches_name(&self, name: &str) -> bool {
        if self.name == name {
            return true;
        }
        let mut chars = name.chars();
        match (self.short_name, chars.next(), chars.next()) {
            (Some(short_name), Some(c), None) => short_name == c,
            _ => false,
        }
    }

    /// Checks if `name` can be used as a long option name.
    ///
    /// A valid name is not blank, does not start with a dash and contains
    /// neither `/` nor `=`.
    ///
    /// # Examples
    ///
    /// ```
    /// use argline_core::OptionDefinition;
    ///
    /// assert!(OptionDefinition::is_valid_name("overwrite-behavior"));
    /// assert!(!OptionDefinition::is_valid_name(" "));
    /// assert!(!OptionDefinition::is_valid_name("--help"));
    /// assert!(!OptionDefinition::is_valid_name("a/b"));
    /// assert!(!OptionDefinition::is_valid_name("a=b"));
    /// ```
    pub fn is_valid_name(name: &str) -> bool {
        if name.trim().is_empty() {
            return false;
        }
        if name.starts_with('-') {
            return false;
        }
        !name.contains('/') && !name.contains('=')
    }

    /// Checks if `c` can be used as a short option name.
    pub fn is_valid_short_name(c: char) -> bool {
        c.is_alphabetic()
    }
}

/// A single word usable as a completion script case pattern.
fn is_valid_slot_word(name: &str) -> bool {
    !name.is_empty() && !name.contains(|c: char| c.is_whitespace() || c == ')')
}

/// Definition of a positional argument accepted by a command.
///
/// # Examples
///
/// ```
/// use argline_core::{PositionalArgumentDefinition, ValueType};
///
/// let files = PositionalArgumentDefinition::new(ValueType::File, "source", "Files to copy")
///     .with_syntax("source [source...]");
/// assert_eq!(files.usage_string(), "source [source...]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionalArgumentDefinition {
    /// Semantic type, drives shell completion.
    #[serde(default)]
    pub value_type: ValueType,
    /// Name of the argument, used in help text and completion slot names.
    pub name: String,
    /// Description shown in help text.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Display syntax used in the usage line instead of the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syntax: Option<String>,
    /// Values offered by shell completion.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub possible_values: Vec<String>,
}

impl PositionalArgumentDefinition {
    /// Creates a positional argument.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a valid name, see [`Self::is_valid_name`].
    pub fn new(value_type: ValueType, name: &str, description: &str) -> Self {
        assert!(
            Self::is_valid_name(name),
            "invalid positional argument name '{name}'"
        );
        Self {
            value_type,
            name: name.to_string(),
            description: description.to_string(),
            syntax: None,
            possible_values: Vec::new(),
        }
    }

    /// Checks if `name` can be used as a positional argument name.
    ///
    /// The name becomes part of a completion slot name, so it must not be
    /// empty and cannot contain whitespace or `)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use argline_core::PositionalArgumentDefinition;
    ///
    /// assert!(PositionalArgumentDefinition::is_valid_name("source"));
    /// assert!(!PositionalArgumentDefinition::is_valid_name(""));
    /// assert!(!PositionalArgumentDefinition::is_valid_name("source file"));
    /// assert!(!PositionalArgumentDefinition::is_valid_name("file)"));
    /// ```
    pub fn is_valid_name(name: &str) -> bool {
        is_valid_slot_word(name)
    }

    /// Sets the display syntax.
    pub fn with_syntax(mut self, syntax: &str) -> Self {
        self.syntax = Some(syntax.to_string());
        self
    }

    /// Sets the values offered by shell completion.
    pub fn with_possible_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.possible_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the string displayed for this argument in a usage line.
    pub fn usage_string(&self) -> &str {
        self.syntax.as_deref().unwrap_or(&self.name)
    }
}

/// Definition of a command: the main command or a sub-command.
///
/// The main command has an empty name. Options and positional arguments keep
/// the order in which they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDefinition {
    /// Name of the command; empty for the main command.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Description shown in help text.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Options accepted by this command.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDefinition>,
    /// Positional arguments accepted by this command.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub positional_arguments: Vec<PositionalArgumentDefinition>,
}

impl CommandDefinition {
    /// Creates a named sub-command.
    ///
    /// # Examples
    ///
    /// ```
    /// use argline_core::{CommandDefinition, OptionDefinition, ValueType};
    ///
    /// let copy = CommandDefinition::new("copy")
    ///     .with_description("Copy files")
    ///     .with_help_option()
    ///     .with_option(OptionDefinition::new("dereference", "Follow symbolic links"))
    ///     .with_positional_argument(ValueType::File, "source", "Source file")
    ///     .with_positional_argument(ValueType::Directory, "destination", "Target directory");
    ///
    /// assert_eq!(copy.options.len(), 2);
    /// assert_eq!(copy.positional_arguments[1].name, "destination");
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a valid sub-command name, see
    /// [`Self::is_valid_name`].
    pub fn new(name: &str) -> Self {
        assert!(Self::is_valid_name(name), "invalid sub-command name '{name}'");
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Checks if `name` can be used as a sub-command name.
    ///
    /// Besides the rules of
    /// [`PositionalArgumentDefinition::is_valid_name`], a sub-command name
    /// cannot start with a dash, or it would be read as an option.
    pub fn is_valid_name(name: &str) -> bool {
        is_valid_slot_word(name) && !name.starts_with('-')
    }

    /// Sets the description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Adds an option.
    pub fn with_option(mut self, option: OptionDefinition) -> Self {
        self.add_option(option);
        self
    }

    /// Adds the `-h, --help` option.
    pub fn with_help_option(mut self) -> Self {
        self.add_help_option();
        self
    }

    /// Adds a positional argument.
    pub fn with_positional_argument(
        mut self,
        value_type: ValueType,
        name: &str,
        description: &str,
    ) -> Self {
        self.add_positional_argument(PositionalArgumentDefinition::new(
            value_type,
            name,
            description,
        ));
        self
    }

    /// Appends an option.
    pub fn add_option(&mut self, option: OptionDefinition) {
        self.options.push(option);
    }

    /// Appends the `-h, --help` option.
    pub fn add_help_option(&mut self) {
        self.add_option(OptionDefinition::help_option());
    }

    /// Appends a positional argument.
    pub fn add_positional_argument(&mut self, argument: PositionalArgumentDefinition) {
        self.positional_arguments.push(argument);
    }

    /// Returns `true` if this is a named sub-command.
    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    /// Returns `true` if this command has at least one option.
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// Returns `true` if this command has at least one positional argument.
    pub fn has_positional_arguments(&self) -> bool {
        !self.positional_arguments.is_empty()
    }

    /// Number of declared positional arguments.
    pub fn positional_argument_count(&self) -> usize {
        self.positional_arguments.len()
    }

    /// Finds an option by its long name.
    pub fn find_option_by_long_name(&self, name: &str) -> Option<&OptionDefinition> {
        self.options.iter().find(|option| option.name == name)
    }

    /// Finds an option by its short name.
    pub fn find_option_by_short_name(&self, short_name: char) -> Option<&OptionDefinition> {
        self.options
            .iter()
            .find(|option| option.short_name == Some(short_name))
    }

    /// Finds an option by its long name or its short name.
    pub fn find_option(&self, name: &str) -> Option<&OptionDefinition> {
        self.options.iter().find(|option| option.matches_name(name))
    }
}

/// Complete definition of an application command line.
///
/// # Examples
///
/// ```
/// use argline_core::*;
///
/// let mut definition = ParserDefinition::new("app");
/// definition.add_help_option();
/// definition.add_option(OptionDefinition::new("verbose", "Print more messages"));
/// definition.add_sub_command(
///     CommandDefinition::new("copy")
///         .with_positional_argument(ValueType::File, "source", "Source file"),
/// );
///
/// assert!(definition.has_sub_commands());
/// assert!(definition.find_sub_command_by_name("copy").is_some());
/// assert!(definition.find_sub_command_by_name("cut").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserDefinition {
    /// Application name, used in usage text and completion script names.
    pub application_name: String,
    /// Application description shown in help text.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub application_description: String,
    /// The main command.
    #[serde(default)]
    pub main_command: CommandDefinition,
    /// Sub-commands, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_commands: Vec<CommandDefinition>,
}

impl ParserDefinition {
    /// Creates an empty definition for `application_name`.
    ///
    /// # Panics
    ///
    /// Panics if `application_name` is blank.
    pub fn new(application_name: &str) -> Self {
        assert!(
            !application_name.trim().is_empty(),
            "application name cannot be empty"
        );
        Self {
            application_name: application_name.to_string(),
            ..Default::default()
        }
    }

    /// Sets the application description.
    pub fn with_application_description(mut self, description: &str) -> Self {
        self.application_description = description.to_string();
        self
    }

    /// Appends an option to the main command.
    pub fn add_option(&mut self, option: OptionDefinition) {
        self.main_command.add_option(option);
    }

    /// Appends the `-h, --help` option to the main command.
    pub fn add_help_option(&mut self) {
        self.main_command.add_help_option();
    }

    /// Appends a positional argument to the main command.
    pub fn add_positional_argument(
        &mut self,
        value_type: ValueType,
        name: &str,
        description: &str,
    ) {
        self.main_command
            .add_positional_argument(PositionalArgumentDefinition::new(
                value_type,
                name,
                description,
            ));
    }

    /// Appends a sub-command.
    ///
    /// # Panics
    ///
    /// Panics if the sub-command has no name, or if a sub-command with the
    /// same name already exists.
    pub fn add_sub_command(&mut self, command: CommandDefinition) {
        assert!(command.has_name(), "a sub-command must have a name");
        assert!(
            self.find_sub_command_by_name(&command.name).is_none(),
            "duplicate sub-command '{}'",
            command.name
        );
        self.sub_commands.push(command);
    }

    /// Returns `true` if at least one sub-command is defined.
    pub fn has_sub_commands(&self) -> bool {
        !self.sub_commands.is_empty()
    }

    /// Finds a sub-command by its exact name.
    pub fn find_sub_command_by_name(&self, name: &str) -> Option<&CommandDefinition> {
        self.sub_commands.iter().find(|command| command.name == name)
    }

    /// Returns the names of all sub-commands, in declaration order.
    pub fn sub_command_names(&self) -> Vec<&str> {
        self.sub_commands
            .iter()
            .map(|command| command.name.as_str())
            .collect()
    }
}
