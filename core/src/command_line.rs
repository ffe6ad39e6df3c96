//! The classified command line.
//!
//! A [`CommandLine`] is the ordered list of [`Argument`]s produced by the
//! classifier. It is append-only while being built and read-only afterwards.
//! Index based queries partition the list around the (at most one)
//! sub-command name: indexes strictly before it belong to the main command,
//! indexes strictly after it belong to the sub-command.
//!
//! # Example
//!
//! ```
//! use argline_core::CommandLine;
//!
//! let mut command_line = CommandLine::new();
//! command_line.set_executable_name("app");
//! command_line.append_option("verbose");
//! command_line.append_sub_command_name("copy");
//! command_line.append_positional_argument("file.txt");
//! command_line.append_positional_argument("/tmp");
//!
//! assert_eq!(command_line.sub_command_name_index(), Some(2));
//! assert!(command_line.is_index_in_main_command(1));
//! assert!(command_line.is_index_in_sub_command(3));
//! assert_eq!(command_line.find_sub_command_positional_argument_index(4), Some(1));
//! ```

use std::ops::Range;

use serde::Serialize;

use crate::Argument;

/// An ordered sequence of classified arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CommandLine {
    arguments: Vec<Argument>,
}

impl CommandLine {
    /// Creates an empty command line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the executable name as the first argument.
    ///
    /// # Panics
    ///
    /// Panics if the command line is not empty.
    pub fn set_executable_name(&mut self, name: &str) {
        assert!(
            self.arguments.is_empty(),
            "the executable name must be the first argument"
        );
        self.arguments.push(Argument::Executable {
            name: name.to_string(),
        });
    }

    pub fn append_positional_argument(&mut self, value: &str) {
        self.push(Argument::PositionalArgument {
            value: value.to_string(),
        });
    }

    /// Appends an option that does not expect a value.
    pub fn append_option(&mut self, name: &str) {
        self.push(Argument::Option {
            name: name.to_string(),
            expects_value: false,
        });
    }

    /// Appends an option whose value is the next argument.
    pub fn append_option_expecting_value(&mut self, name: &str) {
        self.push(Argument::Option {
            name: name.to_string(),
            expects_value: true,
        });
    }

    pub fn append_unknown_option(&mut self, name: &str) {
        self.push(Argument::UnknownOption {
            name: name.to_string(),
        });
    }

    pub fn append_short_option_list(&mut self, names: Vec<char>) {
        self.push(Argument::ShortOptionList {
            names,
            last_expects_value: false,
        });
    }

    pub fn append_short_option_list_with_last_expecting_value(&mut self, names: Vec<char>) {
        self.push(Argument::ShortOptionList {
            names,
            last_expects_value: true,
        });
    }

    pub fn append_option_value(&mut self, value: &str) {
        self.push(Argument::OptionValue {
            value: value.to_string(),
        });
    }

    pub fn append_option_with_value(&mut self, name: &str, value: &str) {
        self.push(Argument::OptionWithValue {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    pub fn append_short_option_list_with_last_having_value(&mut self, names: Vec<char>, value: &str) {
        self.push(Argument::ShortOptionListWithLastHavingValue {
            names,
            value: value.to_string(),
        });
    }

    pub fn append_single_dash(&mut self) {
        self.push(Argument::SingleDash);
    }

    pub fn append_double_dash(&mut self) {
        self.push(Argument::DoubleDash);
    }

    /// Appends the sub-command name.
    ///
    /// # Panics
    ///
    /// Panics if a sub-command name was already appended.
    pub fn append_sub_command_name(&mut self, name: &str) {
        assert!(
            self.sub_command_name_index().is_none(),
            "a command line can contain only one sub-command name"
        );
        self.push(Argument::SubCommandName {
            name: name.to_string(),
        });
    }

    fn push(&mut self, argument: Argument) {
        assert!(
            !self.arguments.is_empty(),
            "the executable name must be set before other arguments"
        );
        self.arguments.push(argument);
    }

    /// Number of arguments, including the executable.
    pub fn argument_count(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// All arguments, in order.
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Returns the argument at `index`, if any.
    pub fn argument_at(&self, index: usize) -> Option<&Argument> {
        self.arguments.get(index)
    }

    /// Returns the executable name, if set.
    pub fn executable_name(&self) -> Option<&str> {
        match self.arguments.first() {
            Some(Argument::Executable { name }) => Some(name),
            _ => None,
        }
    }

    /// Index of the sub-command name, if any.
    pub fn sub_command_name_index(&self) -> Option<usize> {
        self.arguments
            .iter()
            .position(Argument::is_sub_command_name)
    }

    /// The sub-command name, if any.
    pub fn sub_command_name(&self) -> Option<&str> {
        self.arguments.iter().find_map(|argument| match argument {
            Argument::SubCommandName { name } => Some(name.as_str()),
            _ => None,
        })
    }

    /// Returns `true` if `index` lies in the main command.
    ///
    /// Without a sub-command name every index is in the main command,
    /// including indexes past the end.
    pub fn is_index_in_main_command(&self, index: usize) -> bool {
        match self.sub_command_name_index() {
            Some(sub_command_index) => index < sub_command_index,
            None => true,
        }
    }

    /// Returns `true` if `index` lies strictly after the sub-command name.
    pub fn is_index_in_sub_command(&self, index: usize) -> bool {
        self.sub_command_name_index()
            .is_some_and(|sub_command_index| index > sub_command_index)
    }

    /// Returns `true` if `index` is the index of the sub-command name.
    pub fn is_index_at_sub_command_name(&self, index: usize) -> bool {
        self.sub_command_name_index() == Some(index)
    }

    /// Range of indexes belonging to the main command, executable excluded.
    pub fn main_command_range(&self) -> Range<usize> {
        let end = self
            .sub_command_name_index()
            .unwrap_or(self.arguments.len());
        1.min(end)..end
    }

    /// Range of indexes belonging to the sub-command; empty without one.
    pub fn sub_command_range(&self) -> Range<usize> {
        match self.sub_command_name_index() {
            Some(index) => index + 1..self.arguments.len(),
            None => self.arguments.len()..self.arguments.len(),
        }
    }

    /// Counts [`Argument::PositionalArgument`] entries in `range`.
    ///
    /// The range is clamped to the command line bounds.
    pub fn positional_argument_count_in(&self, range: Range<usize>) -> usize {
        let end = range.end.min(self.arguments.len());
        let start = range.start.min(end);
        self.arguments[start..end]
            .iter()
            .filter(|argument| argument.is_positional_argument())
            .count()
    }

    /// Number of positional arguments in the main command.
    pub fn main_command_positional_argument_count(&self) -> usize {
        self.positional_argument_count_in(self.main_command_range())
    }

    /// Number of positional arguments in the sub-command.
    pub fn sub_command_positional_argument_count(&self) -> usize {
        self.positional_argument_count_in(self.sub_command_range())
    }

    /// Maps a command line index to a main-command positional index.
    ///
    /// Counts the positional arguments from the start of the main command up
    /// to and including `index`, minus one. Returns `None` if `index` is not
    /// in the main command or if no positional argument was counted.
    pub fn find_main_command_positional_argument_index(&self, index: usize) -> Option<usize> {
        if index == 0 || !self.is_index_in_main_command(index) {
            return None;
        }
        self.positional_argument_count_in(1..index + 1).checked_sub(1)
    }

    /// Maps a command line index to a sub-command positional index.
    pub fn find_sub_command_positional_argument_index(&self, index: usize) -> Option<usize> {
        if !self.is_index_in_sub_command(index) {
            return None;
        }
        let start = self.sub_command_range().start;
        self.positional_argument_count_in(start..index + 1)
            .checked_sub(1)
    }

    /// Returns the option name at `index`, if the argument there carries one.
    pub fn option_name_at(&self, index: usize) -> Option<String> {
        self.argument_at(index).and_then(Argument::option_name)
    }

    /// Returns `true` if the argument at `index` expects the next argument
    /// to be its value.
    pub fn is_index_at_option_expecting_value(&self, index: usize) -> bool {
        self.argument_at(index)
            .is_some_and(Argument::is_option_expecting_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn copy_command_line() -> CommandLine {
        // app --verbose copy --overwrite-behavior keep file.txt /tmp
        let mut command_line = CommandLine::new();
        command_line.set_executable_name("app");
        command_line.append_option("verbose");
        command_line.append_sub_command_name("copy");
        command_line.append_option_expecting_value("overwrite-behavior");
        command_line.append_option_value("keep");
        command_line.append_positional_argument("file.txt");
        command_line.append_positional_argument("/tmp");
        command_line
    }

    #[test]
    fn test_executable_is_first() {
        let command_line = copy_command_line();
        assert_eq!(command_line.executable_name(), Some("app"));
        assert_eq!(command_line.argument_count(), 7);
    }

    #[test]
    #[should_panic(expected = "executable name must be set")]
    fn test_append_without_executable_panics() {
        let mut command_line = CommandLine::new();
        command_line.append_positional_argument("file.txt");
    }

    #[test]
    #[should_panic(expected = "only one sub-command name")]
    fn test_second_sub_command_name_panics() {
        let mut command_line = copy_command_line();
        command_line.append_sub_command_name("cut");
    }

    #[test]
    fn test_partition_around_sub_command_name() {
        let command_line = copy_command_line();
        assert_eq!(command_line.sub_command_name_index(), Some(2));
        assert_eq!(command_line.sub_command_name(), Some("copy"));
        assert!(command_line.is_index_in_main_command(1));
        assert!(!command_line.is_index_in_main_command(2));
        assert!(command_line.is_index_at_sub_command_name(2));
        assert!(!command_line.is_index_in_sub_command(2));
        assert!(command_line.is_index_in_sub_command(3));
        assert_eq!(command_line.main_command_range(), 1..2);
        assert_eq!(command_line.sub_command_range(), 3..7);
    }

    #[test]
    fn test_every_index_in_main_without_sub_command() {
        let mut command_line = CommandLine::new();
        command_line.set_executable_name("app");
        command_line.append_positional_argument("file.txt");
        assert!(command_line.is_index_in_main_command(1));
        assert!(command_line.is_index_in_main_command(5));
        assert!(!command_line.is_index_in_sub_command(1));
        assert_eq!(command_line.sub_command_range(), 2..2);
    }

    #[test]
    fn test_positional_counts() {
        let command_line = copy_command_line();
        assert_eq!(command_line.main_command_positional_argument_count(), 0);
        assert_eq!(command_line.sub_command_positional_argument_count(), 2);
        assert_eq!(command_line.find_main_command_positional_argument_index(1), None);
        assert_eq!(command_line.find_sub_command_positional_argument_index(4), None);
        assert_eq!(command_line.find_sub_command_positional_argument_index(5), Some(0));
        assert_eq!(command_line.find_sub_command_positional_argument_index(6), Some(1));
    }

    #[test]
    fn test_single_dash_is_not_counted_for_positional_index() {
        let mut command_line = CommandLine::new();
        command_line.set_executable_name("app");
        command_line.append_single_dash();
        command_line.append_positional_argument("file.txt");
        assert_eq!(command_line.main_command_positional_argument_count(), 1);
        assert_eq!(command_line.find_main_command_positional_argument_index(2), Some(0));
    }

    #[test]
    fn test_option_name_and_expecting_value() {
        let command_line = copy_command_line();
        assert_eq!(command_line.option_name_at(1).as_deref(), Some("verbose"));
        assert_eq!(command_line.option_name_at(3).as_deref(), Some("overwrite-behavior"));
        assert_eq!(command_line.option_name_at(4), None);
        assert!(command_line.is_index_at_option_expecting_value(3));
        assert!(!command_line.is_index_at_option_expecting_value(1));
        assert!(!command_line.is_index_at_option_expecting_value(42));
    }

    #[test]
    fn test_positional_count_range_is_clamped() {
        let command_line = copy_command_line();
        assert_eq!(command_line.positional_argument_count_in(5..100), 2);
        assert_eq!(command_line.positional_argument_count_in(50..100), 0);
    }
}
