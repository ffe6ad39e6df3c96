//! Bash completion queries.
//!
//! The generated completion script calls the application back as
//!
//! ```text
//! app completion-find-current-argument $COMP_CWORD $COMP_LINE
//! ```
//!
//! The classified form of that command line is a *query*. Arguments from
//! index 3 on are the *comp line*, the words bash is completing, and
//! `$COMP_CWORD` is the *cursor*, an index into the comp line. All indexes
//! taken and returned by [`BashCompletionQuery`] are comp line indexes; the
//! comp line index `i` is command line index `i + 3`.
//!
//! The cursor may equal the comp line length, when the user is about to
//! type a new word. That position is *past the comp line*.

use argline_core::{Argument, CommandDefinition, CommandLine, ParserDefinition};

/// First argument of a command line asking for the current argument name.
pub const FIND_CURRENT_ARGUMENT: &str = "completion-find-current-argument";

/// Command line index of the first comp line argument.
const COMP_LINE_OFFSET: usize = 3;

fn positional_value(argument: Option<&Argument>) -> Option<&str> {
    match argument {
        Some(Argument::PositionalArgument { value }) => Some(value),
        _ => None,
    }
}

/// Returns `true` if `command_line` asks for the current argument name,
/// whether or not the rest of the query is well formed.
pub fn is_bash_completion_invocation(command_line: &CommandLine) -> bool {
    positional_value(command_line.argument_at(1)) == Some(FIND_CURRENT_ARGUMENT)
}

fn comp_cword(command_line: &CommandLine) -> Option<usize> {
    positional_value(command_line.argument_at(2))?.parse().ok()
}

/// Returns `true` if `command_line` is a well formed completion query for
/// `definition`.
///
/// A valid query has at least four arguments, the marker, the cursor and the
/// comp line executable are plain positional arguments, the cursor is a
/// non-negative integer no greater than the comp line length, and a
/// sub-command name, if present, is defined.
///
/// # Examples
///
/// ```
/// use argline_completion::is_valid_bash_completion_query;
/// use argline_core::ParserDefinition;
/// use argline_parser::classify;
///
/// let definition = ParserDefinition::new("app");
/// let query = classify(&definition, &["app", "completion-find-current-argument", "1", "app"]);
/// assert!(is_valid_bash_completion_query(query.command_line(), &definition));
///
/// let query = classify(&definition, &["app", "completion-find-current-argument", "2", "app"]);
/// assert!(!is_valid_bash_completion_query(query.command_line(), &definition));
/// ```
pub fn is_valid_bash_completion_query(command_line: &CommandLine, definition: &ParserDefinition) -> bool {
    let count = command_line.argument_count();
    if count < COMP_LINE_OFFSET + 1 {
        return false;
    }
    if !is_bash_completion_invocation(command_line)
        || positional_value(command_line.argument_at(COMP_LINE_OFFSET)).is_none()
    {
        return false;
    }
    let Some(cursor) = comp_cword(command_line) else {
        return false;
    };
    if cursor > count - COMP_LINE_OFFSET {
        return false;
    }
    match command_line.sub_command_name() {
        Some(name) => definition.find_sub_command_by_name(name).is_some(),
        None => true,
    }
}

/// Position queries over a valid completion query.
///
/// # Examples
///
/// ```
/// use argline_completion::BashCompletionQuery;
/// use argline_core::{CommandDefinition, ParserDefinition, ValueType};
/// use argline_parser::classify;
///
/// let mut definition = ParserDefinition::new("app");
/// definition.add_sub_command(
///     CommandDefinition::new("copy").with_positional_argument(ValueType::File, "source", ""),
/// );
///
/// let classification = classify(
///     &definition,
///     &["app", "completion-find-current-argument", "2", "app", "copy"],
/// );
/// let query = BashCompletionQuery::new(classification.command_line(), &definition);
///
/// assert!(query.is_cursor_past_the_comp_line());
/// assert!(query.is_cursor_in_sub_command());
/// assert_eq!(query.cursor_sub_command_positional_argument_index_in_definition(), Some(0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BashCompletionQuery<'a> {
    command_line: &'a CommandLine,
    definition: &'a ParserDefinition,
    sub_command: Option<&'a CommandDefinition>,
    cursor: usize,
}

impl<'a> BashCompletionQuery<'a> {
    /// Wraps a valid query.
    ///
    /// # Panics
    ///
    /// Panics if `command_line` is not a valid query for `definition`, see
    /// [`is_valid_bash_completion_query`].
    pub fn new(command_line: &'a CommandLine, definition: &'a ParserDefinition) -> Self {
        match Self::try_new(command_line, definition) {
            Some(query) => query,
            None => panic!("invalid bash completion query"),
        }
    }

    /// Wraps `command_line` if it is a valid query.
    pub fn try_new(command_line: &'a CommandLine, definition: &'a ParserDefinition) -> Option<Self> {
        if !is_valid_bash_completion_query(command_line, definition) {
            return None;
        }
        let cursor = comp_cword(command_line)?;
        let sub_command = command_line
            .sub_command_name()
            .and_then(|name| definition.find_sub_command_by_name(name));
        Some(Self {
            command_line,
            definition,
            sub_command,
            cursor,
        })
    }

    pub fn definition(&self) -> &'a ParserDefinition {
        self.definition
    }

    /// The sub-command definition matching the comp line sub-command name.
    pub fn sub_command(&self) -> Option<&'a CommandDefinition> {
        self.sub_command
    }

    pub fn parser_definition_has_sub_command(&self) -> bool {
        self.definition.has_sub_commands()
    }

    pub fn parser_definition_main_command_positional_argument_count(&self) -> usize {
        self.definition.main_command.positional_argument_count()
    }

    /// # Panics
    ///
    /// Panics if the comp line has no sub-command.
    pub fn parser_definition_sub_command_positional_argument_count(&self) -> usize {
        self.sub_command
            .map(CommandDefinition::positional_argument_count)
            .unwrap_or_else(|| panic!("the comp line has no sub-command"))
    }

    /// Number of words in the comp line, its executable included.
    pub fn comp_line_argument_count(&self) -> usize {
        self.command_line.argument_count() - COMP_LINE_OFFSET
    }

    pub fn cursor_in_comp_line_position_index(&self) -> usize {
        self.cursor
    }

    pub fn is_cursor_past_the_comp_line(&self) -> bool {
        self.cursor >= self.comp_line_argument_count()
    }

    pub fn comp_line_has_sub_command(&self) -> bool {
        self.sub_command.is_some()
    }

    /// Comp line index of the sub-command name.
    pub fn sub_command_name_index(&self) -> Option<usize> {
        self.command_line
            .sub_command_name_index()
            .and_then(|index| index.checked_sub(COMP_LINE_OFFSET))
    }

    fn argument_at(&self, index: usize) -> Option<&'a Argument> {
        self.command_line.argument_at(index + COMP_LINE_OFFSET)
    }

    pub fn is_comp_line_index_in_main_command(&self, index: usize) -> bool {
        self.command_line
            .is_index_in_main_command(index + COMP_LINE_OFFSET)
    }

    pub fn is_comp_line_index_in_sub_command(&self, index: usize) -> bool {
        self.command_line
            .is_index_in_sub_command(index + COMP_LINE_OFFSET)
    }

    /// Past the comp line, the cursor belongs to the main command unless the
    /// comp line has a sub-command.
    pub fn is_cursor_in_main_command(&self) -> bool {
        if self.is_cursor_past_the_comp_line() {
            return !self.comp_line_has_sub_command();
        }
        self.is_comp_line_index_in_main_command(self.cursor)
    }

    pub fn is_cursor_in_sub_command(&self) -> bool {
        if self.is_cursor_past_the_comp_line() {
            return self.comp_line_has_sub_command();
        }
        self.is_comp_line_index_in_sub_command(self.cursor)
    }

    /// Returns `true` if the cursor is on the sub-command name of the comp line.
    pub fn is_cursor_at_sub_command_name(&self) -> bool {
        !self.is_cursor_past_the_comp_line() && self.sub_command_name_index() == Some(self.cursor)
    }

    pub fn is_comp_line_index_at_option(&self, index: usize) -> bool {
        index < self.comp_line_argument_count()
            && self
                .argument_at(index)
                .is_some_and(Argument::is_bash_completion_option)
    }

    pub fn is_cursor_at_option(&self) -> bool {
        !self.is_cursor_past_the_comp_line() && self.is_comp_line_index_at_option(self.cursor)
    }

    pub fn is_cursor_at_main_command_option(&self) -> bool {
        self.is_cursor_at_option() && self.is_comp_line_index_in_main_command(self.cursor)
    }

    pub fn is_cursor_at_sub_command_option(&self) -> bool {
        self.is_cursor_at_option() && self.is_comp_line_index_in_sub_command(self.cursor)
    }

    /// Returns `true` if the argument before `index` is an option waiting for
    /// its value. `index` may be the position past the comp line.
    pub fn is_comp_line_index_at_option_value(&self, index: usize) -> bool {
        index >= 1
            && self
                .command_line
                .is_index_at_option_expecting_value(index - 1 + COMP_LINE_OFFSET)
    }

    pub fn is_comp_line_index_at_main_command_option_value(&self, index: usize) -> bool {
        self.is_comp_line_index_at_option_value(index)
            && self.is_comp_line_index_in_main_command(index - 1)
    }

    pub fn is_comp_line_index_at_sub_command_option_value(&self, index: usize) -> bool {
        self.is_comp_line_index_at_option_value(index)
            && self.is_comp_line_index_in_sub_command(index - 1)
    }

    pub fn is_cursor_at_option_value(&self) -> bool {
        self.is_comp_line_index_at_option_value(self.cursor)
    }

    pub fn is_cursor_at_main_command_option_value(&self) -> bool {
        self.is_comp_line_index_at_main_command_option_value(self.cursor)
    }

    pub fn is_cursor_at_sub_command_option_value(&self) -> bool {
        self.is_comp_line_index_at_sub_command_option_value(self.cursor)
    }

    /// Name of the option whose value is under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is not at an option value.
    pub fn option_name_related_to_current_option_value(&self) -> String {
        assert!(
            self.is_cursor_at_option_value(),
            "the cursor is not at an option value"
        );
        self.command_line
            .option_name_at(self.cursor - 1 + COMP_LINE_OFFSET)
            .unwrap_or_default()
    }

    /// Number of positional arguments of the main command in the comp line,
    /// the comp line executable excluded.
    pub fn main_command_positional_argument_count(&self) -> usize {
        let end = self
            .command_line
            .sub_command_name_index()
            .unwrap_or(self.command_line.argument_count());
        self.command_line
            .positional_argument_count_in(COMP_LINE_OFFSET + 1..end)
    }

    pub fn sub_command_positional_argument_count(&self) -> usize {
        self.command_line.sub_command_positional_argument_count()
    }

    fn positional_slot_up_to_cursor(&self, start: usize) -> Option<usize> {
        self.command_line
            .positional_argument_count_in(start..self.cursor + COMP_LINE_OFFSET + 1)
            .checked_sub(1)
    }

    /// Index in the main command definition of the positional argument under
    /// the cursor.
    ///
    /// Returns `None` if the cursor is on the comp line executable, outside
    /// the main command, on an option or option value, or past the comp line
    /// with every defined positional argument already given. On an existing
    /// word the index may exceed the definition.
    pub fn cursor_main_command_positional_argument_index_in_definition(&self) -> Option<usize> {
        if self.cursor == 0 || !self.is_cursor_in_main_command() {
            return None;
        }
        if self.is_cursor_at_option() || self.is_cursor_at_option_value() {
            return None;
        }
        if self.is_cursor_past_the_comp_line() {
            let count = self.main_command_positional_argument_count();
            if count >= self.parser_definition_main_command_positional_argument_count() {
                return None;
            }
            return Some(count);
        }
        self.positional_slot_up_to_cursor(COMP_LINE_OFFSET + 1)
    }

    /// Index in the sub-command definition of the positional argument under
    /// the cursor, with the same rules as the main command version.
    pub fn cursor_sub_command_positional_argument_index_in_definition(&self) -> Option<usize> {
        let sub_command = self.sub_command?;
        if !self.is_cursor_in_sub_command() {
            return None;
        }
        if self.is_cursor_at_option() || self.is_cursor_at_option_value() {
            return None;
        }
        if self.is_cursor_past_the_comp_line() {
            let count = self.sub_command_positional_argument_count();
            if count >= sub_command.positional_argument_count() {
                return None;
            }
            return Some(count);
        }
        let start = self.command_line.sub_command_range().start;
        self.positional_slot_up_to_cursor(start)
    }

    /// # Panics
    ///
    /// Panics if the cursor is not at a main command positional argument
    /// that the definition declares.
    pub fn cursor_main_command_positional_argument_name(&self) -> &'a str {
        let definition = self.definition;
        match self
            .cursor_main_command_positional_argument_index_in_definition()
            .and_then(|index| definition.main_command.positional_arguments.get(index))
        {
            Some(argument) => &argument.name,
            None => panic!("the cursor is not at a defined main command positional argument"),
        }
    }

    /// # Panics
    ///
    /// Panics if the cursor is not at a sub-command positional argument that
    /// the definition declares.
    pub fn cursor_sub_command_positional_argument_name(&self) -> &'a str {
        match self.sub_command.zip(
            self.cursor_sub_command_positional_argument_index_in_definition(),
        ) {
            Some((sub_command, index)) if index < sub_command.positional_argument_count() => {
                &sub_command.positional_arguments[index].name
            }
            _ => panic!("the cursor is not at a defined sub-command positional argument"),
        }
    }

    /// Returns `true` if the word under the cursor may be either a main
    /// command positional argument or a sub-command name.
    pub fn comp_line_could_be_main_command_positional_argument_or_sub_command_name(&self) -> bool {
        let defined = self.parser_definition_main_command_positional_argument_count();
        self.parser_definition_has_sub_command()
            && defined > 0
            && !self.comp_line_has_sub_command()
            && self
                .cursor_main_command_positional_argument_index_in_definition()
                .is_some_and(|index| index < defined)
    }

    /// Returns `true` if a sub-command name is what belongs under the cursor.
    ///
    /// That is the case on the sub-command name of the comp line, and
    /// without one when the cursor is on the first positional slot after all
    /// defined main command positional arguments.
    pub fn is_cursor_at_sub_command_name_position(&self) -> bool {
        if !self.parser_definition_has_sub_command() {
            return false;
        }
        if self.comp_line_has_sub_command() {
            return self.is_cursor_at_sub_command_name();
        }
        if self.cursor == 0 || self.is_cursor_at_option() || self.is_cursor_at_option_value() {
            return false;
        }
        let defined = self.parser_definition_main_command_positional_argument_count();
        if self.is_cursor_past_the_comp_line() {
            return self.main_command_positional_argument_count() >= defined;
        }
        self.positional_slot_up_to_cursor(COMP_LINE_OFFSET + 1)
            .is_some_and(|slot| slot >= defined)
    }
}
