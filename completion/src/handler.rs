//! Answering completion queries.

use std::io::Write;

use argline_core::{CommandLine, ParserDefinition};
use argline_parser::classify;
use tracing::{debug, warn};

use crate::error::Result;
use crate::query::{BashCompletionQuery, is_bash_completion_invocation};

/// Resolves the name of the argument under the cursor.
///
/// The name is one of the case patterns of the generated completion script:
///
/// | Cursor on                                   | Name                  |
/// |---------------------------------------------|-----------------------|
/// | main positional argument or sub-command     | `<argument>-or-command` |
/// | main command option                         | `options`             |
/// | main command positional argument            | `<argument>`          |
/// | sub-command name                            | `command`             |
/// | sub-command option                          | `<command>-options`   |
/// | sub-command positional argument             | `<command>-<argument>` |
///
/// Anything else, option values included, resolves to an empty name.
///
/// # Examples
///
/// ```
/// use argline_completion::{BashCompletionQuery, find_current_argument_name};
/// use argline_core::{ParserDefinition, ValueType};
/// use argline_parser::classify;
///
/// let mut definition = ParserDefinition::new("app");
/// definition.add_help_option();
/// definition.add_positional_argument(ValueType::File, "source", "");
///
/// let tokens = ["app", "completion-find-current-argument", "1", "app", "--he"];
/// let classification = classify(&definition, &tokens);
/// let query = BashCompletionQuery::new(classification.command_line(), &definition);
/// assert_eq!(find_current_argument_name(&query), "options");
/// ```
pub fn find_current_argument_name(query: &BashCompletionQuery<'_>) -> String {
    let definition = query.definition();
    let main_arguments = &definition.main_command.positional_arguments;
    let main_index = query.cursor_main_command_positional_argument_index_in_definition();

    if query.comp_line_could_be_main_command_positional_argument_or_sub_command_name() {
        if let Some(argument) = main_index.and_then(|index| main_arguments.get(index)) {
            return format!("{}-or-command", argument.name);
        }
    }

    if query.is_cursor_at_main_command_option() {
        return "options".to_string();
    }

    if let Some(index) = main_index {
        if let Some(argument) = main_arguments.get(index) {
            return argument.name.clone();
        }
        if !query.is_cursor_at_sub_command_name_position() {
            return String::new();
        }
    }

    if query.is_cursor_at_sub_command_name_position() {
        return "command".to_string();
    }

    let Some(sub_command) = query.sub_command() else {
        return String::new();
    };

    if query.is_cursor_at_sub_command_option() {
        return format!("{}-options", sub_command.name);
    }

    query
        .cursor_sub_command_positional_argument_index_in_definition()
        .and_then(|index| sub_command.positional_arguments.get(index))
        .map(|argument| format!("{}-{}", sub_command.name, argument.name))
        .unwrap_or_default()
}

/// Answers a completion query on standard output.
///
/// See [`handle_bash_completion_to`].
pub fn handle_bash_completion(command_line: &CommandLine, definition: &ParserDefinition) -> Result<bool> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    handle_bash_completion_to(command_line, definition, &mut out)
}

/// Answers a completion query.
///
/// Returns `Ok(false)` if `command_line` is not a completion invocation,
/// letting the application go on with its normal work. Otherwise writes the
/// current argument name, without a trailing newline, and returns
/// `Ok(true)`; the application should then exit. An invalid query writes
/// nothing.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn handle_bash_completion_to<W: Write>(
    command_line: &CommandLine,
    definition: &ParserDefinition,
    out: &mut W,
) -> Result<bool> {
    if !is_bash_completion_invocation(command_line) {
        return Ok(false);
    }

    let Some(query) = BashCompletionQuery::try_new(command_line, definition) else {
        warn!(
            argument_count = command_line.argument_count(),
            "ignoring invalid bash completion query"
        );
        return Ok(true);
    };

    let name = find_current_argument_name(&query);
    debug!(
        cursor = query.cursor_in_comp_line_position_index(),
        name = %name,
        "resolved current argument"
    );
    out.write_all(name.as_bytes())?;
    out.flush()?;
    Ok(true)
}

/// Classifies raw `arguments` and answers them as a completion query.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn handle_bash_completion_arguments<S, W>(
    definition: &ParserDefinition,
    arguments: &[S],
    out: &mut W,
) -> Result<bool>
where
    S: AsRef<str>,
    W: Write,
{
    let classification = classify(definition, arguments);
    handle_bash_completion_to(classification.command_line(), definition, out)
}
