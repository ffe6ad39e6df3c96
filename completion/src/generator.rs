//! Completion script generation from a parser definition.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use argline_core::{CommandDefinition, ParserDefinition, PositionalArgumentDefinition};
use tracing::{debug, info};

use crate::compgen::{CompgenAction, CompgenCommand};
use crate::error::{CompletionError, Result};
use crate::script::Script;

/// `-x --long` words for every option of `command`.
fn option_words(command: &CommandDefinition) -> Vec<String> {
    let mut words = Vec::with_capacity(command.options.len() * 2);
    for option in &command.options {
        if let Some(short_name) = option.short_name_with_dash() {
            words.push(short_name);
        }
        words.push(option.name_with_dashes());
    }
    words
}

fn add_argument_completion(compgen: &mut CompgenCommand, argument: &PositionalArgumentDefinition) {
    if let Some(action) = CompgenAction::from_value_type(argument.value_type) {
        compgen.add_action(action);
    }
}

fn has_argument_completion(argument: &PositionalArgumentDefinition) -> bool {
    CompgenAction::from_value_type(argument.value_type).is_some() || !argument.possible_values.is_empty()
}

/// Adds the `options` and positional argument clauses of one command.
///
/// The first positional argument also completes the command options, so a
/// user can start typing either.
fn add_command_clauses(script: &mut Script, command: &CommandDefinition) {
    let prefix = if command.has_name() {
        format!("{}-", command.name)
    } else {
        String::new()
    };

    if command.has_options() {
        let mut compgen = CompgenCommand::new();
        compgen.add_word_list(option_words(command));
        script.add_compgen_clause(&format!("{prefix}options"), &compgen);
    }

    for (index, argument) in command.positional_arguments.iter().enumerate() {
        if !has_argument_completion(argument) {
            continue;
        }
        let mut compgen = CompgenCommand::new();
        add_argument_completion(&mut compgen, argument);
        let mut words = argument.possible_values.clone();
        if index == 0 {
            words.extend(option_words(command));
        }
        compgen.add_word_list(words);
        script.add_compgen_clause(&format!("{prefix}{}", argument.name), &compgen);
    }
}

/// Builds the completion script for `definition`.
///
/// Clauses appear in this order: the main command, the
/// `<argument>-or-command` and `command` clauses when sub-commands exist,
/// each sub-command, then the catch-all clause. Patterns match the names
/// returned by [`find_current_argument_name`](crate::find_current_argument_name).
///
/// No clause is keyed `options-or-<argument>`, `commands` or
/// `options-or-commands`, since the application never reports those names.
/// Their completions are merged into other clauses instead:
///
/// | Completions                          | Clause                              |
/// |--------------------------------------|-------------------------------------|
/// | options or first positional argument | `<argument>`, `<command>-<argument>` |
/// | sub-command names                    | `command`                           |
/// | options or sub-command names         | `command`, `<argument>-or-command`  |
pub fn script_from_definition(definition: &ParserDefinition) -> Script {
    let mut script = Script::new(&definition.application_name);
    let main_command = &definition.main_command;

    add_command_clauses(&mut script, main_command);

    if definition.has_sub_commands() {
        let sub_command_names: Vec<String> = definition
            .sub_command_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        if let Some(argument) = main_command.positional_arguments.first() {
            let mut compgen = CompgenCommand::new();
            add_argument_completion(&mut compgen, argument);
            let mut words = argument.possible_values.clone();
            words.extend(option_words(main_command));
            words.extend(sub_command_names.iter().cloned());
            compgen.add_word_list(words);
            script.add_compgen_clause(&format!("{}-or-command", argument.name), &compgen);
        }

        let mut compgen = CompgenCommand::new();
        let mut words = option_words(main_command);
        words.extend(sub_command_names);
        compgen.add_word_list(words);
        script.add_compgen_clause("command", &compgen);

        for sub_command in &definition.sub_commands {
            add_command_clauses(&mut script, sub_command);
        }
    }

    script.add_default_clause();
    debug!(
        application = %definition.application_name,
        clause_count = script.clauses().len(),
        "generated completion script"
    );
    script
}

/// Path of the completion script of `application_name` in `directory`.
pub fn script_file_path(directory: &Path, application_name: &str) -> PathBuf {
    directory.join(format!("{application_name}-completion.bash"))
}

/// Writes the completion script to `<directory>/<app>-completion.bash`.
///
/// Returns the path of the written file.
///
/// # Errors
///
/// Returns [`CompletionError::OpenScriptFile`] if the file cannot be
/// created and [`CompletionError::WriteScriptFile`] if writing it fails.
pub fn write_script_to_directory(definition: &ParserDefinition, directory: &Path) -> Result<PathBuf> {
    let path = script_file_path(directory, &definition.application_name);
    let script = script_from_definition(definition).to_string();

    let file = File::create(&path).map_err(|source| CompletionError::OpenScriptFile {
        path: path.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(script.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|source| CompletionError::WriteScriptFile {
            path: path.clone(),
            source,
        })?;

    info!(path = %path.display(), "wrote completion script");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argline_core::{OptionDefinition, ValueType};

    fn clause_command<'a>(script: &'a Script, pattern: &str) -> &'a str {
        script
            .find_clause(pattern)
            .and_then(|clause| clause.command())
            .unwrap_or_else(|| panic!("no clause for '{pattern}'"))
    }

    #[test]
    fn test_option_words() {
        let command = CommandDefinition::new("copy")
            .with_help_option()
            .with_option(OptionDefinition::new("dereference", ""));
        assert_eq!(option_words(&command), vec!["-h", "--help", "--dereference"]);
    }

    #[test]
    fn test_simple_application_clauses() {
        let mut definition = ParserDefinition::new("app");
        definition.add_help_option();
        definition.add_positional_argument(ValueType::File, "source", "");
        definition.add_positional_argument(ValueType::Directory, "destination", "");
        definition.add_positional_argument(ValueType::Unspecified, "comment", "");

        let script = script_from_definition(&definition);
        let patterns: Vec<&str> = script.clauses().iter().map(|clause| clause.pattern()).collect();
        assert_eq!(patterns, vec!["options", "source", "destination", "*"]);

        assert_eq!(
            clause_command(&script, "options"),
            r#"COMPREPLY=($(compgen -W "-h --help" -- "$cur"))"#
        );
        assert_eq!(
            clause_command(&script, "source"),
            r#"COMPREPLY=($(compgen -A file -W "-h --help" -- "$cur"))"#
        );
        assert_eq!(
            clause_command(&script, "destination"),
            r#"COMPREPLY=($(compgen -A directory -- "$cur"))"#
        );
    }

    #[test]
    fn test_sub_command_clauses() {
        let mut definition = ParserDefinition::new("app");
        definition.add_help_option();
        definition.add_positional_argument(ValueType::File, "config", "");
        definition.add_sub_command(
            CommandDefinition::new("copy")
                .with_option(OptionDefinition::new("verbose", "").with_short_name('v'))
                .with_positional_argument(ValueType::DirectoryOrFile, "source", ""),
        );
        definition.add_sub_command(CommandDefinition::new("list"));

        let script = script_from_definition(&definition);
        let patterns: Vec<&str> = script.clauses().iter().map(|clause| clause.pattern()).collect();
        assert_eq!(
            patterns,
            vec!["options", "config", "config-or-command", "command", "copy-options", "copy-source", "*"]
        );
        assert_eq!(
            clause_command(&script, "config-or-command"),
            r#"COMPREPLY=($(compgen -A file -W "-h --help copy list" -- "$cur"))"#
        );
        assert_eq!(
            clause_command(&script, "command"),
            r#"COMPREPLY=($(compgen -W "-h --help copy list" -- "$cur"))"#
        );
        assert_eq!(
            clause_command(&script, "copy-source"),
            r#"COMPREPLY=($(compgen -A file -W "-v --verbose" -- "$cur"))"#
        );
    }

    #[test]
    fn test_possible_values_become_word_list() {
        let mut definition = ParserDefinition::new("app");
        definition.main_command.add_positional_argument(
            PositionalArgumentDefinition::new(ValueType::Unspecified, "mode", "")
                .with_possible_values(["fast", "safe"]),
        );
        let script = script_from_definition(&definition);
        assert_eq!(
            clause_command(&script, "mode"),
            r#"COMPREPLY=($(compgen -W "fast safe" -- "$cur"))"#
        );
    }

    #[test]
    fn test_script_file_path() {
        assert_eq!(
            script_file_path(Path::new("/tmp"), "app"),
            PathBuf::from("/tmp/app-completion.bash")
        );
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let directory = tempfile::tempdir().unwrap();
        let missing = directory.path().join("missing");
        let definition = ParserDefinition::new("app");

        let error = write_script_to_directory(&definition, &missing).unwrap_err();
        assert!(matches!(error, CompletionError::OpenScriptFile { .. }));
        assert!(error.to_string().starts_with("open file '"));
    }
}
