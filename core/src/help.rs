//! Help text generation.
//!
//! Produces the usage line and the `Options:`, `Arguments:` and `Commands:`
//! sections. Names are left-aligned in a column as wide as the longest name
//! of the section; descriptions are not wrapped.

use crate::{CommandDefinition, OptionDefinition, ParserDefinition, PositionalArgumentDefinition};

const INDENT: &str = "  ";

impl ParserDefinition {
    /// Returns the usage line of the main command.
    ///
    /// # Examples
    ///
    /// ```
    /// use argline_core::*;
    ///
    /// let mut definition = ParserDefinition::new("app");
    /// definition.add_help_option();
    /// definition.add_positional_argument(ValueType::File, "source", "");
    /// definition.add_sub_command(CommandDefinition::new("copy"));
    ///
    /// assert_eq!(definition.usage_text(), "Usage: app [options] source command");
    /// ```
    pub fn usage_text(&self) -> String {
        let mut text = format!("Usage: {}", self.application_name);
        if self.main_command.has_options() {
            text.push_str(" [options]");
        }
        if self.main_command.has_positional_arguments() {
            text.push(' ');
            text.push_str(&arguments_usage_string(&self.main_command.positional_arguments));
        }
        if self.has_sub_commands() {
            text.push_str(" command");
        }
        text
    }

    /// Returns the complete help text of the main command.
    pub fn help_text(&self) -> String {
        let mut sections = vec![self.usage_text()];
        if !self.application_description.is_empty() {
            sections.push(self.application_description.clone());
        }
        if self.main_command.has_options() {
            sections.push(options_help_text(&self.main_command.options));
        }
        if self.main_command.has_positional_arguments() {
            sections.push(arguments_help_text(&self.main_command.positional_arguments));
        }
        if self.has_sub_commands() {
            sections.push(sub_commands_help_text(&self.sub_commands));
        }
        join_sections(sections)
    }
}

impl CommandDefinition {
    /// Returns the usage line of this sub-command.
    pub fn usage_text(&self, application_name: &str) -> String {
        let mut text = format!("Usage: {application_name} {}", self.name);
        if self.has_options() {
            text.push_str(" [options]");
        }
        if self.has_positional_arguments() {
            text.push(' ');
            text.push_str(&arguments_usage_string(&self.positional_arguments));
        }
        text
    }

    /// Returns the complete help text of this sub-command.
    ///
    /// # Examples
    ///
    /// ```
    /// use argline_core::*;
    ///
    /// let copy = CommandDefinition::new("copy")
    ///     .with_help_option()
    ///     .with_positional_argument(ValueType::File, "source", "Source file");
    ///
    /// let help = copy.help_text("app");
    /// assert!(help.starts_with("Usage: app copy [options] source\n"));
    /// assert!(help.contains("  -h, --help  Displays help on commandline options.\n"));
    /// assert!(help.contains("  source  Source file\n"));
    /// ```
    pub fn help_text(&self, application_name: &str) -> String {
        let mut sections = vec![self.usage_text(application_name)];
        if !self.description.is_empty() {
            sections.push(self.description.clone());
        }
        if self.has_options() {
            sections.push(options_help_text(&self.options));
        }
        if self.has_positional_arguments() {
            sections.push(arguments_help_text(&self.positional_arguments));
        }
        join_sections(sections)
    }
}

fn join_sections(sections: Vec<String>) -> String {
    let mut text = sections.join("\n\n");
    text.push('\n');
    text
}

fn arguments_usage_string(arguments: &[PositionalArgumentDefinition]) -> String {
    arguments
        .iter()
        .map(PositionalArgumentDefinition::usage_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn option_names_string(option: &OptionDefinition) -> String {
    let mut names = match option.short_name_with_dash() {
        Some(short_name) => format!("{short_name}, {}", option.name_with_dashes()),
        None => option.name_with_dashes(),
    };
    if let Some(value_name) = &option.value_name {
        names.push_str(&format!(" <{value_name}>"));
    }
    names
}

fn aligned_line(names: &str, width: usize, description: &str) -> String {
    if description.is_empty() {
        return format!("{INDENT}{names}");
    }
    format!("{INDENT}{names:<width$}{INDENT}{description}")
}

fn aligned_section<'a, I>(title: &str, rows: I) -> String
where
    I: IntoIterator<Item = (String, &'a str)>,
{
    let rows: Vec<(String, &str)> = rows.into_iter().collect();
    let width = rows
        .iter()
        .map(|(names, _)| names.chars().count())
        .max()
        .unwrap_or(0);

    let mut text = title.to_string();
    for (names, description) in &rows {
        text.push('\n');
        text.push_str(&aligned_line(names, width, description));
    }
    text
}

fn options_help_text(options: &[OptionDefinition]) -> String {
    aligned_section(
        "Options:",
        options
            .iter()
            .map(|option| (option_names_string(option), option.description.as_str())),
    )
}

fn arguments_help_text(arguments: &[PositionalArgumentDefinition]) -> String {
    aligned_section(
        "Arguments:",
        arguments
            .iter()
            .map(|argument| (argument.name.clone(), argument.description.as_str())),
    )
}

fn sub_commands_help_text(commands: &[CommandDefinition]) -> String {
    aligned_section(
        "Commands:",
        commands
            .iter()
            .map(|command| (command.name.clone(), command.description.as_str())),
    )
}
