//! `compgen` command lines.

use std::fmt;

use argline_core::ValueType;

/// A `compgen -A` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompgenAction {
    ListFiles,
    ListDirectories,
}

impl CompgenAction {
    /// The action completing values of `value_type`, if there is one.
    ///
    /// Files are listed for both [`ValueType::File`] and
    /// [`ValueType::DirectoryOrFile`], since `-A file` includes directories.
    pub fn from_value_type(value_type: ValueType) -> Option<Self> {
        match value_type {
            ValueType::File | ValueType::DirectoryOrFile => Some(Self::ListFiles),
            ValueType::Directory => Some(Self::ListDirectories),
            ValueType::Unspecified => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ListFiles => "file",
            Self::ListDirectories => "directory",
        }
    }
}

/// One argument of a `compgen` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompgenArgument {
    /// `-A <action>`
    Action(CompgenAction),
    /// `-W "<words>"`
    WordList(Vec<String>),
}

impl fmt::Display for CompgenArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action(action) => write!(f, "-A {}", action.as_str()),
            Self::WordList(words) => write!(f, "-W \"{}\"", words.join(" ")),
        }
    }
}

/// A `compgen` command completing the word in `$cur`.
///
/// # Examples
///
/// ```
/// use argline_completion::{CompgenAction, CompgenCommand};
///
/// let mut command = CompgenCommand::new();
/// command.add_action(CompgenAction::ListFiles);
/// command.add_word_list(["--help", "--verbose"]);
///
/// assert_eq!(
///     command.to_compreply_string(),
///     r#"COMPREPLY=($(compgen -A file -W "--help --verbose" -- "$cur"))"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompgenCommand {
    arguments: Vec<CompgenArgument>,
}

impl CompgenCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_action(&mut self, action: CompgenAction) {
        self.arguments.push(CompgenArgument::Action(action));
    }

    /// Adds a word list; an empty list adds nothing.
    pub fn add_word_list<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if !words.is_empty() {
            self.arguments.push(CompgenArgument::WordList(words));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    pub fn arguments(&self) -> &[CompgenArgument] {
        &self.arguments
    }

    /// `compgen <arguments> -- "$cur"`
    pub fn to_compgen_command_string(&self) -> String {
        let mut command = String::from("compgen");
        for argument in &self.arguments {
            command.push(' ');
            command.push_str(&argument.to_string());
        }
        command.push_str(" -- \"$cur\"");
        command
    }

    /// `COMPREPLY=($(compgen ...))`
    pub fn to_compreply_string(&self) -> String {
        format!("COMPREPLY=($({}))", self.to_compgen_command_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_from_value_type() {
        assert_eq!(CompgenAction::from_value_type(ValueType::File), Some(CompgenAction::ListFiles));
        assert_eq!(
            CompgenAction::from_value_type(ValueType::DirectoryOrFile),
            Some(CompgenAction::ListFiles)
        );
        assert_eq!(
            CompgenAction::from_value_type(ValueType::Directory),
            Some(CompgenAction::ListDirectories)
        );
        assert_eq!(CompgenAction::from_value_type(ValueType::Unspecified), None);
    }

    #[test]
    fn test_empty_word_list_is_skipped() {
        let mut command = CompgenCommand::new();
        command.add_word_list(Vec::<String>::new());
        assert!(command.is_empty());
        assert_eq!(command.to_compgen_command_string(), r#"compgen -- "$cur""#);
    }

    #[test]
    fn test_directory_action() {
        let mut command = CompgenCommand::new();
        command.add_action(CompgenAction::ListDirectories);
        assert_eq!(
            command.to_compgen_command_string(),
            r#"compgen -A directory -- "$cur""#
        );
    }
}
