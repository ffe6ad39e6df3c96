//! Bash completion script model.
//!
//! A [`Script`] holds one completion function whose body is a `case`
//! statement over the current argument name the application reports. Each
//! [`ScriptCaseClause`] sets `COMPREPLY` for one name.

use std::fmt;

use crate::compgen::CompgenCommand;
use crate::query::FIND_CURRENT_ARGUMENT;

/// One clause of the completion `case` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptCaseClause {
    pattern: String,
    command: Option<String>,
}

impl ScriptCaseClause {
    /// Creates a clause running `command` for `pattern`.
    ///
    /// # Panics
    ///
    /// Panics if the pattern is empty or contains `)`, or if the command is
    /// empty.
    pub fn new(pattern: &str, command: &str) -> Self {
        assert!(Self::is_valid_pattern(pattern), "invalid case pattern '{pattern}'");
        assert!(!command.trim().is_empty(), "case clause command cannot be empty");
        Self {
            pattern: pattern.to_string(),
            command: Some(command.to_string()),
        }
    }

    /// The catch-all `*)` clause, doing nothing.
    pub fn default_clause() -> Self {
        Self {
            pattern: "*".to_string(),
            command: None,
        }
    }

    pub fn is_valid_pattern(pattern: &str) -> bool {
        !pattern.is_empty() && !pattern.contains(')')
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }
}

impl fmt::Display for ScriptCaseClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "    {})", self.pattern)?;
        if let Some(command) = &self.command {
            writeln!(f, "      {command}")?;
        }
        write!(f, "      ;;")
    }
}

/// A `local` variable of the completion function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptVariable {
    pub name: String,
    pub initialization: String,
}

impl fmt::Display for ScriptVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  local {}={}", self.name, self.initialization)
    }
}

/// A bash completion script for one application.
///
/// # Examples
///
/// ```
/// use argline_completion::Script;
///
/// let mut script = Script::new("app");
/// script.add_clause("options", r#"COMPREPLY=($(compgen -W "--help" -- "$cur"))"#);
/// script.add_default_clause();
///
/// let text = script.to_string();
/// assert!(text.starts_with("#!/usr/bin/env bash\n\n_app_completions()\n{\n"));
/// assert!(text.ends_with("complete -F _app_completions app\n"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    application_name: String,
    variables: Vec<ScriptVariable>,
    case_expression: String,
    clauses: Vec<ScriptCaseClause>,
}

impl Script {
    /// Creates a script with no clauses for `application_name`.
    pub fn new(application_name: &str) -> Self {
        let variables = vec![
            ScriptVariable {
                name: "cur".to_string(),
                initialization: "\"${COMP_WORDS[COMP_CWORD]}\"".to_string(),
            },
            ScriptVariable {
                name: "executable".to_string(),
                initialization: "\"$1\"".to_string(),
            },
            ScriptVariable {
                name: "currentArgument".to_string(),
                initialization: format!(
                    "$(\"$executable\" {FIND_CURRENT_ARGUMENT} $COMP_CWORD $COMP_LINE)"
                ),
            },
        ];
        Self {
            application_name: application_name.to_string(),
            variables,
            case_expression: "$currentArgument".to_string(),
            clauses: Vec::new(),
        }
    }

    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    /// Name of the completion function, `_<app>_completions`.
    pub fn function_name(&self) -> String {
        format!("_{}_completions", self.application_name)
    }

    pub fn add_clause(&mut self, pattern: &str, command: &str) {
        self.clauses.push(ScriptCaseClause::new(pattern, command));
    }

    /// Adds a clause setting `COMPREPLY` from `compgen`.
    pub fn add_compgen_clause(&mut self, pattern: &str, compgen: &CompgenCommand) {
        self.add_clause(pattern, &compgen.to_compreply_string());
    }

    pub fn add_default_clause(&mut self) {
        self.clauses.push(ScriptCaseClause::default_clause());
    }

    pub fn clauses(&self) -> &[ScriptCaseClause] {
        &self.clauses
    }

    /// Finds the clause for `pattern`.
    pub fn find_clause(&self, pattern: &str) -> Option<&ScriptCaseClause> {
        self.clauses.iter().find(|clause| clause.pattern == pattern)
    }

    /// `complete -F _<app>_completions <app>`
    pub fn complete_command_string(&self) -> String {
        format!("complete -F {} {}", self.function_name(), self.application_name)
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#!/usr/bin/env bash")?;
        writeln!(f)?;
        writeln!(f, "{}()", self.function_name())?;
        writeln!(f, "{{")?;
        for variable in &self.variables {
            writeln!(f, "{variable}")?;
        }
        writeln!(f)?;
        writeln!(f, "  case \"{}\" in", self.case_expression)?;
        writeln!(f)?;
        for clause in &self.clauses {
            writeln!(f, "{clause}")?;
            writeln!(f)?;
        }
        writeln!(f, "  esac")?;
        writeln!(f, "}}")?;
        writeln!(f)?;
        writeln!(f, "{}", self.complete_command_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clause_text() {
        let clause = ScriptCaseClause::new("options", "COMPREPLY=()");
        assert_eq!(clause.to_string(), "    options)\n      COMPREPLY=()\n      ;;");
        assert_eq!(ScriptCaseClause::default_clause().to_string(), "    *)\n      ;;");
    }

    #[test]
    fn test_pattern_validity() {
        assert!(ScriptCaseClause::is_valid_pattern("copy-source"));
        assert!(!ScriptCaseClause::is_valid_pattern(""));
        assert!(!ScriptCaseClause::is_valid_pattern("bad)"));
    }

    #[test]
    #[should_panic(expected = "invalid case pattern")]
    fn test_invalid_pattern_panics() {
        ScriptCaseClause::new("a)b", "COMPREPLY=()");
    }

    #[test]
    fn test_empty_script_text() {
        let mut script = Script::new("app");
        script.add_default_clause();
        let expected = concat!(
            "#!/usr/bin/env bash\n",
            "\n",
            "_app_completions()\n",
            "{\n",
            "  local cur=\"${COMP_WORDS[COMP_CWORD]}\"\n",
            "  local executable=\"$1\"\n",
            "  local currentArgument=$(\"$executable\" completion-find-current-argument $COMP_CWORD $COMP_LINE)\n",
            "\n",
            "  case \"$currentArgument\" in\n",
            "\n",
            "    *)\n",
            "      ;;\n",
            "\n",
            "  esac\n",
            "}\n",
            "\n",
            "complete -F _app_completions app\n",
        );
        assert_eq!(script.to_string(), expected);
    }

    #[test]
    fn test_find_clause() {
        let mut script = Script::new("app");
        script.add_clause("options", "COMPREPLY=()");
        assert_eq!(script.find_clause("options").and_then(ScriptCaseClause::command), Some("COMPREPLY=()"));
        assert!(script.find_clause("command").is_none());
    }
}
