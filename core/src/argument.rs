//! Classified command-line arguments.
//!
//! Every raw token of a command line is classified into one [`Argument`]
//! variant. The predicates on [`Argument`] are the building blocks for the
//! position-based queries of [`CommandLine`](crate::CommandLine).

use std::fmt;

use serde::Serialize;

/// A single classified command-line token.
///
/// Short option names are stored as one-character strings, so `-v` becomes
/// `Option { name: "v", .. }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Argument {
    /// The executable name, always the first argument.
    Executable { name: String },
    /// A plain value.
    PositionalArgument { value: String },
    /// The name of a defined sub-command.
    SubCommandName { name: String },
    /// A known option, `--name` or `-n`.
    Option { name: String, expects_value: bool },
    /// An option that is not defined for the current command.
    UnknownOption { name: String },
    /// Clustered short options such as `-fm`.
    ShortOptionList {
        names: Vec<char>,
        last_expects_value: bool,
    },
    /// The value consumed by the preceding option, given as the next token.
    OptionValue { value: String },
    /// An option with an embedded value, `--name=value` or `-n=value`.
    OptionWithValue { name: String, value: String },
    /// Clustered short options with an embedded value, `-fm=value`.
    ShortOptionListWithLastHavingValue { names: Vec<char>, value: String },
    /// A lone `-`.
    SingleDash,
    /// A lone `--`; every following token is positional.
    DoubleDash,
}

impl Argument {
    /// Returns `true` for [`Argument::PositionalArgument`] only.
    ///
    /// This is the predicate used for positional slot bookkeeping during
    /// completion. A lone `-` is not counted here.
    pub fn is_positional_argument(&self) -> bool {
        matches!(self, Self::PositionalArgument { .. })
    }

    /// Returns `true` for arguments that become positional values of a
    /// parser result: plain values and a lone `-`.
    ///
    /// # Examples
    ///
    /// ```
    /// use argline_core::Argument;
    ///
    /// assert!(Argument::SingleDash.is_positional_argument_value());
    /// assert!(!Argument::SingleDash.is_positional_argument());
    /// ```
    pub fn is_positional_argument_value(&self) -> bool {
        matches!(self, Self::PositionalArgument { .. } | Self::SingleDash)
    }

    /// Returns `true` if this is a sub-command name.
    pub fn is_sub_command_name(&self) -> bool {
        matches!(self, Self::SubCommandName { .. })
    }

    /// Returns `true` if this is an option value given as a separate token.
    pub fn is_option_value(&self) -> bool {
        matches!(self, Self::OptionValue { .. })
    }

    /// Returns `true` if this argument looks like an option to a shell
    /// completion user: any option form, known or not, and both dash markers.
    ///
    /// # Examples
    ///
    /// ```
    /// use argline_core::Argument;
    ///
    /// assert!(Argument::DoubleDash.is_bash_completion_option());
    /// assert!(Argument::UnknownOption { name: "he".into() }.is_bash_completion_option());
    /// assert!(!Argument::OptionValue { value: "keep".into() }.is_bash_completion_option());
    /// ```
    pub fn is_bash_completion_option(&self) -> bool {
        match self {
            Self::Option { .. }
            | Self::UnknownOption { .. }
            | Self::OptionWithValue { .. }
            | Self::ShortOptionList { .. }
            | Self::ShortOptionListWithLastHavingValue { .. }
            | Self::SingleDash
            | Self::DoubleDash => true,
            Self::Executable { .. }
            | Self::PositionalArgument { .. }
            | Self::SubCommandName { .. }
            | Self::OptionValue { .. } => false,
        }
    }

    /// Returns `true` if the next token is expected to be this option's value.
    pub fn is_option_expecting_value(&self) -> bool {
        match self {
            Self::Option { expects_value, .. } => *expects_value,
            Self::ShortOptionList {
                last_expects_value, ..
            } => *last_expects_value,
            _ => false,
        }
    }

    /// Returns the option name carried by this argument.
    ///
    /// For short option lists this is the last option of the list, the one
    /// that may take a value.
    pub fn option_name(&self) -> Option<String> {
        match self {
            Self::Option { name, .. }
            | Self::UnknownOption { name }
            | Self::OptionWithValue { name, .. } => Some(name.clone()),
            Self::ShortOptionList { names, .. }
            | Self::ShortOptionListWithLastHavingValue { names, .. } => {
                names.last().map(char::to_string)
            }
            _ => None,
        }
    }
}

fn write_option_name(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if name.chars().count() == 1 {
        write!(f, "-{name}")
    } else {
        write!(f, "--{name}")
    }
}

/// Formats the argument back into command-line syntax.
///
/// Option names are written with one dash when they are a single character
/// and with two dashes otherwise, whatever the source token used. An
/// unknown cluster `-xz` is therefore written `--xz`, and an unknown `--v`
/// is written `-v`.
impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Executable { name } => f.write_str(name),
            Self::PositionalArgument { value } | Self::OptionValue { value } => f.write_str(value),
            Self::SubCommandName { name } => f.write_str(name),
            Self::Option { name, .. } | Self::UnknownOption { name } => write_option_name(f, name),
            Self::OptionWithValue { name, value } => {
                write_option_name(f, name)?;
                write!(f, "={value}")
            }
            Self::ShortOptionList { names, .. } => {
                write!(f, "-{}", names.iter().collect::<String>())
            }
            Self::ShortOptionListWithLastHavingValue { names, value } => {
                write!(f, "-{}={value}", names.iter().collect::<String>())
            }
            Self::SingleDash => f.write_str("-"),
            Self::DoubleDash => f.write_str("--"),
        }
    }
}
