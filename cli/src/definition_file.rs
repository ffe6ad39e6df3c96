//! Loading parser definitions from YAML or JSON files.
//!
//! Files ending in `.json` are read as JSON, anything else as YAML:
//!
//! ```yaml
//! application_name: backup
//! main_command:
//!   options:
//!     - short_name: h
//!       name: help
//!       description: Displays help on commandline options.
//!   positional_arguments:
//!     - name: config
//!       value_type: file
//! sub_commands:
//!   - name: copy
//!     positional_arguments:
//!       - name: source
//!         value_type: file
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use argline_core::{DefinitionError, ParserDefinition, validate_definition};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading a definition file.
#[derive(Debug, Error)]
pub enum DefinitionFileError {
    #[error("failed to open '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid YAML in '{}': {source}", path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid definition in '{}': {}", path.display(), join_errors(errors))]
    Invalid {
        path: PathBuf,
        errors: Vec<DefinitionError>,
    },
}

fn join_errors(errors: &[DefinitionError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"))
}

/// Reads a definition without validating it.
pub fn read_definition(path: &Path) -> Result<ParserDefinition, DefinitionFileError> {
    let file = File::open(path).map_err(|source| DefinitionFileError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let definition = if is_json(path) {
        serde_json::from_reader(reader).map_err(|source| DefinitionFileError::Json {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_yaml::from_reader(reader).map_err(|source| DefinitionFileError::Yaml {
            path: path.to_path_buf(),
            source,
        })?
    };
    Ok(definition)
}

/// Reads a definition and rejects it if validation reports any error.
pub fn load_definition(path: &Path) -> Result<ParserDefinition, DefinitionFileError> {
    let definition = read_definition(path)?;
    let errors = validate_definition(&definition);
    if !errors.is_empty() {
        return Err(DefinitionFileError::Invalid {
            path: path.to_path_buf(),
            errors,
        });
    }
    debug!(
        path = %path.display(),
        application = %definition.application_name,
        sub_commands = definition.sub_commands.len(),
        "loaded parser definition"
    );
    Ok(definition)
}
