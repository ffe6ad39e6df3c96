mod definition_file;
mod log;

use std::path::{Path, PathBuf};

use argline_completion::{
    FIND_CURRENT_ARGUMENT, handle_bash_completion_arguments, script_from_definition,
    write_script_to_directory,
};
use argline_core::{ParserDefinition, validate_definition};
use argline_parser::parse;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::definition_file::{load_definition, read_definition};

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "argline")]
#[command(about = "Command-line parsing and bash completion from parser definition files")]
#[command(disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check a parser definition file.
    Validate(DefinitionArgs),
    /// Print the help text of the application or of one of its sub-commands.
    Help(HelpArgs),
    /// Parse a command line against a definition and print the result.
    Parse(ParseArgs),
    /// Print or write the bash completion script of a definition.
    CompletionScript(CompletionScriptArgs),
    /// Answer a completion query the way the application would.
    Complete(CompleteArgs),
}

#[derive(Debug, Args)]
struct DefinitionArgs {
    /// Parser definition file (YAML, or JSON with a .json extension).
    #[arg(long)]
    definition: PathBuf,
}

#[derive(Debug, Args)]
struct HelpArgs {
    /// Parser definition file (YAML, or JSON with a .json extension).
    #[arg(long)]
    definition: PathBuf,
    /// Sub-command to describe instead of the application.
    #[arg(long)]
    command: Option<String>,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Parser definition file (YAML, or JSON with a .json extension).
    #[arg(long)]
    definition: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Arguments of the application, after `--`.
    #[arg(last = true, allow_hyphen_values = true)]
    arguments: Vec<String>,
}

#[derive(Debug, Args)]
struct CompletionScriptArgs {
    /// Parser definition file (YAML, or JSON with a .json extension).
    #[arg(long)]
    definition: PathBuf,
    /// Directory to write `<app>-completion.bash` to; prints the script if omitted.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct CompleteArgs {
    /// Parser definition file (YAML, or JSON with a .json extension).
    #[arg(long)]
    definition: PathBuf,
    /// `$COMP_CWORD $COMP_LINE`, after `--`.
    #[arg(last = true, allow_hyphen_values = true)]
    query: Vec<String>,
}

fn main() {
    log::init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Validate(args) => run_validate(args),
        Command::Help(args) => run_help(args),
        Command::Parse(args) => run_parse(args),
        Command::CompletionScript(args) => run_completion_script(args),
        Command::Complete(args) => run_complete(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn load(path: &Path) -> Result<ParserDefinition, String> {
    load_definition(path).map_err(|err| err.to_string())
}

fn run_validate(args: DefinitionArgs) -> Result<(), String> {
    let definition = read_definition(&args.definition).map_err(|err| err.to_string())?;
    let errors = validate_definition(&definition);
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("  - {error}");
        }
        return Err(format!(
            "{} problem(s) in '{}'",
            errors.len(),
            args.definition.display()
        ));
    }

    println!(
        "Definition '{}' is valid: {} option(s), {} positional argument(s), {} sub-command(s).",
        definition.application_name,
        definition.main_command.options.len(),
        definition.main_command.positional_argument_count(),
        definition.sub_commands.len()
    );
    Ok(())
}

fn run_help(args: HelpArgs) -> Result<(), String> {
    let definition = load(&args.definition)?;
    let text = match args.command.as_deref() {
        Some(name) => definition
            .find_sub_command_by_name(name)
            .ok_or_else(|| format!("unknown sub-command '{name}'"))?
            .help_text(&definition.application_name),
        None => definition.help_text(),
    };
    print!("{text}");
    Ok(())
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let definition = load(&args.definition)?;
    let mut tokens = Vec::with_capacity(args.arguments.len() + 1);
    tokens.push(definition.application_name.clone());
    tokens.extend(args.arguments);

    let result = parse(&definition, &tokens).map_err(|err| err.to_string())?;
    println!("{}", format_output(&result, args.format)?);
    Ok(())
}

fn run_completion_script(args: CompletionScriptArgs) -> Result<(), String> {
    let definition = load(&args.definition)?;
    match args.output_dir {
        Some(directory) => {
            let path =
                write_script_to_directory(&definition, &directory).map_err(|err| err.to_string())?;
            println!("Wrote completion script to '{}'.", path.display());
        }
        None => print!("{}", script_from_definition(&definition)),
    }
    Ok(())
}

fn run_complete(args: CompleteArgs) -> Result<(), String> {
    let definition = load(&args.definition)?;
    let mut tokens = vec![
        definition.application_name.clone(),
        FIND_CURRENT_ARGUMENT.to_string(),
    ];
    tokens.extend(args.query);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    handle_bash_completion_arguments(&definition, &tokens, &mut out).map_err(|err| err.to_string())?;
    Ok(())
}

fn format_output<T: Serialize>(value: &T, format: CliOutputFormat) -> Result<String, String> {
    match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|err| format!("Failed to serialize JSON output: {err}")),
        CliOutputFormat::Yaml => serde_yaml::to_string(value)
            .map_err(|err| format!("Failed to serialize YAML output: {err}")),
    }
}
