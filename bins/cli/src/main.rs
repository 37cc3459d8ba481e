//! CLI binary entrypoint.

mod commands;
mod error;
mod format;
mod logging;

use clap::{Args, Parser, Subcommand};
use commands::{
    SettingsEncoding, run_forms, run_info, run_merge, run_settings_schema, run_settings_show,
    run_validate,
};
use error::{CliError, ExitCode};
use fieldset_config::{ValidatedSettings, load_settings_std_env};
use fieldset_schema::Validator;
use format::{OutputArgs, OutputMode, format_error};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "fieldset",
    version,
    about = "Validate and compose field configuration trees",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    settings: SettingsArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Settings sources shared by every command.
#[derive(Debug, Args)]
struct SettingsArgs {
    /// Settings file (JSON/TOML).
    #[arg(long = "settings", global = true)]
    path: Option<PathBuf>,
    /// Partial settings as JSON, deep-merged over the file.
    #[arg(long = "settings-json", global = true)]
    overrides_json: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show build and version details.
    Info,
    /// Validate field documents (JSON/TOML/YAML).
    Validate {
        /// Document to validate; repeat for several.
        #[arg(long = "path", required = true, num_args = 1..)]
        paths: Vec<PathBuf>,
    },
    /// Deep-merge override documents onto a base document.
    Merge {
        /// Base document.
        #[arg(long)]
        base: PathBuf,
        /// Override document; repeat to apply several layers in order.
        #[arg(long, required = true)]
        overrides: Vec<PathBuf>,
    },
    /// Generate and validate the form-builder collection.
    Forms {
        /// Form-builder options document. Defaults apply when omitted.
        #[arg(long)]
        options: Option<PathBuf>,
    },
    /// Settings-related commands.
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

#[derive(Debug, Subcommand)]
enum SettingsCommands {
    /// Print the effective settings.
    Show {
        /// Text-mode encoding.
        #[arg(long, value_enum, default_value_t = SettingsEncoding::Toml)]
        format: SettingsEncoding,
    },
    /// Print the settings JSON Schema.
    Schema,
}

/// Buffered command result.
#[derive(Debug)]
pub(crate) struct CliOutput {
    pub stdout: String,
    pub exit_code: ExitCode,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let mode = OutputMode::from_args(&cli.output);

    let settings = match load_settings_std_env(
        cli.settings.path.as_deref(),
        cli.settings.overrides_json.as_deref(),
    ) {
        Ok(settings) => settings,
        Err(error) => {
            let output = CliOutput {
                stdout: format_error(mode, &error),
                exit_code: ExitCode::for_envelope(&error),
            };
            return finish(&output);
        },
    };
    logging::init_tracing(&settings.log, mode.no_progress);

    match run(&cli, mode, &settings) {
        Ok(output) => finish(&output),
        Err(error) => exit_with_error(&error),
    }
}

fn finish(output: &CliOutput) -> std::process::ExitCode {
    match write_output(output) {
        Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
        Err(error) => exit_with_error(&error),
    }
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(cli: &Cli, mode: OutputMode, settings: &ValidatedSettings) -> Result<CliOutput, CliError> {
    let validator = Validator::new(settings.validator_options());

    match &cli.command {
        Commands::Info => run_info(mode),
        Commands::Validate { paths } => run_validate(mode, &validator, paths),
        Commands::Merge { base, overrides } => run_merge(mode, base, overrides),
        Commands::Forms { options } => run_forms(mode, &validator, options.as_deref()),
        Commands::Settings { command } => match command {
            SettingsCommands::Show { format } => {
                run_settings_show(mode, settings, cli.settings.path.as_deref(), *format)
            },
            SettingsCommands::Schema => run_settings_schema(mode),
        },
    }
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
