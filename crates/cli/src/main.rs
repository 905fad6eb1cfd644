// datespan CLI - reconcile per-country date ranges from two CSV sources

mod exit_codes;
mod logger;
mod recon;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::EXIT_SUCCESS;
use recon::{MergeArgs, RangeArgs};

#[derive(Parser)]
#[command(name = "datespan")]
#[command(about = "Merge per-country date ranges from two sources into their overlap")]
#[command(version)]
#[command(long_version = long_version())]
#[command(after_help = "\
Running without a subcommand is the same as `datespan merge`.

Examples:
  datespan
  datespan merge -a owid.csv -b datahub.csv -o common.csv
  datespan merge --config datespan.toml --json
  datespan range -a owid.csv -b datahub.csv
  datespan validate datespan.toml")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    merge: MergeArgs,

    /// Suppress the summary and all log output on stderr
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Log more detail to stderr (-v info, -vv debug)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the merged per-country ranges of the two sources
    #[command(after_help = "\
Examples:
  datespan merge
  datespan merge -a owid.csv -b datahub.csv -o common.csv
  datespan merge --filter legacy-skip --join positional
  datespan merge --json --summary result.json")]
    Merge(MergeArgs),

    /// Print the single date range valid for every common country
    #[command(after_help = "\
Examples:
  datespan range
  datespan range -a owid.csv -b datahub.csv --json")]
    Range(RangeArgs),

    /// Validate a config file without running
    Validate {
        /// Path to the TOML config file
        config: std::path::PathBuf,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("DATESPAN_COMMIT"), ")",
        "\nengine:  datespan-recon ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("DATESPAN_TARGET"),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose, cli.quiet);

    let result = match cli.command {
        None => recon::cmd_merge(cli.merge, cli.quiet),
        Some(Commands::Merge(args)) => recon::cmd_merge(args, cli.quiet),
        Some(Commands::Range(args)) => recon::cmd_range(args, cli.quiet),
        Some(Commands::Validate { config }) => recon::cmd_validate(config, cli.quiet),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(exit_codes::EXIT_IO, msg)
    }

    /// Wrap an engine error with its registered exit code.
    pub fn recon(err: datespan_recon::ReconError) -> Self {
        let code = exit_codes::recon_exit_code(&err);
        let hint = match &err {
            datespan_recon::ReconError::AlignmentMismatch { .. } => {
                Some("use --join keyed to pair rows by country name".to_string())
            }
            datespan_recon::ReconError::MissingColumn { .. } => {
                Some("set [columns] in the config file to match the source headers".to_string())
            }
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
