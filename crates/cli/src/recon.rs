//! `datespan merge`, `datespan range` and `datespan validate`.

use std::fs::File;
use std::io::{BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use serde::Serialize;

use datespan_recon::compare::format_date;
use datespan_recon::config::{FilterMode, JoinMode, ReconConfig};
use datespan_recon::writer::write_merged_csv;
use datespan_recon::{ReconInput, ReconResult, SourceInput};

use crate::exit_codes::EXIT_ERROR;
use crate::CliError;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FilterArg {
    /// Keep exactly the rows of common countries
    Retain,
    /// Reproduce the historical remove-while-iterating filter
    LegacySkip,
}

impl From<FilterArg> for FilterMode {
    fn from(v: FilterArg) -> Self {
        match v {
            FilterArg::Retain => FilterMode::Retain,
            FilterArg::LegacySkip => FilterMode::LegacySkip,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum JoinArg {
    /// Pair rows by country name
    Keyed,
    /// Pair rows by position, failing on any misalignment
    Positional,
}

impl From<JoinArg> for JoinMode {
    fn from(v: JoinArg) -> Self {
        match v {
            JoinArg::Keyed => JoinMode::Keyed,
            JoinArg::Positional => JoinMode::Positional,
        }
    }
}

/// Where the two sources come from and how they are combined.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// TOML config file; its relative paths resolve against its directory
    #[arg(long, short = 'c', env = "DATESPAN_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// First source CSV [default: dates-data(OWID-data).csv]
    #[arg(long, short = 'a', value_name = "PATH")]
    pub source_a: Option<PathBuf>,

    /// Second source CSV [default: dates-data(datahub-data).csv]
    #[arg(long, short = 'b', value_name = "PATH")]
    pub source_b: Option<PathBuf>,

    /// How uncommon countries are dropped
    #[arg(long, value_enum)]
    pub filter: Option<FilterArg>,

    /// How the two sources' rows are paired
    #[arg(long, value_enum)]
    pub join: Option<JoinArg>,
}

#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Merged CSV to write (overwritten) [default: dates-data(common).csv]
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the full result as JSON to stdout
    #[arg(long)]
    pub json: bool,

    /// Write the full result as JSON to a file
    #[arg(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct RangeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the range as JSON instead of `start,end`
    #[arg(long)]
    pub json: bool,
}

/// Config with flag overrides applied, plus the directory config paths resolve against.
struct Resolved {
    config: ReconConfig,
    base_dir: PathBuf,
    source_a: PathBuf,
    source_b: PathBuf,
}

fn resolve(input: &InputArgs) -> Result<Resolved, CliError> {
    let (mut config, base_dir) = match &input.config {
        Some(path) => (
            load_config(path)?,
            path.parent().map(Path::to_path_buf).unwrap_or_default(),
        ),
        None => (ReconConfig::default(), PathBuf::new()),
    };

    if let Some(filter) = input.filter {
        config.filter = filter.into();
    }
    if let Some(join) = input.join {
        config.join = join.into();
    }

    let source_a = input
        .source_a
        .clone()
        .unwrap_or_else(|| base_dir.join(&config.sources.a.file));
    let source_b = input
        .source_b
        .clone()
        .unwrap_or_else(|| base_dir.join(&config.sources.b.file));

    Ok(Resolved { config, base_dir, source_a, source_b })
}

fn load_config(path: &Path) -> Result<ReconConfig, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("cannot read config {}: {e}", path.display())))?;
    ReconConfig::from_toml(&text).map_err(CliError::recon)
}

fn read_source(name: &str, path: &Path) -> Result<SourceInput, CliError> {
    match std::fs::read_to_string(path) {
        Ok(data) => Ok(SourceInput::new(name, data)),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(CliError::io(format!(
            "source '{name}': {} not found",
            path.display()
        ))
        .with_hint("pass --source-a/--source-b or --config to point at the inputs")),
        Err(e) => Err(CliError::io(format!(
            "source '{name}': cannot read {}: {e}",
            path.display()
        ))),
    }
}

fn run_pipeline(resolved: &Resolved) -> Result<ReconResult, CliError> {
    let sources = &resolved.config.sources;
    let input = ReconInput {
        a: read_source(&sources.a.name, &resolved.source_a)?,
        b: read_source(&sources.b.name, &resolved.source_b)?,
    };
    log::info!(
        "reconciling {} ({}) with {} ({})",
        sources.a.name,
        resolved.source_a.display(),
        sources.b.name,
        resolved.source_b.display()
    );
    datespan_recon::run(&resolved.config, &input).map_err(CliError::recon)
}

fn write_csv(path: &Path, result: &ReconResult) -> Result<(), CliError> {
    let file = File::create(path)
        .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
    write_merged_csv(BufWriter::new(file), &result.rows)
        .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))
}

fn to_json(result: &ReconResult) -> Result<String, CliError> {
    serde_json::to_string_pretty(result)
        .map_err(|e| CliError::new(EXIT_ERROR, format!("JSON serialization error: {e}")))
}

// ============================================================================
// merge
// ============================================================================

pub fn cmd_merge(args: MergeArgs, quiet: bool) -> Result<(), CliError> {
    let resolved = resolve(&args.input)?;
    let result = run_pipeline(&resolved)?;

    let output = args
        .output
        .unwrap_or_else(|| resolved.base_dir.join(&resolved.config.output.csv));
    write_csv(&output, &result)?;

    let summary_path = args.summary.or_else(|| {
        resolved
            .config
            .output
            .json
            .as_ref()
            .map(|p| resolved.base_dir.join(p))
    });

    if args.json || summary_path.is_some() {
        let json_str = to_json(&result)?;
        if let Some(ref path) = summary_path {
            std::fs::write(path, &json_str)
                .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
            if !quiet {
                eprintln!("wrote {}", path.display());
            }
        }
        if args.json {
            println!("{json_str}");
        }
    }

    if !quiet {
        let s = &result.summary;
        eprintln!(
            "{} common countries ({}: {}, {}: {}); wrote {}",
            s.common_countries,
            result.meta.source_a,
            s.source_a_countries,
            result.meta.source_b,
            s.source_b_countries,
            output.display(),
        );
        match result.global {
            Some(g) => eprintln!(
                "global range: {} to {} ({} days)",
                format_date(g.start_date),
                format_date(g.end_date),
                g.days()
            ),
            None => eprintln!("global range: none"),
        }
    }

    Ok(())
}

// ============================================================================
// range
// ============================================================================

#[derive(Serialize)]
struct RangeOutput {
    start_date: String,
    end_date: String,
    days: i64,
    countries: usize,
}

pub fn cmd_range(args: RangeArgs, quiet: bool) -> Result<(), CliError> {
    let resolved = resolve(&args.input)?;
    let result = run_pipeline(&resolved)?;

    let Some(global) = result.global else {
        if !quiet {
            eprintln!("no common countries; no global range");
        }
        return Ok(());
    };

    if args.json {
        let out = RangeOutput {
            start_date: format_date(global.start_date),
            end_date: format_date(global.end_date),
            days: global.days(),
            countries: result.rows.len(),
        };
        let json_str = serde_json::to_string(&out)
            .map_err(|e| CliError::new(EXIT_ERROR, format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    } else {
        println!("{},{}", format_date(global.start_date), format_date(global.end_date));
    }

    Ok(())
}

// ============================================================================
// validate
// ============================================================================

pub fn cmd_validate(path: PathBuf, quiet: bool) -> Result<(), CliError> {
    let config = load_config(&path)?;
    if !quiet {
        eprintln!(
            "{}: ok ({} = {}, {} = {}, filter {}, join {})",
            path.display(),
            config.sources.a.name,
            config.sources.a.file,
            config.sources.b.name,
            config.sources.b.file,
            config.filter,
            config.join,
        );
    }
    Ok(())
}
