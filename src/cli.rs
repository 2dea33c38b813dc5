//! Command-line interface for s3dryview.
//!
//! This module handles:
//! - Argument parsing
//! - Merging flags with the configuration file
//! - Reading the dry-run listing from a file or stdin
//! - Driving classification, move extraction and rendering

use crate::config::{Config, ConfigError};
use crate::output::{ColorMode, Highlighter, Report, render_json, render_report};
use crate::record::{Classifier, Plan};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "s3dryview",
    version,
    about = "Summarize `aws s3 sync --dryrun` output, collapsing delete+upload pairs into moves"
)]
pub struct Cli {
    /// File containing dry-run output; reads stdin when omitted or `-`
    pub input: Option<PathBuf>,

    /// When to color the output [default: from config, else always]
    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Path fragment that marks cache content (overrides config)
    #[arg(long, value_name = "FRAGMENT")]
    pub cache_marker: Option<String>,

    /// Use alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbose diagnostics on stderr (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Output format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Two-pass colored listing
    Text,
    /// One JSON document
    Json,
}

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Error opening input {}: {source}", .path.display())]
    Input { path: PathBuf, source: io::Error },
    #[error("Error reading input: {0}")]
    Read(#[source] io::Error),
    #[error("Error writing output: {0}")]
    Write(#[source] io::Error),
    #[error("Error writing JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Effective settings after merging flags over configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub classifier: Classifier,
    pub color: ColorMode,
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            classifier: Classifier::default(),
            color: ColorMode::Always,
            format: OutputFormat::Text,
        }
    }
}

impl Settings {
    /// Loads configuration and applies command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the
    /// resulting cache marker is empty.
    pub fn resolve(cli: &Cli) -> Result<Self, RunError> {
        let mut config = Config::load(cli.config.as_deref())?;
        if let Some(marker) = &cli.cache_marker {
            config.classifier.cache_marker = marker.clone();
        }
        let color = cli.color.unwrap_or(config.output.color);

        Ok(Self {
            classifier: config.classifier()?,
            color,
            format: cli.format,
        })
    }
}

/// Runs the application for parsed arguments, writing to stdout.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use s3dryview::cli::{Cli, run_cli};
///
/// let cli = Cli::parse_from(["s3dryview", "plan.txt", "--color", "never"]);
/// if let Err(e) = run_cli(&cli) {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run_cli(cli: &Cli) -> Result<(), RunError> {
    let settings = Settings::resolve(cli)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.input.as_deref() {
        Some(path) if path != Path::new("-") => {
            info!(path = %path.display(), "reading dry-run listing");
            let file = File::open(path).map_err(|source| RunError::Input {
                path: path.to_path_buf(),
                source,
            })?;
            run(&settings, BufReader::new(file), &mut out)?;
        }
        _ => {
            info!("reading dry-run listing from stdin");
            run(&settings, io::stdin().lock(), &mut out)?;
        }
    }

    out.flush().map_err(RunError::Write)
}

/// Reads every line, extracts moves, and renders the report.
///
/// The whole input is consumed before anything is written.
pub fn run<R, W>(settings: &Settings, input: R, out: &mut W) -> Result<(), RunError>
where
    R: BufRead,
    W: Write + ?Sized,
{
    let lines = read_lines(input).map_err(RunError::Read)?;
    debug!(lines = lines.len(), "read input");

    let plan = Plan::from_lines(&settings.classifier, &lines);
    let report = Report::from_plan(plan);

    match settings.format {
        OutputFormat::Text => {
            let highlighter: Box<dyn Highlighter> = settings.color.highlighter();
            render_report(out, &report, highlighter.as_ref()).map_err(RunError::Write)
        }
        OutputFormat::Json => Ok(render_json(out, &report)?),
    }
}

/// Splits input on `\n`, dropping a trailing `\r`. Invalid UTF-8 is replaced
/// rather than rejected so odd file names still come through.
fn read_lines<R: BufRead>(input: R) -> io::Result<Vec<String>> {
    input
        .split(b'\n')
        .map(|line| -> io::Result<String> {
            let mut line = line?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            Ok(String::from_utf8_lossy(&line).into_owned())
        })
        .collect()
}
