//! CLI argument definitions for the roster import tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use roster_cli::import::MappingOverride;

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Import a student roster exported from another studio tool",
    long_about = "Import a student roster exported from another studio tool.\n\n\
                  Reads a CSV export, asks the import service how its columns map to\n\
                  roster fields, applies your corrections, and writes an import draft."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values from the roster in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Configuration file (default: the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the headers and first rows of a CSV export.
    Inspect(InspectArgs),

    /// List the source software choices.
    Sources,

    /// Map a CSV export and write an import draft.
    Import(ImportArgs),
}

#[derive(Parser)]
pub struct InspectArgs {
    /// CSV export to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Number of rows to show.
    #[arg(long = "rows", default_value_t = 5)]
    pub rows: usize,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// CSV export to import.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Mapping service endpoint (default: `service.endpoint` from the config).
    #[arg(long = "endpoint", value_name = "URL")]
    pub endpoint: Option<String>,

    /// Bearer token for the mapping service.
    #[arg(long = "token", env = "ROSTER_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Source software the export comes from (see `roster sources`).
    #[arg(long = "source", value_name = "ID")]
    pub source: Option<String>,

    /// Override a suggested mapping; `HEADER=-` skips the column.
    #[arg(long = "map", value_name = "HEADER=TARGET")]
    pub overrides: Vec<MappingOverride>,

    /// Where to write the draft.
    #[arg(long = "output", value_name = "PATH", default_value = "import-draft.json")]
    pub output: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
