//! CLI argument definitions for the DMP attribute decoder.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dmp-decoder",
    version,
    about = "Decode DMP attribute records using a taxonomy workbook",
    long_about = "Decode encoded DMP attribute records into named attribute values.\n\n\
                  The taxonomy is a spreadsheet with an Attributes sheet and one\n\
                  code dictionary sheet per referential type. Records are read and\n\
                  written as newline-delimited JSON."
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

    /// TOML configuration file.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load the taxonomy and print what it contains.
    Inspect(TaxonomyArgs),

    /// List the attribute table.
    Attributes(AttributesArgs),

    /// Decode NDJSON encoded records to NDJSON decoded records.
    Decode(DecodeArgs),

    /// Decode records and emit outbound events for the configured routes.
    Forward(ForwardArgs),
}

#[derive(Args)]
pub struct TaxonomyArgs {
    /// Taxonomy workbook or directory of CSV sheets.
    ///
    /// Defaults to the config file, then $DMP_TAXONOMY_PATH, then
    /// cleverdata_taxonomy_client.xlsm in the working directory.
    #[arg(value_name = "TAXONOMY")]
    pub taxonomy: Option<PathBuf>,
}

#[derive(Args)]
pub struct AttributesArgs {
    #[command(flatten)]
    pub taxonomy: TaxonomyArgs,

    /// Only list attributes of one kind.
    #[arg(long = "type-filter", value_enum)]
    pub type_filter: Option<KindArg>,
}

#[derive(Args)]
pub struct InputArgs {
    /// NDJSON input file (reads stdin when omitted).
    #[arg(long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Stop at the first malformed record instead of skipping it.
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,
}

#[derive(Args)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub taxonomy: TaxonomyArgs,

    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args)]
pub struct ForwardArgs {
    #[command(flatten)]
    pub taxonomy: TaxonomyArgs,

    /// Incoming event name used to select forwarding routes.
    #[arg(long = "event", value_name = "NAME")]
    pub event: String,

    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Direct,
    Referential,
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
