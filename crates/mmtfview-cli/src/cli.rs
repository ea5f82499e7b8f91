use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "mmtfview - inspect MMTF macromolecular structure containers from the command line.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Number of worker threads used when decoding several files.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print structure metadata and hierarchy counts.
    Info(InspectArgs),
    /// Print one line per distinct chain name.
    Chains(InspectArgs),
    /// Print one line per model.
    Models(InspectArgs),
    /// Print the entity table with the chains each entity owns.
    Entities(InspectArgs),
    /// Decode several files in parallel and print one summary line per file.
    Summary(SummaryArgs),
}

/// Decode settings shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct DecodeArgs {
    /// Keep only the first model, dropping every later model's atoms, groups and chains.
    #[arg(long)]
    pub first_model: bool,

    /// Path to a TOML configuration file with a `[decode]` table.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Arguments for the single-file subcommands.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the MMTF file (plain or gzip-compressed).
    #[arg(required = true, value_name = "FILE")]
    pub input: PathBuf,

    #[command(flatten)]
    pub decode: DecodeArgs,
}

/// Arguments for the `summary` subcommand.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// One or more MMTF files.
    #[arg(required = true, num_args = 1.., value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    #[command(flatten)]
    pub decode: DecodeArgs,
}
