//! Command-line interface definitions.
//!
//! Defines the CLI structure for the stakeladder application using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Goal-based compounding ledger for betting projects
#[derive(Parser, Debug)]
#[command(name = "stakeladder")]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, default_value = "stakeladder.toml")]
    pub config: PathBuf,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the stakeladder CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List projects in the book
    Projects,

    /// Show the planned staking ladder of a project
    Ladder(ProjectArg),

    /// Show reconciled cycle results of a project
    Ledger(ProjectArg),

    /// Close the active cycle of a project if enough days were bet
    Advance(ProjectArg),

    /// Show headline figures of a project
    Summary(ProjectArg),

    /// Record wagers from a JSON file (one wager or an array)
    Record(RecordArgs),

    /// Aggregate wagers by a dimension
    Report(ReportArgs),

    /// Validate the configuration file
    CheckConfig,
}

/// A single project identifier.
#[derive(clap::Args, Debug)]
pub struct ProjectArg {
    /// Project identifier
    pub id: String,
}

/// Arguments for `stakeladder record`.
#[derive(clap::Args, Debug)]
pub struct RecordArgs {
    /// JSON file holding a wager or an array of wagers
    pub file: PathBuf,
}

/// Arguments for `stakeladder report`.
#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    /// Dimension to aggregate by
    pub by: ReportDimension,

    /// Restrict to wagers owned by this project
    #[arg(long)]
    pub project: Option<String>,
}

/// Aggregation dimensions for `stakeladder report`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportDimension {
    Market,
    League,
    Methodology,
    Team,
    /// First-half versus full-time markets
    Half,
    /// Under lines from 0.5 to 8.5
    Under,
}
