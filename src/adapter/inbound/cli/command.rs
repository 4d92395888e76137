//! Command-line interface definitions.
//!
//! Defines the CLI structure for the vitalstats application using `clap`.
//! Subcommands run the sales sync, inspect the cached snapshot and the
//! popularity metadata, serve the daily schedule and manage configuration.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::{ProductId, SortKey, SortOrder};

/// Yearly product sales aggregation and popularity sync
#[derive(Parser, Debug)]
#[command(name = "vitalstats")]
#[command(version)]
pub struct Cli {
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

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the configuration file [default: ~/.vitalstats/config.toml]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite store, overriding the configured one
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the vitalstats CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate the fiscal year's sales and sync popularity metadata once
    Run,

    /// Show the cached sales snapshot
    Show(ShowArgs),

    /// Read or write one product's popularity value
    #[command(subcommand)]
    Meta(MetaCommand),

    /// List products by popularity, most popular first
    Popularity(PopularityArgs),

    /// Run the sync every day at the configured time until interrupted
    Serve(ServeArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Column accepted by `show --sort-by`.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum SortColumn {
    /// Quantity sold
    Quantity,
    /// Total sales
    Total,
}

impl From<SortColumn> for SortKey {
    fn from(column: SortColumn) -> Self {
        match column {
            SortColumn::Quantity => Self::Quantity,
            SortColumn::Total => Self::Total,
        }
    }
}

/// Direction accepted by `show --order`.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum SortDirection {
    /// Ascending
    Asc,
    /// Descending
    #[default]
    Desc,
}

impl From<SortDirection> for SortOrder {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Self::Asc,
            SortDirection::Desc => Self::Desc,
        }
    }
}

/// Arguments for the `show` subcommand.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Sort rows by this column instead of snapshot order
    #[arg(long, value_enum)]
    pub sort_by: Option<SortColumn>,

    /// Sort direction, used with --sort-by
    #[arg(long, value_enum, default_value_t = SortDirection::Desc)]
    pub order: SortDirection,
}

/// Subcommands for `vitalstats meta`.
#[derive(Subcommand, Debug)]
pub enum MetaCommand {
    /// Print a product's popularity value
    Get {
        /// Product id
        product_id: ProductId,
    },
    /// Overwrite a product's popularity value
    Set {
        /// Product id
        product_id: ProductId,
        /// New popularity value
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
}

/// Arguments for the `popularity` subcommand.
#[derive(Parser, Debug)]
pub struct PopularityArgs {
    /// Show at most this many products
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the `serve` subcommand.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Also run once immediately before waiting for the schedule
    #[arg(long)]
    pub now: bool,
}

/// Subcommands for `vitalstats config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate the configuration file for correctness.
    Validate,
}

/// Arguments for `config init`.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}
