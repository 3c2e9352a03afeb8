//! Command-line parsing for the sales dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the data/report code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{ReportKind, YEAR_MAX, YEAR_MIN};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "autodash", version, about = "Automobile Sales Statistics Dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard.
    Tui(SourceArgs),
    /// Run one selection headlessly and print the four charts as tables.
    ///
    /// This uses the same handlers as the TUI; a yearly report without
    /// `--year` produces no update.
    Report(ReportArgs),
}

/// Where to load the sales CSV from.
#[derive(Debug, Args, Clone, Default)]
pub struct SourceArgs {
    /// CSV location: an http(s) URL or a local path.
    ///
    /// Defaults to `AUTODASH_SOURCE`, then the public historical sales file.
    #[arg(short = 's', long, value_name = "URL|PATH")]
    pub source: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Report type.
    #[arg(short = 'r', long, value_enum)]
    pub report: ReportKind,

    /// Year for yearly statistics.
    #[arg(
        short = 'y',
        long,
        value_parser = clap::value_parser!(i32).range(i64::from(YEAR_MIN)..=i64::from(YEAR_MAX))
    )]
    pub year: Option<i32>,

    /// Also write the rendered charts to a JSON file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}
