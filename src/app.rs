//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - initializes logging
//! - loads the sales table once
//! - hands off to the TUI or the headless report

use clap::Parser;

use crate::cli::{Command, ReportArgs, SourceArgs};
use crate::dashboard::Dispatcher;
use crate::data::DataSource;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `autodash` binary.
pub fn run() -> Result<(), AppError> {
    // `autodash` and `autodash --source x.csv` behave like `autodash tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    if let Err(err) = crate::logging::init() {
        eprintln!("warning: logging disabled: {err}");
    }

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Report(args) => handle_report(args),
    }
}

fn handle_tui(args: SourceArgs) -> Result<(), AppError> {
    let source = DataSource::resolve(args.source.as_deref());
    eprintln!("Loading {} ...", source.display_name());
    let ctx = pipeline::load_context(source)?;
    crate::tui::run(ctx)
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let source = DataSource::resolve(args.source.source.as_deref());
    let ctx = pipeline::load_context(source)?;

    println!("{}", crate::report::format_summary(&ctx));

    let mut dispatcher = Dispatcher::dashboard(ctx);
    dispatcher.start();
    dispatcher.set_report_type(Some(args.report));
    dispatcher.set_year(args.year);

    let Some(view) = dispatcher.report() else {
        println!("No update: {} needs --year.", args.report);
        return Ok(());
    };

    println!("{}", crate::report::format_report(view));

    if let Some(path) = &args.export {
        crate::io::export::write_report_json(path, view)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

/// Rewrite argv so `autodash` defaults to `autodash tui`.
///
/// Rules:
/// - `autodash`                      -> `autodash tui`
/// - `autodash --source x ...`       -> `autodash tui --source x ...`
/// - `autodash --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "report");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}
