//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves and loads the reference table
//! - evaluates rows / grids
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, DataArgs, EvalArgs, PlotArgs, TableArgs, TuiArgs};
use crate::data::{TableCache, resolve_data_path};
use crate::domain::{Evaluation, FormConfig, GridConfig, ReferenceTable};
use crate::error::AppError;

pub mod session;

use session::{Session, internal_errors};

/// Entry point for the `gascp` binary.
pub fn run() -> Result<(), AppError> {
    // We want `gascp` and `gascp -t 250` to behave like `gascp tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Eval(args) => handle_eval(args),
        Command::List(args) => handle_list(args),
        Command::Table(args) => handle_table(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    let config = form_config_from_args(&args)?;
    crate::tui::run(config)
}

fn handle_eval(args: EvalArgs) -> Result<(), AppError> {
    let table = load_required(&args.data)?;
    let session = Session::with_gases(args.temperature, &args.gases);
    let results = session.evaluate(&table);

    for r in internal_errors(&results) {
        eprintln!(
            "internal error: no bracketing points for '{}' at {} °C despite passing the range check",
            r.gas, r.temperature
        );
    }

    print!("{}", crate::report::format_evaluations(&results));
    Ok(())
}

fn handle_list(args: DataArgs) -> Result<(), AppError> {
    let table = load_required(&args)?;
    print!("{}", crate::report::format_gas_list(&table));
    Ok(())
}

fn handle_table(args: TableArgs) -> Result<(), AppError> {
    let table = load_required(&args.data)?;
    let config = grid_config_from_args(&args);
    let grid = crate::report::compute_grid(&table, &config)?;

    for (row, t) in grid.cells.iter().zip(&grid.temperatures) {
        for (cell, gas) in row.iter().zip(&grid.gases) {
            if *cell == Evaluation::InternalError {
                eprintln!("internal error: no bracketing points for '{gas}' at {t} °C");
            }
        }
    }

    print!("{}", crate::report::format_grid(&grid));

    // Optional export.
    if let Some(path) = &config.export {
        crate::io::export::write_grid_csv(path, &grid)?;
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let table = load_required(&args.data)?;
    let points = table
        .get(&args.gas)
        .ok_or_else(|| AppError::new(3, format!("No data for gas '{}'.", args.gas)))?;

    let marker = match args.temperature {
        Some(t) => match crate::interp::evaluate_points(points, t) {
            Evaluation::Value(v) => Some((t, v)),
            other => {
                eprintln!("{} at {} °C: {other}", args.gas, t);
                None
            }
        },
        None => None,
    };

    let plot = crate::plot::render_gas_plot(&args.gas, points, marker, args.width, args.height);
    println!("{plot}");
    Ok(())
}

/// One-shot commands need the table; a load failure ends the command.
fn load_required(args: &DataArgs) -> Result<std::sync::Arc<ReferenceTable>, AppError> {
    let path = resolve_data_path(args.data.as_deref());
    let mut cache = TableCache::new(path);
    Ok(cache.get()?)
}

pub fn form_config_from_args(args: &TuiArgs) -> Result<FormConfig, AppError> {
    if !args.temperature.is_finite() {
        return Err(AppError::new(2, "--temperature must be a finite number."));
    }
    if !(args.step.is_finite() && args.step > 0.0) {
        return Err(AppError::new(2, "--step must be a positive number."));
    }
    if args.rows == 0 {
        return Err(AppError::new(2, "--rows must be at least 1."));
    }
    Ok(FormConfig {
        data_path: resolve_data_path(args.data.data.as_deref()),
        temperature: args.temperature,
        temperature_step: args.step,
        rows: args.rows,
    })
}

pub fn grid_config_from_args(args: &TableArgs) -> GridConfig {
    GridConfig {
        from: args.from,
        to: args.to,
        step: args.step,
        gases: args.gases.clone(),
        export: args.export.clone(),
    }
}

/// Rewrite argv so `gascp` defaults to `gascp tui`.
///
/// Rules:
/// - `gascp`                      -> `gascp tui`
/// - `gascp -t 250 ...`           -> `gascp tui -t 250 ...`
/// - `gascp --help/--version/-h`  -> unchanged (show top-level help/version)
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

    let is_subcommand = matches!(arg1.as_str(), "tui" | "eval" | "list" | "table" | "plot");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
