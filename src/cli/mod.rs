//! Command-line parsing for the gas heat capacity calculator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the table/interpolation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::DEFAULT_ROWS;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "gascp",
    version,
    about = "Mean molar specific heat capacity of ideal gases between 0 °C and t °C"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive form (default when no subcommand is given).
    Tui(TuiArgs),
    /// Evaluate one or more gases at a temperature.
    Eval(EvalArgs),
    /// List the gases in the reference table with their temperature ranges.
    List(DataArgs),
    /// Print values for a temperature grid (optionally export to CSV).
    Table(TableArgs),
    /// Render a gas's curve as an ASCII plot.
    Plot(PlotArgs),
}

/// Where to read the reference table from.
#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// Reference table JSON (defaults to $GASCP_DATA, then data/gases.json, then gasses.json).
    #[arg(short = 'd', long, value_name = "JSON")]
    pub data: Option<PathBuf>,
}

/// Options for the interactive form.
#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Initial temperature (°C).
    #[arg(short = 't', long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub temperature: f64,

    /// Temperature increment for ←/→ (°C).
    #[arg(long, default_value_t = 1.0)]
    pub step: f64,

    /// Number of gas rows.
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,
}

/// Options for a one-shot evaluation.
#[derive(Debug, Args, Clone)]
pub struct EvalArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Gas name (repeatable, case-sensitive).
    #[arg(short = 'g', long = "gas", required = true, value_name = "NAME")]
    pub gases: Vec<String>,

    /// Temperature (°C).
    #[arg(short = 't', long, allow_negative_numbers = true)]
    pub temperature: f64,
}

/// Options for a temperature grid.
#[derive(Debug, Args, Clone)]
pub struct TableArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// First temperature (°C).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub from: f64,

    /// Last temperature (°C, inclusive when hit by a step).
    #[arg(long, default_value_t = 1000.0, allow_negative_numbers = true)]
    pub to: f64,

    /// Grid step (°C).
    #[arg(long, default_value_t = 100.0)]
    pub step: f64,

    /// Gas to include (repeatable). All gases when omitted.
    #[arg(short = 'g', long = "gas", value_name = "NAME")]
    pub gases: Vec<String>,

    /// Export the grid to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

/// Options for plotting a gas curve.
#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Gas name (case-sensitive).
    #[arg(short = 'g', long, value_name = "NAME")]
    pub gas: String,

    /// Mark the value at this temperature (°C).
    #[arg(short = 't', long, allow_negative_numbers = true)]
    pub temperature: Option<f64>,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}
