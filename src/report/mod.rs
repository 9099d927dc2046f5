//! Reporting utilities: evaluation grids and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::{Evaluation, GridConfig, MAX_GRID_TEMPERATURES, ReferenceTable};
use crate::error::AppError;
use crate::interp::evaluate;

/// Evaluations for every `(temperature, gas)` pair of a grid.
#[derive(Debug, Clone)]
pub struct Grid {
    pub gases: Vec<String>,
    pub temperatures: Vec<f64>,
    /// `cells[i][j]` is gas `j` at temperature `i`.
    pub cells: Vec<Vec<Evaluation>>,
}

/// Evaluate the configured grid against `table`.
pub fn compute_grid(table: &ReferenceTable, config: &GridConfig) -> Result<Grid, AppError> {
    let temperatures = config.temperatures();
    if temperatures.is_empty() {
        return Err(AppError::new(
            2,
            format!(
                "Empty temperature grid (from={}, to={}, step={}). Use a positive step and from <= to.",
                config.from, config.to, config.step
            ),
        ));
    }

    if temperatures.len() > MAX_GRID_TEMPERATURES {
        return Err(AppError::new(
            2,
            format!(
                "Temperature grid too large (from={}, to={}, step={}). At most {MAX_GRID_TEMPERATURES} temperatures are allowed.",
                config.from, config.to, config.step
            ),
        ));
    }

    let gases: Vec<String> = if config.gases.is_empty() {
        table.names().map(str::to_string).collect()
    } else {
        config.gases.clone()
    };
    if gases.is_empty() {
        return Err(AppError::new(3, "No gases to tabulate."));
    }

    let cells = temperatures
        .iter()
        .map(|&t| gases.iter().map(|g| evaluate(table, g, t)).collect())
        .collect();

    Ok(Grid {
        gases,
        temperatures,
        cells,
    })
}
