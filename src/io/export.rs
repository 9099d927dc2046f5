//! Export evaluation grids to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts:
//! one row per temperature, one column per gas. Numeric cells keep full precision;
//! sentinel cells carry their placeholder text (`N/A`, `Out of range`, ...).

use std::path::Path;

use crate::domain::Evaluation;
use crate::error::AppError;
use crate::report::Grid;

/// Write a grid to a CSV file.
pub fn write_grid_csv(path: &Path, grid: &Grid) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_grid(&mut writer, grid)?;
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV: {e}")))?;
    Ok(())
}

fn write_grid<W: std::io::Write>(writer: &mut csv::Writer<W>, grid: &Grid) -> Result<(), AppError> {
    let mut header = Vec::with_capacity(grid.gases.len() + 1);
    header.push("temperature_c".to_string());
    header.extend(grid.gases.iter().cloned());
    writer
        .write_record(&header)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for (t, row) in grid.temperatures.iter().zip(&grid.cells) {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(t.to_string());
        record.extend(row.iter().map(|cell| match cell {
            Evaluation::Value(v) => v.to_string(),
            Evaluation::NoSelection => String::new(),
            other => other.to_string(),
        }));
        writer
            .write_record(&record)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_csv_layout() {
        let grid = Grid {
            gases: vec!["O2".to_string(), "H2O".to_string()],
            temperatures: vec![50.0, 3000.0],
            cells: vec![
                vec![Evaluation::Value(29.385), Evaluation::Value(33.62)],
                vec![Evaluation::OutOfRange, Evaluation::NotApplicable],
            ],
        };
        let mut writer = csv::Writer::from_writer(Vec::new());
        write_grid(&mut writer, &grid).unwrap();
        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "temperature_c,O2,H2O\n50,29.385,33.62\n3000,Out of range,N/A\n"
        );
    }
}
