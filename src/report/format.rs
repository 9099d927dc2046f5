//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the table/interpolation code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::app::session::RowResult;
use crate::domain::{Evaluation, ReferenceTable};
use crate::report::Grid;

/// Unit of every value in the table.
pub const UNIT_LABEL: &str = "kJ/kmolK";

/// Temperatures are shown with two decimals, like the form's input field.
pub fn format_temperature(t: f64) -> String {
    format!("{t:.2}")
}

/// One line per evaluated row: `gas  value`.
pub fn format_evaluations(results: &[RowResult]) -> String {
    let mut out = String::new();
    let Some(first) = results.first() else {
        return out;
    };

    out.push_str(&format!(
        "Temperature: {} °C | cp ({UNIT_LABEL}), mean between 0 °C and t °C\n",
        format_temperature(first.temperature)
    ));

    let width = results.iter().map(|r| r.gas.chars().count()).max().unwrap_or(0);
    for r in results {
        out.push_str(&format!("{:<width$}  {}\n", r.gas, r.evaluation));
    }
    out
}

/// Gas list with key range, point count, and N/A count.
pub fn format_gas_list(table: &ReferenceTable) -> String {
    if table.is_empty() {
        return "Gas data not loaded.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<12} {:>8} {:>8} {:>7} {:>5}\n",
        "gas", "min °C", "max °C", "points", "n/a"
    ));
    for gas in table.gases() {
        let (lo, hi) = gas
            .points
            .key_range()
            .map(|(lo, hi)| (lo.to_string(), hi.to_string()))
            .unwrap_or_else(|| ("-".to_string(), "-".to_string()));
        out.push_str(&format!(
            "{:<12} {:>8} {:>8} {:>7} {:>5}\n",
            gas.name,
            lo,
            hi,
            gas.points.len(),
            gas.points.not_applicable_count()
        ));
    }
    out
}

/// Fixed-width grid: one row per temperature, one column per gas.
pub fn format_grid(grid: &Grid) -> String {
    let col = grid
        .gases
        .iter()
        .map(|g| g.chars().count())
        .chain(std::iter::once(12))
        .max()
        .unwrap_or(12);

    let mut out = String::new();
    out.push_str(&format!("{:>9}", "t °C"));
    for gas in &grid.gases {
        out.push_str(&format!(" {gas:>col$}"));
    }
    out.push('\n');

    for (t, row) in grid.temperatures.iter().zip(&grid.cells) {
        out.push_str(&format!("{:>9}", format_temperature(*t)));
        for cell in row {
            out.push_str(&format!(" {:>col$}", cell_text(*cell)));
        }
        out.push('\n');
    }
    out
}

fn cell_text(evaluation: Evaluation) -> String {
    match evaluation {
        Evaluation::Value(v) => format!("{v:.3}"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_table;

    #[test]
    fn evaluations_are_aligned() {
        let results = vec![
            RowResult {
                gas: "O2".to_string(),
                temperature: 50.0,
                evaluation: Evaluation::Value(29.385),
            },
            RowResult {
                gas: "UnknownGasXYZ".to_string(),
                temperature: 50.0,
                evaluation: Evaluation::NoData,
            },
        ];
        let txt = format_evaluations(&results);
        let expected = concat!(
            "Temperature: 50.00 °C | cp (kJ/kmolK), mean between 0 °C and t °C\n",
            "O2             29.385\n",
            "UnknownGasXYZ  No data\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn gas_list_reports_ranges() {
        let table = parse_table(r#"{"H2O": {"0": 33.499, "3000": ""}}"#).unwrap();
        let txt = format_gas_list(&table);
        assert!(txt.lines().nth(1).unwrap().starts_with("H2O"));
        assert!(txt.contains("3000"));
        assert_eq!(format_gas_list(&ReferenceTable::empty()), "Gas data not loaded.\n");
    }

    #[test]
    fn grid_cells_use_placeholders() {
        let grid = Grid {
            gases: vec!["O2".to_string()],
            temperatures: vec![50.0, 150.0],
            cells: vec![vec![Evaluation::Value(29.385)], vec![Evaluation::OutOfRange]],
        };
        let txt = format_grid(&grid);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].ends_with("29.385"));
        assert!(lines[2].ends_with("Out of range"));
    }
}
