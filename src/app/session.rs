//! Form state shared by the CLI and TUI front-ends.
//!
//! A session is one temperature plus N independent gas rows. Keeping it here
//! keeps the front-ends focused on presentation (printing vs widgets):
//! selection → evaluate each row → render.

use crate::domain::{Evaluation, FormConfig, NO_SELECTION, ReferenceTable};
use crate::interp::evaluate;

/// One evaluated row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowResult {
    pub gas: String,
    pub temperature: f64,
    pub evaluation: Evaluation,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub temperature: f64,
    pub temperature_step: f64,
    rows: Vec<String>,
}

impl Session {
    pub fn new(temperature: f64, temperature_step: f64, rows: usize) -> Self {
        Self {
            temperature,
            temperature_step,
            rows: vec![NO_SELECTION.to_string(); rows.max(1)],
        }
    }

    pub fn from_config(config: &FormConfig) -> Self {
        Self::new(config.temperature, config.temperature_step, config.rows)
    }

    /// A session with one row per given gas (used by `eval`).
    pub fn with_gases(temperature: f64, gases: &[String]) -> Self {
        let mut session = Self::new(temperature, 1.0, gases.len());
        for (idx, gas) in gases.iter().enumerate() {
            session.rows[idx] = gas.clone();
        }
        session
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn select(&mut self, row: usize, gas: impl Into<String>) {
        if let Some(slot) = self.rows.get_mut(row) {
            *slot = gas.into();
        }
    }

    pub fn clear_row(&mut self, row: usize) {
        self.select(row, NO_SELECTION);
    }

    /// Move a row's selection through `Select gas` + the table's gases.
    ///
    /// A selection that is no longer in the table restarts from the placeholder.
    pub fn cycle_gas(&mut self, row: usize, delta: i32, table: &ReferenceTable) {
        let options = gas_options(table);
        let Some(current) = self.rows.get(row) else {
            return;
        };
        let pos = options.iter().position(|o| o == current).unwrap_or(0) as i64;
        let len = options.len() as i64;
        let next = (pos + i64::from(delta)).rem_euclid(len) as usize;
        self.rows[row] = options[next].clone();
    }

    pub fn step_temperature(&mut self, delta: i32) {
        self.temperature += f64::from(delta) * self.temperature_step;
    }

    /// Drop selections of gases that are not in `table` (after a reload).
    pub fn retain_known(&mut self, table: &ReferenceTable) {
        for row in &mut self.rows {
            if row.as_str() != NO_SELECTION && table.get(row).is_none() {
                *row = NO_SELECTION.to_string();
            }
        }
    }

    pub fn evaluate(&self, table: &ReferenceTable) -> Vec<RowResult> {
        self.rows
            .iter()
            .map(|gas| RowResult {
                gas: gas.clone(),
                temperature: self.temperature,
                evaluation: evaluate(table, gas, self.temperature),
            })
            .collect()
    }
}

/// Row choices: the placeholder followed by gases in resource order.
pub fn gas_options(table: &ReferenceTable) -> Vec<String> {
    std::iter::once(NO_SELECTION)
        .chain(table.names())
        .map(str::to_string)
        .collect()
}

/// Rows whose evaluation hit the broken-invariant path.
pub fn internal_errors(results: &[RowResult]) -> impl Iterator<Item = &RowResult> {
    results
        .iter()
        .filter(|r| r.evaluation == Evaluation::InternalError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_table;

    fn table() -> ReferenceTable {
        parse_table(r#"{"O2": {"0": 29.27, "100": 29.5}, "N2": {"0": 29.115, "100": 29.144}}"#).unwrap()
    }

    #[test]
    fn rows_start_unselected() {
        let session = Session::new(0.0, 1.0, 6);
        let results = session.evaluate(&table());
        assert_eq!(results.len(), 6);
        assert!(results.iter().all(|r| r.evaluation == Evaluation::NoSelection));
    }

    #[test]
    fn cycle_wraps_through_placeholder() {
        let t = table();
        let mut session = Session::new(50.0, 1.0, 2);
        session.cycle_gas(0, 1, &t);
        assert_eq!(session.rows()[0], "O2");
        session.cycle_gas(0, 1, &t);
        assert_eq!(session.rows()[0], "N2");
        session.cycle_gas(0, 1, &t);
        assert_eq!(session.rows()[0], NO_SELECTION);
        session.cycle_gas(0, -1, &t);
        assert_eq!(session.rows()[0], "N2");
    }

    #[test]
    fn rows_are_independent() {
        let t = table();
        let mut session = Session::new(50.0, 1.0, 3);
        session.select(0, "O2");
        session.select(2, "Unknown");
        let results = session.evaluate(&t);
        assert_eq!(results[0].evaluation, Evaluation::Value(29.385));
        assert_eq!(results[1].evaluation, Evaluation::NoSelection);
        assert_eq!(results[2].evaluation, Evaluation::NoData);
        assert_eq!(internal_errors(&results).count(), 0);
    }

    #[test]
    fn temperature_steps_and_reload_cleanup() {
        let t = table();
        let mut session = Session::new(0.0, 2.5, 1);
        session.step_temperature(2);
        assert_eq!(session.temperature, 5.0);
        session.step_temperature(-4);
        assert_eq!(session.temperature, -5.0);

        session.select(0, "Ghost");
        session.retain_known(&t);
        assert_eq!(session.rows()[0], NO_SELECTION);
    }
}
