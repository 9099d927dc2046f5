//! Shared domain types.
//!
//! These types are intentionally kept small and immutable once built so they can be:
//!
//! - shared read-only between the form and one-shot commands
//! - compared after a reload (idempotent loads produce equal tables)
//! - rendered by any front-end without knowing how they were produced

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::PathBuf;

/// Label of the "nothing selected" entry in a gas row.
pub const NO_SELECTION: &str = "Select gas";

/// Number of independent gas rows on the form.
pub const DEFAULT_ROWS: usize = 6;

/// Largest temperature grid the `table` command will evaluate.
pub const MAX_GRID_TEMPERATURES: usize = 100_000;

/// A stored heat capacity value at one temperature.
///
/// The resource encodes "not applicable" as an empty string; we keep that as
/// an explicit variant rather than a magic number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeatValue {
    /// Mean molar heat capacity in kJ/(kmol·K).
    Measured(f64),
    NotApplicable,
}

impl HeatValue {
    pub fn measured(self) -> Option<f64> {
        match self {
            HeatValue::Measured(v) => Some(v),
            HeatValue::NotApplicable => None,
        }
    }
}

/// Known temperature points of a single gas (integer °C → value).
///
/// Keys are kept sorted so range checks and bracketing are simple lookups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GasPoints {
    points: BTreeMap<i64, HeatValue>,
}

impl GasPoints {
    pub fn new(points: BTreeMap<i64, HeatValue>) -> Self {
        Self { points }
    }

    pub fn get(&self, temperature_c: i64) -> Option<HeatValue> {
        self.points.get(&temperature_c).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest and largest known temperature.
    pub fn key_range(&self) -> Option<(i64, i64)> {
        let lo = *self.points.keys().next()?;
        let hi = *self.points.keys().next_back()?;
        Some((lo, hi))
    }

    /// Largest known point with `key <= temperature_c`.
    pub fn at_or_below(&self, temperature_c: i64) -> Option<(i64, HeatValue)> {
        self.points
            .range(..=temperature_c)
            .next_back()
            .map(|(&k, &v)| (k, v))
    }

    /// Smallest known point with `key > temperature_c`.
    pub fn above(&self, temperature_c: i64) -> Option<(i64, HeatValue)> {
        let start = temperature_c.checked_add(1)?;
        self.points.range(start..).next().map(|(&k, &v)| (k, v))
    }

    /// Points in ascending temperature order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, HeatValue)> + '_ {
        self.points.iter().map(|(&k, &v)| (k, v))
    }

    /// Number of points stored as "not applicable".
    pub fn not_applicable_count(&self) -> usize {
        self.points
            .values()
            .filter(|v| matches!(v, HeatValue::NotApplicable))
            .count()
    }
}

/// A named gas and its points.
#[derive(Debug, Clone, PartialEq)]
pub struct Gas {
    pub name: String,
    pub points: GasPoints,
}

/// The full reference table, in resource order.
///
/// Gas names are case-sensitive and unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTable {
    gases: Vec<Gas>,
    index: HashMap<String, usize>,
}

impl ReferenceTable {
    /// Build a table; a later gas with a name already present replaces the earlier one.
    pub fn new(gases: Vec<Gas>) -> Self {
        let mut table = Self::default();
        for gas in gases {
            match table.index.get(&gas.name) {
                Some(&idx) => table.gases[idx] = gas,
                None => {
                    table.index.insert(gas.name.clone(), table.gases.len());
                    table.gases.push(gas);
                }
            }
        }
        table
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&GasPoints> {
        self.index.get(name).map(|&idx| &self.gases[idx].points)
    }

    pub fn gases(&self) -> &[Gas] {
        &self.gases
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.gases.iter().map(|g| g.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.gases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gases.is_empty()
    }
}

/// Outcome of one `(gas, temperature)` evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    /// Stored or interpolated heat capacity in kJ/(kmol·K).
    Value(f64),
    /// No gas chosen in the row; rendered as a neutral placeholder.
    NoSelection,
    /// The gas is not in the table.
    NoData,
    /// The value (or an interpolation endpoint) is marked not applicable.
    NotApplicable,
    /// The temperature lies outside the gas's known range.
    OutOfRange,
    /// Bracketing failed after the range check passed (broken table invariant).
    InternalError,
}

impl Evaluation {
    pub fn value(self) -> Option<f64> {
        match self {
            Evaluation::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Text shown in place of a number.
    pub fn placeholder(self) -> &'static str {
        match self {
            Evaluation::Value(_) => "",
            Evaluation::NoSelection => "—",
            Evaluation::NoData => "No data",
            Evaluation::NotApplicable => "N/A",
            Evaluation::OutOfRange => "Out of range",
            Evaluation::InternalError => "Error",
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evaluation::Value(v) => write!(f, "{v}"),
            other => f.write_str(other.placeholder()),
        }
    }
}

/// Settings for the interactive form.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FormConfig {
    pub data_path: PathBuf,
    /// Initial temperature in °C.
    pub temperature: f64,
    /// Increment applied by ←/→ on the temperature field.
    pub temperature_step: f64,
    pub rows: usize,
}

/// Settings for the `table` command.
#[derive(Debug, Clone)]
pub struct GridConfig {
    pub from: f64,
    pub to: f64,
    pub step: f64,
    /// Gases to include; empty means all gases in resource order.
    pub gases: Vec<String>,
    pub export: Option<PathBuf>,
}

impl GridConfig {
    /// Temperatures from `from` to `to` (inclusive when hit) in `step` increments.
    ///
    /// Temperatures are computed as `from + i * step` to avoid accumulating error.
    /// Generation stops one past `MAX_GRID_TEMPERATURES` so oversized grids can
    /// be detected without materializing them.
    pub fn temperatures(&self) -> Vec<f64> {
        let mut out = Vec::new();
        if !(self.from.is_finite() && self.to.is_finite() && self.step.is_finite()) || self.step <= 0.0 {
            return out;
        }
        let mut i = 0u32;
        loop {
            let t = self.from + f64::from(i) * self.step;
            if t > self.to + self.step * 1e-9 || out.len() > MAX_GRID_TEMPERATURES {
                break;
            }
            out.push(t);
            i += 1;
        }
        out
    }
}
