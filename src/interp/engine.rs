//! Table lookup with piecewise-linear interpolation.
//!
//! Evaluation order:
//! 1. no selection → `NoSelection`
//! 2. unknown gas → `NoData`
//! 3. exact key hit → stored value (unrounded) or `NotApplicable`
//! 4. outside `[min, max]` key → `OutOfRange`
//! 5. interpolate between the bracketing keys, rounded to 3 decimals

use crate::domain::{Evaluation, GasPoints, HeatValue, NO_SELECTION, ReferenceTable};

/// Decimal places kept on interpolated results.
pub const RESULT_DECIMALS: usize = 3;

/// True when the row has no gas chosen.
pub fn is_no_selection(gas: &str) -> bool {
    let gas = gas.trim();
    gas.is_empty() || gas == NO_SELECTION
}

/// Evaluate the heat capacity of `gas` at `temperature_c`.
pub fn evaluate(table: &ReferenceTable, gas: &str, temperature_c: f64) -> Evaluation {
    if is_no_selection(gas) {
        return Evaluation::NoSelection;
    }

    match table.get(gas) {
        Some(points) => evaluate_points(points, temperature_c),
        None => Evaluation::NoData,
    }
}

/// Evaluate a single gas's points at `temperature_c`.
pub fn evaluate_points(points: &GasPoints, temperature_c: f64) -> Evaluation {
    let Some((min_key, max_key)) = points.key_range() else {
        return Evaluation::NoData;
    };

    if let Some(key) = exact_key(temperature_c) {
        if let Some(value) = points.get(key) {
            return match value {
                HeatValue::Measured(v) => Evaluation::Value(v),
                HeatValue::NotApplicable => Evaluation::NotApplicable,
            };
        }
    }

    // NaN fails both comparisons, so reject it explicitly.
    if temperature_c.is_nan() || temperature_c < min_key as f64 || temperature_c > max_key as f64 {
        return Evaluation::OutOfRange;
    }

    // In range, so the floor fits between the i64 keys.
    let floor = temperature_c.floor() as i64;
    let (Some((x1, y1)), Some((x2, y2))) = (points.at_or_below(floor), points.above(floor)) else {
        return Evaluation::InternalError;
    };

    let (Some(y1), Some(y2)) = (y1.measured(), y2.measured()) else {
        return Evaluation::NotApplicable;
    };

    let y = linear_interpolation(x1 as f64, x2 as f64, y1, y2, temperature_c);
    Evaluation::Value(round_half_even(y, RESULT_DECIMALS))
}

/// The integer key a temperature matches exactly, if any (`100.0` → `100`).
fn exact_key(temperature_c: f64) -> Option<i64> {
    if !temperature_c.is_finite() || temperature_c.fract() != 0.0 {
        return None;
    }
    // Outside the i64 range the cast saturates; such values are never table keys.
    if !(-9.223_372_036_854_775_808e18..9.223_372_036_854_775_808e18).contains(&temperature_c) {
        return None;
    }
    Some(temperature_c as i64)
}

pub fn linear_interpolation(x1: f64, x2: f64, y1: f64, y2: f64, x: f64) -> f64 {
    y1 + (y2 - y1) / (x2 - x1) * (x - x1)
}

/// Round to `decimals` places, ties to even.
///
/// Rounds the exact binary value; a scaled `value * 10^n` product may already
/// have been rounded onto a tie.
pub fn round_half_even(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_table;
    use crate::domain::Gas;

    fn table(gases: &[(&str, &[(i64, HeatValue)])]) -> ReferenceTable {
        ReferenceTable::new(
            gases
                .iter()
                .map(|(name, pts)| Gas {
                    name: name.to_string(),
                    points: GasPoints::new(pts.iter().copied().collect()),
                })
                .collect(),
        )
    }

    fn sample() -> ReferenceTable {
        use HeatValue::{Measured, NotApplicable};
        table(&[
            ("O2", &[(0, Measured(29.27)), (100, Measured(29.5))]),
            (
                "H2O",
                &[
                    (0, Measured(33.499)),
                    (1000, Measured(38.619)),
                    (2000, Measured(43.973)),
                    (3000, NotApplicable),
                ],
            ),
            ("Flat", &[(-100, Measured(10.0)), (100, Measured(10.0))]),
            ("Single", &[(25, Measured(1.5))]),
        ])
    }

    #[test]
    fn midpoint_example() {
        assert_eq!(evaluate(&sample(), "O2", 50.0), Evaluation::Value(29.385));
    }

    #[test]
    fn no_selection_wins_over_everything() {
        let t = sample();
        assert_eq!(evaluate(&t, NO_SELECTION, 50.0), Evaluation::NoSelection);
        assert_eq!(evaluate(&t, "", 50.0), Evaluation::NoSelection);
        assert_eq!(evaluate(&t, "   ", f64::NAN), Evaluation::NoSelection);
        assert_eq!(evaluate(&ReferenceTable::empty(), NO_SELECTION, 1.0), Evaluation::NoSelection);
    }

    #[test]
    fn unknown_gas_is_no_data() {
        assert_eq!(evaluate(&sample(), "UnknownGasXYZ", 100.0), Evaluation::NoData);
        assert_eq!(evaluate(&sample(), "o2", 50.0), Evaluation::NoData);
    }

    #[test]
    fn exact_keys_return_stored_values_unrounded() {
        let t = table(&[("X", &[(0, HeatValue::Measured(1.23456)), (10, HeatValue::Measured(2.0))])]);
        assert_eq!(evaluate(&t, "X", 0.0), Evaluation::Value(1.23456));
        assert_eq!(evaluate(&t, "X", -0.0), Evaluation::Value(1.23456));
        assert_eq!(evaluate(&sample(), "O2", 100.0), Evaluation::Value(29.5));
    }

    #[test]
    fn exact_not_applicable_key() {
        assert_eq!(evaluate(&sample(), "H2O", 3000.0), Evaluation::NotApplicable);
    }

    #[test]
    fn interpolation_towards_not_applicable_endpoint_is_not_applicable() {
        assert_eq!(evaluate(&sample(), "H2O", 2500.0), Evaluation::NotApplicable);
        assert_eq!(evaluate(&sample(), "H2O", 1999.5), Evaluation::Value(43.97));
    }

    #[test]
    fn out_of_range_on_both_sides() {
        let t = sample();
        assert_eq!(evaluate(&t, "O2", -0.001), Evaluation::OutOfRange);
        assert_eq!(evaluate(&t, "O2", 100.5), Evaluation::OutOfRange);
        assert_eq!(evaluate(&t, "O2", f64::INFINITY), Evaluation::OutOfRange);
        assert_eq!(evaluate(&t, "O2", f64::NEG_INFINITY), Evaluation::OutOfRange);
        assert_eq!(evaluate(&t, "O2", f64::NAN), Evaluation::OutOfRange);
        assert_eq!(evaluate(&t, "O2", 1.0e300), Evaluation::OutOfRange);
    }

    #[test]
    fn single_point_gas() {
        let t = sample();
        assert_eq!(evaluate(&t, "Single", 25.0), Evaluation::Value(1.5));
        assert_eq!(evaluate(&t, "Single", 25.5), Evaluation::OutOfRange);
    }

    #[test]
    fn flat_segment_stays_flat_with_negative_keys() {
        let t = sample();
        assert_eq!(evaluate(&t, "Flat", -37.25), Evaluation::Value(10.0));
        assert_eq!(evaluate(&t, "Flat", 0.0), Evaluation::Value(10.0));
    }

    #[test]
    fn interpolation_is_strictly_between_endpoints() {
        let t = sample();
        for temp in [0.5, 1.0, 13.7, 50.0, 99.0, 99.5] {
            let v = evaluate(&t, "O2", temp).value().unwrap();
            assert!(v > 29.27 && v < 29.5, "{temp} gave {v}");
        }
        for temp in [1.0, 500.0, 999.0, 1500.25] {
            let v = evaluate(&t, "H2O", temp).value().unwrap();
            assert!(v > 33.499 && v < 43.973, "{temp} gave {v}");
        }
    }

    #[test]
    fn fractional_temperature_between_integer_keys() {
        let t = table(&[("X", &[(0, HeatValue::Measured(0.0)), (1, HeatValue::Measured(1.0))])]);
        assert_eq!(evaluate(&t, "X", 0.25), Evaluation::Value(0.25));
        assert_eq!(evaluate(&t, "X", 0.1234), Evaluation::Value(0.123));
    }

    #[test]
    fn rounding_is_half_even_on_ties() {
        assert_eq!(round_half_even(0.0625, 3), 0.062);
        assert_eq!(round_half_even(0.1875, 3), 0.188);
        assert_eq!(round_half_even(2.5, 0), 2.0);
        assert_eq!(round_half_even(3.5, 0), 4.0);
        assert_eq!(round_half_even(-1.23456, 3), -1.235);
    }

    #[test]
    fn rounding_uses_the_exact_binary_value() {
        // 29.228 + 0.155 * 0.7 is 29.3365000000000009..., just above the tie.
        let t = table(&[("N2", &[(200, HeatValue::Measured(29.228)), (300, HeatValue::Measured(29.383))])]);
        assert_eq!(evaluate(&t, "N2", 270.0), Evaluation::Value(29.337));
        // 2.675 is stored as 2.67499999999999982..., below the tie.
        assert_eq!(round_half_even(2.675, 2), 2.67);
    }

    #[test]
    fn exact_match_on_large_maximum_key() {
        let t = parse_table(r#"{"X": {"0": 1.0, "10000000000000000": 2.0}}"#).unwrap();
        assert_eq!(evaluate(&t, "X", 1.0e16), Evaluation::Value(2.0));
        assert_eq!(evaluate(&t, "X", 5.0e15), Evaluation::Value(1.5));
        assert_eq!(evaluate(&t, "X", 1.0e16 + 2.0), Evaluation::OutOfRange);
    }
}
