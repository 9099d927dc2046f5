use std::path::{Path, PathBuf};

use gas_cp::data::{TableCache, load_table};
use gas_cp::domain::{Evaluation, HeatValue, NO_SELECTION};
use gas_cp::interp::evaluate;

fn shipped_data() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join("gases.json")
}

#[test]
fn shipped_table_loads_in_file_order() {
    let table = load_table(&shipped_data()).unwrap();
    let names: Vec<&str> = table.names().collect();
    assert_eq!(names, vec!["N2", "O2", "CO", "CO2", "H2O", "H2", "Air", "SO2"]);
    for gas in table.gases() {
        assert_eq!(gas.points.key_range(), Some((0, 3000)), "{}", gas.name);
    }
}

#[test]
fn known_temperatures_return_stored_values() {
    let table = load_table(&shipped_data()).unwrap();
    for gas in table.gases() {
        for (t, stored) in gas.points.iter() {
            let expected = match stored {
                HeatValue::Measured(v) => Evaluation::Value(v),
                HeatValue::NotApplicable => Evaluation::NotApplicable,
            };
            assert_eq!(evaluate(&table, &gas.name, t as f64), expected, "{} at {t}", gas.name);
        }
    }
}

#[test]
fn midpoints_lie_between_neighbours() {
    let table = load_table(&shipped_data()).unwrap();
    for gas in table.gases() {
        let pts: Vec<(i64, HeatValue)> = gas.points.iter().collect();
        for pair in pts.windows(2) {
            let (x1, y1) = pair[0];
            let (x2, y2) = pair[1];
            let mid = (x1 + x2) as f64 / 2.0;
            let got = evaluate(&table, &gas.name, mid);
            match (y1.measured(), y2.measured()) {
                (Some(y1), Some(y2)) => {
                    let v = got.value().unwrap_or_else(|| panic!("{} at {mid}: {got:?}", gas.name));
                    let (lo, hi) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
                    if (y2 - y1).abs() > 0.002 {
                        assert!(v > lo && v < hi, "{} at {mid}: {v} not in ({lo}, {hi})", gas.name);
                    } else {
                        assert!((v - y1).abs() <= 0.001, "{} at {mid}: {v}", gas.name);
                    }
                }
                _ => assert_eq!(got, Evaluation::NotApplicable, "{} at {mid}", gas.name),
            }
        }
    }
}

#[test]
fn outside_range_and_sentinels() {
    let table = load_table(&shipped_data()).unwrap();
    for gas in table.names() {
        assert_eq!(evaluate(&table, gas, -0.5), Evaluation::OutOfRange);
        assert_eq!(evaluate(&table, gas, 3000.01), Evaluation::OutOfRange);
        assert_eq!(evaluate(&table, gas, -273.15), Evaluation::OutOfRange);
    }
    for t in [-1.0e9, 0.0, 123.456, 5000.0] {
        assert_eq!(evaluate(&table, NO_SELECTION, t), Evaluation::NoSelection);
    }
    assert_eq!(evaluate(&table, "UnknownGasXYZ", 100.0), Evaluation::NoData);
    assert_eq!(evaluate(&table, "H2O", 3000.0), Evaluation::NotApplicable);
    assert_eq!(evaluate(&table, "H2O", 2750.0), Evaluation::NotApplicable);
    assert_eq!(evaluate(&table, "SO2", 1900.0), Evaluation::NotApplicable);
}

#[test]
fn interpolates_shipped_oxygen() {
    let table = load_table(&shipped_data()).unwrap();
    // 29.274 + (29.538 - 29.274) / 100 * 50 = 29.406
    assert_eq!(evaluate(&table, "O2", 50.0), Evaluation::Value(29.406));
    assert_eq!(evaluate(&table, "O2", 100.0), Evaluation::Value(29.538));
}

#[test]
fn reload_is_idempotent() {
    let mut cache = TableCache::new(shipped_data());
    let first = cache.get().unwrap();
    let second = cache.reload().unwrap();
    assert_eq!(*first, *second);
}
