//! JSON reference table ingest and normalization.
//!
//! The resource is a JSON object of gas name → object of temperature → value:
//!
//! ```text
//! { "O2": { "0": 29.274, "100": 29.538 }, "H2O": { "2000": 43.973, "3000": "" } }
//! ```
//!
//! Temperature keys arrive as strings and are normalized to integers here, so
//! the engine never deals with text. An empty string value means "not
//! applicable at this temperature".

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{Gas, GasPoints, HeatValue, ReferenceTable};
use crate::error::LoadError;

/// A point value as written in the resource, before validation.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(f64),
    Text(String),
}

/// Read and normalize the reference table at `path`.
pub fn load_table(path: &Path) -> Result<ReferenceTable, LoadError> {
    if !path.exists() {
        return Err(LoadError::ResourceNotFound(path.to_path_buf()));
    }

    let text = fs::read_to_string(path).map_err(|e| LoadError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    parse_table(&text)
}

/// Normalize the JSON text of a reference table.
pub fn parse_table(text: &str) -> Result<ReferenceTable, LoadError> {
    let root: Map<String, Value> =
        serde_json::from_str(text).map_err(|e| LoadError::ParseError(e.to_string()))?;

    let mut gases = Vec::with_capacity(root.len());
    for (name, entry) in root {
        let Value::Object(raw_points) = entry else {
            return Err(LoadError::ParseError(format!(
                "gas '{name}': expected an object of temperature points"
            )));
        };

        let points = parse_points(&name, raw_points)?;
        if points.is_empty() {
            return Err(LoadError::EmptyGas(name));
        }
        gases.push(Gas {
            name,
            points: GasPoints::new(points),
        });
    }

    Ok(ReferenceTable::new(gases))
}

fn parse_points(gas: &str, raw: Map<String, Value>) -> Result<BTreeMap<i64, HeatValue>, LoadError> {
    let mut points = BTreeMap::new();
    for (key, value) in raw {
        let temperature = parse_temperature_key(gas, &key)?;
        let value = parse_value(gas, &key, value)?;
        if points.insert(temperature, value).is_some() {
            return Err(LoadError::InvalidTemperatureKey {
                gas: gas.to_string(),
                key,
                reason: format!("duplicates an earlier key for {temperature} °C"),
            });
        }
    }
    Ok(points)
}

fn parse_temperature_key(gas: &str, key: &str) -> Result<i64, LoadError> {
    key.trim()
        .parse::<i64>()
        .map_err(|e| LoadError::InvalidTemperatureKey {
            gas: gas.to_string(),
            key: key.to_string(),
            reason: e.to_string(),
        })
}

fn parse_value(gas: &str, key: &str, value: Value) -> Result<HeatValue, LoadError> {
    let shown = value.to_string();
    match RawValue::deserialize(value) {
        Ok(RawValue::Number(v)) => Ok(HeatValue::Measured(v)),
        Ok(RawValue::Text(s)) if s.trim().is_empty() => Ok(HeatValue::NotApplicable),
        _ => Err(LoadError::ParseError(format!(
            "gas '{gas}' at '{key}': expected a number or an empty string, got {shown}"
        ))),
    }
}
