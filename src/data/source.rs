//! Locating the reference table resource.
//!
//! Resolution order:
//! 1. explicit `--data <path>`
//! 2. `GASCP_DATA` from the environment (a `.env` file is honoured)
//! 3. the first existing default path (`data/gases.json`, then `gasses.json`)
//!
//! When nothing exists, the first default is returned so the load error names
//! a sensible file.

use std::path::{Path, PathBuf};

pub const DATA_ENV_VAR: &str = "GASCP_DATA";

pub const DEFAULT_DATA_PATHS: [&str; 2] = ["data/gases.json", "gasses.json"];

/// Resolve the resource path from flags and environment.
pub fn resolve_data_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    dotenvy::dotenv().ok();
    pick_data_path(None, std::env::var(DATA_ENV_VAR).ok(), |p| p.exists())
}

fn pick_data_path(explicit: Option<&Path>, env_value: Option<String>, exists: impl Fn(&Path) -> bool) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    if let Some(value) = env_value {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    DEFAULT_DATA_PATHS
        .iter()
        .map(Path::new)
        .find(|&p| exists(p))
        .unwrap_or_else(|| Path::new(DEFAULT_DATA_PATHS[0]))
        .to_path_buf()
}
