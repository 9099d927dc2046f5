//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - the reference table (`ReferenceTable`, `Gas`, `GasPoints`, `HeatValue`)
//! - evaluation outcomes (`Evaluation`)
//! - front-end settings (`FormConfig`, `GridConfig`)

pub mod types;

pub use types::*;
