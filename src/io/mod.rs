//! Output files.
//!
//! - grid exports (CSV) (`export`)

pub mod export;

pub use export::*;
