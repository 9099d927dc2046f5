//! `gas-cp` library crate.
//!
//! The binary (`gascp`) is a thin wrapper around this library so that:
//!
//! - the table loader and interpolation engine are testable without a terminal
//! - the engine is reusable by other front-ends
//! - presentation code (form, reports, plots) stays separate from the math

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod interp;
pub mod io;
pub mod plot;
pub mod report;
pub mod tui;
