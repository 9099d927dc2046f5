//! Interpolation engine.
//!
//! - `engine`: `(table, gas, temperature) → Evaluation`
//! - `curve`: sampled curves for plotting

pub mod curve;
pub mod engine;

pub use curve::{known_points, sample_curve};
pub use engine::{evaluate, evaluate_points, is_no_selection};
