//! Curve sampling for charts.

use crate::domain::{Evaluation, GasPoints};
use crate::interp::engine::evaluate_points;

/// Evaluate `n` evenly spaced temperatures across the gas's key range.
///
/// Temperatures that do not produce a number (N/A segments) are skipped, so
/// the result may be shorter than `n`.
pub fn sample_curve(points: &GasPoints, n: usize) -> Vec<(f64, f64)> {
    let Some((lo, hi)) = points.key_range() else {
        return Vec::new();
    };
    let (t0, t1) = (lo as f64, hi as f64);
    if lo == hi {
        return match evaluate_points(points, t0) {
            Evaluation::Value(v) => vec![(t0, v)],
            _ => Vec::new(),
        };
    }

    let n = n.max(2);
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let t = t0 + u * (t1 - t0);
        if let Evaluation::Value(v) = evaluate_points(points, t) {
            out.push((t, v));
        }
    }
    out
}

/// The measured table points, for scatter markers.
pub fn known_points(points: &GasPoints) -> Vec<(f64, f64)> {
    points
        .iter()
        .filter_map(|(t, v)| v.measured().map(|v| (t as f64, v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HeatValue;

    #[test]
    fn sample_curve_spans_range_and_skips_not_applicable() {
        let points = GasPoints::new(
            [
                (0, HeatValue::Measured(1.0)),
                (100, HeatValue::Measured(2.0)),
                (200, HeatValue::NotApplicable),
            ]
            .into_iter()
            .collect(),
        );
        let curve = sample_curve(&points, 5);
        // 0, 50, 100 are numeric; 150 bridges to N/A; 200 is N/A.
        assert_eq!(curve.len(), 3);
        assert_eq!(curve[0], (0.0, 1.0));
        assert_eq!(curve[1], (50.0, 1.5));
        assert_eq!(curve[2], (100.0, 2.0));

        assert_eq!(known_points(&points), vec![(0.0, 1.0), (100.0, 2.0)]);
    }
}
