//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - table points: `o`
//! - interpolated curve: `-` line
//! - optional query point: `X`

use crate::domain::GasPoints;
use crate::interp::{known_points, sample_curve};

/// Render a gas curve with its table points and an optional marked value.
pub fn render_gas_plot(
    gas: &str,
    points: &GasPoints,
    marker: Option<(f64, f64)>,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let Some((lo, hi)) = points.key_range() else {
        return format!("Plot: {gas} has no points\n");
    };
    let (t_min, t_max) = if hi > lo {
        (lo as f64, hi as f64)
    } else {
        (lo as f64 - 0.5, hi as f64 + 0.5)
    };

    let curve = sample_curve(points, width);
    let table = known_points(points);

    let (y_min, y_max) = y_range(&curve, &table).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw curve first (so points can overlay).
    draw_curve(&mut grid, &curve, t_min, t_max, y_min, y_max);

    for &(t, y) in &table {
        let x = map_x(t, t_min, t_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][x] = 'o';
    }

    if let Some((t, y)) = marker {
        let x = map_x(t, t_min, t_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][x] = 'X';
    }

    // Build final string. We include a small header with ranges.
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {gas} | t=[{t_min:.0}, {t_max:.0}] °C | cp=[{y_min:.2}, {y_max:.2}] kJ/kmolK\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn y_range(curve: &[(f64, f64)], table: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for &(_, y) in curve.iter().chain(table) {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else if min_y.is_finite() && min_y == max_y {
        Some((min_y - 0.5, max_y + 0.5))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], t_min: f64, t_max: f64, y_min: f64, y_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(t, y) in curve {
        let x = map_x(t, t_min, t_max, width);
        let yy = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, yy, '-');
        } else {
            grid[yy][x] = '-';
        }
        prev = Some((x, yy));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HeatValue;

    #[test]
    fn plot_golden_snapshot_small() {
        let points = GasPoints::new(
            [(0, HeatValue::Measured(100.0)), (10, HeatValue::Measured(110.0))]
                .into_iter()
                .collect(),
        );

        let txt = render_gas_plot("X", &points, None, 10, 5);
        let expected = concat!(
            "Plot: X | t=[0, 10] °C | cp=[99.50, 110.50] kJ/kmolK\n",
            "         o\n",
            "      --- \n",
            "    --    \n",
            " ---      \n",
            "o         \n",
        );
        assert_eq!(txt, expected);
    }
}
