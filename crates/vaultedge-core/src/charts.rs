//! Geometry for the dashboard's canvas charts.
//!
//! The browser only animates and strokes what is computed here: projected
//! points and curve control points for the portfolio line chart, and slice
//! angles for the allocation donut.

use std::f64::consts::{FRAC_PI_2, PI};

use serde::Serialize;

/// Plot-area padding around the line chart, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Padding {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            left: 60.0,
            right: 20.0,
            top: 20.0,
            bottom: 40.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Cubic bezier from the previous point to `end`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CurveSegment {
    pub cp1: Point,
    pub cp2: Point,
    pub end: Point,
}

/// Horizontal grid line with its y-axis label.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GridLine {
    pub y: f64,
    pub label: String,
}

/// x-axis label position.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AxisLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Everything needed to draw the portfolio line chart.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineChart {
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
    /// Bottom of the plotted value range.
    pub min: f64,
    /// Top of the plotted value range.
    pub max: f64,
    /// y coordinate of the plot floor (where the area fill closes).
    pub baseline: f64,
    pub points: Vec<Point>,
    /// One segment per point after the first.
    pub curves: Vec<CurveSegment>,
    pub grid: Vec<GridLine>,
    pub x_labels: Vec<AxisLabel>,
}

const GRID_LINES: usize = 4;

impl LineChart {
    /// Lay out `values` on a `width` x `height` canvas.
    ///
    /// The value range is padded to `min * 0.95 .. max * 1.02`. A flat series
    /// gets a unit range so projection stays finite.
    pub fn layout(values: &[f64], labels: &[&str], width: f64, height: f64) -> Self {
        let padding = Padding::default();
        let graph_w = (width - padding.left - padding.right).max(0.0);
        let graph_h = (height - padding.top - padding.bottom).max(0.0);
        let baseline = padding.top + graph_h;

        let (lo, hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let (mut min, mut max) = if values.is_empty() {
            (0.0, 1.0)
        } else {
            (lo * 0.95, hi * 1.02)
        };
        if (max - min).abs() < f64::EPSILON {
            min -= 0.5;
            max += 0.5;
        }

        let x_at = |i: usize| {
            if values.len() < 2 {
                padding.left
            } else {
                padding.left + (i as f64 / (values.len() - 1) as f64) * graph_w
            }
        };
        let y_at = |v: f64| padding.top + graph_h - ((v - min) / (max - min)) * graph_h;

        let points: Vec<Point> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| Point { x: x_at(i), y: y_at(v) })
            .collect();

        let curves = points
            .windows(2)
            .map(|pair| {
                let (prev, next) = (pair[0], pair[1]);
                let mid_x = (prev.x + next.x) / 2.0;
                CurveSegment {
                    cp1: Point { x: mid_x, y: prev.y },
                    cp2: Point { x: mid_x, y: next.y },
                    end: next,
                }
            })
            .collect();

        let grid = (0..=GRID_LINES)
            .map(|i| {
                let frac = i as f64 / GRID_LINES as f64;
                GridLine {
                    y: padding.top + frac * graph_h,
                    label: format_millions(max - frac * (max - min)),
                }
            })
            .collect();

        let x_labels = labels
            .iter()
            .take(values.len().max(1))
            .enumerate()
            .map(|(i, text)| AxisLabel {
                x: x_at(i),
                y: height - 10.0,
                text: (*text).to_string(),
            })
            .collect();

        Self {
            width,
            height,
            padding,
            min,
            max,
            baseline,
            points,
            curves,
            grid,
            x_labels,
        }
    }
}

/// `2_847_563.0` becomes `"$2.8M"`.
pub fn format_millions(value: f64) -> String {
    format!("${:.1}M", value / 1_000_000.0)
}

/// One input slice for the donut.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Segment {
    pub label: String,
    pub value: f64,
    pub color: String,
}

/// A laid-out donut slice; angles in radians, canvas convention.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DonutSlice {
    pub label: String,
    pub color: String,
    pub value: f64,
    /// Share of the total, 0..=100.
    pub percent: f64,
    pub start_angle: f64,
    pub sweep: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DonutChart {
    pub size: f64,
    pub center: Point,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub slices: Vec<DonutSlice>,
}

pub const DONUT_SIZE: f64 = 200.0;
pub const DONUT_OUTER_RADIUS: f64 = 88.0;
pub const DONUT_INNER_RADIUS: f64 = 58.0;

impl DonutChart {
    /// Slices start at twelve o'clock and run clockwise.
    pub fn layout(segments: &[Segment]) -> Self {
        let total: f64 = segments.iter().map(|s| s.value.max(0.0)).sum();
        let mut start = -FRAC_PI_2;

        let slices = segments
            .iter()
            .map(|seg| {
                let share = if total > 0.0 {
                    seg.value.max(0.0) / total
                } else {
                    0.0
                };
                let sweep = share * 2.0 * PI;
                let slice = DonutSlice {
                    label: seg.label.clone(),
                    color: seg.color.clone(),
                    value: seg.value,
                    percent: share * 100.0,
                    start_angle: start,
                    sweep,
                };
                start += sweep;
                slice
            })
            .collect();

        Self {
            size: DONUT_SIZE,
            center: Point {
                x: DONUT_SIZE / 2.0,
                y: DONUT_SIZE / 2.0,
            },
            outer_radius: DONUT_OUTER_RADIUS,
            inner_radius: DONUT_INNER_RADIUS,
            slices,
        }
    }
}
