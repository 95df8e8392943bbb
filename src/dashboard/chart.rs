//! Pixel geometry for the two dashboard charts.
//!
//! Everything here is a total, deterministic function of its input so the
//! output can be snapshot-tested and rendered identically on every read.

use std::fmt::Write as _;

use serde::Serialize;
use utoipa::ToSchema;

use super::monthly::MonthlySeries;
use super::stats::DepartmentBucket;

/// Opacity of line-chart points with a zero value.
pub const MUTED_OPACITY: f64 = 0.25;

const ELLIPSIS: char = '…';

/// Fixed drawing area with padding insets. Origin is top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pad_left: f64,
    pub pad_right: f64,
    pub pad_top: f64,
    pub pad_bottom: f64,
}

impl Viewport {
    pub const DEPARTMENT_BARS: Viewport = Viewport {
        width: 520.0,
        height: 180.0,
        pad_left: 16.0,
        pad_right: 16.0,
        pad_top: 18.0,
        pad_bottom: 28.0,
    };

    pub const MONTHLY_LINE: Viewport = Viewport {
        width: 920.0,
        height: 260.0,
        pad_left: 44.0,
        pad_right: 18.0,
        pad_top: 22.0,
        pad_bottom: 34.0,
    };

    pub fn inner_width(&self) -> f64 {
        self.width - self.pad_left - self.pad_right
    }

    pub fn inner_height(&self) -> f64 {
        self.height - self.pad_top - self.pad_bottom
    }

    /// y of the shared baseline bars grow from.
    pub fn baseline(&self) -> f64 {
        self.pad_top + self.inner_height()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarStyle {
    pub gap: f64,
    pub label_chars: usize,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            gap: 14.0,
            label_chars: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Bar {
    pub name: String,
    /// `name`, cut to the label limit with an ellipsis
    pub label: String,
    pub count: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LinePoint {
    pub day: u32,
    pub value: usize,
    pub x: f64,
    pub y: f64,
    /// Rendering hint only; position is unaffected
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineChart {
    pub points: Vec<LinePoint>,
    /// SVG path data joining the points in day order
    pub path: String,
    pub max_y: usize,
    pub tick_days: Vec<u32>,
}

pub fn truncate_label(name: &str, limit: usize) -> String {
    if name.chars().count() > limit {
        let mut label: String = name.chars().take(limit).collect();
        label.push(ELLIPSIS);
        label
    } else {
        name.to_string()
    }
}

/// Lays out one bar per bucket, left to right, in the given order.
///
/// The caller sorts and truncates `buckets` beforehand.
pub fn bar_chart(buckets: &[DepartmentBucket], viewport: &Viewport, style: &BarStyle) -> Vec<Bar> {
    if buckets.is_empty() {
        return Vec::new();
    }

    let n = buckets.len() as f64;
    let inner_height = viewport.inner_height();
    let bar_width = (viewport.inner_width() - style.gap * (n - 1.0)) / n;
    let max = buckets.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64;

    buckets
        .iter()
        .enumerate()
        .map(|(i, bucket)| {
            let height = bucket.count as f64 / max * inner_height;
            Bar {
                name: bucket.name.clone(),
                label: truncate_label(&bucket.name, style.label_chars),
                count: bucket.count,
                x: viewport.pad_left + i as f64 * (bar_width + style.gap),
                y: viewport.pad_top + (inner_height - height),
                width: bar_width,
                height,
            }
        })
        .collect()
}

/// x for a 1-based `day`; a single-day month sits at the horizontal center.
pub fn day_x(day: u32, days_in_month: u32, viewport: &Viewport) -> f64 {
    if days_in_month <= 1 {
        return viewport.pad_left + viewport.inner_width() / 2.0;
    }
    let t = f64::from(day.saturating_sub(1)) / f64::from(days_in_month - 1);
    viewport.pad_left + t * viewport.inner_width()
}

/// y for `value` against `max_y`; larger values sit closer to the top.
pub fn value_y(value: usize, max_y: usize, viewport: &Viewport) -> f64 {
    let max_y = max_y.max(1) as f64;
    viewport.pad_top + (1.0 - value as f64 / max_y) * viewport.inner_height()
}

/// Ticks at days 1, 8, 15, 22 and 29 that exist in the month.
pub fn tick_days(days_in_month: u32) -> Vec<u32> {
    [1, 8, 15, 22, 29]
        .into_iter()
        .filter(|&d| d <= days_in_month)
        .collect()
}

pub fn line_chart(series: &MonthlySeries, viewport: &Viewport) -> LineChart {
    let days = series.days_in_month();
    let max_y = series.max_daily_present;

    let points: Vec<LinePoint> = series
        .points
        .iter()
        .map(|p| LinePoint {
            day: p.day,
            value: p.present_count,
            x: day_x(p.day, days, viewport),
            y: value_y(p.present_count, max_y, viewport),
            opacity: if p.present_count == 0 { MUTED_OPACITY } else { 1.0 },
        })
        .collect();

    let mut path = String::new();
    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            path.push(' ');
        }
        let command = if i == 0 { 'M' } else { 'L' };
        let _ = write!(path, "{command} {} {}", point.x, point.y);
    }

    LineChart {
        points,
        path,
        max_y,
        tick_days: tick_days(days),
    }
}
