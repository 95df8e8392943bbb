use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::AttendanceRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayPoint {
    /// 1-based day of month
    pub day: u32,
    pub present_count: usize,
}

/// Dense per-day present counts for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySeries {
    pub year: i32,
    pub month: u32,
    /// Exactly one point per day, in day order
    pub points: Vec<DayPoint>,
    /// Never below 1, so it is always safe to divide by
    pub max_daily_present: usize,
    pub month_total_present: usize,
}

/// Number of days in `month` (1-based) of `year`; 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 0,
    }
}

impl MonthlySeries {
    /// Builds the series for the month containing `now`.
    pub fn for_month_of(attendance: &[AttendanceRecord], now: impl Datelike) -> Self {
        Self::compute(attendance, now.year(), now.month())
    }

    pub fn compute(attendance: &[AttendanceRecord], year: i32, month: u32) -> Self {
        let days = days_in_month(year, month);
        let mut points: Vec<DayPoint> = (1..=days)
            .map(|day| DayPoint {
                day,
                present_count: 0,
            })
            .collect();

        for record in attendance {
            let Some(date) = record.date else {
                continue;
            };
            if date.year() != year || date.month() != month {
                continue;
            }
            let index = date.day0() as usize;
            if index >= points.len() {
                continue;
            }
            if record.is_present() {
                points[index].present_count += 1;
            }
        }

        let month_total_present = points.iter().map(|p| p.present_count).sum();
        let max_daily_present = points
            .iter()
            .map(|p| p.present_count)
            .max()
            .unwrap_or(0)
            .max(1);

        Self {
            year,
            month,
            points,
            max_daily_present,
            month_total_present,
        }
    }

    pub fn days_in_month(&self) -> u32 {
        self.points.len() as u32
    }

    /// True when no day has a present record; callers render an empty state.
    pub fn is_empty(&self) -> bool {
        self.month_total_present == 0
    }
}
