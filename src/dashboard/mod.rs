//! Derived dashboard state: summary counts, the monthly series and the chart
//! geometry built on them. All of it is recomputed from the source
//! collections on every read and never updated in place.

pub mod chart;
pub mod monthly;
pub mod stats;
pub mod svg;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::{AttendanceRecord, Employee, LeaveRequest};
use chart::{Bar, BarStyle, LineChart, Viewport};
pub use monthly::{DayPoint, MonthlySeries};
pub use stats::{DashboardStats, DepartmentBucket};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    #[schema(value_type = Option<String>, format = "date")]
    pub today: Option<NaiveDate>,
    pub stats: DashboardStats,
    pub monthly: MonthlySeries,
    pub department_bars: Vec<Bar>,
    pub attendance_line: LineChart,
}

impl DashboardSnapshot {
    /// `period` selects the month for the attendance series.
    pub fn build(
        employees: &[Employee],
        attendance: &[AttendanceRecord],
        leaves: &[LeaveRequest],
        today: Option<NaiveDate>,
        period: NaiveDate,
        top_n: usize,
    ) -> Self {
        let stats = DashboardStats::compute(employees, attendance, leaves, today);
        let monthly = MonthlySeries::for_month_of(attendance, period);
        let department_bars = chart::bar_chart(
            stats::top_departments(&stats.departments, top_n),
            &Viewport::DEPARTMENT_BARS,
            &BarStyle::default(),
        );
        let attendance_line = chart::line_chart(&monthly, &Viewport::MONTHLY_LINE);

        Self {
            today,
            stats,
            monthly,
            department_bars,
            attendance_line,
        }
    }
}
