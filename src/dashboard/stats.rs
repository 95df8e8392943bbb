use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::{AttendanceRecord, Employee, LeaveRequest};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DepartmentBucket {
    #[schema(example = "Engineering")]
    pub name: String,
    #[schema(example = 12)]
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_employees: usize,
    pub present_today: usize,
    pub on_leave_today: usize,
    pub leaves_pending: usize,
    /// Non-increasing by count
    pub departments: Vec<DepartmentBucket>,
}

impl DashboardStats {
    /// Recomputes every metric from the three collections.
    ///
    /// `today` is `None` when the caller has no reference day; present and
    /// on-leave counts are then zero.
    pub fn compute(
        employees: &[Employee],
        attendance: &[AttendanceRecord],
        leaves: &[LeaveRequest],
        today: Option<NaiveDate>,
    ) -> Self {
        let present_today = today.map_or(0, |day| {
            attendance.iter().filter(|a| a.is_present_on(day)).count()
        });

        let on_leave_today = today.map_or(0, |day| {
            leaves
                .iter()
                .filter(|l| l.is_approved() && l.covers(day))
                .count()
        });

        Self {
            total_employees: employees.len(),
            present_today,
            on_leave_today,
            leaves_pending: leaves.iter().filter(|l| l.is_pending()).count(),
            departments: department_breakdown(employees),
        }
    }
}

/// Groups employees by department and sorts descending by count.
///
/// Ties keep first-seen order. That is an artifact of the stable sort, not a
/// contract: callers must not rely on the order of equal buckets.
pub fn department_breakdown(employees: &[Employee]) -> Vec<DepartmentBucket> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<DepartmentBucket> = Vec::new();

    for employee in employees {
        let name = employee.department_name();
        match index.get(name) {
            Some(&slot) => buckets[slot].count += 1,
            None => {
                index.insert(name, buckets.len());
                buckets.push(DepartmentBucket {
                    name: name.to_string(),
                    count: 1,
                });
            }
        }
    }

    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets
}

/// The first `n` buckets, for the bar chart.
pub fn top_departments(buckets: &[DepartmentBucket], n: usize) -> &[DepartmentBucket] {
    &buckets[..buckets.len().min(n)]
}
