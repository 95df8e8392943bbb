use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use super::wire;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString, AsRefStr,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(alias = "_id", deserialize_with = "wire::id")]
    pub id: Option<String>,

    #[serde(deserialize_with = "wire::text")]
    pub employee_id: Option<String>,

    /// Truncated to the calendar day on decode
    #[serde(deserialize_with = "wire::day")]
    #[schema(value_type = Option<String>, format = "date", example = "2024-02-01")]
    pub date: Option<NaiveDate>,

    /// Kept raw; only an exact `"Present"` counts anywhere
    #[serde(deserialize_with = "wire::text")]
    #[schema(example = "Present")]
    pub status: Option<String>,
}

impl AttendanceRecord {
    pub fn is_present(&self) -> bool {
        self.status.as_deref() == Some(AttendanceStatus::Present.as_ref())
    }

    pub fn is_present_on(&self, day: NaiveDate) -> bool {
        self.date == Some(day) && self.is_present()
    }
}

/// Body for `POST /api/attendance`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendance {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    #[schema(value_type = String, format = "date", example = "2024-02-01")]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

impl MarkAttendance {
    pub fn trimmed(self) -> Self {
        Self {
            employee_id: self.employee_id.trim().to_string(),
            ..self
        }
    }
}
