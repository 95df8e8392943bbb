use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use super::wire;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString, AsRefStr,
)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct LeaveRequest {
    #[serde(alias = "_id", deserialize_with = "wire::id")]
    pub id: Option<String>,

    #[serde(deserialize_with = "wire::text")]
    pub employee_id: Option<String>,

    #[serde(deserialize_with = "wire::day")]
    #[schema(value_type = Option<String>, format = "date", example = "2024-02-01")]
    pub from_date: Option<NaiveDate>,

    /// Inclusive
    #[serde(deserialize_with = "wire::day")]
    #[schema(value_type = Option<String>, format = "date", example = "2024-02-03")]
    pub to_date: Option<NaiveDate>,

    #[serde(deserialize_with = "wire::text")]
    pub reason: Option<String>,

    #[serde(deserialize_with = "wire::text")]
    #[schema(example = "Pending")]
    pub status: Option<String>,
}

impl LeaveRequest {
    /// Case-insensitive, so `"APPROVED"` and `"approved"` both count.
    pub fn is_approved(&self) -> bool {
        self.status.as_deref().unwrap_or_default().to_lowercase() == "approved"
    }

    /// Case-sensitive: only the exact backend spelling `"Pending"` matches.
    /// Deliberately asymmetric with [`LeaveRequest::is_approved`].
    pub fn is_pending(&self) -> bool {
        self.status.as_deref() == Some(LeaveStatus::Pending.as_ref())
    }

    /// Whether `day` lies in `[from_date, to_date]`. Missing bounds never cover.
    pub fn covers(&self, day: NaiveDate) -> bool {
        match (self.from_date, self.to_date) {
            (Some(from), Some(to)) => from <= day && day <= to,
            _ => false,
        }
    }
}

/// Body for `POST /api/leaves`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyLeave {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    #[schema(value_type = String, format = "date", example = "2024-02-01")]
    pub from_date: NaiveDate,
    #[schema(value_type = String, format = "date", example = "2024-02-03")]
    pub to_date: NaiveDate,
    #[serde(default)]
    #[schema(example = "Family event")]
    pub reason: String,
}

impl ApplyLeave {
    pub fn trimmed(self) -> Self {
        Self {
            employee_id: self.employee_id.trim().to_string(),
            reason: self.reason.trim().to_string(),
            ..self
        }
    }
}

/// Body for `PUT /api/leaves/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateLeaveStatus {
    pub status: LeaveStatus,
}
