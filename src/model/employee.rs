use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::wire;

/// Department name substituted for employees with no (or a blank) department.
pub const UNKNOWN_DEPARTMENT: &str = "Unknown";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": "65f1c0a2e4b0a1b2c3d4e5f6",
        "employeeId": "EMP001",
        "fullName": "John Doe",
        "email": "john.doe@company.com",
        "department": "Engineering"
    })
)]
pub struct Employee {
    /// Backend record id, used in `/api/employees/{id}`
    #[serde(alias = "_id", deserialize_with = "wire::id")]
    pub id: Option<String>,

    /// Business key, unique across employees
    #[serde(deserialize_with = "wire::text")]
    pub employee_id: Option<String>,

    #[serde(deserialize_with = "wire::text")]
    pub full_name: Option<String>,

    #[serde(deserialize_with = "wire::text")]
    pub email: Option<String>,

    #[serde(deserialize_with = "wire::text")]
    pub department: Option<String>,
}

impl Employee {
    /// Trimmed department, or [`UNKNOWN_DEPARTMENT`] when missing or blank.
    pub fn department_name(&self) -> &str {
        match self.department.as_deref().map(str::trim) {
            // whitespace-only joins Unknown instead of forming an unnamed bucket
            Some(name) if !name.is_empty() => name,
            _ => UNKNOWN_DEPARTMENT,
        }
    }

    /// Case-insensitive substring match over the searchable text fields.
    /// `needle` must already be lowercased.
    fn matches(&self, needle: &str) -> bool {
        [
            &self.employee_id,
            &self.full_name,
            &self.email,
            &self.department,
        ]
        .into_iter()
        .any(|field| {
            field
                .as_deref()
                .unwrap_or_default()
                .to_lowercase()
                .contains(needle)
        })
    }
}

/// Filters employees for the search box. A blank query returns everything.
pub fn search<'a>(employees: &'a [Employee], query: &str) -> Vec<&'a Employee> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return employees.iter().collect();
    }
    employees.iter().filter(|e| e.matches(&needle)).collect()
}

/// Create/update body sent to `/api/employees`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[schema(example = "john.doe@company.com", format = "email")]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
}

impl EmployeePayload {
    pub fn trimmed(self) -> Self {
        Self {
            employee_id: self.employee_id.trim().to_string(),
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            department: self.department.trim().to_string(),
        }
    }
}
