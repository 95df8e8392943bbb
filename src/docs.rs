use crate::api::auth::LoginForm;
use crate::api::dashboard::{DashboardResponse, DomainStatus};
use crate::auth::jwt::SessionInfo;
use crate::dashboard::chart::{Bar, LineChart, LinePoint, Viewport};
use crate::dashboard::{DashboardSnapshot, DashboardStats, DayPoint, DepartmentBucket, MonthlySeries};
use crate::model::{
    ApplyLeave, AttendanceRecord, AttendanceStatus, Employee, EmployeePayload, LeaveRequest,
    LeaveStatus, MarkAttendance, UpdateLeaveStatus,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite Dashboard API",
        version = "1.0.0",
        description = r#"
## HRMS Lite admin dashboard

Sits in front of the HRMS Lite REST API and serves the admin dashboard.

### 🔹 Key Features
- **Dashboard**
  - Total employees, present today, on leave today, pending leaves
  - Department breakdown and monthly attendance, as JSON geometry or SVG
- **Employee Management**
  - List, search, create, update and delete employee records
- **Attendance**
  - Mark daily Present/Absent attendance
- **Leave Management**
  - Apply for leave, approve or reject requests

### 🔐 Security
The bearer token returned by `/auth/login` is forwarded to the HRMS API on
every call. Attendance and leave routes require it when the deployment sets
`REQUIRE_AUTH`.

### 📦 Response Format
Collections come back with their fetch status (`loading`, `error`, `data`);
a failed fetch keeps the last good data.
"#,
    ),
    paths(
        crate::api::auth::login,
        crate::api::auth::session,

        crate::api::dashboard::dashboard,
        crate::api::dashboard::department_chart,
        crate::api::dashboard::attendance_chart,
        crate::api::refresh::refresh,

        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::list_attendance,
        crate::api::attendance::mark_attendance,

        crate::api::leave_request::list_leaves,
        crate::api::leave_request::apply_leave,
        crate::api::leave_request::update_leave_status
    ),
    components(
        schemas(
            LoginForm,
            SessionInfo,
            DashboardResponse,
            DomainStatus,
            DashboardSnapshot,
            DashboardStats,
            DepartmentBucket,
            MonthlySeries,
            DayPoint,
            Bar,
            LineChart,
            LinePoint,
            Viewport,
            Employee,
            EmployeePayload,
            AttendanceRecord,
            AttendanceStatus,
            MarkAttendance,
            LeaveRequest,
            LeaveStatus,
            ApplyLeave,
            UpdateLeaveStatus
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Auth", description = "Login and session APIs"),
        (name = "Dashboard", description = "Dashboard metrics and charts"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
        (name = "Leave", description = "Leave management APIs"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_dashboard_routes_and_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).unwrap();

        for path in ["/dashboard", "/refresh/{tab}", "/employees/{id}", "/leaves/{id}", "/auth/login"] {
            assert!(json["paths"].get(path).is_some(), "missing {path}");
        }
        assert!(json["components"]["securitySchemes"].get("bearer_auth").is_some());
    }
}
