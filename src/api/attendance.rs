use actix_web::{HttpResponse, Responder, web};

use crate::backend::{BackendClient, RequestContext};
use crate::error::ApiError;
use crate::model::MarkAttendance;
use crate::state::Workspace;

const MARK_FAILED: &str = "Failed to mark attendance.";

/// List attendance records
#[utoipa::path(
    get,
    path = "/attendance",
    responses(
        (status = 200, description = "Attendance collection with its fetch status", body = Object, example = json!({
            "loading": false,
            "loaded": true,
            "error": null,
            "data": [{ "id": "1", "employeeId": "EMP001", "date": "2024-02-01", "status": "Present" }]
        })),
        (status = 401, description = "Login required")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    ctx: RequestContext,
    client: web::Data<BackendClient>,
    workspace: web::Data<Workspace>,
) -> impl Responder {
    HttpResponse::Ok().json(workspace.refresh_attendance(&client, &ctx).await)
}

/// Mark attendance for one employee and day
#[utoipa::path(
    post,
    path = "/attendance",
    request_body = MarkAttendance,
    responses(
        (status = 200, description = "Marked; returns the re-fetched attendance collection", body = Object),
        (status = 400, description = "Rejected by the HRMS API", body = Object, example = json!({
            "message": "Attendance already marked for this date"
        })),
        (status = 401, description = "Login required")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    ctx: RequestContext,
    body: web::Json<MarkAttendance>,
    client: web::Data<BackendClient>,
    workspace: web::Data<Workspace>,
) -> Result<impl Responder, ApiError> {
    let body = body.into_inner().trimmed();

    client
        .mark_attendance(&ctx, &body)
        .await
        .map_err(|e| ApiError::backend(&e, MARK_FAILED))?;

    tracing::info!(employee_id = %body.employee_id, date = %body.date, status = %body.status, "Attendance marked");

    Ok(HttpResponse::Ok().json(workspace.refresh_attendance(&client, &ctx).await))
}
