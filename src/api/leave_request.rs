use actix_web::{HttpResponse, Responder, web};

use crate::backend::{BackendClient, RequestContext};
use crate::error::ApiError;
use crate::model::{ApplyLeave, UpdateLeaveStatus};
use crate::state::Workspace;

const APPLY_FAILED: &str = "Failed to apply leave.";
const UPDATE_FAILED: &str = "Failed to update leave status.";

/// for getting leave applications endpoint
#[utoipa::path(
    get,
    path = "/leaves",
    responses(
        (status = 200, description = "Leave collection with its fetch status", body = Object, example = json!({
            "loading": false,
            "loaded": true,
            "error": null,
            "data": [{
                "id": "1",
                "employeeId": "EMP001",
                "fromDate": "2024-02-01",
                "toDate": "2024-02-03",
                "reason": "Family event",
                "status": "Pending"
            }]
        })),
        (status = 401, description = "Login required")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn list_leaves(
    ctx: RequestContext,
    client: web::Data<BackendClient>,
    workspace: web::Data<Workspace>,
) -> impl Responder {
    HttpResponse::Ok().json(workspace.refresh_leaves(&client, &ctx).await)
}

/// Submit a leave request
#[utoipa::path(
    post,
    path = "/leaves",
    request_body(
        content = ApplyLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Submitted; returns the re-fetched leave collection", body = Object),
        (status = 400, description = "Rejected by the HRMS API", body = Object),
        (status = 401, description = "Login required")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn apply_leave(
    ctx: RequestContext,
    body: web::Json<ApplyLeave>,
    client: web::Data<BackendClient>,
    workspace: web::Data<Workspace>,
) -> Result<impl Responder, ApiError> {
    client
        .apply_leave(&ctx, &body.into_inner().trimmed())
        .await
        .map_err(|e| ApiError::backend(&e, APPLY_FAILED))?;

    Ok(HttpResponse::Ok().json(workspace.refresh_leaves(&client, &ctx).await))
}

/// Approve or reject a leave request
#[utoipa::path(
    put,
    path = "/leaves/{id}",
    params(
        ("id", Path, description = "ID of the leave request")
    ),
    request_body = UpdateLeaveStatus,
    responses(
        (status = 200, description = "Updated; returns the re-fetched leave collection", body = Object),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "message": "Leave request not found"
        })),
        (status = 401, description = "Login required")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn update_leave_status(
    ctx: RequestContext,
    path: web::Path<String>,
    body: web::Json<UpdateLeaveStatus>,
    client: web::Data<BackendClient>,
    workspace: web::Data<Workspace>,
) -> Result<impl Responder, ApiError> {
    let leave_id = path.into_inner();

    client
        .update_leave_status(&ctx, &leave_id, body.status)
        .await
        .map_err(|e| ApiError::backend(&e, UPDATE_FAILED))?;

    tracing::info!(leave_id = %leave_id, status = %body.status, "Leave status updated");

    Ok(HttpResponse::Ok().json(workspace.refresh_leaves(&client, &ctx).await))
}
