use std::sync::Arc;

use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::backend::{BackendClient, RequestContext};
use crate::error::ApiError;
use crate::model::employee::{self, EmployeePayload};
use crate::state::{FetchState, Workspace};

const SAVE_FAILED: &str = "Failed to save employee.";
const DELETE_FAILED: &str = "Failed to delete employee.";

#[derive(Debug, Deserialize, IntoParams)]
pub struct EmployeeQuery {
    /// Case-insensitive match on employee id, name, email or department
    pub search: Option<String>,
}

async fn refreshed(
    workspace: &Workspace,
    client: &BackendClient,
    ctx: &RequestContext,
) -> HttpResponse {
    HttpResponse::Ok().json(workspace.refresh_employees(client, ctx).await)
}

/// List employees
#[utoipa::path(
    get,
    path = "/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Employee collection with its fetch status", body = Object, example = json!({
            "loading": false,
            "loaded": true,
            "error": null,
            "data": [{
                "id": "65f1c0a2e4b0a1b2c3d4e5f6",
                "employeeId": "EMP001",
                "fullName": "John Doe",
                "email": "john.doe@company.com",
                "department": "Engineering"
            }]
        }))
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    ctx: RequestContext,
    query: web::Query<EmployeeQuery>,
    client: web::Data<BackendClient>,
    workspace: web::Data<Workspace>,
) -> impl Responder {
    let state = workspace.refresh_employees(&client, &ctx).await;

    let Some(search) = query.search.as_deref() else {
        return HttpResponse::Ok().json(state);
    };

    let filtered: Vec<_> = employee::search(&state.data, search)
        .into_iter()
        .cloned()
        .collect();
    tracing::debug!(search, matches = filtered.len(), "Filtered employees");

    HttpResponse::Ok().json(FetchState {
        data: Arc::new(filtered),
        ..state
    })
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/employees",
    request_body = EmployeePayload,
    responses(
        (status = 200, description = "Created; returns the re-fetched employee collection", body = Object),
        (status = 409, description = "Duplicate employee id or email", body = Object, example = json!({
            "message": "Employee ID already exists"
        }))
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_employee(
    ctx: RequestContext,
    payload: web::Json<EmployeePayload>,
    client: web::Data<BackendClient>,
    workspace: web::Data<Workspace>,
) -> Result<impl Responder, ApiError> {
    client
        .create_employee(&ctx, &payload.into_inner().trimmed())
        .await
        .map_err(|e| ApiError::backend(&e, SAVE_FAILED))?;

    Ok(refreshed(&workspace, &client, &ctx).await)
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/employees/{id}",
    params(
        ("id", Path, description = "Backend record id")
    ),
    request_body = EmployeePayload,
    responses(
        (status = 200, description = "Updated; returns the re-fetched employee collection", body = Object),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_employee(
    ctx: RequestContext,
    path: web::Path<String>,
    payload: web::Json<EmployeePayload>,
    client: web::Data<BackendClient>,
    workspace: web::Data<Workspace>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();

    client
        .update_employee(&ctx, &id, &payload.into_inner().trimmed())
        .await
        .map_err(|e| ApiError::backend(&e, SAVE_FAILED))?;

    Ok(refreshed(&workspace, &client, &ctx).await)
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    params(
        ("id", Path, description = "Backend record id")
    ),
    responses(
        (status = 200, description = "Deleted; returns the re-fetched employee collection", body = Object),
        (status = 404, description = "Employee not found", body = Object)
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_employee(
    ctx: RequestContext,
    path: web::Path<String>,
    client: web::Data<BackendClient>,
    workspace: web::Data<Workspace>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();

    client
        .delete_employee(&ctx, &id)
        .await
        .map_err(|e| ApiError::backend(&e, DELETE_FAILED))?;

    Ok(refreshed(&workspace, &client, &ctx).await)
}
