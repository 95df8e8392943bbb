use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use serde::Deserialize;
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::auth::jwt::{SessionInfo, session_info};
use crate::backend::{BackendClient, RequestContext};
use crate::config::Config;
use crate::error::ApiError;
use crate::state::{Tab, Workspace};

pub const LOGIN_FAILED: &str = "Login failed";

#[derive(Deserialize, ToSchema)]
pub struct LoginForm {
    #[schema(example = "admin@test.com", format = "email")]
    pub email: String,
    #[schema(example = "123456")]
    pub password: String,
}

/// Log in against the HRMS API
///
/// On success every collection is refreshed with the new token before the
/// token is handed back.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginForm,
    responses(
        (status = 200, description = "Logged in", body = Object, example = json!({
            "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
        })),
        (status = 401, description = "Invalid credentials", body = Object, example = json!({
            "message": "Invalid credentials"
        })),
        (status = 502, description = "HRMS API unreachable")
    ),
    tag = "Auth"
)]
#[instrument(name = "dashboard_login", skip_all, fields(email = %form.email.trim()))]
pub async fn login(
    form: web::Json<LoginForm>,
    client: web::Data<BackendClient>,
    workspace: web::Data<Workspace>,
    config: web::Data<Config>,
) -> Result<impl Responder, ApiError> {
    let response = client
        .login(&form.email, &form.password)
        .await
        .map_err(|e| ApiError::backend(&e, LOGIN_FAILED))?;

    info!("Login successful");

    let ctx = RequestContext::with_token(response.token.clone());
    workspace
        .refresh_tab(Tab::Dashboard, &client, &ctx, config.require_auth)
        .await;

    Ok(HttpResponse::Ok().json(response))
}

/// Who the caller's bearer token belongs to
#[utoipa::path(
    get,
    path = "/auth/session",
    responses(
        (status = 200, description = "Session details read from the token", body = SessionInfo)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Auth"
)]
pub async fn session(ctx: RequestContext) -> impl Responder {
    HttpResponse::Ok().json(session_info(&ctx, Utc::now()))
}
