use std::str::FromStr;

use actix_web::{HttpResponse, Responder, web};

use crate::backend::{BackendClient, RequestContext};
use crate::config::Config;
use crate::error::ApiError;
use crate::state::{Tab, Workspace};

/// Re-fetch what one tab shows
///
/// `dashboard` refreshes all three collections, the other tabs their own.
/// With `REQUIRE_AUTH` set, a caller without a token gets attendance and
/// leaves back as not loaded.
#[utoipa::path(
    post,
    path = "/refresh/{tab}",
    params(
        ("tab", Path, description = "dashboard, employees, attendance or leaves")
    ),
    responses(
        (status = 200, description = "Every collection as the caller sees it", body = Object, example = json!({
            "employees": { "loading": false, "loaded": true, "error": null, "data": [] },
            "attendance": { "loading": false, "loaded": false, "error": null, "data": [] },
            "leaves": { "loading": false, "loaded": false, "error": null, "data": [] }
        })),
        (status = 404, description = "Unknown tab", body = Object, example = json!({
            "message": "Unknown tab payroll"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn refresh(
    ctx: RequestContext,
    path: web::Path<String>,
    client: web::Data<BackendClient>,
    workspace: web::Data<Workspace>,
    config: web::Data<Config>,
) -> Result<impl Responder, ApiError> {
    let name = path.into_inner();
    let tab = Tab::from_str(&name).map_err(|_| ApiError::UnknownTab(name))?;

    tracing::debug!(%tab, authenticated = ctx.is_authenticated(), "Refreshing tab");
    let view = workspace
        .refresh_tab(tab, &client, &ctx, config.require_auth)
        .await;

    Ok(HttpResponse::Ok().json(view))
}
