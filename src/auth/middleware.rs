use crate::auth::bearer::bearer_token;
use crate::config::Config;
use crate::error::ApiError;
use actix_web::middleware::Next;
use actix_web::{
    Error, ResponseError,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web::Data,
};

/// Rejects requests without a bearer token when the deployment sets
/// `REQUIRE_AUTH`; passes everything through otherwise.
pub async fn require_bearer(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let require_auth = req
        .app_data::<Data<Config>>()
        .map_or(true, |config| config.require_auth);

    if require_auth && bearer_token(req.headers()).is_none() {
        tracing::debug!(path = %req.path(), "Rejected request without bearer token");
        let resp = ApiError::Unauthorized.error_response();
        return Ok(req.into_response(resp));
    }

    next.call(req).await
}
