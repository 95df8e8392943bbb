//! Read-only inspection of the backend's JWT.
//!
//! The backend issues and verifies tokens; this side only peeks at the claims
//! to report who is logged in and whether the token has lapsed.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::Error};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::backend::RequestContext;
use crate::model::wire;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenClaims {
    #[serde(deserialize_with = "wire::id")]
    pub sub: Option<String>,
    #[serde(alias = "userId", deserialize_with = "wire::id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "wire::text")]
    pub email: Option<String>,
    pub exp: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub authenticated: bool,
    pub subject: Option<String>,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub expires_at: Option<DateTime<Utc>>,
    /// `None` when the token carries no usable `exp`
    pub expired: Option<bool>,
}

/// Decodes claims without checking the signature or expiry.
pub fn peek_claims(token: &str) -> Result<TokenClaims, Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims = HashSet::new();

    decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation).map(|data| data.claims)
}

pub fn session_info(ctx: &RequestContext, now: DateTime<Utc>) -> SessionInfo {
    let Some(token) = ctx.token() else {
        return SessionInfo {
            authenticated: false,
            subject: None,
            expires_at: None,
            expired: None,
        };
    };

    let claims = peek_claims(token)
        .inspect_err(|e| tracing::debug!(error = %e, "Bearer token is not a readable JWT"))
        .unwrap_or_default();
    let expires_at = claims.exp.and_then(|exp| DateTime::from_timestamp(exp, 0));

    SessionInfo {
        authenticated: true,
        subject: claims.email.or(claims.sub).or(claims.id),
        expires_at,
        expired: expires_at.map(|at| at <= now),
    }
}
