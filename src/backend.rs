//! HTTP client for the external HRMS REST API.
//!
//! The bearer token travels in an explicit [`RequestContext`] passed to every
//! call; the client itself holds no credentials.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::model::{
    ApplyLeave, AttendanceRecord, Employee, EmployeePayload, LeaveRequest, LeaveStatus,
    MarkAttendance, UpdateLeaveStatus,
};

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("request to HRMS API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HRMS API returned {status}")]
    Status {
        status: StatusCode,
        /// `message` field of the error body, if the backend sent one
        message: Option<String>,
    },

    #[error("invalid base url {0:?}")]
    BaseUrl(String),
}

impl BackendError {
    /// Server supplied message when there is one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            BackendError::Status {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            BackendError::Status { status, .. } => Some(*status),
            BackendError::Transport(e) => e.status(),
            BackendError::BaseUrl(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BackendError>;

/// Per-request credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    token: Option<String>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: (!token.is_empty()).then_some(token),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(BackendError::BaseUrl(base_url));
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, ctx: &RequestContext, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);
        match ctx.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);
        warn!(status = status.as_u16(), message = ?message, "HRMS API error response");
        Err(BackendError::Status { status, message })
    }

    async fn fetch_list<T: DeserializeOwned>(&self, ctx: &RequestContext, path: &str) -> Result<Vec<T>> {
        let response = Self::check(self.request(ctx, Method::GET, path).send().await?).await?;
        // a null body is an empty collection
        let items: Option<Vec<T>> = response.json().await?;
        let items = items.unwrap_or_default();
        debug!(path, count = items.len(), "Fetched collection");
        Ok(items)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        ctx: &RequestContext,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<()> {
        Self::check(self.request(ctx, method, path).json(body).send().await?).await?;
        Ok(())
    }

    #[instrument(name = "backend_login", skip(self, password), fields(email = %email.trim()))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let body = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response = Self::check(
            self.request(&RequestContext::anonymous(), Method::POST, "/api/auth/login")
                .json(&body)
                .send()
                .await?,
        )
        .await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self, ctx))]
    pub async fn list_employees(&self, ctx: &RequestContext) -> Result<Vec<Employee>> {
        self.fetch_list(ctx, "/api/employees").await
    }

    #[instrument(skip(self, ctx, payload))]
    pub async fn create_employee(&self, ctx: &RequestContext, payload: &EmployeePayload) -> Result<()> {
        self.send_json(ctx, Method::POST, "/api/employees", payload).await
    }

    #[instrument(skip(self, ctx, payload))]
    pub async fn update_employee(
        &self,
        ctx: &RequestContext,
        id: &str,
        payload: &EmployeePayload,
    ) -> Result<()> {
        self.send_json(ctx, Method::PUT, &format!("/api/employees/{id}"), payload)
            .await
    }

    #[instrument(skip(self, ctx))]
    pub async fn delete_employee(&self, ctx: &RequestContext, id: &str) -> Result<()> {
        let path = format!("/api/employees/{id}");
        Self::check(self.request(ctx, Method::DELETE, &path).send().await?).await?;
        Ok(())
    }

    #[instrument(skip(self, ctx))]
    pub async fn list_attendance(&self, ctx: &RequestContext) -> Result<Vec<AttendanceRecord>> {
        self.fetch_list(ctx, "/api/attendance").await
    }

    #[instrument(skip(self, ctx, body))]
    pub async fn mark_attendance(&self, ctx: &RequestContext, body: &MarkAttendance) -> Result<()> {
        self.send_json(ctx, Method::POST, "/api/attendance", body).await
    }

    #[instrument(skip(self, ctx))]
    pub async fn list_leaves(&self, ctx: &RequestContext) -> Result<Vec<LeaveRequest>> {
        self.fetch_list(ctx, "/api/leaves").await
    }

    #[instrument(skip(self, ctx, body))]
    pub async fn apply_leave(&self, ctx: &RequestContext, body: &ApplyLeave) -> Result<()> {
        self.send_json(ctx, Method::POST, "/api/leaves", body).await
    }

    #[instrument(skip(self, ctx))]
    pub async fn update_leave_status(
        &self,
        ctx: &RequestContext,
        id: &str,
        status: LeaveStatus,
    ) -> Result<()> {
        self.send_json(
            ctx,
            Method::PUT,
            &format!("/api/leaves/{id}"),
            &UpdateLeaveStatus { status },
        )
        .await
    }
}
