use actix_web::{HttpResponse, Responder, web};
use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::backend::{BackendClient, RequestContext};
use crate::config::Config;
use crate::dashboard::chart::{self, BarStyle, Viewport};
use crate::dashboard::{DashboardSnapshot, MonthlySeries, stats, svg};
use crate::state::{FetchState, Tab, Workspace};

const SVG: &str = "image/svg+xml";

#[derive(Debug, Deserialize, IntoParams)]
pub struct DashboardQuery {
    /// Reference day (YYYY-MM-DD); defaults to the current UTC day
    #[param(value_type = Option<String>, format = "date", example = "2024-02-14")]
    pub today: Option<NaiveDate>,
}

impl DashboardQuery {
    /// `(today, period)`: the day for present/on-leave counts and the day
    /// whose month the attendance series covers.
    pub fn reference_days(&self) -> (NaiveDate, NaiveDate) {
        match self.today {
            Some(day) => (day, day),
            None => (Utc::now().date_naive(), Local::now().date_naive()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DomainStatus {
    pub loading: bool,
    /// False when the caller has not been able to fetch this domain
    pub loaded: bool,
    pub error: Option<String>,
    pub count: usize,
}

impl<T> From<&FetchState<T>> for DomainStatus {
    fn from(state: &FetchState<T>) -> Self {
        Self {
            loading: state.loading,
            loaded: state.loaded,
            error: state.error.clone(),
            count: state.data.len(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub snapshot: DashboardSnapshot,
    pub employees: DomainStatus,
    pub attendance: DomainStatus,
    pub leaves: DomainStatus,
}

/// Dashboard metrics and chart geometry
///
/// Refreshes all three collections with the caller's credentials, then
/// recomputes everything. A failed collection shows up in its status entry
/// and contributes its last good data (empty if never loaded).
#[utoipa::path(
    get,
    path = "/dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Dashboard snapshot", body = DashboardResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn dashboard(
    ctx: RequestContext,
    query: web::Query<DashboardQuery>,
    client: web::Data<BackendClient>,
    workspace: web::Data<Workspace>,
    config: web::Data<Config>,
) -> impl Responder {
    let view = workspace
        .refresh_tab(Tab::Dashboard, &client, &ctx, config.require_auth)
        .await;
    let (today, period) = query.reference_days();

    let snapshot = DashboardSnapshot::build(
        &view.employees.data,
        &view.attendance.data,
        &view.leaves.data,
        Some(today),
        period,
        config.department_top_n,
    );

    HttpResponse::Ok().json(DashboardResponse {
        snapshot,
        employees: DomainStatus::from(&view.employees),
        attendance: DomainStatus::from(&view.attendance),
        leaves: DomainStatus::from(&view.leaves),
    })
}

/// Top departments as an SVG bar chart
#[utoipa::path(
    get,
    path = "/dashboard/charts/departments.svg",
    responses(
        (status = 200, description = "SVG bar chart", content_type = "image/svg+xml", body = String)
    ),
    tag = "Dashboard"
)]
pub async fn department_chart(
    ctx: RequestContext,
    client: web::Data<BackendClient>,
    workspace: web::Data<Workspace>,
    config: web::Data<Config>,
) -> impl Responder {
    let employees = workspace.refresh_employees(&client, &ctx).await;
    let buckets = stats::department_breakdown(&employees.data);
    let top = stats::top_departments(&buckets, config.department_top_n);
    let viewport = Viewport::DEPARTMENT_BARS;

    let body = if top.is_empty() {
        svg::empty_state(&viewport, "No department data yet.")
    } else {
        svg::bar_chart(&chart::bar_chart(top, &viewport, &BarStyle::default()), &viewport)
    };

    HttpResponse::Ok().content_type(SVG).body(body)
}

/// Present count per day of the month as an SVG line chart
#[utoipa::path(
    get,
    path = "/dashboard/charts/attendance.svg",
    params(DashboardQuery),
    responses(
        (status = 200, description = "SVG line chart", content_type = "image/svg+xml", body = String),
        (status = 401, description = "Login required")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn attendance_chart(
    ctx: RequestContext,
    query: web::Query<DashboardQuery>,
    client: web::Data<BackendClient>,
    workspace: web::Data<Workspace>,
) -> impl Responder {
    let attendance = workspace.refresh_attendance(&client, &ctx).await;

    let (_, period) = query.reference_days();
    let series = MonthlySeries::for_month_of(&attendance.data, period);
    let viewport = Viewport::MONTHLY_LINE;

    let body = if series.is_empty() {
        let month = period.format("%B");
        svg::empty_state(&viewport, &format!("No attendance marked for {month} yet."))
    } else {
        svg::line_chart(&chart::line_chart(&series, &viewport), &viewport)
    };

    HttpResponse::Ok().content_type(SVG).body(body)
}
