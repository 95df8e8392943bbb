//! The three independent data domains behind the dashboard.
//!
//! Each domain has its own loading flag, error message and last good data.
//! A successful fetch swaps the whole collection in; a failed one records the
//! message and leaves the previous data alone, so one domain failing never
//! touches the other two.
//!
//! Data is tagged with the bearer token it was fetched with and is only ever
//! handed back to a caller presenting that same token. A caller that never
//! fetched a domain itself sees it as not loaded.

use std::sync::{Arc, PoisonError, RwLock};

use futures::future::join3;
use serde::Serialize;
use strum_macros::{Display, EnumString};
use tracing::{info, warn};

use crate::backend::{self, BackendClient, RequestContext};
use crate::model::{AttendanceRecord, Employee, LeaveRequest};

pub const EMPLOYEES_LOAD_FAILED: &str = "Failed to load employees.";
pub const ATTENDANCE_LOAD_FAILED: &str = "Failed to load attendance.";
pub const LEAVES_LOAD_FAILED: &str = "Failed to load leaves.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Tab {
    Dashboard,
    Employees,
    Attendance,
    Leaves,
}

/// One domain as seen by one caller.
#[derive(Debug, Clone, Serialize)]
pub struct FetchState<T> {
    pub loading: bool,
    /// False until a fetch with the caller's credentials has succeeded
    pub loaded: bool,
    pub error: Option<String>,
    pub data: Arc<Vec<T>>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            loaded: false,
            error: None,
            data: Arc::new(Vec::new()),
        }
    }
}

struct Slot<T> {
    loading: bool,
    error: Option<String>,
    /// Token of the latest refresh; `loading` and `error` describe it
    attempted_by: Option<String>,
    data: Option<Owned<T>>,
}

struct Owned<T> {
    token: Option<String>,
    items: Arc<Vec<T>>,
}

impl<T> Slot<T> {
    fn view(&self, token: Option<&str>) -> FetchState<T> {
        let mut view = FetchState::default();
        if self.attempted_by.as_deref() == token {
            view.loading = self.loading;
            view.error = self.error.clone();
        }
        if let Some(owned) = self.data.as_ref().filter(|o| o.token.as_deref() == token) {
            view.loaded = true;
            view.data = Arc::clone(&owned.items);
        }
        view
    }
}

pub struct Domain<T> {
    name: &'static str,
    fallback: &'static str,
    slot: RwLock<Slot<T>>,
}

impl<T> Domain<T> {
    fn new(name: &'static str, fallback: &'static str) -> Self {
        Self {
            name,
            fallback,
            slot: RwLock::new(Slot {
                loading: false,
                error: None,
                attempted_by: None,
                data: None,
            }),
        }
    }

    /// What `ctx` may see of this domain right now.
    pub fn snapshot(&self, ctx: &RequestContext) -> FetchState<T> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .view(ctx.token())
    }

    fn begin(&self, ctx: &RequestContext) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        slot.loading = true;
        slot.error = None;
        slot.attempted_by = ctx.token().map(str::to_string);
    }

    fn finish(&self, ctx: &RequestContext, result: backend::Result<Vec<T>>) -> FetchState<T> {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        let token = ctx.token().map(str::to_string);
        slot.loading = false;
        match result {
            Ok(items) => {
                info!(domain = self.name, count = items.len(), "Collection refreshed");
                slot.error = None;
                slot.data = Some(Owned {
                    token: token.clone(),
                    items: Arc::new(items),
                });
            }
            Err(e) => {
                warn!(domain = self.name, error = %e, "Collection refresh failed");
                slot.error = Some(e.user_message(self.fallback));
            }
        }
        slot.attempted_by = token;
        slot.view(ctx.token())
    }

    /// Runs `fetch` with the loading flag raised, stores its outcome and
    /// returns the domain as `ctx` now sees it.
    pub async fn refresh<F>(&self, ctx: &RequestContext, fetch: F) -> FetchState<T>
    where
        F: Future<Output = backend::Result<Vec<T>>>,
    {
        self.begin(ctx);
        let result = fetch.await;
        self.finish(ctx, result)
    }
}

/// All three domains as seen by one caller after a tab refresh.
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceView {
    pub employees: FetchState<Employee>,
    pub attendance: FetchState<AttendanceRecord>,
    pub leaves: FetchState<LeaveRequest>,
}

pub struct Workspace {
    pub employees: Domain<Employee>,
    pub attendance: Domain<AttendanceRecord>,
    pub leaves: Domain<LeaveRequest>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self {
            employees: Domain::new("employees", EMPLOYEES_LOAD_FAILED),
            attendance: Domain::new("attendance", ATTENDANCE_LOAD_FAILED),
            leaves: Domain::new("leaves", LEAVES_LOAD_FAILED),
        }
    }
}

impl Workspace {
    pub async fn refresh_employees(
        &self,
        client: &BackendClient,
        ctx: &RequestContext,
    ) -> FetchState<Employee> {
        self.employees.refresh(ctx, client.list_employees(ctx)).await
    }

    pub async fn refresh_attendance(
        &self,
        client: &BackendClient,
        ctx: &RequestContext,
    ) -> FetchState<AttendanceRecord> {
        self.attendance.refresh(ctx, client.list_attendance(ctx)).await
    }

    pub async fn refresh_leaves(
        &self,
        client: &BackendClient,
        ctx: &RequestContext,
    ) -> FetchState<LeaveRequest> {
        self.leaves.refresh(ctx, client.list_leaves(ctx)).await
    }

    pub fn snapshot(&self, ctx: &RequestContext) -> WorkspaceView {
        WorkspaceView {
            employees: self.employees.snapshot(ctx),
            attendance: self.attendance.snapshot(ctx),
            leaves: self.leaves.snapshot(ctx),
        }
    }

    /// Refreshes what `tab` shows and returns every domain as `ctx` sees it.
    ///
    /// Attendance and leaves are only fetched for an authenticated context
    /// when `require_auth` is set; a guarded caller gets them as not loaded.
    pub async fn refresh_tab(
        &self,
        tab: Tab,
        client: &BackendClient,
        ctx: &RequestContext,
        require_auth: bool,
    ) -> WorkspaceView {
        let guarded = require_auth && !ctx.is_authenticated();
        let mut view = self.snapshot(ctx);

        match tab {
            Tab::Employees => view.employees = self.refresh_employees(client, ctx).await,
            Tab::Attendance if !guarded => {
                view.attendance = self.refresh_attendance(client, ctx).await;
            }
            Tab::Leaves if !guarded => view.leaves = self.refresh_leaves(client, ctx).await,
            Tab::Dashboard if !guarded => {
                let (employees, attendance, leaves) = join3(
                    self.refresh_employees(client, ctx),
                    self.refresh_attendance(client, ctx),
                    self.refresh_leaves(client, ctx),
                )
                .await;
                view = WorkspaceView {
                    employees,
                    attendance,
                    leaves,
                };
            }
            Tab::Dashboard => view.employees = self.refresh_employees(client, ctx).await,
            Tab::Attendance | Tab::Leaves => {}
        }

        if guarded {
            view.attendance = FetchState::default();
            view.leaves = FetchState::default();
        }
        view
    }
}
