use crate::{
    api::{attendance, auth, dashboard, employee, leave_request, refresh},
    auth::middleware::require_bearer,
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use anyhow::{Result, anyhow};
use std::sync::Arc;

type Limiter = Arc<Governor<PeerIpKeyExtractor, NoOpMiddleware>>;

/// Per-IP rate limiters, built once and shared by every worker.
#[derive(Clone)]
pub struct Limiters {
    login: Limiter,
    protected: Limiter,
}

impl Limiters {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            login: Arc::new(build_limiter(config.rate_login_per_min)?),
            protected: Arc::new(build_limiter(config.rate_protected_per_min)?),
        })
    }
}

fn build_limiter(requests_per_min: u32) -> Result<Governor<PeerIpKeyExtractor, NoOpMiddleware>> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow!("invalid rate limit of {requests_per_min} per minute"))?;
    Ok(Governor::new(&cfg))
}

pub fn configure(cfg: &mut web::ServiceConfig, limiters: &Limiters) {
    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(limiters.login.clone())
                    .route(web::post().to(auth::login)),
            )
            .service(
                web::resource("/session")
                    .wrap(limiters.protected.clone())
                    .route(web::get().to(auth::session)),
            ),
    );

    cfg.service(
        web::scope("/dashboard")
            .wrap(limiters.protected.clone())
            .service(web::resource("").route(web::get().to(dashboard::dashboard)))
            .service(
                web::resource("/charts/departments.svg")
                    .route(web::get().to(dashboard::department_chart)),
            )
            .service(
                web::resource("/charts/attendance.svg")
                    .wrap(from_fn(require_bearer))
                    .route(web::get().to(dashboard::attendance_chart)),
            ),
    );

    // Explicit refresh; the auth guard is applied per domain
    cfg.service(
        web::scope("/refresh")
            .wrap(limiters.protected.clone())
            .service(web::resource("/{tab}").route(web::post().to(refresh::refresh))),
    );

    cfg.service(
        web::scope("/employees")
            .wrap(limiters.protected.clone())
            // /employees
            .service(
                web::resource("")
                    .route(web::get().to(employee::list_employees))
                    .route(web::post().to(employee::create_employee)),
            )
            // /employees/{id}
            .service(
                web::resource("/{id}")
                    .route(web::put().to(employee::update_employee))
                    .route(web::delete().to(employee::delete_employee)),
            ),
    );

    // Gated by REQUIRE_AUTH
    cfg.service(
        web::scope("/attendance")
            .wrap(from_fn(require_bearer))
            .wrap(limiters.protected.clone())
            .service(
                web::resource("")
                    .route(web::get().to(attendance::list_attendance))
                    .route(web::post().to(attendance::mark_attendance)),
            ),
    );

    cfg.service(
        web::scope("/leaves")
            .wrap(from_fn(require_bearer))
            .wrap(limiters.protected.clone())
            // /leaves
            .service(
                web::resource("")
                    .route(web::get().to(leave_request::list_leaves))
                    .route(web::post().to(leave_request::apply_leave)),
            )
            // /leaves/{id}
            .service(
                web::resource("/{id}").route(web::put().to(leave_request::update_leave_status)),
            ),
    );
}

// LOGIN
//  └─ POST /auth/login → HRMS API token, all collections refreshed

// EVERY OTHER REQUEST
//  └─ Authorization: Bearer token, forwarded as-is to the HRMS API
