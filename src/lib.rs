//! HRMS Lite admin dashboard.
//!
//! Fronts the HRMS Lite REST API: proxies employee, attendance and leave
//! operations, and derives the dashboard metrics and charts from the fetched
//! collections.

pub mod api;
pub mod auth;
pub mod backend;
pub mod config;
pub mod dashboard;
pub mod docs;
pub mod error;
pub mod model;
pub mod routes;
pub mod state;
