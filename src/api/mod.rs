pub mod attendance;
pub mod auth;
pub mod dashboard;
pub mod employee;
pub mod leave_request;
pub mod refresh;
