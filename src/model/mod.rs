pub mod attendance;
pub mod employee;
pub mod leave_request;
pub mod wire;

pub use attendance::{AttendanceRecord, AttendanceStatus, MarkAttendance};
pub use employee::{Employee, EmployeePayload};
pub use leave_request::{ApplyLeave, LeaveRequest, LeaveStatus, UpdateLeaveStatus};
