//! Data models for staff records and auth API bodies.

pub mod auth;
pub mod staff;

pub use auth::{ApiResponse, ErrorBody, LoginRequest, VerifyOtpRequest};
pub use staff::{CreateStaff, Role, StaffId, StaffRecord};
