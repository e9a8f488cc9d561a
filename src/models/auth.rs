//! Request and response bodies for the auth endpoints.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST /api/auth/verify-otp`.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyOtpRequest<'a> {
    pub otp: &'a str,
}

/// Common response envelope of the auth endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    pub token: Option<String>,
    pub message: Option<String>,
}

/// Error body returned with non-success HTTP statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}
