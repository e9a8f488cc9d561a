//! HTTP client for the auth and staff API.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::ApiConfig;
use crate::error::{AppError, GENERIC_FAILURE, Result};
use crate::models::{ApiResponse, CreateStaff, ErrorBody, LoginRequest, VerifyOtpRequest};

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const VERIFY_OTP_PATH: &str = "/api/auth/verify-otp";
pub const RESEND_OTP_PATH: &str = "/api/auth/resend-otp";
pub const STAFF_PATH: &str = "/api/staff";

/// Remote API client.
///
/// Every call is a single request with no retry. Responses use the
/// `{success, token?, message?}` envelope.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Create a new client instance.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Sign in with email and password. Returns the session token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        info!("Signing in as {email}");
        let body = LoginRequest { email, password };
        let response = self.post_json(LOGIN_PATH, Some(&body), None).await;
        let envelope = log_failure("Login", response)?;
        accept_token(envelope, "Login failed")
    }

    /// Verify a six-digit passcode. Returns the session token.
    pub async fn verify_otp(&self, otp: &str) -> Result<String> {
        info!("Verifying one-time passcode");
        let body = VerifyOtpRequest { otp };
        let response = self.post_json(VERIFY_OTP_PATH, Some(&body), None).await;
        let envelope = log_failure("Verification", response)?;
        accept_token(envelope, "OTP verification failed")
    }

    /// Ask the server to send a new passcode.
    pub async fn resend_otp(&self) -> Result<()> {
        info!("Requesting a new one-time passcode");
        let response = self.post_json::<()>(RESEND_OTP_PATH, None, None).await;
        let envelope = log_failure("Resend", response)?;
        if envelope.success {
            Ok(())
        } else {
            Err(AppError::rejected(
                envelope.message.unwrap_or_else(|| "Failed to resend OTP".to_string()),
            ))
        }
    }

    /// Register a staff member.
    pub async fn create_staff(&self, staff: &CreateStaff, token: Option<&str>) -> Result<()> {
        info!("Registering staff {} as {}", staff.email, staff.role);
        let response = self.post_json(STAFF_PATH, Some(staff), token).await;
        let envelope = log_failure("Create staff", response)?;
        if envelope.success {
            Ok(())
        } else {
            Err(AppError::rejected(
                envelope.message.unwrap_or_else(|| "Failed to register staff".to_string()),
            ))
        }
    }

    /// POST an optional JSON body and decode the response envelope.
    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<ApiResponse> {
        let url = self.config.endpoint(path);

        let mut request = self.client.post(&url);
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        decode_envelope(response).await
    }
}

/// Turn a response into the envelope, or a transport error carrying the
/// server's `message` for non-success statuses.
async fn decode_envelope(response: Response) -> Result<ApiResponse> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());
        warn!("Server answered {status}: {message}");
        return Err(AppError::transport(message));
    }

    if bytes.is_empty() {
        return Ok(ApiResponse::default());
    }
    serde_json::from_slice(&bytes).map_err(|e| {
        error!("Malformed response body: {e}");
        AppError::transport(GENERIC_FAILURE)
    })
}

fn log_failure(action: &str, result: Result<ApiResponse>) -> Result<ApiResponse> {
    if let Err(e) = &result {
        error!("{action} error: {e}");
    }
    result
}

/// Accept a token-bearing envelope or produce the declared failure.
fn accept_token(envelope: ApiResponse, fallback: &str) -> Result<String> {
    match envelope {
        ApiResponse {
            success: true,
            token: Some(token),
            ..
        } if !token.is_empty() => Ok(token),
        ApiResponse {
            success: true, message, ..
        } => {
            warn!("Server reported success without a token");
            Err(AppError::rejected(message.unwrap_or_else(|| fallback.to_string())))
        }
        ApiResponse { message, .. } => Err(AppError::rejected(message.unwrap_or_else(|| fallback.to_string()))),
    }
}
