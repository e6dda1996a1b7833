//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed input (phone/email/OTP shape)
    #[error("{0}")]
    Validation(String),

    /// Provided OTP does not match the stored code
    #[error("Invalid OTP")]
    InvalidOtp,

    /// No stored OTP for the subject (never sent, expired, or consumed)
    #[error("OTP expired or not found")]
    OtpExpiredOrNotFound,

    /// Registration completion attempted without a verified phone
    #[error("Phone number not verified")]
    PhoneNotVerified,

    /// Phone number already registered
    #[error("Phone number already registered")]
    PhoneTaken,

    /// Email already registered
    #[error("Email already registered")]
    EmailTaken,

    /// Invalid credentials (wrong password, or no such user)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Token signature invalid, wrong type, or refresh mismatch
    #[error("Invalid token")]
    TokenInvalid,

    /// Token past its expiry
    #[error("Token expired")]
    TokenExpired,

    /// Email/password login on an unverified email account
    #[error("Email not verified")]
    EmailNotVerified,

    /// Account soft-disabled
    #[error("Account is disabled")]
    AccountDisabled,

    /// Admin-only operation attempted by a non-admin
    #[error("Admin access required")]
    AdminOnly,

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Address not found in the user's address list
    #[error("Address not found")]
    AddressNotFound,

    /// OTP resend limit exceeded
    #[error("Too many OTP requests, please try again later")]
    RateLimited,

    /// Downstream notification provider failure
    #[error("Failed to send verification code")]
    DispatchFailed(String),

    /// Ephemeral store unreachable or misbehaving
    #[error("Store unavailable")]
    Store(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_)
            | AuthError::InvalidOtp
            | AuthError::OtpExpiredOrNotFound
            | AuthError::PhoneNotVerified => StatusCode::BAD_REQUEST,
            AuthError::PhoneTaken | AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::InvalidCredentials | AuthError::TokenInvalid | AuthError::TokenExpired => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::EmailNotVerified | AuthError::AccountDisabled | AuthError::AdminOnly => {
                StatusCode::FORBIDDEN
            }
            AuthError::UserNotFound | AuthError::AddressNotFound => StatusCode::NOT_FOUND,
            AuthError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AuthError::DispatchFailed(_) => StatusCode::BAD_GATEWAY,
            AuthError::Store(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_)
            | AuthError::InvalidOtp
            | AuthError::OtpExpiredOrNotFound
            | AuthError::PhoneNotVerified => ErrorKind::BadRequest,
            AuthError::PhoneTaken | AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials | AuthError::TokenInvalid | AuthError::TokenExpired => {
                ErrorKind::Unauthorized
            }
            AuthError::EmailNotVerified | AuthError::AccountDisabled | AuthError::AdminOnly => {
                ErrorKind::Forbidden
            }
            AuthError::UserNotFound | AuthError::AddressNotFound => ErrorKind::NotFound,
            AuthError::RateLimited => ErrorKind::TooManyRequests,
            AuthError::DispatchFailed(_) => ErrorKind::BadGateway,
            AuthError::Store(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Store(msg) => {
                tracing::error!(message = %msg, "Ephemeral store error");
            }
            AuthError::DispatchFailed(msg) => {
                tracing::error!(message = %msg, "OTP dispatch failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::RateLimited => {
                tracing::warn!("OTP rate limit tripped");
            }
            AuthError::TokenInvalid | AuthError::TokenExpired => {
                tracing::warn!(error = %self, "Token rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_client_error() {
            AuthError::Validation(err.to_string())
        } else {
            AuthError::Internal(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::InvalidOtp.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::PhoneTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::EmailNotVerified.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AuthError::RateLimited.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AuthError::DispatchFailed("timeout".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AuthError::Store("connection refused".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_kind_agrees_with_status() {
        let errors = [
            AuthError::InvalidOtp,
            AuthError::EmailTaken,
            AuthError::TokenExpired,
            AuthError::AccountDisabled,
            AuthError::AddressNotFound,
            AuthError::RateLimited,
            AuthError::DispatchFailed(String::new()),
            AuthError::Internal(String::new()),
        ];
        for err in errors {
            assert_eq!(err.kind().status_code(), err.status_code().as_u16());
        }
    }

    #[test]
    fn test_app_error_conversion_preserves_client_errors() {
        let err: AuthError = AppError::bad_request("Invalid email format").into();
        assert!(matches!(err, AuthError::Validation(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err: AuthError = AppError::internal("boom").into();
        assert!(matches!(err, AuthError::Internal(_)));
    }
}
