//! OTP Code Value Object
//!
//! User-submitted verification code. Validation rejects obviously
//! malformed input before any store lookup.

use kernel::error::app_error::{AppError, AppResult};
use std::str::FromStr;

/// Shortest code length we ever issue
const OTP_MIN_LENGTH: usize = 4;

/// Longest code length we ever issue
const OTP_MAX_LENGTH: usize = 10;

/// Submitted OTP code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Create a new OTP code with validation (trimmed, digits only)
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let code = raw.as_ref().trim();

        if code.len() < OTP_MIN_LENGTH || code.len() > OTP_MAX_LENGTH {
            return Err(AppError::bad_request("Invalid OTP format"));
        }

        if !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::bad_request("Invalid OTP format"));
        }

        Ok(Self(code.to_string()))
    }

    /// Get the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant-shape comparison against a stored code string
    pub fn matches(&self, stored: &str) -> bool {
        self.0 == stored
    }
}

impl FromStr for OtpCode {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        OtpCode::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_valid() {
        assert!(OtpCode::new("123456").is_ok());
        assert!(OtpCode::new("  0000  ").is_ok());
        assert!(OtpCode::new("0123456789").is_ok());
    }

    #[test]
    fn test_otp_invalid() {
        assert!(OtpCode::new("").is_err());
        assert!(OtpCode::new("123").is_err());
        assert!(OtpCode::new("12345678901").is_err());
        assert!(OtpCode::new("12a456").is_err());
        assert!(OtpCode::new("12 456").is_err());
    }

    #[test]
    fn test_otp_matches() {
        let code = OtpCode::new("123456").unwrap();
        assert!(code.matches("123456"));
        assert!(!code.matches("000000"));
    }
}
