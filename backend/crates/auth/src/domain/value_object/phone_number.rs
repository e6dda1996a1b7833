//! Phone Number Value Object
//!
//! Normalized phone number in loose E.164 shape. All store lookups go
//! through this type, so normalization happens exactly once.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Minimum digits in a phone number
const PHONE_MIN_DIGITS: usize = 8;

/// Maximum digits (E.164 upper bound)
const PHONE_MAX_DIGITS: usize = 15;

/// Phone number value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new phone number with validation.
    ///
    /// Spaces, hyphens and parentheses are stripped; an optional leading
    /// `+` is kept. The remainder must be 8-15 digits.
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let mut normalized = String::new();

        for (i, ch) in raw.as_ref().trim().chars().enumerate() {
            match ch {
                '+' if i == 0 => normalized.push('+'),
                '0'..='9' => normalized.push(ch),
                ' ' | '-' | '(' | ')' => continue,
                _ => return Err(AppError::bad_request("Invalid phone number format")),
            }
        }

        let digits = normalized.trim_start_matches('+').len();
        if digits < PHONE_MIN_DIGITS || digits > PHONE_MAX_DIGITS {
            return Err(AppError::bad_request(format!(
                "Phone number must have {} to {} digits",
                PHONE_MIN_DIGITS, PHONE_MAX_DIGITS
            )));
        }

        Ok(Self(normalized))
    }

    /// Create from database value (assumed already normalized)
    pub fn from_db(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }

    /// Get the phone number as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to string for database storage
    pub fn into_db(self) -> String {
        self.0
    }
}

impl FromStr for PhoneNumber {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        PhoneNumber::new(s)
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
