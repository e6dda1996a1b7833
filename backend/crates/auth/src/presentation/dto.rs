//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::user::{Address, User};

// ============================================================================
// Requests
// ============================================================================

/// Send/resend a registration or login OTP
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    pub phone_number: String,
}

/// Verify a mobile OTP
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub phone_number: String,
    pub otp: String,
}

/// Complete registration after phone verification
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteRegistrationRequest {
    pub phone_number: String,
    pub email: String,
    pub name: Option<String>,
    /// Optional; enables email/password login once the email is verified
    pub password: Option<String>,
}

/// Email/password login
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailLoginRequest {
    pub email: String,
    pub password: String,
}

/// Send an email verification OTP
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailOtpRequest {
    pub email: String,
}

/// Verify an email OTP
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailOtpRequest {
    pub email: String,
    pub otp: String,
}

/// Add or update an address (addressId present selects the edit path)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    pub address_id: Option<Uuid>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub is_default: Option<bool>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

// ============================================================================
// Responses
// ============================================================================

/// Generic message response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message: String,
}

/// OTP sent to a phone number
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpSentResponse {
    pub message: String,
    pub phone_number: String,
}

/// OTP sent to an email address
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailOtpResponse {
    pub message: String,
    pub email: String,
}

/// Signed-in response (registration completion, both login paths)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: UserView,
    pub access_token: String,
}

/// New access token from the refresh endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

/// Updated address list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressListResponse {
    pub message: String,
    pub addresses: Vec<AddressView>,
}

/// Current user response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user: UserView,
}

// ============================================================================
// Sanitized views
// ============================================================================

/// Sanitized user view.
///
/// The only user shape that crosses the HTTP boundary; carries no
/// password or refresh-token material by construction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub phone_number: String,
    pub email: String,
    pub name: Option<String>,
    pub is_phone_verified: bool,
    pub is_email_verified: bool,
    pub role: String,
    pub addresses: Vec<AddressView>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.into_uuid(),
            phone_number: user.phone_number.as_str().to_string(),
            email: user.email.as_str().to_string(),
            name: user.name.clone(),
            is_phone_verified: user.is_phone_verified,
            is_email_verified: user.is_email_verified,
            role: user.role.code().to_string(),
            addresses: user.addresses.iter().map(AddressView::from).collect(),
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

/// Address view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressView {
    pub address_id: Uuid,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub is_default: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<&Address> for AddressView {
    fn from(address: &Address) -> Self {
        Self {
            address_id: address.address_id.into_uuid(),
            street: address.street.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            postal_code: address.postal_code.clone(),
            country: address.country.clone(),
            is_default: address.is_default,
            latitude: address.latitude,
            longitude: address.longitude,
        }
    }
}
