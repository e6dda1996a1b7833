//! Repository, Store and Sender Traits
//!
//! Interfaces for persistence and outbound dispatch. Implementations
//! live in the infrastructure layer.

use std::fmt;
use std::time::Duration;

use crate::domain::entity::user::User;
use crate::domain::value_object::{UserId, email::Email, phone_number::PhoneNumber};
use crate::error::AuthResult;

/// User repository trait (persistent store)
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by normalized phone number
    async fn find_by_phone(&self, phone_number: &PhoneNumber) -> AuthResult<Option<User>>;

    /// Find user by normalized email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Update user (full document write)
    async fn update(&self, user: &User) -> AuthResult<()>;
}

/// Ephemeral OTP/session store trait (TTL-capable key-value backend)
///
/// One active code per subject; a new write overwrites the previous
/// value at the same key (last-writer-wins).
#[trait_variant::make(OtpStore: Send)]
pub trait LocalOtpStore {
    /// Store a code for the subject (phone or email), overwriting any prior one
    async fn put_otp(&self, subject: &str, code: &str, ttl: Duration) -> AuthResult<()>;

    /// Fetch the current code for the subject, if not expired
    async fn get_otp(&self, subject: &str) -> AuthResult<Option<String>>;

    /// Invalidate the code (single use)
    async fn delete_otp(&self, subject: &str) -> AuthResult<()>;

    /// Record that the subject passed OTP verification, pending registration
    async fn mark_verified(&self, subject: &str, ttl: Duration) -> AuthResult<()>;

    /// Check whether the subject has an unexpired verified marker
    async fn is_verified(&self, subject: &str) -> AuthResult<bool>;

    /// Consume the verified marker
    async fn clear_verified(&self, subject: &str) -> AuthResult<()>;

    /// Store the current refresh token for the user (sole validity authority)
    async fn put_refresh_token(&self, user_id: &UserId, token: &str, ttl: Duration)
    -> AuthResult<()>;

    /// Fetch the stored refresh token for the user
    async fn get_refresh_token(&self, user_id: &UserId) -> AuthResult<Option<String>>;

    /// Revoke the stored refresh token
    async fn delete_refresh_token(&self, user_id: &UserId) -> AuthResult<()>;
}

/// What a verification code is for; carried into the message template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpPurpose {
    Registration,
    Login,
    EmailVerification,
}

impl OtpPurpose {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::Registration => "registration",
            OtpPurpose::Login => "login",
            OtpPurpose::EmailVerification => "email verification",
        }
    }
}

impl fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outbound verification-code dispatch (WhatsApp, email)
#[trait_variant::make(OtpSender: Send)]
pub trait LocalOtpSender {
    /// Deliver a code to the recipient; failure maps to `DispatchFailed`
    async fn send(&self, recipient: &str, purpose: OtpPurpose, code: &str) -> AuthResult<()>;
}
