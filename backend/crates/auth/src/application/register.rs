//! Registration Use Case
//!
//! Three-step state machine: unverified → phone-verified → complete.
//! The phone-verified state lives in the ephemeral store as a marker
//! with its own TTL, decoupled from the OTP code itself.

use std::sync::Arc;

use platform::otp::generate_otp;
use platform::password::ClearTextPassword;
use platform::rate_limit::RateLimitStore;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::application::{SignedInOutput, check_otp_rate, issue_session};
use crate::domain::entity::user::User;
use crate::domain::repository::{OtpPurpose, OtpSender, OtpStore, UserRepository};
use crate::domain::value_object::{email::Email, otp_code::OtpCode, phone_number::PhoneNumber};
use crate::error::{AuthError, AuthResult};

/// Registration completion input.
///
/// `password` is optional; an account without one can only sign in via
/// mobile OTP until a password is set.
pub struct CompleteRegistrationInput {
    pub phone_number: String,
    pub email: String,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Registration use case
pub struct RegistrationUseCase<R, S, W>
where
    R: UserRepository,
    S: OtpStore + RateLimitStore,
    W: OtpSender,
{
    users: Arc<R>,
    store: Arc<S>,
    sender: Arc<W>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<R, S, W> RegistrationUseCase<R, S, W>
where
    R: UserRepository,
    S: OtpStore + RateLimitStore,
    W: OtpSender,
{
    pub fn new(
        users: Arc<R>,
        store: Arc<S>,
        sender: Arc<W>,
        tokens: Arc<TokenService>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            users,
            store,
            sender,
            tokens,
            config,
        }
    }

    /// Step 1: send a registration OTP to an unregistered phone number
    pub async fn send_otp(&self, phone_number: &str) -> AuthResult<PhoneNumber> {
        let phone = PhoneNumber::new(phone_number)?;

        if self.users.find_by_phone(&phone).await?.is_some() {
            return Err(AuthError::PhoneTaken);
        }

        check_otp_rate(self.store.as_ref(), phone.as_str(), &self.config).await?;

        // Overwrites any previous code, invalidating it
        let code = generate_otp(self.config.otp_length);
        self.store
            .put_otp(phone.as_str(), &code, self.config.otp_ttl)
            .await?;

        self.sender
            .send(phone.as_str(), OtpPurpose::Registration, &code)
            .await?;

        tracing::info!(phone = %phone, "Registration OTP sent");

        Ok(phone)
    }

    /// Step 2: verify the OTP; on success the code is consumed and a
    /// phone-verified marker is written for step 3
    pub async fn verify_otp(&self, phone_number: &str, otp: &str) -> AuthResult<()> {
        let phone = PhoneNumber::new(phone_number)?;
        let code = OtpCode::new(otp)?;

        let stored = self
            .store
            .get_otp(phone.as_str())
            .await?
            .ok_or(AuthError::OtpExpiredOrNotFound)?;

        if !code.matches(&stored) {
            return Err(AuthError::InvalidOtp);
        }

        self.store.delete_otp(phone.as_str()).await?;
        self.store
            .mark_verified(phone.as_str(), self.config.verified_marker_ttl)
            .await?;

        tracing::info!(phone = %phone, "Phone number verified");

        Ok(())
    }

    /// Step 3: create the account and sign the user in
    pub async fn complete(&self, input: CompleteRegistrationInput) -> AuthResult<SignedInOutput> {
        let phone = PhoneNumber::new(&input.phone_number)?;
        let email = Email::new(&input.email)?;

        let password = match input.password {
            Some(raw) => {
                let clear = ClearTextPassword::new(raw)
                    .map_err(|e| AuthError::Validation(e.to_string()))?;
                let hash = clear
                    .hash(self.config.pepper())
                    .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))?;
                Some(hash)
            }
            None => None,
        };

        if !self.store.is_verified(phone.as_str()).await? {
            return Err(AuthError::PhoneNotVerified);
        }

        if self.users.find_by_phone(&phone).await?.is_some() {
            return Err(AuthError::PhoneTaken);
        }
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let name = input
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let mut user = User::register(phone.clone(), email, name);
        if let Some(hash) = password {
            user.set_password(hash);
        }
        self.users.create(&user).await?;

        self.store.clear_verified(phone.as_str()).await?;

        let output = issue_session(
            self.users.as_ref(),
            self.store.as_ref(),
            &self.tokens,
            &self.config,
            user,
        )
        .await?;

        tracing::info!(user_id = %output.user.user_id, "Registration completed");

        Ok(output)
    }
}
