//! Login Use Cases
//!
//! Two independent paths: email/password and mobile OTP. Both end in
//! the same signed-in state (token pair issued, refresh token stored).

use std::sync::Arc;

use platform::otp::generate_otp;
use platform::password::ClearTextPassword;
use platform::rate_limit::RateLimitStore;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::application::{SignedInOutput, check_otp_rate, issue_session};
use crate::domain::repository::{OtpPurpose, OtpSender, OtpStore, UserRepository};
use crate::domain::value_object::{email::Email, otp_code::OtpCode, phone_number::PhoneNumber};
use crate::error::{AuthError, AuthResult};

/// Login use case
pub struct LoginUseCase<R, S, W>
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

impl<R, S, W> LoginUseCase<R, S, W>
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

    /// Email/password login.
    ///
    /// Missing user, malformed email, absent password and wrong password
    /// all collapse into `InvalidCredentials` to prevent enumeration.
    pub async fn with_email(&self, email: &str, password: String) -> AuthResult<SignedInOutput> {
        let email = Email::new(email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.can_login() {
            return Err(AuthError::AccountDisabled);
        }
        if !user.is_email_verified {
            return Err(AuthError::EmailNotVerified);
        }

        let hash = user.password.as_ref().ok_or(AuthError::InvalidCredentials)?;
        let candidate =
            ClearTextPassword::new(password).map_err(|_| AuthError::InvalidCredentials)?;

        if !hash.verify(&candidate, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let output = issue_session(
            self.users.as_ref(),
            self.store.as_ref(),
            &self.tokens,
            &self.config,
            user,
        )
        .await?;

        tracing::info!(user_id = %output.user.user_id, "Email login succeeded");

        Ok(output)
    }

    /// Send a login OTP to a registered phone number
    pub async fn send_mobile_otp(&self, phone_number: &str) -> AuthResult<PhoneNumber> {
        let phone = PhoneNumber::new(phone_number)?;

        let user = self
            .users
            .find_by_phone(&phone)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.can_login() {
            return Err(AuthError::AccountDisabled);
        }

        check_otp_rate(self.store.as_ref(), phone.as_str(), &self.config).await?;

        let code = generate_otp(self.config.otp_length);
        self.store
            .put_otp(phone.as_str(), &code, self.config.otp_ttl)
            .await?;

        self.sender
            .send(phone.as_str(), OtpPurpose::Login, &code)
            .await?;

        tracing::info!(phone = %phone, "Login OTP sent");

        Ok(phone)
    }

    /// Verify a login OTP (single use) and sign the user in
    pub async fn verify_mobile_otp(
        &self,
        phone_number: &str,
        otp: &str,
    ) -> AuthResult<SignedInOutput> {
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

        let user = self
            .users
            .find_by_phone(&phone)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.can_login() {
            return Err(AuthError::AccountDisabled);
        }

        let output = issue_session(
            self.users.as_ref(),
            self.store.as_ref(),
            &self.tokens,
            &self.config,
            user,
        )
        .await?;

        tracing::info!(user_id = %output.user.user_id, "Mobile login succeeded");

        Ok(output)
    }
}
