//! Email Re-verification Use Case
//!
//! For already-registered users proving ownership of their email
//! address. Dispatches via the email sender instead of WhatsApp.

use std::sync::Arc;

use platform::otp::generate_otp;
use platform::rate_limit::RateLimitStore;

use crate::application::check_otp_rate;
use crate::application::config::AuthConfig;
use crate::domain::repository::{OtpPurpose, OtpSender, OtpStore, UserRepository};
use crate::domain::value_object::{email::Email, otp_code::OtpCode};
use crate::error::{AuthError, AuthResult};

/// Email verification use case
pub struct EmailVerificationUseCase<R, S, M>
where
    R: UserRepository,
    S: OtpStore + RateLimitStore,
    M: OtpSender,
{
    users: Arc<R>,
    store: Arc<S>,
    sender: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<R, S, M> EmailVerificationUseCase<R, S, M>
where
    R: UserRepository,
    S: OtpStore + RateLimitStore,
    M: OtpSender,
{
    pub fn new(users: Arc<R>, store: Arc<S>, sender: Arc<M>, config: Arc<AuthConfig>) -> Self {
        Self {
            users,
            store,
            sender,
            config,
        }
    }

    /// Send a verification OTP to a registered email address
    pub async fn send_otp(&self, email: &str) -> AuthResult<Email> {
        let email = Email::new(email)?;

        if self.users.find_by_email(&email).await?.is_none() {
            return Err(AuthError::UserNotFound);
        }

        check_otp_rate(self.store.as_ref(), email.as_str(), &self.config).await?;

        let code = generate_otp(self.config.otp_length);
        self.store
            .put_otp(email.as_str(), &code, self.config.otp_ttl)
            .await?;

        self.sender
            .send(email.as_str(), OtpPurpose::EmailVerification, &code)
            .await?;

        tracing::info!(email = %email, "Email verification OTP sent");

        Ok(email)
    }

    /// Verify the OTP (single use) and flag the email as verified
    pub async fn verify_otp(&self, email: &str, otp: &str) -> AuthResult<Email> {
        let email = Email::new(email)?;
        let code = OtpCode::new(otp)?;

        let stored = self
            .store
            .get_otp(email.as_str())
            .await?
            .ok_or(AuthError::OtpExpiredOrNotFound)?;

        if !code.matches(&stored) {
            return Err(AuthError::InvalidOtp);
        }

        self.store.delete_otp(email.as_str()).await?;

        let mut user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        user.mark_email_verified();
        self.users.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Email verified");

        Ok(email)
    }
}
