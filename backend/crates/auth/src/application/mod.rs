//! Application Layer
//!
//! Use cases orchestrating the domain traits. Each flow is a struct
//! generic over the repository/store/sender traits, injected via `Arc`.

pub mod address;
pub mod config;
pub mod current_user;
pub mod email_verification;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod token;

pub use address::{AddressInput, AddressUseCase};
pub use current_user::CurrentUserUseCase;
pub use email_verification::EmailVerificationUseCase;
pub use login::LoginUseCase;
pub use logout::LogoutUseCase;
pub use refresh::RefreshTokenUseCase;
pub use register::{CompleteRegistrationInput, RegistrationUseCase};
pub use token::{Claims, TokenService, TokenType};

use platform::rate_limit::RateLimitStore;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::{OtpStore, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Output of every flow that ends with the user signed in
#[derive(Debug)]
pub struct SignedInOutput {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Rate-limit counter key for a subject (phone or email)
pub(crate) fn otp_rate_key(subject: &str) -> String {
    format!("otp_rate:{}", subject)
}

/// Check the OTP resend limit for a subject; `RateLimited` if exceeded
pub(crate) async fn check_otp_rate<S>(store: &S, subject: &str, config: &AuthConfig) -> AuthResult<()>
where
    S: RateLimitStore,
{
    let limited = store
        .is_rate_limited(&otp_rate_key(subject), &config.otp_rate_limit)
        .await
        .map_err(|e| AuthError::Store(e.to_string()))?;

    if limited {
        return Err(AuthError::RateLimited);
    }
    Ok(())
}

/// Issue a token pair, store the refresh token, and persist login state
pub(crate) async fn issue_session<R, S>(
    users: &R,
    store: &S,
    tokens: &TokenService,
    config: &AuthConfig,
    mut user: User,
) -> AuthResult<SignedInOutput>
where
    R: UserRepository,
    S: OtpStore,
{
    let access_token = tokens.create_access_token(&user.user_id, user.role)?;
    let refresh_token = tokens.create_refresh_token(&user.user_id, user.role)?;

    // The stored value is the sole authority for refresh validity;
    // last-writer-wins gives one active session per user.
    store
        .put_refresh_token(&user.user_id, &refresh_token, config.refresh_token_ttl)
        .await?;

    user.record_login();
    user.set_refresh_token(Some(refresh_token.clone()));
    users.update(&user).await?;

    Ok(SignedInOutput {
        user,
        access_token,
        refresh_token,
    })
}
