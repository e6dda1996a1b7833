//! Token Refresh Use Case
//!
//! Exchanges a valid refresh token for a new access token. The refresh
//! token is not rotated here; it is only re-issued at login and
//! registration.

use std::sync::Arc;

use crate::application::token::TokenService;
use crate::domain::repository::{OtpStore, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Token refresh use case
pub struct RefreshTokenUseCase<R, S>
where
    R: UserRepository,
    S: OtpStore,
{
    users: Arc<R>,
    store: Arc<S>,
    tokens: Arc<TokenService>,
}

impl<R, S> RefreshTokenUseCase<R, S>
where
    R: UserRepository,
    S: OtpStore,
{
    pub fn new(users: Arc<R>, store: Arc<S>, tokens: Arc<TokenService>) -> Self {
        Self {
            users,
            store,
            tokens,
        }
    }

    /// Verify the presented refresh token and issue a new access token
    pub async fn execute(&self, token: &str) -> AuthResult<String> {
        let claims = self.tokens.verify_refresh_token(token)?;
        let user_id = claims.user_id()?;

        // A signed, unexpired token is still rejected unless it matches
        // the stored value (detects reuse after logout or re-login).
        match self.store.get_refresh_token(&user_id).await? {
            Some(stored) if stored == token => {}
            _ => return Err(AuthError::TokenInvalid),
        }

        let user = self
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.tokens.create_access_token(&user.user_id, user.role)
    }
}
