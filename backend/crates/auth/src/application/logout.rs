//! Logout Use Case
//!
//! Revokes the stored refresh token; the boundary clears the cookies.

use std::sync::Arc;

use crate::domain::repository::{OtpStore, UserRepository};
use crate::domain::value_object::UserId;
use crate::error::AuthResult;

/// Logout use case
pub struct LogoutUseCase<R, S>
where
    R: UserRepository,
    S: OtpStore,
{
    users: Arc<R>,
    store: Arc<S>,
}

impl<R, S> LogoutUseCase<R, S>
where
    R: UserRepository,
    S: OtpStore,
{
    pub fn new(users: Arc<R>, store: Arc<S>) -> Self {
        Self { users, store }
    }

    /// Revoke the refresh token for the user
    pub async fn execute(&self, user_id: &UserId) -> AuthResult<()> {
        self.store.delete_refresh_token(user_id).await?;

        // Clear the informational copy on the user document
        if let Some(mut user) = self.users.find_by_id(user_id).await? {
            user.set_refresh_token(None);
            self.users.update(&user).await?;
        }

        tracing::info!(user_id = %user_id, "User logged out");

        Ok(())
    }
}
