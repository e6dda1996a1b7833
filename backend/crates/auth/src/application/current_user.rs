//! Current User Use Case

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

/// Current-user lookup
pub struct CurrentUserUseCase<R>
where
    R: UserRepository,
{
    users: Arc<R>,
}

impl<R> CurrentUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }

    /// Fetch the authenticated user; sanitization happens at the DTO boundary
    pub async fn get_me(&self, user_id: &UserId) -> AuthResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
