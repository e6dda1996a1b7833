//! Auth Middleware
//!
//! Verifies the access token (Bearer header or `accessToken` cookie)
//! and injects [`AuthContext`] into the request extensions.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;

use platform::cookie::extract_cookie;

use crate::application::config::ACCESS_TOKEN_COOKIE;
use crate::application::token::TokenService;
use crate::domain::value_object::{UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Authenticated request identity
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: UserId,
    pub role: UserRole,
}

impl AuthContext {
    /// Gate for admin-only operations
    pub fn require_admin(&self) -> AuthResult<()> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(AuthError::AdminOnly)
        }
    }
}

/// State for the auth middleware
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub tokens: Arc<TokenService>,
}

/// Require a valid access token; rejects with 401 otherwise
pub async fn require_auth(
    State(state): State<AuthMiddlewareState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_access_token(req.headers()).ok_or(AuthError::TokenInvalid)?;

    let claims = state.tokens.verify_access_token(&token)?;
    let context = AuthContext {
        user_id: claims.user_id()?,
        role: claims.user_role()?,
    };

    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}

/// Bearer header takes precedence over the cookie
fn extract_access_token(headers: &HeaderMap) -> Option<String> {
    bearer_token(headers).or_else(|| extract_cookie(headers, ACCESS_TOKEN_COOKIE))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_bearer_token_missing_or_malformed() {
        let headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic xyz"));
        assert_eq!(bearer_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_cookie_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("accessToken=tok123; other=x"),
        );
        assert_eq!(extract_access_token(&headers), Some("tok123".to_string()));
    }

    #[test]
    fn test_require_admin() {
        let admin = AuthContext {
            user_id: UserId::new(),
            role: UserRole::Admin,
        };
        assert!(admin.require_admin().is_ok());

        let user = AuthContext {
            user_id: UserId::new(),
            role: UserRole::User,
        };
        assert!(matches!(user.require_admin(), Err(AuthError::AdminOnly)));
    }
}
