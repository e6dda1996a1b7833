//! Token Service
//!
//! Issues and verifies the signed access/refresh token pair (HS256).
//! Access and refresh tokens use separate secrets; verification rejects
//! a token presented with the wrong type.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::value_object::{UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Token type embedded in the claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Signed token payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Role code ("user" / "admin")
    pub role: String,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

impl Claims {
    /// Parse the subject back into a typed user ID
    pub fn user_id(&self) -> AuthResult<UserId> {
        Uuid::parse_str(&self.sub)
            .map(UserId::from_uuid)
            .map_err(|_| AuthError::TokenInvalid)
    }

    /// Parse the role code
    pub fn user_role(&self) -> AuthResult<UserRole> {
        UserRole::from_code(&self.role).ok_or(AuthError::TokenInvalid)
    }
}

/// Access/refresh token issuer and verifier
pub struct TokenService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(&config.access_token_secret),
            access_decoding: DecodingKey::from_secret(&config.access_token_secret),
            refresh_encoding: EncodingKey::from_secret(&config.refresh_token_secret),
            refresh_decoding: DecodingKey::from_secret(&config.refresh_token_secret),
            access_ttl: config.access_token_ttl,
            refresh_ttl: config.refresh_token_ttl,
        }
    }

    /// Sign a short-lived access token
    pub fn create_access_token(&self, user_id: &UserId, role: UserRole) -> AuthResult<String> {
        let now = Utc::now().timestamp();
        self.sign(
            &self.access_encoding,
            user_id,
            role,
            TokenType::Access,
            now,
            now + self.access_ttl.as_secs() as i64,
        )
    }

    /// Sign a long-lived refresh token
    pub fn create_refresh_token(&self, user_id: &UserId, role: UserRole) -> AuthResult<String> {
        let now = Utc::now().timestamp();
        self.sign(
            &self.refresh_encoding,
            user_id,
            role,
            TokenType::Refresh,
            now,
            now + self.refresh_ttl.as_secs() as i64,
        )
    }

    /// Verify an access token signature, expiry and type
    pub fn verify_access_token(&self, token: &str) -> AuthResult<Claims> {
        Self::verify(&self.access_decoding, token, TokenType::Access)
    }

    /// Verify a refresh token signature, expiry and type.
    ///
    /// The caller must additionally cross-check the token against the
    /// stored value for the user; signature validity alone is not enough.
    pub fn verify_refresh_token(&self, token: &str) -> AuthResult<Claims> {
        Self::verify(&self.refresh_decoding, token, TokenType::Refresh)
    }

    fn sign(
        &self,
        key: &EncodingKey,
        user_id: &UserId,
        role: UserRole,
        token_type: TokenType,
        iat: i64,
        exp: i64,
    ) -> AuthResult<String> {
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.code().to_string(),
            token_type,
            iat,
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, key)
            .map_err(|e| AuthError::Internal(format!("Token signing failed: {}", e)))
    }

    fn verify(key: &DecodingKey, token: &str, expected: TokenType) -> AuthResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, key, &validation).map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid,
        })?;

        if data.claims.token_type != expected {
            return Err(AuthError::TokenInvalid);
        }

        Ok(data.claims)
    }
}
