//! Application Configuration
//!
//! Configuration for the Auth application layer. Production values come
//! from the environment; `development()` gives a self-contained local
//! setup with insecure cookies.

use std::env;
use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::otp::DEFAULT_OTP_LENGTH;
use platform::rate_limit::RateLimitConfig;

use crate::error::{AuthError, AuthResult};

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Access-token cookie name
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// Refresh-token cookie name
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// OTP code length (digits)
    pub otp_length: usize,
    /// OTP validity window (5 minutes)
    pub otp_ttl: Duration,
    /// Phone-verified marker validity, pending registration completion
    pub verified_marker_ttl: Duration,
    /// OTP resend limit + cooldown window
    pub otp_rate_limit: RateLimitConfig,
    /// Access-token signing secret
    pub access_token_secret: Vec<u8>,
    /// Refresh-token signing secret (must differ from access secret)
    pub refresh_token_secret: Vec<u8>,
    /// Access token lifetime (15 minutes)
    pub access_token_ttl: Duration,
    /// Refresh token lifetime (30 days)
    pub refresh_token_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl AuthConfig {
    /// Create config with the given signing secrets.
    ///
    /// Secret separation prevents a leaked access-token secret from
    /// forging refresh tokens, so equal secrets are rejected.
    pub fn new(
        access_token_secret: impl Into<Vec<u8>>,
        refresh_token_secret: impl Into<Vec<u8>>,
    ) -> AuthResult<Self> {
        let access_token_secret = access_token_secret.into();
        let refresh_token_secret = refresh_token_secret.into();

        if access_token_secret.is_empty() || refresh_token_secret.is_empty() {
            return Err(AuthError::Internal(
                "Token secrets must not be empty".to_string(),
            ));
        }
        if access_token_secret == refresh_token_secret {
            return Err(AuthError::Internal(
                "Access and refresh token secrets must differ".to_string(),
            ));
        }

        Ok(Self {
            otp_length: DEFAULT_OTP_LENGTH,
            otp_ttl: Duration::from_secs(5 * 60),
            verified_marker_ttl: Duration::from_secs(10 * 60),
            otp_rate_limit: RateLimitConfig::default(),
            access_token_secret,
            refresh_token_secret,
            access_token_ttl: Duration::from_secs(15 * 60),
            refresh_token_ttl: Duration::from_secs(30 * 24 * 3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
        })
    }

    /// Create config for development (insecure cookie, fixed secrets)
    pub fn development() -> Self {
        let mut config = Self::new(
            b"dev-access-token-secret".to_vec(),
            b"dev-refresh-token-secret".to_vec(),
        )
        .expect("development secrets are valid");
        config.cookie_secure = false;
        config
    }

    /// Load config from environment variables.
    ///
    /// `ACCESS_TOKEN_SECRET` and `REFRESH_TOKEN_SECRET` are required;
    /// everything else falls back to defaults.
    pub fn from_env() -> AuthResult<Self> {
        let access_secret = require_env("ACCESS_TOKEN_SECRET")?;
        let refresh_secret = require_env("REFRESH_TOKEN_SECRET")?;

        let mut config = Self::new(access_secret.into_bytes(), refresh_secret.into_bytes())?;

        if let Some(length) = parse_env::<usize>("OTP_LENGTH")? {
            config.otp_length = length;
        }
        if let Some(secs) = parse_env::<u64>("OTP_EXPIRY_SECS")? {
            config.otp_ttl = Duration::from_secs(secs);
            config.verified_marker_ttl = Duration::from_secs(secs * 2);
        }
        if let Some(limit) = parse_env::<u32>("OTP_RESEND_LIMIT")? {
            config.otp_rate_limit.max_requests = limit;
        }
        if let Some(secs) = parse_env::<u64>("OTP_RESEND_COOLDOWN_SECS")? {
            config.otp_rate_limit.window = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_env::<u64>("ACCESS_TOKEN_TTL_SECS")? {
            config.access_token_ttl = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_env::<u64>("REFRESH_TOKEN_TTL_SECS")? {
            config.refresh_token_ttl = Duration::from_secs(secs);
        }
        if let Ok(secure) = env::var("COOKIE_SECURE") {
            config.cookie_secure = secure != "false" && secure != "0";
        }
        if let Ok(pepper) = env::var("PASSWORD_PEPPER") {
            if !pepper.is_empty() {
                config.password_pepper = Some(pepper.into_bytes());
            }
        }

        Ok(config)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Cookie settings for the refresh token (30-day lifetime)
    pub fn refresh_cookie(&self) -> CookieConfig {
        self.cookie(REFRESH_TOKEN_COOKIE, self.refresh_token_ttl)
    }

    /// Cookie settings for the access token (15-minute lifetime)
    pub fn access_cookie(&self) -> CookieConfig {
        self.cookie(ACCESS_TOKEN_COOKIE, self.access_token_ttl)
    }

    fn cookie(&self, name: &str, max_age: Duration) -> CookieConfig {
        CookieConfig {
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            ..CookieConfig::named(name, max_age.as_secs() as i64)
        }
    }
}

fn require_env(name: &str) -> AuthResult<String> {
    env::var(name).map_err(|_| AuthError::Internal(format!("{} must be set", name)))
}

fn parse_env<T: std::str::FromStr>(name: &str) -> AuthResult<Option<T>> {
    match env::var(name) {
        Ok(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| AuthError::Internal(format!("{} is not a valid number", name))),
        Err(_) => Ok(None),
    }
}
