//! Redis Ephemeral Store
//!
//! OTP codes, phone-verified markers, rate-limit counters and refresh
//! tokens, all with TTL expiry. One long-lived managed connection is
//! shared across requests.

use std::time::Duration;

use redis::aio::ConnectionManager;

use platform::rate_limit::{RateLimitConfig, RateLimitStore};

use crate::domain::repository::OtpStore;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

/// Redis-backed ephemeral store
#[derive(Clone)]
pub struct RedisOtpStore {
    conn: ConnectionManager,
}

impl RedisOtpStore {
    /// Connect to Redis and verify the connection with a PING
    pub async fn connect(url: &str) -> AuthResult<Self> {
        let client = redis::Client::open(url).map_err(store_err)?;

        let mut conn = client.get_connection_manager().await.map_err(store_err)?;

        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(store_err)?;
        if pong != "PONG" {
            return Err(AuthError::Store("Redis ping did not return PONG".into()));
        }

        tracing::info!("Connected to Redis");

        Ok(Self { conn })
    }

    // ConnectionManager is a cheap clone over one multiplexed connection
    fn conn(&self) -> ConnectionManager {
        self.conn.clone()
    }

    fn otp_key(subject: &str) -> String {
        format!("otp:{}", subject)
    }

    fn verified_key(subject: &str) -> String {
        format!("otp_verified:{}", subject)
    }

    fn refresh_key(user_id: &UserId) -> String {
        format!("refresh:{}", user_id)
    }

    async fn set_with_ttl(&self, key: String, value: &str, ttl: Duration) -> AuthResult<()> {
        let mut conn = self.conn();
        redis::cmd("SETEX")
            .arg(&key)
            .arg(ttl.as_secs())
            .arg(value)
            .query_async::<()>(&mut conn)
            .await
            .map_err(store_err)
    }

    async fn get(&self, key: String) -> AuthResult<Option<String>> {
        let mut conn = self.conn();
        redis::cmd("GET")
            .arg(&key)
            .query_async(&mut conn)
            .await
            .map_err(store_err)
    }

    async fn delete(&self, key: String) -> AuthResult<()> {
        let mut conn = self.conn();
        redis::cmd("DEL")
            .arg(&key)
            .query_async::<()>(&mut conn)
            .await
            .map_err(store_err)
    }
}

impl OtpStore for RedisOtpStore {
    async fn put_otp(&self, subject: &str, code: &str, ttl: Duration) -> AuthResult<()> {
        self.set_with_ttl(Self::otp_key(subject), code, ttl).await
    }

    async fn get_otp(&self, subject: &str) -> AuthResult<Option<String>> {
        self.get(Self::otp_key(subject)).await
    }

    async fn delete_otp(&self, subject: &str) -> AuthResult<()> {
        self.delete(Self::otp_key(subject)).await
    }

    async fn mark_verified(&self, subject: &str, ttl: Duration) -> AuthResult<()> {
        self.set_with_ttl(Self::verified_key(subject), "1", ttl)
            .await
    }

    async fn is_verified(&self, subject: &str) -> AuthResult<bool> {
        let mut conn = self.conn();
        let exists: i64 = redis::cmd("EXISTS")
            .arg(Self::verified_key(subject))
            .query_async(&mut conn)
            .await
            .map_err(store_err)?;
        Ok(exists > 0)
    }

    async fn clear_verified(&self, subject: &str) -> AuthResult<()> {
        self.delete(Self::verified_key(subject)).await
    }

    async fn put_refresh_token(
        &self,
        user_id: &UserId,
        token: &str,
        ttl: Duration,
    ) -> AuthResult<()> {
        self.set_with_ttl(Self::refresh_key(user_id), token, ttl)
            .await
    }

    async fn get_refresh_token(&self, user_id: &UserId) -> AuthResult<Option<String>> {
        self.get(Self::refresh_key(user_id)).await
    }

    async fn delete_refresh_token(&self, user_id: &UserId) -> AuthResult<()> {
        self.delete(Self::refresh_key(user_id)).await
    }
}

impl RateLimitStore for RedisOtpStore {
    /// INCR then EXPIRE on first increment. INCR is atomic on the
    /// server, so concurrent sends for the same key cannot both observe
    /// a count under the limit.
    async fn is_rate_limited(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let mut conn = self.conn();

        let count: u32 = redis::cmd("INCR").arg(key).query_async(&mut conn).await?;

        if count == 1 {
            redis::cmd("EXPIRE")
                .arg(key)
                .arg(config.window_secs())
                .query_async::<()>(&mut conn)
                .await?;
        }

        Ok(count > config.max_requests)
    }
}

fn store_err(e: redis::RedisError) -> AuthError {
    AuthError::Store(e.to_string())
}
