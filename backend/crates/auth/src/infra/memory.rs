//! In-Memory Store Implementations
//!
//! Process-local implementations of the domain traits, used by the
//! use-case tests and handy for local development without Redis or
//! Postgres. TTL handling mirrors the real stores (lazy expiry on read).

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use platform::rate_limit::{RateLimitConfig, RateLimitStore};

use crate::domain::entity::user::User;
use crate::domain::repository::{OtpPurpose, OtpSender, OtpStore, UserRepository};
use crate::domain::value_object::{UserId, email::Email, phone_number::PhoneNumber};
use crate::error::{AuthError, AuthResult};

/// In-memory user repository
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user directly (test setup)
    pub fn insert(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|u| u.phone_number == user.phone_number) {
            return Err(AuthError::PhoneTaken);
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }

        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.user_id == *user_id).cloned())
    }

    async fn find_by_phone(&self, phone_number: &PhoneNumber) -> AuthResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.phone_number == *phone_number)
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == *email).cloned())
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.user_id == user.user_id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(AuthError::UserNotFound),
        }
    }
}

/// In-memory TTL key-value store
#[derive(Default)]
pub struct InMemoryOtpStore {
    entries: Mutex<HashMap<String, (String, Instant)>>,
    counters: Mutex<HashMap<String, (u32, Instant)>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn put(&self, key: String, value: String, ttl: Duration) {
        self.entries
            .lock()
            .unwrap()
            .insert(key, (value, Instant::now() + ttl));
    }

    fn fetch(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some((value, expires_at)) if *expires_at > Instant::now() => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

impl OtpStore for InMemoryOtpStore {
    async fn put_otp(&self, subject: &str, code: &str, ttl: Duration) -> AuthResult<()> {
        self.put(format!("otp:{}", subject), code.to_string(), ttl);
        Ok(())
    }

    async fn get_otp(&self, subject: &str) -> AuthResult<Option<String>> {
        Ok(self.fetch(&format!("otp:{}", subject)))
    }

    async fn delete_otp(&self, subject: &str) -> AuthResult<()> {
        self.remove(&format!("otp:{}", subject));
        Ok(())
    }

    async fn mark_verified(&self, subject: &str, ttl: Duration) -> AuthResult<()> {
        self.put(format!("otp_verified:{}", subject), "1".to_string(), ttl);
        Ok(())
    }

    async fn is_verified(&self, subject: &str) -> AuthResult<bool> {
        Ok(self.fetch(&format!("otp_verified:{}", subject)).is_some())
    }

    async fn clear_verified(&self, subject: &str) -> AuthResult<()> {
        self.remove(&format!("otp_verified:{}", subject));
        Ok(())
    }

    async fn put_refresh_token(
        &self,
        user_id: &UserId,
        token: &str,
        ttl: Duration,
    ) -> AuthResult<()> {
        self.put(format!("refresh:{}", user_id), token.to_string(), ttl);
        Ok(())
    }

    async fn get_refresh_token(&self, user_id: &UserId) -> AuthResult<Option<String>> {
        Ok(self.fetch(&format!("refresh:{}", user_id)))
    }

    async fn delete_refresh_token(&self, user_id: &UserId) -> AuthResult<()> {
        self.remove(&format!("refresh:{}", user_id));
        Ok(())
    }
}

impl RateLimitStore for InMemoryOtpStore {
    async fn is_rate_limited(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let mut counters = self.counters.lock().unwrap();
        let now = Instant::now();

        // Lazy expiry, same as the TTL entries
        counters.retain(|_, (_, expires_at)| *expires_at > now);

        let entry = counters.entry(key.to_string()).or_insert((0, now + config.window));
        entry.0 += 1;

        Ok(entry.0 > config.max_requests)
    }
}

/// A dispatched message captured by [`RecordingSender`]
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub recipient: String,
    pub purpose: OtpPurpose,
    pub code: String,
}

/// Sender double that records every dispatch
#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<SentMessage>>,
    fail_next: AtomicBool,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next dispatch fail with `DispatchFailed`
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// The code carried by the most recent dispatch
    pub fn last_code(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|m| m.code.clone())
    }

    pub fn last_message(&self) -> Option<SentMessage> {
        self.sent.lock().unwrap().last().cloned()
    }
}

impl OtpSender for RecordingSender {
    async fn send(&self, recipient: &str, purpose: OtpPurpose, code: &str) -> AuthResult<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(AuthError::DispatchFailed("provider unavailable".to_string()));
        }

        self.sent.lock().unwrap().push(SentMessage {
            recipient: recipient.to_string(),
            purpose,
            code: code.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rate_counters_pruned_after_window() {
        let store = InMemoryOtpStore::new();
        let config = RateLimitConfig {
            max_requests: 1,
            window: Duration::from_millis(20),
        };

        assert!(!store.is_rate_limited("otp_rate:a", &config).await.unwrap());
        assert!(store.is_rate_limited("otp_rate:a", &config).await.unwrap());

        tokio::time::sleep(Duration::from_millis(40)).await;

        // The expired counter is dropped, not just reset
        assert!(!store.is_rate_limited("otp_rate:b", &config).await.unwrap());
        let counters = store.counters.lock().unwrap();
        assert_eq!(counters.len(), 1);
        assert!(counters.contains_key("otp_rate:b"));
    }
}
