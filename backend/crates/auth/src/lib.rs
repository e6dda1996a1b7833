//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database/store/provider implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Registration via mobile OTP (WhatsApp), three-step state machine
//! - Login via email/password or mobile OTP
//! - Email re-verification via email OTP
//! - JWT access/refresh token pair with server-side refresh revocation
//! - Address management on the user aggregate
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional application pepper
//! - Separate access/refresh signing secrets; refresh validity is
//!   cross-checked against the ephemeral store (single active session)
//! - OTP codes are single use with TTL expiry and atomic rate limiting
//! - Uniform invalid-credentials response to prevent user enumeration

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::notify::{EmailSender, WhatsAppSender};
pub use infra::postgres::PgUserRepository;
pub use infra::redis::RedisOtpStore;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::user::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
