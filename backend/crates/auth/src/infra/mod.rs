//! Infrastructure Layer
//!
//! Concrete implementations of the domain traits: Postgres for users,
//! Redis for ephemeral state, HTTP providers for OTP dispatch, and
//! in-memory doubles.

pub mod memory;
pub mod notify;
pub mod postgres;
pub mod redis;
