//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - One-time-password code generation
//! - Password hashing (Argon2id) with memory zeroization
//! - Cookie management
//! - Rate limiting infrastructure

pub mod cookie;
pub mod otp;
pub mod password;
pub mod rate_limit;
