//! Domain Layer
//!
//! Entities, value objects and the traits implemented by the
//! infrastructure layer.

pub mod repository;

pub mod entity {
    pub mod user;
}

pub mod value_object {
    pub mod email;
    pub mod otp_code;
    pub mod phone_number;
    pub mod user_role;

    /// Typed IDs come from the kernel crate
    pub use kernel::id::{AddressId, UserId};
}
