//! User Entity
//!
//! Storefront account aggregate: credentials, verification flags and
//! the embedded address list.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::{
    AddressId, UserId, email::Email, phone_number::PhoneNumber, user_role::UserRole,
};

/// Delivery address, embedded in the user document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub address_id: AddressId,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub is_default: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Partial update applied to an existing address
#[derive(Debug, Clone, Default)]
pub struct AddressPatch {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub is_default: Option<bool>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// User entity
///
/// Lifecycle: created at registration completion, mutated by login
/// (last_login_at, refresh_token), verification flows (flags) and
/// address upserts. Never hard-deleted; soft-disable via `is_active`.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique, normalized
    pub phone_number: PhoneNumber,
    /// Unique, lowercased
    pub email: Email,
    pub name: Option<String>,
    /// Absent for OTP-only accounts
    pub password: Option<HashedPassword>,
    pub is_phone_verified: bool,
    pub is_email_verified: bool,
    pub role: UserRole,
    /// Invariant: at most one address has `is_default = true`
    pub addresses: Vec<Address>,
    /// Informational copy; validity authority is the ephemeral store
    pub refresh_token: Option<String>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a user at registration completion (phone already verified)
    pub fn register(phone_number: PhoneNumber, email: Email, name: Option<String>) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            phone_number,
            email,
            name,
            password: None,
            is_phone_verified: true,
            is_email_verified: false,
            role: UserRole::default(),
            addresses: Vec::new(),
            refresh_token: None,
            last_login_at: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record successful login
    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// Check if user can login
    pub fn can_login(&self) -> bool {
        self.is_active
    }

    /// Mark the email address as verified
    pub fn mark_email_verified(&mut self) {
        self.is_email_verified = true;
        self.updated_at = Utc::now();
    }

    /// Store the informational refresh-token copy
    pub fn set_refresh_token(&mut self, token: Option<String>) {
        self.refresh_token = token;
        self.updated_at = Utc::now();
    }

    /// Set a password hash (email/password account)
    pub fn set_password(&mut self, password: HashedPassword) {
        self.password = Some(password);
        self.updated_at = Utc::now();
    }

    /// The current default address, if any
    pub fn default_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.is_default)
    }

    /// Append a new address.
    ///
    /// The first address is always forced default. A later address
    /// requesting default demotes every existing one first.
    pub fn add_address(&mut self, mut address: Address) {
        if self.addresses.is_empty() {
            address.is_default = true;
        } else if address.is_default {
            self.clear_defaults();
        }

        self.addresses.push(address);
        self.updated_at = Utc::now();
    }

    /// Merge a partial update onto an existing address.
    ///
    /// Returns `false` if no address matches `address_id`. Promoting an
    /// address to default demotes all others first.
    pub fn update_address(&mut self, address_id: &AddressId, patch: AddressPatch) -> bool {
        let Some(index) = self
            .addresses
            .iter()
            .position(|a| a.address_id == *address_id)
        else {
            return false;
        };

        if patch.is_default == Some(true) {
            self.clear_defaults();
        }

        let address = &mut self.addresses[index];
        if let Some(street) = patch.street {
            address.street = street;
        }
        if let Some(city) = patch.city {
            address.city = city;
        }
        if let Some(state) = patch.state {
            address.state = state;
        }
        if let Some(postal_code) = patch.postal_code {
            address.postal_code = postal_code;
        }
        if let Some(country) = patch.country {
            address.country = country;
        }
        if let Some(is_default) = patch.is_default {
            address.is_default = is_default;
        }
        if let Some(latitude) = patch.latitude {
            address.latitude = Some(latitude);
        }
        if let Some(longitude) = patch.longitude {
            address.longitude = Some(longitude);
        }

        self.updated_at = Utc::now();
        true
    }

    fn clear_defaults(&mut self) {
        for address in &mut self.addresses {
            address.is_default = false;
        }
    }
}
