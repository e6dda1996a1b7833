//! Address Use Case
//!
//! Add-or-update on the user's embedded address list. The edit path is
//! a partial merge; the add path requires the full address shape.

use std::sync::Arc;

use crate::domain::entity::user::{Address, AddressPatch};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{AddressId, UserId};
use crate::error::{AuthError, AuthResult};

/// Address add-or-update input
///
/// `address_id` present selects the edit path (all fields optional);
/// absent selects the add path (street/city/state/postal/country
/// required).
#[derive(Debug, Clone, Default)]
pub struct AddressInput {
    pub address_id: Option<AddressId>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub is_default: Option<bool>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Address management use case
pub struct AddressUseCase<R>
where
    R: UserRepository,
{
    users: Arc<R>,
}

impl<R> AddressUseCase<R>
where
    R: UserRepository,
{
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }

    /// Add or update an address; returns the full updated list
    pub async fn add_or_update(
        &self,
        user_id: &UserId,
        input: AddressInput,
    ) -> AuthResult<Vec<Address>> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        match input.address_id {
            Some(address_id) => {
                let patch = AddressPatch {
                    street: input.street,
                    city: input.city,
                    state: input.state,
                    postal_code: input.postal_code,
                    country: input.country,
                    is_default: input.is_default,
                    latitude: input.latitude,
                    longitude: input.longitude,
                };

                if !user.update_address(&address_id, patch) {
                    return Err(AuthError::AddressNotFound);
                }
            }
            None => {
                let address = Address {
                    address_id: AddressId::new(),
                    street: required(input.street, "street")?,
                    city: required(input.city, "city")?,
                    state: required(input.state, "state")?,
                    postal_code: required(input.postal_code, "postalCode")?,
                    country: required(input.country, "country")?,
                    is_default: input.is_default.unwrap_or(false),
                    latitude: input.latitude,
                    longitude: input.longitude,
                };

                user.add_address(address);
            }
        }

        self.users.update(&user).await?;

        tracing::debug!(user_id = %user.user_id, count = user.addresses.len(), "Address list updated");

        Ok(user.addresses)
    }
}

fn required(field: Option<String>, name: &str) -> AuthResult<String> {
    field
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AuthError::Validation(format!("{} is required", name)))
}
