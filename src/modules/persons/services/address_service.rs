use std::sync::Arc;

use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::persons::models::{Address, AddressInput};
use crate::modules::persons::repositories::AddressRepository;

/// Standalone address management
pub struct AddressService {
    address_repo: Arc<dyn AddressRepository>,
}

impl AddressService {
    pub fn new(address_repo: Arc<dyn AddressRepository>) -> Self {
        Self { address_repo }
    }

    /// Newest first
    pub async fn list_addresses(&self) -> Result<Vec<Address>> {
        let mut addresses = self.address_repo.list().await?;
        addresses.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(addresses)
    }

    pub async fn get_address(&self, id: i64) -> Result<Address> {
        self.address_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Address {}", id)))
    }

    pub async fn create_address(&self, input: AddressInput) -> Result<Address> {
        let created = self.address_repo.create(input.into_new_address()?).await?;
        info!(address_id = created.id, "Address created");
        Ok(created)
    }

    pub async fn update_address(&self, id: i64, input: AddressInput, partial: bool) -> Result<Address> {
        let mut address = self.get_address(id).await?;
        input.apply_to(&mut address, partial)?;

        let updated = self
            .address_repo
            .update(id, address)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Address {}", id)))?;

        info!(address_id = id, "Address updated");
        Ok(updated)
    }

    pub async fn delete_address(&self, id: i64) -> Result<()> {
        if !self.address_repo.delete(id).await? {
            return Err(AppError::not_found(format!("Address {}", id)));
        }

        info!(address_id = id, "Address deleted");
        Ok(())
    }
}
