//! Addresses service.

use async_trait::async_trait;
use mockall::automock;

use storefront::prelude::Address;

use crate::{
    api::{ApiClient, ApiError, Endpoint},
    domain::addresses::{models::NewAddress, records::AddressRecord},
};

#[derive(Debug, Clone)]
pub struct HttpAddressesService {
    api: ApiClient,
}

impl HttpAddressesService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AddressesService for HttpAddressesService {
    async fn list_addresses(&self) -> Result<Vec<Address>, ApiError> {
        let records: Option<Vec<AddressRecord>> =
            self.api.call(&Endpoint::GetAddresses).await?.data()?;

        Ok(records
            .unwrap_or_default()
            .into_iter()
            .map(Address::from)
            .collect())
    }

    async fn create_address(&self, address: &NewAddress) -> Result<(), ApiError> {
        self.api.call_with(&Endpoint::CreateAddress, address).await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AddressesService: Send + Sync {
    /// Saved addresses, oldest first.
    async fn list_addresses(&self) -> Result<Vec<Address>, ApiError>;

    /// Save a new address.
    async fn create_address(&self, address: &NewAddress) -> Result<(), ApiError>;
}
