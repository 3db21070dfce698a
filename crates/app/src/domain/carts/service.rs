//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use rusty_money::iso::Currency;
use tracing::debug;

use storefront::prelude::{Cart, CartLineId, ProductId};

use crate::{
    api::{ApiClient, ApiError, Endpoint},
    domain::carts::{
        models::CartSnapshot,
        records::{CartItemRecord, NewCartItemBody, QuantityBody, into_snapshot},
    },
};

/// Backend message for a cart with no lines.
const EMPTY_CART_MESSAGE: &str = "cart item is empty";

#[derive(Debug, Clone)]
pub struct HttpCartsService {
    api: ApiClient,
    currency: &'static Currency,
}

impl HttpCartsService {
    #[must_use]
    pub fn new(api: ApiClient, currency: &'static Currency) -> Self {
        Self { api, currency }
    }
}

#[async_trait]
impl CartsService for HttpCartsService {
    async fn get_cart(&self) -> Result<CartSnapshot, ApiError> {
        let response = match self.api.call(&Endpoint::GetCart).await {
            Ok(response) => response,
            Err(ApiError::Rejected { message, .. }) if message == EMPTY_CART_MESSAGE => {
                debug!("remote cart is empty");

                return Ok(CartSnapshot {
                    cart: Cart::new(self.currency),
                    unavailable: Vec::new(),
                });
            }
            Err(error) => return Err(error),
        };

        let records: Option<Vec<CartItemRecord>> = response.data()?;

        into_snapshot(records.unwrap_or_default(), self.currency)
    }

    async fn add_item(&self, product: &ProductId, quantity: u32) -> Result<(), ApiError> {
        self.api
            .call_with(
                &Endpoint::AddCartItem,
                &NewCartItemBody {
                    product_id: product,
                    quantity,
                },
            )
            .await?;

        Ok(())
    }

    async fn update_quantity(&self, line: &CartLineId, quantity: u32) -> Result<(), ApiError> {
        self.api
            .call_with(&Endpoint::UpdateCartItem(line.clone()), &QuantityBody { quantity })
            .await?;

        Ok(())
    }

    async fn remove_item(&self, line: &CartLineId) -> Result<(), ApiError> {
        self.api.call(&Endpoint::DeleteCartItem(line.clone())).await?;

        Ok(())
    }

    async fn clear_cart(&self) -> Result<(), ApiError> {
        self.api.call(&Endpoint::ClearCart).await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Fetch the remote cart. An empty cart is not an error.
    async fn get_cart(&self) -> Result<CartSnapshot, ApiError>;

    /// Add `quantity` units of a product.
    async fn add_item(&self, product: &ProductId, quantity: u32) -> Result<(), ApiError>;

    /// Set a line's quantity.
    async fn update_quantity(&self, line: &CartLineId, quantity: u32) -> Result<(), ApiError>;

    /// Delete a line.
    async fn remove_item(&self, line: &CartLineId) -> Result<(), ApiError>;

    /// Delete every line.
    async fn clear_cart(&self) -> Result<(), ApiError>;
}
