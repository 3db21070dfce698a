//! Cart screen state.

use std::sync::Arc;

use tracing::debug;

use storefront::prelude::{Amount, Cart, CartError, CartLineId, OrderDraft};

use crate::{
    checkout::CartViewError,
    domain::carts::{CartsService, models::CartSnapshot},
};

/// Result of a quantity edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The backend accepted the new quantity.
    Updated(u32),

    /// Quantities below one are dropped without contacting the backend.
    Ignored,
}

/// The cart as shown to the user, kept in step with the backend.
///
/// Every edit goes to the backend first and is applied locally only once
/// accepted, so a rejected edit leaves the view unchanged.
pub struct CartView {
    carts: Arc<dyn CartsService>,
    snapshot: CartSnapshot,
}

impl std::fmt::Debug for CartView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartView")
            .field("snapshot", &self.snapshot)
            .finish_non_exhaustive()
    }
}

impl CartView {
    /// Fetch the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn load(carts: Arc<dyn CartsService>) -> Result<Self, CartViewError> {
        let snapshot = carts.get_cart().await?;

        Ok(Self { carts, snapshot })
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.snapshot.cart
    }

    /// Lines whose product no longer exists.
    #[must_use]
    pub fn unavailable(&self) -> &[CartLineId] {
        &self.snapshot.unavailable
    }

    /// Re-fetch the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails; the view is left as it was.
    pub async fn refresh(&mut self) -> Result<(), CartViewError> {
        self.snapshot = self.carts.get_cart().await?;

        Ok(())
    }

    /// Set a line's quantity.
    ///
    /// # Errors
    ///
    /// - [`CartError::QuantityTooLarge`]: `quantity` does not fit a line quantity.
    /// - [`CartError::UnknownLine`]: no such line in the cart.
    /// - [`CartViewError::Api`]: the backend rejected the update.
    pub async fn change_quantity(
        &mut self,
        line: &CartLineId,
        quantity: i64,
    ) -> Result<QuantityChange, CartViewError> {
        if quantity < 1 {
            debug!(%line, quantity, "ignoring quantity below one");

            return Ok(QuantityChange::Ignored);
        }

        let quantity =
            u32::try_from(quantity).map_err(|_overflow| CartError::QuantityTooLarge(quantity))?;

        if self.snapshot.cart.line(line).is_none() {
            return Err(CartError::UnknownLine(line.clone()).into());
        }

        self.carts.update_quantity(line, quantity).await?;
        self.snapshot.cart.set_quantity(line, quantity)?;

        Ok(QuantityChange::Updated(quantity))
    }

    /// Add one unit to a line.
    ///
    /// # Errors
    ///
    /// See [`Self::change_quantity`].
    pub async fn increment(&mut self, line: &CartLineId) -> Result<QuantityChange, CartViewError> {
        let current = self.quantity_of(line)?;

        self.change_quantity(line, current + 1).await
    }

    /// Remove one unit from a line; a line at one unit stays as it is.
    ///
    /// # Errors
    ///
    /// See [`Self::change_quantity`].
    pub async fn decrement(&mut self, line: &CartLineId) -> Result<QuantityChange, CartViewError> {
        let current = self.quantity_of(line)?;

        self.change_quantity(line, current - 1).await
    }

    /// Delete a line.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the delete.
    pub async fn remove(&mut self, line: &CartLineId) -> Result<(), CartViewError> {
        self.carts.remove_item(line).await?;

        self.snapshot.cart.remove(line);
        self.snapshot.unavailable.retain(|id| id != line);

        Ok(())
    }

    /// Build the checkout draft from the available lines.
    ///
    /// # Errors
    ///
    /// Returns [`CartViewError::Empty`] when nothing can be ordered.
    pub fn checkout(&self, delivery_fee: Amount) -> Result<OrderDraft, CartViewError> {
        Ok(OrderDraft::from_cart(&self.snapshot.cart, delivery_fee)?)
    }

    fn quantity_of(&self, line: &CartLineId) -> Result<i64, CartViewError> {
        self.snapshot
            .cart
            .line(line)
            .map(|line| i64::from(line.quantity()))
            .ok_or_else(|| CartError::UnknownLine(line.clone()).into())
    }
}
