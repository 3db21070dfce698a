//! Order submission.

use std::sync::Arc;

use jiff::Timestamp;
use tracing::{info, warn};

use storefront::{
    orders::placeholder_order_ref,
    prelude::{Checkout, PaymentHandoff},
};

use crate::{
    checkout::SubmitError,
    domain::{carts::CartsService, orders::OrdersService},
};

/// Runs `create order -> clear cart -> hand off to payment` for a checkout.
pub struct OrderSequencer {
    orders: Arc<dyn OrdersService>,
    carts: Arc<dyn CartsService>,
}

impl std::fmt::Debug for OrderSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderSequencer").finish_non_exhaustive()
    }
}

impl OrderSequencer {
    #[must_use]
    pub fn new(orders: Arc<dyn OrdersService>, carts: Arc<dyn CartsService>) -> Self {
        Self { orders, carts }
    }

    /// Submit a checkout built from the cart, then clear the remote cart.
    ///
    /// A failed cart clear is logged and does not fail the submission.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Checkout`]: no address, or a submission already started.
    /// - [`SubmitError::Rejected`]: the backend refused the order; the
    ///   checkout returns to address selection with the message recorded.
    pub async fn submit(&self, checkout: &mut Checkout) -> Result<PaymentHandoff, SubmitError> {
        self.run(checkout, true).await
    }

    /// Submit a checkout that did not come from the cart (buy-now); the cart is left alone.
    ///
    /// # Errors
    ///
    /// See [`Self::submit`].
    pub async fn submit_direct(&self, checkout: &mut Checkout) -> Result<PaymentHandoff, SubmitError> {
        self.run(checkout, false).await
    }

    async fn run(&self, checkout: &mut Checkout, clear_cart: bool) -> Result<PaymentHandoff, SubmitError> {
        let order_ref = placeholder_order_ref(Timestamp::now().as_millisecond());
        let request = checkout.begin_submission(order_ref)?;

        let order = match self.orders.create_order(&request).await {
            Ok(order) => order,
            Err(error) => {
                checkout.submission_failed(error.user_message())?;

                return Err(SubmitError::Rejected(error));
            }
        };

        info!(order_id = %order.id, total = %order.total_amount, "order placed");

        checkout.order_created(order)?;

        let cleared = if clear_cart {
            match self.carts.clear_cart().await {
                Ok(()) => true,
                Err(error) => {
                    warn!(%error, "order placed but cart could not be cleared");

                    false
                }
            }
        } else {
            false
        };

        Ok(checkout.cart_clear_finished(cleared)?)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use rusty_money::{Money, iso};
    use storefront::prelude::{
        AddressId, Cart, CartLine, CartLineId, CheckoutError, CheckoutState, CreatedOrder,
        OrderDraft, OrderId, PaymentStatus, ProductId, ProductRef,
    };
    use testresult::TestResult;

    use crate::{
        api::ApiError,
        domain::{carts::MockCartsService, orders::MockOrdersService},
    };

    use super::*;

    fn checkout() -> Result<Checkout, Box<dyn std::error::Error>> {
        let line = CartLine::new(
            CartLineId::new("l1"),
            ProductRef {
                id: ProductId::new("p1"),
                name: "Kettle".to_string(),
                image: None,
            },
            Money::from_major(1000, iso::INR),
            2,
        )?;

        let draft = OrderDraft::from_cart(
            &Cart::with_lines([line], iso::INR)?,
            Money::from_major(280, iso::INR),
        )?;

        Ok(Checkout::new(draft))
    }

    fn created() -> CreatedOrder {
        CreatedOrder {
            id: OrderId::new("66f0"),
            total_amount: Money::from_major(2279, iso::INR),
            payment_status: PaymentStatus::Pending,
        }
    }

    fn sequencer(orders: MockOrdersService, carts: MockCartsService) -> OrderSequencer {
        OrderSequencer::new(Arc::new(orders), Arc::new(carts))
    }

    #[tokio::test]
    async fn missing_address_sends_nothing() -> TestResult {
        let mut orders = MockOrdersService::new();
        let mut carts = MockCartsService::new();

        orders.expect_create_order().never();
        carts.expect_clear_cart().never();

        let mut checkout = checkout()?;
        let result = sequencer(orders, carts).submit(&mut checkout).await;

        assert!(matches!(
            result,
            Err(SubmitError::Checkout(CheckoutError::AddressMissing))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn handoff_carries_backend_order() -> TestResult {
        let mut orders = MockOrdersService::new();
        let mut carts = MockCartsService::new();

        orders
            .expect_create_order()
            .withf(|request| {
                request.order_ref.starts_with("ORD-")
                    && request.payment_id == "COD-0001"
                    && request.delivery_address.as_str() == "a1"
            })
            .once()
            .returning(|_| Ok(created()));
        carts.expect_clear_cart().once().returning(|| Ok(()));

        let mut checkout = checkout()?;

        checkout.select_address(AddressId::new("a1"))?;

        let handoff = sequencer(orders, carts).submit(&mut checkout).await?;

        // The backend's total wins over the locally computed 2280.
        assert_eq!(handoff.order, created());
        assert!(handoff.cart_cleared);
        assert!(matches!(checkout.state(), CheckoutState::AwaitingPayment(_)));

        Ok(())
    }

    #[tokio::test]
    async fn failed_cart_clear_still_hands_off() -> TestResult {
        let mut orders = MockOrdersService::new();
        let mut carts = MockCartsService::new();

        orders.expect_create_order().once().returning(|_| Ok(created()));
        carts
            .expect_clear_cart()
            .once()
            .returning(|| Err(ApiError::UnexpectedResponse("boom".to_string())));

        let mut checkout = checkout()?;

        checkout.select_address(AddressId::new("a1"))?;

        let handoff = sequencer(orders, carts).submit(&mut checkout).await?;

        assert!(!handoff.cart_cleared);
        assert_eq!(handoff.order.id.as_str(), "66f0");

        Ok(())
    }

    #[tokio::test]
    async fn rejection_returns_to_address_selection() -> TestResult {
        let mut orders = MockOrdersService::new();
        let mut carts = MockCartsService::new();

        orders.expect_create_order().once().returning(|_| {
            Err(ApiError::Rejected {
                status: StatusCode::BAD_REQUEST,
                message: "Address not found".to_string(),
            })
        });
        carts.expect_clear_cart().never();

        let mut checkout = checkout()?;

        checkout.select_address(AddressId::new("a1"))?;

        let result = sequencer(orders, carts).submit(&mut checkout).await;

        assert!(matches!(result, Err(SubmitError::Rejected(_))));
        assert_eq!(
            checkout.state(),
            &CheckoutState::AddressRequired {
                last_error: Some("Address not found".to_string())
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn direct_submission_keeps_cart() -> TestResult {
        let mut orders = MockOrdersService::new();
        let mut carts = MockCartsService::new();

        orders.expect_create_order().once().returning(|_| Ok(created()));
        carts.expect_clear_cart().never();

        let mut checkout = checkout()?;

        checkout.select_address(AddressId::new("a1"))?;

        let handoff = sequencer(orders, carts).submit_direct(&mut checkout).await?;

        assert!(!handoff.cart_cleared);

        Ok(())
    }

    #[tokio::test]
    async fn placed_checkout_cannot_submit_again() -> TestResult {
        let mut orders = MockOrdersService::new();
        let mut carts = MockCartsService::new();

        orders.expect_create_order().once().returning(|_| Ok(created()));
        carts.expect_clear_cart().once().returning(|| Ok(()));

        let mut checkout = checkout()?;

        checkout.select_address(AddressId::new("a1"))?;

        let sequencer = sequencer(orders, carts);

        sequencer.submit(&mut checkout).await?;

        let again = sequencer.submit(&mut checkout).await;

        assert!(matches!(
            again,
            Err(SubmitError::Checkout(CheckoutError::AlreadyPlaced))
        ));

        Ok(())
    }
}
