//! Card payment step.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tracing::{error, info};

use storefront::prelude::{CreatedOrder, Handoff, NoOrderData, OrderId, Route, display_amount};

use crate::{
    checkout::{PaymentError, PaymentProvider, ReceiptPoller, ReceiptStatus},
    domain::{
        orders::OrdersService,
        payments::{PaymentsService, models::PaymentIntent},
    },
    retry::Cancellation,
};

/// An order with a payment intent ready for the provider.
#[derive(Debug, Clone)]
pub struct PreparedPayment {
    order: CreatedOrder,
    intent: PaymentIntent,
}

impl PreparedPayment {
    #[must_use]
    pub fn order(&self) -> &CreatedOrder {
        &self.order
    }

    #[must_use]
    pub fn intent(&self) -> &PaymentIntent {
        &self.intent
    }

    /// The amount to show, exactly as the backend stored it on the order.
    #[must_use]
    pub fn display_amount(&self) -> String {
        display_amount(&self.order.total_amount)
    }
}

/// A completed payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOutcome {
    pub order_id: OrderId,
    pub payment_id: String,
    pub receipt: ReceiptStatus,
}

impl PaymentOutcome {
    /// State handed to the confirmation screen.
    #[must_use]
    pub fn handoff(&self) -> Handoff {
        Handoff::OrderSuccess(self.order_id.clone())
    }
}

/// Takes a created order through intent creation, provider confirmation,
/// marking the order paid and fetching the receipt.
pub struct PaymentStep {
    payments: Arc<dyn PaymentsService>,
    orders: Arc<dyn OrdersService>,
    receipts: ReceiptPoller,
    in_flight: AtomicBool,
}

impl std::fmt::Debug for PaymentStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentStep")
            .field("receipts", &self.receipts)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl PaymentStep {
    #[must_use]
    pub fn new(
        payments: Arc<dyn PaymentsService>,
        orders: Arc<dyn OrdersService>,
        receipts: ReceiptPoller,
    ) -> Self {
        Self {
            payments,
            orders,
            receipts,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Request a payment intent for the order handed over from checkout.
    ///
    /// The amount charged is the order's backend total in minor units.
    ///
    /// # Errors
    ///
    /// - [`PaymentError::NoOrderData`]: nothing was handed over, e.g. after a reload.
    /// - [`PaymentError::Intent`]: the backend did not issue an intent.
    pub async fn prepare(&self, order: Option<&CreatedOrder>) -> Result<PreparedPayment, PaymentError> {
        let order = order
            .ok_or(NoOrderData {
                fallback: Route::Home,
            })?
            .clone();

        let intent = self
            .payments
            .create_intent(&order.id, order.total_amount.to_minor_units())
            .await
            .map_err(PaymentError::Intent)?;

        Ok(PreparedPayment { order, intent })
    }

    /// Confirm the payment with the provider and reconcile the order.
    ///
    /// Nothing is retried except the receipt lookup; a missing receipt does
    /// not fail the payment.
    ///
    /// # Errors
    ///
    /// - [`PaymentError::InFlight`]: a confirmation is already running.
    /// - [`PaymentError::Provider`]: the provider declined, with its message.
    /// - [`PaymentError::Incomplete`]: the provider reported another status.
    /// - [`PaymentError::ReconcileFailed`]: charged, but the order was not updated.
    pub async fn confirm(
        &self,
        prepared: &PreparedPayment,
        provider: &dyn PaymentProvider,
        cancellation: Cancellation,
    ) -> Result<PaymentOutcome, PaymentError> {
        let _in_flight = InFlight::acquire(&self.in_flight).ok_or(PaymentError::InFlight)?;

        let confirmation = provider
            .confirm_card_payment(&prepared.intent)
            .await
            .map_err(|error| PaymentError::Provider(error.message))?;

        if !confirmation.succeeded() {
            return Err(PaymentError::Incomplete(confirmation.status));
        }

        let order_id = prepared.order.id.clone();

        if let Err(source) = self.orders.mark_paid(&order_id, &confirmation.intent_id).await {
            error!(%order_id, payment_id = %confirmation.intent_id, error = %source, "payment succeeded but order update failed");

            return Err(PaymentError::ReconcileFailed {
                payment_id: confirmation.intent_id,
                source,
            });
        }

        info!(%order_id, payment_id = %confirmation.intent_id, "payment confirmed");

        let receipt = self.receipts.poll(&order_id, cancellation).await;

        Ok(PaymentOutcome {
            order_id,
            payment_id: confirmation.intent_id,
            receipt,
        })
    }
}
