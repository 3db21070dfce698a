//! Payments service.

use async_trait::async_trait;
use mockall::automock;
use rusty_money::iso::Currency;

use storefront::prelude::OrderId;

use crate::{
    api::{ApiClient, ApiError, Endpoint},
    domain::payments::{
        models::{PaymentIntent, PaymentRecord},
        records::{CreateIntentBody, IntentRecord, PaymentsEnvelope, ReceiptRecord},
    },
};

#[derive(Debug, Clone)]
pub struct HttpPaymentsService {
    api: ApiClient,
    currency: &'static Currency,
}

impl HttpPaymentsService {
    #[must_use]
    pub fn new(api: ApiClient, currency: &'static Currency) -> Self {
        Self { api, currency }
    }
}

#[async_trait]
impl PaymentsService for HttpPaymentsService {
    #[tracing::instrument(skip(self), err)]
    async fn create_intent(&self, order: &OrderId, amount_minor: i64) -> Result<PaymentIntent, ApiError> {
        let record: IntentRecord = self
            .api
            .call_with(
                &Endpoint::CreatePaymentIntent,
                &CreateIntentBody {
                    order_id: order,
                    amount: amount_minor,
                },
            )
            .await?
            .body()?;

        Ok(record.into())
    }

    async fn receipt_url(&self, order: &OrderId) -> Result<Option<String>, ApiError> {
        let record: Option<ReceiptRecord> = self
            .api
            .call(&Endpoint::PaymentReceipt(order.clone()))
            .await?
            .data()?;

        Ok(record.and_then(|record| record.receipt_url))
    }

    async fn payment_history(&self) -> Result<Vec<PaymentRecord>, ApiError> {
        let envelope: PaymentsEnvelope = self.api.call(&Endpoint::PaymentHistory).await?.body()?;

        envelope
            .payments
            .into_iter()
            .map(|record| record.into_record(self.currency).map_err(ApiError::from))
            .collect()
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Create a payment intent for `amount_minor` (minor units) against an order.
    async fn create_intent(&self, order: &OrderId, amount_minor: i64) -> Result<PaymentIntent, ApiError>;

    /// The receipt URL for an order, once the provider has issued one.
    async fn receipt_url(&self, order: &OrderId) -> Result<Option<String>, ApiError>;

    /// Payments made by the user.
    async fn payment_history(&self) -> Result<Vec<PaymentRecord>, ApiError>;
}
