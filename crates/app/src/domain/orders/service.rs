//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use rusty_money::iso::Currency;
use tracing::info;

use storefront::prelude::{CreatedOrder, OrderId, OrderRequest, PaymentStatus};

use crate::{
    api::{ApiClient, ApiError, Endpoint},
    domain::orders::{
        models::OrderSummary,
        records::{CreateOrderBody, MarkPaidBody, OrderRecord},
    },
};

#[derive(Debug, Clone)]
pub struct HttpOrdersService {
    api: ApiClient,
    currency: &'static Currency,
}

impl HttpOrdersService {
    #[must_use]
    pub fn new(api: ApiClient, currency: &'static Currency) -> Self {
        Self { api, currency }
    }
}

#[async_trait]
impl OrdersService for HttpOrdersService {
    #[tracing::instrument(skip_all, fields(order_ref = %request.order_ref), err)]
    async fn create_order(&self, request: &OrderRequest) -> Result<CreatedOrder, ApiError> {
        let record: OrderRecord = self
            .api
            .call_with(&Endpoint::CreateOrder, &CreateOrderBody::from(request))
            .await?
            .data()?;

        let order = record.into_created(self.currency)?;

        info!(order_id = %order.id, "order created");

        Ok(order)
    }

    async fn list_orders(&self) -> Result<Vec<OrderSummary>, ApiError> {
        let records: Option<Vec<OrderRecord>> =
            self.api.call(&Endpoint::UserOrders).await?.data()?;

        records
            .unwrap_or_default()
            .into_iter()
            .map(|record| record.into_summary(self.currency).map_err(ApiError::from))
            .collect()
    }

    async fn get_order(&self, order: &OrderId) -> Result<OrderSummary, ApiError> {
        let record: OrderRecord = self
            .api
            .call(&Endpoint::GetOrder(order.clone()))
            .await?
            .data()?;

        Ok(record.into_summary(self.currency)?)
    }

    #[tracing::instrument(skip(self), err)]
    async fn mark_paid(&self, order: &OrderId, payment_id: &str) -> Result<(), ApiError> {
        self.api
            .call_with(
                &Endpoint::UpdateOrder(order.clone()),
                &MarkPaidBody {
                    payment_status: PaymentStatus::Paid.as_str(),
                    payment_id,
                },
            )
            .await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Create an order. Not idempotent: every call creates a new order.
    async fn create_order(&self, request: &OrderRequest) -> Result<CreatedOrder, ApiError>;

    /// The user's orders.
    async fn list_orders(&self) -> Result<Vec<OrderSummary>, ApiError>;

    /// One order by id.
    async fn get_order(&self, order: &OrderId) -> Result<OrderSummary, ApiError>;

    /// Record a successful payment against an order.
    async fn mark_paid(&self, order: &OrderId, payment_id: &str) -> Result<(), ApiError>;
}
