//! Order Models

use jiff::Timestamp;

use storefront::prelude::{Amount, CreatedOrder, OrderId, PaymentStatus};

/// An order from the user's history.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub id: OrderId,

    /// Reference assigned at submission, e.g. `ORD-1700000000000`.
    pub order_ref: Option<String>,

    pub total_amount: Amount,
    pub payment_status: PaymentStatus,
    pub delivery_status: Option<String>,
    pub created_at: Option<Timestamp>,
    pub items: Vec<OrderedProduct>,
}

impl OrderSummary {
    /// The order as the payment step expects it.
    #[must_use]
    pub fn to_created(&self) -> CreatedOrder {
        CreatedOrder {
            id: self.id.clone(),
            total_amount: self.total_amount,
            payment_status: self.payment_status.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedProduct {
    pub name: String,
    pub quantity: u32,
}
