//! Orders

use std::{fmt, str::FromStr};

use crate::{
    addresses::AddressId,
    cart::{CartLine, ProductId},
    coupons::CouponCode,
    ids::TypedId,
    money::Amount,
    totals::OrderTotals,
};

/// Order identifier.
pub type OrderId = TypedId<CreatedOrder>;

/// Payment id recorded on orders created before any payment is taken.
pub const UNPAID_PAYMENT_ID: &str = "COD-0001";

/// Placeholder order reference derived from the submission time.
///
/// It is not a de-duplication key: two submissions in the same millisecond
/// share a reference and still create two orders.
pub fn placeholder_order_ref(unix_millis: i64) -> String {
    format!("ORD-{unix_millis}")
}

/// Payment state of an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentStatus {
    /// Awaiting payment
    Pending,

    /// Paid in full
    Paid,

    /// Payment failed
    Failed,

    /// A status this client does not model.
    Other(String),
}

impl PaymentStatus {
    /// Wire representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Other(status) => status,
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "pending" => Self::Pending,
            "paid" | "succeeded" => Self::Paid,
            "failed" => Self::Failed,
            other => Self::Other(other.to_string()),
        })
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An order as persisted by the backend.
///
/// `total_amount` is the backend's figure; the payment step charges and shows
/// exactly this value.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedOrder {
    /// Backend order id
    pub id: OrderId,

    /// Amount to charge
    pub total_amount: Amount,

    /// Current payment status
    pub payment_status: PaymentStatus,
}

/// A single product line of an order request.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    /// Product id
    pub product: ProductId,

    /// Product name at time of ordering
    pub name: String,

    /// Product image at time of ordering
    pub image: Option<String>,

    /// Units ordered
    pub quantity: u32,

    /// Unit price at time of ordering
    pub unit_price: Amount,
}

impl From<&CartLine> for OrderItem {
    fn from(line: &CartLine) -> Self {
        Self {
            product: line.product().id.clone(),
            name: line.product().name.clone(),
            image: line.product().image.clone(),
            quantity: line.quantity(),
            unit_price: *line.unit_price(),
        }
    }
}

/// Everything the backend needs to create an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    /// Client-side placeholder reference, see [`placeholder_order_ref`].
    pub order_ref: String,

    /// Ordered products
    pub items: Vec<OrderItem>,

    /// Delivery address
    pub delivery_address: AddressId,

    /// Coupon applied, if any
    pub coupon: Option<CouponCode>,

    /// Totals at submission time
    pub totals: OrderTotals,

    /// Placeholder payment id
    pub payment_id: String,

    /// Initial payment status
    pub payment_status: PaymentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_ref_uses_millis() {
        assert_eq!(placeholder_order_ref(1_700_000_000_000), "ORD-1700000000000");
    }

    #[test]
    fn payment_status_parses_known_and_unknown() {
        assert_eq!("paid".parse::<PaymentStatus>(), Ok(PaymentStatus::Paid));
        assert_eq!("succeeded".parse::<PaymentStatus>(), Ok(PaymentStatus::Paid));
        assert_eq!(
            "refunded".parse::<PaymentStatus>(),
            Ok(PaymentStatus::Other("refunded".to_string()))
        );
        assert_eq!(PaymentStatus::Pending.to_string(), "pending");
    }
}
