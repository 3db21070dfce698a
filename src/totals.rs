//! Order totals
//!
//! Totals are always derived from the current lines. Nothing here caches a
//! previous result, so a quantity edit is reflected by the next call.

use rusty_money::MoneyError;
use thiserror::Error;

use crate::{
    cart::CartLine,
    money::{Amount, zero},
    pricing::{TotalPriceError, items_total},
};

/// Errors raised while deriving order totals.
#[derive(Debug, Error, PartialEq)]
pub enum TotalsError {
    /// There are no lines to check out.
    #[error("no order data")]
    NoOrderData,

    /// Delivery fee or discount below zero.
    #[error("{0} cannot be negative")]
    Negative(&'static str),

    /// Items total could not be computed.
    #[error(transparent)]
    Items(TotalPriceError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

impl From<TotalPriceError> for TotalsError {
    fn from(error: TotalPriceError) -> Self {
        match error {
            TotalPriceError::NoItems => Self::NoOrderData,
            other => Self::Items(other),
        }
    }
}

/// The `{items_total, discount, delivery_fee, grand_total}` tuple for an order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals {
    items_total: Amount,
    discount: Amount,
    delivery_fee: Amount,
    grand_total: Amount,
}

impl OrderTotals {
    /// Derive totals for the given lines.
    ///
    /// The discount is capped at the items total so the grand total never
    /// drops below the delivery fee.
    ///
    /// # Errors
    ///
    /// - [`TotalsError::NoOrderData`]: `lines` is empty.
    /// - [`TotalsError::Negative`]: the fee or discount is negative.
    /// - [`TotalsError::Money`]: the fee or discount is in another currency.
    pub fn compute(
        lines: &[CartLine],
        delivery_fee: Amount,
        discount: Option<Amount>,
    ) -> Result<Self, TotalsError> {
        let items_total = items_total(lines)?;
        let currency = items_total.currency();

        if delivery_fee.to_minor_units() < 0 {
            return Err(TotalsError::Negative("delivery fee"));
        }

        let requested = discount.unwrap_or_else(|| zero(currency));

        if requested.to_minor_units() < 0 {
            return Err(TotalsError::Negative("discount"));
        }

        // Surfaces a currency mismatch before clamping hides it.
        items_total.sub(requested)?;

        let discount = if requested.to_minor_units() > items_total.to_minor_units() {
            items_total
        } else {
            requested
        };

        let grand_total = items_total.add(delivery_fee)?.sub(discount)?;

        Ok(Self {
            items_total,
            discount,
            delivery_fee,
            grand_total,
        })
    }

    /// `sum(unit_price * quantity)`
    pub fn items_total(&self) -> Amount {
        self.items_total
    }

    /// Discount applied, after capping.
    pub fn discount(&self) -> Amount {
        self.discount
    }

    /// Delivery fee
    pub fn delivery_fee(&self) -> Amount {
        self.delivery_fee
    }

    /// `items_total + delivery_fee - discount`
    pub fn grand_total(&self) -> Amount {
        self.grand_total
    }
}
