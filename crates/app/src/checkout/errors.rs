//! Checkout flow errors.

use thiserror::Error;

use storefront::prelude::{CartError, CheckoutError, CouponError, NoOrderData, TotalsError};

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum CartViewError {
    #[error("your cart is empty")]
    Empty,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Totals(TotalsError),
}

impl From<TotalsError> for CartViewError {
    fn from(error: TotalsError) -> Self {
        match error {
            TotalsError::NoOrderData => Self::Empty,
            other => Self::Totals(other),
        }
    }
}

#[derive(Debug, Error)]
pub enum CouponFlowError {
    /// Rejected locally; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] CouponError),

    /// Rejected by the backend, e.g. an unknown code.
    #[error(transparent)]
    Rejected(ApiError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Totals(#[from] TotalsError),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    /// Rejected locally: no address, already submitting or already placed.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// The backend refused to create the order.
    #[error(transparent)]
    Rejected(ApiError),
}

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error(transparent)]
    NoOrderData(#[from] NoOrderData),

    #[error("failed to initialize payment: {0}")]
    Intent(#[source] ApiError),

    #[error("payment already in progress")]
    InFlight,

    /// The provider's own message.
    #[error("{0}")]
    Provider(String),

    #[error("Payment status: {0}")]
    Incomplete(String),

    /// The charge went through but the order still says unpaid.
    #[error("Payment succeeded but order update failed. Please contact support.")]
    ReconcileFailed {
        payment_id: String,
        #[source]
        source: ApiError,
    },
}

#[derive(Debug, Error)]
pub enum ReceiptError {
    #[error("receipt polling cancelled")]
    Cancelled,

    #[error("no receipt after {attempts} attempts")]
    Exhausted {
        attempts: usize,
        #[source]
        last_error: Option<ApiError>,
    },

    #[error(transparent)]
    Api(ApiError),
}

#[derive(Debug, Error)]
pub enum BuyNowError {
    #[error("Please add delivery address")]
    NoAddress,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Totals(#[from] TotalsError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}
