//! Checkout orchestration
//!
//! Drives the synchronous checkout domain against the backend services:
//! cart edits, coupons, order submission, buy-now and card payment.

mod buy_now;
mod cart_view;
mod coupon;
mod errors;
mod payment;
mod provider;
mod receipt;
mod sequencer;

pub use buy_now::buy_now;
pub use cart_view::{CartView, QuantityChange};
pub use coupon::apply_coupon;
pub use errors::*;
pub use payment::{PaymentOutcome, PaymentStep, PreparedPayment};
pub use provider::{
    ExternalConfirmation, MockPaymentProvider, PaymentProvider, ProviderConfirmation,
    ProviderError,
};
pub use receipt::{ReceiptPoller, ReceiptStatus};
pub use sequencer::OrderSequencer;
