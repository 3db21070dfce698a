//! Payment Models

use std::fmt;

use storefront::prelude::{Amount, PaymentStatus};

/// A payment intent issued by the backend for one order.
#[derive(Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    /// Secret handed to the payment provider to confirm the intent.
    pub client_secret: String,

    /// Provider-side intent id, recorded on the order once paid.
    pub intent_id: String,
}

impl fmt::Debug for PaymentIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentIntent")
            .field("client_secret", &"**redacted**")
            .field("intent_id", &self.intent_id)
            .finish()
    }
}

/// An entry in the payment history.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRecord {
    pub order_ref: String,
    pub amount: Amount,
    pub status: PaymentStatus,
    pub receipt_url: Option<String>,
}
