//! Payment Records

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};

use storefront::{
    money::{amount_from_decimal, parse_currency},
    prelude::{AmountError, OrderId, PaymentStatus},
};

use crate::domain::payments::models::{PaymentIntent, PaymentRecord};

#[derive(Debug, Serialize)]
pub(crate) struct CreateIntentBody<'a> {
    #[serde(rename = "orderId")]
    pub order_id: &'a OrderId,

    /// Minor units
    pub amount: i64,
}

#[derive(Deserialize)]
pub(crate) struct IntentRecord {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,

    #[serde(rename = "paymentIntentId")]
    pub intent_id: String,
}

impl From<IntentRecord> for PaymentIntent {
    fn from(record: IntentRecord) -> Self {
        Self {
            client_secret: record.client_secret,
            intent_id: record.intent_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReceiptRecord {
    #[serde(default)]
    pub receipt_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaymentsEnvelope {
    #[serde(default)]
    pub payments: Vec<PaymentHistoryRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaymentHistoryRecord {
    #[serde(rename = "orderId")]
    pub order_ref: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub receipt_url: Option<String>,
}

impl PaymentHistoryRecord {
    /// Falls back to `currency` when the record carries none.
    pub(crate) fn into_record(self, currency: &'static Currency) -> Result<PaymentRecord, AmountError> {
        let currency = match self.currency.as_deref() {
            Some(code) => parse_currency(code)?,
            None => currency,
        };

        let Ok(status) = self
            .status
            .as_deref()
            .unwrap_or("pending")
            .parse::<PaymentStatus>();

        Ok(PaymentRecord {
            order_ref: self.order_ref,
            amount: amount_from_decimal(self.amount, currency)?,
            status,
            receipt_url: self.receipt_url,
        })
    }
}
