//! Order Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};

use storefront::{
    money::{amount_from_decimal, amount_to_decimal},
    prelude::{
        AddressId, AmountError, CreatedOrder, OrderId, OrderItem, OrderRequest, PaymentStatus,
        ProductId,
    },
};

use crate::domain::orders::models::{OrderSummary, OrderedProduct};

#[derive(Debug, Serialize)]
pub(crate) struct CreateOrderBody<'a> {
    #[serde(rename = "orderId")]
    pub order_ref: &'a str,

    pub product_details: Vec<ProductDetailBody<'a>>,

    pub payment_id: &'a str,

    pub payment_status: &'a str,

    pub delivery_address: &'a AddressId,

    #[serde(rename = "subTotalAmt", with = "rust_decimal::serde::float")]
    pub sub_total: Decimal,

    #[serde(rename = "discountAmount", with = "rust_decimal::serde::float")]
    pub discount: Decimal,

    #[serde(rename = "deliveryFee", with = "rust_decimal::serde::float")]
    pub delivery_fee: Decimal,

    #[serde(rename = "totalAmt", with = "rust_decimal::serde::float")]
    pub total: Decimal,

    #[serde(rename = "couponCode", skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<&'a str>,

    pub invoice_receipt: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProductDetailBody<'a> {
    #[serde(rename = "productId")]
    pub product_id: &'a ProductId,

    pub name: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<&'a str>,

    pub quantity: u32,

    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl<'a> From<&'a OrderItem> for ProductDetailBody<'a> {
    fn from(item: &'a OrderItem) -> Self {
        Self {
            product_id: &item.product,
            name: &item.name,
            image: item.image.as_deref(),
            quantity: item.quantity,
            price: amount_to_decimal(&item.unit_price),
        }
    }
}

impl<'a> From<&'a OrderRequest> for CreateOrderBody<'a> {
    fn from(request: &'a OrderRequest) -> Self {
        Self {
            order_ref: &request.order_ref,
            product_details: request.items.iter().map(ProductDetailBody::from).collect(),
            payment_id: &request.payment_id,
            payment_status: request.payment_status.as_str(),
            delivery_address: &request.delivery_address,
            sub_total: amount_to_decimal(&request.totals.items_total()),
            discount: amount_to_decimal(&request.totals.discount()),
            delivery_fee: amount_to_decimal(&request.totals.delivery_fee()),
            total: amount_to_decimal(&request.totals.grand_total()),
            coupon_code: request.coupon.as_ref().map(|code| code.as_str()),
            invoice_receipt: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct MarkPaidBody<'a> {
    pub payment_status: &'a str,
    pub payment_id: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OrderRecord {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "orderId", default)]
    pub order_ref: Option<String>,

    #[serde(rename = "totalAmt", with = "rust_decimal::serde::float")]
    pub total: Decimal,

    #[serde(default)]
    pub payment_status: Option<String>,

    #[serde(default)]
    pub delivery_status: Option<String>,

    #[serde(rename = "createdAt", default)]
    pub created_at: Option<Timestamp>,

    #[serde(default)]
    pub product_details: Vec<OrderedProductRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OrderedProductRecord {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub quantity: u32,
}

impl OrderRecord {
    fn payment_status(&self) -> PaymentStatus {
        let Ok(status) = self
            .payment_status
            .as_deref()
            .unwrap_or("pending")
            .parse::<PaymentStatus>();

        status
    }

    pub(crate) fn into_created(self, currency: &'static Currency) -> Result<CreatedOrder, AmountError> {
        Ok(CreatedOrder {
            total_amount: amount_from_decimal(self.total, currency)?,
            payment_status: self.payment_status(),
            id: OrderId::new(self.id),
        })
    }

    pub(crate) fn into_summary(self, currency: &'static Currency) -> Result<OrderSummary, AmountError> {
        Ok(OrderSummary {
            total_amount: amount_from_decimal(self.total, currency)?,
            payment_status: self.payment_status(),
            id: OrderId::new(self.id),
            order_ref: self.order_ref,
            delivery_status: self.delivery_status,
            created_at: self.created_at,
            items: self
                .product_details
                .into_iter()
                .map(|item| OrderedProduct {
                    name: item.name,
                    quantity: item.quantity,
                })
                .collect(),
        })
    }
}
