//! Cart Records

use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};

use storefront::prelude::{Cart, CartLine, CartLineId, ProductId};

use crate::{
    api::ApiError,
    domain::{carts::models::CartSnapshot, products::records::ProductRecord},
};

/// Cart line as returned by `GET /api/cart/get`, with the product populated.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CartItemRecord {
    #[serde(rename = "_id")]
    pub id: String,

    pub quantity: u32,

    /// `null` once the product has been deleted.
    #[serde(rename = "productId")]
    pub product: Option<ProductRecord>,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewCartItemBody<'a> {
    #[serde(rename = "productId")]
    pub product_id: &'a ProductId,

    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuantityBody {
    pub quantity: u32,
}

pub(crate) fn into_snapshot(
    records: Vec<CartItemRecord>,
    currency: &'static Currency,
) -> Result<CartSnapshot, ApiError> {
    let mut lines = Vec::with_capacity(records.len());
    let mut unavailable = Vec::new();

    for record in records {
        let id = CartLineId::new(record.id);

        let Some(product) = record.product else {
            unavailable.push(id);
            continue;
        };

        let product = product.into_product(currency)?;

        lines.push(CartLine::new(id, product.to_ref(), product.price, record.quantity)?);
    }

    Ok(CartSnapshot {
        cart: Cart::with_lines(lines, currency)?,
        unavailable,
    })
}
