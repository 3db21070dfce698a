//! Product Records

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};

use storefront::{money::amount_from_decimal, prelude::AmountError};

use crate::domain::products::models::{Category, Product};

/// Product as serialised by the backend, e.g. a cart line's populated `productId`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProductRecord {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub image: Vec<String>,

    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl ProductRecord {
    pub(crate) fn into_product(self, currency: &'static Currency) -> Result<Product, AmountError> {
        Ok(Product {
            price: amount_from_decimal(self.price, currency)?,
            id: self.id.into(),
            name: self.name,
            images: self.image,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CategoryRecord {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub image: Option<String>,
}

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        Self {
            id: record.id.into(),
            name: record.name,
            image: record.image.filter(|image| !image.is_empty()),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CategorySearchBody<'a> {
    pub name: &'a str,
}
