//! Products service.

use async_trait::async_trait;
use mockall::automock;
use rusty_money::iso::Currency;

use storefront::prelude::ProductId;

use crate::{
    api::{ApiClient, ApiError, Endpoint},
    domain::products::{
        models::{Category, CategoryId, Product},
        records::{CategoryRecord, CategorySearchBody, ProductRecord},
    },
};

#[derive(Debug, Clone)]
pub struct HttpProductsService {
    api: ApiClient,
    currency: &'static Currency,
}

impl HttpProductsService {
    #[must_use]
    pub fn new(api: ApiClient, currency: &'static Currency) -> Self {
        Self { api, currency }
    }
}

#[async_trait]
impl ProductsService for HttpProductsService {
    async fn list_products(&self, category: Option<CategoryId>) -> Result<Vec<Product>, ApiError> {
        let records: Option<Vec<ProductRecord>> = self
            .api
            .call(&Endpoint::ListProducts(category))
            .await?
            .data()?;

        records
            .unwrap_or_default()
            .into_iter()
            .map(|record| record.into_product(self.currency).map_err(ApiError::from))
            .collect()
    }

    async fn get_product(&self, product: &ProductId) -> Result<Product, ApiError> {
        let record: ProductRecord = self
            .api
            .call(&Endpoint::GetProduct(product.clone()))
            .await?
            .data()?;

        Ok(record.into_product(self.currency)?)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let records: Option<Vec<CategoryRecord>> =
            self.api.call(&Endpoint::ListCategories).await?.data()?;

        Ok(records
            .unwrap_or_default()
            .into_iter()
            .map(Category::from)
            .collect())
    }

    async fn find_category(&self, name: &str) -> Result<Category, ApiError> {
        let record: Option<CategoryRecord> = self
            .api
            .call_with(&Endpoint::SearchCategory, &CategorySearchBody { name })
            .await?
            .data()?;

        record
            .map(Category::from)
            .ok_or_else(|| ApiError::UnexpectedResponse(format!("no category named {name}")))
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// List products, optionally only those in `category`.
    async fn list_products(&self, category: Option<CategoryId>) -> Result<Vec<Product>, ApiError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: &ProductId) -> Result<Product, ApiError>;

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError>;

    /// Look a category up by its display name.
    async fn find_category(&self, name: &str) -> Result<Category, ApiError>;
}
