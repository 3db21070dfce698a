//! Reviews service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use storefront::prelude::ProductId;

use crate::{
    api::{ApiClient, ApiError, Endpoint},
    domain::reviews::{
        models::{NewReview, ProductReviews},
        records::{CreateReviewBody, ProductReviewsRecord},
    },
};

#[derive(Debug, Clone)]
pub struct HttpReviewsService {
    api: ApiClient,
}

impl HttpReviewsService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ReviewsService for HttpReviewsService {
    async fn product_reviews(&self, product: &ProductId) -> Result<ProductReviews, ApiError> {
        let record: ProductReviewsRecord = self
            .api
            .call(&Endpoint::ProductReviews(product.clone()))
            .await?
            .body()?;

        Ok(record.into())
    }

    async fn post_review(&self, review: &NewReview) -> Result<String, ApiError> {
        let response = self
            .api
            .call_with(&Endpoint::CreateReview, &CreateReviewBody::from(review))
            .await?;

        info!(product = %review.product, rating = review.rating.stars(), "review posted");

        Ok(response.message().unwrap_or("Review submitted!").to_string())
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Reviews of a product with rating statistics.
    async fn product_reviews(&self, product: &ProductId) -> Result<ProductReviews, ApiError>;

    /// Post a review; returns the backend's message.
    async fn post_review(&self, review: &NewReview) -> Result<String, ApiError>;
}
