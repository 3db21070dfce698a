//! Review Records

use std::collections::BTreeMap;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront::prelude::ProductId;

use crate::domain::reviews::models::{NewReview, ProductReviews, Review};

#[derive(Debug, Serialize)]
pub(crate) struct CreateReviewBody<'a> {
    #[serde(rename = "productId")]
    pub product_id: &'a ProductId,

    pub rating: u8,

    pub comment: &'a str,
}

impl<'a> From<&'a NewReview> for CreateReviewBody<'a> {
    fn from(review: &'a NewReview) -> Self {
        Self {
            product_id: &review.product,
            rating: review.rating.stars(),
            comment: &review.comment,
        }
    }
}

/// Reviews route answer; unlike most routes it is not wrapped in `data`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProductReviewsRecord {
    #[serde(default)]
    pub reviews: Vec<ReviewRecord>,

    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub average: Option<Decimal>,

    #[serde(default)]
    pub total: u32,

    #[serde(default)]
    pub distribution: BTreeMap<u8, u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ReviewRecord {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub rating: u8,

    #[serde(default)]
    pub comment: String,

    #[serde(rename = "createdAt", default)]
    pub created_at: Option<Timestamp>,
}

impl From<ReviewRecord> for Review {
    fn from(record: ReviewRecord) -> Self {
        Self {
            id: record.id.into(),
            author: record.name.filter(|name| !name.trim().is_empty()),
            rating: record.rating,
            comment: record.comment,
            created_at: record.created_at,
        }
    }
}

impl From<ProductReviewsRecord> for ProductReviews {
    fn from(record: ProductReviewsRecord) -> Self {
        let mut distribution = [0; 5];

        for (stars, count) in record.distribution {
            if let Some(slot) = usize::from(stars)
                .checked_sub(1)
                .and_then(|index| distribution.get_mut(index))
            {
                *slot = count;
            }
        }

        Self {
            reviews: record.reviews.into_iter().map(Review::from).collect(),
            average: record.average.unwrap_or_default(),
            total: record.total,
            distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::reviews::models::Rating;

    use super::*;

    #[test]
    fn decodes_reviews_with_keyed_distribution() -> TestResult {
        let record: ProductReviewsRecord = serde_json::from_str(
            r#"{
                "reviews": [
                    { "_id": "r1", "name": "Asha", "rating": 5, "comment": "Great", "createdAt": "2025-01-02T10:00:00Z" },
                    { "_id": "r2", "name": "", "rating": 3, "comment": "Fine" }
                ],
                "average": 4.0,
                "total": 2,
                "distribution": { "5": 1, "4": 0, "3": 1, "2": 0, "1": 0 }
            }"#,
        )?;

        let reviews = ProductReviews::from(record);

        assert_eq!(reviews.total, 2);
        assert_eq!(reviews.distribution, [0, 0, 1, 0, 1]);
        assert_eq!(reviews.percent(Rating::new(5)?), 50);
        assert_eq!(reviews.reviews.first().and_then(|review| review.author.as_deref()), Some("Asha"));
        assert_eq!(reviews.reviews.get(1).and_then(|review| review.author.clone()), None);

        Ok(())
    }

    #[test]
    fn missing_statistics_default_to_zero() -> TestResult {
        let record: ProductReviewsRecord = serde_json::from_str(r#"{ "success": true }"#)?;

        let reviews = ProductReviews::from(record);

        assert!(reviews.reviews.is_empty());
        assert_eq!(reviews.average, Decimal::ZERO);
        assert_eq!(reviews.distribution, [0; 5]);

        Ok(())
    }
}
