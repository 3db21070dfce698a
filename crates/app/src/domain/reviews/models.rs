//! Review Models

use jiff::Timestamp;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use storefront::prelude::{ProductId, TypedId};

/// Review identifier.
pub type ReviewId = TypedId<Review>;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RatingError {
    #[error("Please select a rating")]
    Missing,

    #[error("rating must be between 1 and 5, got {0}")]
    OutOfRange(u8),
}

/// A star rating from one to five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    /// # Errors
    ///
    /// Returns [`RatingError::Missing`] for zero stars and
    /// [`RatingError::OutOfRange`] above five.
    pub fn new(stars: u8) -> Result<Self, RatingError> {
        match stars {
            0 => Err(RatingError::Missing),
            1..=5 => Ok(Self(stars)),
            _ => Err(RatingError::OutOfRange(stars)),
        }
    }

    #[must_use]
    pub fn stars(self) -> u8 {
        self.0
    }
}

/// A review to post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub product: ProductId,
    pub rating: Rating,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: ReviewId,
    pub author: Option<String>,
    pub rating: u8,
    pub comment: String,
    pub created_at: Option<Timestamp>,
}

/// Reviews of one product with their rating statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductReviews {
    pub reviews: Vec<Review>,
    pub average: Decimal,
    pub total: u32,

    /// Review counts by star rating, one star first.
    pub distribution: [u32; 5],
}

impl ProductReviews {
    /// Number of reviews giving `stars` stars.
    #[must_use]
    pub fn count(&self, stars: Rating) -> u32 {
        self.distribution
            .get(usize::from(stars.stars() - 1))
            .copied()
            .unwrap_or_default()
    }

    /// Share of reviews giving `stars` stars, as a whole percentage rounded half up.
    #[must_use]
    pub fn percent(&self, stars: Rating) -> u32 {
        if self.total == 0 {
            return 0;
        }

        let count = u64::from(self.count(stars));
        let total = u64::from(self.total);

        u32::try_from((count * 200 + total) / (total * 2)).unwrap_or(u32::MAX)
    }

    /// Average rating to one decimal place, halves rounded up.
    #[must_use]
    pub fn average_display(&self) -> Decimal {
        self.average
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    }
}
