//! Product Models

use storefront::prelude::{Amount, ProductId, ProductRef, TypedId};

/// Category identifier.
pub type CategoryId = TypedId<Category>;

/// Product as listed by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub images: Vec<String>,
    pub price: Amount,
}

impl Product {
    /// The reference a cart line keeps to this product.
    #[must_use]
    pub fn to_ref(&self) -> ProductRef {
        ProductRef {
            id: self.id.clone(),
            name: self.name.clone(),
            image: self.images.first().cloned(),
        }
    }

    /// Case-insensitive name match, as used by the search box.
    ///
    /// A blank keyword matches everything.
    #[must_use]
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let keyword = keyword.trim().to_lowercase();

        keyword.is_empty() || self.name.to_lowercase().contains(&keyword)
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso};

    use super::*;

    #[test]
    fn keyword_matches_name_ignoring_case() {
        let product = Product {
            id: ProductId::new("p1"),
            name: "Electric Kettle".to_string(),
            images: Vec::new(),
            price: Money::from_major(1000, iso::INR),
        };

        assert!(product.matches_keyword("kettle"));
        assert!(product.matches_keyword("  ELECTRIC "));
        assert!(product.matches_keyword(""));
        assert!(!product.matches_keyword("toaster"));
    }
}
