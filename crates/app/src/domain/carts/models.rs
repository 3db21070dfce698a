//! Cart Models

use storefront::prelude::{Cart, CartLineId};

/// The remote cart as last fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSnapshot {
    /// Lines whose product still exists.
    pub cart: Cart,

    /// Lines whose product was deleted; shown as unavailable and never ordered.
    pub unavailable: Vec<CartLineId>,
}
