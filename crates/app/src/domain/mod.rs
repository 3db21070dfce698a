//! Storefront Backend Services

pub mod addresses;
pub mod carts;
pub mod coupons;
pub mod notifications;
pub mod orders;
pub mod payments;
pub mod products;
pub mod reviews;

mod wire;
