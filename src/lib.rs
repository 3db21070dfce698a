//! Storefront
//!
//! Checkout domain for the storefront client: cart lines, order totals,
//! coupons, order drafts and the order submission state machine. Everything
//! here is synchronous and free of IO; the `storefront-app` crate drives it
//! against the backend.

pub mod addresses;
pub mod cart;
pub mod checkout;
pub mod coupons;
pub mod draft;
pub mod ids;
pub mod money;
pub mod navigation;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod totals;
