//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    addresses::{Address, AddressId},
    cart::{Cart, CartError, CartLine, CartLineId, ProductId, ProductRef},
    checkout::{Checkout, CheckoutError, CheckoutState, PaymentHandoff},
    coupons::{CouponApplication, CouponCode, CouponError},
    draft::OrderDraft,
    ids::TypedId,
    money::{Amount, AmountError, display_amount},
    navigation::{Handoff, Navigator, NoOrderData, Route},
    orders::{CreatedOrder, OrderId, OrderItem, OrderRequest, PaymentStatus},
    pricing::TotalPriceError,
    totals::{OrderTotals, TotalsError},
};
