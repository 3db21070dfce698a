//! Backend endpoint table.

use reqwest::{Method, Url};
use smallvec::{SmallVec, smallvec};

use storefront::prelude::{CartLineId, OrderId, ProductId};

use crate::{
    api::ApiError,
    domain::{notifications::models::NotificationId, products::models::CategoryId},
};

/// Every backend route the client calls, with typed path parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Register,
    VerifyEmail,
    Login,
    Logout,
    ListProducts(Option<CategoryId>),
    GetProduct(ProductId),
    ListCategories,
    SearchCategory,
    ProductReviews(ProductId),
    CreateReview,
    GetCart,
    AddCartItem,
    UpdateCartItem(CartLineId),
    DeleteCartItem(CartLineId),
    ClearCart,
    GetAddresses,
    CreateAddress,
    ApplyCoupon,
    CreateOrder,
    UserOrders,
    GetOrder(OrderId),
    UpdateOrder(OrderId),
    CreatePaymentIntent,
    PaymentReceipt(OrderId),
    PaymentHistory,
    Notifications,
    MarkNotificationRead(NotificationId),
    DeleteNotification(NotificationId),
}

impl Endpoint {
    /// HTTP method of the route.
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Self::Register
            | Self::VerifyEmail
            | Self::Login
            | Self::SearchCategory
            | Self::CreateReview
            | Self::AddCartItem
            | Self::CreateAddress
            | Self::ApplyCoupon
            | Self::CreateOrder
            | Self::CreatePaymentIntent => Method::POST,
            Self::UpdateCartItem(_) | Self::UpdateOrder(_) => Method::PUT,
            Self::MarkNotificationRead(_) => Method::PATCH,
            Self::DeleteCartItem(_) | Self::ClearCart | Self::DeleteNotification(_) => {
                Method::DELETE
            }
            Self::Logout
            | Self::ListProducts(_)
            | Self::GetProduct(_)
            | Self::ListCategories
            | Self::ProductReviews(_)
            | Self::GetCart
            | Self::GetAddresses
            | Self::UserOrders
            | Self::GetOrder(_)
            | Self::PaymentReceipt(_)
            | Self::PaymentHistory
            | Self::Notifications => Method::GET,
        }
    }

    /// Whether the route needs a bearer token.
    #[must_use]
    pub fn requires_auth(&self) -> bool {
        !matches!(
            self,
            Self::Register
                | Self::VerifyEmail
                | Self::Login
                | Self::ListProducts(_)
                | Self::GetProduct(_)
                | Self::ListCategories
                | Self::SearchCategory
                | Self::ProductReviews(_)
        )
    }

    /// Path segments below the base URL; parameters are kept as single segments.
    #[must_use]
    pub fn segments(&self) -> SmallVec<[&str; 4]> {
        match self {
            Self::Register => smallvec!["api", "user", "register"],
            Self::VerifyEmail => smallvec!["api", "user", "verify-email"],
            Self::Login => smallvec!["api", "user", "login"],
            Self::Logout => smallvec!["api", "user", "logout"],
            Self::ListProducts(_) => smallvec!["api", "product", "get"],
            Self::GetProduct(id) => smallvec!["api", "product", id.as_str()],
            Self::ListCategories => smallvec!["api", "category", "get"],
            Self::SearchCategory => smallvec!["api", "category", "search"],
            Self::ProductReviews(id) => smallvec!["api", "reviews", id.as_str()],
            Self::CreateReview => smallvec!["api", "reviews", "create"],
            Self::GetCart => smallvec!["api", "cart", "get"],
            Self::AddCartItem => smallvec!["api", "cart", "create"],
            Self::UpdateCartItem(id) => smallvec!["api", "cart", "update", id.as_str()],
            Self::DeleteCartItem(id) => smallvec!["api", "cart", "delete", id.as_str()],
            Self::ClearCart => smallvec!["api", "cart", "clear"],
            Self::GetAddresses => smallvec!["api", "address", "get"],
            Self::CreateAddress => smallvec!["api", "address", "create"],
            Self::ApplyCoupon => smallvec!["api", "coupon", "apply"],
            Self::CreateOrder => smallvec!["api", "order", "create"],
            Self::UserOrders => smallvec!["api", "order", "getuser"],
            Self::GetOrder(id) => smallvec!["api", "order", id.as_str()],
            Self::UpdateOrder(id) => smallvec!["api", "order", "update", id.as_str()],
            Self::CreatePaymentIntent => smallvec!["api", "payment", "create-payment-intent"],
            Self::PaymentReceipt(id) => smallvec!["api", "payment", "receipt", id.as_str()],
            Self::PaymentHistory => smallvec!["api", "payments"],
            Self::Notifications => smallvec!["api", "notifications"],
            Self::MarkNotificationRead(id) => smallvec!["api", "notifications", id.as_str(), "read"],
            Self::DeleteNotification(id) => smallvec!["api", "notifications", id.as_str()],
        }
    }

    /// Query parameter carried by the route, if any.
    #[must_use]
    pub fn query(&self) -> Option<(&'static str, &str)> {
        match self {
            Self::ListProducts(Some(category)) => Some(("categoryId", category.as_str())),
            _ => None,
        }
    }

    /// Display path, e.g. `/api/cart/update/{id}`.
    #[must_use]
    pub fn path(&self) -> String {
        self.segments()
            .iter()
            .fold(String::new(), |path, segment| path + "/" + segment)
    }

    /// Absolute URL of the route below `base`.
    ///
    /// Parameters are percent-encoded, so an id can never escape its segment.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] if `base` cannot carry a path.
    pub fn url(&self, base: &Url) -> Result<Url, ApiError> {
        let mut url = base.clone();

        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl(base.to_string()))?
            .pop_if_empty()
            .extend(self.segments());

        if let Some((key, value)) = self.query() {
            url.query_pairs_mut().append_pair(key, value);
        }

        Ok(url)
    }
}
