//! Navigation
//!
//! Screens hand state to each other in memory. A screen reached without its
//! state (for example after a reload) resolves to a fallback instead.

use thiserror::Error;

use crate::{draft::OrderDraft, orders::{CreatedOrder, OrderId}};

/// Path users land on after logging in when no return path was recorded.
pub const DEFAULT_POST_LOGIN_PATH: &str = "/dashboard";

/// Raised when a screen expecting handed-off state has none.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("no order data found")]
pub struct NoOrderData {
    /// Where to send the user instead.
    pub fallback: Route,
}

/// Storefront screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Landing page
    Home,

    /// Login form, remembering where to return to.
    Login {
        /// Path to resume after login
        return_to: Option<String>,
    },

    /// User dashboard
    Dashboard,

    /// Cart
    Cart,

    /// Checkout review
    Checkout,

    /// Card payment
    Payment,

    /// Payment confirmation
    OrderSuccess,

    /// Order history
    Orders,
}

impl Route {
    /// URL path of the screen.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login { .. } => "/login",
            Self::Dashboard => "/dashboard",
            Self::Cart => "/dashboard/cart",
            Self::Checkout => "/checkout",
            Self::Payment => "/payment",
            Self::OrderSuccess => "/order-success",
            Self::Orders => "/orders",
        }
    }

    /// Whether the screen needs a session.
    pub fn requires_session(&self) -> bool {
        !matches!(self, Self::Home | Self::Login { .. })
    }
}

/// State handed from one screen to the next.
#[derive(Debug, Clone, PartialEq)]
pub enum Handoff {
    /// Cart to checkout
    Checkout(OrderDraft),

    /// Checkout to payment
    Payment(CreatedOrder),

    /// Payment to confirmation
    OrderSuccess(OrderId),
}

/// Tracks the current screen and the state handed to it.
#[derive(Debug, Clone)]
pub struct Navigator {
    route: Route,
    handoff: Option<Handoff>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            route: Route::Home,
            handoff: None,
        }
    }
}

impl Navigator {
    /// Navigate to `route`, applying the login guard.
    ///
    /// Protected routes without a session become [`Route::Login`] carrying the
    /// requested path; the handoff is dropped in that case.
    pub fn navigate(&mut self, route: Route, handoff: Option<Handoff>, has_session: bool) -> &Route {
        if route.requires_session() && !has_session {
            self.route = Route::Login {
                return_to: Some(route.path().to_string()),
            };
            self.handoff = None;
        } else {
            self.route = route;
            self.handoff = handoff;
        }

        &self.route
    }

    /// Simulate a reload: the route survives, in-memory state does not.
    pub fn reload(&mut self) {
        self.handoff = None;
    }

    /// Current screen
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Draft handed to checkout.
    ///
    /// # Errors
    ///
    /// Returns [`NoOrderData`] with [`Route::Home`] as fallback if none was handed over.
    pub fn checkout_draft(&self) -> Result<&OrderDraft, NoOrderData> {
        match &self.handoff {
            Some(Handoff::Checkout(draft)) => Ok(draft),
            _ => Err(NoOrderData {
                fallback: Route::Home,
            }),
        }
    }

    /// Order handed to payment.
    ///
    /// # Errors
    ///
    /// Returns [`NoOrderData`] with [`Route::Home`] as fallback if none was handed over.
    pub fn payment_order(&self) -> Result<&CreatedOrder, NoOrderData> {
        match &self.handoff {
            Some(Handoff::Payment(order)) => Ok(order),
            _ => Err(NoOrderData {
                fallback: Route::Home,
            }),
        }
    }
}
