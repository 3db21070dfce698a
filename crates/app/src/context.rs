//! App Context

use std::{sync::Arc, time::Duration};

use rusty_money::iso::Currency;
use thiserror::Error;

use storefront::prelude::Amount;

use crate::{
    api::{ApiClient, ApiError},
    auth::{AuthService, HttpAuthService},
    checkout::{OrderSequencer, PaymentStep, ReceiptPoller},
    config::{AppConfig, ConfigError},
    domain::{
        addresses::{AddressesService, HttpAddressesService},
        carts::{CartsService, HttpCartsService},
        coupons::{CouponsService, HttpCouponsService},
        notifications::{HttpNotificationsService, NotificationsService},
        orders::{HttpOrdersService, OrdersService},
        payments::{HttpPaymentsService, PaymentsService},
        products::{HttpProductsService, ProductsService},
        reviews::{HttpReviewsService, ReviewsService},
    },
    session::{FileTokenStore, SessionContext, SessionError},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to load session: {0}")]
    Session(#[from] SessionError),

    #[error("failed to build backend client: {0}")]
    Api(#[from] ApiError),
}

#[derive(Clone)]
pub struct AppContext {
    pub session: SessionContext,
    pub auth: Arc<dyn AuthService>,
    pub products: Arc<dyn ProductsService>,
    pub reviews: Arc<dyn ReviewsService>,
    pub carts: Arc<dyn CartsService>,
    pub addresses: Arc<dyn AddressesService>,
    pub coupons: Arc<dyn CouponsService>,
    pub orders: Arc<dyn OrdersService>,
    pub payments: Arc<dyn PaymentsService>,
    pub notifications: Arc<dyn NotificationsService>,
    pub currency: &'static Currency,
    pub delivery_fee: Amount,
    receipt_attempts: usize,
    receipt_delays: (Duration, Duration),
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("session", &self.session)
            .field("currency", &self.currency.iso_alpha_code)
            .field("delivery_fee", &self.delivery_fee)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from configuration, loading any saved session.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid settings, an unreadable token file or a
    /// base URL the client cannot use.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let currency = config.currency()?;
        let delivery_fee = config.delivery_fee()?;
        let receipt_delays = config.checkout.receipt_poll_delays()?;

        let store = Arc::new(FileTokenStore::new(config.token_path()?));
        let session = SessionContext::load(store)?;

        let api = ApiClient::new(
            config.backend.base_url.clone(),
            config.request_timeout(),
            session.clone(),
        )?;

        Ok(Self {
            session,
            auth: Arc::new(HttpAuthService::new(api.clone())),
            products: Arc::new(HttpProductsService::new(api.clone(), currency)),
            reviews: Arc::new(HttpReviewsService::new(api.clone())),
            carts: Arc::new(HttpCartsService::new(api.clone(), currency)),
            addresses: Arc::new(HttpAddressesService::new(api.clone())),
            coupons: Arc::new(HttpCouponsService::new(api.clone())),
            orders: Arc::new(HttpOrdersService::new(api.clone(), currency)),
            payments: Arc::new(HttpPaymentsService::new(api.clone(), currency)),
            notifications: Arc::new(HttpNotificationsService::new(api)),
            currency,
            delivery_fee,
            receipt_attempts: config.checkout.receipt_poll_attempts,
            receipt_delays,
        })
    }

    #[must_use]
    pub fn sequencer(&self) -> OrderSequencer {
        OrderSequencer::new(self.orders.clone(), self.carts.clone())
    }

    #[must_use]
    pub fn payment_step(&self) -> PaymentStep {
        let (min_delay, max_delay) = self.receipt_delays;

        PaymentStep::new(
            self.payments.clone(),
            self.orders.clone(),
            ReceiptPoller::new(self.payments.clone(), self.receipt_attempts, min_delay, max_delay),
        )
    }
}
