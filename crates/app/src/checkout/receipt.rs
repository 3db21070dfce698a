//! Receipt polling.

use std::{sync::Arc, time::Duration};

use backon::BackoffBuilder;
use tracing::{debug, warn};

use storefront::prelude::OrderId;

use crate::{
    checkout::ReceiptError,
    domain::payments::PaymentsService,
    retry::{Cancellation, receipt_backoff},
};

/// Whether a receipt was issued in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiptStatus {
    Available(String),

    /// The payment went through; the provider has not issued the receipt yet.
    NotAvailableYet,
}

/// Polls the backend for a payment receipt with bounded exponential backoff.
pub struct ReceiptPoller {
    payments: Arc<dyn PaymentsService>,
    attempts: usize,
    min_delay: Duration,
    max_delay: Duration,
}

impl std::fmt::Debug for ReceiptPoller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReceiptPoller")
            .field("attempts", &self.attempts)
            .field("min_delay", &self.min_delay)
            .field("max_delay", &self.max_delay)
            .finish_non_exhaustive()
    }
}

impl ReceiptPoller {
    #[must_use]
    pub fn new(
        payments: Arc<dyn PaymentsService>,
        attempts: usize,
        min_delay: Duration,
        max_delay: Duration,
    ) -> Self {
        Self {
            payments,
            attempts: attempts.max(1),
            min_delay,
            max_delay,
        }
    }

    /// Poll until a receipt appears, attempts run out or `cancellation` fires.
    ///
    /// Running out or being cancelled is not an error: the payment already succeeded.
    pub async fn poll(&self, order: &OrderId, mut cancellation: Cancellation) -> ReceiptStatus {
        match self.try_poll(order, &mut cancellation).await {
            Ok(url) => ReceiptStatus::Available(url),
            Err(error) => {
                warn!(%order, %error, "payment receipt not available yet");

                ReceiptStatus::NotAvailableYet
            }
        }
    }

    async fn try_poll(&self, order: &OrderId, cancellation: &mut Cancellation) -> Result<String, ReceiptError> {
        let backoff = receipt_backoff(self.attempts, self.min_delay, self.max_delay).build();

        let mut last_error = None;

        for (attempt, delay) in std::iter::once(Duration::ZERO).chain(backoff).enumerate() {
            if attempt > 0 {
                tokio::select! {
                    () = tokio::time::sleep(delay) => {}
                    () = cancellation.cancelled() => return Err(ReceiptError::Cancelled),
                }
            }

            if cancellation.is_cancelled() {
                return Err(ReceiptError::Cancelled);
            }

            match self.payments.receipt_url(order).await {
                Ok(Some(url)) => return Ok(url),
                Ok(None) => debug!(attempt = attempt + 1, "receipt not issued yet"),
                Err(error) if error.is_auth_error() => return Err(ReceiptError::Api(error)),
                Err(error) => {
                    debug!(attempt = attempt + 1, %error, "receipt lookup failed");

                    last_error = Some(error);
                }
            }
        }

        Err(ReceiptError::Exhausted {
            attempts: self.attempts,
            last_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        api::ApiError,
        domain::payments::MockPaymentsService,
        retry::cancellation,
    };

    use super::*;

    fn poller(payments: MockPaymentsService, attempts: usize) -> ReceiptPoller {
        ReceiptPoller::new(
            Arc::new(payments),
            attempts,
            Duration::from_millis(100),
            Duration::from_secs(1),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn returns_receipt_once_issued() {
        let mut payments = MockPaymentsService::new();
        let mut calls = 0;

        payments.expect_receipt_url().times(3).returning(move |_| {
            calls += 1;

            Ok((calls == 3).then(|| "https://pay.example/r/1".to_string()))
        });

        let status = poller(payments, 5)
            .poll(&OrderId::new("o1"), Cancellation::never())
            .await;

        assert_eq!(status, ReceiptStatus::Available("https://pay.example/r/1".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_bounded_attempts() {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_receipt_url()
            .times(4)
            .returning(|_| Err(ApiError::UnexpectedResponse("not yet".to_string())));

        let status = poller(payments, 4)
            .poll(&OrderId::new("o1"), Cancellation::never())
            .await;

        assert_eq!(status, ReceiptStatus::NotAvailableYet);
    }

    #[tokio::test(start_paused = true)]
    async fn auth_error_stops_polling() {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_receipt_url()
            .once()
            .returning(|_| Err(ApiError::Unauthorized));

        let status = poller(payments, 5)
            .poll(&OrderId::new("o1"), Cancellation::never())
            .await;

        assert_eq!(status, ReceiptStatus::NotAvailableYet);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_before_start_sends_nothing() {
        let mut payments = MockPaymentsService::new();

        payments.expect_receipt_url().never();

        let (handle, cancellation) = cancellation();

        handle.cancel();

        let status = poller(payments, 5).poll(&OrderId::new("o1"), cancellation).await;

        assert_eq!(status, ReceiptStatus::NotAvailableYet);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_handle_stops_waiting() {
        let mut payments = MockPaymentsService::new();

        payments.expect_receipt_url().once().returning(|_| Ok(None));

        let (handle, cancellation) = cancellation();
        let receipts = poller(payments, 5);
        let order = OrderId::new("o1");

        let poll = receipts.poll(&order, cancellation);

        tokio::pin!(poll);

        // First lookup runs immediately, then the poll waits on the backoff.
        assert!(poll_once(poll.as_mut()).await.is_none());

        drop(handle);

        assert_eq!(poll.await, ReceiptStatus::NotAvailableYet);
    }

    async fn poll_once<F: std::future::Future + Unpin>(future: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            output = future => Some(output),
            () = std::future::ready(()) => None,
        }
    }
}
