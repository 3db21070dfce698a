//! Retry utilities: the receipt poll backoff and cooperative cancellation.

use std::time::Duration;

use backon::ExponentialBuilder;
use tokio::sync::watch;

/// Backoff for polling a payment receipt after confirmation.
///
/// The first poll happens immediately, so the builder allows
/// `attempts - 1` further delays. Jitter enabled.
pub fn receipt_backoff(attempts: usize, min_delay: Duration, max_delay: Duration) -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(min_delay)
        .with_max_delay(max_delay)
        .with_max_times(attempts.saturating_sub(1))
        .with_jitter()
}

/// Cancels the [`Cancellation`]s created with it. Dropping it cancels too.
#[derive(Debug)]
pub struct CancelHandle(watch::Sender<bool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.send_replace(true);
    }
}

/// Resolves once the paired [`CancelHandle`] cancels or is dropped.
#[derive(Debug, Clone)]
pub struct Cancellation(Option<watch::Receiver<bool>>);

/// A linked handle and cancellation pair.
#[must_use]
pub fn cancellation() -> (CancelHandle, Cancellation) {
    let (sender, receiver) = watch::channel(false);

    (CancelHandle(sender), Cancellation(Some(receiver)))
}

impl Cancellation {
    /// A cancellation that never fires.
    #[must_use]
    pub fn never() -> Self {
        Self(None)
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0
            .as_ref()
            .is_some_and(|receiver| *receiver.borrow() || receiver.has_changed().is_err())
    }

    /// Wait until cancelled.
    pub async fn cancelled(&mut self) {
        match &mut self.0 {
            Some(receiver) => {
                // An error means the handle was dropped, which also cancels.
                _ = receiver.wait_for(|cancelled| *cancelled).await;
            }
            None => std::future::pending().await,
        }
    }
}
