//! Payment provider boundary.
//!
//! Card entry and confirmation happen in the provider's hosted widget; this
//! crate only ever sees the intent and the provider's verdict.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::domain::payments::models::PaymentIntent;

/// Intent status reported for a completed charge.
pub(crate) const SUCCEEDED: &str = "succeeded";

/// What the provider reported after confirming an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfirmation {
    pub intent_id: String,

    /// Provider status, e.g. `succeeded` or `requires_action`.
    pub status: String,
}

impl ProviderConfirmation {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.status == SUCCEEDED
    }
}

/// A provider-side failure, shown to the user as is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ProviderError {
    pub message: String,
}

#[automock]
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Confirm a card payment for `intent`.
    async fn confirm_card_payment(
        &self,
        intent: &PaymentIntent,
    ) -> Result<ProviderConfirmation, ProviderError>;
}

/// Confirmation completed out of band, e.g. in a browser, and reported back
/// with the status the widget showed.
#[derive(Debug, Clone)]
pub struct ExternalConfirmation {
    status: String,
}

impl ExternalConfirmation {
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

#[async_trait]
impl PaymentProvider for ExternalConfirmation {
    async fn confirm_card_payment(
        &self,
        intent: &PaymentIntent,
    ) -> Result<ProviderConfirmation, ProviderError> {
        let status = self.status.trim().to_ascii_lowercase();

        if status.is_empty() {
            return Err(ProviderError {
                message: "Payment status was not reported".to_string(),
            });
        }

        Ok(ProviderConfirmation {
            intent_id: intent.intent_id.clone(),
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn intent() -> PaymentIntent {
        PaymentIntent {
            client_secret: "pi_1_secret_x".to_string(),
            intent_id: "pi_1".to_string(),
        }
    }

    #[tokio::test]
    async fn reported_status_is_normalized() -> TestResult {
        let confirmation = ExternalConfirmation::new(" Succeeded\n")
            .confirm_card_payment(&intent())
            .await?;

        assert!(confirmation.succeeded());
        assert_eq!(confirmation.intent_id, "pi_1");

        Ok(())
    }

    #[tokio::test]
    async fn blank_status_is_not_a_confirmation() {
        let result = ExternalConfirmation::new("   ")
            .confirm_card_payment(&intent())
            .await;

        assert_eq!(
            result,
            Err(ProviderError {
                message: "Payment status was not reported".to_string(),
            })
        );
    }
}
