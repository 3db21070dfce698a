//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use storefront::navigation::DEFAULT_POST_LOGIN_PATH;

use crate::{
    api::{ApiClient, ApiError, Endpoint},
    auth::{Credentials, Registration, VerificationCode, models::LoginRecord},
    session::BearerToken,
};

#[derive(Debug, Clone)]
pub struct HttpAuthService {
    api: ApiClient,
}

impl HttpAuthService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    #[tracing::instrument(skip_all, fields(email = %registration.email), err)]
    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        self.api.call_with(&Endpoint::Register, registration).await?;

        info!("account registered, awaiting email verification");

        Ok(())
    }

    async fn verify_email(&self, code: &VerificationCode) -> Result<String, ApiError> {
        let response = self.api.call_with(&Endpoint::VerifyEmail, code).await?;

        info!("email verified");

        Ok(response
            .message()
            .unwrap_or("Email verified successfully!")
            .to_string())
    }

    #[tracing::instrument(skip_all, fields(email = %credentials.email), err)]
    async fn login(&self, credentials: Credentials) -> Result<String, ApiError> {
        let record: LoginRecord = self
            .api
            .call_with(&Endpoint::Login, &credentials)
            .await?
            .data()?;

        let session = self.api.session();

        session.set_token(BearerToken::parse(&record.access_token)?)?;

        let redirect = session
            .take_return_path()
            .unwrap_or_else(|| DEFAULT_POST_LOGIN_PATH.to_string());

        info!(%redirect, "logged in");

        Ok(redirect)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        if let Err(error) = self.api.call(&Endpoint::Logout).await {
            warn!(%error, "backend logout failed, clearing session locally");
        }

        self.api.session().clear()?;

        info!("logged out");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account. The backend emails a verification link.
    async fn register(&self, registration: &Registration) -> Result<(), ApiError>;

    /// Confirm an email address; returns the backend's message.
    async fn verify_email(&self, code: &VerificationCode) -> Result<String, ApiError>;

    /// Exchange credentials for a token and store it in the session.
    ///
    /// Returns the path to continue at: the one recorded when the session
    /// last expired, or the dashboard.
    async fn login(&self, credentials: Credentials) -> Result<String, ApiError>;

    /// End the session. The local token is dropped even if the backend call fails.
    async fn logout(&self) -> Result<(), ApiError>;
}
