//! Backend HTTP client.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    api::{ApiError, Endpoint},
    session::SessionContext,
};

/// A decoded JSON envelope, `{ success, message, data, .. }`.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    body: Value,
}

impl ApiResponse {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The envelope's `message`, if present.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }

    /// Decode the envelope's `data` field.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnexpectedResponse`] if `data` does not match `T`.
    pub fn data<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let data = self.body.get("data").cloned().unwrap_or(Value::Null);

        serde_json::from_value(data)
            .map_err(|error| ApiError::UnexpectedResponse(format!("invalid data: {error}")))
    }

    /// Decode the whole body, for routes that answer outside `data`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnexpectedResponse`] if the body does not match `T`.
    pub fn body<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_value(self.body.clone())
            .map_err(|error| ApiError::UnexpectedResponse(format!("invalid body: {error}")))
    }

    fn is_failure(&self) -> bool {
        self.body.get("success").and_then(Value::as_bool) == Some(false)
            || self.body.get("error").and_then(Value::as_bool) == Some(true)
    }
}

/// HTTP client for the storefront backend.
///
/// Every request goes through the session: the bearer token is attached when
/// present, a 401 expires the session, and routes needing a token are refused
/// locally while there is none.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: Client,
    session: SessionContext,
}

impl ApiClient {
    /// Create a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: Url, timeout: Duration, session: SessionContext) -> Result<Self, ApiError> {
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }

        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            http,
            session,
        })
    }

    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Call a route without a body.
    ///
    /// # Errors
    ///
    /// See [`ApiError`]; backend rejections carry the backend's message.
    #[tracing::instrument(skip(self), fields(method = %endpoint.method(), path = %endpoint.path()), err)]
    pub async fn call(&self, endpoint: &Endpoint) -> Result<ApiResponse, ApiError> {
        let request = self.request(endpoint)?;

        self.execute(request).await
    }

    /// Call a route with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiError`]; backend rejections carry the backend's message.
    #[tracing::instrument(skip(self, body), fields(method = %endpoint.method(), path = %endpoint.path()), err)]
    pub async fn call_with<B>(&self, endpoint: &Endpoint, body: &B) -> Result<ApiResponse, ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let request = self.request(endpoint)?.json(body);

        self.execute(request).await
    }

    fn request(&self, endpoint: &Endpoint) -> Result<RequestBuilder, ApiError> {
        let url = endpoint.url(&self.base_url)?;
        let request = self.http.request(endpoint.method(), url);

        match self.session.token() {
            Some(token) => Ok(request.bearer_auth(token.expose())),
            None if endpoint.requires_auth() => {
                debug!("refusing request without a session");

                Err(ApiError::SessionExpired)
            }
            None => Ok(request),
        }
    }

    async fn execute(&self, request: RequestBuilder) -> Result<ApiResponse, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("backend answered 401, expiring session");

            self.session.expire();

            return Err(ApiError::Unauthorized);
        }

        let bytes = response.bytes().await?;
        let parsed = if bytes.is_empty() {
            Ok(Value::Null)
        } else {
            serde_json::from_slice::<Value>(&bytes)
        };

        if !status.is_success() {
            let message = parsed
                .ok()
                .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

            debug!(%status, %message, "backend rejected request");

            return Err(ApiError::Rejected { status, message });
        }

        let body = parsed
            .map_err(|error| ApiError::UnexpectedResponse(format!("invalid json: {error}")))?;

        let response = ApiResponse { status, body };

        if response.is_failure() {
            let message = response.message().unwrap_or("request failed").to_string();

            debug!(%status, %message, "backend reported failure");

            return Err(ApiError::Rejected { status, message });
        }

        Ok(response)
    }
}
