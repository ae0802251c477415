//! # API Client
//!
//! HTTP client configuration and repository access for the billing
//! backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Backend API Client                                 │
//! │                                                                         │
//! │  Dashboard startup                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiConfig::new(base_url) ← Configure timeout/auth                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiClient::new(config) ← Build the reqwest client once                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │          reqwest::Client                 │                           │
//! │  │  (connection pool, shared by clone)      │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       │ Concurrent access from dashboard actions                       │
//! │       ▼                                                                 │
//! │  client.order_items().list(order_id)                                   │
//! │  client.invoices().create(order_id, &invoice)                          │
//! │  (Repositories are cheap handles over the shared pool)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No Retries
//! A failed call surfaces one error and the dashboard stays in its
//! pre-save state; the user re-triggers the action. Nothing is retried
//! automatically.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::error::{ClientError, ClientResult};
use crate::repository::contracts::ContractRepository;
use crate::repository::customers::CustomerRepository;
use crate::repository::invoices::InvoiceRepository;
use crate::repository::order_items::OrderItemsRepository;
use crate::repository::orders::OrderRepository;
use crate::repository::vendors::VendorRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Backend API configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = ApiConfig::new("https://billing.example.com")
///     .timeout(Duration::from_secs(10))
///     .bearer_token("token-from-session");
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the backend, without a trailing slash.
    pub base_url: String,

    /// Request timeout.
    /// Default: 30 seconds
    pub timeout: Duration,

    /// Bearer token forwarded on every request, when the session has one.
    /// Auth itself is the backend's concern; we only carry the header.
    pub bearer_token: Option<String>,
}

impl ApiConfig {
    /// Creates a new API configuration with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        ApiConfig {
            base_url,
            timeout: Duration::from_secs(30),
            bearer_token: None,
        }
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the bearer token.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

// =============================================================================
// ApiClient
// =============================================================================

/// Main API handle providing repository access.
///
/// Cloning is cheap: the underlying reqwest client shares one connection
/// pool across all clones, so repositories can be created per call.
///
/// ## Usage in Dashboard Actions
/// ```rust,ignore
/// pub async fn load_order_items(
///     client: &ApiClient,
///     order_id: &str,
/// ) -> Result<Vec<OrderLineItem>, UiError> {
///     Ok(client.order_items().list(order_id).await?)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Builds the HTTP client.
    ///
    /// ## What This Does
    /// 1. Configures the shared reqwest client (timeout, pooling)
    /// 2. Stores the base URL and optional bearer token
    ///
    /// ## Returns
    /// * `Ok(ApiClient)` - Ready-to-use API handle
    /// * `Err(ClientError)` - TLS backend or builder failure
    pub fn new(config: ApiConfig) -> ClientResult<Self> {
        info!(base_url = %config.base_url, "Initializing API client");

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::ConnectionFailed(e.to_string()))?;

        Ok(ApiClient { http, config })
    }

    /// Builds an absolute URL from an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Sends a GET and decodes the JSON response.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.request_json(Method::GET, path, None::<&()>).await
    }

    /// Sends a POST with a JSON body and decodes the JSON response.
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.request_json(Method::POST, path, Some(body)).await
    }

    /// Sends a PATCH with a JSON body and decodes the JSON response.
    pub async fn patch_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.request_json(Method::PATCH, path, Some(body)).await
    }

    /// Sends a PUT with a JSON body, discarding the response body.
    ///
    /// The full-replacement item save ignores whatever the backend
    /// echoes: canonical post-save state always comes from the follow-up
    /// GET, so there is exactly one source of truth.
    pub async fn put_discard<B: Serialize>(&self, path: &str, body: &B) -> ClientResult<()> {
        let response = self
            .start(Method::PUT, path)
            .json(body)
            .send()
            .await
            .map_err(ClientError::from)?;
        Self::check_status(path, response).await?;
        Ok(())
    }

    /// Sends a DELETE, discarding the response body.
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let response = self
            .start(Method::DELETE, path)
            .send()
            .await
            .map_err(ClientError::from)?;
        Self::check_status(path, response).await?;
        Ok(())
    }

    /// Checks if the backend is reachable and healthy.
    ///
    /// ## Returns
    /// * `true` - Backend answered 2xx on its health route
    /// * `false` - Anything else
    pub async fn health_check(&self) -> bool {
        match self.http.get(self.url("/api/health")).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn start(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        debug!(method = %method, path = %path, "API request");

        let mut builder = self.http.request(method, self.url(path));
        if let Some(token) = &self.config.bearer_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn request_json<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<T> {
        let mut builder = self.start(method, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(ClientError::from)?;
        let response = Self::check_status(path, response).await?;

        response.json::<T>().await.map_err(ClientError::from)
    }

    /// Turns non-2xx responses into `ClientError::Api`, pulling the
    /// backend's `error` field out of the body verbatim when present.
    async fn check_status(
        path: &str,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });

        error!(path = %path, status = %status.as_u16(), message = %message, "API call failed");

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// True when an error is the backend's 404 answer, so repositories
    /// can re-wrap it with entity context.
    pub(crate) fn is_not_found(err: &ClientError) -> bool {
        matches!(
            err,
            ClientError::Api {
                status,
                ..
            } if *status == StatusCode::NOT_FOUND.as_u16()
        )
    }

    /// Returns the order-items repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let items = client.order_items().list(order_id).await?;
    /// ```
    pub fn order_items(&self) -> OrderItemsRepository {
        OrderItemsRepository::new(self.clone())
    }

    /// Returns the invoice repository.
    pub fn invoices(&self) -> InvoiceRepository {
        InvoiceRepository::new(self.clone())
    }

    /// Returns the customer repository.
    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.clone())
    }

    /// Returns the contract repository.
    pub fn contracts(&self) -> ContractRepository {
        ContractRepository::new(self.clone())
    }

    /// Returns the vendor repository.
    pub fn vendors(&self) -> VendorRepository {
        VendorRepository::new(self.clone())
    }

    /// Returns the order repository.
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_strips_trailing_slash() {
        let config = ApiConfig::new("https://billing.example.com/");
        assert_eq!(config.base_url, "https://billing.example.com");

        let config = ApiConfig::new("https://billing.example.com///");
        assert_eq!(config.base_url, "https://billing.example.com");
    }

    #[test]
    fn test_config_builder() {
        let config = ApiConfig::new("http://localhost:3000")
            .timeout(Duration::from_secs(5))
            .bearer_token("abc");

        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.bearer_token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_url_building() {
        let client = ApiClient::new(ApiConfig::new("http://localhost:3000/")).unwrap();
        assert_eq!(
            client.url("/api/orders/ord-1/items"),
            "http://localhost:3000/api/orders/ord-1/items"
        );
    }
}
