//! HTTP transport for exchanges
//!
//! [`Transport`] is the seam between the session client and the network so
//! that tests can script responses and control their ordering.

use crate::{Error, Result, config::Settings};
use reqwest::{Client, Proxy, header};
use url::Url;

/// Content type of every exchange body
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// Header carrying the cross-site request forgery token
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Raw answer of a transport, before any protocol interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl TransportResponse {
    /// Create a new transport response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Trait for posting JSON bodies to enable testing with mocks
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` as JSON to `url`
    ///
    /// Returns `Err` only when no HTTP response was received at all.
    async fn post_json(&self, url: &Url, body: &serde_json::Value) -> Result<TransportResponse>;
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn post_json(&self, url: &Url, body: &serde_json::Value) -> Result<TransportResponse> {
        (**self).post_json(url, body).await
    }
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// HTTP client
    client: Client,
    /// Value of the CSRF header, omitted when `None`
    csrf_token: Option<String>,
}

impl HttpTransport {
    /// Create a transport from settings
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut client_builder = Client::builder()
            .user_agent(settings.network.user_agent.as_str())
            .connect_timeout(settings.network.connect_timeout())
            .timeout(settings.network.request_timeout());

        if let Some(proxy_url) = settings.get_proxy_url() {
            let proxy = Proxy::all(&proxy_url).map_err(|e| {
                Error::config("proxy", &format!("Invalid proxy URL '{}': {}", proxy_url, e))
            })?;
            client_builder = client_builder.proxy(proxy);
        }

        if settings.network.disable_tls_verification {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build()?;

        Ok(Self::with_client(client, settings.client.csrf_token.clone()))
    }

    /// Create a transport around an existing client
    pub fn with_client(client: Client, csrf_token: Option<String>) -> Self {
        Self { client, csrf_token }
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &Url, body: &serde_json::Value) -> Result<TransportResponse> {
        let mut request = self
            .client
            .post(url.clone())
            .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(serde_json::to_vec(body)?);

        if let Some(csrf_token) = &self.csrf_token {
            request = request.header(CSRF_HEADER, csrf_token);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("Failed to send request to MOTD server: {}", e);
            Error::Http(e)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(TransportResponse { status, body })
    }
}
