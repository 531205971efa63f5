//! reqwest-backed transport
//!
//! Redirects are followed by the client, so the response URL is the final
//! URL and relative references resolve against the page actually served.

use super::{FetchMethod, Transport, TransportError, TransportRequest, TransportResponse};
use crate::config::{HttpConfig, UserAgentConfig};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client, Method};
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `http` - Timeouts and redirect limit
/// * `user_agent` - The user agent identification
///
/// # Example
///
/// ```no_run
/// use favicon_scan::config::{HttpConfig, UserAgentConfig};
/// use favicon_scan::fetch::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default(), &UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    http: &HttpConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(http.request_timeout_secs))
        .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
        .redirect(Policy::limited(http.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`Transport`] over a reqwest [`Client`]
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a transport from configuration
    pub fn from_config(
        http: &HttpConfig,
        user_agent: &UserAgentConfig,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(http, user_agent)?))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn perform(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        let method = match request.method {
            FetchMethod::Get => Method::GET,
            FetchMethod::Head => Method::HEAD,
        };

        let response = self
            .client
            .request(method, request.url)
            .send()
            .await
            .map_err(classify_error)?;

        let url = response.url().clone();
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.bytes().await.map_err(classify_error)?;

        Ok(TransportResponse {
            url,
            status,
            content_type,
            body: (!body.is_empty()).then(|| body.to_vec()),
        })
    }
}

fn classify_error(e: reqwest::Error) -> TransportError {
    if e.is_body() || e.is_decode() {
        TransportError::InvalidResponse(e.to_string())
    } else if e.is_timeout() {
        TransportError::Network("Request timeout".to_string())
    } else if e.is_connect() {
        TransportError::Network("Connection refused".to_string())
    } else {
        TransportError::Network(e.to_string())
    }
}
