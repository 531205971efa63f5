//! HTTP fetching and response classification
//!
//! This module contains:
//! - The [`Transport`] seam over the raw HTTP client
//! - Content-Type parsing and strict body decoding
//! - The [`Fetcher`], which bounds concurrency and classifies responses

mod content_type;
mod transport;

pub use content_type::{parse_content_type, ContentType, TextEncoding};
pub use transport::{build_http_client, ReqwestTransport};

use crate::FaviconError;
use async_trait::async_trait;
use futures::future::join_all;
use reqwest::StatusCode;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Semaphore;
use url::Url;

/// HTTP methods the fetcher issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchMethod {
    Get,
    Head,
}

impl fmt::Display for FetchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Head => f.write_str("HEAD"),
        }
    }
}

/// A request handed to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub url: Url,
    pub method: FetchMethod,
}

/// A raw response from the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// Final URL after redirects
    pub url: Url,
    pub status: u16,
    /// Content-Type header value
    pub content_type: Option<String>,
    /// `None` when the response carried no body
    pub body: Option<Vec<u8>>,
}

/// Transport-level failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection refused, DNS failure, timeout, TLS error
    Network(String),
    /// A response arrived but could not be read
    InvalidResponse(String),
}

/// Performs raw HTTP requests
///
/// The default implementation is [`ReqwestTransport`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn perform(&self, request: TransportRequest)
        -> Result<TransportResponse, TransportError>;
}

/// Classified outcome of a single fetch
#[derive(Debug)]
pub enum FetchResult {
    /// Textual body, decoded with the response charset
    Text {
        value: String,
        mime_type: String,
        url: Url,
    },

    /// Any other body
    Binary {
        bytes: Vec<u8>,
        mime_type: String,
        url: Url,
    },

    /// Successful HEAD request
    Exists { url: Url },

    Error(FaviconError),
}

/// Issues requests through a transport with bounded concurrency
///
/// A fetcher is created per scan, so its semaphore bounds the requests in
/// flight for that scan only.
pub struct Fetcher {
    transport: Arc<dyn Transport>,
    permits: Semaphore,
}

impl Fetcher {
    /// Creates a fetcher allowing `max_concurrent` requests in flight
    pub fn new(transport: Arc<dyn Transport>, max_concurrent: usize) -> Self {
        Self {
            transport,
            permits: Semaphore::new(max_concurrent.max(1)),
        }
    }

    /// Fetches one URL and classifies the response
    pub async fn fetch(&self, url: &Url, method: FetchMethod) -> FetchResult {
        let response = {
            // The semaphore is never closed
            let _permit = self.permits.acquire().await.ok();
            self.transport
                .perform(TransportRequest {
                    url: url.clone(),
                    method,
                })
                .await
        };

        let result = classify(method, response);
        match &result {
            FetchResult::Error(e) => tracing::debug!("{} {} failed: {}", method, url, e),
            _ => tracing::debug!("{} {} ok", method, url),
        }
        result
    }

    /// Fetches several URLs concurrently, returning results in input order
    pub async fn fetch_all(&self, urls: &[Url], method: FetchMethod) -> Vec<FetchResult> {
        join_all(urls.iter().map(|url| self.fetch(url, method))).await
    }
}

/// Classifies a transport outcome
///
/// # Classification Rules
///
/// | Condition | Result |
/// |-----------|--------|
/// | Network error | `TransportFailure` |
/// | Unreadable response | `InvalidResponse` |
/// | HTTP 404 | `NotFound` |
/// | Other non-2xx | `ServerError(code)` |
/// | HEAD, 2xx | `Exists` |
/// | No body | `EmptyResponse` |
/// | Text mime type | `Text`, or `InvalidTextEncoding` if decoding fails |
/// | Anything else | `Binary` |
pub fn classify(
    method: FetchMethod,
    response: Result<TransportResponse, TransportError>,
) -> FetchResult {
    let response = match response {
        Ok(response) => response,
        Err(TransportError::Network(e)) => {
            return FetchResult::Error(FaviconError::TransportFailure(e))
        }
        Err(TransportError::InvalidResponse(e)) => {
            return FetchResult::Error(FaviconError::InvalidResponse(e))
        }
    };

    if response.status == StatusCode::NOT_FOUND.as_u16() {
        return FetchResult::Error(FaviconError::NotFound);
    }

    if !(200..=299).contains(&response.status) {
        return FetchResult::Error(FaviconError::ServerError(response.status));
    }

    if method == FetchMethod::Head {
        return FetchResult::Exists { url: response.url };
    }

    let Some(body) = response.body else {
        return FetchResult::Error(FaviconError::EmptyResponse);
    };

    let content_type = parse_content_type(response.content_type.as_deref().unwrap_or_default());

    if content_type.is_text() {
        match content_type.encoding.decode(&body) {
            Some(value) => FetchResult::Text {
                value,
                mime_type: content_type.mime_type,
                url: response.url,
            },
            None => FetchResult::Error(FaviconError::InvalidTextEncoding(
                content_type.encoding.name().to_string(),
            )),
        }
    } else {
        FetchResult::Binary {
            bytes: body,
            mime_type: content_type.mime_type,
            url: response.url,
        }
    }
}
