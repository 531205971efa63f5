//! High-level API
//!
//! [`FaviconClient`] ties the pipeline together: scan a site, pick the best
//! icon, download what was found. The free functions at the bottom use a
//! client with the default configuration.

use crate::config::{Config, ScannerConfig};
use crate::download::{download, DownloadResult};
use crate::fetch::{ReqwestTransport, Transport};
use crate::icon::{choose_icon, DetectedIcon};
use crate::scanner::Scanner;
use crate::{FaviconError, Result};
use std::sync::Arc;
use url::Url;

/// Conversion into a base URL to scan
///
/// Strings are parsed before any request is made; a string that is not a
/// URL fails with [`FaviconError::InvalidBaseUrl`].
pub trait IntoBaseUrl {
    fn into_base_url(self) -> Result<Url>;
}

impl IntoBaseUrl for Url {
    fn into_base_url(self) -> Result<Url> {
        Ok(self)
    }
}

impl IntoBaseUrl for &Url {
    fn into_base_url(self) -> Result<Url> {
        Ok(self.clone())
    }
}

impl IntoBaseUrl for &str {
    fn into_base_url(self) -> Result<Url> {
        Url::parse(self.trim()).map_err(|e| FaviconError::InvalidBaseUrl(format!("{}: {}", self, e)))
    }
}

impl IntoBaseUrl for String {
    fn into_base_url(self) -> Result<Url> {
        self.as_str().into_base_url()
    }
}

impl IntoBaseUrl for &String {
    fn into_base_url(self) -> Result<Url> {
        self.as_str().into_base_url()
    }
}

/// Scans sites for icons and downloads them
///
/// # Example
///
/// ```no_run
/// use favicon_scan::{Config, FaviconClient};
///
/// # async fn example() -> favicon_scan::Result<()> {
/// let client = FaviconClient::new(Config::default())?;
/// let icons = client.scan("https://www.rust-lang.org").await?;
/// for icon in &icons {
///     println!("{}", icon);
/// }
///
/// let preferred = client.download_preferred("https://www.rust-lang.org", Some(64), Some(64)).await?;
/// println!("{}x{}", preferred.image.width(), preferred.image.height());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FaviconClient {
    scanner: Scanner,
}

impl FaviconClient {
    /// Creates a client over reqwest from configuration
    pub fn new(config: Config) -> Result<Self> {
        let transport = ReqwestTransport::from_config(&config.http, &config.user_agent)?;
        Ok(Self::with_transport(Arc::new(transport), config.scanner))
    }

    /// Creates a client over any transport
    pub fn with_transport(transport: Arc<dyn Transport>, config: ScannerConfig) -> Self {
        Self {
            scanner: Scanner::new(transport, config),
        }
    }

    /// Finds every icon the site advertises
    ///
    /// Sources that fail are skipped, so an unreachable site yields an empty
    /// list rather than an error.
    pub async fn scan(&self, url: impl IntoBaseUrl) -> Result<Vec<DetectedIcon>> {
        let base_url = url.into_base_url()?;
        Ok(self.scanner.scan(&base_url).await)
    }

    /// Downloads and decodes the given icons, preserving order
    pub async fn download(&self, icons: &[DetectedIcon]) -> Vec<DownloadResult> {
        download(&self.scanner.fetcher(), icons).await
    }

    /// Scans the site, then downloads every icon found
    pub async fn download_all(&self, url: impl IntoBaseUrl) -> Result<Vec<DownloadResult>> {
        let icons = self.scan(url).await?;
        Ok(self.download(&icons).await)
    }

    /// Scans the site and downloads the icon closest to the preferred size
    ///
    /// Without a full preferred size the largest declared icon wins. Fails
    /// with [`FaviconError::NoIconsDetected`] when the scan finds nothing.
    pub async fn download_preferred(
        &self,
        url: impl IntoBaseUrl,
        width: Option<u32>,
        height: Option<u32>,
    ) -> DownloadResult {
        let icons = self.scan(url).await?;
        let chosen = choose_icon(&icons, width, height).ok_or(FaviconError::NoIconsDetected)?;
        tracing::debug!("Preferred icon: {}", chosen);

        self.download(std::slice::from_ref(chosen))
            .await
            .into_iter()
            .next()
            .unwrap_or(Err(FaviconError::InvalidDownloadResponse))
    }
}

/// Scans a site with the default configuration
pub async fn scan(url: impl IntoBaseUrl) -> Result<Vec<DetectedIcon>> {
    let base_url = url.into_base_url()?;
    FaviconClient::new(Config::default())?.scan(base_url).await
}

/// Scans a site and downloads every icon, with the default configuration
pub async fn download_all(url: impl IntoBaseUrl) -> Result<Vec<DownloadResult>> {
    let base_url = url.into_base_url()?;
    FaviconClient::new(Config::default())?.download_all(base_url).await
}

/// Downloads the preferred icon of a site, with the default configuration
pub async fn download_preferred(
    url: impl IntoBaseUrl,
    width: Option<u32>,
    height: Option<u32>,
) -> DownloadResult {
    let base_url = url.into_base_url()?;
    FaviconClient::new(Config::default())?
        .download_preferred(base_url, width, height)
        .await
}
