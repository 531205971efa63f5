//! Icon discovery across all sources
//!
//! A scan runs in two waves:
//!
//! 1. `HEAD /favicon.ico` and `GET` of the page itself, concurrently
//! 2. `GET` of every manifest and of the browser-config document the page
//!    declares, concurrently, once the page has been parsed
//!
//! Every source reports its icons over one channel to a single aggregator.
//! A source that fails (404, bad encoding, non-HTML page, network error)
//! contributes nothing; it never fails the scan.

use crate::config::ScannerConfig;
use crate::document::{HtmlDocument, XmlDocument};
use crate::extract::{
    extract_browser_config_icons, extract_browser_config_url, extract_html_icons,
    extract_manifest_icons, extract_manifest_urls, BrowserConfigLocation,
};
use crate::fetch::{FetchMethod, FetchResult, Fetcher, Transport};
use crate::icon::{DetectedIcon, IconType};
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedSender};
use url::Url;

const FAVICON_PATH: &str = "/favicon.ico";
const DEFAULT_BROWSER_CONFIG_PATH: &str = "/browserconfig.xml";

/// Discovers icon candidates for a site
#[derive(Clone)]
pub struct Scanner {
    transport: Arc<dyn Transport>,
    config: ScannerConfig,
}

impl Scanner {
    pub fn new(transport: Arc<dyn Transport>, config: ScannerConfig) -> Self {
        Self { transport, config }
    }

    /// Creates a fetcher for one scan or download batch
    pub fn fetcher(&self) -> Fetcher {
        Fetcher::new(self.transport.clone(), self.config.max_concurrent_requests)
    }

    /// Scans a site for icons
    ///
    /// Order of the returned icons is not significant. Each URL is requested
    /// at most once and never retried.
    pub async fn scan(&self, base_url: &Url) -> Vec<DetectedIcon> {
        let fetcher = self.fetcher();
        let (sender, mut receiver) = mpsc::unbounded_channel::<Vec<DetectedIcon>>();

        // Wave 1
        let favicon_url = base_url.join(FAVICON_PATH).ok();
        let (favicon, page) = tokio::join!(
            async {
                match &favicon_url {
                    Some(url) => Some(fetcher.fetch(url, FetchMethod::Head).await),
                    None => None,
                }
            },
            fetcher.fetch(base_url, FetchMethod::Get)
        );

        if let Some(FetchResult::Exists { url }) = favicon {
            send(&sender, vec![DetectedIcon::new(url, IconType::Classic)]);
        }

        // Wave 2
        if let Some(followups) = self.scan_page(page, &sender) {
            let manifests = followups.manifests.iter().map(|url| {
                let sender = sender.clone();
                let fetcher = &fetcher;
                async move {
                    if let FetchResult::Text { value, url, .. } =
                        fetcher.fetch(url, FetchMethod::Get).await
                    {
                        send(&sender, extract_manifest_icons(&value, &url));
                    }
                }
            });

            let browser_config = async {
                let Some(url) = &followups.browser_config else {
                    return;
                };
                if let FetchResult::Text { value, url, .. } =
                    fetcher.fetch(url, FetchMethod::Get).await
                {
                    let document = XmlDocument::parse(&value);
                    send(&sender, extract_browser_config_icons(&document, &url));
                }
            };

            tokio::join!(join_all(manifests), browser_config);
        }

        drop(sender);

        let mut icons = Vec::new();
        while let Some(batch) = receiver.recv().await {
            icons.extend(batch);
        }

        tracing::info!("Scan of {} found {} icons", base_url, icons.len());
        icons
    }

    /// Extracts icons from the page and decides which documents to fetch next
    fn scan_page(
        &self,
        page: FetchResult,
        sender: &UnboundedSender<Vec<DetectedIcon>>,
    ) -> Option<Followups> {
        let (html, page_url) = match page {
            FetchResult::Text {
                value,
                mime_type,
                url,
            } if mime_type == "text/html" => (value, url),
            FetchResult::Text { mime_type, url, .. } | FetchResult::Binary { mime_type, url, .. } => {
                tracing::debug!("Skipping {}: content type {:?} is not HTML", url, mime_type);
                return None;
            }
            FetchResult::Exists { .. } => return None,
            FetchResult::Error(e) => {
                tracing::debug!("Page fetch failed: {}", e);
                return None;
            }
        };

        let document = HtmlDocument::parse(&html);
        send(sender, extract_html_icons(&document, &page_url));

        let mut seen = HashSet::new();
        let manifests: Vec<Url> = extract_manifest_urls(&document, &page_url)
            .into_iter()
            .filter(|url| seen.insert(url.clone()))
            .collect();

        let browser_config = match extract_browser_config_url(&document, &page_url) {
            BrowserConfigLocation::Url(url) => Some(url),
            BrowserConfigLocation::Disabled => None,
            BrowserConfigLocation::Unspecified if self.config.probe_default_browser_config => {
                page_url.join(DEFAULT_BROWSER_CONFIG_PATH).ok()
            }
            BrowserConfigLocation::Unspecified => None,
        }
        .filter(|url| !seen.contains(url));

        Some(Followups {
            manifests,
            browser_config,
        })
    }
}

/// Documents referenced by the page, each listed once
struct Followups {
    manifests: Vec<Url>,
    browser_config: Option<Url>,
}

fn send(sender: &UnboundedSender<Vec<DetectedIcon>>, icons: Vec<DetectedIcon>) {
    if icons.is_empty() {
        return;
    }
    // The receiver outlives every sender within a scan
    let _ = sender.send(icons);
}
