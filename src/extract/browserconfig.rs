//! Microsoft browser-config discovery and parsing

use super::{normalized, resolve_url};
use crate::document::{Document, HtmlDocument, XmlDocument};
use crate::icon::{DetectedIcon, IconSize, IconType};
use url::Url;

const TILE_SIZES: &[(&str, IconSize)] = &[
    ("tileimage", IconSize::new(144, 144)),
    ("square70x70logo", IconSize::new(70, 70)),
    ("square150x150logo", IconSize::new(150, 150)),
    ("wide310x150logo", IconSize::new(310, 150)),
    ("square310x310logo", IconSize::new(310, 310)),
];

/// Where the page says its browser-config document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserConfigLocation {
    /// `<meta name="msapplication-config" content="...">`
    Url(Url),
    /// `content="none"`: the site opted out
    Disabled,
    /// No `msapplication-config` meta tag
    Unspecified,
}

/// Reads the `msapplication-config` meta tag
///
/// The meta name is matched case-insensitively and the first tag wins. A tag
/// whose content cannot be resolved counts as unspecified.
pub fn extract_browser_config_url(document: &HtmlDocument, base_url: &Url) -> BrowserConfigLocation {
    let Some(content) = document
        .query("/html/head/meta")
        .into_iter()
        .filter(|meta| {
            meta.attr("name")
                .is_some_and(|name| normalized(name) == "msapplication-config")
        })
        .find_map(|meta| meta.attr("content"))
    else {
        return BrowserConfigLocation::Unspecified;
    };

    if content.trim().eq_ignore_ascii_case("none") {
        return BrowserConfigLocation::Disabled;
    }

    resolve_url(base_url, content)
        .map(BrowserConfigLocation::Url)
        .unwrap_or(BrowserConfigLocation::Unspecified)
}

/// Extracts tile images from a browserconfig.xml document
pub fn extract_browser_config_icons(document: &XmlDocument, base_url: &Url) -> Vec<DetectedIcon> {
    let icons: Vec<DetectedIcon> = document
        .query("/browserconfig/msapplication/tile/*")
        .into_iter()
        .filter_map(|tile| {
            let size = TILE_SIZES
                .iter()
                .find(|(name, _)| *name == tile.name)
                .map(|(_, size)| *size)?;
            let url = tile.attr("src").and_then(|src| resolve_url(base_url, src))?;
            Some(DetectedIcon::sized(url, IconType::MicrosoftPinnedSite, size))
        })
        .collect();

    tracing::debug!("Found {} icons in browser config {}", icons.len(), base_url);
    icons
}
