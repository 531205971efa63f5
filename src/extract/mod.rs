//! Icon extractors
//!
//! Pure functions from a parsed document and its base URL to candidate icons.
//! None of them perform I/O, and none of them fail: anything they cannot make
//! sense of is skipped.
//!
//! | Source | Extractor |
//! |--------|-----------|
//! | HTML `<link>`/`<meta>` | [`extract_html_icons`] |
//! | HTML `<link rel="manifest">` | [`extract_manifest_urls`] |
//! | Web App Manifest JSON | [`extract_manifest_icons`] |
//! | HTML `msapplication-config` | [`extract_browser_config_url`] |
//! | browserconfig.xml | [`extract_browser_config_icons`] |

mod browserconfig;
mod html;
mod manifest;

pub use browserconfig::{extract_browser_config_icons, extract_browser_config_url, BrowserConfigLocation};
pub use html::extract_html_icons;
pub use manifest::{extract_manifest_icons, extract_manifest_urls};

use crate::icon::IconSize;
use url::Url;

/// Resolves a reference against the base URL
///
/// Absolute references come back unchanged; empty or unresolvable ones are
/// dropped.
pub fn resolve_url(base_url: &Url, reference: &str) -> Option<Url> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }

    base_url.join(reference).ok()
}

/// Trimmed, lowercased attribute value for keyword comparison
fn normalized(value: &str) -> String {
    value.trim().to_ascii_lowercase()
}

/// Parses a `sizes` attribute into declared sizes
///
/// Tokens are whitespace-separated `WxH` pairs, case-insensitive. `any` and
/// malformed tokens contribute nothing.
///
/// # Example
///
/// ```
/// use favicon_scan::extract::parse_icon_sizes;
/// use favicon_scan::IconSize;
///
/// assert_eq!(
///     parse_icon_sizes("16x16 32X32 any"),
///     vec![IconSize::new(16, 16), IconSize::new(32, 32)]
/// );
/// ```
pub fn parse_icon_sizes(sizes: &str) -> Vec<IconSize> {
    sizes
        .split_whitespace()
        .filter(|token| !token.eq_ignore_ascii_case("any"))
        .filter_map(|token| {
            let token = token.to_ascii_lowercase();
            let (width, height) = token.split_once('x')?;
            Some(IconSize::new(width.parse().ok()?, height.parse().ok()?))
        })
        .collect()
}
