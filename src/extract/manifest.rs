//! Web App Manifest discovery and parsing

use super::{normalized, parse_icon_sizes, resolve_url};
use crate::document::{Document, HtmlDocument};
use crate::icon::{DetectedIcon, IconType};
use serde_json::Value;
use url::Url;

/// Returns the manifest URLs declared by `<link rel="manifest">`
///
/// `rel` is compared case-insensitively, ignoring surrounding whitespace.
pub fn extract_manifest_urls(document: &HtmlDocument, base_url: &Url) -> Vec<Url> {
    document
        .query("/html/head/link")
        .into_iter()
        .filter(|link| link.attr("rel").is_some_and(|rel| normalized(rel) == "manifest"))
        .filter_map(|link| link.attr("href"))
        .filter_map(|href| resolve_url(base_url, href))
        .collect()
}

/// Extracts PNG icons from a Web App Manifest
///
/// Entries without `type: "image/png"` or without a resolvable `src` are
/// skipped. Malformed JSON or a missing `icons` array yields no icons.
pub fn extract_manifest_icons(json: &str, base_url: &Url) -> Vec<DetectedIcon> {
    let manifest: Value = match serde_json::from_str(json) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("Ignoring malformed manifest at {}: {}", base_url, e);
            return Vec::new();
        }
    };

    let Some(entries) = manifest.get("icons").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut icons = Vec::new();
    for entry in entries {
        let is_png = entry
            .get("type")
            .and_then(Value::as_str)
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("image/png"));
        if !is_png {
            continue;
        }

        let Some(url) = entry
            .get("src")
            .and_then(Value::as_str)
            .and_then(|src| resolve_url(base_url, src))
        else {
            continue;
        };

        let sizes = entry
            .get("sizes")
            .and_then(Value::as_str)
            .map(parse_icon_sizes)
            .unwrap_or_default();

        if sizes.is_empty() {
            icons.push(DetectedIcon::new(url, IconType::WebAppManifest));
        } else {
            for size in sizes {
                icons.push(DetectedIcon::sized(url.clone(), IconType::WebAppManifest, size));
            }
        }
    }

    tracing::debug!("Found {} icons in manifest {}", icons.len(), base_url);
    icons
}
