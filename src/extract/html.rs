//! Icons declared in the HTML `<head>`
//!
//! # Link Rules
//!
//! | `rel` | Result |
//! |-------|--------|
//! | `shortcut icon` | one Shortcut icon, unsized |
//! | `icon` with `type="image/png"` | one icon per declared size found in the PNG size table, or one unsized Classic icon without `sizes` |
//! | `apple-touch-icon`, `apple-touch-icon-precomposed` | one AppleIOSWebClip icon per declared size, 60x60 without `sizes` |
//!
//! PNG sizes missing from the table are dropped rather than reported as Classic.
//!
//! # Meta Rules
//!
//! Microsoft tile names map to MicrosoftPinnedSite icons of a fixed size, and
//! `og:image` yields one unsized OpenGraphImage icon.

use super::{normalized, parse_icon_sizes, resolve_url};
use crate::document::{Document, Element, HtmlDocument};
use crate::icon::{DetectedIcon, IconSize, IconType};
use url::Url;

const APPLE_TOUCH_ICON_DEFAULT: IconSize = IconSize::new(60, 60);

const PNG_ICON_SIZES: &[(IconSize, IconType)] = &[
    (IconSize::new(16, 16), IconType::Classic),
    (IconSize::new(32, 32), IconType::AppleOSXSafariTab),
    (IconSize::new(96, 96), IconType::GoogleTV),
    (IconSize::new(192, 192), IconType::GoogleAndroidChrome),
    (IconSize::new(196, 196), IconType::GoogleAndroidChrome),
];

const MICROSOFT_META_SIZES: &[(&str, IconSize)] = &[
    ("msapplication-tileimage", IconSize::new(144, 144)),
    ("msapplication-square70x70logo", IconSize::new(70, 70)),
    ("msapplication-square150x150logo", IconSize::new(150, 150)),
    ("msapplication-wide310x150logo", IconSize::new(310, 150)),
    ("msapplication-square310x310logo", IconSize::new(310, 310)),
];

/// Extracts icons from `<link>` and `<meta>` tags in the document head
pub fn extract_html_icons(document: &HtmlDocument, base_url: &Url) -> Vec<DetectedIcon> {
    let mut icons = Vec::new();

    for link in document.query("/html/head/link") {
        extract_link(link, base_url, &mut icons);
    }

    for meta in document.query("/html/head/meta") {
        extract_meta(meta, base_url, &mut icons);
    }

    tracing::debug!("Found {} icons in HTML head of {}", icons.len(), base_url);
    icons
}

fn extract_link(link: &Element, base_url: &Url, icons: &mut Vec<DetectedIcon>) {
    let Some(rel) = link.attr("rel") else {
        return;
    };
    let Some(url) = link.attr("href").and_then(|href| resolve_url(base_url, href)) else {
        return;
    };

    match normalized(rel).as_str() {
        "shortcut icon" => icons.push(DetectedIcon::new(url, IconType::Shortcut)),
        "icon" => {
            let is_png = link
                .attr("type")
                .is_some_and(|mime| normalized(mime) == "image/png");
            if !is_png {
                return;
            }

            let sizes = link.attr("sizes").map(parse_icon_sizes).unwrap_or_default();
            if sizes.is_empty() {
                icons.push(DetectedIcon::new(url, IconType::Classic));
                return;
            }

            for size in sizes {
                if let Some(icon_type) = png_icon_type(size) {
                    icons.push(DetectedIcon::sized(url.clone(), icon_type, size));
                }
            }
        }
        "apple-touch-icon" | "apple-touch-icon-precomposed" => {
            let sizes = link.attr("sizes").map(parse_icon_sizes).unwrap_or_default();
            if sizes.is_empty() {
                icons.push(DetectedIcon::sized(
                    url,
                    IconType::AppleIOSWebClip,
                    APPLE_TOUCH_ICON_DEFAULT,
                ));
                return;
            }

            for size in sizes {
                icons.push(DetectedIcon::sized(url.clone(), IconType::AppleIOSWebClip, size));
            }
        }
        _ => {}
    }
}

fn extract_meta(meta: &Element, base_url: &Url, icons: &mut Vec<DetectedIcon>) {
    let Some(content) = meta.attr("content") else {
        return;
    };

    let is_open_graph = meta
        .attr("property")
        .or_else(|| meta.attr("name"))
        .is_some_and(|property| normalized(property) == "og:image");
    if is_open_graph {
        if let Some(url) = resolve_url(base_url, content) {
            icons.push(DetectedIcon::new(url, IconType::OpenGraphImage));
        }
        return;
    }

    let Some(name) = meta.attr("name").map(normalized) else {
        return;
    };
    let Some(size) = microsoft_tile_size(&name) else {
        return;
    };
    if let Some(url) = resolve_url(base_url, content) {
        icons.push(DetectedIcon::sized(url, IconType::MicrosoftPinnedSite, size));
    }
}

fn png_icon_type(size: IconSize) -> Option<IconType> {
    PNG_ICON_SIZES
        .iter()
        .find(|(known, _)| *known == size)
        .map(|(_, icon_type)| *icon_type)
}

fn microsoft_tile_size(name: &str) -> Option<IconSize> {
    MICROSOFT_META_SIZES
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, size)| *size)
}
