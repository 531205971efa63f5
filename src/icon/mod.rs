//! Icon data model and selection
//!
//! A [`DetectedIcon`] is one candidate found during a scan. Dimensions are the
//! ones declared by the source document, never measured.

mod select;

pub use select::{choose_icon, sort_icons};

use serde::Serialize;
use std::fmt;
use url::Url;

/// The convention an icon was discovered through
///
/// Declaration order is significant: among icons without known dimensions,
/// earlier variants are preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconType {
    /// `<link rel="shortcut icon">`
    Shortcut,
    /// `/favicon.ico` or a 16x16 PNG `<link rel="icon">`
    Classic,
    /// 96x96 PNG `<link rel="icon">`
    #[serde(rename = "google-tv")]
    GoogleTV,
    /// 192x192 or 196x196 PNG `<link rel="icon">`
    GoogleAndroidChrome,
    /// 32x32 PNG `<link rel="icon">`
    #[serde(rename = "apple-osx-safari-tab")]
    AppleOSXSafariTab,
    /// `<link rel="apple-touch-icon">`
    #[serde(rename = "apple-ios-web-clip")]
    AppleIOSWebClip,
    /// Microsoft tile images, from `<meta>` tags or browserconfig.xml
    MicrosoftPinnedSite,
    /// Icons listed in a Web App Manifest
    WebAppManifest,
    /// `<meta property="og:image">`
    OpenGraphImage,
}

impl IconType {
    /// Returns the kebab-case name of this icon type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shortcut => "shortcut",
            Self::Classic => "classic",
            Self::GoogleTV => "google-tv",
            Self::GoogleAndroidChrome => "google-android-chrome",
            Self::AppleOSXSafariTab => "apple-osx-safari-tab",
            Self::AppleIOSWebClip => "apple-ios-web-clip",
            Self::MicrosoftPinnedSite => "microsoft-pinned-site",
            Self::WebAppManifest => "web-app-manifest",
            Self::OpenGraphImage => "open-graph-image",
        }
    }
}

impl fmt::Display for IconType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared pixel size, used as a lookup key for the size tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconSize {
    pub width: u32,
    pub height: u32,
}

impl IconSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Area in square pixels
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl fmt::Display for IconSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A candidate icon discovered during a scan
///
/// The URL is always absolute. Width and height are either both known or
/// both unknown; the constructors make any other combination unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DetectedIcon {
    pub url: Url,
    #[serde(rename = "type")]
    pub icon_type: IconType,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl DetectedIcon {
    /// Creates an icon with no declared dimensions
    pub fn new(url: Url, icon_type: IconType) -> Self {
        Self {
            url,
            icon_type,
            width: None,
            height: None,
        }
    }

    /// Creates an icon with declared dimensions
    pub fn sized(url: Url, icon_type: IconType, size: IconSize) -> Self {
        Self {
            url,
            icon_type,
            width: Some(size.width),
            height: Some(size.height),
        }
    }

    /// Returns the declared size, if both dimensions are known
    pub fn size(&self) -> Option<IconSize> {
        match (self.width, self.height) {
            (Some(width), Some(height)) => Some(IconSize::new(width, height)),
            _ => None,
        }
    }

    /// Returns the declared area, if both dimensions are known
    pub fn area(&self) -> Option<u64> {
        self.size().map(|size| size.area())
    }
}

impl fmt::Display for DetectedIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.size() {
            Some(size) => write!(f, "{} [{}, {}]", self.url, self.icon_type, size),
            None => write!(f, "{} [{}]", self.url, self.icon_type),
        }
    }
}
