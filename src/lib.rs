//! favicon-scan: site icon discovery
//!
//! This crate finds every icon a website advertises (the classic `/favicon.ico`,
//! HTML `<link>`/`<meta>` conventions, Web App Manifests and Microsoft
//! browser-config documents) and picks the best one for a preferred size.

pub mod client;
pub mod config;
pub mod document;
pub mod download;
pub mod extract;
pub mod fetch;
pub mod icon;
pub mod scanner;

use thiserror::Error;

/// Main error type for favicon-scan operations
#[derive(Debug, Error)]
pub enum FaviconError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error("Not found")]
    NotFound,

    #[error("Server error: HTTP {0}")]
    ServerError(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Empty response")]
    EmptyResponse,

    #[error("Invalid text encoding: body is not valid {0}")]
    InvalidTextEncoding(String),

    #[error("Unsupported image format: {0}")]
    UnsupportedImageFormat(String),

    #[error("Corrupt image: {0}")]
    CorruptImage(String),

    #[error("No icons detected")]
    NoIconsDetected,

    #[error("Unexpected response shape for an icon download")]
    InvalidDownloadResponse,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for favicon-scan operations
pub type Result<T> = std::result::Result<T, FaviconError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use client::{download_all, download_preferred, scan, FaviconClient, IntoBaseUrl};
pub use config::Config;
pub use download::{DownloadResult, DownloadedIcon};
pub use icon::{choose_icon, sort_icons, DetectedIcon, IconSize, IconType};
