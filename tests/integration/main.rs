//! Integration tests for favicon-scan
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! scan and download paths end-to-end over real HTTP.

mod download_tests;
mod scan_tests;

use favicon_scan::config::ScannerConfig;
use favicon_scan::{Config, FaviconClient};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba};
use std::io::Cursor;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a client with default settings over reqwest
pub fn create_test_client() -> FaviconClient {
    FaviconClient::new(Config::default()).expect("Failed to build client")
}

/// Creates a client that does not probe /browserconfig.xml
pub fn create_client_without_probe() -> FaviconClient {
    let mut config = Config::default();
    config.scanner = ScannerConfig {
        probe_default_browser_config: false,
        ..ScannerConfig::default()
    };
    FaviconClient::new(config).expect("Failed to build client")
}

/// Encodes a solid PNG of the given size
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = ImageBuffer::from_pixel(width, height, Rgba([0u8, 128, 255, 255]));
    let mut buffer = Vec::new();
    DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .expect("Failed to encode PNG");
    buffer
}

/// Mounts a GET route serving `body` with the given content type
pub async fn mount_get(server: &MockServer, route: &str, content_type: &str, body: impl Into<Vec<u8>>) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, content_type))
        .mount(server)
        .await;
}

/// Mounts a successful HEAD route
pub async fn mount_head(server: &MockServer, route: &str) {
    Mock::given(method("HEAD"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "image/x-icon"))
        .mount(server)
        .await;
}
