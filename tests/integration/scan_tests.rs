use crate::{create_client_without_probe, create_test_client, mount_get, mount_head};
use favicon_scan::{DetectedIcon, FaviconError, IconSize, IconType};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn find<'a>(icons: &'a [DetectedIcon], route: &str) -> &'a DetectedIcon {
    icons
        .iter()
        .find(|icon| icon.url.path() == route)
        .unwrap_or_else(|| panic!("no icon for {}", route))
}

#[tokio::test]
async fn test_full_scan() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_head(&mock_server, "/favicon.ico").await;

    mount_get(
        &mock_server,
        "/",
        "text/html; charset=utf-8",
        r#"<!DOCTYPE html>
        <html><head>
            <title>Home</title>
            <link rel="shortcut icon" href="/shortcut.ico">
            <link rel="icon" type="image/png" sizes="16x16" href="/favicon-16x16.png">
            <link rel="icon" type="image/png" sizes="32x32" href="/favicon-32x32.png">
            <link rel="apple-touch-icon" sizes="180x180" href="/apple-touch-icon.png">
            <link rel="manifest" href="/site.webmanifest">
            <meta name="msapplication-config" content="/browserconfig.xml">
            <meta name="msapplication-TileImage" content="/mstile-144x144.png">
            <meta property="og:image" content="/og.png">
        </head><body><h1>Hello</h1></body></html>"#,
    )
    .await;

    mount_get(
        &mock_server,
        "/site.webmanifest",
        "application/manifest+json",
        r#"{
            "name": "Test",
            "icons": [
                { "src": "/android-chrome-192x192.png", "sizes": "192x192", "type": "image/png" },
                { "src": "/android-chrome-512x512.png", "sizes": "512x512", "type": "image/png" }
            ]
        }"#,
    )
    .await;

    mount_get(
        &mock_server,
        "/browserconfig.xml",
        "application/xml",
        r#"<?xml version="1.0" encoding="utf-8"?>
        <browserconfig><msapplication><tile>
            <square150x150logo src="/mstile-150x150.png"/>
            <TileColor>#da532c</TileColor>
        </tile></msapplication></browserconfig>"#,
    )
    .await;

    let icons = create_test_client()
        .scan(format!("{}/", base_url))
        .await
        .expect("Scan failed");

    assert_eq!(icons.len(), 10);
    assert!(icons.iter().all(|icon| icon.url.as_str().starts_with(&base_url)));

    assert_eq!(find(&icons, "/favicon.ico").icon_type, IconType::Classic);
    assert_eq!(find(&icons, "/shortcut.ico").icon_type, IconType::Shortcut);
    assert_eq!(find(&icons, "/favicon-16x16.png").icon_type, IconType::Classic);
    assert_eq!(
        find(&icons, "/favicon-32x32.png").icon_type,
        IconType::AppleOSXSafariTab
    );
    assert_eq!(
        find(&icons, "/apple-touch-icon.png").size(),
        Some(IconSize::new(180, 180))
    );
    assert_eq!(
        find(&icons, "/android-chrome-512x512.png").icon_type,
        IconType::WebAppManifest
    );
    assert_eq!(
        find(&icons, "/mstile-150x150.png").icon_type,
        IconType::MicrosoftPinnedSite
    );
    assert_eq!(
        find(&icons, "/mstile-144x144.png").size(),
        Some(IconSize::new(144, 144))
    );
    assert_eq!(find(&icons, "/og.png").icon_type, IconType::OpenGraphImage);
}

#[tokio::test]
async fn test_scan_empty_site() {
    let mock_server = MockServer::start().await;

    let icons = create_test_client()
        .scan(mock_server.uri())
        .await
        .expect("Scan failed");

    assert!(icons.is_empty());
}

#[tokio::test]
async fn test_scan_favicon_only() {
    let mock_server = MockServer::start().await;
    mount_head(&mock_server, "/favicon.ico").await;

    let icons = create_test_client()
        .scan(mock_server.uri())
        .await
        .expect("Scan failed");

    assert_eq!(icons.len(), 1);
    assert_eq!(icons[0].url.path(), "/favicon.ico");
    assert_eq!(icons[0].icon_type, IconType::Classic);
    assert_eq!(icons[0].size(), None);
}

#[tokio::test]
async fn test_scan_survives_broken_sources() {
    let mock_server = MockServer::start().await;

    mount_get(
        &mock_server,
        "/",
        "text/html",
        r#"<html><head>
            <link rel="shortcut icon" href="/shortcut.ico">
            <link rel="manifest" href="/missing.json">
            <link rel="manifest" href="/broken.json">
        </head></html>"#,
    )
    .await;
    mount_get(&mock_server, "/broken.json", "application/json", "{ \"icons\": [").await;

    Mock::given(method("GET"))
        .and(path("/browserconfig.xml"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let icons = create_test_client()
        .scan(mock_server.uri())
        .await
        .expect("Scan failed");

    assert_eq!(icons.len(), 1);
    assert_eq!(icons[0].url.path(), "/shortcut.ico");
}

#[tokio::test]
async fn test_scan_follows_redirects() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/home/", base_url).as_str()),
        )
        .mount(&mock_server)
        .await;

    mount_get(
        &mock_server,
        "/home/",
        "text/html",
        r#"<html><head><link rel="shortcut icon" href="icon.ico"></head></html>"#,
    )
    .await;

    let icons = create_client_without_probe()
        .scan(base_url.as_str())
        .await
        .expect("Scan failed");

    assert_eq!(icons.len(), 1);
    // Relative to the page that was actually served
    assert_eq!(icons[0].url.path(), "/home/icon.ico");
}

#[tokio::test]
async fn test_scan_skips_non_html_page() {
    let mock_server = MockServer::start().await;

    mount_get(
        &mock_server,
        "/",
        "application/octet-stream",
        r#"<html><head><link rel="shortcut icon" href="/shortcut.ico"></head></html>"#,
    )
    .await;

    let icons = create_test_client()
        .scan(mock_server.uri())
        .await
        .expect("Scan failed");

    assert!(icons.is_empty());
}

#[tokio::test]
async fn test_browser_config_opt_out_is_not_fetched() {
    let mock_server = MockServer::start().await;

    mount_get(
        &mock_server,
        "/",
        "text/html",
        r#"<html><head><meta name="msapplication-config" content="none"></head></html>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/browserconfig.xml"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let icons = create_test_client()
        .scan(mock_server.uri())
        .await
        .expect("Scan failed");

    assert!(icons.is_empty());
}

#[tokio::test]
async fn test_scan_invalid_base_url() {
    let result = create_test_client().scan("not a url").await;
    assert!(matches!(result, Err(FaviconError::InvalidBaseUrl(_))));
}
