use crate::{create_client_without_probe, create_test_client, mount_get, png_bytes};
use favicon_scan::{DetectedIcon, FaviconError, IconType};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_sized_icons(mock_server: &MockServer) {
    mount_get(
        mock_server,
        "/",
        "text/html",
        r#"<html><head>
            <link rel="icon" type="image/png" sizes="16x16" href="/16.png">
            <link rel="icon" type="image/png" sizes="32x32" href="/32.png">
            <link rel="icon" type="image/png" sizes="192x192" href="/192.png">
        </head></html>"#,
    )
    .await;

    mount_get(mock_server, "/16.png", "image/png", png_bytes(16, 16)).await;
    mount_get(mock_server, "/32.png", "image/png", png_bytes(32, 32)).await;
    mount_get(mock_server, "/192.png", "image/png", png_bytes(192, 192)).await;
}

#[tokio::test]
async fn test_download_preferred_closest_size() {
    let mock_server = MockServer::start().await;
    mount_sized_icons(&mock_server).await;

    let downloaded = create_client_without_probe()
        .download_preferred(mock_server.uri(), Some(30), Some(30))
        .await
        .expect("Download failed");

    assert_eq!(downloaded.icon.url.path(), "/32.png");
    assert_eq!(downloaded.image.width(), 32);
    assert_eq!(downloaded.image.height(), 32);
}

#[tokio::test]
async fn test_download_preferred_largest_without_size() {
    let mock_server = MockServer::start().await;
    mount_sized_icons(&mock_server).await;

    let downloaded = create_client_without_probe()
        .download_preferred(mock_server.uri(), None, None)
        .await
        .expect("Download failed");

    assert_eq!(downloaded.icon.url.path(), "/192.png");
    assert_eq!(downloaded.image.width(), 192);
}

#[tokio::test]
async fn test_download_preferred_no_icons() {
    let mock_server = MockServer::start().await;

    mount_get(&mock_server, "/", "text/html", "<html><head></head></html>").await;

    let result = create_test_client()
        .download_preferred(mock_server.uri(), Some(64), Some(64))
        .await;

    assert!(matches!(result, Err(FaviconError::NoIconsDetected)));

    // Favicon probe, page, browserconfig probe; nothing downloaded
    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_download_all_reports_each_icon() {
    let mock_server = MockServer::start().await;

    mount_get(
        &mock_server,
        "/",
        "text/html",
        r#"<html><head>
            <link rel="icon" type="image/png" sizes="16x16" href="/16.png">
            <link rel="icon" type="image/png" sizes="96x96" href="/corrupt.png">
            <link rel="icon" type="image/png" sizes="192x192" href="/missing.png">
        </head></html>"#,
    )
    .await;
    mount_get(&mock_server, "/16.png", "image/png", png_bytes(16, 16)).await;
    mount_get(&mock_server, "/corrupt.png", "image/png", b"\x89PNG not really".to_vec()).await;

    let results = create_client_without_probe()
        .download_all(mock_server.uri())
        .await
        .expect("Scan failed");

    assert_eq!(results.len(), 3);

    assert!(results
        .iter()
        .any(|result| matches!(result, Ok(downloaded) if downloaded.icon.url.path() == "/16.png")));

    let errors: Vec<&FaviconError> = results.iter().filter_map(|r| r.as_ref().err()).collect();
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().any(|e| matches!(e, FaviconError::CorruptImage(_))));
    assert!(errors.iter().any(|e| matches!(e, FaviconError::NotFound)));
}

#[tokio::test]
async fn test_download_preserves_order() {
    let mock_server = MockServer::start().await;
    let base_url = Url::parse(&mock_server.uri()).unwrap();

    mount_get(&mock_server, "/a.png", "image/png", png_bytes(8, 8)).await;
    mount_get(&mock_server, "/b.ico", "application/octet-stream", png_bytes(4, 4)).await;
    mount_get(&mock_server, "/c.svg", "image/svg+xml", "<svg></svg>").await;
    mount_get(&mock_server, "/d.html", "text/html", "<html></html>").await;

    Mock::given(method("GET"))
        .and(path("/e.png"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let icons: Vec<DetectedIcon> = ["/a.png", "/b.ico", "/c.svg", "/d.html", "/e.png"]
        .iter()
        .map(|route| DetectedIcon::new(base_url.join(route).unwrap(), IconType::Classic))
        .collect();

    let results = create_test_client().download(&icons).await;

    assert_eq!(results.len(), 5);
    assert_eq!(results[0].as_ref().unwrap().image.width(), 8);
    assert_eq!(results[1].as_ref().unwrap().image.width(), 4);
    assert!(matches!(results[2], Err(FaviconError::UnsupportedImageFormat(_))));
    assert!(matches!(results[3], Err(FaviconError::InvalidDownloadResponse)));
    assert!(matches!(results[4], Err(FaviconError::ServerError(503))));
}
