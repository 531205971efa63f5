//! Icon downloading and decoding
//!
//! One `GET` per icon, run concurrently under the fetcher's limit. Results
//! line up with the input: a failed icon never affects its neighbours.

use crate::fetch::{FetchMethod, FetchResult, Fetcher};
use crate::icon::DetectedIcon;
use crate::FaviconError;
use image::{DynamicImage, ImageFormat};

/// A downloaded and decoded icon
#[derive(Debug, Clone)]
pub struct DownloadedIcon {
    pub icon: DetectedIcon,
    pub image: DynamicImage,
}

/// Outcome of downloading one icon
pub type DownloadResult = Result<DownloadedIcon, FaviconError>;

/// Downloads and decodes every icon, preserving input order
pub async fn download(fetcher: &Fetcher, icons: &[DetectedIcon]) -> Vec<DownloadResult> {
    let urls: Vec<_> = icons.iter().map(|icon| icon.url.clone()).collect();
    let results = fetcher.fetch_all(&urls, FetchMethod::Get).await;

    icons
        .iter()
        .zip(results)
        .map(|(icon, result)| {
            let outcome = match result {
                FetchResult::Binary {
                    bytes, mime_type, ..
                } => decode_image(&bytes, &mime_type),
                FetchResult::Error(e) => Err(e),
                FetchResult::Text { .. } | FetchResult::Exists { .. } => {
                    Err(FaviconError::InvalidDownloadResponse)
                }
            };

            if let Err(e) = &outcome {
                tracing::debug!("Download of {} failed: {}", icon.url, e);
            }

            outcome.map(|image| DownloadedIcon {
                icon: icon.clone(),
                image,
            })
        })
        .collect()
}

/// Decodes image bytes according to their declared mime type
///
/// Supported types are PNG, JPEG and ICO. Any other declared type is sniffed
/// from the leading bytes, since `.ico` files are often served as
/// `application/octet-stream`.
pub fn decode_image(bytes: &[u8], mime_type: &str) -> Result<DynamicImage, FaviconError> {
    let format = match format_for_mime(mime_type) {
        Some(format) => format,
        None => image::guess_format(bytes)
            .ok()
            .filter(is_supported)
            .ok_or_else(|| FaviconError::UnsupportedImageFormat(mime_type.to_string()))?,
    };

    image::load_from_memory_with_format(bytes, format)
        .map_err(|e| FaviconError::CorruptImage(e.to_string()))
}

fn format_for_mime(mime_type: &str) -> Option<ImageFormat> {
    match mime_type.trim().to_ascii_lowercase().as_str() {
        "image/png" => Some(ImageFormat::Png),
        "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
        "image/x-icon" | "image/vnd.microsoft.icon" => Some(ImageFormat::Ico),
        _ => None,
    }
}

fn is_supported(format: &ImageFormat) -> bool {
    matches!(format, ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Ico)
}
