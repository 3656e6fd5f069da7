//! Image resolution: fetch, classify and measure every referenced image.

use super::fetch::ImageFetcher;
use super::format::ImageFormat;
use bytes::Bytes;
use log::{debug, warn};
use std::collections::{HashMap, HashSet};
use std::io::Cursor;

/// Dimensions used when an image cannot be decoded.
pub const FALLBACK_DIMENSIONS: (u32, u32) = (600, 400);

/// An image ready for embedding.
///
/// Lives for a single generation run.
#[derive(Debug, Clone)]
pub struct ResolvedImage {
    /// URL exactly as written in the source Markdown
    pub source_url: String,
    pub bytes: Bytes,
    pub format: ImageFormat,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

impl ResolvedImage {
    pub fn file_extension(&self) -> &'static str {
        self.format.extension()
    }
}

/// Resolved images keyed by source URL.
///
/// A URL that could not be fetched has no entry.
pub type ImageMap = HashMap<String, ResolvedImage>;

/// Fetch and measure each distinct URL, one at a time, in the given order.
///
/// `observe(index, total, url)` is called before each fetch so callers can
/// report progress. Fetch failures are logged and leave the URL out of the
/// returned map; decode failures fall back to `fallback` dimensions.
pub async fn resolve_images<F, O>(
    fetcher: &F,
    urls: &[String],
    fallback: (u32, u32),
    mut observe: O,
) -> ImageMap
where
    F: ImageFetcher,
    O: FnMut(usize, usize, &str),
{
    let mut images = ImageMap::with_capacity(urls.len());
    let mut attempted = HashSet::with_capacity(urls.len());
    let total = urls.len();

    for (index, url) in urls.iter().enumerate() {
        if !attempted.insert(url.as_str()) {
            continue;
        }
        observe(index, total, url);
        if let Some(image) = resolve_image(fetcher, url, fallback).await {
            images.insert(url.clone(), image);
        }
    }

    images
}

/// Fetch and measure a single image.
pub async fn resolve_image<F: ImageFetcher>(
    fetcher: &F,
    url: &str,
    fallback: (u32, u32),
) -> Option<ResolvedImage> {
    let fetched = match fetcher.fetch(url).await {
        Ok(fetched) => fetched,
        Err(e) => {
            warn!("failed to fetch image {url}: {e}");
            return None;
        },
    };

    let format = classify(url, fetched.content_type.as_deref(), &fetched.bytes);
    let (pixel_width, pixel_height) = probe_dimensions(&fetched.bytes).unwrap_or_else(|| {
        warn!(
            "could not decode image {url}, using {}x{}",
            fallback.0, fallback.1
        );
        fallback
    });
    debug!(
        "resolved image {url}: {} {pixel_width}x{pixel_height}, {} bytes",
        format.extension(),
        fetched.bytes.len()
    );

    Some(ResolvedImage {
        source_url: url.to_string(),
        bytes: fetched.bytes,
        format,
        pixel_width,
        pixel_height,
    })
}

/// Pick the embedded format: declared content type, then byte signature, then png.
fn classify(url: &str, content_type: Option<&str>, bytes: &[u8]) -> ImageFormat {
    content_type
        .and_then(ImageFormat::from_content_type)
        .or_else(|| ImageFormat::detect_from_bytes(bytes))
        .unwrap_or_else(|| {
            warn!("unrecognized image type for {url} ({content_type:?}), assuming png");
            ImageFormat::Png
        })
}

/// Read pixel dimensions from the image header.
///
/// Returns `None` when the data is not a decodable image or reports a zero size.
pub fn probe_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    let (width, height) = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()?;
    (width > 0 && height > 0).then_some((width, height))
}
