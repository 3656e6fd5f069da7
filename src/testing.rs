//! Test doubles shared by the unit tests.

use crate::images::{FetchError, FetchedImage, ImageFetcher};
use bytes::Bytes;
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;

/// In-memory fetcher. Unknown URLs fail with a 404.
#[derive(Debug, Default)]
pub(crate) struct StaticFetcher {
    images: HashMap<String, (Bytes, Option<String>)>,
    calls: Mutex<HashMap<String, usize>>,
}

impl StaticFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, url: &str, bytes: Vec<u8>, content_type: Option<&str>) -> Self {
        self.images.insert(
            url.to_string(),
            (Bytes::from(bytes), content_type.map(str::to_string)),
        );
        self
    }

    /// Number of times `url` was requested.
    pub(crate) fn calls(&self, url: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(url)
            .copied()
            .unwrap_or_default()
    }
}

impl ImageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError> {
        *self.calls.lock().unwrap().entry(url.to_string()).or_default() += 1;
        match self.images.get(url) {
            Some((bytes, content_type)) => Ok(FetchedImage {
                bytes: bytes.clone(),
                content_type: content_type.clone(),
            }),
            None => Err(FetchError::Status { status: 404 }),
        }
    }
}

/// Encode a blank RGB image of the given size as PNG.
pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    image::RgbImage::new(width, height)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}
