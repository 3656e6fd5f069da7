// Image resolution for embedded pictures
//
// Every image URL referenced by the document is fetched once, classified
// (PNG, JPEG, GIF or BMP) and measured before any XML is generated.
//
// # Architecture
//
// - `fetch`: the `ImageFetcher` seam and the HTTP implementation
// - `format`: format classification from content type or byte signature
// - `resolver`: sequential fetch-and-measure pass producing an `ImageMap`

pub mod fetch;
pub mod format;
pub mod resolver;

#[cfg(feature = "http")]
pub use fetch::HttpImageFetcher;
pub use fetch::{FetchError, FetchedImage, ImageFetcher};
pub use format::ImageFormat;
pub use resolver::{
    FALLBACK_DIMENSIONS, ImageMap, ResolvedImage, probe_dimensions, resolve_image, resolve_images,
};
