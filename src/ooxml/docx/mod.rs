//! Word (.docx) document generation.
//!
//! - `writer`: body XML for blocks (paragraphs, runs, drawings) and image relationships
//! - `package`: renders every part and assembles the container
//!
//! # Example
//!
//! ```rust
//! use markdocx::export::DocxOptions;
//! use markdocx::images::ImageMap;
//! use markdocx::markdown::parse_blocks;
//! use markdocx::ooxml::docx::package::to_docx_bytes;
//!
//! let blocks = parse_blocks("# Report\n\nAll **good**.\n");
//! let bytes = to_docx_bytes(&blocks, &ImageMap::new(), &DocxOptions::default())?;
//! assert!(bytes.starts_with(b"PK"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod package;
pub mod writer;

pub use package::{DocxParts, assemble, build_parts, to_docx_bytes};
