//! markdocx - Markdown to Word (`.docx`) synthesis
//!
//! The crate converts a practical subset of Markdown into a WordprocessingML
//! package without any template files: every XML part is generated from the
//! parsed document.
//!
//! # Pipeline
//!
//! 1. [`markdown`] parses the text into a flat sequence of blocks
//! 2. [`images`] fetches and measures every referenced image
//! 3. [`ooxml`] renders `word/document.xml` and its relationships
//! 4. the package parts are written into a zip archive
//! 5. [`export`] drives the run, reports progress and saves the result
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "http")]
//! # async fn demo() -> markdocx::Result<()> {
//! use markdocx::export::{DirectoryOutput, WordGenerator};
//! use markdocx::images::HttpImageFetcher;
//!
//! let generator = WordGenerator::new(HttpImageFetcher::new());
//! let mut output = DirectoryOutput::new("out");
//! generator
//!     .generate(
//!         "# Report\n\n![chart](https://example.com/chart.png)\n",
//!         "report.docx",
//!         &mut |update: &markdocx::export::ProgressUpdate| println!("{update}"),
//!         &mut output,
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Images that cannot be fetched never abort a run; they are replaced by a
//! visible placeholder paragraph.

pub mod common;
pub mod error;
pub mod export;
pub mod images;
pub mod markdown;
pub mod ooxml;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Error, Result};
