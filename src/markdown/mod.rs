//! Markdown subset parsing for DOCX synthesis.
//!
//! This module turns a Markdown string into a flat sequence of typed [`Block`]s,
//! which is the intermediate form consumed by the DOCX writer. It deliberately
//! supports only the subset the document generator can render:
//!
//! - ATX headings (`#` .. `######`)
//! - Paragraphs with inline **bold**, *italic*, `code` and `[links](url)`
//! - Unordered (`-`, `*`) and ordered (`1.`) list runs
//! - Block quotes (`> `), fenced code blocks and horizontal rules
//! - Full-line images (`![alt](url)`)
//!
//! # Quick Start
//!
//! ```rust
//! use markdocx::markdown::{Block, parse_blocks};
//!
//! let blocks = parse_blocks("# Title\n\nHello **world**.\n");
//! assert!(matches!(blocks[0], Block::Heading { level: 1, .. }));
//! assert_eq!(blocks.len(), 2);
//! ```
//!
//! # Degradation
//!
//! Parsing never fails. Unterminated inline markers are kept as literal text and
//! an unterminated code fence runs to the end of the document.

pub mod block;
pub mod inline;

pub use block::{BlockParser, parse_blocks};
pub use inline::parse_inline;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A run of inline text sharing one set of style flags.
///
/// Flags combine freely (bold and italic together is legal). A span with a
/// `link` renders as link-styled text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub code: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Span {
    /// Create an unstyled span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Create a bold span.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            ..Self::default()
        }
    }

    /// Create an italic span.
    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            italic: true,
            ..Self::default()
        }
    }

    /// Create an inline-code span.
    pub fn code(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            code: true,
            ..Self::default()
        }
    }

    /// Create a link span whose visible text is `text`.
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: Some(url.into()),
            ..Self::default()
        }
    }

    /// Whether the span carries no style at all.
    pub fn is_plain(&self) -> bool {
        !self.bold && !self.italic && !self.code && self.link.is_none()
    }
}

/// A block-level element of the parsed document.
///
/// Blocks are produced in document order and never reference each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Block {
    /// ATX heading; `level` is 1..=6. The text is not inline-parsed.
    Heading { level: u8, text: String },
    Paragraph { spans: Vec<Span> },
    /// Unordered list; one span sequence per item.
    List { items: Vec<Vec<Span>> },
    OrderedList { items: Vec<Vec<Span>> },
    /// Consecutive quote lines joined with a single space.
    BlockQuote { spans: Vec<Span> },
    /// Fenced code; lines are kept verbatim.
    CodeBlock {
        language: Option<String>,
        lines: Vec<String>,
    },
    Image { alt_text: String, url: String },
    HorizontalRule,
}

impl Block {
    /// The image URL referenced by this block, if it is an image block.
    pub fn image_url(&self) -> Option<&str> {
        match self {
            Block::Image { url, .. } => Some(url),
            _ => None,
        }
    }
}

/// Collect distinct image URLs in order of first appearance.
pub fn collect_image_urls(blocks: &[Block]) -> Vec<String> {
    let mut seen = HashSet::new();
    blocks
        .iter()
        .filter_map(Block::image_url)
        .filter(|url| seen.insert(*url))
        .map(str::to_string)
        .collect()
}
