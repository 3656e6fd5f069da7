//! Document body writer components for DOCX.
//!
//! Blocks are turned into paragraph, run and drawing values, which then
//! serialize themselves into WordprocessingML.

pub mod doc;
pub mod image;
pub mod paragraph;
pub mod relmap;
pub mod run;

pub use doc::{EmitContext, generate_document_xml};
pub use image::InlineImage;
pub use paragraph::{Alignment, Border, Paragraph, ParagraphContent, ParagraphProperties};
pub use relmap::{MediaEntry, RelationshipMapper};
pub use run::{Run, RunProperties};
