//! Common utilities shared across the parser and the OOXML writer.

// Submodule declarations
pub mod unit;
pub mod xml;

// Re-exports for convenience
pub use unit::{EMUS_PER_INCH, EMUS_PER_PX, Extent, fit_to_width, inches_to_emu, px_to_emu};
pub use xml::{escape_xml, is_xml_char};
