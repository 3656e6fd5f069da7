//! Office Open XML (OOXML) writer.
//!
//! The module is organized in two layers:
//!
//! 1. **OPC Layer** (`opc`): part names, relationships, the content types
//!    manifest and the ZIP archive sink
//! 2. **WordprocessingML** (`docx`): document body generation and package assembly
pub mod docx;
pub mod error;
pub mod opc;

// Re-export commonly used types from OPC layer
pub use opc::PackURI;

// Re-export error types
pub use error::{OoxmlError, Result};
