/// Open Packaging Conventions (OPC) writer.
///
/// The subset of OPC needed to emit a package: part names, relationship
/// collections, the content types manifest and the ZIP archive sink.

pub mod constants;
pub mod error;
pub mod packuri;
pub mod pkgwriter;
pub mod rel;

// Re-export commonly used types
pub use error::OpcError;
pub use packuri::PackURI;
pub use pkgwriter::{ArchiveSink, ContentTypes, ZipArchiveSink};
pub use rel::{Relationship, Relationships};
