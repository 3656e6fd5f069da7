//! Package writer for OPC packages.
//!
//! Builds the `[Content_Types].xml` manifest and serializes parts into a ZIP
//! container through an [`ArchiveSink`].

use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::{content_type as ct, namespace};
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use std::collections::{BTreeMap, HashSet};
use std::io::{Cursor, Write};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Receives the named parts of a package and produces the container bytes.
///
/// Implementations must refuse a second part with the same name.
pub trait ArchiveSink {
    /// Add one part to the container.
    fn add_part(&mut self, partname: &PackURI, blob: &[u8]) -> Result<()>;

    /// Finalize the container and return its bytes.
    fn finish(self) -> Result<Vec<u8>>
    where
        Self: Sized;
}

/// In-memory ZIP container with Deflate compression.
pub struct ZipArchiveSink {
    archive: ZipWriter<Cursor<Vec<u8>>>,
    written: HashSet<PackURI>,
}

impl ZipArchiveSink {
    pub fn new() -> Self {
        Self {
            archive: ZipWriter::new(Cursor::new(Vec::new())),
            written: HashSet::new(),
        }
    }
}

impl Default for ZipArchiveSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveSink for ZipArchiveSink {
    fn add_part(&mut self, partname: &PackURI, blob: &[u8]) -> Result<()> {
        if !self.written.insert(partname.clone()) {
            return Err(OpcError::DuplicatePart(partname.to_string()));
        }
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        self.archive.start_file(partname.membername(), options)?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>> {
        Ok(self.archive.finish()?.into_inner())
    }
}

/// Builder for the `[Content_Types].xml` part.
///
/// Defaults map file extensions to content types; overrides map individual
/// part names. Both are written in sorted order.
#[derive(Debug, Clone)]
pub struct ContentTypes {
    /// Default content types by extension
    defaults: BTreeMap<String, &'static str>,

    /// Override content types by partname
    overrides: BTreeMap<PackURI, &'static str>,
}

impl ContentTypes {
    /// Create a manifest with the `rels` and `xml` defaults every package needs.
    pub fn new() -> Self {
        let mut defaults = BTreeMap::new();
        defaults.insert("rels".to_string(), ct::OPC_RELATIONSHIPS);
        defaults.insert("xml".to_string(), ct::XML);

        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    /// Map an extension to a content type. A repeated extension keeps one entry.
    pub fn add_default(&mut self, ext: &str, content_type: &'static str) -> &mut Self {
        self.defaults
            .entry(ext.to_ascii_lowercase())
            .or_insert(content_type);
        self
    }

    /// Give a specific part its own content type.
    pub fn add_override(&mut self, partname: PackURI, content_type: &'static str) -> &mut Self {
        self.overrides.insert(partname, content_type);
        self
    }

    /// Number of `Default` entries.
    pub fn default_count(&self) -> usize {
        self.defaults.len()
    }

    /// Generate the XML for `[Content_Types].xml`.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(512 + self.defaults.len() * 64);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(r#"<Types xmlns=""#);
        xml.push_str(namespace::OPC_CONTENT_TYPES);
        xml.push_str(r#"">"#);

        for (ext, content_type) in &self.defaults {
            xml.push_str(r#"<Default Extension=""#);
            xml.push_str(&escape_xml(ext));
            xml.push_str(r#"" ContentType=""#);
            xml.push_str(content_type);
            xml.push_str(r#""/>"#);
        }

        for (partname, content_type) in &self.overrides {
            xml.push_str(r#"<Override PartName=""#);
            xml.push_str(&escape_xml(partname.as_str()));
            xml.push_str(r#"" ContentType=""#);
            xml.push_str(content_type);
            xml.push_str(r#""/>"#);
        }

        xml.push_str("</Types>");
        xml
    }
}

impl Default for ContentTypes {
    fn default() -> Self {
        Self::new()
    }
}
