//! Package assembly for generated Word documents.
//!
//! [`build_parts`] renders every XML part and gathers the media payloads;
//! [`assemble`] checks that the fixed parts are present and streams all parts
//! into an [`ArchiveSink`].

use crate::export::DocxOptions;
use crate::images::ImageMap;
use crate::markdown::Block;
use crate::ooxml::docx::writer::{EmitContext, RelationshipMapper, generate_document_xml};
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::error::OpcError;
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, DOCUMENT_URI, PACKAGE_URI, PackURI, fixed};
use crate::ooxml::opc::pkgwriter::{ArchiveSink, ContentTypes, ZipArchiveSink};
use crate::ooxml::opc::rel::Relationships;
use bytes::Bytes;
use log::debug;

/// An XML part ready for packaging.
#[derive(Debug, Clone)]
pub struct XmlPart {
    pub partname: PackURI,
    pub xml: String,
}

/// A binary media part ready for packaging.
#[derive(Debug, Clone)]
pub struct MediaPart {
    pub partname: PackURI,
    pub bytes: Bytes,
}

/// Every part of a generated document, in archive order.
#[derive(Debug, Clone, Default)]
pub struct DocxParts {
    pub xml_parts: Vec<XmlPart>,
    pub media: Vec<MediaPart>,
}

impl DocxParts {
    /// XML content of a part, if present.
    pub fn xml(&self, partname: &str) -> Option<&str> {
        self.xml_parts
            .iter()
            .find(|part| part.partname.as_str() == partname)
            .map(|part| part.xml.as_str())
    }

    fn push_xml(&mut self, partname: PackURI, xml: String) {
        self.xml_parts.push(XmlPart { partname, xml });
    }
}

/// Parts without which the container cannot be opened.
pub fn required_partnames() -> [PackURI; 4] {
    let document = fixed(DOCUMENT_URI);
    [
        fixed(CONTENT_TYPES_URI),
        fixed(PACKAGE_URI).rels_uri(),
        document.rels_uri(),
        document,
    ]
}

/// Render all parts of the document described by `blocks`.
///
/// Images missing from `images` are rendered as placeholders and get no
/// relationship or media part.
pub fn build_parts(blocks: &[Block], images: &ImageMap, options: &DocxOptions) -> Result<DocxParts> {
    let rel_mapper = RelationshipMapper::from_blocks(blocks, images);
    let document_uri = fixed(DOCUMENT_URI);

    let mut content_types = ContentTypes::new();
    for entry in rel_mapper.media() {
        content_types.add_default(entry.partname.ext(), entry.image.format.mime_type());
    }
    content_types.add_override(document_uri.clone(), ct::WML_DOCUMENT_MAIN);

    let mut package_rels = Relationships::new();
    package_rels.get_or_add(
        rt::OFFICE_DOCUMENT,
        &document_uri.relative_ref(PACKAGE_URI),
    );

    let mut ctx = EmitContext::new(options, &rel_mapper, images);
    let document_xml = generate_document_xml(blocks, &mut ctx)?;

    let mut parts = DocxParts::default();
    parts.push_xml(fixed(CONTENT_TYPES_URI), content_types.to_xml());
    parts.push_xml(fixed(PACKAGE_URI).rels_uri(), package_rels.to_xml());
    parts.push_xml(document_uri.clone(), document_xml);
    parts.push_xml(document_uri.rels_uri(), rel_mapper.relationships().to_xml());
    parts.media = rel_mapper
        .media()
        .iter()
        .map(|entry| MediaPart {
            partname: entry.partname.clone(),
            bytes: entry.image.bytes.clone(),
        })
        .collect();

    debug!(
        "built {} xml parts, {} media parts, {} drawings",
        parts.xml_parts.len(),
        parts.media.len(),
        ctx.drawing_count()
    );
    Ok(parts)
}

/// Write `parts` into `sink` and finalize the container.
///
/// Fails with [`OpcError::MissingPart`] before writing anything if one of the
/// fixed parts is absent.
pub fn assemble<S: ArchiveSink>(parts: &DocxParts, mut sink: S) -> Result<Vec<u8>> {
    for required in required_partnames() {
        if !parts.xml_parts.iter().any(|part| part.partname == required) {
            return Err(OpcError::MissingPart(required.to_string()).into());
        }
    }

    for part in &parts.xml_parts {
        sink.add_part(&part.partname, part.xml.as_bytes())?;
    }
    for media in &parts.media {
        sink.add_part(&media.partname, &media.bytes)?;
    }

    Ok(sink.finish()?)
}

/// Render and package a document into an in-memory ZIP container.
pub fn to_docx_bytes(blocks: &[Block], images: &ImageMap, options: &DocxOptions) -> Result<Vec<u8>> {
    assemble(&build_parts(blocks, images, options)?, ZipArchiveSink::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::{ImageFormat, ResolvedImage};
    use crate::markdown::parse_blocks;
    use std::io::{Cursor, Read};

    fn image(url: &str, format: ImageFormat) -> (String, ResolvedImage) {
        (
            url.to_string(),
            ResolvedImage {
                source_url: url.to_string(),
                bytes: Bytes::from(format!("bytes of {url}")),
                format,
                pixel_width: 100,
                pixel_height: 50,
            },
        )
    }

    fn read_member(archive: &mut zip::ZipArchive<Cursor<Vec<u8>>>, name: &str) -> Vec<u8> {
        let mut buf = Vec::new();
        archive.by_name(name).unwrap().read_to_end(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_zero_images() {
        let blocks = parse_blocks("# Only text\n");
        let parts = build_parts(&blocks, &ImageMap::new(), &DocxOptions::default()).unwrap();

        let rels = parts.xml("/word/_rels/document.xml.rels").unwrap();
        assert!(!rels.contains("<Relationship "));
        let content_types = parts.xml("/[Content_Types].xml").unwrap();
        assert_eq!(content_types.matches("<Default ").count(), 2);
        assert!(parts.media.is_empty());
    }

    #[test]
    fn test_image_parts_follow_first_appearance() {
        let blocks = parse_blocks(
            "![j](https://e.x/j)\n\n![p](https://e.x/p)\n\n![gone](https://e.x/gone)\n\n![j](https://e.x/j)\n",
        );
        let images: ImageMap = [
            image("https://e.x/p", ImageFormat::Png),
            image("https://e.x/j", ImageFormat::Jpeg),
        ]
        .into_iter()
        .collect();
        let parts = build_parts(&blocks, &images, &DocxOptions::default()).unwrap();

        let media: Vec<&str> = parts.media.iter().map(|m| m.partname.as_str()).collect();
        assert_eq!(media, ["/word/media/image1.jpeg", "/word/media/image2.png"]);

        let rels = parts.xml("/word/_rels/document.xml.rels").unwrap();
        assert!(rels.contains(r#"Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.jpeg""#));
        assert!(rels.contains(r#"Id="rId2""#));
        assert!(!rels.contains(r#"Id="rId3""#));

        let content_types = parts.xml("/[Content_Types].xml").unwrap();
        assert!(content_types.contains(r#"<Default Extension="jpeg" ContentType="image/jpeg"/>"#));
        assert!(content_types.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
        assert!(content_types.contains(r#"<Override PartName="/word/document.xml""#));
    }

    #[test]
    fn test_control_characters_never_reach_document_xml() {
        let blocks = parse_blocks(
            "# Cover\u{0C}\n\nPage one\u{0C}page two\u{0B}end\n\n- item\u{1}\n\n```\nnul\u{0}\n```\n",
        );
        let parts = build_parts(&blocks, &ImageMap::new(), &DocxOptions::default()).unwrap();

        let document = parts.xml("/word/document.xml").unwrap();
        assert!(document.chars().all(crate::common::xml::is_xml_char));
        assert!(document.contains("Page one page two end"));
        assert!(document.contains(">item<"));

        for part in &parts.xml_parts {
            assert!(part.xml.chars().all(crate::common::xml::is_xml_char), "{}", part.partname);
        }
    }

    #[test]
    fn test_package_rels_point_at_document() {
        let parts = build_parts(&[], &ImageMap::new(), &DocxOptions::default()).unwrap();
        let rels = parts.xml("/_rels/.rels").unwrap();
        assert!(rels.contains(r#"Target="word/document.xml""#));
        assert!(rels.contains(rt::OFFICE_DOCUMENT));
    }

    #[test]
    fn test_assemble_writes_every_part() {
        let blocks = parse_blocks("![p](https://e.x/p)\n");
        let images: ImageMap = [image("https://e.x/p", ImageFormat::Png)].into_iter().collect();
        let bytes = to_docx_bytes(&blocks, &images, &DocxOptions::default()).unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 5);
        for name in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/document.xml",
            "word/_rels/document.xml.rels",
        ] {
            assert!(!read_member(&mut archive, name).is_empty(), "{name}");
        }
        assert_eq!(
            read_member(&mut archive, "word/media/image1.png"),
            b"bytes of https://e.x/p"
        );
    }

    #[test]
    fn test_assemble_rejects_missing_part() {
        let mut parts = build_parts(&[], &ImageMap::new(), &DocxOptions::default()).unwrap();
        parts
            .xml_parts
            .retain(|part| part.partname.as_str() != "/_rels/.rels");
        let err = assemble(&parts, ZipArchiveSink::new()).unwrap_err();
        assert!(matches!(
            err,
            crate::ooxml::error::OoxmlError::Opc(OpcError::MissingPart(_))
        ));
    }
}
