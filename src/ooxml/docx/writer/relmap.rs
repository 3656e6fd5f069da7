//! Relationship ID mapper for embedded images.
//!
//! Relationships are created before any body XML is written, so the drawing
//! markup can reference the final IDs directly.

use crate::images::{ImageMap, ResolvedImage};
use crate::markdown::{Block, collect_image_urls};
use crate::ooxml::opc::constants::relationship_type as rt;
use crate::ooxml::opc::packuri::{DOCUMENT_URI, PackURI, fixed, media_partname};
use crate::ooxml::opc::rel::Relationships;
use std::collections::HashMap;

/// An image scheduled for embedding.
#[derive(Debug, Clone)]
pub struct MediaEntry<'a> {
    /// Relationship ID from the document part
    pub r_id: String,
    /// Partname of the media file (`/word/media/imageN.ext`)
    pub partname: PackURI,
    pub image: &'a ResolvedImage,
}

/// Maps image URLs to their relationship IDs and media parts.
///
/// Numbering follows the first appearance of each resolved URL in the
/// block list; unresolved URLs get no entry and consume no number.
#[derive(Debug, Default)]
pub struct RelationshipMapper<'a> {
    rels: Relationships,
    media: Vec<MediaEntry<'a>>,
    by_url: HashMap<&'a str, usize>,
}

impl<'a> RelationshipMapper<'a> {
    /// Create a new empty relationship mapper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign relationships to every resolved image referenced by `blocks`.
    pub fn from_blocks(blocks: &[Block], images: &'a ImageMap) -> Self {
        let mut mapper = Self::new();
        for url in collect_image_urls(blocks) {
            if let Some((url, image)) = images.get_key_value(url.as_str()) {
                mapper.add_image(url, image);
            }
        }
        mapper
    }

    /// Register an image, returning its relationship ID. A known URL keeps its ID.
    pub fn add_image(&mut self, url: &'a str, image: &'a ResolvedImage) -> &str {
        let index = match self.by_url.get(url) {
            Some(&index) => index,
            None => {
                let partname = media_partname(self.media.len() + 1, image.file_extension());
                let target = partname.relative_ref(fixed(DOCUMENT_URI).base_uri());
                let r_id = self.rels.get_or_add(rt::IMAGE, &target).to_string();
                self.media.push(MediaEntry {
                    r_id,
                    partname,
                    image,
                });
                self.by_url.insert(url, self.media.len() - 1);
                self.media.len() - 1
            },
        };
        &self.media[index].r_id
    }

    /// Get the relationship ID for an image URL.
    pub fn get_image_id(&self, url: &str) -> Option<&str> {
        self.by_url
            .get(url)
            .map(|&index| self.media[index].r_id.as_str())
    }

    /// Images in relationship order.
    pub fn media(&self) -> &[MediaEntry<'a>] {
        &self.media
    }

    /// The document part's relationships.
    pub fn relationships(&self) -> &Relationships {
        &self.rels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::ImageFormat;
    use bytes::Bytes;

    fn resolved(url: &str, format: ImageFormat) -> (String, ResolvedImage) {
        (
            url.to_string(),
            ResolvedImage {
                source_url: url.to_string(),
                bytes: Bytes::from_static(b"img"),
                format,
                pixel_width: 10,
                pixel_height: 10,
            },
        )
    }

    fn image_block(url: &str) -> Block {
        Block::Image {
            alt_text: String::new(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_first_appearance_order_skips_unresolved() {
        let images: ImageMap = [
            resolved("https://e.x/b", ImageFormat::Jpeg),
            resolved("https://e.x/a", ImageFormat::Png),
        ]
        .into_iter()
        .collect();
        let blocks = vec![
            image_block("https://e.x/missing"),
            image_block("https://e.x/a"),
            image_block("https://e.x/b"),
            image_block("https://e.x/a"),
        ];

        let mapper = RelationshipMapper::from_blocks(&blocks, &images);

        assert_eq!(mapper.get_image_id("https://e.x/a"), Some("rId1"));
        assert_eq!(mapper.get_image_id("https://e.x/b"), Some("rId2"));
        assert_eq!(mapper.get_image_id("https://e.x/missing"), None);
        let parts: Vec<&str> = mapper.media().iter().map(|m| m.partname.as_str()).collect();
        assert_eq!(parts, ["/word/media/image1.png", "/word/media/image2.jpeg"]);
        assert_eq!(
            mapper.relationships().get("rId2").unwrap().target_ref(),
            "media/image2.jpeg"
        );
    }

    #[test]
    fn test_no_images_no_relationships() {
        let images = ImageMap::new();
        let mapper = RelationshipMapper::from_blocks(&[Block::HorizontalRule], &images);
        assert!(mapper.relationships().is_empty());
        assert!(mapper.media().is_empty());
    }
}
