/// Inline picture drawing for DOCX documents.
use crate::common::unit::Extent;
use crate::common::xml::escape_xml;
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

/// An inline picture anchored in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// Relationship ID of the embedded media part
    pub r_id: String,
    /// Drawing object ID, unique within the document
    pub drawing_id: usize,
    /// Alt text
    pub description: String,
    /// Display size in EMU
    pub extent: Extent,
}

impl InlineImage {
    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        let Extent { cx, cy } = self.extent;
        let id = self.drawing_id;
        let desc = escape_xml(&self.description);
        let r_id = escape_xml(&self.r_id);

        write!(
            xml,
            r#"<w:r><w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0"><wp:extent cx="{cx}" cy="{cy}"/><wp:effectExtent l="0" t="0" r="0" b="0"/><wp:docPr id="{id}" name="Picture {id}" descr="{desc}"/><wp:cNvGraphicFramePr><a:graphicFrameLocks xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" noChangeAspect="1"/></wp:cNvGraphicFramePr><a:graphic xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:pic xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:nvPicPr><pic:cNvPr id="{id}" name="Picture {id}" descr="{desc}"/><pic:cNvPicPr/></pic:nvPicPr><pic:blipFill><a:blip r:embed="{r_id}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill><pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r>"#
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawing_xml() {
        let image = InlineImage {
            r_id: "rId3".into(),
            drawing_id: 2,
            description: "a \"cat\"".into(),
            extent: Extent {
                cx: 5_486_400,
                cy: 3_657_600,
            },
        };
        let mut xml = String::new();
        image.to_xml(&mut xml).unwrap();

        assert!(xml.starts_with("<w:r><w:drawing><wp:inline"));
        assert!(xml.contains(r#"<wp:extent cx="5486400" cy="3657600"/>"#));
        assert!(xml.contains(r#"<a:ext cx="5486400" cy="3657600"/>"#));
        assert!(xml.contains(r#"<a:blip r:embed="rId3"/>"#));
        assert!(xml.contains(r#"<wp:docPr id="2" name="Picture 2" descr="a &quot;cat&quot;"/>"#));
    }
}
