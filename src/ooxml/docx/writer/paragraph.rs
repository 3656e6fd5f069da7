/// Paragraphs and paragraph properties for generated DOCX bodies.
use super::image::InlineImage;
use super::run::{Run, RunProperties};
use crate::common::xml::escape_xml;
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
        }
    }
}

/// Paragraph spacing in twentieths of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spacing {
    pub before: u32,
    pub after: u32,
    /// Line pitch with `lineRule="auto"` (240 = single)
    pub line: Option<u32>,
}

/// Paragraph indentation in twentieths of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Indent {
    pub left: u32,
    pub hanging: Option<u32>,
}

/// Reference into a numbering definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberingRef {
    pub num_id: u32,
    pub ilvl: u32,
}

/// A single paragraph border line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Border {
    /// Width in eighths of a point
    pub size: u32,
    /// Distance from text in points
    pub space: u32,
    /// Hex RGB color
    pub color: String,
}

/// Paragraph formatting.
///
/// Serialized in schema order: numbering, borders, shading, spacing,
/// indentation, alignment, paragraph mark.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParagraphProperties {
    pub numbering: Option<NumberingRef>,
    pub bottom_border: Option<Border>,
    /// Hex RGB background fill
    pub shading: Option<String>,
    pub spacing: Option<Spacing>,
    pub indent: Option<Indent>,
    pub alignment: Option<Alignment>,
    /// Formatting of the paragraph mark
    pub mark: Option<RunProperties>,
}

impl ParagraphProperties {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn spacing(mut self, before: u32, after: u32, line: Option<u32>) -> Self {
        self.spacing = Some(Spacing {
            before,
            after,
            line,
        });
        self
    }

    pub fn indent(mut self, left: u32, hanging: Option<u32>) -> Self {
        self.indent = Some(Indent { left, hanging });
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn shading(mut self, fill: &str) -> Self {
        self.shading = Some(fill.to_string());
        self
    }

    pub fn numbering(mut self, num_id: u32, ilvl: u32) -> Self {
        self.numbering = Some(NumberingRef { num_id, ilvl });
        self
    }

    pub fn bottom_border(mut self, border: Border) -> Self {
        self.bottom_border = Some(border);
        self
    }

    pub fn mark(mut self, props: RunProperties) -> Self {
        self.mark = Some(props);
        self
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        xml.push_str("<w:pPr>");

        if let Some(numbering) = self.numbering {
            write!(
                xml,
                r#"<w:numPr><w:ilvl w:val="{}"/><w:numId w:val="{}"/></w:numPr>"#,
                numbering.ilvl, numbering.num_id
            )?;
        }

        if let Some(ref border) = self.bottom_border {
            write!(
                xml,
                r#"<w:pBdr><w:bottom w:val="single" w:sz="{}" w:space="{}" w:color="{}"/></w:pBdr>"#,
                border.size,
                border.space,
                escape_xml(&border.color)
            )?;
        }

        if let Some(ref fill) = self.shading {
            write!(xml, r#"<w:shd w:val="clear" w:fill="{}"/>"#, escape_xml(fill))?;
        }

        if let Some(spacing) = self.spacing {
            write!(
                xml,
                r#"<w:spacing w:before="{}" w:after="{}""#,
                spacing.before, spacing.after
            )?;
            if let Some(line) = spacing.line {
                write!(xml, r#" w:line="{line}" w:lineRule="auto""#)?;
            }
            xml.push_str("/>");
        }

        if let Some(indent) = self.indent {
            write!(xml, r#"<w:ind w:left="{}""#, indent.left)?;
            if let Some(hanging) = indent.hanging {
                write!(xml, r#" w:hanging="{hanging}""#)?;
            }
            xml.push_str("/>");
        }

        if let Some(alignment) = self.alignment {
            write!(xml, r#"<w:jc w:val="{}"/>"#, alignment.as_str())?;
        }

        if let Some(ref mark) = self.mark {
            mark.to_xml(xml)?;
        }

        xml.push_str("</w:pPr>");
        Ok(())
    }
}

/// Paragraph content in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum ParagraphContent {
    Run(Run),
    Image(InlineImage),
}

/// A paragraph of generated body content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub properties: ParagraphProperties,
    pub content: Vec<ParagraphContent>,
}

impl Paragraph {
    pub fn new(properties: ParagraphProperties) -> Self {
        Self {
            properties,
            content: Vec::new(),
        }
    }

    pub fn with_run(mut self, run: Run) -> Self {
        self.content.push(ParagraphContent::Run(run));
        self
    }

    pub fn with_runs(mut self, runs: impl IntoIterator<Item = Run>) -> Self {
        self.content.extend(runs.into_iter().map(ParagraphContent::Run));
        self
    }

    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.content.push(ParagraphContent::Image(image));
        self
    }

    /// Iterate over the text runs.
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.content.iter().filter_map(|c| match c {
            ParagraphContent::Run(run) => Some(run),
            ParagraphContent::Image(_) => None,
        })
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:p>");
        self.properties.to_xml(xml)?;
        for content in &self.content {
            match content {
                ParagraphContent::Run(run) => run.to_xml(xml)?,
                ParagraphContent::Image(image) => image.to_xml(xml)?,
            }
        }
        xml.push_str("</w:p>");
        Ok(())
    }
}
