/// Document body generation.
///
/// Each block becomes one or more [`Paragraph`]s; [`generate_document_xml`]
/// serializes them into the `word/document.xml` part.
use super::image::InlineImage;
use super::paragraph::{Alignment, Border, Paragraph, ParagraphProperties};
use super::relmap::RelationshipMapper;
use super::run::{Run, RunProperties};
use crate::common::unit::fit_to_width;
use crate::export::DocxOptions;
use crate::images::ImageMap;
use crate::markdown::{Block, Span};
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::namespace as ns;

// Layout in twentieths of a point.
const LINE_ONE_AND_HALF: u32 = 360;
const LINE_SINGLE: u32 = 240;
const PARAGRAPH_AFTER: u32 = 120;
const LIST_ITEM_AFTER: u32 = 100;
const LIST_INDENT: u32 = 420;
const QUOTE_INDENT: u32 = 420;
const CODE_INDENT: u32 = 240;

// Numbering definitions for list paragraphs.
const BULLET_NUM_ID: u32 = 1;
const ORDERED_NUM_ID: u32 = 2;

// Colors and fills (hex RGB).
const QUOTE_COLOR: &str = "666666";
const CODE_COLOR: &str = "333333";
const LABEL_COLOR: &str = "666666";
const PLACEHOLDER_COLOR: &str = "999999";
const BLOCK_SHADING: &str = "F5F5F5";
const LABEL_SHADING: &str = "E8E8E8";
const RULE_COLOR: &str = "CCCCCC";

/// State threaded through one walk over the block list.
pub struct EmitContext<'a> {
    options: &'a DocxOptions,
    rel_mapper: &'a RelationshipMapper<'a>,
    images: &'a ImageMap,
    /// Last drawing object ID handed out
    drawing_counter: usize,
}

impl<'a> EmitContext<'a> {
    pub fn new(
        options: &'a DocxOptions,
        rel_mapper: &'a RelationshipMapper<'a>,
        images: &'a ImageMap,
    ) -> Self {
        Self {
            options,
            rel_mapper,
            images,
            drawing_counter: 0,
        }
    }

    /// Number of drawings emitted so far.
    pub fn drawing_count(&self) -> usize {
        self.drawing_counter
    }

    fn next_drawing_id(&mut self) -> usize {
        self.drawing_counter += 1;
        self.drawing_counter
    }

    /// Paragraphs for one block.
    pub fn emit_block(&mut self, block: &Block) -> Vec<Paragraph> {
        let options = self.options;
        match block {
            Block::Heading { level, text } => vec![heading(*level, text, options)],
            Block::Paragraph { spans } => vec![body_paragraph(spans, options)],
            Block::List { items } => list(items, BULLET_NUM_ID, options),
            Block::OrderedList { items } => list(items, ORDERED_NUM_ID, options),
            Block::BlockQuote { spans } => vec![block_quote(spans, options)],
            Block::CodeBlock { language, lines } => {
                code_block(language.as_deref(), lines, options)
            },
            Block::Image { alt_text, url } => vec![self.image(alt_text, url)],
            Block::HorizontalRule => vec![horizontal_rule()],
        }
    }

    /// A centered drawing, or an italic gray placeholder when the image is missing.
    fn image(&mut self, alt_text: &str, url: &str) -> Paragraph {
        let (images, rel_mapper) = (self.images, self.rel_mapper);
        let resolved = images.get(url).zip(rel_mapper.get_image_id(url));
        let Some((image, r_id)) = resolved else {
            let label = if alt_text.is_empty() { url } else { alt_text };
            return Paragraph::new(body_layout(PARAGRAPH_AFTER)).with_run(Run::new(
                format!("[Image failed to load: {label}]"),
                RunProperties::default()
                    .color(PLACEHOLDER_COLOR)
                    .italic(),
            ));
        };

        let extent = fit_to_width(
            image.pixel_width,
            image.pixel_height,
            self.options.max_image_width_emu,
        );
        let drawing = InlineImage {
            r_id: r_id.to_string(),
            drawing_id: self.next_drawing_id(),
            description: alt_text.to_string(),
            extent,
        };
        Paragraph::new(
            ParagraphProperties::default()
                .spacing(120, 240, Some(LINE_ONE_AND_HALF))
                .indent(0, None)
                .align(Alignment::Center),
        )
        .with_image(drawing)
    }
}

/// Left-aligned, unindented, 1.5-spaced paragraph layout.
fn body_layout(after: u32) -> ParagraphProperties {
    ParagraphProperties::default()
        .spacing(0, after, Some(LINE_ONE_AND_HALF))
        .indent(0, None)
        .align(Alignment::Left)
}

fn span_runs<'s>(
    spans: &'s [Span],
    base: &'s RunProperties,
    options: &'s DocxOptions,
) -> impl Iterator<Item = Run> + 's {
    spans
        .iter()
        .map(move |span| Run::from_span(span, base, options))
}

fn heading(level: u8, text: &str, options: &DocxOptions) -> Paragraph {
    let after = if level == 1 { 360 } else { 240 };
    let props = RunProperties {
        font: Some(options.heading_font.clone()),
        east_asia_hint: true,
        ..Default::default()
    }
    .bold()
    .size(options.heading_size(level));
    Paragraph::new(body_layout(after)).with_run(Run::new(text, props))
}

fn body_paragraph(spans: &[Span], options: &DocxOptions) -> Paragraph {
    let base = RunProperties::body(options);
    Paragraph::new(body_layout(PARAGRAPH_AFTER).mark(base.clone()))
        .with_runs(span_runs(spans, &base, options))
}

/// One paragraph per item, all tagged with the same numbering definition.
fn list(items: &[Vec<Span>], num_id: u32, options: &DocxOptions) -> Vec<Paragraph> {
    let base = RunProperties::body(options);
    items
        .iter()
        .map(|spans| {
            let props = ParagraphProperties::default()
                .numbering(num_id, 0)
                .spacing(0, LIST_ITEM_AFTER, Some(LINE_ONE_AND_HALF))
                .indent(LIST_INDENT, Some(LIST_INDENT))
                .mark(base.clone());
            Paragraph::new(props).with_runs(span_runs(spans, &base, options))
        })
        .collect()
}

fn block_quote(spans: &[Span], options: &DocxOptions) -> Paragraph {
    let base = RunProperties::body(options).italic().color(QUOTE_COLOR);
    let props = ParagraphProperties::default()
        .shading(BLOCK_SHADING)
        .spacing(0, PARAGRAPH_AFTER, Some(LINE_ONE_AND_HALF))
        .indent(QUOTE_INDENT, None)
        .align(Alignment::Left)
        .mark(base.clone());
    Paragraph::new(props).with_runs(span_runs(spans, &base, options))
}

/// Optional language label, one shaded paragraph per line, then a spacer.
fn code_block(language: Option<&str>, lines: &[String], options: &DocxOptions) -> Vec<Paragraph> {
    let mut paragraphs = Vec::with_capacity(lines.len() + 2);

    if let Some(language) = language {
        let props = ParagraphProperties::default()
            .shading(LABEL_SHADING)
            .spacing(120, 0, Some(LINE_SINGLE))
            .indent(0, None)
            .align(Alignment::Left);
        let label = RunProperties::code(options).bold().color(LABEL_COLOR);
        paragraphs
            .push(Paragraph::new(props).with_run(Run::new(language, label).preserve_space()));
    }

    let code = RunProperties::code(options).color(CODE_COLOR);
    for line in lines {
        let props = ParagraphProperties::default()
            .shading(BLOCK_SHADING)
            .spacing(0, 0, Some(LINE_SINGLE))
            .indent(CODE_INDENT, None)
            .align(Alignment::Left);
        // An empty text node collapses the line height.
        let text = if line.is_empty() { " " } else { line.as_str() };
        paragraphs
            .push(Paragraph::new(props).with_run(Run::new(text, code.clone()).preserve_space()));
    }

    paragraphs.push(Paragraph::new(
        ParagraphProperties::default().spacing(0, PARAGRAPH_AFTER, None),
    ));
    paragraphs
}

fn horizontal_rule() -> Paragraph {
    Paragraph::new(
        ParagraphProperties::default()
            .bottom_border(Border {
                size: 6,
                space: 1,
                color: RULE_COLOR.to_string(),
            })
            .spacing(120, 120, None)
            .indent(0, None),
    )
}

/// Serialize the whole body into the `word/document.xml` part.
pub fn generate_document_xml(blocks: &[Block], ctx: &mut EmitContext<'_>) -> Result<String> {
    let mut xml = String::with_capacity(4096 + blocks.len() * 512);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(r#"<w:document xmlns:w=""#);
    xml.push_str(ns::WML_MAIN);
    xml.push_str(r#"" xmlns:r=""#);
    xml.push_str(ns::OFC_RELATIONSHIPS);
    xml.push_str(r#"" xmlns:wp=""#);
    xml.push_str(ns::DML_WORDPROCESSING_DRAWING);
    xml.push_str(r#"" xmlns:a=""#);
    xml.push_str(ns::DML_MAIN);
    xml.push_str(r#"" xmlns:pic=""#);
    xml.push_str(ns::DML_PICTURE);
    xml.push_str(r#"">"#);
    xml.push_str("<w:body>");

    for block in blocks {
        for paragraph in ctx.emit_block(block) {
            paragraph.to_xml(&mut xml)?;
        }
    }

    // Default section properties: US Letter, one-inch margins
    xml.push_str(r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/>"#);
    xml.push_str(r#"<w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/>"#);
    xml.push_str("</w:sectPr>");

    xml.push_str("</w:body>");
    xml.push_str("</w:document>");
    Ok(xml)
}
