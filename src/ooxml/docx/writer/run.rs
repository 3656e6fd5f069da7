/// Runs and run properties for generated DOCX bodies.
use crate::common::xml::escape_xml;
use crate::export::DocxOptions;
use crate::markdown::Span;
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

/// Background fill behind inline code.
pub const INLINE_CODE_SHADING: &str = "F3F3F3";

/// Character formatting of a run.
///
/// Serialized in schema order: fonts, bold, italic, color, size, underline, shading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunProperties {
    /// Font applied to ASCII, high-ANSI and East Asian text
    pub font: Option<String>,
    /// Emit `w:hint="eastAsia"` on the font element
    pub east_asia_hint: bool,
    pub bold: bool,
    pub italic: bool,
    /// Hex RGB text color
    pub color: Option<String>,
    /// Font size in half-points
    pub size: Option<u32>,
    /// Single underline
    pub underline: bool,
    /// Hex RGB background fill
    pub shading: Option<String>,
}

impl RunProperties {
    /// Body text in the configured body font and size.
    pub fn body(options: &DocxOptions) -> Self {
        Self {
            font: Some(options.body_font.clone()),
            east_asia_hint: true,
            size: Some(options.body_size),
            ..Default::default()
        }
    }

    /// Monospace text in the configured code font and size.
    pub fn code(options: &DocxOptions) -> Self {
        Self {
            font: Some(options.code_font.clone()),
            size: Some(options.code_size),
            ..Default::default()
        }
    }

    /// Properties of an inline span laid over `base`.
    ///
    /// Code spans switch to the code font with a light shading but keep the
    /// base size; links take the link color and an underline.
    pub fn for_span(span: &Span, base: &RunProperties, options: &DocxOptions) -> Self {
        let mut props = base.clone();
        if span.code {
            props.font = Some(options.code_font.clone());
            props.east_asia_hint = false;
            props.shading = Some(INLINE_CODE_SHADING.to_string());
        }
        props.bold |= span.bold;
        props.italic |= span.italic;
        if span.link.is_some() {
            props.color = Some(options.link_color.clone());
            props.underline = true;
        }
        props
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn size(mut self, half_points: u32) -> Self {
        self.size = Some(half_points);
        self
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:rPr>");

        if let Some(ref font) = self.font {
            let font = escape_xml(font);
            write!(
                xml,
                r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}""#
            )?;
            if self.east_asia_hint {
                xml.push_str(r#" w:hint="eastAsia""#);
            }
            xml.push_str("/>");
        }

        if self.bold {
            xml.push_str("<w:b/><w:bCs/>");
        }

        if self.italic {
            xml.push_str("<w:i/><w:iCs/>");
        }

        if let Some(ref color) = self.color {
            write!(xml, r#"<w:color w:val="{}"/>"#, escape_xml(color))?;
        }

        if let Some(size) = self.size {
            write!(xml, r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#)?;
        }

        if self.underline {
            xml.push_str(r#"<w:u w:val="single"/>"#);
        }

        if let Some(ref fill) = self.shading {
            write!(xml, r#"<w:shd w:val="clear" w:fill="{}"/>"#, escape_xml(fill))?;
        }

        xml.push_str("</w:rPr>");
        Ok(())
    }
}

/// A run of text sharing one set of properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub properties: RunProperties,
    /// Keep leading/trailing whitespace (`xml:space="preserve"`)
    pub preserve_space: bool,
}

impl Run {
    pub fn new(text: impl Into<String>, properties: RunProperties) -> Self {
        Self {
            text: text.into(),
            properties,
            preserve_space: false,
        }
    }

    /// Run for an inline span; whitespace around spans is always preserved.
    pub fn from_span(span: &Span, base: &RunProperties, options: &DocxOptions) -> Self {
        Self {
            text: span.text.clone(),
            properties: RunProperties::for_span(span, base, options),
            preserve_space: true,
        }
    }

    pub fn preserve_space(mut self) -> Self {
        self.preserve_space = true;
        self
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:r>");
        self.properties.to_xml(xml)?;
        if self.preserve_space {
            xml.push_str(r#"<w:t xml:space="preserve">"#);
        } else {
            xml.push_str("<w:t>");
        }
        xml.push_str(&escape_xml(&self.text));
        xml.push_str("</w:t></w:r>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xml_of(run: &Run) -> String {
        let mut xml = String::new();
        run.to_xml(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_body_run() {
        let options = DocxOptions::default();
        let run = Run::from_span(&Span::plain("a < b"), &RunProperties::body(&options), &options);
        assert_eq!(
            xml_of(&run),
            r#"<w:r><w:rPr><w:rFonts w:ascii="SimSun" w:hAnsi="SimSun" w:eastAsia="SimSun" w:hint="eastAsia"/><w:sz w:val="24"/><w:szCs w:val="24"/></w:rPr><w:t xml:space="preserve">a &lt; b</w:t></w:r>"#
        );
    }

    #[test]
    fn test_span_styles() {
        let options = DocxOptions::default();
        let base = RunProperties::body(&options);
        let span = Span {
            text: "x".into(),
            bold: true,
            italic: true,
            code: false,
            link: Some("https://e.x".into()),
        };
        let xml = xml_of(&Run::from_span(&span, &base, &options));
        assert!(xml.contains("<w:b/><w:bCs/><w:i/><w:iCs/>"));
        assert!(xml.contains(r#"<w:color w:val="0563C1"/>"#));
        assert!(xml.contains(r#"<w:u w:val="single"/>"#));
    }

    #[test]
    fn test_code_span_uses_code_font_and_shading() {
        let options = DocxOptions::default();
        let xml = xml_of(&Run::from_span(
            &Span::code("let x"),
            &RunProperties::body(&options),
            &options,
        ));
        assert!(xml.contains(r#"w:ascii="Consolas""#));
        assert!(!xml.contains("w:hint"));
        assert!(xml.contains(r#"<w:shd w:val="clear" w:fill="F3F3F3"/>"#));
    }

    #[test]
    fn test_plain_text_node() {
        let run = Run::new("Title", RunProperties::default().bold());
        assert_eq!(
            xml_of(&run),
            "<w:r><w:rPr><w:b/><w:bCs/></w:rPr><w:t>Title</w:t></w:r>"
        );
    }
}
