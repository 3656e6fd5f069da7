//! Styling options for DOCX generation.

use crate::common::unit::inches_to_emu;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Every stylistic constant the body generator uses.
///
/// # Examples
///
/// ```rust
/// use markdocx::export::DocxOptions;
///
/// let options = DocxOptions::new()
///     .with_body_font("Calibri")
///     .with_body_size(22);
/// assert_eq!(options.heading_size(1), 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocxOptions {
    /// Font for paragraph, list and quote runs
    pub body_font: String,
    /// Font for heading runs
    pub heading_font: String,
    /// Monospace font for inline code and code blocks
    pub code_font: String,
    /// Body font size in half-points
    pub body_size: u32,
    /// Code font size in half-points
    pub code_size: u32,
    /// Heading font sizes in half-points, for levels 1 through 6
    pub heading_sizes: [u32; 6],
    /// Widest allowed image, in EMU
    pub max_image_width_emu: i64,
    /// Pixel width assumed when an image cannot be decoded
    pub fallback_image_width: u32,
    /// Pixel height assumed when an image cannot be decoded
    pub fallback_image_height: u32,
    /// Hex RGB color of link runs
    pub link_color: String,
}

impl Default for DocxOptions {
    fn default() -> Self {
        Self {
            body_font: "SimSun".to_string(),
            heading_font: "SimHei".to_string(),
            code_font: "Consolas".to_string(),
            body_size: 24,
            code_size: 20,
            heading_sizes: [32, 28, 24, 24, 24, 24],
            max_image_width_emu: inches_to_emu(6.0),
            fallback_image_width: 600,
            fallback_image_height: 400,
            link_color: "0563C1".to_string(),
        }
    }
}

impl DocxOptions {
    /// Create a new `DocxOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from YAML. Missing keys take their defaults.
    ///
    /// The result is checked with [`DocxOptions::validate`].
    ///
    /// ```rust
    /// use markdocx::export::DocxOptions;
    ///
    /// let options = DocxOptions::from_yaml_str("code_font: Menlo\n").unwrap();
    /// assert_eq!(options.code_font, "Menlo");
    /// assert_eq!(options.body_size, 24);
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let options: Self =
            serde_saphyr::from_str(yaml).map_err(|e| Error::Config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Reject values that would produce an unreadable document: zero font
    /// sizes, a non-positive image width limit or empty fallback dimensions.
    pub fn validate(&self) -> Result<()> {
        if self.max_image_width_emu <= 0 {
            return Err(Error::Config(format!(
                "max_image_width_emu must be positive, got {}",
                self.max_image_width_emu
            )));
        }
        if self.fallback_image_width == 0 || self.fallback_image_height == 0 {
            return Err(Error::Config(format!(
                "fallback image size must be non-zero, got {}x{}",
                self.fallback_image_width, self.fallback_image_height
            )));
        }
        if self.body_size == 0 || self.code_size == 0 {
            return Err(Error::Config("font sizes must be non-zero".to_string()));
        }
        if let Some(level) = self.heading_sizes.iter().position(|&size| size == 0) {
            return Err(Error::Config(format!(
                "heading size for level {} must be non-zero",
                level + 1
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn with_body_font(mut self, font: impl Into<String>) -> Self {
        self.body_font = font.into();
        self
    }

    #[inline]
    pub fn with_heading_font(mut self, font: impl Into<String>) -> Self {
        self.heading_font = font.into();
        self
    }

    #[inline]
    pub fn with_code_font(mut self, font: impl Into<String>) -> Self {
        self.code_font = font.into();
        self
    }

    /// Set the body font size in half-points (e.g., 24 = 12pt).
    #[inline]
    pub fn with_body_size(mut self, half_points: u32) -> Self {
        self.body_size = half_points;
        self
    }

    /// Set the code font size in half-points.
    #[inline]
    pub fn with_code_size(mut self, half_points: u32) -> Self {
        self.code_size = half_points;
        self
    }

    #[inline]
    pub fn with_heading_sizes(mut self, half_points: [u32; 6]) -> Self {
        self.heading_sizes = half_points;
        self
    }

    /// Set the maximum image width in EMU.
    #[inline]
    pub fn with_max_image_width_emu(mut self, emu: i64) -> Self {
        self.max_image_width_emu = emu;
        self
    }

    #[inline]
    pub fn with_fallback_image_size(mut self, width: u32, height: u32) -> Self {
        self.fallback_image_width = width;
        self.fallback_image_height = height;
        self
    }

    /// Set the link color using hex RGB (e.g., "0563C1").
    #[inline]
    pub fn with_link_color(mut self, color: impl Into<String>) -> Self {
        self.link_color = color.into();
        self
    }

    /// Font size for a heading level; levels outside 1..=6 are clamped.
    pub fn heading_size(&self, level: u8) -> u32 {
        let index = usize::from(level.clamp(1, 6)) - 1;
        self.heading_sizes[index]
    }

    pub(crate) fn fallback_dimensions(&self) -> (u32, u32) {
        (self.fallback_image_width, self.fallback_image_height)
    }
}
