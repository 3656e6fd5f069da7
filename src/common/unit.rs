//! Unit conversion utilities.
//!
//! WordprocessingML mixes several length units:
//!
//! - font sizes in half-points (`24` = 12pt)
//! - paragraph spacing and indentation in twentieths of a point (twips)
//! - drawing extents in English Metric Units (EMU), 914400 per inch

pub const EMUS_PER_INCH: i64 = 914_400;
/// One CSS pixel at 96 DPI.
pub const EMUS_PER_PX: i64 = EMUS_PER_INCH / 96;

#[inline]
pub fn px_to_emu(px: u32) -> i64 {
    px as i64 * EMUS_PER_PX
}

#[inline]
pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMUS_PER_INCH as f64).round() as i64
}

/// Drawing extent in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub cx: i64,
    pub cy: i64,
}

/// Convert pixel dimensions to an EMU extent no wider than `max_width_emu`.
///
/// When the natural width exceeds the limit the width is clamped to exactly
/// `max_width_emu` and the height is scaled by the same ratio, rounded to the
/// nearest EMU. Narrower images keep their natural size.
pub fn fit_to_width(width_px: u32, height_px: u32, max_width_emu: i64) -> Extent {
    let cx = px_to_emu(width_px);
    let cy = px_to_emu(height_px);
    if cx <= max_width_emu || cx == 0 {
        return Extent { cx, cy };
    }
    // Integer rounding of cy * max / cx.
    let scaled = (cy as i128 * max_width_emu as i128 + cx as i128 / 2) / cx as i128;
    Extent {
        cx: max_width_emu,
        cy: scaled as i64,
    }
}
