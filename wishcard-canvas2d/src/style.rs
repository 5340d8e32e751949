//! Paint, text, and font style types for the drawing surface.

use crate::error::{CanvasError, CanvasResult};
use crate::gradient::CanvasGradient;
use cosmic_text::Weight;

/// Paint used for fill and stroke operations.
#[derive(Debug, Clone)]
pub enum Paint {
    /// Solid color.
    Color(tiny_skia::Color),
    /// Linear gradient.
    LinearGradient(CanvasGradient),
    /// Radial gradient.
    RadialGradient(CanvasGradient),
}

impl Default for Paint {
    fn default() -> Self {
        // Default is opaque black
        Paint::Color(tiny_skia::Color::BLACK)
    }
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Align text to the left of the anchor point.
    #[default]
    Left,
    /// Center text on the anchor point.
    Center,
    /// Align text to the right of the anchor point.
    Right,
}

impl TextAlign {
    /// X offset applied to the anchor for a run of the given width.
    pub(crate) fn x_offset(self, width: f32) -> f32 {
        match self {
            TextAlign::Left => 0.0,
            TextAlign::Center => -width / 2.0,
            TextAlign::Right => -width,
        }
    }
}

/// Font family selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FontFamily {
    /// Generic serif family.
    Serif,
    /// Generic sans-serif family.
    #[default]
    SansSerif,
    /// A concrete family by name.
    Named(String),
}

/// A typed font specification.
///
/// The compositor sets fonts programmatically, so this replaces CSS
/// font-string parsing with explicit fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Font family preference.
    pub family: FontFamily,
    /// Font weight.
    pub weight: Weight,
    /// Font size in pixels.
    pub size_px: f32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: FontFamily::SansSerif,
            weight: Weight::NORMAL,
            size_px: 10.0,
        }
    }
}

impl FontSpec {
    /// A regular serif font at the given pixel size.
    pub fn serif(size_px: f32) -> Self {
        Self {
            family: FontFamily::Serif,
            weight: Weight::NORMAL,
            size_px,
        }
    }

    /// A bold serif font at the given pixel size.
    pub fn serif_bold(size_px: f32) -> Self {
        Self {
            family: FontFamily::Serif,
            weight: Weight::BOLD,
            size_px,
        }
    }

    /// The cosmic-text family for this spec.
    pub(crate) fn cosmic_family(&self) -> cosmic_text::Family<'_> {
        match &self.family {
            FontFamily::Serif => cosmic_text::Family::Serif,
            FontFamily::SansSerif => cosmic_text::Family::SansSerif,
            FontFamily::Named(name) => cosmic_text::Family::Name(name),
        }
    }
}

/// Parse a CSS color string into a tiny_skia::Color.
pub(crate) fn parse_color(s: &str) -> CanvasResult<tiny_skia::Color> {
    let parsed = csscolorparser::parse(s)
        .map_err(|e| CanvasError::ColorParseError(format!("{}: {}", s, e)))?;

    let [r, g, b, a] = parsed.to_array();
    Ok(tiny_skia::Color::from_rgba(r, g, b, a).unwrap_or(tiny_skia::Color::BLACK))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parse_hex_and_rgba_colors() {
        let red = parse_color("#D32F2F").unwrap();
        assert!((red.red() - 0.827).abs() < 0.01);

        let translucent = parse_color("rgba(211, 47, 47, 0.15)").unwrap();
        assert!((translucent.alpha() - 0.15).abs() < 0.01);
    }

    #[rstest]
    #[case("#FFF8F0")]
    #[case("#ffd700")]
    #[case("white")]
    #[case("rgb(198, 40, 40)")]
    fn parse_color_accepts_css_forms(#[case] input: &str) {
        assert!(parse_color(input).is_ok());
    }

    #[test]
    fn parse_color_rejects_garbage() {
        assert!(parse_color("definitely not a color").is_err());
    }

    #[test]
    fn align_offsets() {
        assert_eq!(TextAlign::Left.x_offset(100.0), 0.0);
        assert_eq!(TextAlign::Center.x_offset(100.0), -50.0);
        assert_eq!(TextAlign::Right.x_offset(100.0), -100.0);
    }
}
