//! Text measurement using cosmic-text.

use crate::style::FontSpec;
use cosmic_text::{Attrs, Buffer, FontSystem, Metrics, Shaping};

/// Metrics returned by text measurement.
#[derive(Debug, Clone, Default)]
pub struct TextMetrics {
    /// Advance width of the text in pixels.
    pub width: f32,
    /// Distance from baseline to top of the em box (approximation).
    pub ascent: f32,
    /// Distance from baseline to bottom of the em box (approximation).
    pub descent: f32,
}

/// Shape `text` with the given font and report its layout width.
pub fn measure_text(font_system: &mut FontSystem, text: &str, font: &FontSpec) -> TextMetrics {
    let metrics = Metrics::new(font.size_px, font.size_px * 1.2);
    let mut buffer = Buffer::new(font_system, metrics);

    let attrs = Attrs::new()
        .family(font.cosmic_family())
        .weight(font.weight);
    buffer.set_text(font_system, text, &attrs, Shaping::Advanced, None);
    buffer.shape_until_scroll(font_system, false);

    let mut width: f32 = 0.0;
    for run in buffer.layout_runs() {
        width = width.max(run.line_w);
    }

    TextMetrics {
        width,
        ascent: font.size_px * 0.8,
        descent: font.size_px * 0.2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::FontSpec;

    #[test]
    fn empty_text_measures_zero() {
        let mut font_system = FontSystem::new();
        let metrics = measure_text(&mut font_system, "", &FontSpec::serif(34.0));
        assert_eq!(metrics.width, 0.0);
    }

    #[test]
    fn metrics_track_font_size() {
        let mut font_system = FontSystem::new();
        let metrics = measure_text(&mut font_system, "x", &FontSpec::serif(40.0));
        assert_eq!(metrics.ascent, 32.0);
        assert_eq!(metrics.descent, 8.0);
    }
}
