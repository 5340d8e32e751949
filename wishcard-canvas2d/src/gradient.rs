//! Gradient paints for the drawing surface.

use crate::error::{CanvasError, CanvasResult};
use crate::style::parse_color;

/// A color stop in a gradient.
#[derive(Debug, Clone)]
pub struct GradientStop {
    /// Offset position (0.0 to 1.0).
    pub offset: f32,
    /// Color at this stop.
    pub color: tiny_skia::Color,
}

/// Gradient geometry.
#[derive(Debug, Clone)]
pub enum GradientKind {
    /// Linear gradient from (x0, y0) to (x1, y1).
    Linear { x0: f32, y0: f32, x1: f32, y1: f32 },
    /// Radial gradient centered on (cx, cy) with the given outer radius.
    Radial { cx: f32, cy: f32, radius: f32 },
}

/// A linear or radial gradient with sorted color stops.
#[derive(Debug, Clone)]
pub struct CanvasGradient {
    /// Gradient geometry.
    pub kind: GradientKind,
    /// Color stops, kept sorted by offset.
    pub stops: Vec<GradientStop>,
}

impl CanvasGradient {
    /// Create a new linear gradient.
    pub fn new_linear(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            kind: GradientKind::Linear { x0, y0, x1, y1 },
            stops: Vec::new(),
        }
    }

    /// Create a new radial gradient.
    pub fn new_radial(cx: f32, cy: f32, radius: f32) -> Self {
        Self {
            kind: GradientKind::Radial { cx, cy, radius },
            stops: Vec::new(),
        }
    }

    /// Add a color stop from a CSS color string.
    pub fn add_color_stop(&mut self, offset: f32, color: &str) -> CanvasResult<()> {
        if !(0.0..=1.0).contains(&offset) {
            return Err(CanvasError::InvalidGradientStop(offset));
        }
        let color = parse_color(color)?;
        self.stops.push(GradientStop { offset, color });
        // Keep stops sorted by offset
        self.stops.sort_by(|a, b| {
            a.offset
                .partial_cmp(&b.offset)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_stay_sorted() {
        let mut gradient = CanvasGradient::new_linear(0.0, 0.0, 100.0, 0.0);
        gradient.add_color_stop(1.0, "#D32F2F").unwrap();
        gradient.add_color_stop(0.0, "#FFD700").unwrap();
        gradient.add_color_stop(0.5, "#FFF8F0").unwrap();

        let offsets: Vec<f32> = gradient.stops.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn out_of_range_offset_rejected() {
        let mut gradient = CanvasGradient::new_radial(50.0, 50.0, 35.0);
        assert!(matches!(
            gradient.add_color_stop(1.5, "#C62828"),
            Err(CanvasError::InvalidGradientStop(_))
        ));
        assert!(gradient.stops.is_empty());
    }

    #[test]
    fn invalid_color_rejected() {
        let mut gradient = CanvasGradient::new_linear(0.0, 0.0, 1.0, 1.0);
        assert!(matches!(
            gradient.add_color_stop(0.0, "not-a-color"),
            Err(CanvasError::ColorParseError(_))
        ));
    }
}
