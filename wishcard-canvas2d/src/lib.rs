//! Minimal Canvas-2D-style drawing surface used by the wish-card compositor.
//!
//! This crate keeps just the slice of the Canvas 2D model the share-card
//! pipeline draws with, without a browser or JavaScript runtime:
//! - `tiny-skia` for rasterization
//! - `cosmic-text` for text shaping, measurement, and glyph outlines
//! - `fontdb` for font database management
//!
//! # Example
//!
//! ```rust,ignore
//! use wishcard_canvas2d::{Canvas, RectParams};
//!
//! let mut canvas = Canvas::new(400, 300)?;
//! canvas.set_fill_style("#ff0000")?;
//! canvas.fill_rect(&RectParams { x: 10.0, y: 10.0, width: 100.0, height: 50.0 });
//! let png_data = canvas.to_png()?;
//! ```

mod error;
mod geometry;
mod gradient;
mod style;
mod surface;
mod text;

pub use error::{CanvasError, CanvasResult};
pub use geometry::{EllipseParams, ImageDataRef, RectParams, RoundRectParams};
pub use gradient::{CanvasGradient, GradientKind, GradientStop};
pub use style::{FontFamily, FontSpec, Paint, TextAlign};
pub use surface::Canvas;
pub use text::TextMetrics;

pub use cosmic_text::Weight;
