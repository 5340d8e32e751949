//! Parameter structs for drawing operations.
//!
//! Named fields instead of long positional argument lists, grouping
//! semantically related parameters together.

/// Parameters for an axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectParams {
    /// X coordinate of the rectangle origin.
    pub x: f32,
    /// Y coordinate of the rectangle origin.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

/// Parameters for a rounded rectangle with a uniform corner radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundRectParams {
    /// X coordinate of the rectangle origin.
    pub x: f32,
    /// Y coordinate of the rectangle origin.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
    /// Corner radius applied to all four corners.
    pub radius: f32,
}

/// Parameters for a full axis-aligned ellipse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseParams {
    /// X coordinate of the ellipse center.
    pub cx: f32,
    /// Y coordinate of the ellipse center.
    pub cy: f32,
    /// Horizontal radius.
    pub rx: f32,
    /// Vertical radius.
    pub ry: f32,
}

/// A borrowed RGBA image (premultiplied alpha, 4 bytes per pixel).
#[derive(Debug, Clone, Copy)]
pub struct ImageDataRef<'a> {
    /// Pixel data, row-major RGBA.
    pub data: &'a [u8],
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}
