//! The raster drawing surface.

use crate::error::{CanvasError, CanvasResult};
use crate::geometry::{EllipseParams, ImageDataRef, RectParams, RoundRectParams};
use crate::gradient::{CanvasGradient, GradientKind};
use crate::style::{parse_color, FontSpec, Paint, TextAlign};
use crate::text::TextMetrics;
use cosmic_text::{Attrs, Buffer, CacheKeyFlags, Command, FontSystem, Metrics, Shaping, SwashCache};
use tiny_skia::{Pixmap, Transform};

/// Maximum canvas dimension (same as Chrome).
const MAX_DIMENSION: u32 = 32767;

/// A fixed-size RGBA drawing surface.
///
/// Drawing state is flat: the card compositor configures fill, stroke, and
/// font before each layer draw, so there is no save/restore stack, transform
/// stack, or clipping region.
pub struct Canvas {
    /// Width of the canvas in pixels.
    width: u32,
    /// Height of the canvas in pixels.
    height: u32,
    /// Pixel buffer (premultiplied alpha).
    pixmap: Pixmap,
    /// Font system for text shaping and measurement.
    font_system: FontSystem,
    /// Swash cache for glyph outline retrieval.
    swash_cache: SwashCache,
    /// Current fill paint.
    fill: Paint,
    /// Current stroke paint.
    stroke: Paint,
    /// Current stroke width.
    line_width: f32,
    /// Current font.
    font: FontSpec,
    /// Current text alignment.
    text_align: TextAlign,
}

impl Canvas {
    /// Create a canvas backed by the system font database.
    pub fn new(width: u32, height: u32) -> CanvasResult<Self> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        Self::with_fonts(width, height, db)
    }

    /// Create a canvas using the provided font database.
    pub fn with_fonts(width: u32, height: u32, font_db: fontdb::Database) -> CanvasResult<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(CanvasError::InvalidDimensions { width, height });
        }

        let pixmap =
            Pixmap::new(width, height).ok_or(CanvasError::InvalidDimensions { width, height })?;

        let font_system = FontSystem::new_with_locale_and_db("zh-CN".to_string(), font_db);

        Ok(Self {
            width,
            height,
            pixmap,
            font_system,
            swash_cache: SwashCache::new(),
            fill: Paint::default(),
            stroke: Paint::default(),
            line_width: 1.0,
            font: FontSpec::default(),
            text_align: TextAlign::default(),
        })
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    // --- Style setters ---

    /// Set the fill paint from a CSS color string.
    pub fn set_fill_style(&mut self, style: &str) -> CanvasResult<()> {
        self.fill = Paint::Color(parse_color(style)?);
        Ok(())
    }

    /// Set the fill paint to a gradient.
    pub fn set_fill_style_gradient(&mut self, gradient: CanvasGradient) {
        self.fill = match gradient.kind {
            GradientKind::Linear { .. } => Paint::LinearGradient(gradient),
            GradientKind::Radial { .. } => Paint::RadialGradient(gradient),
        };
    }

    /// Set the stroke paint from a CSS color string.
    pub fn set_stroke_style(&mut self, style: &str) -> CanvasResult<()> {
        self.stroke = Paint::Color(parse_color(style)?);
        Ok(())
    }

    /// Set the stroke paint to a gradient.
    pub fn set_stroke_style_gradient(&mut self, gradient: CanvasGradient) {
        self.stroke = match gradient.kind {
            GradientKind::Linear { .. } => Paint::LinearGradient(gradient),
            GradientKind::Radial { .. } => Paint::RadialGradient(gradient),
        };
    }

    /// Set the stroke width. Non-finite or non-positive values are ignored.
    pub fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.line_width = width;
        }
    }

    /// Set the current font.
    pub fn set_font(&mut self, font: FontSpec) {
        self.font = font;
    }

    /// Set the text alignment.
    pub fn set_text_align(&mut self, align: TextAlign) {
        self.text_align = align;
    }

    // --- Text ---

    /// Measure text with the current font.
    pub fn measure_text(&mut self, text: &str) -> TextMetrics {
        crate::text::measure_text(&mut self.font_system, text, &self.font)
    }

    /// Fill text with the anchor on the alphabetic baseline at (x, y),
    /// honoring the current alignment.
    pub fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        log::debug!(target: "canvas", "fillText \"{}\" {} {}", text, x, y);

        let font = self.font.clone();
        let metrics = Metrics::new(font.size_px, font.size_px * 1.2);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);

        // Disable hinting so glyph placement stays sub-pixel accurate
        let attrs = Attrs::new()
            .family(font.cosmic_family())
            .weight(font.weight)
            .cache_key_flags(CacheKeyFlags::DISABLE_HINTING);
        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(&mut self.font_system, false);

        let mut text_width: f32 = 0.0;
        for run in buffer.layout_runs() {
            text_width = text_width.max(run.line_w);
        }

        // (base_x, base_y) anchors the baseline of the run
        let base_x = x + self.text_align.x_offset(text_width);
        let base_y = y;

        let Some(paint) = make_paint(&self.fill) else {
            return;
        };

        for run in buffer.layout_runs() {
            for glyph in run.glyphs.iter() {
                let physical_glyph = glyph.physical((base_x, base_y), 1.0);
                let glyph_x = base_x + glyph.x + glyph.font_size * glyph.x_offset;
                let glyph_y = base_y + glyph.y - glyph.font_size * glyph.y_offset;

                let Some(commands) = self
                    .swash_cache
                    .get_outline_commands(&mut self.font_system, physical_glyph.cache_key)
                else {
                    continue;
                };

                // Font outlines have Y pointing up, the canvas has Y pointing
                // down, so Y coordinates are negated while building the path.
                let mut path_builder = tiny_skia::PathBuilder::new();
                for cmd in commands {
                    match cmd {
                        Command::MoveTo(p) => path_builder.move_to(p.x, -p.y),
                        Command::LineTo(p) => path_builder.line_to(p.x, -p.y),
                        Command::QuadTo(ctrl, end) => {
                            path_builder.quad_to(ctrl.x, -ctrl.y, end.x, -end.y)
                        }
                        Command::CurveTo(c1, c2, end) => {
                            path_builder.cubic_to(c1.x, -c1.y, c2.x, -c2.y, end.x, -end.y)
                        }
                        Command::Close => path_builder.close(),
                    }
                }

                if let Some(path) = path_builder.finish() {
                    let glyph_transform = Transform::from_translate(glyph_x, glyph_y);
                    self.pixmap.fill_path(
                        &path,
                        &paint,
                        tiny_skia::FillRule::Winding,
                        glyph_transform,
                        None,
                    );
                }
            }
        }
    }

    // --- Shape drawing ---

    /// Fill an axis-aligned rectangle.
    pub fn fill_rect(&mut self, rect: &RectParams) {
        if let Some(rect) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height) {
            if let Some(paint) = make_paint(&self.fill) {
                self.pixmap
                    .fill_rect(rect, &paint, Transform::identity(), None);
            }
        }
    }

    /// Fill a rounded rectangle.
    pub fn fill_round_rect(&mut self, params: &RoundRectParams) {
        if let Some(path) = round_rect_path(params) {
            if let Some(paint) = make_paint(&self.fill) {
                self.pixmap.fill_path(
                    &path,
                    &paint,
                    tiny_skia::FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            }
        }
    }

    /// Stroke a rounded rectangle with the current stroke paint and width.
    pub fn stroke_round_rect(&mut self, params: &RoundRectParams) {
        if let Some(path) = round_rect_path(params) {
            self.stroke_path(&path);
        }
    }

    /// Fill a full ellipse.
    pub fn fill_ellipse(&mut self, params: &EllipseParams) {
        if let Some(path) = ellipse_path(params) {
            if let Some(paint) = make_paint(&self.fill) {
                self.pixmap.fill_path(
                    &path,
                    &paint,
                    tiny_skia::FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            }
        }
    }

    /// Stroke the outline of a full ellipse.
    pub fn stroke_ellipse(&mut self, params: &EllipseParams) {
        if let Some(path) = ellipse_path(params) {
            self.stroke_path(&path);
        }
    }

    /// Stroke a straight line segment.
    pub fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) {
        let mut builder = tiny_skia::PathBuilder::new();
        builder.move_to(x0, y0);
        builder.line_to(x1, y1);
        if let Some(path) = builder.finish() {
            self.stroke_path(&path);
        }
    }

    fn stroke_path(&mut self, path: &tiny_skia::Path) {
        let stroke = tiny_skia::Stroke {
            width: self.line_width,
            ..Default::default()
        };
        if let Some(paint) = make_paint(&self.stroke) {
            self.pixmap
                .stroke_path(path, &paint, &stroke, Transform::identity(), None);
        }
    }

    // --- Images ---

    /// Draw an RGBA image scaled into the destination rectangle.
    ///
    /// Nearest-neighbor filtering keeps QR modules crisp when scaling.
    pub fn draw_image(&mut self, image: &ImageDataRef<'_>, dx: f32, dy: f32, dw: f32, dh: f32) {
        log::debug!(target: "canvas", "drawImage {}x{} at {} {}", image.width, image.height, dx, dy);
        let Some(pixmap) = tiny_skia::PixmapRef::from_bytes(image.data, image.width, image.height)
        else {
            return;
        };
        let paint = tiny_skia::PixmapPaint {
            quality: tiny_skia::FilterQuality::Nearest,
            ..Default::default()
        };

        let scale_x = dw / image.width as f32;
        let scale_y = dh / image.height as f32;
        let transform = Transform::from_translate(dx, dy).pre_scale(scale_x, scale_y);

        self.pixmap.draw_pixmap(0, 0, pixmap, &paint, transform, None);
    }

    // --- Output ---

    /// Read back a region as straight-alpha RGBA.
    pub fn get_image_data(&self, x: i32, y: i32, width: u32, height: u32) -> Vec<u8> {
        let mut data = vec![0u8; (width * height * 4) as usize];

        for dy in 0..height {
            for dx in 0..width {
                let src_x = x + dx as i32;
                let src_y = y + dy as i32;
                if src_x < 0
                    || src_x >= self.width as i32
                    || src_y < 0
                    || src_y >= self.height as i32
                {
                    continue;
                }

                let src_idx = (src_y as u32 * self.width + src_x as u32) as usize * 4;
                let dst_idx = ((dy * width + dx) * 4) as usize;
                let pixel = &self.pixmap.data()[src_idx..src_idx + 4];

                // Convert from premultiplied to straight alpha
                let a = pixel[3];
                if a == 0 {
                    continue;
                } else if a == 255 {
                    data[dst_idx..dst_idx + 4].copy_from_slice(pixel);
                } else {
                    let alpha_f = a as f32 / 255.0;
                    data[dst_idx] = (pixel[0] as f32 / alpha_f).min(255.0) as u8;
                    data[dst_idx + 1] = (pixel[1] as f32 / alpha_f).min(255.0) as u8;
                    data[dst_idx + 2] = (pixel[2] as f32 / alpha_f).min(255.0) as u8;
                    data[dst_idx + 3] = a;
                }
            }
        }

        data
    }

    /// Encode the canvas contents as a PNG.
    pub fn to_png(&self) -> CanvasResult<Vec<u8>> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            let mut writer = encoder.write_header()?;

            // PNG wants straight alpha
            let data = self.get_image_data(0, 0, self.width, self.height);
            writer.write_image_data(&data)?;
        }
        Ok(buf)
    }

    /// The underlying pixmap.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

/// Build a tiny-skia paint from a Paint style.
fn make_paint(style: &Paint) -> Option<tiny_skia::Paint<'static>> {
    let mut paint = tiny_skia::Paint {
        anti_alias: true,
        ..Default::default()
    };

    match style {
        Paint::Color(color) => {
            paint.set_color(*color);
            Some(paint)
        }
        Paint::LinearGradient(gradient) | Paint::RadialGradient(gradient) => {
            paint.shader = gradient_shader(gradient)?;
            Some(paint)
        }
    }
}

fn gradient_shader(gradient: &CanvasGradient) -> Option<tiny_skia::Shader<'static>> {
    if gradient.stops.is_empty() {
        return None;
    }

    let stops: Vec<tiny_skia::GradientStop> = gradient
        .stops
        .iter()
        .map(|stop| tiny_skia::GradientStop::new(stop.offset, stop.color))
        .collect();

    match gradient.kind {
        GradientKind::Linear { x0, y0, x1, y1 } => tiny_skia::LinearGradient::new(
            tiny_skia::Point { x: x0, y: y0 },
            tiny_skia::Point { x: x1, y: y1 },
            stops,
            tiny_skia::SpreadMode::Pad,
            Transform::identity(),
        ),
        GradientKind::Radial { cx, cy, radius } => tiny_skia::RadialGradient::new(
            tiny_skia::Point { x: cx, y: cy },
            tiny_skia::Point { x: 0.0, y: 0.0 },
            radius,
            stops,
            tiny_skia::SpreadMode::Pad,
            Transform::identity(),
        ),
    }
}

/// Build a rounded-rectangle path, clamping the radius to the rectangle.
fn round_rect_path(params: &RoundRectParams) -> Option<tiny_skia::Path> {
    let RoundRectParams {
        x,
        y,
        width,
        height,
        radius,
    } = *params;
    if width <= 0.0 || height <= 0.0 {
        return None;
    }

    let r = radius.max(0.0).min(width / 2.0).min(height / 2.0);

    let mut b = tiny_skia::PathBuilder::new();
    b.move_to(x + r, y);
    b.line_to(x + width - r, y);
    if r > 0.0 {
        b.quad_to(x + width, y, x + width, y + r);
    }
    b.line_to(x + width, y + height - r);
    if r > 0.0 {
        b.quad_to(x + width, y + height, x + width - r, y + height);
    }
    b.line_to(x + r, y + height);
    if r > 0.0 {
        b.quad_to(x, y + height, x, y + height - r);
    }
    b.line_to(x, y + r);
    if r > 0.0 {
        b.quad_to(x, y, x + r, y);
    }
    b.close();
    b.finish()
}

fn ellipse_path(params: &EllipseParams) -> Option<tiny_skia::Path> {
    let rect = tiny_skia::Rect::from_xywh(
        params.cx - params.rx,
        params.cy - params.ry,
        params.rx * 2.0,
        params.ry * 2.0,
    )?;
    tiny_skia::PathBuilder::from_oval(rect)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_canvas(width: u32, height: u32) -> Canvas {
        Canvas::with_fonts(width, height, fontdb::Database::new()).unwrap()
    }

    fn pixel(canvas: &Canvas, x: i32, y: i32) -> [u8; 4] {
        let data = canvas.get_image_data(x, y, 1, 1);
        [data[0], data[1], data[2], data[3]]
    }

    #[test]
    fn new_canvas_is_transparent() {
        let canvas = empty_canvas(100, 80);
        assert_eq!(canvas.width(), 100);
        assert_eq!(canvas.height(), 80);
        assert!(canvas.pixmap().data().iter().all(|&b| b == 0));
    }

    #[test]
    fn invalid_dimensions_rejected() {
        assert!(matches!(
            Canvas::with_fonts(0, 100, fontdb::Database::new()),
            Err(CanvasError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Canvas::with_fonts(100, 0, fontdb::Database::new()),
            Err(CanvasError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn fill_rect_writes_pixels() {
        let mut canvas = empty_canvas(100, 100);
        canvas.set_fill_style("#ff0000").unwrap();
        canvas.fill_rect(&RectParams {
            x: 10.0,
            y: 10.0,
            width: 50.0,
            height: 50.0,
        });

        assert_eq!(pixel(&canvas, 30, 30), [255, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 5, 5)[3], 0);
    }

    #[test]
    fn round_rect_leaves_corners_empty() {
        let mut canvas = empty_canvas(100, 100);
        canvas.set_fill_style("#0000ff").unwrap();
        canvas.fill_round_rect(&RoundRectParams {
            x: 10.0,
            y: 10.0,
            width: 80.0,
            height: 80.0,
            radius: 24.0,
        });

        // Interior filled
        assert_eq!(pixel(&canvas, 50, 50), [0, 0, 255, 255]);
        // Corner pixel just inside the bounding box stays outside the rounding
        assert_eq!(pixel(&canvas, 11, 11)[3], 0);
    }

    #[test]
    fn round_rect_radius_clamps_to_half_extent() {
        let mut canvas = empty_canvas(60, 60);
        canvas.set_fill_style("#00ff00").unwrap();
        canvas.fill_round_rect(&RoundRectParams {
            x: 10.0,
            y: 10.0,
            width: 40.0,
            height: 40.0,
            radius: 500.0,
        });
        // Degenerates to a circle; center is filled
        assert_eq!(pixel(&canvas, 30, 30), [0, 255, 0, 255]);
    }

    #[test]
    fn linear_gradient_fill_varies_over_x() {
        let mut canvas = empty_canvas(100, 20);
        let mut gradient = CanvasGradient::new_linear(0.0, 0.0, 100.0, 0.0);
        gradient.add_color_stop(0.0, "#000000").unwrap();
        gradient.add_color_stop(1.0, "#ffffff").unwrap();
        canvas.set_fill_style_gradient(gradient);
        canvas.fill_rect(&RectParams {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 20.0,
        });

        let left = pixel(&canvas, 2, 10);
        let right = pixel(&canvas, 97, 10);
        assert!(left[0] < 30, "left edge should be near black: {:?}", left);
        assert!(right[0] > 225, "right edge should be near white: {:?}", right);
    }

    #[test]
    fn radial_gradient_fill_varies_with_distance() {
        let mut canvas = empty_canvas(80, 80);
        let mut gradient = CanvasGradient::new_radial(40.0, 40.0, 35.0);
        gradient.add_color_stop(0.0, "#FF6B6B").unwrap();
        gradient.add_color_stop(1.0, "#C62828").unwrap();
        canvas.set_fill_style_gradient(gradient);
        canvas.fill_ellipse(&EllipseParams {
            cx: 40.0,
            cy: 40.0,
            rx: 35.0,
            ry: 35.0,
        });

        let center = pixel(&canvas, 40, 40);
        let rim = pixel(&canvas, 40, 10);
        assert!(center[1] > rim[1], "center should be lighter than rim");
    }

    #[test]
    fn stroke_line_draws() {
        let mut canvas = empty_canvas(50, 50);
        canvas.set_stroke_style("#D32F2F").unwrap();
        canvas.set_line_width(2.0);
        canvas.stroke_line(10.0, 25.0, 40.0, 25.0);

        assert!(pixel(&canvas, 25, 25)[3] > 0);
        assert_eq!(pixel(&canvas, 25, 40)[3], 0);
    }

    #[test]
    fn line_width_ignores_invalid_values() {
        let mut canvas = empty_canvas(10, 10);
        canvas.set_line_width(3.0);
        canvas.set_line_width(-1.0);
        canvas.set_line_width(f32::NAN);
        canvas.set_line_width(0.0);
        assert_eq!(canvas.line_width, 3.0);
    }

    #[test]
    fn draw_image_scales_with_nearest_filter() {
        let mut canvas = empty_canvas(40, 40);
        // 2x2 opaque checkerboard: red, blue / blue, red
        let src: Vec<u8> = vec![
            255, 0, 0, 255, 0, 0, 255, 255, //
            0, 0, 255, 255, 255, 0, 0, 255,
        ];
        canvas.draw_image(
            &ImageDataRef {
                data: &src,
                width: 2,
                height: 2,
            },
            0.0,
            0.0,
            40.0,
            40.0,
        );

        assert_eq!(pixel(&canvas, 5, 5), [255, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 35, 5), [0, 0, 255, 255]);
        assert_eq!(pixel(&canvas, 5, 35), [0, 0, 255, 255]);
        assert_eq!(pixel(&canvas, 35, 35), [255, 0, 0, 255]);
    }

    #[test]
    fn to_png_emits_png_signature() {
        let mut canvas = empty_canvas(16, 16);
        canvas.set_fill_style("#FFF8F0").unwrap();
        canvas.fill_rect(&RectParams {
            x: 0.0,
            y: 0.0,
            width: 16.0,
            height: 16.0,
        });

        let png = canvas.to_png().unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn get_image_data_out_of_bounds_is_transparent() {
        let canvas = empty_canvas(10, 10);
        let data = canvas.get_image_data(-5, -5, 4, 4);
        assert!(data.iter().all(|&b| b == 0));
    }
}
