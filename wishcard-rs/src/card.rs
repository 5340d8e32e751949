//! The share-card compositor.
//!
//! Renders a wish into a fixed 750x1100 PNG: festive background, title
//! block, content card with the wrapped wish text, and a QR block linking
//! back to the wish wall.

use crate::error::CardResult;
use crate::layout;
use crate::qr;
use crate::wish::Wish;
use wishcard_canvas2d::{
    Canvas, CanvasGradient, EllipseParams, FontSpec, ImageDataRef, RectParams, RoundRectParams,
    TextAlign,
};

/// Card width in pixels.
pub const CARD_WIDTH: u32 = 750;
/// Card height in pixels.
pub const CARD_HEIGHT: u32 = 1100;

/// Maximum line width for the wish text.
const CONTENT_MAX_WIDTH: f32 = 610.0;
/// Wish text size in pixels.
const CONTENT_FONT_PX: f32 = 34.0;
/// Vertical advance between wish text lines.
const CONTENT_LINE_HEIGHT: f32 = 52.0;
/// Maximum number of wish text lines before truncation.
const CONTENT_MAX_LINES: usize = 4;

/// Rendered size of the QR symbol.
const QR_SIZE: f32 = 140.0;
/// Top of the QR block.
const QR_BLOCK_Y: f32 = 750.0;
/// Left edge of the QR symbol.
const QR_X: f32 = 305.0;
/// Top edge of the QR symbol.
const QR_DRAW_Y: f32 = 795.0;
/// White backing plate padding around the QR symbol.
const QR_PAD: f32 = 12.0;

/// A finished share card, held as encoded PNG bytes.
#[derive(Debug, Clone)]
pub struct CardImage {
    png: Vec<u8>,
}

impl CardImage {
    /// The encoded PNG.
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Consume the card, returning the encoded PNG.
    pub fn into_png(self) -> Vec<u8> {
        self.png
    }
}

/// Renders share cards.
///
/// Each [`generate`](Self::generate) call builds a fresh canvas, so renders
/// never observe each other's state.
#[derive(Debug, Clone, Default)]
pub struct CardRenderer {
    fonts: Option<fontdb::Database>,
}

impl CardRenderer {
    /// A renderer backed by the system font database.
    pub fn new() -> Self {
        Self::default()
    }

    /// A renderer using the provided fonts instead of the system's.
    pub fn with_fonts(font_db: fontdb::Database) -> Self {
        Self {
            fonts: Some(font_db),
        }
    }

    /// Render the wish into a share card.
    ///
    /// Rasterization is CPU-bound, so it runs on a blocking worker thread.
    pub async fn generate(&self, wish: &Wish, redirect_url: &str) -> CardResult<CardImage> {
        let wish = wish.clone();
        let redirect_url = redirect_url.to_string();
        let fonts = self.fonts.clone();

        let png = tokio::task::spawn_blocking(move || render_card(&wish, &redirect_url, fonts))
            .await??;

        Ok(CardImage { png })
    }
}

fn render_card(
    wish: &Wish,
    redirect_url: &str,
    fonts: Option<fontdb::Database>,
) -> CardResult<Vec<u8>> {
    log::debug!("Rendering card for wish by {}", wish.display_author());

    let mut canvas = match fonts {
        Some(db) => Canvas::with_fonts(CARD_WIDTH, CARD_HEIGHT, db)?,
        None => Canvas::new(CARD_WIDTH, CARD_HEIGHT)?,
    };

    draw_background(&mut canvas)?;
    draw_title(&mut canvas)?;
    draw_lantern(&mut canvas, 70.0, 160.0)?;
    draw_lantern(&mut canvas, CARD_WIDTH as f32 - 70.0, 160.0)?;
    draw_content_card(&mut canvas, wish)?;
    draw_qr_block(&mut canvas, redirect_url)?;

    Ok(canvas.to_png()?)
}

fn draw_background(canvas: &mut Canvas) -> CardResult<()> {
    let mut bg = CanvasGradient::new_linear(0.0, 0.0, 0.0, CARD_HEIGHT as f32);
    bg.add_color_stop(0.0, "#FFF8F0")?;
    bg.add_color_stop(0.5, "#FDFBF7")?;
    bg.add_color_stop(1.0, "#FFE8E8")?;
    canvas.set_fill_style_gradient(bg);
    canvas.fill_rect(&RectParams {
        x: 0.0,
        y: 0.0,
        width: CARD_WIDTH as f32,
        height: CARD_HEIGHT as f32,
    });

    // Accent bars along the top and bottom edges
    let mut bar = CanvasGradient::new_linear(0.0, 0.0, CARD_WIDTH as f32, 0.0);
    bar.add_color_stop(0.0, "#D32F2F")?;
    bar.add_color_stop(0.5, "#FFD700")?;
    bar.add_color_stop(1.0, "#D32F2F")?;
    canvas.set_fill_style_gradient(bar.clone());
    canvas.fill_rect(&RectParams {
        x: 0.0,
        y: 0.0,
        width: CARD_WIDTH as f32,
        height: 16.0,
    });
    canvas.set_fill_style_gradient(bar);
    canvas.fill_rect(&RectParams {
        x: 0.0,
        y: CARD_HEIGHT as f32 - 16.0,
        width: CARD_WIDTH as f32,
        height: 16.0,
    });

    Ok(())
}

fn draw_title(canvas: &mut Canvas) -> CardResult<()> {
    let center = CARD_WIDTH as f32 / 2.0;
    canvas.set_text_align(TextAlign::Center);

    canvas.set_fill_style("#C62828")?;
    canvas.set_font(FontSpec::serif_bold(52.0));
    canvas.fill_text("新年许愿池", center, 85.0);

    canvas.set_fill_style("#B8860B")?;
    canvas.set_font(FontSpec::serif(20.0));
    canvas.fill_text("2025 NEW YEAR WISH", center, 115.0);

    canvas.set_stroke_style("#FFD700")?;
    canvas.set_line_width(2.0);
    canvas.stroke_line(center - 80.0, 128.0, center + 80.0, 128.0);

    Ok(())
}

/// A small hanging lantern, drawn as a radial-gradient ellipse with gold rims.
fn draw_lantern(canvas: &mut Canvas, x: f32, y: f32) -> CardResult<()> {
    canvas.set_stroke_style("#8B0000")?;
    canvas.set_line_width(2.0);
    canvas.stroke_line(x, y - 20.0, x, y);

    let mut body = CanvasGradient::new_radial(x, y + 30.0, 40.0);
    body.add_color_stop(0.0, "#FF6B6B")?;
    body.add_color_stop(1.0, "#C62828")?;
    canvas.set_fill_style_gradient(body);
    canvas.fill_ellipse(&EllipseParams {
        cx: x,
        cy: y + 30.0,
        rx: 30.0,
        ry: 40.0,
    });

    canvas.set_fill_style("#FFD700")?;
    for rim_y in [y + 10.0, y + 50.0] {
        canvas.fill_ellipse(&EllipseParams {
            cx: x,
            cy: rim_y,
            rx: 20.0,
            ry: 5.0,
        });
    }

    canvas.set_stroke_style("#FFD700")?;
    canvas.set_line_width(3.0);
    canvas.stroke_line(x, y + 70.0, x, y + 85.0);

    Ok(())
}

fn draw_content_card(canvas: &mut Canvas, wish: &Wish) -> CardResult<()> {
    let card_x = 50.0;
    let card_y = 220.0;
    let card_w = CARD_WIDTH as f32 - 100.0;
    let card_h = 400.0;
    let center = CARD_WIDTH as f32 / 2.0;

    // Soft drop shadow, drawn as an offset translucent plate under the card
    canvas.set_fill_style("rgba(211, 47, 47, 0.15)")?;
    canvas.fill_round_rect(&RoundRectParams {
        x: card_x + 4.0,
        y: card_y + 8.0,
        width: card_w,
        height: card_h,
        radius: 24.0,
    });

    canvas.set_fill_style("#FFFFFF")?;
    canvas.fill_round_rect(&RoundRectParams {
        x: card_x,
        y: card_y,
        width: card_w,
        height: card_h,
        radius: 24.0,
    });

    let mut border = CanvasGradient::new_linear(card_x, card_y, card_x + card_w, card_y + card_h);
    border.add_color_stop(0.0, "#D32F2F")?;
    border.add_color_stop(0.5, "#FFD700")?;
    border.add_color_stop(1.0, "#D32F2F")?;
    canvas.set_stroke_style_gradient(border);
    canvas.set_line_width(3.0);
    canvas.stroke_round_rect(&RoundRectParams {
        x: card_x,
        y: card_y,
        width: card_w,
        height: card_h,
        radius: 24.0,
    });

    canvas.set_text_align(TextAlign::Center);
    canvas.set_font(FontSpec::serif(42.0));
    canvas.set_fill_style("#C62828")?;
    canvas.fill_text("🏮", center, card_y + 55.0);

    // Wrap the wish text against real measured widths
    canvas.set_font(FontSpec::serif(CONTENT_FONT_PX));
    let laid_out = {
        let mut measure = |s: &str| canvas.measure_text(s).width;
        layout::layout(
            &wish.content,
            &mut measure,
            CONTENT_MAX_WIDTH,
            CONTENT_MAX_LINES,
        )
    };

    canvas.set_fill_style("#4A2C2A")?;
    let mut text_y = card_y + 115.0;
    for line in &laid_out.lines {
        canvas.fill_text(line, center, text_y);
        text_y += CONTENT_LINE_HEIGHT;
    }

    canvas.set_stroke_style("#FFD700")?;
    canvas.set_line_width(1.0);
    canvas.stroke_line(120.0, card_y + 350.0, CARD_WIDTH as f32 - 120.0, card_y + 350.0);

    canvas.set_font(FontSpec::serif(20.0));
    canvas.set_fill_style("#B8860B")?;
    canvas.fill_text(
        &format!("— {} —", wish.display_author()),
        center,
        card_y + 378.0,
    );

    Ok(())
}

fn draw_qr_block(canvas: &mut Canvas, redirect_url: &str) -> CardResult<()> {
    let center = CARD_WIDTH as f32 / 2.0;

    canvas.set_text_align(TextAlign::Center);
    canvas.set_font(FontSpec::serif_bold(26.0));
    canvas.set_fill_style("#C62828")?;
    canvas.fill_text("扫码许愿 · 分享祝福", center, QR_BLOCK_Y);

    match qr::encode(redirect_url, QR_SIZE as u32) {
        Ok(image) => {
            // Shadow plate, then the white backing, then the symbol itself
            canvas.set_fill_style("rgba(211, 47, 47, 0.15)")?;
            canvas.fill_round_rect(&RoundRectParams {
                x: QR_X - QR_PAD + 3.0,
                y: QR_DRAW_Y - QR_PAD + 5.0,
                width: QR_SIZE + QR_PAD * 2.0,
                height: QR_SIZE + QR_PAD * 2.0,
                radius: 16.0,
            });
            canvas.set_fill_style("#FFFFFF")?;
            canvas.fill_round_rect(&RoundRectParams {
                x: QR_X - QR_PAD,
                y: QR_DRAW_Y - QR_PAD,
                width: QR_SIZE + QR_PAD * 2.0,
                height: QR_SIZE + QR_PAD * 2.0,
                radius: 16.0,
            });

            canvas.draw_image(
                &ImageDataRef {
                    data: &image.data,
                    width: image.width,
                    height: image.height,
                },
                QR_X,
                QR_DRAW_Y,
                QR_SIZE,
                QR_SIZE,
            );

            canvas.set_font(FontSpec::serif_bold(16.0));
            canvas.set_fill_style("#B8860B")?;
            canvas.fill_text("✨ 新年许愿池 ✨", center, QR_DRAW_Y + 165.0);

            canvas.set_font(FontSpec::serif_bold(30.0));
            canvas.set_fill_style("#C62828")?;
            canvas.fill_text("愿你的愿望成真", center, QR_DRAW_Y + 220.0);

            canvas.set_font(FontSpec::serif(22.0));
            canvas.fill_text("🧧", 80.0, QR_DRAW_Y + 30.0);
            canvas.fill_text("🎆", CARD_WIDTH as f32 - 80.0, QR_DRAW_Y + 30.0);
        }
        Err(err) => {
            log::warn!("QR encoding failed: {err}; rendering textual fallback");
            draw_fallback_block(canvas)?;
        }
    }

    Ok(())
}

/// Replaces the QR block with a text-only closing when encoding fails.
fn draw_fallback_block(canvas: &mut Canvas) -> CardResult<()> {
    let center = CARD_WIDTH as f32 / 2.0;

    canvas.set_text_align(TextAlign::Center);
    canvas.set_font(FontSpec::serif_bold(32.0));
    canvas.set_fill_style("#C62828")?;
    canvas.fill_text("愿你的愿望成真", center, QR_BLOCK_Y + 50.0);

    canvas.set_font(FontSpec::serif(20.0));
    canvas.set_fill_style("#B8860B")?;
    canvas.fill_text("✨ 新年好运连连 ✨", center, QR_BLOCK_Y + 85.0);

    canvas.set_font(FontSpec::serif(24.0));
    canvas.set_fill_style("#C62828")?;
    canvas.fill_text("🧧", 100.0, 1040.0);
    canvas.fill_text("🎆", CARD_WIDTH as f32 - 100.0, 1040.0);

    Ok(())
}
