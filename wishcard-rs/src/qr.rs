//! QR code rasterization in the card's palette.

use crate::error::{CardError, CardResult};
use qrcode::{EcLevel, QrCode};

/// Quiet-zone width in modules on each side of the symbol.
const QUIET_ZONE: u32 = 2;
/// Cosmetic frame width in output pixels.
const BORDER_PX: u32 = 4;

/// Light background, matches the card's paper tone.
const LIGHT: [u8; 4] = [0xFF, 0xF8, 0xF0, 0xFF];
/// Dark modules, festive red.
const DARK: [u8; 4] = [0xC6, 0x28, 0x28, 0xFF];
/// Frame color.
const FRAME: [u8; 4] = [0xD3, 0x2F, 0x2F, 0xFF];

/// A rasterized QR symbol, straight-alpha RGBA.
#[derive(Debug, Clone)]
pub struct QrImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Encode `url` into a QR symbol and rasterize it at roughly `size` pixels.
///
/// The module grid is scaled by a whole-pixel factor so the output stays
/// crisp; the result may therefore be slightly smaller than `size`.
pub fn encode(url: &str, size: u32) -> CardResult<QrImage> {
    let code = QrCode::with_error_correction_level(url.as_bytes(), EcLevel::M)
        .map_err(|e| CardError::Encoding(e.to_string()))?;
    let colors = code.to_colors();
    let modules = code.width() as u32;
    let total = modules + 2 * QUIET_ZONE;
    let scale = (size / total).max(1);
    let side = total * scale;

    let mut data = vec![0u8; (side * side * 4) as usize];
    for py in 0..side {
        let module_y = py / scale;
        for px in 0..side {
            let module_x = px / scale;
            let in_quiet = module_x < QUIET_ZONE
                || module_y < QUIET_ZONE
                || module_x >= modules + QUIET_ZONE
                || module_y >= modules + QUIET_ZONE;
            let dark = !in_quiet && {
                let mx = (module_x - QUIET_ZONE) as usize;
                let my = (module_y - QUIET_ZONE) as usize;
                colors[my * modules as usize + mx] == qrcode::Color::Dark
            };
            let framed = px < BORDER_PX
                || py < BORDER_PX
                || px >= side - BORDER_PX
                || py >= side - BORDER_PX;
            let color = if framed {
                FRAME
            } else if dark {
                DARK
            } else {
                LIGHT
            };
            let offset = ((py * side + px) * 4) as usize;
            data[offset..offset + 4].copy_from_slice(&color);
        }
    }

    Ok(QrImage {
        data,
        width: side,
        height: side,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_a_short_url() {
        let image = encode("https://wish.baihehuakai666.asia/", 140).unwrap();
        assert_eq!(image.width, image.height);
        assert!(image.width <= 140);
        assert_eq!(image.data.len(), (image.width * image.height * 4) as usize);
        let dark_pixels = image
            .data
            .chunks_exact(4)
            .filter(|px| px[..3] == DARK[..3])
            .count();
        assert!(dark_pixels > 0, "expected dark modules in the raster");
    }

    #[test]
    fn oversized_payload_is_an_encoding_error() {
        // Version 40-M tops out well below this; encoding must fail cleanly.
        let payload = "a".repeat(3000);
        match encode(&payload, 140) {
            Err(CardError::Encoding(_)) => {}
            other => panic!("expected encoding error, got {other:?}"),
        }
    }

    #[test]
    fn frame_pixels_use_the_frame_color() {
        let image = encode("https://example.com/", 140).unwrap();
        assert_eq!(image.data[..4], FRAME);
    }

    #[test]
    fn scale_never_drops_below_one_module_per_pixel() {
        // Tiny target size still produces one pixel per module.
        let image = encode("https://example.com/", 1).unwrap();
        assert!(image.width >= 21 + 2 * QUIET_ZONE);
    }
}
