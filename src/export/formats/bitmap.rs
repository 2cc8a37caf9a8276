//! Direct-draw raster export using an embedded 8x8 bitmap font.
//!
//! Glyphs the font does not cover (most emoji) are skipped; the page is
//! always produced.

use std::io::Cursor;

use font8x8::{
    BASIC_FONTS, BLOCK_FONTS, BOX_FONTS, GREEK_FONTS, LATIN_FONTS, MISC_FONTS, UnicodeFonts,
};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use crate::config::is_pictographic_char;
use crate::error::ExportError;
use crate::export::format::{Artifact, ExportFormat, FormatDescriptor};

const DESCRIPTOR: FormatDescriptor = FormatDescriptor {
    id: "bmp",
    name: "Bitmap Image",
    extension: "bmp",
    description: "BMP image drawn directly, no browser required",
    binary: true,
    content_type: Some("image/bmp"),
    requires_engine: false,
};

const SCALE: u32 = 2;
const CELL_WIDTH: u32 = 8 * SCALE;
const LINE_HEIGHT: u32 = 24;
const PADDING: u32 = 50;
const TITLE_Y: u32 = 20;
const TITLE_SPACE: u32 = 40;
const MIN_WIDTH: u32 = 600;

const BACKGROUND: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);
const STRIPE: Rgb<u8> = Rgb([0xf8, 0xf9, 0xfa]);
const INK: Rgb<u8> = Rgb([0x2c, 0x3e, 0x50]);
const BORDER: Rgb<u8> = Rgb([0xbd, 0xc3, 0xc7]);

pub struct BitmapFormat {
    descriptor: FormatDescriptor,
}

impl BitmapFormat {
    pub fn new() -> Self {
        Self {
            descriptor: DESCRIPTOR,
        }
    }
}

impl Default for BitmapFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportFormat for BitmapFormat {
    fn descriptor(&self) -> &FormatDescriptor {
        &self.descriptor
    }

    fn convert(&self, tree: &str) -> Result<Artifact, ExportError> {
        let canvas = rasterize(tree);
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(canvas).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Bmp)?;
        Ok(Artifact::Binary(bytes))
    }
}

/// Draw the non-blank lines of `tree` onto a new canvas.
pub fn rasterize(tree: &str) -> RgbImage {
    let lines: Vec<&str> = tree.lines().filter(|l| !l.trim().is_empty()).collect();
    let max_cells = lines.iter().map(|l| cell_count(l)).max().unwrap_or(0);

    let width = MIN_WIDTH.max(max_cells * CELL_WIDTH + PADDING * 2);
    let height = lines.len() as u32 * LINE_HEIGHT + PADDING * 2 + TITLE_SPACE;
    let mut canvas = RgbImage::from_pixel(width, height, BACKGROUND);

    let mut missing = 0usize;
    missing += draw_text(&mut canvas, PADDING, TITLE_Y, "Directory Structure");

    for (i, line) in lines.iter().enumerate() {
        let y = PADDING + TITLE_Y + i as u32 * LINE_HEIGHT;
        if i % 2 == 0 {
            fill_rect(
                &mut canvas,
                PADDING.saturating_sub(10),
                y.saturating_sub(3),
                width.saturating_sub(PADDING * 2) + 20,
                LINE_HEIGHT,
                STRIPE,
            );
        }
        missing += draw_text(&mut canvas, PADDING, y + (LINE_HEIGHT - 8 * SCALE) / 2, line);
    }

    stroke_border(&mut canvas, 2, BORDER);
    if missing > 0 {
        tracing::debug!(missing, "skipped glyphs not covered by the bitmap font");
    }
    canvas
}

/// Number of monospace cells a line occupies.
fn cell_count(line: &str) -> u32 {
    line.chars().map(cell_span).sum()
}

fn cell_span(c: char) -> u32 {
    match c {
        '\u{FE0F}' | '\u{200D}' => 0,
        c if is_pictographic_char(c) => 2,
        _ => 1,
    }
}

fn glyph(c: char) -> Option<[u8; 8]> {
    BASIC_FONTS
        .get(c)
        .or_else(|| BOX_FONTS.get(c))
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BLOCK_FONTS.get(c))
        .or_else(|| GREEK_FONTS.get(c))
        .or_else(|| MISC_FONTS.get(c))
}

/// Draw `text` starting at `(x, y)`; returns how many glyphs were unavailable.
fn draw_text(canvas: &mut RgbImage, x: u32, y: u32, text: &str) -> usize {
    let mut missing = 0;
    let mut cursor = x;
    for c in text.chars() {
        let span = cell_span(c);
        if span == 0 {
            continue;
        }
        match glyph(c) {
            Some(bitmap) => draw_glyph(canvas, cursor, y, &bitmap),
            None if c != ' ' => missing += 1,
            None => {}
        }
        cursor += span * CELL_WIDTH;
    }
    missing
}

fn draw_glyph(canvas: &mut RgbImage, x: u32, y: u32, bitmap: &[u8; 8]) {
    for (row, bits) in bitmap.iter().enumerate() {
        for col in 0..8u32 {
            if bits & (1 << col) != 0 {
                fill_rect(
                    canvas,
                    x + col * SCALE,
                    y + row as u32 * SCALE,
                    SCALE,
                    SCALE,
                    INK,
                );
            }
        }
    }
}

/// Fill a rectangle, clipped to the canvas.
fn fill_rect(canvas: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
    let x_end = x.saturating_add(w).min(canvas.width());
    let y_end = y.saturating_add(h).min(canvas.height());
    for py in y..y_end {
        for px in x..x_end {
            canvas.put_pixel(px, py, color);
        }
    }
}

fn stroke_border(canvas: &mut RgbImage, thickness: u32, color: Rgb<u8>) {
    let (w, h) = canvas.dimensions();
    fill_rect(canvas, 0, 0, w, thickness, color);
    fill_rect(canvas, 0, h.saturating_sub(thickness), w, thickness, color);
    fill_rect(canvas, 0, 0, thickness, h, color);
    fill_rect(canvas, w.saturating_sub(thickness), 0, thickness, h, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_has_minimum_width() {
        let canvas = rasterize("📂 a");
        assert_eq!(canvas.width(), MIN_WIDTH);
        assert_eq!(canvas.height(), LINE_HEIGHT + PADDING * 2 + TITLE_SPACE);
    }

    #[test]
    fn long_lines_widen_canvas() {
        let line = "x".repeat(100);
        let canvas = rasterize(&line);
        assert_eq!(canvas.width(), 100 * CELL_WIDTH + PADDING * 2);
    }

    #[test]
    fn emoji_take_two_cells_and_selectors_none() {
        assert_eq!(cell_count("📂 a"), 4);
        assert_eq!(cell_count("🕶️"), 2);
        assert_eq!(cell_count("├──"), 3);
    }

    #[test]
    fn box_drawing_and_ascii_are_covered() {
        for c in ['├', '─', '└', '│', 'a', 'Z', '.'] {
            assert!(glyph(c).is_some(), "missing glyph for {c}");
        }
        assert!(glyph('📂').is_none());
    }

    #[test]
    fn text_is_drawn_in_ink() {
        let canvas = rasterize("HELLO");
        assert!(canvas.pixels().any(|p| *p == INK));
        assert_eq!(*canvas.get_pixel(0, 0), BORDER);
    }

    #[test]
    fn convert_produces_decodable_bmp() {
        let artifact = BitmapFormat::new().convert("📂 root\n└── 📄 file.txt").unwrap();
        let Artifact::Binary(bytes) = artifact else {
            panic!("expected binary artifact");
        };
        assert_eq!(&bytes[..2], b"BM");
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Bmp).unwrap();
        assert_eq!(decoded.width(), MIN_WIDTH);
    }
}
