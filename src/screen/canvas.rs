use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};

use super::font::{self, ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    Solid,
    Dashed { on: u32, off: u32 },
}

/// Text colour, optionally with a one-pixel halo drawn underneath.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ink {
    pub color: Rgb<u8>,
    pub glow: Option<Rgb<u8>>,
}

impl Ink {
    #[must_use]
    pub const fn plain(color: Rgb<u8>) -> Self {
        Self { color, glow: None }
    }

    #[must_use]
    pub const fn glowing(color: Rgb<u8>, glow: Rgb<u8>) -> Self {
        Self {
            color,
            glow: Some(glow),
        }
    }
}

/// Minimal raster surface; every write is clipped to the image bounds.
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    #[must_use]
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, background),
        }
    }

    #[must_use]
    pub const fn image(&self) -> &RgbImage {
        &self.image
    }

    fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if x < self.image.width() && y < self.image.height() {
            self.image.put_pixel(x, y, color);
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgb<u8>) {
        for dy in 0..height.max(0) {
            for dx in 0..width.max(0) {
                self.put(i64::from(x + dx), i64::from(y + dy), color);
            }
        }
    }

    pub fn hline(&mut self, y: i32, stroke: Stroke, color: Rgb<u8>) {
        for x in 0..self.image.width() {
            let draw = match stroke {
                Stroke::Solid => true,
                Stroke::Dashed { on, off } => x % (on + off) < on,
            };
            if draw {
                self.put(i64::from(x), i64::from(y), color);
            }
        }
    }

    /// Width in pixels `text` occupies at `scale`.
    #[must_use]
    pub fn text_width(text: &str, scale: u32) -> i32 {
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        i32::try_from(chars.saturating_mul(ADVANCE * scale)).unwrap_or(i32::MAX)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        align: Align,
        baseline: Baseline,
        scale: u32,
        ink: Ink,
    ) {
        let width = Self::text_width(text, scale);
        let height = i32::try_from(GLYPH_HEIGHT * scale).unwrap_or(i32::MAX);

        let left = match align {
            Align::Left => x,
            Align::Center => x - width / 2,
            Align::Right => x - width,
        };
        let top = match baseline {
            Baseline::Top => y,
            Baseline::Middle => y - height / 2,
            Baseline::Bottom => y - height,
        };

        let lit = Self::lit_pixels(text, i64::from(left), i64::from(top), scale);

        if let Some(glow) = ink.glow {
            for &(px, py) in &lit {
                for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
                    self.put(px + dx, py + dy, glow);
                }
            }
        }
        for (px, py) in lit {
            self.put(px, py, ink.color);
        }
    }

    fn lit_pixels(text: &str, left: i64, top: i64, scale: u32) -> Vec<(i64, i64)> {
        let scale_i = i64::from(scale);
        let mut pixels = Vec::new();
        let mut pen_x = left;

        for c in text.chars() {
            let glyph = font::glyph(c);
            for (row_idx, row) in (0_i64..).zip(glyph) {
                for col in 0..GLYPH_WIDTH {
                    if !font::is_lit(row, col) {
                        continue;
                    }
                    let gx = pen_x + i64::from(col) * scale_i;
                    let gy = top + row_idx * scale_i;
                    for sy in 0..scale_i {
                        for sx in 0..scale_i {
                            pixels.push((gx + sx, gy + sy));
                        }
                    }
                }
            }
            pen_x += i64::from(ADVANCE) * scale_i;
        }

        pixels
    }

    /// Encode the surface as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if the PNG encoder fails.
    pub fn encode_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut bytes: Vec<u8> = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut canvas = Canvas::new(4, 4, BLACK);
        canvas.fill_rect(-2, -2, 4, 4, WHITE);

        assert_eq!(*canvas.image().get_pixel(0, 0), WHITE);
        assert_eq!(*canvas.image().get_pixel(1, 1), WHITE);
        assert_eq!(*canvas.image().get_pixel(2, 2), BLACK);
    }

    #[test]
    fn test_dashed_line_alternates() {
        let mut canvas = Canvas::new(12, 1, BLACK);
        canvas.hline(0, Stroke::Dashed { on: 3, off: 3 }, WHITE);

        let row: Vec<bool> = (0..12)
            .map(|x| *canvas.image().get_pixel(x, 0) == WHITE)
            .collect();
        assert_eq!(
            row,
            vec![true, true, true, false, false, false, true, true, true, false, false, false]
        );
    }

    #[test]
    fn test_text_width_scales() {
        assert_eq!(Canvas::text_width("vis", 1), 18);
        assert_eq!(Canvas::text_width("Me", 2), 24);
        assert_eq!(Canvas::text_width("", 1), 0);
    }

    #[test]
    fn test_right_aligned_text_ends_at_anchor() {
        let mut canvas = Canvas::new(40, 10, BLACK);
        canvas.text("1", 30, 0, Align::Right, Baseline::Top, 1, Ink::plain(WHITE));

        // '1' occupies columns 1..=3 of its cell; the cell spans 24..30.
        assert_eq!(*canvas.image().get_pixel(26, 1), WHITE);
        assert!((30..40).all(|x| (0..10).all(|y| *canvas.image().get_pixel(x, y) == BLACK)));
    }

    #[test]
    fn test_encode_png_signature() {
        let canvas = Canvas::new(2, 2, BLACK);
        let bytes = canvas.encode_png().unwrap_or_default();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
