use std::rc::Rc;

use anyhow::{anyhow, Result};
use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use fontdue::FontSettings;

use super::surface::{Rect, Rgba, Surface};

/// Edge length of a built-in bitmap glyph
const CELL: u32 = 8;

#[derive(Clone)]
enum Face {
    Outline(Rc<fontdue::Font>),
    /// 8x8 bitmap glyphs, scaled in whole steps
    Bitmap,
}

/// A typeface at one pixel size, for single-line labels.
///
/// Loaded TrueType/OpenType faces are rasterised with fontdue; the
/// fallback draws the font8x8 bitmap set so text never disappears.
#[derive(Clone)]
pub struct Font {
    face: Face,
    size: f32,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("size", &self.size)
            .field("fallback", &self.is_fallback())
            .finish()
    }
}

impl Font {
    /// Parse font file contents
    pub fn from_bytes(bytes: &[u8], size: f32) -> Result<Self> {
        let face = fontdue::Font::from_bytes(bytes, FontSettings::default()).map_err(|e| anyhow!("{}", e))?;
        Ok(Self {
            face: Face::Outline(Rc::new(face)),
            size: size.max(1.0),
        })
    }

    /// Built-in bitmap font, roughly `size` pixels tall
    pub fn fallback(size: f32) -> Self {
        Self {
            face: Face::Bitmap,
            size: size.max(1.0),
        }
    }

    /// Same face at another size
    pub fn with_size(&self, size: f32) -> Self {
        Self {
            face: self.face.clone(),
            size: size.max(1.0),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.face, Face::Bitmap)
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    fn bitmap_scale(&self) -> u32 {
        ((self.size / CELL as f32).round() as u32).max(1)
    }

    /// Width and height of `text` on one line
    pub fn measure(&self, text: &str) -> (u32, u32) {
        match &self.face {
            Face::Bitmap => {
                let cell = CELL * self.bitmap_scale();
                (text.chars().count() as u32 * cell, cell)
            }
            Face::Outline(face) => {
                let (ascent, descent) = line_extent(face, self.size);
                let mut width = 0.0f32;
                let mut prev = None;
                for c in text.chars() {
                    width += kern(face, prev, c, self.size) + face.metrics(c, self.size).advance_width;
                    prev = Some(c);
                }
                (width.ceil() as u32, (ascent - descent).ceil() as u32)
            }
        }
    }

    /// `text` in `color` on a transparent surface of [`measure`](Self::measure) size
    pub fn render(&self, text: &str, color: Rgba) -> Surface {
        let (width, height) = self.measure(text);
        let mut out = Surface::filled(width.max(1), height.max(1), Rgba::TRANSPARENT);
        match &self.face {
            Face::Bitmap => self.draw_bitmap(&mut out, text, color),
            Face::Outline(face) => self.draw_outline(face, &mut out, text, color),
        }
        out
    }

    fn draw_bitmap(&self, out: &mut Surface, text: &str, color: Rgba) {
        let scale = self.bitmap_scale() as i32;
        let cell = CELL as i32 * scale;

        for (i, c) in text.chars().enumerate() {
            let glyph = BASIC_FONTS
                .get(c)
                .or_else(|| LATIN_FONTS.get(c))
                .or_else(|| BASIC_FONTS.get('?'))
                .unwrap_or_default();
            let x0 = i as i32 * cell;

            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..CELL as i32 {
                    // Bit 0 is the leftmost pixel
                    if bits >> col & 1 == 1 {
                        out.fill_rect(Rect::new(x0 + col * scale, row as i32 * scale, scale, scale), color);
                    }
                }
            }
        }
    }

    fn draw_outline(&self, face: &fontdue::Font, out: &mut Surface, text: &str, color: Rgba) {
        let (ascent, _) = line_extent(face, self.size);
        let baseline = ascent.round() as i32;
        let mut pen = 0.0f32;
        let mut prev = None;

        for c in text.chars() {
            pen += kern(face, prev, c, self.size);
            prev = Some(c);

            let (metrics, coverage) = face.rasterize(c, self.size);
            let gx = (pen + metrics.xmin as f32).round() as i32;
            let gy = baseline - metrics.ymin - metrics.height as i32;
            pen += metrics.advance_width;

            for (i, &cov) in coverage.iter().enumerate() {
                if cov == 0 {
                    continue;
                }
                let x = gx + (i % metrics.width) as i32;
                let y = gy + (i / metrics.width) as i32;
                let alpha = (color.a as u32 * cov as u32 / 255) as u8;
                // Neighbouring glyph boxes can overlap; keep the stronger coverage
                if out.get(x, y).is_some_and(|p| p.a < alpha) {
                    out.set_pixel(x, y, color.with_alpha(alpha));
                }
            }
        }
    }
}

fn line_extent(face: &fontdue::Font, size: f32) -> (f32, f32) {
    face.horizontal_line_metrics(size)
        .map(|m| (m.ascent, m.descent))
        .unwrap_or((size, 0.0))
}

fn kern(face: &fontdue::Font, prev: Option<char>, c: char, size: f32) -> f32 {
    prev.and_then(|p| face.horizontal_kern(p, c, size)).unwrap_or(0.0)
}
