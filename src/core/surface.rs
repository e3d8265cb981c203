use bytemuck::{Pod, Zeroable};
use image::imageops::{self, FilterType};
use image::ImageBuffer;

/// 8-bit RGBA color, laid out exactly as the GPU upload expects
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Source-over compositing of `self` onto `dst`
    pub fn over(self, dst: Rgba) -> Rgba {
        match self.a {
            255 => self,
            0 => dst,
            a => {
                let sa = a as u32;
                let inv = 255 - sa;
                let mix = |s: u8, d: u8| ((s as u32 * sa + d as u32 * inv + 127) / 255) as u8;
                Rgba::new(
                    mix(self.r, dst.r),
                    mix(self.g, dst.g),
                    mix(self.b, dst.b),
                    (sa + (dst.a as u32 * inv + 127) / 255) as u8,
                )
            }
        }
    }
}

impl From<[u8; 3]> for Rgba {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgba::rgb(r, g, b)
    }
}

/// Axis-aligned rectangle in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centered on `(cx, cy)`
    pub fn from_center(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Self::new(cx - w / 2, cy - h / 2, w, h)
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Half-open containment test: the right and bottom edges are outside
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Same center, size multiplied by `factor`
    pub fn scaled(&self, factor: f32) -> Rect {
        let (cx, cy) = self.center();
        let w = (self.w as f32 * factor).round() as i32;
        let h = (self.h as f32 * factor).round() as i32;
        Rect::from_center(cx, cy, w, h)
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Intersection with `[0, width) x [0, height)`
    fn clipped(&self, width: u32, height: u32) -> Rect {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = self.right().min(width as i32);
        let y1 = self.bottom().min(height as i32);
        Rect::new(x0, y0, (x1 - x0).max(0), (y1 - y0).max(0))
    }
}

/// Owned RGBA pixel buffer
///
/// Used both for the fixed-size virtual canvas every screen draws onto and
/// for the real surface that is handed to the platform each frame.
#[derive(Clone, PartialEq)]
pub struct Surface {
    pixels: Vec<Rgba>,
    width: u32,
    height: u32,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Surface {
    /// Opaque black surface
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba::BLACK)
    }

    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            pixels: vec![color; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Wrap tightly packed RGBA8 bytes. Returns `None` when the length does not match.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != width as usize * height as usize * 4 {
            return None;
        }
        Some(Self {
            pixels: bytemuck::cast_slice(bytes).to_vec(),
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Raw RGBA8 bytes, row-major, no padding
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Overwrite one pixel; out-of-bounds writes are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Alpha-blend one pixel; out-of-bounds writes are ignored
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color.over(self.pixels[i]);
        }
    }

    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Overwrite a rectangle (clipped to the surface)
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let clip = rect.clipped(self.width, self.height);
        for y in clip.y..clip.bottom() {
            let row = y as usize * self.width as usize;
            let start = row + clip.x as usize;
            self.pixels[start..start + clip.w as usize].fill(color);
        }
    }

    /// Alpha-blend a rectangle, e.g. a fade overlay
    pub fn blend_rect(&mut self, rect: Rect, color: Rgba) {
        if color.a == 255 {
            return self.fill_rect(rect, color);
        }
        let clip = rect.clipped(self.width, self.height);
        for y in clip.y..clip.bottom() {
            for x in clip.x..clip.right() {
                self.blend_pixel(x, y, color);
            }
        }
    }

    /// Rectangle outline growing inward by `thickness`
    pub fn stroke_rect(&mut self, rect: Rect, thickness: i32, color: Rgba) {
        let t = thickness.max(1).min(rect.w / 2 + 1).min(rect.h / 2 + 1);
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, t), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - t, rect.w, t), color);
        self.fill_rect(Rect::new(rect.x, rect.y, t, rect.h), color);
        self.fill_rect(Rect::new(rect.right() - t, rect.y, t, rect.h), color);
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Rgba) {
        let r_sq = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r_sq {
                    self.blend_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Circle outline (midpoint algorithm)
    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Rgba) {
        let (mut x, mut y) = (radius, 0);
        let mut p = 1 - radius;

        while x >= y {
            for (px, py) in [
                (cx + x, cy + y), (cx - x, cy + y),
                (cx + x, cy - y), (cx - x, cy - y),
                (cx + y, cy + x), (cx - y, cy + x),
                (cx + y, cy - x), (cx - y, cy - x),
            ] {
                self.blend_pixel(px, py, color);
            }
            y += 1;
            if p <= 0 {
                p += 2 * y + 1;
            } else {
                x -= 1;
                p += 2 * (y - x) + 1;
            }
        }
    }

    /// Line (Bresenham)
    pub fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgba) {
        let (mut x, mut y) = from;
        let (x2, y2) = to;
        let dx = (x2 - x).abs();
        let dy = -(y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.blend_pixel(x, y, color);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw `src` with its top-left corner at `(x, y)`, alpha-blended
    pub fn blit(&mut self, src: &Surface, x: i32, y: i32) {
        let dest = Rect::new(x, y, src.width as i32, src.height as i32).clipped(self.width, self.height);
        for ty in dest.y..dest.bottom() {
            for tx in dest.x..dest.right() {
                let s = src.pixels[(ty - y) as usize * src.width as usize + (tx - x) as usize];
                self.blend_pixel(tx, ty, s);
            }
        }
    }

    /// Draw `src` centered on `(cx, cy)`
    pub fn blit_centered(&mut self, src: &Surface, cx: i32, cy: i32) {
        self.blit(src, cx - src.width as i32 / 2, cy - src.height as i32 / 2);
    }

    /// Resample this surface into `dest` of `dst`, overwriting the covered pixels.
    ///
    /// Uses a triangle (bilinear) filter, which widens to an area average
    /// when shrinking. Same-size copies are exact. Parts of `dest` outside
    /// `dst` are skipped.
    pub fn resample_into(&self, dst: &mut Surface, dest: Rect) {
        if dest.is_empty() || self.is_empty() || dst.is_empty() {
            return;
        }
        let (Some(src), Some(mut target)) = (self.as_image(), dst.as_image_mut()) else {
            return;
        };

        let (x, y) = (dest.x as i64, dest.y as i64);
        if (dest.w as u32, dest.h as u32) == self.dimensions() {
            imageops::replace(&mut target, &src, x, y);
        } else {
            let scaled = imageops::resize(&src, dest.w as u32, dest.h as u32, FilterType::Triangle);
            imageops::replace(&mut target, &scaled, x, y);
        }
    }

    fn as_image(&self) -> Option<ImageBuffer<image::Rgba<u8>, &[u8]>> {
        ImageBuffer::from_raw(self.width, self.height, self.as_bytes())
    }

    fn as_image_mut(&mut self) -> Option<ImageBuffer<image::Rgba<u8>, &mut [u8]>> {
        let (width, height) = self.dimensions();
        ImageBuffer::from_raw(width, height, bytemuck::cast_slice_mut(&mut self.pixels))
    }
}
