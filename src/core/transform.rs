use super::surface::Rect;

/// Smallest scale ever produced, used when the real surface has a zero dimension
pub const MIN_SCALE: f64 = 1e-6;

/// Mapping between the fixed virtual canvas and the real output surface
///
/// A single scalar is applied to both axes, so the canvas keeps its aspect
/// ratio and the unused area on the shorter axis becomes letterbox bars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Virtual-to-real scale factor (always > 0)
    pub scale: f64,
    /// Left edge of the scaled canvas inside the real surface
    pub offset_x: i32,
    /// Top edge of the scaled canvas inside the real surface
    pub offset_y: i32,
    /// Width of the canvas once scaled
    pub scaled_width: u32,
    /// Height of the canvas once scaled
    pub scaled_height: u32,
}

impl Transform {
    /// Transform of a real surface that matches the virtual size exactly
    pub fn identity(virtual_width: u32, virtual_height: u32) -> Self {
        Self {
            scale: 1.0,
            offset_x: 0,
            offset_y: 0,
            scaled_width: virtual_width,
            scaled_height: virtual_height,
        }
    }

    /// Map a real (device) position to virtual coordinates, truncating toward zero.
    ///
    /// The result is not clamped; positions inside the letterbox bars map
    /// outside the virtual canvas.
    pub fn to_virtual(&self, real_x: f64, real_y: f64) -> (i32, i32) {
        let x = (real_x - self.offset_x as f64) / self.scale;
        let y = (real_y - self.offset_y as f64) / self.scale;
        (x as i32, y as i32)
    }

    /// Map a virtual position to real (device) coordinates
    pub fn to_real(&self, virtual_x: f64, virtual_y: f64) -> (f64, f64) {
        (
            virtual_x * self.scale + self.offset_x as f64,
            virtual_y * self.scale + self.offset_y as f64,
        )
    }

    /// Region of the real surface covered by the scaled canvas
    pub fn dest_rect(&self) -> Rect {
        Rect::new(
            self.offset_x,
            self.offset_y,
            self.scaled_width as i32,
            self.scaled_height as i32,
        )
    }

    /// True when the canvas fills the real surface with no bars on either axis
    pub fn is_exact_fit(&self, real_width: u32, real_height: u32) -> bool {
        self.scaled_width == real_width && self.scaled_height == real_height
    }
}

/// Compute the letterbox transform for a real surface of `real_width` x `real_height`
pub fn compute_transform(virtual_size: (u32, u32), real_width: u32, real_height: u32) -> Transform {
    let virtual_width = virtual_size.0.max(1);
    let virtual_height = virtual_size.1.max(1);

    let scale = if real_width == 0 || real_height == 0 {
        MIN_SCALE
    } else {
        let scale_w = real_width as f64 / virtual_width as f64;
        let scale_h = real_height as f64 / virtual_height as f64;
        scale_w.min(scale_h).max(MIN_SCALE)
    };

    // Float error must never push the canvas past the real bounds
    let scaled_width = ((virtual_width as f64 * scale).floor() as u32).min(real_width);
    let scaled_height = ((virtual_height as f64 * scale).floor() as u32).min(real_height);

    Transform {
        scale,
        offset_x: ((real_width - scaled_width) / 2) as i32,
        offset_y: ((real_height - scaled_height) / 2) as i32,
        scaled_width,
        scaled_height,
    }
}
