use log::{debug, error, info, warn};

use super::surface::{Rgba, Surface};
use super::transform::{compute_transform, Transform};
use crate::traits::DisplayBackend;

/// Whether the output is a window or covers the whole display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Windowed,
    Fullscreen,
}

impl DisplayMode {
    pub fn is_fullscreen(&self) -> bool {
        matches!(self, Self::Fullscreen)
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Windowed => Self::Fullscreen,
            Self::Fullscreen => Self::Windowed,
        }
    }
}

/// Parameters for [`DisplayManager::init`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySettings {
    /// Fixed logical canvas size
    pub virtual_size: (u32, u32),
    /// Window size used when windowed, and the fallback when the display
    /// resolution cannot be detected
    pub windowed_size: (u32, u32),
    pub fullscreen: bool,
    /// Color of the bars around the scaled canvas
    pub letterbox: Rgba,
}

impl DisplaySettings {
    /// Windowed size equal to the virtual size, black bars
    pub fn new(virtual_width: u32, virtual_height: u32, fullscreen: bool) -> Self {
        Self {
            virtual_size: (virtual_width, virtual_height),
            windowed_size: (virtual_width, virtual_height),
            fullscreen,
            letterbox: Rgba::BLACK,
        }
    }

    pub fn windowed_size(mut self, width: u32, height: u32) -> Self {
        self.windowed_size = (width, height);
        self
    }

    pub fn letterbox(mut self, color: Rgba) -> Self {
        self.letterbox = color;
        self
    }
}

/// Owns the virtual canvas, the real output surface and the transform
/// between them.
///
/// Screens draw onto [`surface_mut`](Self::surface_mut) and hit-test with
/// [`translate_pointer`](Self::translate_pointer); only the manager ever
/// touches the real surface. Resize and mode changes must happen between
/// frames, never while a screen is drawing.
pub struct DisplayManager<B: DisplayBackend> {
    backend: B,
    virtual_surface: Surface,
    real_surface: Surface,
    transform: Transform,
    mode: DisplayMode,
    windowed_size: (u32, u32),
    letterbox: Rgba,
}

impl<B: DisplayBackend> DisplayManager<B> {
    /// Open the output and allocate the virtual canvas.
    ///
    /// Never fails: a fullscreen request that the platform rejects falls
    /// back to windowed, and if that is rejected too the manager keeps an
    /// unpublished real surface of the windowed size so drawing still works.
    pub fn init(backend: B, settings: DisplaySettings) -> Self {
        let virtual_size = (settings.virtual_size.0.max(1), settings.virtual_size.1.max(1));
        let (win_w, win_h) = settings.windowed_size;

        let mut manager = Self {
            backend,
            virtual_surface: Surface::new(virtual_size.0, virtual_size.1),
            real_surface: Surface::filled(win_w, win_h, settings.letterbox),
            transform: compute_transform(virtual_size, win_w, win_h),
            mode: DisplayMode::Windowed,
            windowed_size: settings.windowed_size,
            letterbox: settings.letterbox,
        };

        let mode = if settings.fullscreen {
            DisplayMode::Fullscreen
        } else {
            DisplayMode::Windowed
        };
        let (w, h) = manager.target_size(mode);

        if !manager.apply(mode, w, h) {
            let recovered = mode.is_fullscreen() && manager.apply(DisplayMode::Windowed, win_w, win_h);
            if !recovered {
                error!("No output surface available; drawing continues off-screen");
            }
        }

        info!(
            "Display ready: virtual {}x{}, real {}x{} ({:?})",
            virtual_size.0,
            virtual_size.1,
            manager.real_surface.width(),
            manager.real_surface.height(),
            manager.mode
        );
        manager
    }

    /// The window was resized to `new_width` x `new_height`.
    ///
    /// The new surface is always windowed, so a resize while fullscreen
    /// drops back to a window of that size. A size equal to the current
    /// real surface is ignored in either mode, since platforms echo a resize
    /// after every mode change.
    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if (new_width, new_height) == self.real_size() {
            return;
        }
        if !self.apply(DisplayMode::Windowed, new_width, new_height) {
            warn!("Resize to {}x{} rejected; keeping previous surface", new_width, new_height);
        }
    }

    /// Switch between windowed and fullscreen.
    ///
    /// Entering fullscreen uses the detected display resolution. Leaving it
    /// restores the default windowed size from [`DisplaySettings`], so any
    /// size the user dragged the window to before is lost. On failure
    /// nothing changes.
    pub fn toggle_fullscreen(&mut self) {
        let next = self.mode.toggled();
        let (w, h) = self.target_size(next);
        if !self.apply(next, w, h) {
            warn!("Switch to {:?} rejected; staying {:?}", next, self.mode);
        }
    }

    /// Letterbox transform for a real surface of the given size
    pub fn compute_transform(&self, real_width: u32, real_height: u32) -> Transform {
        compute_transform(self.virtual_size(), real_width, real_height)
    }

    /// Scale the virtual canvas onto the real surface and publish it.
    ///
    /// Call once per frame after all drawing. A failed publish skips the
    /// frame; the next call tries again.
    pub fn present(&mut self) {
        if self.real_surface.is_empty() {
            return;
        }

        self.real_surface.fill(self.letterbox);
        self.virtual_surface
            .resample_into(&mut self.real_surface, self.transform.dest_rect());

        if let Err(e) = self.backend.present(&self.real_surface) {
            warn!("Frame skipped: {:#}", e);
        }
    }

    /// Map a real device position to virtual canvas coordinates (unclamped)
    pub fn translate_pointer(&self, real_x: f64, real_y: f64) -> (i32, i32) {
        self.transform.to_virtual(real_x, real_y)
    }

    /// True if a translated position lies on the virtual canvas
    pub fn contains_virtual(&self, x: i32, y: i32) -> bool {
        self.virtual_surface.rect().contains(x, y)
    }

    /// End the manager's lifetime and hand the backend back
    pub fn teardown(self) -> B {
        info!("Display torn down ({:?})", self.mode);
        self.backend
    }

    /// The virtual canvas
    pub fn surface(&self) -> &Surface {
        &self.virtual_surface
    }

    /// The virtual canvas, for drawing
    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.virtual_surface
    }

    /// The last composited real surface
    pub fn real_surface(&self) -> &Surface {
        &self.real_surface
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn virtual_size(&self) -> (u32, u32) {
        self.virtual_surface.dimensions()
    }

    pub fn real_size(&self) -> (u32, u32) {
        self.real_surface.dimensions()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Size to request from the platform for `mode`
    fn target_size(&self, mode: DisplayMode) -> (u32, u32) {
        match mode {
            DisplayMode::Windowed => self.windowed_size,
            DisplayMode::Fullscreen => match self.backend.display_size() {
                Some((w, h)) if w > 0 && h > 0 => (w, h),
                _ => {
                    debug!("Display size unknown; using windowed size for fullscreen");
                    self.windowed_size
                }
            },
        }
    }

    /// Ask the backend for a new surface; on success replace the real
    /// surface, transform and mode together
    fn apply(&mut self, mode: DisplayMode, width: u32, height: u32) -> bool {
        match self.backend.request_surface(mode, width, height) {
            Ok((w, h)) => {
                self.real_surface = Surface::filled(w, h, self.letterbox);
                self.transform = self.compute_transform(w, h);
                self.mode = mode;
                debug!(
                    "Real surface {}x{} ({:?}): scale {:.5}, offset ({}, {})",
                    w, h, mode, self.transform.scale, self.transform.offset_x, self.transform.offset_y
                );
                true
            }
            Err(e) => {
                warn!("Platform rejected {:?} {}x{}: {:#}", mode, width, height, e);
                false
            }
        }
    }
}
