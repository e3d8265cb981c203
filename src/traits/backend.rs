use crate::core::{DisplayMode, Surface};

/// Platform output seam used by the display manager
///
/// Implementations own the physical window/screen. All calls are
/// best-effort: errors are reported to the caller, which keeps its last
/// good state.
pub trait DisplayBackend {
    /// Put the output into `mode` at `width` x `height`.
    ///
    /// Returns the size actually granted by the platform.
    fn request_surface(&mut self, mode: DisplayMode, width: u32, height: u32) -> anyhow::Result<(u32, u32)>;

    /// Resolution of the physical display, if it can be detected
    fn display_size(&self) -> Option<(u32, u32)>;

    /// Publish a finished real surface to the device
    fn present(&mut self, frame: &Surface) -> anyhow::Result<()>;
}
