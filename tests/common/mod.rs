#![allow(dead_code)]

use party_pascal::core::{DisplayManager, DisplayMode, DisplaySettings, Surface};
use party_pascal::traits::DisplayBackend;

/// Backend that records every request and frame, with switchable failures
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub display: Option<(u32, u32)>,
    pub reject_fullscreen: bool,
    pub reject_windowed: bool,
    pub reject_present: bool,
    pub requests: Vec<(DisplayMode, u32, u32)>,
    pub presents: usize,
    pub last_frame: Option<Surface>,
}

impl RecordingBackend {
    /// Backend on a 1920x1080 display that grants everything
    pub fn new() -> Self {
        Self {
            display: Some((1920, 1080)),
            ..Self::default()
        }
    }
}

impl DisplayBackend for RecordingBackend {
    fn request_surface(&mut self, mode: DisplayMode, width: u32, height: u32) -> anyhow::Result<(u32, u32)> {
        self.requests.push((mode, width, height));
        let rejected = match mode {
            DisplayMode::Fullscreen => self.reject_fullscreen,
            DisplayMode::Windowed => self.reject_windowed,
        };
        if rejected {
            anyhow::bail!("{:?} unavailable", mode);
        }
        Ok((width, height))
    }

    fn display_size(&self) -> Option<(u32, u32)> {
        self.display
    }

    fn present(&mut self, frame: &Surface) -> anyhow::Result<()> {
        if self.reject_present {
            anyhow::bail!("surface lost");
        }
        self.presents += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}

/// Standard 1280x720 canvas on a recording backend
pub fn manager(backend: RecordingBackend, fullscreen: bool) -> DisplayManager<RecordingBackend> {
    DisplayManager::init(backend, DisplaySettings::new(1280, 720, fullscreen))
}
