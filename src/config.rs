use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::core::{DisplaySettings, Rgba};

/// Game configuration, read from a JSON file.
///
/// Every field has a default, so a partial (or empty) file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    /// Logical canvas size every screen is laid out for
    pub virtual_width: u32,
    pub virtual_height: u32,
    pub window_width: u32,
    pub window_height: u32,
    pub fullscreen: bool,
    /// Frame cap, 0 for uncapped
    pub target_fps: u32,
    pub letterbox_color: [u8; 3],
    pub asset_dir: PathBuf,
    /// TrueType font for labels, relative to `asset_dir`
    pub font: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Party Pascal".to_string(),
            virtual_width: 1280,
            virtual_height: 720,
            window_width: 1280,
            window_height: 720,
            // Handhelds have no useful window to fall back to
            fullscreen: cfg!(any(target_os = "android", target_os = "ios")),
            target_fps: 60,
            letterbox_color: [0, 0, 0],
            asset_dir: PathBuf::from("assets"),
            font: crate::screens::DEFAULT_FONT.to_string(),
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&contents).with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Load `path`, or fall back to defaults with a warning
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{:#}; using defaults", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents).with_context(|| format!("Failed to write config {}", path.display()))
    }

    /// Command-line flags take precedence over the file
    pub fn apply_cli(&mut self, cli: &Cli) {
        if cli.fullscreen {
            self.fullscreen = true;
        }
        if let Some(fps) = cli.fps {
            self.target_fps = fps;
        }
        if let Some(dir) = &cli.assets {
            self.asset_dir = dir.clone();
        }
    }

    pub fn display_settings(&self) -> DisplaySettings {
        DisplaySettings::new(self.virtual_width, self.virtual_height, self.fullscreen)
            .windowed_size(self.window_width, self.window_height)
            .letterbox(Rgba::from(self.letterbox_color))
    }
}
