use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use log::{debug, warn};

use crate::core::{Font, Rgba, Surface};

/// Placeholder edge length when the real image size is unknown
const PLACEHOLDER_SIZE: u32 = 64;

/// Source of decoded images and fonts for screens.
///
/// Lookups never fail: a missing or broken image yields a solid placeholder
/// and a missing or broken font yields the built-in bitmap font.
pub trait AssetLoader {
    /// Image at `path` (relative to the asset root) at its native size
    fn image(&mut self, path: &str) -> Rc<Surface>;

    /// Image at `path` resampled to exactly `width` x `height`
    fn image_fit(&mut self, path: &str, width: u32, height: u32) -> Rc<Surface>;

    /// Font at `path` set to `size` pixels
    fn font(&mut self, path: &str, size: u32) -> Font;
}

/// Loader shared between the screens of one game loop
pub type SharedAssets = Rc<RefCell<dyn AssetLoader>>;

/// Decodes PNG/JPEG and TrueType files from disk; images are cached by
/// path and size, fonts by path
pub struct ImageAssets {
    root: PathBuf,
    placeholder: Rgba,
    cache: HashMap<(String, Option<(u32, u32)>), Rc<Surface>>,
    /// `None` remembers a font that failed to load
    fonts: HashMap<String, Option<Font>>,
}

impl ImageAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            placeholder: Rgba::rgb(20, 20, 30),
            cache: HashMap::new(),
            fonts: HashMap::new(),
        }
    }

    /// Color used for images that fail to load
    pub fn with_placeholder(mut self, color: Rgba) -> Self {
        self.placeholder = color;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of cached entries
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    pub fn into_shared(self) -> SharedAssets {
        Rc::new(RefCell::new(self))
    }

    fn decode(&self, path: &str, size: Option<(u32, u32)>) -> Result<Surface> {
        let full = self.root.join(path);
        let img = image::open(&full)
            .with_context(|| format!("Failed to load {}", full.display()))?
            .to_rgba8();
        debug!("Loaded {} ({}x{})", path, img.width(), img.height());

        let img = match size {
            Some((w, h)) if img.dimensions() != (w, h) => imageops::resize(&img, w, h, FilterType::Lanczos3),
            _ => img,
        };
        let (width, height) = img.dimensions();
        Surface::from_rgba8(width, height, img.as_raw())
            .with_context(|| format!("{} decoded to an unexpected buffer size", full.display()))
    }

    fn load_font(&self, path: &str) -> Result<Font> {
        let full = self.root.join(path);
        let bytes = fs::read(&full).with_context(|| format!("Failed to read font {}", full.display()))?;
        Font::from_bytes(&bytes, 1.0).with_context(|| format!("Failed to parse font {}", full.display()))
    }

    fn load(&mut self, path: &str, size: Option<(u32, u32)>) -> Rc<Surface> {
        let key = (path.to_string(), size);
        if let Some(cached) = self.cache.get(&key) {
            return Rc::clone(cached);
        }

        let surface = match self.decode(path, size) {
            Ok(surface) => surface,
            Err(e) => {
                warn!("{:#}; using placeholder", e);
                let (w, h) = size.unwrap_or((PLACEHOLDER_SIZE, PLACEHOLDER_SIZE));
                Surface::filled(w, h, self.placeholder)
            }
        };

        let surface = Rc::new(surface);
        self.cache.insert(key, Rc::clone(&surface));
        surface
    }
}

impl AssetLoader for ImageAssets {
    fn image(&mut self, path: &str) -> Rc<Surface> {
        self.load(path, None)
    }

    fn image_fit(&mut self, path: &str, width: u32, height: u32) -> Rc<Surface> {
        self.load(path, Some((width, height)))
    }

    fn font(&mut self, path: &str, size: u32) -> Font {
        if !self.fonts.contains_key(path) {
            let font = match self.load_font(path) {
                Ok(font) => {
                    debug!("Loaded font {}", path);
                    Some(font)
                }
                Err(e) => {
                    warn!("{:#}; using built-in bitmap font", e);
                    None
                }
            };
            self.fonts.insert(path.to_string(), font);
        }

        match self.fonts.get(path) {
            Some(Some(font)) => font.with_size(size as f32),
            _ => Font::fallback(size as f32),
        }
    }
}
