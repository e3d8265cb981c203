pub mod cutscene;
pub mod menu;
pub mod mode_select;
pub mod round;
pub mod selector;
pub mod settings;
pub mod widgets;

pub use cutscene::{Cutscene, Slide};
pub use menu::MainMenu;
pub use mode_select::ModeSelect;
pub use round::{MinigameKind, Outcome, Round, RoundLayout};
pub use selector::MinigameSelector;
pub use settings::SettingsScreen;

use std::rc::Rc;

use log::{debug, info};

use crate::assets::SharedAssets;
use crate::core::{Font, FrameInput, Rect, Rgba, Surface};
use crate::traits::{Screen, Transition};

/// Label font used when none is configured
pub const DEFAULT_FONT: &str = "fonts/ui.ttf";
const MIN_LABEL_SIZE: f32 = 8.0;

/// What every screen needs to build itself and its successors
#[derive(Clone)]
pub struct ScreenContext {
    pub assets: SharedAssets,
    /// Virtual canvas size
    pub width: i32,
    pub height: i32,
    font: Rc<str>,
}

impl ScreenContext {
    pub fn new(assets: SharedAssets, canvas: (u32, u32)) -> Self {
        Self {
            assets,
            width: canvas.0 as i32,
            height: canvas.1 as i32,
            font: Rc::from(DEFAULT_FONT),
        }
    }

    /// Use the font at `path` (relative to the asset root) for labels
    pub fn with_font(mut self, path: &str) -> Self {
        self.font = Rc::from(path);
        self
    }

    pub fn font(&self, size: u32) -> Font {
        self.assets.borrow_mut().font(&self.font, size)
    }

    /// Label height for this canvas, never below 22 px
    pub fn text_size(&self) -> u32 {
        (self.height * 48 / 1000).max(22) as u32
    }

    /// `text` rendered once in the label font, `size` pixels tall,
    /// shrunk until it is at most `max_width` wide
    pub fn label(&self, text: &str, size: u32, max_width: i32, color: Rgba) -> Rc<Surface> {
        let mut font = self.font(size);
        while font.measure(text).0 as i32 > max_width && font.size() > MIN_LABEL_SIZE {
            font = font.with_size(font.size() * 0.9);
        }
        Rc::new(font.render(text, color))
    }

    pub fn canvas(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn center(&self) -> (i32, i32) {
        (self.width / 2, self.height / 2)
    }

    /// Background image stretched over the whole canvas
    pub fn background(&self, path: &str) -> Rc<Surface> {
        self.assets
            .borrow_mut()
            .image_fit(path, self.width.max(1) as u32, self.height.max(1) as u32)
    }
}

/// Requests from the screen flow that only the game loop can carry out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorCommand {
    Continue,
    ToggleFullscreen,
    Quit,
}

/// Stack of screens; only the top one is updated and drawn
pub struct Director {
    stack: Vec<Box<dyn Screen>>,
}

impl Director {
    pub fn new(mut root: Box<dyn Screen>) -> Self {
        info!("Entering {}", root.name());
        root.enter();
        Self { stack: vec![root] }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn current(&self) -> Option<&str> {
        self.stack.last().map(|s| s.name())
    }

    /// Update the top screen and apply the transition it returns
    pub fn update(&mut self, delta: f32, input: &FrameInput) -> DirectorCommand {
        let transition = match self.stack.last_mut() {
            Some(screen) => screen.update(delta, input),
            None => return DirectorCommand::Quit,
        };
        self.apply(transition)
    }

    pub fn render(&self, surface: &mut Surface) {
        if let Some(screen) = self.stack.last() {
            screen.render(surface);
        }
    }

    pub fn apply(&mut self, transition: Transition) -> DirectorCommand {
        if !matches!(transition, Transition::None) {
            debug!("Transition {:?} from {:?}", transition, self.current());
        }

        match transition {
            Transition::None => DirectorCommand::Continue,
            Transition::Push(mut screen) => {
                info!("Entering {}", screen.name());
                screen.enter();
                self.stack.push(screen);
                DirectorCommand::Continue
            }
            Transition::Pop => {
                if let Some(mut screen) = self.stack.pop() {
                    screen.exit();
                }
                match self.stack.last_mut() {
                    Some(below) => {
                        below.resume();
                        DirectorCommand::Continue
                    }
                    None => DirectorCommand::Quit,
                }
            }
            Transition::Replace(mut screen) => {
                if let Some(mut old) = self.stack.pop() {
                    old.exit();
                }
                info!("Entering {}", screen.name());
                screen.enter();
                self.stack.push(screen);
                DirectorCommand::Continue
            }
            Transition::ToggleFullscreen => DirectorCommand::ToggleFullscreen,
            Transition::Quit => DirectorCommand::Quit,
        }
    }

    /// Exit every screen, top first
    pub fn shutdown(&mut self) {
        while let Some(mut screen) = self.stack.pop() {
            screen.exit();
        }
    }
}
