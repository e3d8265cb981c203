use std::fmt;

use crate::core::{FrameInput, Surface};

/// What the director should do after a screen's update
pub enum Transition {
    /// Stay on the current screen
    None,
    /// Suspend the current screen and show a new one on top
    Push(Box<dyn Screen>),
    /// Close the current screen and resume the one below
    Pop,
    /// Close the current screen and show a new one in its place
    Replace(Box<dyn Screen>),
    /// Flip between windowed and fullscreen, stay on the current screen
    ToggleFullscreen,
    /// End the program
    Quit,
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Push(screen) => write!(f, "Push({})", screen.name()),
            Self::Pop => write!(f, "Pop"),
            Self::Replace(screen) => write!(f, "Replace({})", screen.name()),
            Self::ToggleFullscreen => write!(f, "ToggleFullscreen"),
            Self::Quit => write!(f, "Quit"),
        }
    }
}

/// One state of the game's screen flow (menu, cutscene, minigame...).
///
/// Screens live entirely in virtual coordinates: they draw onto the
/// virtual canvas and receive pointer positions already translated to it.
/// They never see the real window size.
pub trait Screen {
    /// Short name for logging
    fn name(&self) -> &str;

    /// Called once when the screen becomes active for the first time
    fn enter(&mut self) {}

    /// Advance by `delta` seconds with this frame's input
    fn update(&mut self, delta: f32, input: &FrameInput) -> Transition;

    /// Draw the current state onto the virtual canvas
    fn render(&self, surface: &mut Surface);

    /// Called when a screen pushed on top of this one is popped
    fn resume(&mut self) {}

    /// Called once when the screen is removed
    fn exit(&mut self) {}
}
