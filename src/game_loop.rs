use log::{debug, info};

use crate::core::{DisplayManager, FrameInput, InputEvent, Key, PointerButton};
use crate::screens::{Director, DirectorCommand};
use crate::traits::{DisplayBackend, Screen};

/// Longest step handed to screens, so a stalled frame doesn't skip timers
const MAX_DELTA_SECONDS: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Exit,
}

/// Top-level frame driver: owns the display and the screen stack.
///
/// Each [`frame`](Self::frame) applies display events, translates pointer
/// positions into virtual coordinates, updates and renders the top screen,
/// then presents.
pub struct GameLoop<B: DisplayBackend> {
    display: DisplayManager<B>,
    director: Director,
    /// Last pointer position in virtual coordinates
    pointer: (i32, i32),
    frames: u64,
}

impl<B: DisplayBackend> GameLoop<B> {
    pub fn new(display: DisplayManager<B>, root: Box<dyn Screen>) -> Self {
        Self {
            display,
            director: Director::new(root),
            pointer: (0, 0),
            frames: 0,
        }
    }

    /// Run one frame with the events gathered since the last one
    pub fn frame(&mut self, events: impl IntoIterator<Item = InputEvent>, delta_ms: u64) -> LoopState {
        let mut input = FrameInput::idle(self.pointer);

        // Pointer events are translated as they arrive, so a resize earlier
        // in the batch already applies to them
        for event in events {
            match event {
                InputEvent::Quit => {
                    info!("Quit requested");
                    return LoopState::Exit;
                }
                InputEvent::Resized { width, height } => self.display.resize(width, height),
                InputEvent::KeyDown(Key::F11) => self.display.toggle_fullscreen(),
                InputEvent::KeyDown(key) => input.keys.push(key),
                InputEvent::PointerMoved { x, y } => input.pointer = self.display.translate_pointer(x, y),
                InputEvent::PointerDown { x, y, button } => {
                    input.pointer = self.display.translate_pointer(x, y);
                    if button == PointerButton::Primary {
                        input.clicks.push(input.pointer);
                    }
                }
                InputEvent::PointerUp { x, y, button } => {
                    input.pointer = self.display.translate_pointer(x, y);
                    if button == PointerButton::Primary {
                        input.releases.push(input.pointer);
                    }
                }
            }
        }
        self.pointer = input.pointer;

        let delta = (delta_ms as f32 / 1000.0).min(MAX_DELTA_SECONDS);
        match self.director.update(delta, &input) {
            DirectorCommand::Continue => {}
            DirectorCommand::ToggleFullscreen => self.display.toggle_fullscreen(),
            DirectorCommand::Quit => {
                debug!("Screen flow finished after {} frames", self.frames);
                return LoopState::Exit;
            }
        }

        self.director.render(self.display.surface_mut());
        self.display.present();
        self.frames += 1;
        LoopState::Running
    }

    /// Exit every screen and tear the display down
    pub fn shutdown(mut self) -> B {
        self.director.shutdown();
        self.display.teardown()
    }

    pub fn display(&self) -> &DisplayManager<B> {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut DisplayManager<B> {
        &mut self.display
    }

    pub fn director(&self) -> &Director {
        &self.director
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
