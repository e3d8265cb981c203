use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::surface::Rect;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    F11,
    Enter,
    Space,
    Backspace,
    Left,
    Right,
    Up,
    Down,
}

/// Pointer buttons; touch contacts report as `Primary`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Discrete input event in REAL (device pixel) coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMoved { x: f64, y: f64 },
    PointerDown { x: f64, y: f64, button: PointerButton },
    PointerUp { x: f64, y: f64, button: PointerButton },
    KeyDown(Key),
    Resized { width: u32, height: u32 },
    Quit,
}

/// Adapter that turns winit window events into [`InputEvent`]s and buffers
/// them until the next frame drains the queue
#[derive(Debug, Clone, Default)]
pub struct InputAdapter {
    queue: Vec<InputEvent>,
    /// Last known pointer position (mouse buttons carry no position in winit)
    cursor: (f64, f64),
}

impl InputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a winit WindowEvent; unrelated events are ignored
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.push(InputEvent::Quit),
            WindowEvent::Resized(size) => self.push(InputEvent::Resized {
                width: size.width,
                height: size.height,
            }),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    if let Some(key) = Self::keycode_to_key(code) {
                        self.push(InputEvent::KeyDown(key));
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x, position.y);
                self.push(InputEvent::PointerMoved {
                    x: position.x,
                    y: position.y,
                });
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = Self::mouse_button_to_pointer(*button) else {
                    return;
                };
                let (x, y) = self.cursor;
                self.push(match state {
                    ElementState::Pressed => InputEvent::PointerDown { x, y, button },
                    ElementState::Released => InputEvent::PointerUp { x, y, button },
                });
            }
            WindowEvent::Touch(touch) => {
                let (x, y) = (touch.location.x, touch.location.y);
                self.cursor = (x, y);
                let button = PointerButton::Primary;
                self.push(match touch.phase {
                    TouchPhase::Started => InputEvent::PointerDown { x, y, button },
                    TouchPhase::Moved => InputEvent::PointerMoved { x, y },
                    TouchPhase::Ended | TouchPhase::Cancelled => InputEvent::PointerUp { x, y, button },
                });
            }
            _ => {}
        }
    }

    /// Queue an event directly
    pub fn push(&mut self, event: InputEvent) {
        self.queue.push(event);
    }

    /// Take every event queued since the last drain
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.queue.drain(..)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Last known pointer position in real coordinates
    pub fn cursor(&self) -> (f64, f64) {
        self.cursor
    }

    fn keycode_to_key(code: KeyCode) -> Option<Key> {
        match code {
            KeyCode::Escape => Some(Key::Escape),
            KeyCode::F11 => Some(Key::F11),
            KeyCode::Enter | KeyCode::NumpadEnter => Some(Key::Enter),
            KeyCode::Space => Some(Key::Space),
            KeyCode::Backspace => Some(Key::Backspace),
            KeyCode::ArrowLeft => Some(Key::Left),
            KeyCode::ArrowRight => Some(Key::Right),
            KeyCode::ArrowUp => Some(Key::Up),
            KeyCode::ArrowDown => Some(Key::Down),
            _ => None,
        }
    }

    fn mouse_button_to_pointer(button: MouseButton) -> Option<PointerButton> {
        match button {
            MouseButton::Left => Some(PointerButton::Primary),
            MouseButton::Right => Some(PointerButton::Secondary),
            _ => None,
        }
    }
}

/// One frame of input as seen by a screen, in VIRTUAL coordinates.
///
/// Positions may lie outside the canvas (inside letterbox bars); hit tests
/// against on-canvas rectangles simply fail for them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Current pointer position
    pub pointer: (i32, i32),
    /// Primary-button presses this frame
    pub clicks: Vec<(i32, i32)>,
    /// Primary-button releases this frame
    pub releases: Vec<(i32, i32)>,
    /// Keys pressed this frame, in order
    pub keys: Vec<Key>,
}

impl FrameInput {
    /// Input with the pointer resting at `pointer` and nothing else happening
    pub fn idle(pointer: (i32, i32)) -> Self {
        Self {
            pointer,
            ..Self::default()
        }
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    pub fn hovering(&self, rect: &Rect) -> bool {
        rect.contains(self.pointer.0, self.pointer.1)
    }

    /// True if any click this frame landed inside `rect`
    pub fn clicked_in(&self, rect: &Rect) -> bool {
        self.clicks.iter().any(|&(x, y)| rect.contains(x, y))
    }

    pub fn any_click(&self) -> bool {
        !self.clicks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // winit events with device ids cannot be built outside winit, so the
    // adapter's queue is exercised through `push`.

    #[test]
    fn new_adapter_is_empty() {
        let adapter = InputAdapter::new();
        assert_eq!(adapter.pending(), 0);
        assert_eq!(adapter.cursor(), (0.0, 0.0));
    }

    #[test]
    fn drain_empties_queue_in_order() {
        let mut adapter = InputAdapter::new();
        adapter.push(InputEvent::KeyDown(Key::F11));
        adapter.push(InputEvent::Resized { width: 800, height: 600 });

        let events: Vec<_> = adapter.drain().collect();
        assert_eq!(
            events,
            vec![
                InputEvent::KeyDown(Key::F11),
                InputEvent::Resized { width: 800, height: 600 },
            ]
        );
        assert_eq!(adapter.pending(), 0);
        assert_eq!(adapter.drain().count(), 0);
    }

    #[test]
    fn resize_event_maps_size() {
        let mut adapter = InputAdapter::new();
        adapter.process_event(&WindowEvent::Resized(winit::dpi::PhysicalSize::new(1024, 768)));
        assert_eq!(
            adapter.drain().next(),
            Some(InputEvent::Resized { width: 1024, height: 768 })
        );
    }

    #[test]
    fn close_request_maps_to_quit() {
        let mut adapter = InputAdapter::new();
        adapter.process_event(&WindowEvent::CloseRequested);
        assert_eq!(adapter.drain().next(), Some(InputEvent::Quit));
    }

    #[test]
    fn key_mapping() {
        assert_eq!(InputAdapter::keycode_to_key(KeyCode::F11), Some(Key::F11));
        assert_eq!(InputAdapter::keycode_to_key(KeyCode::NumpadEnter), Some(Key::Enter));
        assert_eq!(InputAdapter::keycode_to_key(KeyCode::KeyZ), None);
        assert_eq!(
            InputAdapter::mouse_button_to_pointer(MouseButton::Middle),
            None
        );
    }

    #[test]
    fn frame_input_hit_tests() {
        let button = Rect::new(100, 100, 50, 20);
        let input = FrameInput {
            pointer: (110, 105),
            clicks: vec![(-20, 300), (120, 110)],
            ..FrameInput::default()
        };
        assert!(input.hovering(&button));
        assert!(input.clicked_in(&button));
        assert!(!FrameInput::idle((0, 0)).clicked_in(&button));
    }
}
