pub mod clock;
pub mod display_manager;
pub mod font;
pub mod gpu_context;
pub mod input;
pub mod surface;
pub mod timer;
pub mod transform;
pub mod wgpu_backend;

pub use clock::{frame_budget, FrameClock};
pub use display_manager::{DisplayManager, DisplayMode, DisplaySettings};
pub use font::Font;
pub use gpu_context::GpuContext;
pub use input::{FrameInput, InputAdapter, InputEvent, Key, PointerButton};
pub use surface::{Rect, Rgba, Surface};
pub use timer::{Countdown, Fade};
pub use transform::{compute_transform, Transform, MIN_SCALE};
pub use wgpu_backend::WgpuBackend;
