pub mod backend;
pub mod screen;

pub use backend::*;
pub use screen::*;
