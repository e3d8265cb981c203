pub mod app;
pub mod assets;
pub mod cli;
pub mod config;
pub mod core;
pub mod game_loop;
pub mod screens;
pub mod traits;

pub use app::App;
pub use config::GameConfig;
pub use game_loop::{GameLoop, LoopState};
