use std::path::PathBuf;
use std::sync::Arc;

use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::assets::ImageAssets;
use crate::config::GameConfig;
use crate::core::{DisplayManager, FrameClock, InputAdapter, WgpuBackend};
use crate::game_loop::{GameLoop, LoopState};
use crate::screens::{MainMenu, ScreenContext};

/// winit application: creates the window on resume and runs one game
/// frame per redraw
pub struct App {
    config: GameConfig,
    /// Where the chosen display mode is saved on exit
    config_path: Option<PathBuf>,
    window: Option<Arc<Window>>,
    game: Option<GameLoop<WgpuBackend>>,
    input: InputAdapter,
    clock: FrameClock,
}

impl App {
    pub fn new(config: GameConfig, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
            window: None,
            game: None,
            input: InputAdapter::new(),
            clock: FrameClock::new(),
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_title(self.config.title.clone())
                    .with_inner_size(PhysicalSize::new(self.config.window_width, self.config.window_height)),
            )?,
        );

        let backend = pollster::block_on(WgpuBackend::new(window.clone()))?;
        let display = DisplayManager::init(backend, self.config.display_settings());

        let assets = ImageAssets::new(&self.config.asset_dir).into_shared();
        let ctx = ScreenContext::new(assets, display.virtual_size()).with_font(&self.config.font);
        let menu = MainMenu::new(ctx);

        self.game = Some(GameLoop::new(display, Box::new(menu)));
        self.window = Some(window);
        self.clock.reset();
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(game) = &mut self.game else {
            return;
        };

        let delta_ms = self.clock.tick(self.config.target_fps);
        if game.frame(self.input.drain(), delta_ms) == LoopState::Exit {
            event_loop.exit();
        }
    }

    fn stop(&mut self) {
        let Some(game) = self.game.take() else {
            return;
        };

        let fullscreen = game.display().mode().is_fullscreen();
        info!("Shutting down after {} frames", game.frames());
        game.shutdown();
        self.window = None;

        if let Some(path) = &self.config_path {
            if self.config.fullscreen != fullscreen {
                self.config.fullscreen = fullscreen;
                if let Err(e) = self.config.save(path) {
                    warn!("{:#}", e);
                }
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.game.is_none() {
            if let Err(e) = self.start(event_loop) {
                error!("Failed to start: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            other => self.input.process_event(&other),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.stop();
    }
}
