use std::rc::Rc;

use super::widgets::{shade, Button};
use super::ScreenContext;
use crate::core::{FrameInput, Key, Rgba, Surface};
use crate::traits::{Screen, Transition};

/// Display settings: fullscreen toggle and back
pub struct SettingsScreen {
    background: Rc<Surface>,
    fullscreen: Button,
    back: Button,
}

impl SettingsScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        let (cx, cy) = ctx.center();
        let size = (ctx.width / 3, ctx.height / 8);
        let icons = &ctx.assets;

        let label = |text: &str| ctx.label(text, ctx.text_size(), size.0 - 100, Rgba::WHITE);

        let fullscreen = Button::new((cx, cy - size.1), size, Rgba::rgb(70, 110, 200), Rgba::rgb(120, 160, 250))
            .with_icon(icons.borrow_mut().image_fit("icons/fullscreen.png", 44, 44))
            .with_label(label("Tela Cheia"));
        let back = Button::new((cx, cy + size.1), size, Rgba::rgb(80, 80, 80), Rgba::rgb(130, 130, 130))
            .with_icon(icons.borrow_mut().image_fit("icons/seta.png", 44, 44))
            .with_label(label("Voltar"));

        Self {
            background: ctx.background("background/background_main.png"),
            fullscreen,
            back,
        }
    }
}

impl Screen for SettingsScreen {
    fn name(&self) -> &str {
        "settings"
    }

    fn update(&mut self, delta: f32, input: &FrameInput) -> Transition {
        let toggle = self.fullscreen.update(delta, input);
        let back = self.back.update(delta, input);

        if back || input.key_pressed(Key::Escape) {
            Transition::Pop
        } else if toggle {
            Transition::ToggleFullscreen
        } else {
            Transition::None
        }
    }

    fn render(&self, surface: &mut Surface) {
        surface.blit(&self.background, 0, 0);
        shade(surface, 140);
        self.fullscreen.render(surface);
        self.back.render(surface);
    }
}
