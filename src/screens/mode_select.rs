use std::rc::Rc;

use super::round::Round;
use super::selector::MinigameSelector;
use super::widgets::Button;
use super::ScreenContext;
use crate::core::{FrameInput, Key, Rgba, Surface};
use crate::traits::{Screen, Transition};

/// Choice between the campaign and free play
pub struct ModeSelect {
    ctx: ScreenContext,
    background: Rc<Surface>,
    title: Rc<Surface>,
    campaign: Button,
    free: Button,
}

impl ModeSelect {
    pub fn new(ctx: ScreenContext) -> Self {
        let (cx, cy) = ctx.center();
        let size = (ctx.width * 3 / 10, ctx.height / 3);
        let offset = size.0 / 2 + ctx.width / 24;

        let label = |text: &str| ctx.label(text, ctx.text_size(), size.0 - 24, Rgba::WHITE);
        let campaign = Button::new((cx - offset, cy + ctx.height / 12), size, Rgba::rgb(200, 70, 70), Rgba::rgb(240, 110, 110))
            .with_label(label("Modo Campanha"));
        let free = Button::new((cx + offset, cy + ctx.height / 12), size, Rgba::rgb(70, 110, 200), Rgba::rgb(120, 160, 250))
            .with_label(label("Modo Livre"));
        let title = ctx.label("ESCOLHA O MODO DE JOGO", ctx.text_size() * 3 / 2, ctx.width * 9 / 10, Rgba::WHITE);
        let background = ctx.background("background/game_modo.png");

        Self {
            ctx,
            background,
            title,
            campaign,
            free,
        }
    }

    /// Boxed constructor, usable as a cutscene successor
    pub fn boxed(ctx: ScreenContext) -> Box<dyn Screen> {
        Box::new(Self::new(ctx))
    }
}

impl Screen for ModeSelect {
    fn name(&self) -> &str {
        "mode-select"
    }

    fn update(&mut self, delta: f32, input: &FrameInput) -> Transition {
        if input.key_pressed(Key::Escape) {
            return Transition::Pop;
        }
        if self.campaign.update(delta, input) {
            return Transition::Replace(Box::new(Round::campaign(self.ctx.clone())));
        }
        if self.free.update(delta, input) {
            return Transition::Replace(Box::new(MinigameSelector::new(self.ctx.clone())));
        }
        Transition::None
    }

    fn render(&self, surface: &mut Surface) {
        surface.blit(&self.background, 0, 0);
        surface.blit_centered(&self.title, self.ctx.width / 2, self.ctx.height / 6);
        self.campaign.render(surface);
        self.free.render(surface);
    }
}
