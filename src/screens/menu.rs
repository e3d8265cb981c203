use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::cutscene::Cutscene;
use super::mode_select::ModeSelect;
use super::settings::SettingsScreen;
use super::widgets::{shade, Button, Particles};
use super::ScreenContext;
use crate::core::{Fade, FrameInput, Key, Rgba, Surface};
use crate::traits::{Screen, Transition};

const FADE_IN_SECONDS: f32 = 0.45;
const PARTICLE_COUNT: usize = 32;
/// Room left beside a label for the icon
const LABEL_MARGIN: i32 = 100;

/// Title screen: start, settings, quit
pub struct MainMenu {
    ctx: ScreenContext,
    background: Rc<Surface>,
    logo: Rc<Surface>,
    start: Button,
    settings: Button,
    quit: Button,
    particles: Particles,
    rng: StdRng,
    fade: Fade,
    time: f32,
}

impl MainMenu {
    pub fn new(ctx: ScreenContext) -> Self {
        Self::with_rng(ctx, StdRng::from_entropy())
    }

    /// Menu with a fixed particle seed
    pub fn with_rng(ctx: ScreenContext, mut rng: StdRng) -> Self {
        let cx = ctx.width / 2;
        let base_y = ctx.height * 58 / 100;
        let spacing = ctx.height * 15 / 100;
        let size = (ctx.width / 4, ctx.height / 9);

        let icon = |name: &str| ctx.assets.borrow_mut().image_fit(&format!("icons/{}.png", name), 44, 44);
        let label = |text: &str| ctx.label(text, ctx.text_size(), size.0 - LABEL_MARGIN, Rgba::WHITE);
        let start = Button::new((cx, base_y), size, Rgba::rgb(200, 70, 70), Rgba::rgb(240, 110, 110))
            .with_icon(icon("play"))
            .with_label(label("Iniciar Jogo"));
        let settings = Button::new((cx, base_y + spacing), size, Rgba::rgb(70, 110, 200), Rgba::rgb(120, 160, 250))
            .with_icon(icon("settings"))
            .with_label(label("Configurações"));
        let quit = Button::new((cx, base_y + 2 * spacing), size, Rgba::rgb(80, 80, 80), Rgba::rgb(130, 130, 130))
            .with_icon(icon("exit"))
            .with_label(label("Sair"));

        let logo = ctx
            .assets
            .borrow_mut()
            .image_fit("party_pascal_logo.png", (ctx.width * 2 / 5) as u32, (ctx.height / 4) as u32);

        Self {
            background: ctx.background("background/background_main.png"),
            logo,
            start,
            settings,
            quit,
            particles: Particles::new(PARTICLE_COUNT, ctx.width, ctx.height, &mut rng),
            rng,
            fade: Fade::fade_in(FADE_IN_SECONDS),
            time: 0.0,
            ctx,
        }
    }

    fn start_game(&self) -> Transition {
        Transition::Push(Box::new(Cutscene::intro(self.ctx.clone(), ModeSelect::boxed)))
    }
}

impl Screen for MainMenu {
    fn name(&self) -> &str {
        "main-menu"
    }

    fn update(&mut self, delta: f32, input: &FrameInput) -> Transition {
        self.time += delta;
        self.fade.tick(delta);
        self.particles.update(delta, &mut self.rng);

        let start = self.start.update(delta, input);
        let settings = self.settings.update(delta, input);
        let quit = self.quit.update(delta, input);

        if input.key_pressed(Key::Escape) || quit {
            Transition::Quit
        } else if start || input.key_pressed(Key::Enter) {
            self.start_game()
        } else if settings {
            Transition::Push(Box::new(SettingsScreen::new(self.ctx.clone())))
        } else {
            Transition::None
        }
    }

    /// Back from a game or the settings: fade in again
    fn resume(&mut self) {
        self.fade = Fade::fade_in(FADE_IN_SECONDS);
    }

    fn render(&self, surface: &mut Surface) {
        surface.blit(&self.background, 0, 0);
        self.particles.render(surface);

        // Gentle bob
        let bob = ((self.time * 2.0).sin() * 6.0) as i32;
        surface.blit_centered(&self.logo, self.ctx.width / 2, self.ctx.height * 28 / 100 + bob);

        self.start.render(surface);
        self.settings.render(surface);
        self.quit.render(surface);

        shade(surface, self.fade.alpha());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ImageAssets;
    use crate::core::Rect;

    fn menu() -> MainMenu {
        let ctx = ScreenContext::new(ImageAssets::new("/nonexistent").into_shared(), (1280, 720));
        let mut menu = MainMenu::with_rng(ctx, StdRng::seed_from_u64(1));
        for _ in 0..120 {
            menu.update(1.0 / 60.0, &FrameInput::default());
        }
        menu
    }

    fn click(rect: Rect) -> FrameInput {
        let (x, y) = rect.center();
        FrameInput {
            pointer: (x, y),
            clicks: vec![(x, y)],
            ..FrameInput::default()
        }
    }

    #[test]
    fn buttons_route_to_their_screens() {
        let mut m = menu();
        match m.update(0.016, &click(m.start.rect())) {
            Transition::Push(next) => assert_eq!(next.name(), "cutscene"),
            other => panic!("unexpected {:?}", other),
        }

        let mut m = menu();
        match m.update(0.016, &click(m.settings.rect())) {
            Transition::Push(next) => assert_eq!(next.name(), "settings"),
            other => panic!("unexpected {:?}", other),
        }

        let mut m = menu();
        assert!(matches!(m.update(0.016, &click(m.quit.rect())), Transition::Quit));
    }

    #[test]
    fn buttons_fit_canvas() {
        let m = menu();
        for b in [&m.start, &m.settings, &m.quit] {
            let r = b.rect();
            assert!(r.y >= 0 && r.bottom() <= 720, "{:?}", r);
        }
    }

    #[test]
    fn start_button_shows_its_label() {
        let m = menu();
        let mut surface = Surface::new(1280, 720);
        m.start.render(&mut surface);
        let r = m.start.rect();
        let white = (r.x + 80..r.right() - 20)
            .flat_map(|x| (r.y + 10..r.bottom() - 10).map(move |y| (x, y)))
            .filter(|&(x, y)| surface.get(x, y) == Some(Rgba::WHITE))
            .count();
        assert!(white > 100, "only {} label pixels", white);
    }

    #[test]
    fn opens_black_then_fades_in() {
        let ctx = ScreenContext::new(ImageAssets::new("/nonexistent").into_shared(), (64, 36));
        let mut m = MainMenu::with_rng(ctx, StdRng::seed_from_u64(1));
        let mut surface = Surface::new(64, 36);
        m.render(&mut surface);
        assert_eq!(surface.get(0, 0), Some(Rgba::BLACK));

        m.update(1.0, &FrameInput::idle((0, 0)));
        m.render(&mut surface);
        assert_ne!(surface.get(0, 0), Some(Rgba::BLACK));
    }
}
