use std::rc::Rc;

use super::round::{MinigameKind, Round};
use super::widgets::{Button, Particles};
use super::ScreenContext;
use crate::core::{FrameInput, Key, Rgba, Surface};
use crate::traits::{Screen, Transition};

/// Free play: one tile per minigame, plus a back button
pub struct MinigameSelector {
    ctx: ScreenContext,
    background: Rc<Surface>,
    title: Rc<Surface>,
    tiles: Vec<(MinigameKind, Button)>,
    back: Button,
    particles: Particles,
    rng: rand::rngs::StdRng,
}

impl MinigameSelector {
    pub fn new(ctx: ScreenContext) -> Self {
        use rand::SeedableRng;

        let kinds = MinigameKind::ALL;
        let n = kinds.len() as i32;
        let gap = ctx.width / 40;
        let w = (ctx.width * 17 / 20 - gap * (n - 1)) / n;
        let h = ctx.height * 2 / 5;
        let x0 = ctx.width / 2 - (w * n + gap * (n - 1)) / 2 + w / 2;
        let y = ctx.height / 2;

        let tiles = kinds
            .iter()
            .enumerate()
            .map(|(i, &kind)| {
                let accent = kind.accent();
                let hover = Rgba::rgb(
                    accent.r.saturating_add(50),
                    accent.g.saturating_add(50),
                    accent.b.saturating_add(50),
                );
                let label = ctx.label(kind.title(), ctx.text_size(), w - 16, Rgba::WHITE);
                (kind, Button::new((x0 + i as i32 * (w + gap), y), (w, h), accent, hover).with_label(label))
            })
            .collect();

        let back = Button::new((ctx.width / 10, ctx.height - 60), (160, 64), Rgba::rgb(80, 80, 80), Rgba::rgb(130, 130, 130))
            .with_icon(ctx.assets.borrow_mut().image_fit("icons/seta.png", 32, 32))
            .with_label(ctx.label("VOLTAR", ctx.text_size(), 80, Rgba::WHITE));
        let title = ctx.label("MODO LIVRE", ctx.text_size() * 2, ctx.width * 9 / 10, Rgba::WHITE);

        let mut rng = rand::rngs::StdRng::from_entropy();
        let particles = Particles::new(24, ctx.width, ctx.height, &mut rng);
        let background = ctx.background("background/game_livre.png");

        Self {
            ctx,
            background,
            title,
            tiles,
            back,
            particles,
            rng,
        }
    }
}

impl Screen for MinigameSelector {
    fn name(&self) -> &str {
        "minigame-selector"
    }

    fn update(&mut self, delta: f32, input: &FrameInput) -> Transition {
        self.particles.update(delta, &mut self.rng);

        if input.key_pressed(Key::Escape) || self.back.update(delta, input) {
            return Transition::Pop;
        }

        let mut picked = None;
        for (kind, tile) in &mut self.tiles {
            if tile.update(delta, input) {
                picked = Some(*kind);
            }
        }

        match picked {
            Some(kind) => Transition::Push(Box::new(Round::single(self.ctx.clone(), kind))),
            None => Transition::None,
        }
    }

    fn render(&self, surface: &mut Surface) {
        surface.blit(&self.background, 0, 0);
        self.particles.render(surface);
        surface.blit_centered(&self.title, self.ctx.width / 2, self.ctx.height / 8);
        for (_, tile) in &self.tiles {
            tile.render(surface);
        }
        self.back.render(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ImageAssets;

    fn selector() -> MinigameSelector {
        let ctx = ScreenContext::new(ImageAssets::new("/nonexistent").into_shared(), (1280, 720));
        let mut screen = MinigameSelector::new(ctx);
        for _ in 0..120 {
            screen.update(1.0 / 60.0, &FrameInput::default());
        }
        screen
    }

    #[test]
    fn each_tile_opens_its_round() {
        for index in 0..MinigameKind::ALL.len() {
            let mut screen = selector();
            let (kind, tile) = &screen.tiles[index];
            let expected = kind.name();
            let (x, y) = tile.rect().center();
            let input = FrameInput {
                pointer: (x, y),
                clicks: vec![(x, y)],
                ..FrameInput::default()
            };
            match screen.update(1.0 / 60.0, &input) {
                Transition::Push(round) => assert_eq!(round.name(), expected),
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn tiles_stay_on_canvas() {
        let screen = selector();
        for (_, tile) in &screen.tiles {
            let r = tile.rect();
            assert!(r.x >= 0 && r.right() <= 1280 && r.y >= 0 && r.bottom() <= 720);
        }
    }

    #[test]
    fn every_tile_draws_its_title() {
        let screen = selector();
        let mut surface = Surface::new(1280, 720);
        for (kind, tile) in &screen.tiles {
            tile.render(&mut surface);
            let r = tile.rect();
            let lit = (r.x + 8..r.right() - 8)
                .flat_map(|x| (r.y + 8..r.bottom() - 8).map(move |y| (x, y)))
                .filter(|&(x, y)| surface.get(x, y) == Some(Rgba::WHITE))
                .count();
            assert!(lit > 0, "{} has no label", kind.title());
        }
    }

    #[test]
    fn escape_goes_back() {
        let mut screen = selector();
        let input = FrameInput {
            keys: vec![Key::Escape],
            ..FrameInput::default()
        };
        assert!(matches!(screen.update(0.016, &input), Transition::Pop));
    }
}
