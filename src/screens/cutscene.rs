use std::rc::Rc;

use super::widgets::{shade, Button};
use super::ScreenContext;
use crate::core::{Countdown, Fade, FrameInput, Key, Rgba, Surface};
use crate::traits::{Screen, Transition};

const SLIDE_FADE_SECONDS: f32 = 0.5;

/// One still image shown for a fixed time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slide {
    pub image: &'static str,
    pub seconds: f32,
}

/// Builds the screen that follows a cutscene
pub type Successor = fn(ScreenContext) -> Box<dyn Screen>;

/// Timed slideshow. A click on the canvas advances a slide, the skip
/// button (or Escape) jumps straight to the successor.
pub struct Cutscene {
    ctx: ScreenContext,
    slides: Vec<(Slide, Rc<Surface>)>,
    index: usize,
    timer: Countdown,
    fade: Fade,
    skip: Button,
    then: Successor,
}

impl Cutscene {
    pub fn new(ctx: ScreenContext, slides: &[Slide], then: Successor) -> Self {
        let slides: Vec<_> = slides
            .iter()
            .map(|slide| (*slide, ctx.background(slide.image)))
            .collect();

        let skip = Button::new(
            (ctx.width - 110, 60),
            (160, 56),
            Rgba::rgb(30, 30, 30),
            Rgba::rgb(60, 60, 60),
        )
        .placed()
        .with_icon(ctx.assets.borrow_mut().image_fit("icons/seta.png", 32, 32))
        .with_label(ctx.label("PULAR", ctx.text_size(), 80, Rgba::WHITE));

        let first = slides.first().map(|(s, _)| s.seconds).unwrap_or(0.0);
        Self {
            ctx,
            slides,
            index: 0,
            timer: Countdown::new(first),
            fade: Fade::fade_in(SLIDE_FADE_SECONDS),
            skip,
            then,
        }
    }

    /// Opening story: the office, then Pascal
    pub fn intro(ctx: ScreenContext, then: Successor) -> Self {
        const SLIDES: [Slide; 2] = [
            Slide {
                image: "background/curtcene.png",
                seconds: 4.0,
            },
            Slide {
                image: "sprites/pascal.png",
                seconds: 4.0,
            },
        ];
        Self::new(ctx, &SLIDES, then)
    }

    pub fn slide_index(&self) -> usize {
        self.index
    }

    fn finish(&self) -> Transition {
        Transition::Replace((self.then)(self.ctx.clone()))
    }

    /// Move to the next slide; false when there is none
    fn advance(&mut self) -> bool {
        self.index += 1;
        match self.slides.get(self.index) {
            Some((slide, _)) => {
                self.timer = Countdown::started(slide.seconds);
                self.fade = Fade::fade_in(SLIDE_FADE_SECONDS);
                true
            }
            None => false,
        }
    }
}

impl Screen for Cutscene {
    fn name(&self) -> &str {
        "cutscene"
    }

    fn enter(&mut self) {
        self.timer.start();
    }

    fn update(&mut self, delta: f32, input: &FrameInput) -> Transition {
        if self.slides.is_empty() || input.key_pressed(Key::Escape) || self.skip.update(delta, input) {
            return self.finish();
        }

        self.fade.tick(delta);
        let clicked = input.clicks.iter().any(|&(x, y)| self.ctx.canvas().contains(x, y));
        let next = clicked || input.key_pressed(Key::Enter) || input.key_pressed(Key::Space);

        if (next || self.timer.tick(delta)) && !self.advance() {
            return self.finish();
        }
        Transition::None
    }

    fn render(&self, surface: &mut Surface) {
        surface.fill(Rgba::BLACK);
        if let Some((_, image)) = self.slides.get(self.index) {
            surface.blit_centered(image, self.ctx.width / 2, self.ctx.height / 2);
        }
        shade(surface, self.fade.alpha());
        self.skip.render(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ImageAssets;

    struct End;

    impl Screen for End {
        fn name(&self) -> &str {
            "end"
        }
        fn update(&mut self, _delta: f32, _input: &FrameInput) -> Transition {
            Transition::None
        }
        fn render(&self, _surface: &mut Surface) {}
    }

    fn end(_ctx: ScreenContext) -> Box<dyn Screen> {
        Box::new(End)
    }

    fn cutscene() -> Cutscene {
        let ctx = ScreenContext::new(ImageAssets::new("/nonexistent").into_shared(), (1280, 720));
        let mut scene = Cutscene::intro(ctx, end);
        scene.enter();
        scene
    }

    fn expect_end(transition: Transition) {
        match transition {
            Transition::Replace(next) => assert_eq!(next.name(), "end"),
            other => panic!("expected replace, got {:?}", other),
        }
    }

    #[test]
    fn slides_advance_on_time() {
        let mut scene = cutscene();
        assert!(matches!(scene.update(3.9, &FrameInput::default()), Transition::None));
        assert_eq!(scene.slide_index(), 0);
        scene.update(0.2, &FrameInput::default());
        assert_eq!(scene.slide_index(), 1);
        expect_end(scene.update(4.0, &FrameInput::default()));
    }

    #[test]
    fn click_advances_and_skip_ends() {
        let mut scene = cutscene();
        let click = FrameInput {
            pointer: (200, 400),
            clicks: vec![(200, 400)],
            ..FrameInput::default()
        };
        scene.update(0.016, &click);
        assert_eq!(scene.slide_index(), 1);

        let skip = FrameInput {
            pointer: (1170, 60),
            clicks: vec![(1170, 60)],
            ..FrameInput::default()
        };
        expect_end(scene.update(0.016, &skip));
    }

    #[test]
    fn clicks_in_letterbox_do_not_advance() {
        let mut scene = cutscene();
        let bar = FrameInput {
            pointer: (200, -30),
            clicks: vec![(200, -30)],
            ..FrameInput::default()
        };
        scene.update(0.016, &bar);
        assert_eq!(scene.slide_index(), 0);
    }

    #[test]
    fn escape_skips() {
        let mut scene = cutscene();
        let input = FrameInput {
            keys: vec![Key::Escape],
            ..FrameInput::default()
        };
        expect_end(scene.update(0.016, &input));
    }
}
