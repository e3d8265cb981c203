use std::collections::VecDeque;
use std::rc::Rc;

use log::info;

use super::widgets::{progress_bar, shade};
use super::ScreenContext;
use crate::core::{Countdown, FrameInput, Key, Rect, Rgba, Surface};
use crate::traits::{Screen, Transition};

/// Pause between the round ending and leaving the screen
const OUTRO_SECONDS: f32 = 0.8;

/// The minigames a round can host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MinigameKind {
    /// Hidden targets on a 5x5 board
    GridReveal,
    /// Question with four answers
    Quiz,
    /// Wheel with eight slices
    SpinnerWheel,
    /// Three options against the clock
    TimedDecision,
    /// Pick the word matching a category, five options
    CategoryGuess,
}

impl MinigameKind {
    /// Campaign order
    pub const ALL: [MinigameKind; 5] = [
        Self::GridReveal,
        Self::Quiz,
        Self::SpinnerWheel,
        Self::TimedDecision,
        Self::CategoryGuess,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::GridReveal => "grid-reveal",
            Self::Quiz => "quiz",
            Self::SpinnerWheel => "spinner-wheel",
            Self::TimedDecision => "timed-decision",
            Self::CategoryGuess => "category-guess",
        }
    }

    /// Name shown to players
    pub fn title(&self) -> &'static str {
        match self {
            Self::GridReveal => "Batalha Naval",
            Self::Quiz => "Show do Bilhão",
            Self::SpinnerWheel => "Roleta do Risco",
            Self::TimedDecision => "Perseguição",
            Self::CategoryGuess => "STOP",
        }
    }

    pub fn choice_count(&self) -> usize {
        match self {
            Self::GridReveal => 25,
            Self::Quiz => 4,
            Self::SpinnerWheel => 8,
            Self::TimedDecision => 3,
            Self::CategoryGuess => 5,
        }
    }

    /// Seconds allowed, for the timed kinds
    pub fn time_limit(&self) -> Option<f32> {
        match self {
            Self::TimedDecision => Some(5.0),
            Self::CategoryGuess => Some(20.0),
            _ => None,
        }
    }

    pub fn background(&self) -> &'static str {
        match self {
            Self::GridReveal => "background/background_batalha_naval.png",
            Self::Quiz => "background/background_show_do_bilhao.jpg",
            Self::SpinnerWheel => "background/background_roleta_risco.png",
            Self::TimedDecision => "background/background_perseguicao.png",
            Self::CategoryGuess => "background/background_stop.png",
        }
    }

    pub fn accent(&self) -> Rgba {
        match self {
            Self::GridReveal => Rgba::rgb(40, 110, 190),
            Self::Quiz => Rgba::rgb(210, 170, 40),
            Self::SpinnerWheel => Rgba::rgb(190, 50, 60),
            Self::TimedDecision => Rgba::rgb(60, 160, 90),
            Self::CategoryGuess => Rgba::rgb(140, 70, 180),
        }
    }
}

/// Where a round's choices and timer bar sit on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct RoundLayout {
    pub choices: Vec<Rect>,
    pub timer_bar: Option<Rect>,
    /// Wheel center and radius, spinner only
    pub wheel: Option<((i32, i32), i32)>,
}

impl RoundLayout {
    /// Lay out `kind` on a canvas of `width` x `height` virtual pixels
    pub fn for_kind(kind: MinigameKind, width: i32, height: i32) -> Self {
        let (cx, cy) = (width / 2, height / 2);
        let mut wheel = None;

        let choices = match kind {
            MinigameKind::GridReveal => {
                let gap = 6;
                let cell = (width.min(height) * 7 / 10 - 4 * gap) / 5;
                let board = cell * 5 + gap * 4;
                let (x0, y0) = (cx - board / 2, cy - board / 2 + height / 20);
                (0..25)
                    .map(|i| Rect::new(x0 + (i % 5) * (cell + gap), y0 + (i / 5) * (cell + gap), cell, cell))
                    .collect()
            }
            MinigameKind::Quiz => {
                let (w, h) = (width * 3 / 8, height / 9);
                let gap = height / 30;
                let top = height / 2;
                (0..4)
                    .map(|i| {
                        let col = i % 2;
                        let row = i / 2;
                        let x = if col == 0 { cx - gap / 2 - w } else { cx + gap / 2 };
                        Rect::new(x, top + row * (h + gap), w, h)
                    })
                    .collect()
            }
            MinigameKind::SpinnerWheel => {
                let radius = height * 3 / 10;
                let center = (cx, cy + height / 20);
                wheel = Some((center, radius));
                let size = height / 12;
                (0..8)
                    .map(|i| {
                        let angle = (i as f32 + 0.5) * std::f32::consts::TAU / 8.0;
                        let r = radius as f32 * 0.62;
                        let x = center.0 + (angle.cos() * r).round() as i32;
                        let y = center.1 + (angle.sin() * r).round() as i32;
                        Rect::from_center(x, y, size, size)
                    })
                    .collect()
            }
            MinigameKind::TimedDecision | MinigameKind::CategoryGuess => {
                let n = kind.choice_count() as i32;
                let gap = width / 40;
                let w = (width * 4 / 5 - gap * (n - 1)) / n;
                let h = height / 4;
                let x0 = cx - (w * n + gap * (n - 1)) / 2;
                (0..n).map(|i| Rect::new(x0 + i * (w + gap), cy, w, h)).collect()
            }
        };

        let timer_bar = kind
            .time_limit()
            .map(|_| Rect::new(width / 5, height / 24, width * 3 / 5, height / 30));

        Self {
            choices,
            timer_bar,
            wheel,
        }
    }

    /// Index of the choice containing the point
    pub fn hit(&self, x: i32, y: i32) -> Option<usize> {
        self.choices.iter().position(|r| r.contains(x, y))
    }
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Picked(usize),
    TimedOut,
}

/// Hosts one minigame round; in campaign mode hands over to the next kind
/// when it finishes.
pub struct Round {
    ctx: ScreenContext,
    kind: MinigameKind,
    layout: RoundLayout,
    background: Rc<Surface>,
    focus: usize,
    hovered: Option<usize>,
    clock: Option<Countdown>,
    outcome: Option<Outcome>,
    outro: Countdown,
    /// Kinds still to play after this one
    campaign: Option<VecDeque<MinigameKind>>,
}

impl Round {
    /// A single round, returning to the previous screen when done
    pub fn single(ctx: ScreenContext, kind: MinigameKind) -> Self {
        let layout = RoundLayout::for_kind(kind, ctx.width, ctx.height);
        let background = ctx.background(kind.background());
        Self {
            ctx,
            kind,
            layout,
            background,
            focus: 0,
            hovered: None,
            clock: kind.time_limit().map(Countdown::new),
            outcome: None,
            outro: Countdown::new(OUTRO_SECONDS),
            campaign: None,
        }
    }

    /// Every kind in order, starting with the first
    pub fn campaign(ctx: ScreenContext) -> Self {
        let mut queue: VecDeque<_> = MinigameKind::ALL.into_iter().collect();
        let first = queue.pop_front().unwrap_or(MinigameKind::GridReveal);
        Self::with_queue(ctx, first, queue)
    }

    fn with_queue(ctx: ScreenContext, kind: MinigameKind, queue: VecDeque<MinigameKind>) -> Self {
        let mut round = Self::single(ctx, kind);
        round.campaign = Some(queue);
        round
    }

    pub fn kind(&self) -> MinigameKind {
        self.kind
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn layout(&self) -> &RoundLayout {
        &self.layout
    }

    fn finish(&mut self, outcome: Outcome) {
        info!("Round {} finished: {:?}", self.kind.name(), outcome);
        self.outcome = Some(outcome);
        if let Some(clock) = &mut self.clock {
            clock.cancel();
        }
        self.outro.start();
    }

    /// Where to go once the outro is over
    fn leave(&mut self) -> Transition {
        let next = self.campaign.as_mut().and_then(|queue| queue.pop_front());
        match (next, self.campaign.take()) {
            (Some(next), Some(rest)) => Transition::Replace(Box::new(Self::with_queue(self.ctx.clone(), next, rest))),
            _ => Transition::Pop,
        }
    }

    fn choice_color(&self, index: usize) -> Rgba {
        let accent = self.kind.accent();
        match self.outcome {
            Some(Outcome::Picked(picked)) if picked == index => Rgba::rgb(250, 220, 90),
            Some(_) => Rgba::rgb(70, 70, 80),
            None if self.hovered == Some(index) || self.focus == index => {
                Rgba::rgb(accent.r.saturating_add(50), accent.g.saturating_add(50), accent.b.saturating_add(50))
            }
            None => accent,
        }
    }
}

impl Screen for Round {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn enter(&mut self) {
        if let Some(clock) = &mut self.clock {
            clock.start();
        }
    }

    fn update(&mut self, delta: f32, input: &FrameInput) -> Transition {
        if input.key_pressed(Key::Escape) {
            return Transition::Pop;
        }

        if self.outcome.is_some() {
            return if self.outro.tick(delta) { self.leave() } else { Transition::None };
        }

        self.hovered = self.layout.hit(input.pointer.0, input.pointer.1);
        let n = self.layout.choices.len();
        for key in &input.keys {
            match key {
                Key::Left | Key::Up => self.focus = (self.focus + n - 1) % n,
                Key::Right | Key::Down => self.focus = (self.focus + 1) % n,
                _ => {}
            }
        }

        let clicked = input.clicks.iter().find_map(|&(x, y)| self.layout.hit(x, y));
        if let Some(index) = clicked {
            self.finish(Outcome::Picked(index));
        } else if input.key_pressed(Key::Enter) || input.key_pressed(Key::Space) {
            self.finish(Outcome::Picked(self.focus));
        } else if self.clock.as_mut().is_some_and(|clock| clock.tick(delta)) {
            self.finish(Outcome::TimedOut);
        }

        Transition::None
    }

    fn render(&self, surface: &mut Surface) {
        surface.blit(&self.background, 0, 0);
        shade(surface, 90);

        if let Some(((cx, cy), radius)) = self.layout.wheel {
            surface.fill_circle(cx, cy, radius, Rgba::rgb(25, 25, 35));
            for i in 0..8 {
                let angle = i as f32 * std::f32::consts::TAU / 8.0;
                let edge = (
                    cx + (angle.cos() * radius as f32).round() as i32,
                    cy + (angle.sin() * radius as f32).round() as i32,
                );
                surface.draw_line((cx, cy), edge, Rgba::WHITE);
            }
            surface.draw_circle(cx, cy, radius, Rgba::WHITE);
        }

        for (i, rect) in self.layout.choices.iter().enumerate() {
            surface.blend_rect(rect.translated(4, 4), Rgba::BLACK.with_alpha(160));
            surface.fill_rect(*rect, self.choice_color(i));
            surface.stroke_rect(*rect, 2, Rgba::WHITE);
        }

        if let (Some(bar), Some(clock)) = (self.layout.timer_bar, &self.clock) {
            let left = match self.outcome {
                Some(Outcome::TimedOut) => 0.0,
                _ => 1.0 - clock.progress(),
            };
            let fill = if left < 0.25 { Rgba::rgb(220, 60, 50) } else { Rgba::rgb(80, 200, 90) };
            progress_bar(surface, bar, left, fill);
        }

        if self.outcome.is_some() {
            shade(surface, (self.outro.progress() * 160.0) as u8);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ImageAssets;

    fn ctx() -> ScreenContext {
        ScreenContext::new(ImageAssets::new("/nonexistent").into_shared(), (1280, 720))
    }

    fn click(x: i32, y: i32) -> FrameInput {
        FrameInput {
            pointer: (x, y),
            clicks: vec![(x, y)],
            ..FrameInput::default()
        }
    }

    #[test]
    fn layouts_fit_canvas_without_overlap() {
        let canvas = Rect::new(0, 0, 1280, 720);
        for kind in MinigameKind::ALL {
            let layout = RoundLayout::for_kind(kind, 1280, 720);
            assert_eq!(layout.choices.len(), kind.choice_count(), "{}", kind.name());
            assert_eq!(layout.timer_bar.is_some(), kind.time_limit().is_some());

            for (i, a) in layout.choices.iter().enumerate() {
                assert!(a.x >= canvas.x && a.right() <= canvas.right(), "{} choice {}", kind.name(), i);
                assert!(a.y >= canvas.y && a.bottom() <= canvas.bottom(), "{} choice {}", kind.name(), i);
                for b in &layout.choices[i + 1..] {
                    let overlap = a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom();
                    assert!(!overlap, "{} choices overlap", kind.name());
                }
            }
        }
    }

    #[test]
    fn hit_maps_choice_centers() {
        let layout = RoundLayout::for_kind(MinigameKind::Quiz, 1280, 720);
        for (i, rect) in layout.choices.iter().enumerate() {
            let (x, y) = rect.center();
            assert_eq!(layout.hit(x, y), Some(i));
        }
        assert_eq!(layout.hit(-5, -5), None);
    }

    #[test]
    fn click_picks_then_pops_after_outro() {
        let mut round = Round::single(ctx(), MinigameKind::Quiz);
        round.enter();
        let (x, y) = round.layout().choices[2].center();

        assert!(matches!(round.update(0.016, &click(x, y)), Transition::None));
        assert_eq!(round.outcome(), Some(Outcome::Picked(2)));

        // Further clicks are ignored
        let (x0, y0) = round.layout().choices[0].center();
        round.update(0.016, &click(x0, y0));
        assert_eq!(round.outcome(), Some(Outcome::Picked(2)));

        assert!(matches!(round.update(1.0, &FrameInput::default()), Transition::Pop));
    }

    #[test]
    fn timed_round_runs_out() {
        let mut round = Round::single(ctx(), MinigameKind::TimedDecision);
        round.enter();
        for _ in 0..4 {
            round.update(1.0, &FrameInput::default());
        }
        assert_eq!(round.outcome(), None);
        round.update(1.0, &FrameInput::default());
        assert_eq!(round.outcome(), Some(Outcome::TimedOut));
    }

    #[test]
    fn untimed_round_never_expires() {
        let mut round = Round::single(ctx(), MinigameKind::SpinnerWheel);
        round.enter();
        for _ in 0..100 {
            round.update(1.0, &FrameInput::default());
        }
        assert_eq!(round.outcome(), None);
    }

    #[test]
    fn keyboard_focus_wraps() {
        let mut round = Round::single(ctx(), MinigameKind::TimedDecision);
        round.enter();
        let input = FrameInput {
            keys: vec![Key::Left, Key::Enter],
            ..FrameInput::default()
        };
        round.update(0.016, &input);
        assert_eq!(round.outcome(), Some(Outcome::Picked(2)));
    }

    #[test]
    fn campaign_visits_every_kind() {
        let mut screen: Box<dyn Screen> = Box::new(Round::campaign(ctx()));
        let mut visited = vec![screen.name().to_string()];

        loop {
            screen.enter();
            screen.update(0.016, &FrameInput {
                keys: vec![Key::Enter],
                ..FrameInput::default()
            });
            match screen.update(1.0, &FrameInput::default()) {
                Transition::Replace(next) => {
                    screen = next;
                    visited.push(screen.name().to_string());
                }
                Transition::Pop => break,
                other => panic!("unexpected {:?}", other),
            }
        }

        let expected: Vec<_> = MinigameKind::ALL.iter().map(|k| k.name().to_string()).collect();
        assert_eq!(visited, expected);
    }

    #[test]
    fn escape_abandons_round() {
        let mut round = Round::single(ctx(), MinigameKind::GridReveal);
        let input = FrameInput {
            keys: vec![Key::Escape],
            ..FrameInput::default()
        };
        assert!(matches!(round.update(0.016, &input), Transition::Pop));
    }
}
