use std::rc::Rc;

use glam::Vec2;
use rand::Rng;

use crate::core::{FrameInput, Rect, Rgba, Surface};

/// Fraction of the remaining distance covered per 60 Hz frame
const EASE_PER_FRAME: f32 = 0.18;
/// Buttons slide in from this far below their resting place
const SLIDE_IN_DISTANCE: f32 = 280.0;
const HOVER_SCALE: f32 = 1.06;
const SHADOW_OFFSET: i32 = 6;
const ICON_INSET: i32 = 38;

/// Frame-rate independent version of "move 18% of the way each frame"
fn ease_factor(delta: f32) -> f32 {
    1.0 - (1.0 - EASE_PER_FRAME).powf(delta * 60.0)
}

/// Clickable rectangle that eases into place and grows while hovered
#[derive(Debug, Clone)]
pub struct Button {
    target: Vec2,
    center: Vec2,
    size: Vec2,
    scale: f32,
    base: Rgba,
    hover: Rgba,
    hovered: bool,
    icon: Option<Rc<Surface>>,
    label: Option<Rc<Surface>>,
}

impl Button {
    /// Button resting at `center`, starting below it and sliding up
    pub fn new(center: (i32, i32), size: (i32, i32), base: Rgba, hover: Rgba) -> Self {
        let target = Vec2::new(center.0 as f32, center.1 as f32);
        Self {
            target,
            center: target + Vec2::new(0.0, SLIDE_IN_DISTANCE),
            size: Vec2::new(size.0 as f32, size.1 as f32),
            scale: 1.0,
            base,
            hover,
            hovered: false,
            icon: None,
            label: None,
        }
    }

    pub fn with_icon(mut self, icon: Rc<Surface>) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Pre-rendered text drawn in the middle of the button
    pub fn with_label(mut self, label: Rc<Surface>) -> Self {
        self.label = Some(label);
        self
    }

    /// Skip the slide-in
    pub fn placed(mut self) -> Self {
        self.center = self.target;
        self
    }

    /// Hit area at the current position (unscaled)
    pub fn rect(&self) -> Rect {
        Rect::from_center(
            self.center.x.round() as i32,
            self.center.y.round() as i32,
            self.size.x as i32,
            self.size.y as i32,
        )
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_settled(&self) -> bool {
        self.center.distance(self.target) < 0.5
    }

    /// Animate and hit-test; returns true when clicked this frame
    pub fn update(&mut self, delta: f32, input: &FrameInput) -> bool {
        let t = ease_factor(delta);
        self.center = self.center.lerp(self.target, t);

        self.hovered = input.hovering(&self.rect());
        let target_scale = if self.hovered { HOVER_SCALE } else { 1.0 };
        self.scale += (target_scale - self.scale) * t;

        input.clicked_in(&self.rect())
    }

    pub fn render(&self, surface: &mut Surface) {
        let r = self.rect().scaled(self.scale);

        surface.fill_rect(r.translated(SHADOW_OFFSET, SHADOW_OFFSET), Rgba::BLACK);
        surface.fill_rect(r, if self.hovered { self.hover } else { self.base });
        surface.stroke_rect(r, 3, Rgba::WHITE);

        let (cx, cy) = r.center();
        if let Some(icon) = &self.icon {
            surface.blit_centered(icon, r.x + ICON_INSET, cy);
        }
        if let Some(label) = &self.label {
            // Keep clear of the icon when there is room
            let shift = match &self.icon {
                Some(_) if label.width() as i32 + 2 * ICON_INSET < r.w => ICON_INSET / 2,
                _ => 0,
            };
            surface.blit_centered(label, cx + shift, cy);
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Particle {
    pos: Vec2,
    speed: f32,
    sway: f32,
    radius: i32,
    color: Rgba,
}

/// Slowly rising translucent dots behind menus
#[derive(Debug, Clone)]
pub struct Particles {
    items: Vec<Particle>,
    bounds: Vec2,
}

impl Particles {
    pub fn new(count: usize, width: i32, height: i32, rng: &mut impl Rng) -> Self {
        let bounds = Vec2::new(width.max(1) as f32, height.max(1) as f32);
        let items = (0..count).map(|_| Self::spawn(bounds, rng.gen_range(0.0..bounds.y), rng)).collect();
        Self { items, bounds }
    }

    fn spawn(bounds: Vec2, y: f32, rng: &mut impl Rng) -> Particle {
        Particle {
            pos: Vec2::new(rng.gen_range(0.0..bounds.x), y),
            speed: rng.gen_range(18.0..54.0),
            sway: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
            radius: rng.gen_range(2..=4),
            color: Rgba::WHITE.with_alpha(rng.gen_range(40..=130)),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drift upwards; dots leaving the top re-enter below the bottom edge
    pub fn update(&mut self, delta: f32, rng: &mut impl Rng) {
        for i in 0..self.items.len() {
            let p = &mut self.items[i];
            p.pos.y -= p.speed * delta;
            p.pos.x += (p.pos.y * 0.01).sin() * 24.0 * p.sway * delta;
            if p.pos.y < -10.0 {
                let y = self.bounds.y + rng.gen_range(20.0..80.0);
                self.items[i] = Self::spawn(self.bounds, y, rng);
            }
        }
    }

    pub fn render(&self, surface: &mut Surface) {
        for p in &self.items {
            surface.fill_circle(p.pos.x as i32, p.pos.y as i32, p.radius, p.color);
        }
    }

    #[cfg(test)]
    fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.items.iter().map(|p| p.pos)
    }
}

/// Horizontal bar filled to `fraction` (clamped to [0, 1])
pub fn progress_bar(surface: &mut Surface, rect: Rect, fraction: f32, fill: Rgba) {
    let fraction = fraction.clamp(0.0, 1.0);
    surface.fill_rect(rect, Rgba::rgb(30, 30, 40));
    let filled = Rect::new(rect.x, rect.y, (rect.w as f32 * fraction).round() as i32, rect.h);
    surface.fill_rect(filled, fill);
    surface.stroke_rect(rect, 2, Rgba::WHITE);
}

/// Darken everything already drawn by `alpha`
pub fn shade(surface: &mut Surface, alpha: u8) {
    if alpha > 0 {
        let rect = surface.rect();
        surface.blend_rect(rect, Rgba::BLACK.with_alpha(alpha));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SIXTIETH: f32 = 1.0 / 60.0;

    #[test]
    fn button_slides_into_place() {
        let mut button = Button::new((640, 400), (300, 80), Rgba::rgb(200, 70, 70), Rgba::rgb(240, 110, 110));
        assert!(!button.is_settled());

        let idle = FrameInput::idle((0, 0));
        for _ in 0..120 {
            button.update(SIXTIETH, &idle);
        }
        assert!(button.is_settled());
        assert_eq!(button.rect(), Rect::from_center(640, 400, 300, 80));
    }

    #[test]
    fn button_hover_and_click() {
        let mut button = Button::new((100, 100), (80, 40), Rgba::BLACK, Rgba::WHITE).placed();

        assert!(!button.update(SIXTIETH, &FrameInput::idle((100, 100))));
        assert!(button.is_hovered());

        let click = FrameInput {
            pointer: (100, 100),
            clicks: vec![(100, 100)],
            ..FrameInput::default()
        };
        assert!(button.update(SIXTIETH, &click));

        // Letterbox bar positions never hit
        let outside = FrameInput {
            pointer: (-40, 100),
            clicks: vec![(-40, 100)],
            ..FrameInput::default()
        };
        assert!(!button.update(SIXTIETH, &outside));
        assert!(!button.is_hovered());
    }

    #[test]
    fn button_renders_hover_color() {
        let mut surface = Surface::new(200, 200);
        let mut button = Button::new((100, 100), (80, 40), Rgba::rgb(1, 1, 1), Rgba::rgb(9, 9, 9)).placed();
        button.update(SIXTIETH, &FrameInput::idle((100, 100)));
        button.render(&mut surface);
        assert_eq!(surface.get(100, 100), Some(Rgba::rgb(9, 9, 9)));
    }

    #[test]
    fn label_is_drawn_centered() {
        let mut surface = Surface::new(200, 200);
        let label = Rc::new(Surface::filled(10, 10, Rgba::rgb(7, 7, 7)));
        let button = Button::new((100, 100), (80, 40), Rgba::BLACK, Rgba::WHITE)
            .placed()
            .with_label(label);
        button.render(&mut surface);
        assert_eq!(surface.get(100, 100), Some(Rgba::rgb(7, 7, 7)));
        assert_eq!(surface.get(70, 100), Some(Rgba::BLACK));
    }

    #[test]
    fn easing_is_frame_rate_independent() {
        let one = ease_factor(2.0 * SIXTIETH);
        let two = 1.0 - (1.0 - ease_factor(SIXTIETH)).powi(2);
        assert!((one - two).abs() < 1e-5);
        assert_eq!(ease_factor(0.0), 0.0);
    }

    #[test]
    fn particles_stay_near_canvas() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut particles = Particles::new(32, 1280, 720, &mut rng);
        assert_eq!(particles.len(), 32);
        for _ in 0..600 {
            particles.update(SIXTIETH, &mut rng);
        }
        assert!(particles.positions().all(|p| p.y >= -10.0 && p.y <= 720.0 + 80.0));
    }

    #[test]
    fn progress_bar_fills_fraction() {
        let mut surface = Surface::new(100, 10);
        progress_bar(&mut surface, Rect::new(0, 0, 100, 10), 0.5, Rgba::rgb(0, 200, 0));
        assert_eq!(surface.get(25, 5), Some(Rgba::rgb(0, 200, 0)));
        assert_eq!(surface.get(75, 5), Some(Rgba::rgb(30, 30, 40)));
    }
}
