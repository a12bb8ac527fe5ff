//! Shared playfield scaffold for the free-moving missions: positions, boxes,
//! the countdown clock, and the cat's random walk.

use rand::seq::SliceRandom;
use rand::Rng;

pub const WORLD_W: f32 = 960.0;
pub const WORLD_H: f32 = 540.0;
pub const PLAY_TOP: f32 = 80.0;
pub const EDGE_MARGIN: f32 = 10.0;
pub const PLAYER_SIZE: f32 = 28.0;
pub const CAT_SIZE: f32 = 28.0;
pub const PLAYER_SPEED: f32 = 140.0;

const TURN_MIN: u32 = 1;
const TURN_MAX: u32 = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }

    /// Unit vector in the same direction; zero stays zero.
    pub fn normalized(self) -> Vec2 {
        let len = self.length();
        if len == 0.0 {
            Vec2::ZERO
        } else {
            self * (1.0 / len)
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Overlap test; boxes that only share an edge do not collide.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// True when `point` lies within `reach` of `center`.
pub fn within(center: Vec2, point: Vec2, reach: f32) -> bool {
    center.distance(point) <= reach
}

/// Clamp box for a square of side `size` kept inside the play area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn play_area(size: f32) -> Self {
        Self {
            min: Vec2::new(EDGE_MARGIN, PLAY_TOP),
            max: Vec2::new(WORLD_W - size - EDGE_MARGIN, WORLD_H - size - EDGE_MARGIN),
        }
    }

    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(self.min.x, self.max.x), p.y.clamp(self.min.y, self.max.y))
    }
}

/// A square sprite with a top-left position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entity {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
}

impl Entity {
    pub fn new(pos: Vec2, size: f32, speed: f32) -> Self {
        Self { pos, size, speed }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Moves along `dir` (normalized first, so diagonals are not faster).
    pub fn advance(&mut self, dir: Vec2, dt: f32) {
        self.pos += dir.normalized() * (self.speed * dt);
    }
}

/// Counts down a mission's time limit in fixed steps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Countdown {
    total: f32,
    elapsed: f32,
}

impl Countdown {
    pub fn new(total: f32) -> Self {
        Self {
            total,
            elapsed: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn total(&self) -> f32 {
        self.total
    }

    pub fn expired(&self) -> bool {
        self.elapsed >= self.total
    }

    /// Whole seconds left, as shown on the HUD.
    pub fn remaining_secs(&self) -> u32 {
        (self.total - self.elapsed).max(0.0) as u32
    }

    /// Share of the time limit still left, in `0.0..=1.0`.
    pub fn fraction_left(&self) -> f32 {
        if self.total <= 0.0 {
            return 0.0;
        }
        (1.0 - self.elapsed / self.total).clamp(0.0, 1.0)
    }
}

/// The cat's restless walk: pick a heading on each axis from {-1, 0, 1}, keep it
/// for a short random spell, bounce off the play-area edges.
#[derive(Clone, Debug, PartialEq)]
pub struct Wanderer {
    pub body: Entity,
    heading: (i8, i8),
    turn_in: f32,
    bounds: Bounds,
}

impl Wanderer {
    pub fn new(body: Entity, rng: &mut impl Rng) -> Self {
        let bounds = Bounds::play_area(body.size);
        Self {
            body,
            heading: random_heading(rng),
            turn_in: turn_interval(rng),
            bounds,
        }
    }

    pub fn heading(&self) -> (i8, i8) {
        self.heading
    }

    pub fn step(&mut self, dt: f32, rng: &mut impl Rng) {
        self.turn_in -= dt;
        if self.turn_in <= 0.0 {
            self.heading = random_heading(rng);
            self.turn_in = turn_interval(rng);
        }

        let dir = Vec2::new(f32::from(self.heading.0), f32::from(self.heading.1));
        self.body.advance(dir, dt);

        let p = self.body.pos;
        if p.x < self.bounds.min.x || p.x > self.bounds.max.x {
            self.heading.0 = -self.heading.0;
        }
        if p.y < self.bounds.min.y || p.y > self.bounds.max.y {
            self.heading.1 = -self.heading.1;
        }
        self.body.pos = self.bounds.clamp(p);
    }
}

fn random_heading(rng: &mut impl Rng) -> (i8, i8) {
    const AXIS: [i8; 3] = [-1, 0, 1];
    let x = AXIS.choose(rng).copied().unwrap_or(0);
    let y = AXIS.choose(rng).copied().unwrap_or(0);
    (x, y)
}

fn turn_interval(rng: &mut impl Rng) -> f32 {
    rng.gen_range(TURN_MIN..=TURN_MAX) as f32 / 10.0 + 0.3
}

/// A random whole-pixel position with `x` in `xs` and `y` in `ys` (inclusive).
pub fn random_spot(rng: &mut impl Rng, xs: (f32, f32), ys: (f32, f32)) -> Vec2 {
    let x = rng.gen_range(xs.0..=xs.1);
    let y = rng.gen_range(ys.0..=ys.1);
    Vec2::new(x.floor(), y.floor())
}

/// Velocity from `from` toward `target` (plus jitter up to `spread` on each
/// axis) at `speed`.
pub fn aim(from: Vec2, target: Vec2, spread: f32, speed: f32, rng: &mut impl Rng) -> Vec2 {
    let jitter = Vec2::new(rng.gen_range(-spread..=spread), rng.gen_range(-spread..=spread));
    let d = target - from + jitter;
    let dist = d.length().max(1.0);
    d * (speed / dist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(a.intersects(&Rect::new(9.5, 9.5, 10.0, 10.0)));
    }

    #[test]
    fn diagonal_moves_at_unit_speed() {
        let mut e = Entity::new(Vec2::ZERO, 28.0, 100.0);
        e.advance(Vec2::new(1.0, 1.0), 1.0);
        assert!((e.pos.length() - 100.0).abs() < 1e-3);
        e.advance(Vec2::ZERO, 1.0);
        assert!((e.pos.length() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn countdown_reports_whole_seconds() {
        let mut t = Countdown::new(20.0);
        t.advance(0.5);
        assert_eq!(t.remaining_secs(), 19);
        assert!(!t.expired());
        t.advance(19.5);
        assert!(t.expired());
        assert_eq!(t.remaining_secs(), 0);
        assert_eq!(t.fraction_left(), 0.0);
    }

    #[test]
    fn wanderer_stays_in_play_area() {
        let mut rng = StdRng::seed_from_u64(9);
        let body = Entity::new(Vec2::new(400.0, 300.0), CAT_SIZE, 280.0);
        let mut cat = Wanderer::new(body, &mut rng);
        let bounds = Bounds::play_area(CAT_SIZE);
        for _ in 0..5_000 {
            cat.step(1.0 / 60.0, &mut rng);
            let p = cat.body.pos;
            assert!(p.x >= bounds.min.x && p.x <= bounds.max.x);
            assert!(p.y >= bounds.min.y && p.y <= bounds.max.y);
        }
    }

    #[test]
    fn wanderer_bounces_off_the_left_wall() {
        let mut rng = StdRng::seed_from_u64(3);
        let bounds = Bounds::play_area(CAT_SIZE);
        let body = Entity::new(Vec2::new(bounds.min.x + 1.0, 300.0), CAT_SIZE, 280.0);
        let mut cat = Wanderer::new(body, &mut rng);
        cat.heading = (-1, 0);
        cat.turn_in = 10.0;
        cat.step(0.1, &mut rng);
        assert_eq!(cat.heading(), (1, 0));
        assert_eq!(cat.body.pos.x, bounds.min.x);
        cat.step(0.1, &mut rng);
        assert!(cat.body.pos.x > bounds.min.x);
        assert_eq!(cat.heading(), (1, 0));
    }

    #[test]
    fn aim_points_at_target() {
        let mut rng = StdRng::seed_from_u64(1);
        let v = aim(Vec2::new(0.0, 0.0), Vec2::new(500.0, 0.0), 0.0, 150.0, &mut rng);
        assert!((v.x - 150.0).abs() < 1e-3);
        assert!(v.y.abs() < 1e-3);
    }
}
