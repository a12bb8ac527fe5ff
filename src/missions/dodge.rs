use super::{Controls, Outcome};
use crate::arena::{
    aim, random_spot, Bounds, Countdown, Entity, Rect, Vec2, Wanderer, CAT_SIZE, PLAYER_SIZE,
    PLAYER_SPEED, PLAY_TOP, WORLD_H, WORLD_W,
};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

const TIME_LIMIT: f32 = 10.0;
const CAT_SPEED: f32 = 200.0;
pub const PELLET_SIZE: f32 = 14.0;
const PELLET_SPREAD: f32 = 60.0;
const PELLET_MIN_SPEED: u32 = 100;
const PELLET_MAX_SPEED: u32 = 220;
const FIRST_INTERVAL_FLOOR: f32 = 0.3;
const INTERVAL_FLOOR: f32 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pellet {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Pellet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, PELLET_SIZE, PELLET_SIZE)
    }
}

#[derive(Clone, Copy)]
enum Side {
    Top,
    Left,
    Right,
}

/// Day four: the cat is in a playful mood and flings kibble. Keep clear of
/// both until time runs out.
pub struct Dodge {
    pub player: Entity,
    pub cat: Wanderer,
    pub pellets: Vec<Pellet>,
    pub clock: Countdown,
    spawn_timer: f32,
    spawn_interval: f32,
    bounds: Bounds,
}

impl Dodge {
    pub fn new(rng: &mut impl Rng) -> Self {
        let player = Entity::new(
            random_spot(
                rng,
                (40.0, WORLD_W - 40.0 - PLAYER_SIZE),
                (120.0, WORLD_H - 120.0 - PLAYER_SIZE),
            ),
            PLAYER_SIZE,
            PLAYER_SPEED,
        );
        let spot = random_spot(
            rng,
            (40.0, WORLD_W - 40.0 - CAT_SIZE),
            (120.0, WORLD_H - 120.0 - CAT_SIZE),
        );
        let cat = Wanderer::new(Entity::new(spot, CAT_SIZE, CAT_SPEED), rng);
        let spawn_interval = spawn_interval(rng, FIRST_INTERVAL_FLOOR);
        Self {
            player,
            cat,
            pellets: Vec::new(),
            clock: Countdown::new(TIME_LIMIT),
            spawn_timer: 0.0,
            spawn_interval,
            bounds: Bounds::play_area(PLAYER_SIZE),
        }
    }

    pub fn step(&mut self, controls: &Controls, dt: f32, rng: &mut impl Rng) -> Outcome {
        self.clock.advance(dt);
        self.player.advance(controls.heading(), dt);
        self.player.pos = self.bounds.clamp(self.player.pos);
        self.cat.step(dt, rng);

        self.spawn_timer += dt;
        if self.spawn_timer >= self.spawn_interval {
            self.spawn_timer = 0.0;
            self.spawn_interval = spawn_interval(rng, INTERVAL_FLOOR);
            self.spawn(rng);
        }
        for p in &mut self.pellets {
            p.pos += p.vel * dt;
        }

        let player = self.player.rect();
        if self.pellets.iter().any(|p| p.rect().intersects(&player)) {
            return Outcome::Lost;
        }
        let cat = self.cat.body.rect();
        let world = Rect::new(0.0, 0.0, WORLD_W, WORLD_H);
        self.pellets
            .retain(|p| !p.rect().intersects(&cat) && p.rect().intersects(&world));
        if player.intersects(&cat) {
            return Outcome::Lost;
        }
        if self.clock.expired() {
            return Outcome::Won;
        }
        Outcome::Running
    }

    fn spawn(&mut self, rng: &mut impl Rng) {
        let side = [Side::Top, Side::Left, Side::Right]
            .choose(rng)
            .copied()
            .unwrap_or(Side::Top);
        let pos = match side {
            Side::Top => Vec2::new(rng.gen_range(20.0..=WORLD_W - 20.0).floor(), PLAY_TOP),
            Side::Left => Vec2::new(20.0, rng.gen_range(PLAY_TOP..=WORLD_H - 60.0).floor()),
            Side::Right => Vec2::new(
                WORLD_W - 40.0,
                rng.gen_range(PLAY_TOP..=WORLD_H - 60.0).floor(),
            ),
        };
        let speed = rng.gen_range(PELLET_MIN_SPEED..=PELLET_MAX_SPEED) as f32;
        let vel = aim(pos, self.player.pos, PELLET_SPREAD, speed, rng);
        trace!(x = pos.x, y = pos.y, speed, "kibble thrown");
        self.pellets.push(Pellet { pos, vel });
    }
}

fn spawn_interval(rng: &mut impl Rng, floor: f32) -> f32 {
    (rng.gen_range(1..=5) as f32 / 20.0).max(floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn calm(rng: &mut StdRng) -> Dodge {
        let mut m = Dodge::new(rng);
        m.cat.body.speed = 0.0;
        m.cat.body.pos = Vec2::new(300.0, 480.0);
        m.player.pos = Vec2::new(600.0, 400.0);
        m
    }

    #[test]
    fn kibble_hit_loses() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut m = calm(&mut rng);
        m.spawn_interval = 100.0;
        m.pellets.push(Pellet {
            pos: m.player.pos + Vec2::new(-20.0, 5.0),
            vel: Vec2::new(200.0, 0.0),
        });
        assert_eq!(m.step(&Controls::default(), 0.05, &mut rng), Outcome::Lost);
    }

    #[test]
    fn cat_eats_kibble() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut m = calm(&mut rng);
        m.spawn_interval = 100.0;
        m.pellets.push(Pellet {
            pos: m.cat.body.pos + Vec2::new(5.0, 5.0),
            vel: Vec2::ZERO,
        });
        assert_eq!(m.step(&Controls::default(), 0.01, &mut rng), Outcome::Running);
        assert!(m.pellets.is_empty());
    }

    #[test]
    fn stray_kibble_is_culled() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut m = calm(&mut rng);
        m.spawn_interval = 100.0;
        m.pellets.push(Pellet {
            pos: Vec2::new(950.0, 300.0),
            vel: Vec2::new(500.0, 0.0),
        });
        m.step(&Controls::default(), 0.1, &mut rng);
        assert!(m.pellets.is_empty());
    }

    #[test]
    fn kibble_is_thrown_on_schedule() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut m = calm(&mut rng);
        assert!(m.spawn_interval >= FIRST_INTERVAL_FLOOR);
        m.step(&Controls::default(), m.spawn_interval, &mut rng);
        assert_eq!(m.pellets.len(), 1);
        assert!(m.spawn_interval >= INTERVAL_FLOOR && m.spawn_interval <= 0.25);
    }

    #[test]
    fn surviving_the_clock_wins() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut m = calm(&mut rng);
        m.spawn_interval = 100.0;
        let mut outcome = Outcome::Running;
        for _ in 0..=200 {
            outcome = m.step(&Controls::default(), 0.05, &mut rng);
            if outcome != Outcome::Running {
                break;
            }
        }
        assert_eq!(outcome, Outcome::Won);
    }
}
