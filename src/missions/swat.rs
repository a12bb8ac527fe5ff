use super::{Controls, Outcome};
use crate::arena::{aim, within, Countdown, Entity, Vec2, CAT_SIZE, PLAY_TOP, WORLD_H, WORLD_W};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

const TIME_LIMIT: f32 = 10.0;
const SWAT_REACH: f32 = 4.0;
const WAKE_SLACK: f32 = 4.0;
const MOTE_SPREAD: f32 = 40.0;
const MOTE_MIN_SPEED: u32 = 60;
const MOTE_MAX_SPEED: u32 = 180;
const FIRST_INTERVAL_FLOOR: f32 = 0.4;
const INTERVAL_FLOOR: f32 = 0.25;
const CURSOR_SPEED: f32 = 420.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoteKind {
    Dust,
    Fly,
    Wind,
}

impl MoteKind {
    pub fn radius(self) -> f32 {
        match self {
            MoteKind::Dust | MoteKind::Fly => 10.0,
            MoteKind::Wind => 16.0,
        }
    }
}

/// Something drifting toward the sleeping cat. `pos` is the center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mote {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: MoteKind,
}

#[derive(Clone, Copy)]
enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Day five: the cat finally sleeps in the player's arms. Swat away anything
/// that drifts close enough to wake it.
pub struct Swat {
    pub cat: Entity,
    pub motes: Vec<Mote>,
    pub cursor: Vec2,
    pub cat_awake: bool,
    pub clock: Countdown,
    spawn_timer: f32,
    spawn_interval: f32,
}

impl Swat {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            cat: Entity::new(
                Vec2::new(WORLD_W / 2.0 - CAT_SIZE / 2.0, WORLD_H / 2.0 - CAT_SIZE / 2.0),
                CAT_SIZE,
                0.0,
            ),
            motes: Vec::new(),
            cursor: Vec2::new(WORLD_W / 2.0, PLAY_TOP),
            cat_awake: false,
            clock: Countdown::new(TIME_LIMIT),
            spawn_timer: 0.0,
            spawn_interval: spawn_interval(rng, FIRST_INTERVAL_FLOOR),
        }
    }

    pub fn step(&mut self, controls: &Controls, dt: f32, rng: &mut impl Rng) -> Outcome {
        self.clock.advance(dt);
        match controls.pointer {
            Some(p) => self.cursor = p,
            None => self.cursor += controls.heading().normalized() * (CURSOR_SPEED * dt),
        }
        self.cursor = Vec2::new(
            self.cursor.x.clamp(0.0, WORLD_W),
            self.cursor.y.clamp(0.0, WORLD_H),
        );

        self.spawn_timer += dt;
        if self.spawn_timer >= self.spawn_interval {
            self.spawn_timer = 0.0;
            self.spawn_interval = spawn_interval(rng, INTERVAL_FLOOR);
            self.spawn(rng);
        }
        for m in &mut self.motes {
            m.pos += m.vel * dt;
        }

        let cursor = self.cursor;
        self.motes
            .retain(|m| !within(m.pos, cursor, m.kind.radius() + SWAT_REACH));

        let center = self.cat.center();
        let woken = self.motes.iter().any(|m| {
            within(
                m.pos,
                center,
                m.kind.radius() + self.cat.size / 2.0 - WAKE_SLACK,
            )
        });
        if woken {
            self.cat_awake = true;
            return Outcome::Lost;
        }
        if self.clock.expired() {
            return Outcome::Won;
        }
        Outcome::Running
    }

    fn spawn(&mut self, rng: &mut impl Rng) {
        let side = [Side::Top, Side::Bottom, Side::Left, Side::Right]
            .choose(rng)
            .copied()
            .unwrap_or(Side::Top);
        let pos = match side {
            Side::Top => Vec2::new(rng.gen_range(20.0..=WORLD_W - 20.0).floor(), PLAY_TOP),
            Side::Bottom => Vec2::new(
                rng.gen_range(20.0..=WORLD_W - 20.0).floor(),
                WORLD_H - 20.0,
            ),
            Side::Left => Vec2::new(20.0, rng.gen_range(PLAY_TOP..=WORLD_H - 60.0).floor()),
            Side::Right => Vec2::new(
                WORLD_W - 20.0,
                rng.gen_range(PLAY_TOP..=WORLD_H - 60.0).floor(),
            ),
        };
        let kind = [MoteKind::Dust, MoteKind::Fly, MoteKind::Wind]
            .choose(rng)
            .copied()
            .unwrap_or(MoteKind::Dust);
        let speed = rng.gen_range(MOTE_MIN_SPEED..=MOTE_MAX_SPEED) as f32;
        let vel = aim(pos, self.cat.pos, MOTE_SPREAD, speed, rng);
        trace!(?kind, x = pos.x, y = pos.y, speed, "mote drifting in");
        self.motes.push(Mote { pos, vel, kind });
    }
}

fn spawn_interval(rng: &mut impl Rng, floor: f32) -> f32 {
    (rng.gen_range(1..=5) as f32 / 20.0).max(floor)
}
