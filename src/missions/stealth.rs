use super::{Controls, Outcome};
use crate::arena::{
    Bounds, Countdown, Entity, Rect, Vec2, CAT_SIZE, PLAYER_SIZE, PLAYER_SPEED, WORLD_H, WORLD_W,
};
use rand::Rng;

const TIME_LIMIT: f32 = 30.0;
pub const NOISE_LIMIT: u32 = 100;
const NOISE_STEP: f32 = 1.0 / 60.0;
const NOISE_MIN: u32 = 1;
const NOISE_MAX: u32 = 5;

/// Day two: tiptoe past the sleeping cat to the door. Moving makes noise,
/// standing still lets it die down.
pub struct Stealth {
    pub player: Entity,
    pub cat: Entity,
    pub door: Rect,
    pub noise: u32,
    pub cat_awake: bool,
    pub clock: Countdown,
    noise_clock: f32,
    bounds: Bounds,
}

impl Stealth {
    pub fn new() -> Self {
        Self {
            player: Entity::new(
                Vec2::new(40.0, WORLD_H - PLAYER_SIZE - 40.0),
                PLAYER_SIZE,
                PLAYER_SPEED,
            ),
            cat: Entity::new(
                Vec2::new(WORLD_W / 2.0 - CAT_SIZE / 2.0, WORLD_H / 2.0 - CAT_SIZE / 2.0),
                CAT_SIZE,
                0.0,
            ),
            door: Rect::new(WORLD_W - 80.0, 80.0, 60.0, 80.0),
            noise: 0,
            cat_awake: false,
            clock: Countdown::new(TIME_LIMIT),
            noise_clock: 0.0,
            bounds: Bounds::play_area(PLAYER_SIZE),
        }
    }

    pub fn step(&mut self, controls: &Controls, dt: f32, rng: &mut impl Rng) -> Outcome {
        self.clock.advance(dt);
        self.player.advance(controls.heading(), dt);
        self.player.pos = self.bounds.clamp(self.player.pos);

        self.noise_clock += dt;
        while self.noise_clock >= NOISE_STEP {
            self.noise_clock -= NOISE_STEP;
            if controls.is_moving() {
                self.noise += rng.gen_range(NOISE_MIN..=NOISE_MAX);
            } else {
                self.noise = self.noise.saturating_sub(1);
            }
        }

        if self.noise >= NOISE_LIMIT || self.player.rect().intersects(&self.cat.rect()) {
            self.cat_awake = true;
            return Outcome::Lost;
        }
        if self.player.rect().intersects(&self.door) {
            return Outcome::Won;
        }
        if self.clock.expired() {
            return Outcome::Lost;
        }
        Outcome::Running
    }
}

impl Default for Stealth {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const STILL: Controls = Controls {
        x: 0,
        y: 0,
        pointer: None,
    };
    const RIGHT: Controls = Controls {
        x: 1,
        y: 0,
        pointer: None,
    };

    #[test]
    fn noise_builds_while_moving_and_fades_when_still() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut m = Stealth::new();
        for _ in 0..10 {
            m.step(&RIGHT, NOISE_STEP, &mut rng);
        }
        let loud = m.noise;
        assert!((10..=50).contains(&loud));
        for _ in 0..5 {
            m.step(&STILL, NOISE_STEP, &mut rng);
        }
        assert!(m.noise < loud);
        for _ in 0..100 {
            m.step(&STILL, NOISE_STEP, &mut rng);
        }
        assert_eq!(m.noise, 0);
    }

    #[test]
    fn too_much_noise_wakes_the_cat() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut m = Stealth::new();
        let mut outcome = Outcome::Running;
        let mut ticks = 0;
        while outcome == Outcome::Running && ticks < 200 {
            outcome = m.step(&RIGHT, NOISE_STEP, &mut rng);
            ticks += 1;
        }
        assert_eq!(outcome, Outcome::Lost);
        assert!(m.cat_awake);
        assert!(m.noise >= NOISE_LIMIT);
    }

    #[test]
    fn quiet_arrival_at_the_door_wins() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut m = Stealth::new();
        m.player.pos = Vec2::new(m.door.x - PLAYER_SIZE - 1.0, m.door.y + 10.0);
        assert_eq!(m.step(&RIGHT, 0.05, &mut rng), Outcome::Won);
    }

    #[test]
    fn bumping_the_cat_loses() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut m = Stealth::new();
        m.player.pos = m.cat.pos;
        assert_eq!(m.step(&STILL, 0.01, &mut rng), Outcome::Lost);
        assert!(m.cat_awake);
    }
}
