use super::{Controls, Outcome};
use crate::arena::{
    random_spot, Bounds, Countdown, Entity, Vec2, Wanderer, CAT_SIZE, PLAYER_SIZE, PLAYER_SPEED,
    WORLD_H, WORLD_W,
};
use rand::Rng;

const TIME_LIMIT: f32 = 20.0;
const CAT_SPEED: f32 = 280.0;

/// Day one: the cat bolts around the room and the player has to grab it.
pub struct Chase {
    pub player: Entity,
    pub cat: Wanderer,
    pub clock: Countdown,
    bounds: Bounds,
}

impl Chase {
    pub fn new(rng: &mut impl Rng) -> Self {
        let player = Entity::new(
            Vec2::new(WORLD_W / 2.0 - PLAYER_SIZE / 2.0, WORLD_H - PLAYER_SIZE - 40.0),
            PLAYER_SIZE,
            PLAYER_SPEED,
        );
        let spot = random_spot(rng, (40.0, WORLD_W - 40.0 - CAT_SIZE), (100.0, WORLD_H - 160.0));
        let cat = Wanderer::new(Entity::new(spot, CAT_SIZE, CAT_SPEED), rng);
        Self {
            player,
            cat,
            clock: Countdown::new(TIME_LIMIT),
            bounds: Bounds::play_area(PLAYER_SIZE),
        }
    }

    pub fn step(&mut self, controls: &Controls, dt: f32, rng: &mut impl Rng) -> Outcome {
        self.clock.advance(dt);
        self.player.advance(controls.heading(), dt);
        self.player.pos = self.bounds.clamp(self.player.pos);
        self.cat.step(dt, rng);

        if self.player.rect().intersects(&self.cat.body.rect()) {
            return Outcome::Won;
        }
        if self.clock.expired() {
            return Outcome::Lost;
        }
        Outcome::Running
    }
}
