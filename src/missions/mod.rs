//! The five day missions. Each one is stepped with a fixed `dt` and reports an
//! [`Outcome`]; none of them touch the terminal.

mod chase;
mod dodge;
mod labyrinth;
mod stealth;
mod swat;

pub use chase::Chase;
pub use dodge::{Dodge, Pellet};
pub use labyrinth::{GoalRule, Labyrinth};
pub use stealth::Stealth;
pub use swat::{Mote, MoteKind, Swat};

use crate::arena::{Countdown, Vec2};
use crate::error::MazeError;
use crate::story::Day;
use rand::Rng;
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Running,
    Won,
    Lost,
}

/// What the player is doing this tick: a heading on each axis in {-1, 0, 1},
/// plus a fresh pointer position when the mouse moved.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Controls {
    pub x: i8,
    pub y: i8,
    pub pointer: Option<Vec2>,
}

impl Controls {
    pub fn heading(&self) -> Vec2 {
        Vec2::new(f32::from(self.x), f32::from(self.y))
    }

    pub fn is_moving(&self) -> bool {
        self.x != 0 || self.y != 0
    }
}

pub enum Mission {
    Chase(Chase),
    Stealth(Stealth),
    Labyrinth(Labyrinth),
    Dodge(Dodge),
    Swat(Swat),
}

impl Mission {
    pub fn for_day(day: Day, goal_rule: GoalRule, rng: &mut impl Rng) -> Result<Self, MazeError> {
        info!(day = day.number(), "mission setup");
        Ok(match day {
            Day::One => Mission::Chase(Chase::new(rng)),
            Day::Two => Mission::Stealth(Stealth::new()),
            Day::Three => Mission::Labyrinth(Labyrinth::new(goal_rule, rng)?),
            Day::Four => Mission::Dodge(Dodge::new(rng)),
            Day::Five => Mission::Swat(Swat::new(rng)),
        })
    }

    pub fn step(&mut self, controls: &Controls, dt: f32, rng: &mut impl Rng) -> Outcome {
        match self {
            Mission::Chase(m) => m.step(controls, dt, rng),
            Mission::Stealth(m) => m.step(controls, dt, rng),
            Mission::Labyrinth(m) => m.step(controls, dt),
            Mission::Dodge(m) => m.step(controls, dt, rng),
            Mission::Swat(m) => m.step(controls, dt, rng),
        }
    }

    pub fn clock(&self) -> &Countdown {
        match self {
            Mission::Chase(m) => &m.clock,
            Mission::Stealth(m) => &m.clock,
            Mission::Labyrinth(m) => m.clock(),
            Mission::Dodge(m) => &m.clock,
            Mission::Swat(m) => &m.clock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn each_day_gets_its_own_game() {
        let mut rng = StdRng::seed_from_u64(2);
        let kinds: Vec<_> = Day::ALL
            .iter()
            .map(|day| Mission::for_day(*day, GoalRule::Adjacent, &mut rng).unwrap())
            .map(|m| match m {
                Mission::Chase(_) => 1,
                Mission::Stealth(_) => 2,
                Mission::Labyrinth(_) => 3,
                Mission::Dodge(_) => 4,
                Mission::Swat(_) => 5,
            })
            .collect();
        assert_eq!(kinds, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn time_limits_follow_the_day() {
        let mut rng = StdRng::seed_from_u64(2);
        let totals: Vec<f32> = Day::ALL
            .iter()
            .map(|day| {
                Mission::for_day(*day, GoalRule::Adjacent, &mut rng)
                    .unwrap()
                    .clock()
                    .total()
            })
            .collect();
        assert_eq!(totals, vec![20.0, 30.0, 30.0, 10.0, 10.0]);
    }
}
