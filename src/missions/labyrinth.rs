use super::{Controls, Outcome};
use crate::arena::{Countdown, WORLD_H, WORLD_W};
use crate::error::{MazeError, ParseGoalRuleError};
use crate::maze::{farthest_with_distance, Dir, Grid, Pos};
use rand::Rng;
use std::str::FromStr;
use tracing::debug;

const TIME_LIMIT: f32 = 30.0;
pub const TILE_PX: usize = 24;
const HUD_PX: usize = 120;
const MOVE_COOLDOWN: f32 = 0.08;
pub const START: Pos = Pos::new(1, 1);

/// When the player counts as having found the cat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GoalRule {
    /// Standing on the cat's cell or right next to it.
    #[default]
    Adjacent,
    Exact,
}

impl GoalRule {
    pub fn reached(self, player: Pos, goal: Pos) -> bool {
        match self {
            GoalRule::Adjacent => player.manhattan(goal) <= 1,
            GoalRule::Exact => player == goal,
        }
    }
}

impl FromStr for GoalRule {
    type Err = ParseGoalRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "adjacent" => Ok(GoalRule::Adjacent),
            "exact" => Ok(GoalRule::Exact),
            _ => Err(ParseGoalRuleError(s.to_string())),
        }
    }
}

/// Day three: the cat wandered off into a maze. It is waiting in the cell
/// farthest from the entrance.
pub struct Labyrinth {
    grid: Grid,
    goal: Pos,
    player: Pos,
    rule: GoalRule,
    clock: Countdown,
    cooldown: f32,
}

impl Labyrinth {
    pub fn new(rule: GoalRule, rng: &mut impl Rng) -> Result<Self, MazeError> {
        let cols = Grid::odd_dimension(WORLD_W as usize / TILE_PX);
        let rows = Grid::odd_dimension((WORLD_H as usize - HUD_PX) / TILE_PX);
        let grid = Grid::generate(cols, rows, START, rng)?;
        Ok(Self::with_grid(grid, rule))
    }

    /// Sets up the mission on an already carved maze.
    pub fn with_grid(grid: Grid, rule: GoalRule) -> Self {
        let (goal, distance) = farthest_with_distance(&grid, START);
        debug!(
            cols = grid.cols(),
            rows = grid.rows(),
            goal_x = goal.x,
            goal_y = goal.y,
            distance,
            "maze carved"
        );
        Self {
            grid,
            goal,
            player: START,
            rule,
            clock: Countdown::new(TIME_LIMIT),
            cooldown: 0.0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn goal(&self) -> Pos {
        self.goal
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn clock(&self) -> &Countdown {
        &self.clock
    }

    pub fn found_cat(&self) -> bool {
        self.rule.reached(self.player, self.goal)
    }

    pub fn step(&mut self, controls: &Controls, dt: f32) -> Outcome {
        self.clock.advance(dt);
        self.cooldown -= dt;

        if self.cooldown <= 0.0 {
            let horizontal = match controls.x {
                x if x < 0 => Some(Dir::Left),
                x if x > 0 => Some(Dir::Right),
                _ => None,
            };
            let vertical = match controls.y {
                y if y < 0 => Some(Dir::Up),
                y if y > 0 => Some(Dir::Down),
                _ => None,
            };
            let mut moved = false;
            for dir in [horizontal, vertical].into_iter().flatten() {
                moved |= self.try_move(dir);
            }
            if moved {
                self.cooldown = MOVE_COOLDOWN;
            }
        }

        if self.found_cat() {
            return Outcome::Won;
        }
        if self.clock.expired() {
            return Outcome::Lost;
        }
        Outcome::Running
    }

    fn try_move(&mut self, dir: Dir) -> bool {
        let Some(next) = self.grid.step(self.player, dir) else {
            return false;
        };
        match self.grid.is_passable(next.x, next.y) {
            Ok(true) => {
                self.player = next;
                true
            }
            _ => false,
        }
    }
}
