//! Terminals report key presses and repeats but rarely releases, so a key
//! counts as held for a short window after its last event.

use crate::arena::Vec2;
use crate::maze::Dir;
use crate::missions::Controls;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use std::time::{Duration, Instant};

const INPUT_HOLD_MS: u64 = 160;

#[derive(Debug, Default)]
pub struct Input {
    last_seen: [Option<Instant>; 4],
    pointer: Option<Vec2>,
    confirm: bool,
    quit: bool,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(&mut self, key: KeyEvent, now: Instant) {
        if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            return;
        }
        let dir = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.quit = true;
                return;
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.confirm = true;
                return;
            }
            KeyCode::Up | KeyCode::Char('w') => Dir::Up,
            KeyCode::Down | KeyCode::Char('s') => Dir::Down,
            KeyCode::Left | KeyCode::Char('a') => Dir::Left,
            KeyCode::Right | KeyCode::Char('d') => Dir::Right,
            _ => return,
        };
        self.last_seen[idx_for_dir(dir)] = Some(now);
    }

    /// Mouse moved to `pos` (world coordinates).
    pub fn point(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
    }

    pub fn click(&mut self) {
        self.confirm = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn take_confirm(&mut self) -> bool {
        std::mem::take(&mut self.confirm)
    }

    /// Held directions and any fresh pointer position, consumed for this tick.
    pub fn controls(&mut self, now: Instant) -> Controls {
        let x = axis(&self.last_seen, Dir::Left, Dir::Right, now);
        let y = axis(&self.last_seen, Dir::Up, Dir::Down, now);
        Controls {
            x,
            y,
            pointer: self.pointer.take(),
        }
    }
}

/// -1, 0 or 1 along one axis. When both keys are live the newer one wins.
fn axis(last_seen: &[Option<Instant>; 4], neg: Dir, pos: Dir, now: Instant) -> i8 {
    let live = |dir: Dir| {
        last_seen[idx_for_dir(dir)]
            .filter(|t| now.saturating_duration_since(*t) <= Duration::from_millis(INPUT_HOLD_MS))
    };
    match (live(neg), live(pos)) {
        (Some(a), Some(b)) if a > b => -1,
        (Some(_), Some(_)) => 1,
        (Some(_), None) => -1,
        (None, Some(_)) => 1,
        (None, None) => 0,
    }
}

fn idx_for_dir(dir: Dir) -> usize {
    match dir {
        Dir::Up => 0,
        Dir::Down => 1,
        Dir::Left => 2,
        Dir::Right => 3,
    }
}
