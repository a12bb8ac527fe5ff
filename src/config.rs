use crate::missions::GoalRule;
use std::path::PathBuf;

pub const DEFAULT_TICK_MS: u64 = 16;
pub const DEFAULT_RENDER_FPS: u64 = 60;

/// Runtime knobs read from `CATDAYS_*` environment variables. Anything
/// missing or unparsable falls back to its default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub tick_ms: u64,
    pub render_fps: u64,
    pub seed: Option<u64>,
    pub goal_rule: GoalRule,
    pub log_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            render_fps: DEFAULT_RENDER_FPS,
            seed: None,
            goal_rule: GoalRule::default(),
            log_path: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let positive = |key: &str, default: u64| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(default)
        };
        Self {
            tick_ms: positive("CATDAYS_TICK_MS", DEFAULT_TICK_MS),
            render_fps: positive("CATDAYS_FPS", DEFAULT_RENDER_FPS),
            seed: lookup("CATDAYS_SEED").and_then(|v| v.trim().parse::<u64>().ok()),
            goal_rule: lookup("CATDAYS_GOAL")
                .and_then(|v| v.parse::<GoalRule>().ok())
                .unwrap_or_default(),
            log_path: lookup("CATDAYS_LOG")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Simulation step in seconds.
    pub fn dt(&self) -> f32 {
        self.tick_ms as f32 / 1000.0
    }
}
