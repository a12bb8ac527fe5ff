use std::io;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("{axis} must be odd (got {value})")]
    EvenDimension { axis: &'static str, value: usize },
    #[error("{axis} must be at least {min} (got {value})")]
    TooSmall {
        axis: &'static str,
        min: usize,
        value: usize,
    },
    #[error("start ({x}, {y}) is not an odd interior cell of a {cols}x{rows} grid")]
    MisalignedStart {
        x: usize,
        y: usize,
        cols: usize,
        rows: usize,
    },
    #[error("cell ({x}, {y}) out of range for a {cols}x{rows} grid")]
    OutOfRange {
        x: usize,
        y: usize,
        cols: usize,
        rows: usize,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown goal rule {0:?} (expected \"adjacent\" or \"exact\")")]
pub struct ParseGoalRuleError(pub String);

#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("maze setup failed: {0}")]
    Maze(#[from] MazeError),
    #[error("log file {path}: {source}")]
    Log { path: String, source: io::Error },
}
