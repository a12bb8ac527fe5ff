//! Perfect-maze generation and goal placement.
//!
//! Mazes live on an odd-by-odd grid: odd-odd cells are rooms, the cells between
//! them are walls that get knocked out while carving. The outer border is never
//! touched, so every maze is closed.

use crate::error::MazeError;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

const MIN_DIM: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Wall,
    Passage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: Pos) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// Search order used by the farthest-cell BFS. Ties between equally distant
    /// cells resolve to whichever this order discovers first.
    pub const SEARCH_ORDER: [Dir; 4] = [Dir::Right, Dir::Left, Dir::Down, Dir::Up];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<Tile>,
}

impl Grid {
    /// Forces a requested dimension odd by setting the low bit, so an even
    /// value grows by one.
    pub fn odd_dimension(n: usize) -> usize {
        n | 1
    }

    /// Carves a perfect maze with a randomized depth-first backtracker.
    ///
    /// `cols` and `rows` must be odd and at least 3; `start` must sit on an odd
    /// interior cell. Given the same seeded `rng`, the result is identical on
    /// every run.
    pub fn generate(
        cols: usize,
        rows: usize,
        start: Pos,
        rng: &mut impl Rng,
    ) -> Result<Self, MazeError> {
        check_dimension("cols", cols)?;
        check_dimension("rows", rows)?;
        if start.x % 2 == 0 || start.y % 2 == 0 || start.x >= cols - 1 || start.y >= rows - 1 {
            return Err(MazeError::MisalignedStart {
                x: start.x,
                y: start.y,
                cols,
                rows,
            });
        }

        let mut grid = Self {
            cols,
            rows,
            cells: vec![Tile::Wall; cols * rows],
        };
        grid.set(start, Tile::Passage);
        let mut stack = vec![start];

        while let Some(&current) = stack.last() {
            let neighbors = grid.uncarved_neighbors(current);
            if let Some(&next) = neighbors.choose(rng) {
                let between = Pos::new((current.x + next.x) / 2, (current.y + next.y) / 2);
                grid.set(between, Tile::Passage);
                grid.set(next, Tile::Passage);
                stack.push(next);
            } else {
                stack.pop();
            }
        }

        Ok(grid)
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Row-major tiles, indexed by `y * cols + x`.
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    pub fn get(&self, pos: Pos) -> Result<Tile, MazeError> {
        self.index(pos)
            .map(|idx| self.cells[idx])
            .ok_or(MazeError::OutOfRange {
                x: pos.x,
                y: pos.y,
                cols: self.cols,
                rows: self.rows,
            })
    }

    pub fn is_passable(&self, x: usize, y: usize) -> Result<bool, MazeError> {
        Ok(self.get(Pos::new(x, y))? == Tile::Passage)
    }

    pub fn passage_count(&self) -> usize {
        self.cells.iter().filter(|t| **t == Tile::Passage).count()
    }

    /// The cell one step from `pos` in `dir`, if it stays on the grid.
    pub fn step(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        let (dx, dy) = dir.delta();
        let x = pos.x.checked_add_signed(dx)?;
        let y = pos.y.checked_add_signed(dy)?;
        if x < self.cols && y < self.rows {
            Some(Pos::new(x, y))
        } else {
            None
        }
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        if pos.x < self.cols && pos.y < self.rows {
            Some(pos.y * self.cols + pos.x)
        } else {
            None
        }
    }

    fn tile(&self, pos: Pos) -> Tile {
        self.index(pos).map_or(Tile::Wall, |idx| self.cells[idx])
    }

    fn set(&mut self, pos: Pos, tile: Tile) {
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = tile;
        }
    }

    fn uncarved_neighbors(&self, pos: Pos) -> Vec<Pos> {
        let mut out = Vec::with_capacity(4);
        for dir in Dir::SEARCH_ORDER {
            let (dx, dy) = dir.delta();
            let (Some(nx), Some(ny)) = (
                pos.x.checked_add_signed(dx * 2),
                pos.y.checked_add_signed(dy * 2),
            ) else {
                continue;
            };
            if nx == 0 || ny == 0 || nx >= self.cols - 1 || ny >= self.rows - 1 {
                continue;
            }
            let next = Pos::new(nx, ny);
            if self.tile(next) == Tile::Wall {
                out.push(next);
            }
        }
        out
    }
}

#[cfg(test)]
impl Grid {
    /// Builds a grid from rows of `#` (wall) and `.` (passage).
    fn from_rows(rows: &[&str]) -> Self {
        let cells: Vec<Tile> = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|c| if c == '#' { Tile::Wall } else { Tile::Passage })
            .collect();
        Self {
            cols: rows.first().map_or(0, |r| r.len()),
            rows: rows.len(),
            cells,
        }
    }
}

fn check_dimension(axis: &'static str, value: usize) -> Result<(), MazeError> {
    if value < MIN_DIM {
        return Err(MazeError::TooSmall {
            axis,
            min: MIN_DIM,
            value,
        });
    }
    if value % 2 == 0 {
        return Err(MazeError::EvenDimension { axis, value });
    }
    Ok(())
}

/// Breadth-first walk over passages from `start`, calling `visit` with each
/// reached cell and its distance in dequeue order. Neighbors are tried in
/// `order`. An off-grid `start` visits nothing.
fn search(grid: &Grid, start: Pos, order: [Dir; 4], mut visit: impl FnMut(Pos, usize)) {
    let Some(start_idx) = grid.index(start) else {
        return;
    };
    let mut seen = vec![false; grid.cols * grid.rows];
    seen[start_idx] = true;
    let mut q = VecDeque::new();
    q.push_back((start, 0));

    while let Some((pos, d)) = q.pop_front() {
        visit(pos, d);
        for dir in order {
            let Some(next) = grid.step(pos, dir) else {
                continue;
            };
            let idx = next.y * grid.cols + next.x;
            if seen[idx] || grid.tile(next) != Tile::Passage {
                continue;
            }
            seen[idx] = true;
            q.push_back((next, d + 1));
        }
    }
}

/// BFS distance (in steps) from `start` to every cell; `None` where unreachable.
/// An off-grid `start` reaches nothing.
pub fn distances(grid: &Grid, start: Pos) -> Vec<Option<usize>> {
    let mut dist = vec![None; grid.cols * grid.rows];
    search(grid, start, Dir::SEARCH_ORDER, |pos, d| {
        dist[pos.y * grid.cols + pos.x] = Some(d);
    });
    dist
}

pub fn farthest(grid: &Grid, start: Pos) -> Pos {
    farthest_with_distance(grid, start).0
}

/// The reachable passage cell farthest from `start`, with its distance. Only a
/// strictly greater distance replaces the current best, so ties keep the cell
/// the search reached first.
pub fn farthest_with_distance(grid: &Grid, start: Pos) -> (Pos, usize) {
    farthest_in_order(grid, start, Dir::SEARCH_ORDER)
}

fn farthest_in_order(grid: &Grid, start: Pos, order: [Dir; 4]) -> (Pos, usize) {
    let mut best = (start, 0);
    search(grid, start, order, |pos, d| {
        if d > best.1 {
            best = (pos, d);
        }
    });
    best
}
