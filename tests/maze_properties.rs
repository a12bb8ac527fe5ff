use catdays::maze::{distances, farthest, farthest_with_distance, Grid, Pos, Tile};
use rand::rngs::StdRng;
use rand::SeedableRng;

const SIZES: [(usize, usize); 5] = [(3, 3), (5, 7), (11, 11), (21, 9), (41, 17)];

fn carve(cols: usize, rows: usize, seed: u64) -> Grid {
    let mut rng = StdRng::seed_from_u64(seed);
    Grid::generate(cols, rows, Pos::new(1, 1), &mut rng).unwrap()
}

fn passable(grid: &Grid, x: usize, y: usize) -> bool {
    grid.is_passable(x, y).unwrap()
}

#[test]
fn carved_passages_form_a_tree() {
    for (cols, rows) in SIZES {
        for seed in 0..16 {
            let grid = carve(cols, rows, seed);
            let mut edges = 0;
            for y in 0..rows {
                for x in 0..cols {
                    if !passable(&grid, x, y) {
                        continue;
                    }
                    if x + 1 < cols && passable(&grid, x + 1, y) {
                        edges += 1;
                    }
                    if y + 1 < rows && passable(&grid, x, y + 1) {
                        edges += 1;
                    }
                }
            }
            assert_eq!(grid.passage_count(), edges + 1, "{cols}x{rows} seed {seed}");
        }
    }
}

#[test]
fn every_room_is_carved_and_reachable() {
    for (cols, rows) in SIZES {
        let grid = carve(cols, rows, 7);
        let dist = distances(&grid, Pos::new(1, 1));
        for y in (1..rows - 1).step_by(2) {
            for x in (1..cols - 1).step_by(2) {
                assert!(passable(&grid, x, y));
                assert!(dist[y * cols + x].is_some(), "({x}, {y}) unreachable");
            }
        }
        for (idx, tile) in grid.cells().iter().enumerate() {
            assert_eq!(*tile == Tile::Passage, dist[idx].is_some());
        }
    }
}

#[test]
fn border_stays_solid() {
    for (cols, rows) in SIZES {
        let grid = carve(cols, rows, 3);
        for x in 0..cols {
            assert!(!passable(&grid, x, 0));
            assert!(!passable(&grid, x, rows - 1));
        }
        for y in 0..rows {
            assert!(!passable(&grid, 0, y));
            assert!(!passable(&grid, cols - 1, y));
        }
    }
}

#[test]
fn farthest_cell_has_the_largest_distance() {
    for (cols, rows) in SIZES {
        for seed in 0..8 {
            let grid = carve(cols, rows, seed);
            let start = Pos::new(1, 1);
            let (goal, d) = farthest_with_distance(&grid, start);
            let dist = distances(&grid, start);
            let max = dist.iter().flatten().copied().max().unwrap_or(0);
            assert_eq!(d, max);
            assert_eq!(dist[goal.y * cols + goal.x], Some(d));
            assert!(passable(&grid, goal.x, goal.y));
            assert_eq!(farthest(&grid, start), goal);
            assert_eq!(farthest(&grid, start), farthest(&grid, start));
        }
    }
}

#[test]
fn same_seed_same_maze() {
    assert_eq!(carve(41, 17, 99), carve(41, 17, 99));
    let distinct = (0..8).filter(|s| carve(41, 17, *s) != carve(41, 17, 99)).count();
    assert!(distinct > 0);
}
