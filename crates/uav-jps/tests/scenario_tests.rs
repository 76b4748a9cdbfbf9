//! Boundary scenarios for the JPS+ planner, plus the soundness/completeness
//! algorithmic properties.

use pretty_assertions::assert_eq;
use uav_jps::{GridPoint, JpsGrid, PathMode, Searcher};

fn build(width: u32, height: u32, obstacle: impl Fn(u32, u32) -> bool) -> (JpsGrid, Searcher) {
    let mut grid = JpsGrid::new(width, height, obstacle);
    grid.preprocess();
    let searcher = Searcher::new(width, height);
    (grid, searcher)
}

fn is_8_adjacent(a: GridPoint, b: GridPoint) -> bool {
    let dx = a.x.abs_diff(b.x);
    let dy = a.y.abs_diff(b.y);
    dx <= 1 && dy <= 1 && (dx, dy) != (0, 0)
}

// ───────────────────────────────────────────────────────────────────────
// Boundary scenarios
// ───────────────────────────────────────────────────────────────────────

#[test]
fn straight_corridor_on_open_grid() {
    let (grid, mut searcher) = build(10, 10, |_, _| false);
    let start = GridPoint::new(0, 0);
    let goal = GridPoint::new(9, 9);

    let full = searcher.get_path(&grid, start, goal, PathMode::Full);
    assert_eq!(full.len(), 10);
    assert_eq!(full[0], start);
    assert_eq!(*full.last().unwrap(), goal);

    let skeleton = searcher.get_path(&grid, start, goal, PathMode::Skeleton);
    assert_eq!(skeleton.len(), 2);
    assert_eq!(skeleton, vec![start, goal]);
}

#[test]
fn single_wall_detour() {
    // Wall at x=5 spanning y in [0,8], leaving a gap at y=9.
    let (grid, mut searcher) = build(10, 10, |x, y| x == 5 && y <= 8);
    let start = GridPoint::new(0, 4);
    let goal = GridPoint::new(9, 4);

    let full = searcher.get_path(&grid, start, goal, PathMode::Full);
    assert_eq!(full.len(), 11);

    let skeleton = searcher.get_path(&grid, start, goal, PathMode::Skeleton);
    assert_eq!(skeleton.len(), 3);
    assert_eq!(skeleton[0], start);
    assert_eq!(*skeleton.last().unwrap(), goal);
}

#[test]
fn unreachable_pair_returns_empty() {
    // Column x=2 sealed for every row on a 5x5 grid.
    let (grid, mut searcher) = build(5, 5, |x, _y| x == 2);
    let start = GridPoint::new(0, 0);
    let goal = GridPoint::new(4, 0);

    let path = searcher.get_path(&grid, start, goal, PathMode::Full);
    assert!(path.is_empty());
}

// ───────────────────────────────────────────────────────────────────────
// Algorithmic properties
// ───────────────────────────────────────────────────────────────────────

#[test]
fn soundness_every_step_is_adjacent_and_free() {
    let (grid, mut searcher) = build(12, 12, |x, y| (3..6).contains(&x) && (2..10).contains(&y));
    let start = GridPoint::new(0, 0);
    let goal = GridPoint::new(11, 11);

    let path = searcher.get_path(&grid, start, goal, PathMode::Full);
    assert!(!path.is_empty());
    for w in path.windows(2) {
        assert!(is_8_adjacent(w[0], w[1]), "{:?} -> {:?} not adjacent", w[0], w[1]);
    }
    for p in &path {
        assert!(!grid.is_obstacle(p.x, p.y));
    }
}

#[test]
fn completeness_finds_path_when_one_exists() {
    // A maze with a single open seam through the middle.
    let (grid, mut searcher) = build(9, 9, |x, y| y == 4 && x != 4);
    let start = GridPoint::new(0, 0);
    let goal = GridPoint::new(8, 8);
    let path = searcher.get_path(&grid, start, goal, PathMode::Full);
    assert!(!path.is_empty());
}

#[test]
fn round_trip_cost_is_symmetric() {
    let (grid, mut searcher) = build(10, 10, |x, y| x == 5 && y <= 8);
    let a = GridPoint::new(0, 4);
    let b = GridPoint::new(9, 4);

    let forward = searcher.get_path(&grid, a, b, PathMode::Full);
    let backward = searcher.get_path(&grid, b, a, PathMode::Full);
    assert_eq!(forward.len(), backward.len());
}

#[test]
fn preprocessing_is_idempotent_end_to_end() {
    let mut grid = JpsGrid::new(10, 10, |x, y| x == 5 && y <= 8);
    grid.preprocess();
    let mut searcher = Searcher::new(10, 10);
    let first = searcher.get_path(&grid, GridPoint::new(0, 4), GridPoint::new(9, 4), PathMode::Full);

    grid.preprocess();
    let second = searcher.get_path(&grid, GridPoint::new(0, 4), GridPoint::new(9, 4), PathMode::Full);
    assert_eq!(first.len(), second.len());
}
