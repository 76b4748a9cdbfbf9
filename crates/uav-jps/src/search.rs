//! The A* query over a preprocessed [`JpsGrid`].
//!
//! Node bookkeeping lives in a dense, reusable scratch vector keyed by
//! `y*width+x` and invalidated with a generation counter rather than
//! reallocated or zeroed on every call — finders are immutable and shared,
//! so any number of [`Searcher`]s (e.g. one per worker thread) can query the
//! same grid concurrently.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::direction::{Direction, ALL_DIRECTIONS};
use crate::grid::JpsGrid;
use crate::path::PathMode;
use crate::point::GridPoint;

#[derive(Debug, Clone, Copy)]
struct ScratchNode {
    generation: u32,
    parent: Option<usize>,
    given_cost: u32,
    final_cost: u32,
    direction_from_parent: Option<Direction>,
    on_open: bool,
}

impl ScratchNode {
    const EMPTY: ScratchNode = ScratchNode {
        generation: 0,
        parent: None,
        given_cost: 0,
        final_cost: 0,
        direction_from_parent: None,
        on_open: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeapEntry {
    final_cost: u32,
    idx: usize,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the smallest final_cost.
        other.final_cost.cmp(&self.final_cost).then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reusable per-query scratch space for [`JpsGrid::get_path`]-style queries.
/// Cheap to construct; expensive to reallocate per call, hence the reuse.
pub struct Searcher {
    generation: u32,
    nodes: Vec<ScratchNode>,
    width: u32,
    height: u32,
}

impl Searcher {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            generation: 0,
            nodes: vec![ScratchNode::EMPTY; (width * height) as usize],
            width,
            height,
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    fn get(&mut self, idx: usize) -> ScratchNode {
        let n = self.nodes[idx];
        if n.generation == self.generation {
            n
        } else {
            ScratchNode::EMPTY
        }
    }

    fn set(&mut self, idx: usize, node: ScratchNode) {
        let mut node = node;
        node.generation = self.generation;
        self.nodes[idx] = node;
    }

    /// A* over jump points from `start` to `goal`. Returns an empty vector if
    /// no path exists. `grid` must have been preprocessed already and must
    /// match this searcher's dimensions.
    pub fn get_path(&mut self, grid: &JpsGrid, start: GridPoint, goal: GridPoint, mode: PathMode) -> Vec<GridPoint> {
        assert_eq!(grid.width(), self.width);
        assert_eq!(grid.height(), self.height);
        self.generation = self.generation.wrapping_add(1);

        let start_idx = self.index(start.x, start.y);
        self.set(
            start_idx,
            ScratchNode {
                generation: self.generation,
                parent: None,
                given_cost: 0,
                final_cost: 0,
                direction_from_parent: None,
                on_open: true,
            },
        );

        let mut open = BinaryHeap::new();
        open.push(HeapEntry { final_cost: 0, idx: start_idx });

        while let Some(HeapEntry { idx: cur_idx, .. }) = open.pop() {
            let cur = self.get(cur_idx);
            let cur_pos = GridPoint::new((cur_idx as u32) % self.width, (cur_idx as u32) / self.width);

            if cur_pos == goal {
                return match mode {
                    PathMode::Skeleton => self.reconstruct_skeleton(cur_idx, start),
                    PathMode::Full => self.reconstruct_full(cur_idx, start),
                };
            }

            let directions: &[Direction] = match cur.direction_from_parent {
                Some(d) => d.valid_successors(),
                None => &ALL_DIRECTIONS,
            };

            for &dir in directions {
                let jp_dist = grid.jp_distance(cur_pos.x, cur_pos.y, dir);
                let mut successor: Option<(GridPoint, u32)> = None;

                // Three successor rules, tried in order — each is a single
                // all-or-nothing condition, not a nested fallback: a
                // direction that qualifies for rule 1 or 2 but fails that
                // rule's distance check still falls through to rule 3,
                // exactly as the three-way elif chain this is ported from.
                let rule1 = dir.is_cardinal()
                    && goal_is_in_exact_direction(cur_pos, dir, goal)
                    && cur_pos.chebyshev(goal) <= jp_dist.unsigned_abs();
                let rule2 = dir.is_diagonal()
                    && goal_is_in_general_direction(cur_pos, dir, goal)
                    && {
                        let dx = (goal.x as i64 - cur_pos.x as i64).unsigned_abs() as u32;
                        let dy = (goal.y as i64 - cur_pos.y as i64).unsigned_abs() as u32;
                        dx <= jp_dist.unsigned_abs() || dy <= jp_dist.unsigned_abs()
                    };

                if rule1 {
                    let dist = cur_pos.chebyshev(goal);
                    successor = Some((goal, cur.given_cost + dist));
                } else if rule2 {
                    let dx = (goal.x as i64 - cur_pos.x as i64).unsigned_abs() as u32;
                    let dy = (goal.y as i64 - cur_pos.y as i64).unsigned_abs() as u32;
                    let step = dx.min(dy);
                    if let Some(next) = step_toward(cur_pos, dir, step, self.width, self.height) {
                        let cost = cur_pos.chebyshev(next);
                        successor = Some((next, cur.given_cost + cost));
                    }
                } else if jp_dist > 0 {
                    if let Some(next) = step_toward(cur_pos, dir, jp_dist as u32, self.width, self.height) {
                        let cost = cur_pos.chebyshev(next);
                        successor = Some((next, cur.given_cost + cost));
                    }
                }

                if let Some((next_pos, given_cost)) = successor {
                    let next_idx = self.index(next_pos.x, next_pos.y);
                    let existing = self.get(next_idx);
                    if !existing.on_open || given_cost < existing.given_cost {
                        let final_cost = given_cost + next_pos.chebyshev(goal);
                        self.set(
                            next_idx,
                            ScratchNode {
                                generation: self.generation,
                                parent: Some(cur_idx),
                                given_cost,
                                final_cost,
                                direction_from_parent: Some(dir),
                                on_open: true,
                            },
                        );
                        open.push(HeapEntry { final_cost, idx: next_idx });
                    }
                }
            }
        }

        Vec::new()
    }

    fn reconstruct_skeleton(&mut self, goal_idx: usize, start: GridPoint) -> Vec<GridPoint> {
        let mut path = Vec::new();
        let mut cur_idx = goal_idx;
        loop {
            let cur = self.get(cur_idx);
            let pos = GridPoint::new((cur_idx as u32) % self.width, (cur_idx as u32) / self.width);
            path.push(pos);
            match cur.parent {
                Some(p) => cur_idx = p,
                None => break,
            }
        }
        path.push(start);
        path.reverse();
        path.dedup();
        path
    }

    fn reconstruct_full(&mut self, goal_idx: usize, start: GridPoint) -> Vec<GridPoint> {
        let mut final_path = Vec::new();
        let mut cur_idx = goal_idx;

        loop {
            let cur = self.get(cur_idx);
            let cur_pos = GridPoint::new((cur_idx as u32) % self.width, (cur_idx as u32) / self.width);
            final_path.push(cur_pos);

            let Some(parent_idx) = cur.parent else { break };
            let parent_pos = GridPoint::new((parent_idx as u32) % self.width, (parent_idx as u32) / self.width);

            let mut x_diff = parent_pos.x as i64 - cur_pos.x as i64;
            let mut y_diff = parent_pos.y as i64 - cur_pos.y as i64;
            let x_inc = x_diff.signum();
            let y_inc = y_diff.signum();
            x_diff = x_diff.abs();
            y_diff = y_diff.abs();

            let steps = x_diff.max(y_diff) - 1;
            let mut x = cur_pos.x as i64;
            let mut y = cur_pos.y as i64;
            for _ in 0..steps {
                x += x_inc;
                y += y_inc;
                final_path.push(GridPoint::new(x as u32, y as u32));
            }

            cur_idx = parent_idx;
        }

        final_path.push(start);
        final_path.reverse();
        final_path.dedup();
        final_path
    }
}

fn goal_is_in_exact_direction(cur: GridPoint, dir: Direction, goal: GridPoint) -> bool {
    let dx = goal.x as i64 - cur.x as i64;
    let dy = goal.y as i64 - cur.y as i64;
    match dir {
        Direction::North => dy < 0 && dx == 0,
        Direction::East => dy == 0 && dx > 0,
        Direction::South => dy > 0 && dx == 0,
        Direction::West => dx < 0 && dy == 0,
        _ => false,
    }
}

fn goal_is_in_general_direction(cur: GridPoint, dir: Direction, goal: GridPoint) -> bool {
    let dx = goal.x as i64 - cur.x as i64;
    let dy = goal.y as i64 - cur.y as i64;
    match dir {
        Direction::NorthEast => dy < 0 && dx > 0,
        Direction::SouthEast => dy > 0 && dx > 0,
        Direction::SouthWest => dy > 0 && dx < 0,
        Direction::NorthWest => dy < 0 && dx < 0,
        _ => false,
    }
}

fn step_toward(from: GridPoint, dir: Direction, dist: u32, width: u32, height: u32) -> Option<GridPoint> {
    let (dx, dy) = dir.delta();
    let nx = from.x as i64 + dx * dist as i64;
    let ny = from.y as i64 + dy * dist as i64;
    if nx < 0 || ny < 0 || nx as u32 >= width || ny as u32 >= height {
        None
    } else {
        Some(GridPoint::new(nx as u32, ny as u32))
    }
}
