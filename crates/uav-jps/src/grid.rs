//! Preprocessed jump-point grid: obstacle mask, jump-point flags, and the
//! signed jump distances used by the A* query in [`crate::search`].

use crate::direction::Direction;

#[derive(Debug, Clone)]
pub(crate) struct GridNode {
    pub is_obstacle: bool,
    pub jp_distances: [i32; 8],
    pub is_jump_point: bool,
    pub jump_point_direction: [bool; 8],
}

impl GridNode {
    fn new() -> Self {
        Self {
            is_obstacle: false,
            jp_distances: [0; 8],
            is_jump_point: false,
            jump_point_direction: [false; 8],
        }
    }

    pub fn is_jump_point_from(&self, dir: Direction) -> bool {
        self.is_jump_point && self.jump_point_direction[dir.index()]
    }
}

/// A preprocessed 2D obstacle grid at a single altitude. Immutable after
/// [`JpsGrid::preprocess`] runs; queries (see [`crate::search`]) never
/// mutate it.
#[derive(Debug, Clone)]
pub struct JpsGrid {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) nodes: Vec<GridNode>,
}

impl JpsGrid {
    /// Builds the raw obstacle grid from a predicate over `(x, y)`. Call
    /// [`preprocess`](Self::preprocess) before querying.
    pub fn new(width: u32, height: u32, is_obstacle: impl Fn(u32, u32) -> bool) -> Self {
        let mut nodes = vec![GridNode::new(); (width * height) as usize];
        for y in 0..height {
            for x in 0..width {
                nodes[(y * width + x) as usize].is_obstacle = is_obstacle(x, y);
            }
        }
        Self { width, height, nodes }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_obstacle(&self, x: u32, y: u32) -> bool {
        self.in_bounds(x as i64, y as i64) && self.nodes[self.index(x, y)].is_obstacle
    }

    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    pub(crate) fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    fn is_obstacle_or_wall(&self, x: i64, y: i64) -> bool {
        !self.in_bounds(x, y) || self.nodes[self.index(x as u32, y as u32)].is_obstacle
    }

    fn is_empty(&self, x: i64, y: i64) -> bool {
        self.in_bounds(x, y) && !self.is_obstacle_or_wall(x, y)
    }

    /// Run the full preprocessing pipeline: primary jump points, then the
    /// four straight-line passes, then the four diagonal passes. Idempotent.
    pub fn preprocess(&mut self) {
        self.build_primary_points();
        self.build_straight_jump_points();
        self.build_diagonal_jump_points();
    }

    /// Mark cells cardinally adjacent to an obstacle as primary jump points,
    /// recording which direction of entry forces the turn around the corner.
    /// Ported directly from the four obstacle-relative cases (obstacle's
    /// north/east/south/west neighbor) of the canonical JPS+ preprocessor —
    /// each case is a distinct, not-quite-symmetric set of forced-neighbor
    /// checks, so it's spelled out rather than generalized.
    fn build_primary_points(&mut self) {
        for y in 0..self.height as i64 {
            for x in 0..self.width as i64 {
                if !self.nodes[self.index(x as u32, y as u32)].is_obstacle {
                    continue;
                }

                // Obstacle's NORTH neighbor
                if self.in_bounds(x, y - 1) && !self.is_obstacle_or_wall(x, y - 1) {
                    let idx = self.index(x as u32, (y - 1) as u32);
                    let sw = self.is_empty(x - 1, y);
                    let se = self.is_empty(x + 1, y);
                    let w = self.is_empty(x - 1, y - 1);
                    let e = self.is_empty(x + 1, y - 1);
                    if w && se {
                        self.nodes[idx].is_jump_point = true;
                        self.nodes[idx].jump_point_direction[Direction::West.index()] = true;
                    }
                    if e && sw {
                        self.nodes[idx].is_jump_point = true;
                        self.nodes[idx].jump_point_direction[Direction::East.index()] = true;
                    }
                    if sw && se {
                        self.nodes[idx].is_jump_point = true;
                    }
                }

                // Obstacle's EAST neighbor
                if self.in_bounds(x + 1, y) && !self.is_obstacle_or_wall(x + 1, y) {
                    let idx = self.index((x + 1) as u32, y as u32);
                    let nw = self.is_empty(x, y - 1);
                    let sw = self.is_empty(x, y + 1);
                    let n = self.is_empty(x + 1, y - 1);
                    let s = self.is_empty(x + 1, y + 1);
                    if nw && s {
                        self.nodes[idx].is_jump_point = true;
                        self.nodes[idx].jump_point_direction[Direction::South.index()] = true;
                    }
                    if sw && n {
                        self.nodes[idx].is_jump_point = true;
                        self.nodes[idx].jump_point_direction[Direction::North.index()] = true;
                    }
                    if nw && sw {
                        self.nodes[idx].is_jump_point = true;
                    }
                }

                // Obstacle's SOUTH neighbor
                if self.in_bounds(x, y + 1) && !self.is_obstacle_or_wall(x, y + 1) {
                    let idx = self.index(x as u32, (y + 1) as u32);
                    let nw = self.is_empty(x - 1, y);
                    let ne = self.is_empty(x + 1, y);
                    let w = self.is_empty(x - 1, y + 1);
                    let e = self.is_empty(x + 1, y + 1);
                    if nw && e {
                        self.nodes[idx].is_jump_point = true;
                        self.nodes[idx].jump_point_direction[Direction::East.index()] = true;
                    }
                    if ne && w {
                        self.nodes[idx].is_jump_point = true;
                        self.nodes[idx].jump_point_direction[Direction::West.index()] = true;
                    }
                    if nw && ne {
                        self.nodes[idx].is_jump_point = true;
                    }
                }

                // Obstacle's WEST neighbor
                if self.in_bounds(x - 1, y) && !self.is_obstacle_or_wall(x - 1, y) {
                    let idx = self.index((x - 1) as u32, y as u32);
                    let se = self.is_empty(x, y + 1);
                    let ne = self.is_empty(x, y - 1);
                    let n = self.is_empty(x - 1, y - 1);
                    let s = self.is_empty(x - 1, y + 1);
                    if se && n {
                        self.nodes[idx].is_jump_point = true;
                        self.nodes[idx].jump_point_direction[Direction::North.index()] = true;
                    }
                    if ne && s {
                        self.nodes[idx].is_jump_point = true;
                        self.nodes[idx].jump_point_direction[Direction::South.index()] = true;
                    }
                    if ne && se {
                        self.nodes[idx].is_jump_point = true;
                    }
                }
            }
        }
    }

    fn build_straight_jump_points(&mut self) {
        for y in 0..self.height {
            self.scan_row(y, true);
            self.scan_row(y, false);
        }
        for x in 0..self.width {
            self.scan_column(x, true);
            self.scan_column(x, false);
        }
    }

    fn scan_row(&mut self, y: u32, west_to_east: bool) {
        let (fill_dir, seen_dir) = if west_to_east {
            (Direction::West, Direction::East)
        } else {
            (Direction::East, Direction::West)
        };
        let mut jump_distance_so_far: i32 = -1;
        let mut jump_point_seen = false;
        let xs: Box<dyn Iterator<Item = u32>> = if west_to_east {
            Box::new(0..self.width)
        } else {
            Box::new((0..self.width).rev())
        };
        for x in xs {
            let idx = self.index(x, y);
            if self.nodes[idx].is_obstacle {
                jump_distance_so_far = -1;
                jump_point_seen = false;
                self.nodes[idx].jp_distances[fill_dir.index()] = 0;
                continue;
            }
            jump_distance_so_far += 1;
            self.nodes[idx].jp_distances[fill_dir.index()] =
                if jump_point_seen { jump_distance_so_far } else { -jump_distance_so_far };
            if self.nodes[idx].is_jump_point_from(seen_dir) {
                jump_distance_so_far = 0;
                jump_point_seen = true;
            }
        }
    }

    fn scan_column(&mut self, x: u32, north_to_south: bool) {
        let (fill_dir, seen_dir) = if north_to_south {
            (Direction::North, Direction::South)
        } else {
            (Direction::South, Direction::North)
        };
        let mut jump_distance_so_far: i32 = -1;
        let mut jump_point_seen = false;
        let ys: Box<dyn Iterator<Item = u32>> = if north_to_south {
            Box::new(0..self.height)
        } else {
            Box::new((0..self.height).rev())
        };
        for y in ys {
            let idx = self.index(x, y);
            if self.nodes[idx].is_obstacle {
                jump_distance_so_far = -1;
                jump_point_seen = false;
                self.nodes[idx].jp_distances[fill_dir.index()] = 0;
                continue;
            }
            jump_distance_so_far += 1;
            self.nodes[idx].jp_distances[fill_dir.index()] =
                if jump_point_seen { jump_distance_so_far } else { -jump_distance_so_far };
            if self.nodes[idx].is_jump_point_from(seen_dir) {
                jump_distance_so_far = 0;
                jump_point_seen = true;
            }
        }
    }

    fn build_diagonal_jump_points(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                if self.is_obstacle_or_wall(x as i64, y as i64) {
                    continue;
                }
                self.diagonal_pass_cell(x, y, -1, Direction::NorthWest, Direction::North, Direction::West);
                self.diagonal_pass_cell(x, y, -1, Direction::NorthEast, Direction::North, Direction::East);
            }
        }
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                if self.is_obstacle_or_wall(x as i64, y as i64) {
                    continue;
                }
                self.diagonal_pass_cell(x, y, 1, Direction::SouthWest, Direction::South, Direction::West);
                self.diagonal_pass_cell(x, y, 1, Direction::SouthEast, Direction::South, Direction::East);
            }
        }
    }

    fn diagonal_pass_cell(&mut self, x: u32, y: u32, dy: i64, diag: Direction, vert: Direction, horiz: Direction) {
        let (ddx, _) = diag.delta();
        let nx = x as i64 + ddx;
        let ny = y as i64 + dy;
        let idx = self.index(x, y);

        if !self.in_bounds(nx, ny) || self.is_obstacle_or_wall(nx, ny) {
            self.nodes[idx].jp_distances[diag.index()] = 0;
            return;
        }
        let neighbor = &self.nodes[self.index(nx as u32, ny as u32)];
        let connects = neighbor.jp_distances[vert.index()] > 0
            || neighbor.jp_distances[horiz.index()] > 0
            || neighbor.is_jump_point;
        if connects {
            self.nodes[idx].jp_distances[diag.index()] = 1;
        } else {
            let inherited = neighbor.jp_distances[diag.index()];
            self.nodes[idx].jp_distances[diag.index()] =
                if inherited > 0 { inherited + 1 } else { inherited - 1 };
        }
    }

    pub(crate) fn jp_distance(&self, x: u32, y: u32, dir: Direction) -> i32 {
        self.nodes[self.index(x, y)].jp_distances[dir.index()]
    }
}
