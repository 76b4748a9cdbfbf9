//! The 8-connected compass directions a jump-point search explores, and the
//! parent-direction pruning table used to restrict successor generation to
//! JPS's canonical neighbor set.

/// Compass direction, indexed 0..8 to match `jp_distances` array slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
}

pub const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::NorthEast,
    Direction::East,
    Direction::SouthEast,
    Direction::South,
    Direction::SouthWest,
    Direction::West,
    Direction::NorthWest,
];

impl Direction {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_cardinal(self) -> bool {
        matches!(self, Direction::North | Direction::East | Direction::South | Direction::West)
    }

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast | Direction::SouthEast | Direction::SouthWest | Direction::NorthWest
        )
    }

    /// `(dx, dy)` for one step in this direction; `y` grows downward (row-major).
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Directions valid as a successor when arriving from this direction.
    /// Root nodes (no parent) consider all 8 directions instead of this table.
    pub fn valid_successors(self) -> &'static [Direction] {
        match self {
            Direction::South => &[
                Direction::West,
                Direction::SouthWest,
                Direction::South,
                Direction::SouthEast,
                Direction::East,
            ],
            Direction::SouthEast => &[Direction::South, Direction::SouthEast, Direction::East],
            Direction::East => &[
                Direction::South,
                Direction::SouthEast,
                Direction::East,
                Direction::NorthEast,
                Direction::North,
            ],
            Direction::NorthEast => &[Direction::East, Direction::NorthEast, Direction::North],
            Direction::North => &[
                Direction::East,
                Direction::NorthEast,
                Direction::North,
                Direction::NorthWest,
                Direction::West,
            ],
            Direction::NorthWest => &[Direction::North, Direction::NorthWest, Direction::West],
            Direction::West => &[
                Direction::North,
                Direction::NorthWest,
                Direction::West,
                Direction::SouthWest,
                Direction::South,
            ],
            Direction::SouthWest => &[Direction::West, Direction::SouthWest, Direction::South],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_and_diagonal_partition_all_directions() {
        for d in ALL_DIRECTIONS {
            assert_ne!(d.is_cardinal(), d.is_diagonal());
        }
    }
}
