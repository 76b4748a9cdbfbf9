//! 3D integer coordinates and axis-aligned box predicates.

use serde::{Deserialize, Serialize};

/// A point on the match's discrete 3D grid. Components are nonnegative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Coordinate {
    pub fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Component-wise add.
    pub fn add(&self, dx: i64, dy: i64, dz: i64) -> Option<Coordinate> {
        Some(Coordinate {
            x: offset(self.x, dx)?,
            y: offset(self.y, dy)?,
            z: offset(self.z, dz)?,
        })
    }

    /// Component-wise subtract, returning `None` if the result would be negative
    /// on any axis (callers that just want a distance should use [`manhattan`]
    /// or [`diagonal`] instead).
    pub fn sub(&self, other: &Coordinate) -> Option<(i64, i64, i64)> {
        Some((
            self.x as i64 - other.x as i64,
            self.y as i64 - other.y as i64,
            self.z as i64 - other.z as i64,
        ))
    }

    /// True if `self` and `other` share an (x, y) footprint, ignoring altitude.
    pub fn xy_equal(&self, other: &Coordinate) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// True if `self` is within `[0, map_range]` on every axis.
    pub fn is_valid(&self, map_range: &Coordinate) -> bool {
        self.x <= map_range.x && self.y <= map_range.y && self.z <= map_range.z
    }

    /// True if `self` falls inside any of the given inclusive boxes.
    pub fn is_overlap(&self, boxes: &[BoundingBox]) -> bool {
        boxes.iter().any(|b| b.contains(self))
    }
}

fn offset(base: u32, delta: i64) -> Option<u32> {
    let result = base as i64 + delta;
    if result < 0 {
        None
    } else {
        u32::try_from(result).ok()
    }
}

/// An axis-aligned inclusive box: `(x1,y1,x2,y2,z1,z2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
    pub z1: u32,
    pub z2: u32,
}

impl BoundingBox {
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32, z1: u32, z2: u32) -> Self {
        Self { x1, y1, x2, y2, z1, z2 }
    }

    pub fn contains(&self, c: &Coordinate) -> bool {
        c.x >= self.x1 && c.x <= self.x2 && c.y >= self.y1 && c.y <= self.y2 && c.z >= self.z1 && c.z <= self.z2
    }

    /// True if the box covers `(x, y)` at the given altitude.
    pub fn covers_xy_at(&self, x: u32, y: u32, z: u32) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2 && z >= self.z1 && z <= self.z2
    }
}

/// Manhattan distance in the (x, y) plane.
pub fn manhattan(a: &Coordinate, b: &Coordinate) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Manhattan distance over all three axes.
pub fn manhattan_3d(a: &Coordinate, b: &Coordinate) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y) + a.z.abs_diff(b.z)
}

/// The octile heuristic used throughout this system: `max(|dx|, |dy|)`, not
/// the classical `min*sqrt(2) + (max-min)` metric. See the JPS+ planner.
pub fn diagonal(a: &Coordinate, b: &Coordinate) -> u32 {
    a.x.abs_diff(b.x).max(a.y.abs_diff(b.y))
}

/// `diagonal` extended with the z axis folded in additively, used by the
/// scheduler's feasibility checks (altitude changes are vertical-only moves,
/// so they don't share the octile discount).
pub fn diagonal_3d(a: &Coordinate, b: &Coordinate) -> u32 {
    diagonal(a, b) + a.z.abs_diff(b.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn add_and_sub_round_trip() {
        let c = Coordinate::new(3, 4, 0);
        let moved = c.add(2, -1, 0).unwrap();
        assert_eq!(moved, Coordinate::new(5, 3, 0));
    }

    #[test]
    fn add_below_zero_is_none() {
        let c = Coordinate::new(0, 0, 0);
        assert!(c.add(-1, 0, 0).is_none());
    }

    #[test]
    fn xy_equal_ignores_altitude() {
        let a = Coordinate::new(1, 1, 0);
        let b = Coordinate::new(1, 1, 5);
        assert!(a.xy_equal(&b));
    }

    #[test]
    fn bounding_box_contains_inclusive_edges() {
        let b = BoundingBox::new(0, 0, 2, 2, 0, 1);
        assert!(b.contains(&Coordinate::new(2, 2, 1)));
        assert!(!b.contains(&Coordinate::new(3, 2, 1)));
        assert!(!b.contains(&Coordinate::new(2, 2, 2)));
    }

    #[test]
    fn diagonal_distance_is_chebyshev() {
        let a = Coordinate::new(0, 0, 0);
        let b = Coordinate::new(3, 5, 0);
        assert_eq!(diagonal(&a, &b), 5);
    }

    #[test]
    fn manhattan_distance_sums_axes() {
        let a = Coordinate::new(0, 0, 0);
        let b = Coordinate::new(3, 5, 0);
        assert_eq!(manhattan(&a, &b), 8);
    }
}
