//! Wraps the JPS+ planner with altitude selection and vertical take-off /
//! landing stitching.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use uav_core::{Coordinate, WorldModel};
use uav_jps::{GridPoint, PathMode};

use crate::finder::Finder;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("no candidate altitude yields a path from start to end")]
    Unreachable,
}

/// Candidate altitudes in trial order: the first three ascending, then the
/// remainder shuffled — see DESIGN.md's "random altitude fallback" entry.
fn altitude_order(world: &WorldModel, rng: &mut impl Rng) -> Vec<u32> {
    let altitudes = world.search_altitudes();
    if altitudes.len() <= 3 {
        return altitudes.to_vec();
    }
    let (deterministic, rest) = altitudes.split_at(3);
    let mut rest = rest.to_vec();
    rest.shuffle(rng);
    let mut order = deterministic.to_vec();
    order.extend(rest);
    order
}

fn vertical_path(from: Coordinate, to_z: u32) -> Vec<Coordinate> {
    let (lo, hi) = if from.z <= to_z { (from.z, to_z) } else { (to_z, from.z) };
    let mut points: Vec<Coordinate> = (lo..=hi).map(|z| Coordinate::new(from.x, from.y, z)).collect();
    if from.z > to_z {
        points.reverse();
    }
    points
}

fn append_deduped(path: &mut Vec<Coordinate>, next: Vec<Coordinate>) {
    let mut next = next.into_iter();
    if let Some(first) = next.next() {
        if path.last() != Some(&first) {
            path.push(first);
        }
        path.extend(next);
    }
}

/// Selects a flyable altitude, runs JPS+ at that altitude, and stitches a
/// three-segment path: vertical ascent, horizontal jump-point path, vertical
/// descent. Fails only once every candidate altitude has been tried.
pub fn plan(
    world: &WorldModel,
    finders: &mut BTreeMap<u32, Finder>,
    start: Coordinate,
    end: Coordinate,
    rng: &mut impl Rng,
) -> Result<Vec<Coordinate>, PlanError> {
    for altitude in altitude_order(world, rng) {
        let Some(finder) = finders.get_mut(&altitude) else { continue };

        let start_2d = GridPoint::new(start.x, start.y);
        let end_2d = GridPoint::new(end.x, end.y);
        let horizontal = finder.searcher.get_path(&finder.grid, start_2d, end_2d, PathMode::Full);
        if horizontal.is_empty() {
            continue;
        }

        let mut path = vertical_path(start, altitude);
        let horizontal_coords: Vec<Coordinate> =
            horizontal.into_iter().map(|p| Coordinate::new(p.x, p.y, altitude)).collect();
        append_deduped(&mut path, horizontal_coords);
        append_deduped(&mut path, vertical_path(Coordinate::new(end.x, end.y, altitude), end.z));

        return Ok(path);
    }
    Err(PlanError::Unreachable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeMap as Map;
    use uav_core::BoundingBox;
    use uav_jps::JpsGrid;
    use uav_jps::Searcher as Sr;

    fn world_with_wall() -> WorldModel {
        WorldModel::new(
            Coordinate::new(9, 9, 5),
            Coordinate::new(0, 0, 0),
            0,
            4,
            vec![BoundingBox::new(5, 0, 5, 8, 0, 1)],
            vec![],
            Map::new(),
        )
    }

    fn finders_for(world: &WorldModel) -> Map<u32, Finder> {
        let width = world.map_range.x + 1;
        let height = world.map_range.y + 1;
        world
            .search_altitudes()
            .iter()
            .map(|&alt| {
                let mut grid = JpsGrid::new(width, height, |x, y| world.is_building_at(x, y, alt));
                grid.preprocess();
                (alt, Finder { grid, searcher: Sr::new(width, height) })
            })
            .collect()
    }

    #[test]
    fn plans_three_segment_path_at_ground_altitude() {
        let world = world_with_wall();
        let mut finders = finders_for(&world);
        let mut rng = StdRng::seed_from_u64(1);

        let path = plan(&world, &mut finders, Coordinate::new(0, 4, 0), Coordinate::new(9, 4, 0), &mut rng).unwrap();
        assert_eq!(path.first().unwrap(), &Coordinate::new(0, 4, 0));
        assert_eq!(path.last().unwrap(), &Coordinate::new(9, 4, 0));
        assert!(path.iter().all(|c| c.z == 0));
    }

    #[test]
    fn retries_at_higher_altitude_when_sealed() {
        // Column x=2 sealed at ground level for every row; open at altitude 2.
        let world = WorldModel::new(
            Coordinate::new(4, 4, 5),
            Coordinate::new(0, 0, 0),
            0,
            4,
            vec![BoundingBox::new(2, 0, 2, 4, 0, 1)],
            vec![],
            Map::new(),
        );
        let mut finders = finders_for(&world);
        let mut rng = StdRng::seed_from_u64(1);

        let path = plan(&world, &mut finders, Coordinate::new(0, 0, 0), Coordinate::new(4, 0, 0), &mut rng).unwrap();
        assert_eq!(path.first().unwrap(), &Coordinate::new(0, 0, 0));
        assert_eq!(path.last().unwrap(), &Coordinate::new(4, 0, 0));
        // Must have climbed above the wall at some point.
        assert!(path.iter().any(|c| c.z == 2));
    }

    #[test]
    fn unreachable_at_every_altitude_is_an_error() {
        // Wall spans the full altitude band with no gap and no roof to climb to.
        let world = WorldModel::new(
            Coordinate::new(4, 4, 1),
            Coordinate::new(0, 0, 0),
            0,
            1,
            vec![BoundingBox::new(2, 0, 2, 4, 0, 1)],
            vec![],
            Map::new(),
        );
        let mut finders = finders_for(&world);
        let mut rng = StdRng::seed_from_u64(1);

        let result = plan(&world, &mut finders, Coordinate::new(0, 0, 0), Coordinate::new(4, 0, 0), &mut rng);
        assert_eq!(result, Err(PlanError::Unreachable));
    }

    #[test]
    fn vertical_path_covers_inclusive_range_both_directions() {
        let up = vertical_path(Coordinate::new(1, 1, 0), 3);
        assert_eq!(up, vec![
            Coordinate::new(1, 1, 0),
            Coordinate::new(1, 1, 1),
            Coordinate::new(1, 1, 2),
            Coordinate::new(1, 1, 3),
        ]);
        let down = vertical_path(Coordinate::new(1, 1, 3), 0);
        assert_eq!(down, vec![
            Coordinate::new(1, 1, 3),
            Coordinate::new(1, 1, 2),
            Coordinate::new(1, 1, 1),
            Coordinate::new(1, 1, 0),
        ]);
    }
}
