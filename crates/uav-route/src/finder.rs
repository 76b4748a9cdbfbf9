//! Per-altitude preprocessed planners, keyed by search altitude.

use std::collections::BTreeMap;

use uav_core::WorldModel;
use uav_jps::{JpsGrid, Searcher};

/// A preprocessed grid plus its reusable search scratch, for one altitude.
pub struct Finder {
    pub grid: JpsGrid,
    pub searcher: Searcher,
}

/// Builds one [`Finder`] per candidate search altitude in `world`. Buildings
/// are rasterized into each altitude's obstacle mask by whether they cover
/// that `(x, y)` at that `z`. Call once before the first tick; per §3's
/// invariant, finders are never rebuilt afterward.
pub fn build_finders(world: &WorldModel) -> BTreeMap<u32, Finder> {
    let width = world.map_range.x + 1;
    let height = world.map_range.y + 1;

    world
        .search_altitudes()
        .iter()
        .map(|&altitude| {
            let mut grid = JpsGrid::new(width, height, |x, y| world.is_building_at(x, y, altitude));
            grid.preprocess();
            let searcher = Searcher::new(width, height);
            (altitude, Finder { grid, searcher })
        })
        .collect()
}
