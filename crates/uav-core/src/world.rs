//! The immutable match parameters parsed from the server's initial map frame.

use std::collections::BTreeMap;

use crate::coord::{BoundingBox, Coordinate};
use crate::entity::UavPrice;

/// Match parameters that never change after the handshake completes.
#[derive(Debug, Clone)]
pub struct WorldModel {
    /// Inclusive map extents (`map.{x,y,z}` from the wire frame, minus one).
    pub map_range: Coordinate,
    pub parking: Coordinate,
    pub h_low: u32,
    pub h_high: u32,
    pub buildings: Vec<BoundingBox>,
    pub fogs: Vec<BoundingBox>,
    /// Keyed by UAV type name.
    pub uav_prices: BTreeMap<String, UavPrice>,
    /// UAV type names ordered cheapest-first; what the purchase phase and
    /// `Agent::price_level` walk.
    price_order: Vec<String>,
    /// Candidate search altitudes, computed once at construction.
    search_altitudes: Vec<u32>,
}

impl WorldModel {
    pub fn new(
        map_range: Coordinate,
        parking: Coordinate,
        h_low: u32,
        h_high: u32,
        buildings: Vec<BoundingBox>,
        fogs: Vec<BoundingBox>,
        uav_prices: BTreeMap<String, UavPrice>,
    ) -> Self {
        let mut price_order: Vec<String> = uav_prices.keys().cloned().collect();
        price_order.sort_by_key(|k| uav_prices[k].value);

        let search_altitudes = compute_search_altitudes(h_low, h_high, &buildings);

        Self {
            map_range,
            parking,
            h_low,
            h_high,
            buildings,
            fogs,
            uav_prices,
            price_order,
            search_altitudes,
        }
    }

    /// Cheapest-first UAV type names, as used by the purchase phase.
    pub fn price_order(&self) -> &[String] {
        &self.price_order
    }

    /// Candidate altitudes for horizontal search: `h_low` plus one cell above
    /// every building roof strictly inside the altitude band, ascending.
    pub fn search_altitudes(&self) -> &[u32] {
        &self.search_altitudes
    }

    pub fn is_building_at(&self, x: u32, y: u32, z: u32) -> bool {
        self.buildings.iter().any(|b| b.covers_xy_at(x, y, z))
    }

    pub fn in_bounds(&self, c: &Coordinate) -> bool {
        c.is_valid(&self.map_range)
    }
}

fn compute_search_altitudes(h_low: u32, h_high: u32, buildings: &[BoundingBox]) -> Vec<u32> {
    let mut altitudes = vec![h_low];
    for b in buildings {
        let roof = b.z2;
        if roof > h_low && roof < h_high {
            altitudes.push(roof + 1);
        }
    }
    altitudes.sort_unstable();
    altitudes.dedup();
    altitudes
}
