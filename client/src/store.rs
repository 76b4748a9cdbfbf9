//! The per-match state a tick reads and mutates, owned explicitly by the
//! [`crate::scheduler::Scheduler`] rather than reached through a global —
//! see DESIGN.md's "singleton world-store → explicit context" note.

use std::collections::{BTreeMap, BTreeSet};

use uav_core::WorldModel;
use uav_route::{build_finders, Finder};

use crate::agent::Agent;

/// `-1` sentinel for an unassigned attacker slot, preserved from the source's
/// `goods_to_attack` dict (`u32` goods numbers never collide with it).
pub const UNASSIGNED_ATTACKER: i64 = -1;

pub struct TickStore {
    pub agents: BTreeMap<u32, Agent>,
    pub jps_finders: BTreeMap<u32, Finder>,
    pub attacker_to_enemy: BTreeMap<u32, u32>,
    pub goods_to_attack: BTreeMap<u32, i64>,
    /// Mirrors `env.py`'s `uav_on_parking_xy_set`: never populated in the
    /// source's live code path either (the depot-approach tracking it was
    /// meant for is commented out), kept here for parity with the field
    /// list spec.md's shared-store section carries over.
    pub depot_occupancy: BTreeSet<u32>,
    /// Gates idle-scatter in phase 4. Stays empty in the source too — the
    /// code path that would populate it is never reached — so the gate is
    /// always open in practice.
    pub charge_approaching: BTreeSet<u32>,
    /// Mirrors `env.py`'s `enemy_above_parking`; its sole writer in
    /// `scheduler.py` is commented out.
    pub enemy_above_depot: BTreeSet<u32>,
}

impl TickStore {
    /// Builds the per-altitude JPS+ finders once from the static world model;
    /// per §3's invariant they are never rebuilt or mutated afterward.
    pub fn new(world: &WorldModel) -> Self {
        Self {
            agents: BTreeMap::new(),
            jps_finders: build_finders(world),
            attacker_to_enemy: BTreeMap::new(),
            goods_to_attack: BTreeMap::new(),
            depot_occupancy: BTreeSet::new(),
            charge_approaching: BTreeSet::new(),
            enemy_above_depot: BTreeSet::new(),
        }
    }
}
