//! UAV and goods snapshots, as carried in server frames.

use serde::{Deserialize, Serialize};

use crate::coord::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UavStatus {
    Normal,
    Crashed,
    InFog,
    Charging,
}

/// One of our own UAVs, or a visible enemy, as of the latest server frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uav {
    pub no: u32,
    pub loc: Coordinate,
    /// `None` when not carrying anything; the source represents this as -1.
    pub goods_no: Option<u32>,
    pub uav_type: String,
    pub status: UavStatus,
    pub remain_electricity: u32,
    pub capacity: u32,
    pub load_weight: u32,
    pub charge_rate: u32,
}

impl Uav {
    /// Battery capacity headroom; used by the idle-scatter "fully charged" gate.
    pub fn full_charged(&self) -> bool {
        self.remain_electricity >= self.capacity
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoodsState {
    Normal,
    Carried,
}

/// A cargo offer. Source and destination are always ground-level (`z == 0`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goods {
    pub no: u32,
    pub start: Coordinate,
    pub end: Coordinate,
    pub weight: u32,
    pub value: u32,
    pub start_time: u32,
    pub remain_time: u32,
    pub left_time: u32,
    pub state: GoodsState,
}

/// A purchasable UAV type's parameters, from the initial map frame's price table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UavPrice {
    pub uav_type: String,
    pub load_weight: u32,
    pub value: u32,
    pub capacity: u32,
    pub charge_rate: u32,
}
