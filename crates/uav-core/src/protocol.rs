//! JSON wire shapes exchanged with the game server, and conversions into
//! domain types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coord::{BoundingBox, Coordinate};
use crate::entity::{Goods, GoodsState, Uav, UavPrice, UavStatus};

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("unknown UAV status code: {0}")]
    UnknownUavStatus(u32),
    #[error("unknown goods state code: {0}")]
    UnknownGoodsState(u32),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UavWire {
    pub no: u32,
    pub x: u32,
    pub y: u32,
    pub z: u32,
    /// -1 when empty.
    pub goods_no: i64,
    #[serde(rename = "type")]
    pub uav_type: String,
    pub status: u32,
    pub remain_electricity: u32,
}

impl TryFrom<&UavWire> for Uav {
    type Error = ProtocolError;

    fn try_from(w: &UavWire) -> Result<Self, Self::Error> {
        let status = match w.status {
            0 => UavStatus::Normal,
            1 => UavStatus::Crashed,
            2 => UavStatus::InFog,
            3 => UavStatus::Charging,
            other => return Err(ProtocolError::UnknownUavStatus(other)),
        };
        Ok(Uav {
            no: w.no,
            loc: Coordinate::new(w.x, w.y, w.z),
            goods_no: if w.goods_no < 0 { None } else { Some(w.goods_no as u32) },
            uav_type: w.uav_type.clone(),
            status,
            remain_electricity: w.remain_electricity,
            // Filled in from the world model's price table by the caller;
            // the per-tick frame doesn't repeat static UAV-type parameters.
            capacity: 0,
            load_weight: 0,
            charge_rate: 0,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoodsWire {
    pub no: u32,
    pub start_x: u32,
    pub start_y: u32,
    pub end_x: u32,
    pub end_y: u32,
    pub weight: u32,
    pub value: u32,
    pub start_time: u32,
    pub remain_time: u32,
    pub left_time: u32,
    pub status: u32,
}

impl TryFrom<&GoodsWire> for Goods {
    type Error = ProtocolError;

    fn try_from(w: &GoodsWire) -> Result<Self, Self::Error> {
        let state = match w.status {
            0 => GoodsState::Normal,
            1 => GoodsState::Carried,
            other => return Err(ProtocolError::UnknownGoodsState(other)),
        };
        Ok(Goods {
            no: w.no,
            start: Coordinate::new(w.start_x, w.start_y, 0),
            end: Coordinate::new(w.end_x, w.end_y, 0),
            weight: w.weight,
            value: w.value,
            start_time: w.start_time,
            remain_time: w.remain_time,
            left_time: w.left_time,
            state,
        })
    }
}

/// Per-tick request: server → client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerFrame {
    pub token: String,
    #[serde(default)]
    pub notice: Option<String>,
    pub match_status: u32,
    pub time: u64,
    #[serde(rename = "UAV_we")]
    pub uav_we: Vec<UavWire>,
    pub we_value: i64,
    #[serde(rename = "UAV_enemy")]
    pub uav_enemy: Vec<UavWire>,
    pub enemy_value: i64,
    pub goods: Vec<GoodsWire>,
}

impl ServerFrame {
    pub fn is_match_over(&self) -> bool {
        self.match_status == 1
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UavInfoOut {
    pub no: u32,
    pub x: u32,
    pub y: u32,
    pub z: u32,
    pub goods_no: i64,
    pub remain_electricity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOut {
    pub purchase: String,
}

/// Per-tick response: client → server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandFrame {
    pub token: String,
    pub action: String,
    #[serde(rename = "UAV_info")]
    pub uav_info: Vec<UavInfoOut>,
    #[serde(rename = "purchase_UAV", skip_serializing_if = "Vec::is_empty")]
    pub purchase_uav: Vec<PurchaseOut>,
}

impl CommandFrame {
    pub fn new(token: String, uav_info: Vec<UavInfoOut>, purchase_uav: Vec<PurchaseOut>) -> Self {
        Self {
            token,
            action: "flyPlane".to_string(),
            uav_info,
            purchase_uav,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendTokenMsg {
    pub token: String,
    pub action: String,
}

impl SendTokenMsg {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
            action: "sendtoken".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyMsg {
    pub token: String,
    pub action: String,
}

impl ReadyMsg {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
            action: "ready".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResultMsg {
    pub result: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildingWire {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
    pub z1: u32,
    pub z2: u32,
}

impl From<&BuildingWire> for BoundingBox {
    fn from(w: &BuildingWire) -> Self {
        BoundingBox::new(w.x1, w.y1, w.x2, w.y2, w.z1, w.z2)
    }
}

pub type FogWire = BuildingWire;

#[derive(Debug, Clone, Deserialize)]
pub struct UavPriceWire {
    #[serde(rename = "type")]
    pub uav_type: String,
    pub load_weight: u32,
    pub value: u32,
    pub capacity: u32,
    pub charge: u32,
}

impl From<&UavPriceWire> for UavPrice {
    fn from(w: &UavPriceWire) -> Self {
        UavPrice {
            uav_type: w.uav_type.clone(),
            load_weight: w.load_weight,
            value: w.value,
            capacity: w.capacity,
            charge_rate: w.charge,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapExtents {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

/// Initial map frame sent once after the handshake completes.
#[derive(Debug, Clone, Deserialize)]
pub struct MapFrame {
    pub map: MapExtents,
    pub parking: ParkingWire,
    pub h_low: u32,
    pub h_high: u32,
    pub building: Vec<BuildingWire>,
    pub fog: Vec<BuildingWire>,
    pub init_uav: Vec<UavWire>,
    #[serde(rename = "UAV_price")]
    pub uav_price: Vec<UavPriceWire>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParkingWire {
    pub x: u32,
    pub y: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn uav_wire_empty_goods_becomes_none() {
        let w = UavWire {
            no: 1,
            x: 0,
            y: 0,
            z: 0,
            goods_no: -1,
            uav_type: "light".to_string(),
            status: 0,
            remain_electricity: 10,
        };
        let uav = Uav::try_from(&w).unwrap();
        assert_eq!(uav.goods_no, None);
        assert_eq!(uav.status, UavStatus::Normal);
    }

    #[test]
    fn uav_wire_unknown_status_is_protocol_error() {
        let w = UavWire {
            no: 1,
            x: 0,
            y: 0,
            z: 0,
            goods_no: -1,
            uav_type: "light".to_string(),
            status: 99,
            remain_electricity: 10,
        };
        assert!(matches!(Uav::try_from(&w), Err(ProtocolError::UnknownUavStatus(99))));
    }

    #[test]
    fn command_frame_omits_empty_purchase_list() {
        let frame = CommandFrame::new("tok".to_string(), vec![], vec![]);
        let json = serde_json::to_string(&frame).unwrap();
        assert!(!json.contains("purchase_UAV"));
    }

    #[test]
    fn command_frame_includes_purchase_list_when_nonempty() {
        let frame = CommandFrame::new(
            "tok".to_string(),
            vec![],
            vec![PurchaseOut { purchase: "light".to_string() }],
        );
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("purchase_UAV"));
    }
}
