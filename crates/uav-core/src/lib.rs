//! Shared types for the UAV fleet controller: coordinates, the static world
//! model, entity snapshots, task classification, and the JSON wire protocol.

mod coord;
mod entity;
mod protocol;
mod task;
mod world;

pub use coord::{diagonal, diagonal_3d, manhattan, manhattan_3d, BoundingBox, Coordinate};
pub use entity::{Goods, GoodsState, Uav, UavPrice, UavStatus};
pub use protocol::{
    AuthResultMsg, BuildingWire, CommandFrame, FogWire, GoodsWire, MapExtents, MapFrame,
    ParkingWire, ProtocolError, PurchaseOut, ReadyMsg, SendTokenMsg, ServerFrame, UavInfoOut,
    UavPriceWire, UavWire,
};
pub use task::{TaskType, Usage};
pub use world::WorldModel;
