//! Per-UAV state machine: current task, cached plan, battery bookkeeping,
//! next-step staging, and detour recovery.

use std::collections::BTreeMap;

use rand::Rng;
use uav_core::{diagonal, manhattan, Coordinate, Goods, TaskType, Uav, UavPrice, Usage, WorldModel};
use uav_route::{Finder, PlanError};

/// Distance inflation applied to battery/deadline feasibility checks, to
/// leave slack against the estimate's straight-line optimism.
const DIST_ESTIMATE_RATE_NUM: u32 = 11;
const DIST_ESTIMATE_RATE_DEN: u32 = 10;

fn scale_estimate(dist: u32) -> u32 {
    (dist * DIST_ESTIMATE_RATE_NUM).div_ceil(DIST_ESTIMATE_RATE_DEN)
}

/// Manhattan distance between two cells via a vertical stop at `h_low`, the
/// shape of an actual vertical/horizontal/vertical flight segment rather
/// than a straight 3D line.
fn manhattan_3d_via(a: Coordinate, b: Coordinate, h_low: u32) -> u32 {
    manhattan(&a, &b) + a.z.abs_diff(h_low) + b.z.abs_diff(h_low)
}

/// Octile counterpart of [`manhattan_3d_via`].
fn diagonal_3d_via(a: Coordinate, b: Coordinate, h_low: u32) -> u32 {
    diagonal(&a, &b) + a.z.abs_diff(h_low) + b.z.abs_diff(h_low)
}

/// Whether two UAVs moving from their current cell to their staged next cell
/// will collide, swap places, or cross inside a shared 1x2 rectangle.
pub fn encounter(a: Coordinate, a_next: Coordinate, b: Coordinate, b_next: Coordinate) -> bool {
    if a_next == b_next {
        return true;
    }
    if a == b_next && b == a_next {
        return true;
    }
    if a.z == a_next.z && a_next.z == b.z && b.z == b_next.z {
        let adjacent = a.x.abs_diff(b.x) + a.y.abs_diff(b.y) == 1;
        if adjacent {
            let column_swap =
                a.x == b.x && a_next.x == b_next.x && a.x != a_next.x && a_next.y == b.y && b_next.y == a.y;
            let row_swap =
                a.y == b.y && a_next.y == b_next.y && a.y != a_next.y && a_next.x == b.x && b_next.x == a.x;
            if column_swap || row_swap {
                return true;
            }
        }
    }
    false
}

/// Which directions [`Agent::take_detour`] is willing to try.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetourMode {
    Vertical,
    Horizontal,
    Auto,
}

const HORIZONTAL_DIRECTIONS: [(i64, i64); 8] =
    [(-1, 0), (1, 0), (0, -1), (0, 1), (-1, 1), (1, 1), (1, -1), (-1, -1)];

/// One live friendly UAV's route-planning state.
pub struct Agent {
    pub uav: Uav,
    pub path: Vec<Coordinate>,
    /// Index of the next unconsumed path cell; `path[0]` is the cell the UAV
    /// started the plan from and is never re-emitted.
    pub index: usize,
    pub task_type: TaskType,
    pub task_priority: u8,
    pub attack_target: Option<u32>,
    pub goods: Option<Goods>,
    pub next_step: Coordinate,
    pub usage: Usage,
}

impl Agent {
    pub fn new(uav: Uav, usage: Usage) -> Self {
        let next_step = uav.loc;
        Self {
            uav,
            path: Vec::new(),
            index: 1,
            task_type: TaskType::NoTask,
            task_priority: TaskType::NoTask.priority(),
            attack_target: None,
            goods: None,
            next_step,
            usage,
        }
    }

    /// Replace the UAV snapshot from the latest server frame, refilling the
    /// static per-type fields the wire protocol doesn't repeat every tick.
    pub fn update_uav_info(&mut self, mut uav: Uav, price: &UavPrice) {
        uav.capacity = price.capacity;
        uav.load_weight = price.load_weight;
        uav.charge_rate = price.charge_rate;
        self.uav = uav;
    }

    pub fn reset(&mut self) {
        self.path.clear();
        self.index = 1;
        self.task_type = TaskType::NoTask;
        self.task_priority = TaskType::NoTask.priority();
        self.goods = None;
        self.attack_target = None;
        self.next_step = self.uav.loc;
    }

    pub fn num_remain_steps(&self) -> usize {
        self.path.len().saturating_sub(self.index)
    }

    pub fn leaving_parking(&self, world: &WorldModel) -> bool {
        self.task_type != TaskType::NoTask
            && self.task_type != TaskType::ToCharge
            && self.uav.loc.xy_equal(&world.parking)
            && self.uav.loc.z > 0
            && self.uav.loc.z <= world.h_low
    }

    pub fn price_level(&self, world: &WorldModel) -> usize {
        world
            .price_order()
            .iter()
            .position(|t| t == &self.uav.uav_type)
            .unwrap_or(0)
    }

    /// Ticks of laden flight this battery can sustain at `weight`, or
    /// `u64::MAX` for an unloaded UAV.
    pub fn battery_life(&self, weight: u32) -> u64 {
        if weight == 0 {
            u64::MAX
        } else {
            self.uav.remain_electricity as u64 / weight as u64
        }
    }

    pub fn battery_enough(&self, world: &WorldModel, weight: u32, start: Coordinate, end: Coordinate) -> bool {
        let dist = scale_estimate(manhattan_3d_via(start, end, world.h_low));
        self.battery_life(weight) >= dist as u64
    }

    /// Revenue-per-step estimate used to rank candidate cargo in the
    /// scheduler's cargo-assignment phase.
    pub fn estimate_earnings(&self, world: &WorldModel, goods: &Goods) -> f64 {
        let dist = manhattan_3d_via(self.uav.loc, goods.start, world.h_low)
            + manhattan_3d_via(goods.start, goods.end, world.h_low);
        if dist == 0 {
            0.0
        } else {
            goods.value as f64 / dist as f64
        }
    }

    /// Same distance estimate the scheduler uses for feasibility gating
    /// (`left_time` deadline, attack-assignment reach checks): octile in the
    /// horizontal plane, Manhattan vertically via `h_low`.
    pub fn diagonal_estimate(&self, world: &WorldModel, a: Coordinate, b: Coordinate) -> u32 {
        scale_estimate(diagonal_3d_via(a, b, world.h_low))
    }

    pub fn update_electricity(&mut self, world: &WorldModel) {
        let Some(price) = world.uav_prices.get(&self.uav.uav_type) else {
            return;
        };
        if self.next_step == world.parking {
            self.uav.remain_electricity = (self.uav.remain_electricity + price.charge_rate).min(price.capacity);
        } else {
            let carrying = self.uav.goods_no.is_some()
                || self.goods.as_ref().is_some_and(|g| self.next_step == g.end);
            if carrying {
                if let Some(goods) = &self.goods {
                    self.uav.remain_electricity = self.uav.remain_electricity.saturating_sub(goods.weight);
                }
            }
        }
    }

    /// Plans a new path via the route planner and adopts it, mirroring
    /// `route_plan.py::Agent.plan` — replaces `goods` (if given), sets the
    /// task and its priority, and resets the path cursor to 1.
    pub fn plan(
        &mut self,
        world: &WorldModel,
        finders: &mut BTreeMap<u32, Finder>,
        start: Coordinate,
        end: Coordinate,
        task_type: TaskType,
        goods: Option<Goods>,
        rng: &mut impl Rng,
    ) -> Result<(), PlanError> {
        if goods.is_some() {
            self.goods = goods;
        }
        self.task_type = task_type;
        self.task_priority = task_type.priority();
        let path = uav_route::plan(world, finders, start, end, rng)?;
        self.path = path;
        self.index = 1;
        Ok(())
    }

    /// Advances the path cursor by one cell, or triggers the next phase of a
    /// cargo run on arrival at an intermediate waypoint (pickup → replan to
    /// the drop cell, drop → reset and stage the climb back to `h_low`).
    pub fn gen_next_step(
        &mut self,
        world: &WorldModel,
        finders: &mut BTreeMap<u32, Finder>,
        rng: &mut impl Rng,
    ) {
        if self.task_type != TaskType::ToGoodsStart {
            if self.task_type == TaskType::ToCharge && self.uav.loc == world.parking {
                self.reset();
            } else if self.num_remain_steps() == 0 {
                self.next_step = self.uav.loc;
            } else {
                self.next_step = self.path[self.index];
                self.index += 1;
            }
            return;
        }

        if self.num_remain_steps() > 0 {
            self.next_step = self.path[self.index];
            self.index += 1;
            return;
        }

        let Some(goods) = self.goods.clone() else {
            self.next_step = self.uav.loc;
            return;
        };

        if self.uav.loc == goods.start {
            self.uav.goods_no = Some(goods.no);
            if self
                .plan(world, finders, self.uav.loc, goods.end, TaskType::ToGoodsEnd, None, rng)
                .is_err()
            {
                self.reset();
                return;
            }
            self.next_step = self.uav.loc;
        } else if self.uav.loc == goods.end {
            self.reset();
            self.path = vertical_path(self.uav.loc, world.h_low);
            self.next_step = self.path[self.index];
            self.index += 1;
        } else {
            self.next_step = self.uav.loc;
        }
    }

    /// Steps the path cursor back by one and re-stages the current cell,
    /// undoing a [`Agent::gen_next_step`] advance that the collision
    /// resolver is about to override.
    pub fn backspace(&mut self) {
        if self.next_step != self.uav.loc {
            self.index -= 1;
        }
        self.next_step = self.uav.loc;
    }

    /// Picks a one-step deviation that avoids every other agent's staged
    /// move, preferring a vertical hop over a horizontal one. `others` is
    /// every other agent's `(loc, next_step)` pair. Below `h_low` the UAV
    /// cannot safely detour horizontally and simply holds position.
    pub fn take_detour(&mut self, others: &[(Coordinate, Coordinate)], world: &WorldModel, mode: DetourMode) {
        if self.next_step != self.uav.loc {
            self.index -= 1;
        }

        if self.uav.loc.z < world.h_low {
            self.next_step = self.uav.loc;
            return;
        }

        if let Some(step) = find_safe_detour(self.uav.loc, others, mode) {
            let mut new_path = vec![step];
            new_path.extend_from_slice(&self.path[self.index..]);
            self.path = new_path;
            self.next_step = self.path[0];
            self.index = 1;
        } else {
            self.next_step = self.uav.loc;
        }
    }
}

fn find_safe_detour(loc: Coordinate, others: &[(Coordinate, Coordinate)], mode: DetourMode) -> Option<Coordinate> {
    if mode != DetourMode::Horizontal {
        if let Some(step) = loc.add(0, 0, 1) {
            if others.iter().all(|&(b, b_next)| step != b_next && !encounter(loc, step, b, b_next)) {
                return Some(step);
            }
        }
    }
    if mode != DetourMode::Vertical {
        for &(dx, dy) in &HORIZONTAL_DIRECTIONS {
            if let Some(step) = loc.add(dx, dy, 0) {
                if others.iter().all(|&(b, b_next)| step != b_next && !encounter(loc, step, b, b_next)) {
                    return Some(step);
                }
            }
        }
    }
    None
}

/// A straight vertical run from `from` to altitude `to_z`, inclusive of both
/// endpoints.
pub fn vertical_path(from: Coordinate, to_z: u32) -> Vec<Coordinate> {
    let (lo, hi) = if from.z <= to_z { (from.z, to_z) } else { (to_z, from.z) };
    let mut points: Vec<Coordinate> = (lo..=hi).map(|z| Coordinate::new(from.x, from.y, z)).collect();
    if from.z > to_z {
        points.reverse();
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn encounter_detects_head_on_collision() {
        let a = Coordinate::new(1, 1, 1);
        let b = Coordinate::new(2, 1, 1);
        assert!(encounter(a, b, b, a));
    }

    #[test]
    fn encounter_detects_same_cell_collision() {
        let a = Coordinate::new(0, 0, 0);
        let b = Coordinate::new(5, 5, 0);
        let next = Coordinate::new(1, 0, 0);
        assert!(encounter(a, next, b, next));
    }

    #[test]
    fn encounter_allows_unrelated_moves() {
        let a = Coordinate::new(0, 0, 0);
        let a_next = Coordinate::new(1, 0, 0);
        let b = Coordinate::new(5, 5, 0);
        let b_next = Coordinate::new(5, 6, 0);
        assert!(!encounter(a, a_next, b, b_next));
    }

    #[test]
    fn encounter_detects_cross_swap_in_shared_rectangle() {
        // A moves east along y=0 while B moves west along y=1: both share
        // column transitions but different rows, no collision.
        let a = Coordinate::new(0, 0, 0);
        let a_next = Coordinate::new(1, 0, 0);
        let b = Coordinate::new(0, 1, 0);
        let b_next = Coordinate::new(1, 1, 0);
        assert!(!encounter(a, a_next, b, b_next));

        // A and B share a row transition, crossing within the same 1x2 cell.
        let a = Coordinate::new(0, 0, 0);
        let a_next = Coordinate::new(0, 1, 0);
        let b = Coordinate::new(1, 0, 0);
        let b_next = Coordinate::new(1, 1, 0);
        assert!(!encounter(a, a_next, b, b_next));
    }

    #[test]
    fn vertical_path_includes_both_endpoints_ascending_and_descending() {
        let up = vertical_path(Coordinate::new(0, 0, 0), 3);
        assert_eq!(up.len(), 4);
        assert_eq!(up[0], Coordinate::new(0, 0, 0));
        assert_eq!(*up.last().unwrap(), Coordinate::new(0, 0, 3));

        let down = vertical_path(Coordinate::new(0, 0, 3), 0);
        assert_eq!(down[0], Coordinate::new(0, 0, 3));
        assert_eq!(*down.last().unwrap(), Coordinate::new(0, 0, 0));
    }

    #[test]
    fn battery_life_is_unbounded_when_unloaded() {
        let agent = Agent::new(
            Uav {
                no: 1,
                loc: Coordinate::new(0, 0, 0),
                goods_no: None,
                uav_type: "light".to_string(),
                status: uav_core::UavStatus::Normal,
                remain_electricity: 50,
                capacity: 100,
                load_weight: 10,
                charge_rate: 5,
            },
            Usage::Normal,
        );
        assert_eq!(agent.battery_life(0), u64::MAX);
        assert_eq!(agent.battery_life(5), 10);
    }
}
