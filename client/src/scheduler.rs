//! The per-tick orchestration pipeline: reconcile server state, assign
//! tasks, generate next-steps, resolve collisions, update batteries, decide
//! purchases, and package the outgoing command.

use std::collections::BTreeSet;
use std::time::Instant;

use rand::Rng;
use uav_core::{
    manhattan, Coordinate, Goods, GoodsState, ProtocolError, PurchaseOut, ServerFrame, TaskType, Uav, UavInfoOut,
    UavStatus, UavWire, Usage, WorldModel,
};

use crate::agent::{encounter, Agent, DetourMode};
use crate::store::{TickStore, UNASSIGNED_ATTACKER};

/// Statistics surfaced to `main` for the end-of-match summary the original's
/// `main.py` prints (`time_out_count`, mean/max tick time).
#[derive(Debug, Default, Clone, Copy)]
pub struct TickStats {
    pub timed_out: bool,
}

pub struct TickOutput {
    pub uav_info: Vec<UavInfoOut>,
    pub purchase: Vec<PurchaseOut>,
    pub stats: TickStats,
}

pub struct Scheduler {
    pub store: TickStore,
}

impl Scheduler {
    pub fn new(world: &WorldModel) -> Self {
        Self { store: TickStore::new(world) }
    }

    /// Runs the full 10-phase pipeline for one server frame.
    pub fn tick(
        &mut self,
        world: &WorldModel,
        frame: &ServerFrame,
        rng: &mut impl Rng,
        deadline: Instant,
    ) -> Result<TickOutput, ProtocolError> {
        let goods_to_carry: BTreeSet<u32> = frame
            .goods
            .iter()
            .filter(|g| g.status == 0)
            .map(|g| g.no)
            .collect();

        self.reconcile(world, frame, &goods_to_carry)?;
        self.purge_attack_bookkeeping(frame);

        let mut goods_to_arrange = goods_to_carry.clone();
        self.assign_cargo(world, frame, &mut goods_to_arrange, rng);

        let mut stats = TickStats::default();
        if Instant::now() >= deadline {
            stats.timed_out = true;
            tracing::warn!("tick deadline exceeded after cargo assignment, skipping reassignment phases");
        } else {
            self.idle_scatter(world, frame, rng);
            self.attack_assignment(world, frame, rng);
        }

        self.generate_next_steps(world, rng);
        self.resolve_collisions(world);
        self.update_batteries(world);

        let purchase = self.purchase(world, frame);
        let uav_info = self.emit();

        Ok(TickOutput { uav_info, purchase, stats })
    }

    /// Phase 1: create/update agents from the server frame, drop crashed or
    /// vanished UAVs, and reset agents whose cargo is no longer carriable.
    fn reconcile(
        &mut self,
        world: &WorldModel,
        frame: &ServerFrame,
        goods_to_carry: &BTreeSet<u32>,
    ) -> Result<(), ProtocolError> {
        let mut seen = BTreeSet::new();
        for wire in &frame.uav_we {
            let uav = Uav::try_from(wire)?;
            seen.insert(uav.no);

            if uav.status == UavStatus::Crashed {
                self.store.agents.remove(&uav.no);
                continue;
            }

            let price = world.uav_prices.get(&uav.uav_type).cloned();
            let agent = self
                .store
                .agents
                .entry(uav.no)
                .or_insert_with(|| Agent::new(uav.clone(), Usage::Normal));

            if agent.task_type == TaskType::ToGoodsStart {
                let stale = agent.goods.as_ref().is_some_and(|g| !goods_to_carry.contains(&g.no));
                if stale {
                    agent.reset();
                }
            }

            if let Some(price) = price {
                agent.update_uav_info(uav, &price);
            } else {
                agent.uav = uav;
            }
        }

        self.store.agents.retain(|no, _| seen.contains(no));
        Ok(())
    }

    /// Phase 2: drop attack-bookkeeping entries whose goods vanished, and
    /// mark an entry unassigned if its attacker itself vanished.
    fn purge_attack_bookkeeping(&mut self, frame: &ServerFrame) {
        let live_goods: BTreeSet<u32> = frame.goods.iter().map(|g| g.no).collect();
        let stale: Vec<u32> = self
            .store
            .goods_to_attack
            .keys()
            .copied()
            .filter(|no| !live_goods.contains(no))
            .collect();

        for goods_no in stale {
            let attacker = self.store.goods_to_attack.remove(&goods_no).unwrap();
            if attacker > 0 {
                if let Some(agent) = self.store.agents.get_mut(&(attacker as u32)) {
                    agent.reset();
                }
            }
        }

        let live_attackers: BTreeSet<u32> = frame.uav_we.iter().map(|u| u.no).collect();
        for attacker in self.store.goods_to_attack.values_mut() {
            if *attacker > 0 && !live_attackers.contains(&(*attacker as u32)) {
                *attacker = UNASSIGNED_ATTACKER;
            }
        }
    }

    /// Phase 3: greedily match free/fetching agents to the most valuable
    /// reachable, affordable, on-time goods still in the pool.
    fn assign_cargo(
        &mut self,
        world: &WorldModel,
        frame: &ServerFrame,
        goods_to_arrange: &mut BTreeSet<u32>,
        rng: &mut impl Rng,
    ) {
        let goods_by_no: std::collections::BTreeMap<u32, Goods> = frame
            .goods
            .iter()
            .filter_map(|g| Goods::try_from(g).ok().map(|goods| (goods.no, goods)))
            .collect();
        let enemies: Vec<Coordinate> = frame.uav_enemy.iter().map(|w| Coordinate::new(w.x, w.y, w.z)).collect();

        let TickStore { agents, jps_finders, goods_to_attack, .. } = &mut self.store;

        for (_no, agent) in agents.iter_mut() {
            if agent.task_type == TaskType::ToGoodsEnd || agent.task_type == TaskType::AttackEnemy {
                continue;
            }

            let mut best: Option<&Goods> = None;
            let mut best_earnings = 0.0_f64;
            for goods_no in goods_to_arrange.iter() {
                let Some(goods) = goods_by_no.get(goods_no) else { continue };
                let earnings = estimate_goods_earnings(agent, world, goods, &enemies, goods_to_attack);
                if earnings > best_earnings {
                    best = Some(goods);
                    best_earnings = earnings;
                }
            }

            let Some(best) = best.cloned() else { continue };
            goods_to_arrange.remove(&best.no);

            let unchanged =
                agent.task_type == TaskType::ToGoodsStart && agent.goods.as_ref().is_some_and(|g| g.no == best.no);
            if unchanged {
                continue;
            }

            let start = agent.uav.loc;
            let dest = best.start;
            if agent
                .plan(world, jps_finders, start, dest, TaskType::ToGoodsStart, Some(best), rng)
                .is_err()
            {
                tracing::debug!(agent = agent.uav.no, "cargo plan unreachable, leaving agent idle");
            }
        }
    }

    /// Phase 4: scatter idle agents to random valid ground cells, unless a
    /// UAV is currently approaching the depot to charge.
    fn idle_scatter(&mut self, world: &WorldModel, _frame: &ServerFrame, rng: &mut impl Rng) {
        if !self.store.charge_approaching.is_empty() {
            return;
        }

        let TickStore { agents, jps_finders, .. } = &mut self.store;
        for (_no, agent) in agents.iter_mut() {
            if agent.task_type != TaskType::NoTask {
                continue;
            }
            let eligible = agent.usage == Usage::Attack || agent.uav.full_charged();
            if !eligible {
                continue;
            }
            let point = random_ground_point(world, rng);
            let start = agent.uav.loc;
            if agent.plan(world, jps_finders, start, point, TaskType::ToRandomPoint, None, rng).is_err() {
                tracing::debug!(agent = agent.uav.no, "idle-scatter plan unreachable");
            }
        }
    }

    /// Phase 5: release attackers whose target is done, then pair idle
    /// agents with reachable, valuable, unassigned enemies.
    fn attack_assignment(&mut self, world: &WorldModel, frame: &ServerFrame, rng: &mut impl Rng) {
        let threshold_x2 = world.map_range.x + world.map_range.y;

        let enemy_by_no: std::collections::BTreeMap<u32, &UavWire> =
            frame.uav_enemy.iter().map(|w| (w.no, w)).collect();
        let goods_by_no: std::collections::BTreeMap<u32, Goods> = frame
            .goods
            .iter()
            .filter_map(|g| Goods::try_from(g).ok().map(|goods| (goods.no, goods)))
            .collect();

        let TickStore { agents, jps_finders, attacker_to_enemy, .. } = &mut self.store;

        let done_attackers: Vec<u32> = attacker_to_enemy
            .iter()
            .filter(|(_, &enemy_no)| is_enemy_done(enemy_no, &enemy_by_no))
            .map(|(&attacker, _)| attacker)
            .collect();
        for attacker in done_attackers {
            attacker_to_enemy.remove(&attacker);
            if let Some(agent) = agents.get_mut(&attacker) {
                agent.task_type = TaskType::NoTask;
                agent.task_priority = TaskType::NoTask.priority();
                agent.attack_target = None;
            }
        }

        for (&agent_no, agent) in agents.iter_mut() {
            if agent.task_type != TaskType::NoTask && agent.task_type != TaskType::ToRandomPoint {
                continue;
            }
            for (&enemy_no, enemy) in &enemy_by_no {
                if attacker_to_enemy.values().any(|&e| e == enemy_no) {
                    continue;
                }
                if enemy.status != 0 {
                    continue;
                }
                if enemy.goods_no < 0 {
                    continue;
                }
                let Some(goods) = goods_by_no.get(&(enemy.goods_no as u32)) else { continue };
                let enemy_loc = Coordinate::new(enemy.x, enemy.y, enemy.z);
                if goods.left_time as u32 <= manhattan_3d_via(enemy_loc, goods.end, world.h_low) {
                    continue;
                }

                let end = Coordinate::new(goods.end.x, goods.end.y, world.h_low);
                let near = manhattan(&agent.uav.loc, &end) * 2 <= threshold_x2;
                let our_dist = manhattan_3d_via(agent.uav.loc, end, world.h_low);
                let enemy_dist = manhattan_3d_via(enemy_loc, Coordinate::new(end.x, end.y, 0), world.h_low);
                if near && our_dist < enemy_dist {
                    attacker_to_enemy.insert(agent_no, enemy_no);
                    agent.attack_target = Some(enemy_no);
                    let start = agent.uav.loc;
                    if agent.plan(world, jps_finders, start, end, TaskType::AttackEnemy, None, rng).is_err() {
                        tracing::debug!(agent = agent_no, "attack plan unreachable, leaving assignment best-effort");
                    }
                }
            }
        }
    }

    /// Phase 6: each agent advances its cursor or reacts to arrival.
    fn generate_next_steps(&mut self, world: &WorldModel, rng: &mut impl Rng) {
        let TickStore { agents, jps_finders, .. } = &mut self.store;
        for agent in agents.values_mut() {
            agent.gen_next_step(world, jps_finders, rng);
        }
    }

    /// Phase 7: pairwise collision resolution with repeated sweeps, falling
    /// back to `backspace` for anything still conflicting past the cap.
    fn resolve_collisions(&mut self, world: &WorldModel) {
        let nos: Vec<u32> = self.store.agents.keys().copied().collect();
        if nos.len() < 2 {
            return;
        }
        let cap = nos.len();

        for _ in 0..cap {
            let snapshot: Vec<(u32, Coordinate, Coordinate)> = nos
                .iter()
                .map(|&no| {
                    let a = &self.store.agents[&no];
                    (no, a.uav.loc, a.next_step)
                })
                .collect();

            let mut any_conflict = false;
            let mut loser_this_sweep: Option<u32> = None;
            'pairs: for i in 0..nos.len() {
                for j in (i + 1)..nos.len() {
                    let (no_a, loc_a, next_a) = snapshot[i];
                    let (no_b, loc_b, next_b) = snapshot[j];
                    if next_a == world.parking || next_b == world.parking {
                        continue;
                    }
                    if !encounter(loc_a, next_a, loc_b, next_b) {
                        continue;
                    }
                    any_conflict = true;
                    let a = &self.store.agents[&no_a];
                    let b = &self.store.agents[&no_b];
                    loser_this_sweep = Some(select_detourer(no_a, a, no_b, b));
                    break 'pairs;
                }
            }

            let Some(loser) = loser_this_sweep else { break };
            if !any_conflict {
                break;
            }

            let others: Vec<(Coordinate, Coordinate)> =
                self.store.agents.values().map(|a| (a.uav.loc, a.next_step)).collect();
            if let Some(agent) = self.store.agents.get_mut(&loser) {
                agent.take_detour(&others, world, DetourMode::Auto);
            }
        }

        // Anything still conflicting after the sweep cap backs off entirely.
        loop {
            let snapshot: Vec<(u32, Coordinate, Coordinate)> = nos
                .iter()
                .map(|&no| {
                    let a = &self.store.agents[&no];
                    (no, a.uav.loc, a.next_step)
                })
                .collect();
            let mut conflicted = BTreeSet::new();
            for i in 0..snapshot.len() {
                for j in (i + 1)..snapshot.len() {
                    let (no_a, loc_a, next_a) = snapshot[i];
                    let (no_b, loc_b, next_b) = snapshot[j];
                    if next_a == world.parking || next_b == world.parking {
                        continue;
                    }
                    if encounter(loc_a, next_a, loc_b, next_b) {
                        conflicted.insert(no_a);
                        conflicted.insert(no_b);
                    }
                }
            }
            if conflicted.is_empty() {
                break;
            }
            for no in &conflicted {
                if let Some(agent) = self.store.agents.get_mut(no) {
                    agent.backspace();
                }
            }
            // backspace is terminal for this tick: one more check to confirm,
            // then stop regardless of outcome to avoid looping forever on a
            // pathological all-parked fleet.
            break;
        }
    }

    /// Phase 8: battery accounting for every agent's staged move.
    fn update_batteries(&mut self, world: &WorldModel) {
        for agent in self.store.agents.values_mut() {
            agent.update_electricity(world);
        }
    }

    /// Phase 9: always buy the single cheapest UAV type we can afford.
    fn purchase(&self, world: &WorldModel, frame: &ServerFrame) -> Vec<PurchaseOut> {
        let Some(cheapest_type) = world.price_order().first() else { return Vec::new() };
        let Some(price) = world.uav_prices.get(cheapest_type) else { return Vec::new() };
        if frame.we_value > price.value as i64 {
            vec![PurchaseOut { purchase: price.uav_type.clone() }]
        } else {
            Vec::new()
        }
    }

    /// Phase 10: package every agent's staged move for the outgoing frame.
    fn emit(&self) -> Vec<UavInfoOut> {
        self.store
            .agents
            .values()
            .map(|a| UavInfoOut {
                no: a.uav.no,
                x: a.next_step.x,
                y: a.next_step.y,
                z: a.next_step.z,
                goods_no: a.uav.goods_no.map(|n| n as i64).unwrap_or(-1),
                remain_electricity: a.uav.remain_electricity,
            })
            .collect()
    }
}

fn manhattan_3d_via(a: Coordinate, b: Coordinate, h_low: u32) -> u32 {
    manhattan(&a, &b) + a.z.abs_diff(h_low) + b.z.abs_diff(h_low)
}

fn estimate_goods_earnings(
    agent: &Agent,
    world: &WorldModel,
    goods: &Goods,
    enemies: &[Coordinate],
    goods_to_attack: &mut std::collections::BTreeMap<u32, i64>,
) -> f64 {
    let dist = agent.diagonal_estimate(world, agent.uav.loc, goods.start);
    let feasible = goods.weight <= agent.uav.load_weight
        && dist < goods.left_time
        && agent.battery_enough(world, goods.weight, goods.start, goods.end);
    if !feasible {
        return 0.0;
    }

    if goods.state == GoodsState::Carried {
        goods_to_attack.entry(goods.no).or_insert(UNASSIGNED_ATTACKER);
        return 0.0;
    }
    if enemies.iter().any(|e| e.xy_equal(&goods.start)) {
        goods_to_attack.entry(goods.no).or_insert(UNASSIGNED_ATTACKER);
        return 0.0;
    }

    agent.estimate_earnings(world, goods)
}

fn random_ground_point(world: &WorldModel, rng: &mut impl Rng) -> Coordinate {
    loop {
        let x = rng.gen_range(0..=world.map_range.x);
        let y = rng.gen_range(0..=world.map_range.y);
        let candidate = Coordinate::new(x, y, world.h_low);
        if !world.is_building_at(x, y, world.h_low) {
            return candidate;
        }
    }
}

fn is_enemy_done(enemy_no: u32, enemy_by_no: &std::collections::BTreeMap<u32, &UavWire>) -> bool {
    match enemy_by_no.get(&enemy_no) {
        None => true,
        Some(w) => w.status == 1 || w.goods_no < 0,
    }
}

/// Returns the `no` of the agent that should detour: the lower task
/// priority, ties broken by goods value (the lower-value fetcher yields).
fn select_detourer(no_a: u32, a: &Agent, no_b: u32, b: &Agent) -> u32 {
    if a.task_priority == b.task_priority && a.task_type == TaskType::ToGoodsStart {
        let value_a = a.goods.as_ref().map(|g| g.value).unwrap_or(0);
        let value_b = b.goods.as_ref().map(|g| g.value).unwrap_or(0);
        return if value_a > value_b { no_b } else { no_a };
    }
    if a.task_priority < b.task_priority {
        no_a
    } else {
        no_b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeMap;
    use uav_core::{BoundingBox, GoodsWire, UavPrice, UavWire};

    fn small_world() -> WorldModel {
        let mut prices = BTreeMap::new();
        prices.insert(
            "light".to_string(),
            UavPrice { uav_type: "light".to_string(), load_weight: 20, value: 600, capacity: 100, charge_rate: 10 },
        );
        prices.insert(
            "mid".to_string(),
            UavPrice { uav_type: "mid".to_string(), load_weight: 40, value: 800, capacity: 150, charge_rate: 10 },
        );
        prices.insert(
            "heavy".to_string(),
            UavPrice { uav_type: "heavy".to_string(), load_weight: 80, value: 1500, capacity: 200, charge_rate: 10 },
        );
        WorldModel::new(
            Coordinate::new(19, 19, 5),
            Coordinate::new(0, 0, 0),
            0,
            4,
            vec![BoundingBox::new(10, 10, 10, 10, 0, 1)],
            vec![],
            prices,
        )
    }

    fn uav_wire(no: u32, x: u32, y: u32, z: u32) -> UavWire {
        UavWire { no, x, y, z, goods_no: -1, uav_type: "light".to_string(), status: 0, remain_electricity: 100 }
    }

    fn frame_with(uav_we: Vec<UavWire>, goods: Vec<GoodsWire>) -> ServerFrame {
        ServerFrame {
            token: "t".to_string(),
            notice: None,
            match_status: 0,
            time: 1,
            uav_we,
            we_value: 1200,
            uav_enemy: vec![],
            enemy_value: 0,
            goods,
        }
    }

    #[test]
    fn purchase_buys_cheapest_affordable_type_and_only_one() {
        let world = small_world();
        let frame = frame_with(vec![uav_wire(1, 0, 0, 0)], vec![]);
        let mut scheduler = Scheduler::new(&world);
        let mut rng = StdRng::seed_from_u64(1);
        let out = scheduler.tick(&world, &frame, &mut rng, Instant::now() + std::time::Duration::from_secs(1)).unwrap();
        assert_eq!(out.purchase.len(), 1);
        assert_eq!(out.purchase[0].purchase, "light");
    }

    #[test]
    fn purchase_empty_when_we_value_too_low() {
        let world = small_world();
        let mut frame = frame_with(vec![uav_wire(1, 0, 0, 0)], vec![]);
        frame.we_value = 100;
        let mut scheduler = Scheduler::new(&world);
        let mut rng = StdRng::seed_from_u64(1);
        let out = scheduler.tick(&world, &frame, &mut rng, Instant::now() + std::time::Duration::from_secs(1)).unwrap();
        assert!(out.purchase.is_empty());
    }

    #[test]
    fn crashed_uav_is_dropped_from_the_store() {
        let world = small_world();
        let mut scheduler = Scheduler::new(&world);
        let mut rng = StdRng::seed_from_u64(1);
        let frame1 = frame_with(vec![uav_wire(1, 0, 0, 0)], vec![]);
        scheduler.tick(&world, &frame1, &mut rng, Instant::now() + std::time::Duration::from_secs(1)).unwrap();
        assert!(scheduler.store.agents.contains_key(&1));

        let mut crashed = uav_wire(1, 0, 0, 0);
        crashed.status = 1;
        let frame2 = frame_with(vec![crashed], vec![]);
        scheduler.tick(&world, &frame2, &mut rng, Instant::now() + std::time::Duration::from_secs(1)).unwrap();
        assert!(!scheduler.store.agents.contains_key(&1));
    }

    #[test]
    fn swap_collision_is_resolved_by_detouring_the_lower_priority_agent() {
        let world = small_world();
        let mut scheduler = Scheduler::new(&world);
        scheduler.store.agents.insert(
            1,
            Agent::new(
                Uav {
                    no: 1,
                    loc: Coordinate::new(1, 1, 1),
                    goods_no: None,
                    uav_type: "light".to_string(),
                    status: UavStatus::Normal,
                    remain_electricity: 100,
                    capacity: 100,
                    load_weight: 20,
                    charge_rate: 10,
                },
                Usage::Normal,
            ),
        );
        scheduler.store.agents.insert(
            2,
            Agent::new(
                Uav {
                    no: 2,
                    loc: Coordinate::new(2, 1, 1),
                    goods_no: None,
                    uav_type: "light".to_string(),
                    status: UavStatus::Normal,
                    remain_electricity: 100,
                    capacity: 100,
                    load_weight: 20,
                    charge_rate: 10,
                },
                Usage::Normal,
            ),
        );
        scheduler.store.agents.get_mut(&1).unwrap().next_step = Coordinate::new(2, 1, 1);
        scheduler.store.agents.get_mut(&2).unwrap().next_step = Coordinate::new(1, 1, 1);

        scheduler.resolve_collisions(&world);

        let a = &scheduler.store.agents[&1];
        let b = &scheduler.store.agents[&2];
        assert!(!encounter(a.uav.loc, a.next_step, b.uav.loc, b.next_step));
    }

    #[test]
    fn battery_infeasible_goods_is_not_assigned() {
        let world = small_world();
        let mut scheduler = Scheduler::new(&world);
        let mut agent = Agent::new(
            Uav {
                no: 1,
                loc: Coordinate::new(0, 0, 0),
                goods_no: None,
                uav_type: "light".to_string(),
                status: UavStatus::Normal,
                remain_electricity: 10,
                capacity: 100,
                load_weight: 20,
                charge_rate: 10,
            },
            Usage::Normal,
        );
        agent.uav.remain_electricity = 10;
        scheduler.store.agents.insert(1, agent);

        let goods = GoodsWire {
            no: 1,
            start_x: 0,
            start_y: 0,
            end_x: 0,
            end_y: 40,
            weight: 3,
            value: 500,
            start_time: 0,
            remain_time: 100,
            left_time: 100,
            status: 0,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let mut pool: BTreeSet<u32> = [1].into_iter().collect();
        let frame = frame_with(vec![], vec![goods]);
        scheduler.assign_cargo(&world, &frame, &mut pool, &mut rng);
        assert_eq!(scheduler.store.agents[&1].task_type, TaskType::NoTask);
    }

    #[test]
    fn two_agents_competing_for_one_goods_never_double_book_it() {
        let world = small_world();
        let mut scheduler = Scheduler::new(&world);
        for no in [1, 2] {
            scheduler.store.agents.insert(
                no,
                Agent::new(
                    Uav {
                        no,
                        loc: Coordinate::new(0, 0, 0),
                        goods_no: None,
                        uav_type: "light".to_string(),
                        status: UavStatus::Normal,
                        remain_electricity: 100,
                        capacity: 100,
                        load_weight: 20,
                        charge_rate: 10,
                    },
                    Usage::Normal,
                ),
            );
        }

        let goods = GoodsWire {
            no: 7,
            start_x: 1,
            start_y: 1,
            end_x: 5,
            end_y: 5,
            weight: 3,
            value: 500,
            start_time: 0,
            remain_time: 100,
            left_time: 100,
            status: 0,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let mut pool: BTreeSet<u32> = [7].into_iter().collect();
        let frame = frame_with(vec![], vec![goods]);
        scheduler.assign_cargo(&world, &frame, &mut pool, &mut rng);

        let holders = scheduler
            .store
            .agents
            .values()
            .filter(|a| a.task_type == TaskType::ToGoodsStart && a.goods.as_ref().is_some_and(|g| g.no == 7))
            .count();
        assert_eq!(holders, 1);
    }
}
