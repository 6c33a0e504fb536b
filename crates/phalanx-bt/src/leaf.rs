//! Tactical leaf nodes.
//!
//! Leaves read the blackboard and the host world, request steering, and report success. A missing
//! target, waypoint or slot is a plain `false`.

use phalanx_core::{Blackboard, SoldierId, TickContext, Vec2};
use phalanx_steer::{aim, arrive, separate, AimRadii, ArriveRadii, Movable};

use crate::board::{ARMIES, SOLDIERS, TARGET, WAYPOINT};
use crate::world::{SoldierStatus, TacticalWorld};

/// How far off (degrees) a soldier may face and still count as facing its target.
pub const FACING_TOLERANCE_DEG: f32 = 10.0;
/// Soldiers closer than this push each other apart in `SpreadOut`.
pub const SEPARATION_DISTANCE: f32 = 25.0;
/// Strength of the `SpreadOut` push at zero distance.
pub const SEPARATION_STRENGTH: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Leaf {
    ArriveTarget,
    ArriveWaypoint,
    AimTarget,
    AimWaypoint,
    FleeTarget,
    SpreadOut,
    HasTarget,
    TargetInAttackRange,
    FacingTarget,
    TargetInFleeRange,
    TargetEnemy,
    Attack,
    TakeFormationWaypoint,
    TakeArmyWaypoint,
}

impl Leaf {
    pub const ALL: [Leaf; 14] = [
        Leaf::ArriveTarget,
        Leaf::ArriveWaypoint,
        Leaf::AimTarget,
        Leaf::AimWaypoint,
        Leaf::FleeTarget,
        Leaf::SpreadOut,
        Leaf::HasTarget,
        Leaf::TargetInAttackRange,
        Leaf::FacingTarget,
        Leaf::TargetInFleeRange,
        Leaf::TargetEnemy,
        Leaf::Attack,
        Leaf::TakeFormationWaypoint,
        Leaf::TakeArmyWaypoint,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Leaf::ArriveTarget => "ArriveTarget",
            Leaf::ArriveWaypoint => "ArriveWaypoint",
            Leaf::AimTarget => "AimTarget",
            Leaf::AimWaypoint => "AimWaypoint",
            Leaf::FleeTarget => "FleeTarget",
            Leaf::SpreadOut => "SpreadOut",
            Leaf::HasTarget => "HasTarget",
            Leaf::TargetInAttackRange => "TargetInAttackRange",
            Leaf::FacingTarget => "FacingTarget",
            Leaf::TargetInFleeRange => "TargetInFleeRange",
            Leaf::TargetEnemy => "TargetEnemy",
            Leaf::Attack => "Attack",
            Leaf::TakeFormationWaypoint => "TakeFormationWaypoint",
            Leaf::TakeArmyWaypoint => "TakeArmyWaypoint",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|leaf| leaf.name() == name)
    }

    pub fn run<W>(
        self,
        _ctx: &TickContext,
        agent: SoldierId,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> bool
    where
        W: TacticalWorld + ?Sized,
    {
        match self {
            Leaf::ArriveTarget => match live_target(agent, world, blackboard) {
                Some(target) => steer_arrive(world, agent, target, ArriveRadii::ENGAGE, false),
                None => false,
            },
            Leaf::ArriveWaypoint => match blackboard.get_for(WAYPOINT, &agent).copied() {
                Some(waypoint) => steer_arrive(world, agent, waypoint, ArriveRadii::WAYPOINT, false),
                None => false,
            },
            Leaf::AimTarget => match live_target(agent, world, blackboard) {
                Some(target) => steer_aim(world, agent, target, AimRadii::ENGAGE),
                None => false,
            },
            Leaf::AimWaypoint => match blackboard.get_for(WAYPOINT, &agent).copied() {
                Some(waypoint) => steer_aim(world, agent, waypoint, AimRadii::WAYPOINT),
                None => false,
            },
            Leaf::FleeTarget => match live_target(agent, world, blackboard) {
                Some(target) => steer_arrive(world, agent, target, ArriveRadii::FLEE, true),
                None => false,
            },
            Leaf::SpreadOut => spread_out(agent, world, blackboard),
            Leaf::HasTarget => live_target(agent, world, blackboard).is_some(),
            Leaf::TargetInAttackRange => {
                target_check(agent, world, blackboard, |me, target, status| {
                    me.distance_to(target) <= status.attack_range
                })
            }
            Leaf::FacingTarget => target_check(agent, world, blackboard, |me, target, _| {
                me.bearing_to(target).abs() <= FACING_TOLERANCE_DEG
            }),
            Leaf::TargetInFleeRange => {
                target_check(agent, world, blackboard, |me, target, status| {
                    me.distance_to(target) < status.flee_range
                })
            }
            Leaf::TargetEnemy => target_enemy(agent, world, blackboard),
            Leaf::Attack => {
                world.attack(agent);
                true
            }
            Leaf::TakeFormationWaypoint => match world.slot_position(agent) {
                Some(slot) => {
                    blackboard.set_for(WAYPOINT, agent, slot);
                    true
                }
                None => false,
            },
            Leaf::TakeArmyWaypoint => {
                let waypoint = blackboard
                    .get_for(SOLDIERS, &agent)
                    .and_then(|army| blackboard.get_for(ARMIES, army))
                    .copied();
                match waypoint {
                    Some(waypoint) => {
                        blackboard.set_for(WAYPOINT, agent, waypoint);
                        true
                    }
                    None => false,
                }
            }
        }
    }
}

/// Position of the agent's blackboard target, if it is still registered and alive.
fn live_target<W>(agent: SoldierId, world: &W, blackboard: &Blackboard) -> Option<Vec2>
where
    W: TacticalWorld + ?Sized,
{
    let target = *blackboard.get_for(TARGET, &agent)?;
    if !blackboard.contains_for(SOLDIERS, &target) {
        return None;
    }
    if !world.status(target)?.alive {
        return None;
    }
    Some(world.body(target)?.position)
}

fn target_check<W, F>(agent: SoldierId, world: &W, blackboard: &Blackboard, check: F) -> bool
where
    W: TacticalWorld + ?Sized,
    F: FnOnce(&Movable, Vec2, SoldierStatus) -> bool,
{
    let Some(target) = live_target(agent, world, blackboard) else {
        return false;
    };
    let (Some(me), Some(status)) = (world.body(agent), world.status(agent)) else {
        return false;
    };
    check(me, target, status)
}

fn steer_arrive<W>(
    world: &mut W,
    agent: SoldierId,
    destination: Vec2,
    radii: ArriveRadii,
    flee: bool,
) -> bool
where
    W: TacticalWorld + ?Sized,
{
    match world.body_mut(agent) {
        Some(body) => arrive(body, destination, radii, flee),
        None => false,
    }
}

fn steer_aim<W>(world: &mut W, agent: SoldierId, destination: Vec2, radii: AimRadii) -> bool
where
    W: TacticalWorld + ?Sized,
{
    match world.body_mut(agent) {
        Some(body) => aim(body, destination, radii),
        None => false,
    }
}

fn spread_out<W>(agent: SoldierId, world: &mut W, blackboard: &Blackboard) -> bool
where
    W: TacticalWorld + ?Sized,
{
    let neighbors: Vec<Vec2> = blackboard
        .entries(SOLDIERS)
        .filter(|(id, _)| **id != agent)
        .filter(|(id, _)| world.status(**id).is_some_and(|s| s.alive))
        .filter_map(|(id, _)| world.body(*id).map(|b| b.position))
        .collect();

    match world.body_mut(agent) {
        Some(body) => {
            separate(body, neighbors, SEPARATION_DISTANCE, SEPARATION_STRENGTH);
            true
        }
        None => false,
    }
}

/// Pick the nearest living enemy within sight. Ties keep the lowest id.
fn target_enemy<W>(agent: SoldierId, world: &W, blackboard: &mut Blackboard) -> bool
where
    W: TacticalWorld + ?Sized,
{
    let Some(own_army) = blackboard.get_for(SOLDIERS, &agent).copied() else {
        return false;
    };
    let (Some(me), Some(status)) = (world.body(agent), world.status(agent)) else {
        return false;
    };
    let origin = me.position;

    let mut best: Option<(SoldierId, f32)> = None;
    for (&other, &army) in blackboard.entries(SOLDIERS) {
        if other == agent || army == own_army {
            continue;
        }
        if !world.status(other).is_some_and(|s| s.alive) {
            continue;
        }
        let Some(body) = world.body(other) else {
            continue;
        };
        let distance = origin.distance(body.position);
        if distance > status.sight_range {
            continue;
        }
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((other, distance));
        }
    }

    match best {
        Some((enemy, _)) => {
            blackboard.set_for(TARGET, agent, enemy);
            true
        }
        None => {
            blackboard.remove_for(TARGET, &agent);
            false
        }
    }
}
