#![allow(dead_code)]

use std::collections::BTreeMap;

use phalanx_bt::{SoldierStatus, TacticalWorld, TraceLog, ARMIES, SOLDIERS, TRACE_LOG};
use phalanx_core::{ArmyId, Blackboard, SoldierId, Vec2};
use phalanx_steer::{Movable, SteeringLimits};

#[derive(Debug)]
pub struct TestSoldier {
    pub army: ArmyId,
    pub body: Movable,
    pub status: SoldierStatus,
    pub slot: Option<Vec2>,
    pub attacks: u32,
}

#[derive(Debug, Default)]
pub struct TestWorld {
    pub soldiers: BTreeMap<SoldierId, TestSoldier>,
    pub armies: BTreeMap<ArmyId, Vec2>,
}

pub fn status() -> SoldierStatus {
    SoldierStatus {
        alive: true,
        radius: 10.0,
        sight_range: 300.0,
        attack_range: 30.0,
        flee_range: 100.0,
    }
}

impl TestWorld {
    pub fn spawn(&mut self, id: u64, army: u32, position: Vec2) -> SoldierId {
        let id = SoldierId(id);
        let limits = SteeringLimits::new(80.0, 300.0).with_accel(1000.0, 1000.0);
        self.soldiers.insert(
            id,
            TestSoldier {
                army: ArmyId(army),
                body: Movable::new(limits).at(position, 0.0),
                status: status(),
                slot: None,
                attacks: 0,
            },
        );
        id
    }

    pub fn kill(&mut self, id: SoldierId) {
        if let Some(s) = self.soldiers.get_mut(&id) {
            s.status.alive = false;
        }
    }

    pub fn soldier(&self, id: SoldierId) -> &TestSoldier {
        &self.soldiers[&id]
    }

    pub fn soldier_mut(&mut self, id: SoldierId) -> &mut TestSoldier {
        self.soldiers.get_mut(&id).unwrap()
    }

    /// Fill the registry partitions the way a host does at the start of a tick.
    pub fn refresh(&self, bb: &mut Blackboard) {
        let soldiers = self
            .soldiers
            .iter()
            .filter(|(_, s)| s.status.alive)
            .map(|(id, s)| (*id, s.army))
            .collect();
        bb.replace(SOLDIERS, soldiers);
        bb.replace(ARMIES, self.armies.clone());
    }
}

impl TacticalWorld for TestWorld {
    fn body(&self, soldier: SoldierId) -> Option<&Movable> {
        self.soldiers.get(&soldier).map(|s| &s.body)
    }

    fn body_mut(&mut self, soldier: SoldierId) -> Option<&mut Movable> {
        self.soldiers.get_mut(&soldier).map(|s| &mut s.body)
    }

    fn status(&self, soldier: SoldierId) -> Option<SoldierStatus> {
        self.soldiers.get(&soldier).map(|s| s.status)
    }

    fn attack(&mut self, soldier: SoldierId) -> bool {
        match self.soldiers.get_mut(&soldier) {
            Some(s) => {
                s.attacks += 1;
                true
            }
            None => false,
        }
    }

    fn slot_position(&self, soldier: SoldierId) -> Option<Vec2> {
        self.soldiers.get(&soldier).and_then(|s| s.slot)
    }
}

pub fn traced_blackboard() -> Blackboard {
    let mut bb = Blackboard::new();
    bb.set(TRACE_LOG, TraceLog::default());
    bb
}

pub fn trace(bb: &Blackboard) -> &TraceLog {
    bb.get(TRACE_LOG).unwrap()
}
