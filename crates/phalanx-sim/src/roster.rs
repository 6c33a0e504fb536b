use std::collections::BTreeMap;

use phalanx_bt::{SoldierStatus, TacticalWorld};
use phalanx_core::{FormationId, SoldierId, Vec2};
use phalanx_formation::Formation;
use phalanx_steer::Movable;

use crate::soldier::Soldier;
use crate::weapon::Arrow;

/// Everything a behavior tree may touch: soldiers, formations and arrows in flight.
///
/// Iteration is in id order so a battle plays out the same way for the same inputs.
#[derive(Debug, Default)]
pub struct Roster {
    pub(crate) soldiers: BTreeMap<SoldierId, Soldier>,
    pub(crate) formations: BTreeMap<FormationId, Formation>,
    pub(crate) arrows: Vec<Arrow>,
}

impl Roster {
    pub fn soldier(&self, id: SoldierId) -> Option<&Soldier> {
        self.soldiers.get(&id)
    }

    pub fn soldiers(&self) -> impl Iterator<Item = &Soldier> + '_ {
        self.soldiers.values()
    }

    pub fn formation(&self, id: FormationId) -> Option<&Formation> {
        self.formations.get(&id)
    }

    pub fn formations(&self) -> impl Iterator<Item = &Formation> + '_ {
        self.formations.values()
    }

    pub fn arrows(&self) -> &[Arrow] {
        &self.arrows
    }

    /// Apply damage; a killing blow releases the soldier's slot on the spot.
    ///
    /// Returns `true` when this hit killed the soldier.
    pub(crate) fn damage(&mut self, id: SoldierId, amount: f32) -> bool {
        let Some(soldier) = self.soldiers.get_mut(&id) else {
            return false;
        };
        if !soldier.take_damage(amount) {
            return false;
        }
        tracing::info!(soldier = %id, army = %soldier.army(), "soldier died");
        self.leave_formation(id);
        true
    }

    /// Take `id` out of its formation, if any. The formation compacts around the gap.
    pub(crate) fn leave_formation(&mut self, id: SoldierId) {
        let Some(soldier) = self.soldiers.get_mut(&id) else {
            return;
        };
        let Some(formation_id) = soldier.formation() else {
            return;
        };
        soldier.leave_formation();
        if let Some(formation) = self.formations.get_mut(&formation_id) {
            formation.remove(id);
        }
    }
}

impl TacticalWorld for Roster {
    fn body(&self, soldier: SoldierId) -> Option<&Movable> {
        self.soldiers.get(&soldier).map(|s| &s.body)
    }

    fn body_mut(&mut self, soldier: SoldierId) -> Option<&mut Movable> {
        self.soldiers.get_mut(&soldier).map(|s| &mut s.body)
    }

    fn status(&self, soldier: SoldierId) -> Option<SoldierStatus> {
        self.soldiers.get(&soldier).map(Soldier::status)
    }

    fn attack(&mut self, soldier: SoldierId) -> bool {
        let Some(s) = self.soldiers.get_mut(&soldier) else {
            return false;
        };
        let (started, arrow) = s.attack();
        if let Some(arrow) = arrow {
            tracing::trace!(soldier = %soldier, "arrow loosed");
            self.arrows.push(arrow);
        }
        started
    }

    fn slot_position(&self, soldier: SoldierId) -> Option<Vec2> {
        let formation = self.soldiers.get(&soldier)?.formation()?;
        self.formations.get(&formation)?.slot_position(soldier)
    }
}
