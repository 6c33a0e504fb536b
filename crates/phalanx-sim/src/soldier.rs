use std::sync::Arc;

use phalanx_bt::{BehaviorTree, SoldierStatus};
use phalanx_core::{ArmyId, FormationId, SoldierId, Vec2};
use phalanx_formation::{FormationMember, SlotCosts};
use phalanx_steer::{Movable, Steerable};

use crate::archetype::Archetype;
use crate::weapon::{Arrow, Weapon};

/// One combatant: a body, an archetype, a weapon and a shared behavior tree.
#[derive(Debug, Clone)]
pub struct Soldier {
    id: SoldierId,
    army: ArmyId,
    formation: Option<FormationId>,
    archetype: Arc<Archetype>,
    tree: Arc<BehaviorTree>,
    pub body: Movable,
    weapon: Weapon,
    health: f32,
    cleanup_timer: f32,
}

impl Soldier {
    pub fn new(
        id: SoldierId,
        army: ArmyId,
        archetype: Arc<Archetype>,
        tree: Arc<BehaviorTree>,
        cleanup_seconds: f32,
    ) -> Self {
        Self {
            id,
            army,
            formation: None,
            body: Movable::new(archetype.limits),
            weapon: Weapon::from_spec(&archetype.weapon),
            health: archetype.max_health,
            cleanup_timer: cleanup_seconds,
            archetype,
            tree,
        }
    }

    pub fn id(&self) -> SoldierId {
        self.id
    }

    pub fn army(&self) -> ArmyId {
        self.army
    }

    pub fn formation(&self) -> Option<FormationId> {
        self.formation
    }

    pub(crate) fn leave_formation(&mut self) {
        self.formation = None;
    }

    pub fn archetype(&self) -> &Arc<Archetype> {
        &self.archetype
    }

    pub fn tree(&self) -> &Arc<BehaviorTree> {
        &self.tree
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.archetype.max_health
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn status(&self) -> SoldierStatus {
        SoldierStatus {
            alive: self.is_alive(),
            radius: self.archetype.radius,
            sight_range: self.archetype.sight_range,
            attack_range: self.archetype.weapon.attack_range(),
            flee_range: self.archetype.flee_range,
        }
    }

    /// Swing or loose. Roots the soldier for the weapon's stationary time when the attack starts.
    ///
    /// Returns whether an attack started, plus the arrow a bow looses.
    pub fn attack(&mut self) -> (bool, Option<Arrow>) {
        if !self.is_alive() || !self.weapon.activate() {
            return (false, None);
        }
        self.body.hold_for(self.archetype.weapon.stationary_time());
        let arrow = self
            .weapon
            .arrow(self.id, self.army, self.body.position, self.body.facing);
        (true, arrow)
    }

    /// Returns `true` when this hit killed the soldier.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health = (self.health - amount.max(0.0)).max(0.0);
        !self.is_alive()
    }

    pub fn heal(&mut self, amount: f32) {
        if self.is_alive() {
            self.health = (self.health + amount.max(0.0)).min(self.archetype.max_health);
        }
    }

    /// Dead for longer than the cleanup delay.
    pub fn needs_removal(&self) -> bool {
        !self.is_alive() && self.cleanup_timer <= 0.0
    }

    pub fn cleanup_remaining(&self) -> f32 {
        self.cleanup_timer.max(0.0)
    }

    /// Upkeep for a dead soldier: count down to removal and drop the weapon.
    pub(crate) fn decay(&mut self, dt: f32) {
        self.cleanup_timer -= dt;
        self.weapon.deactivate();
    }

    pub(crate) fn update_weapon(&mut self, dt: f32) {
        self.weapon.update(dt);
    }

    pub(crate) fn end_swing(&mut self) {
        self.weapon.deactivate();
    }

    /// Whether this soldier's active sword swing touches `other`.
    pub fn strikes(&self, other: &Soldier) -> bool {
        match self.weapon.as_sword() {
            Some(sword) => sword.hits_circle(
                self.body.position,
                self.body.facing,
                other.body.position,
                other.archetype.radius,
            ),
            None => false,
        }
    }
}

impl Steerable for Soldier {
    fn movable(&self) -> &Movable {
        &self.body
    }

    fn movable_mut(&mut self) -> &mut Movable {
        &mut self.body
    }
}

impl FormationMember for Soldier {
    fn member_id(&self) -> SoldierId {
        self.id
    }

    fn slot_costs(&self) -> SlotCosts {
        self.archetype.slot_costs
    }

    fn join_formation(&mut self, formation: FormationId, army: ArmyId) {
        self.formation = Some(formation);
        self.army = army;
    }

    fn snap_to(&mut self, position: Vec2) {
        self.body.set_position(position, None);
    }
}
