use phalanx_core::{ArmyId, FormationId, SoldierId, Vec2};
use phalanx_steer::{aim, arrive, AimRadii, ArriveRadii, Movable, Steerable};

use crate::slot::{Occupant, Slot, SlotCosts};
use crate::template::FormationTemplate;

/// What a formation needs from a soldier when it joins.
pub trait FormationMember {
    fn member_id(&self) -> SoldierId;

    fn slot_costs(&self) -> SlotCosts;

    /// Record membership on the soldier's side.
    fn join_formation(&mut self, formation: FormationId, army: ArmyId);

    /// Teleport to `position` (the assigned slot's world position).
    fn snap_to(&mut self, position: Vec2);
}

/// A moving anchor plus typed slots around it.
///
/// A soldier holds at most one slot here; the host keeps a soldier out of two formations at once.
#[derive(Debug, Clone)]
pub struct Formation {
    id: FormationId,
    army: ArmyId,
    /// Follows the army waypoint (plus [`army_offset`](Formation::army_offset)).
    pub anchor: Movable,
    army_offset: Vec2,
    slots: Vec<Slot>,
    valid: bool,
}

impl Formation {
    pub fn new(id: FormationId, army: ArmyId, slots: Vec<Slot>) -> Self {
        Self {
            id,
            army,
            anchor: Movable::default(),
            army_offset: Vec2::ZERO,
            slots,
            valid: true,
        }
    }

    pub fn from_template(id: FormationId, army: ArmyId, template: &FormationTemplate) -> Self {
        let slots = template
            .slots()
            .iter()
            .map(|spec| Slot::new(spec.slot_type, spec.offset))
            .collect();
        Self::new(id, army, slots)
    }

    pub fn with_anchor(mut self, anchor: Movable) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_army_offset(mut self, offset: Vec2) -> Self {
        self.army_offset = offset;
        self
    }

    pub fn id(&self) -> FormationId {
        self.id
    }

    pub fn army(&self) -> ArmyId {
        self.army
    }

    pub fn army_offset(&self) -> Vec2 {
        self.army_offset
    }

    pub fn set_army_offset(&mut self, offset: Vec2) {
        self.army_offset = offset;
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Mark the formation (in)valid. While invalid, slot positions are unavailable.
    pub fn set_valid(&mut self, valid: bool) {
        self.valid = valid;
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_free()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|s| !s.is_free())
    }

    pub fn vacancies(&self) -> usize {
        self.slots.iter().filter(|s| s.is_free()).count()
    }

    /// Members in slot order.
    pub fn members(&self) -> impl Iterator<Item = SoldierId> + '_ {
        self.slots
            .iter()
            .filter_map(|s| s.occupant.map(|o| o.id))
    }

    pub fn contains(&self, soldier: SoldierId) -> bool {
        self.slot_of(soldier).is_some()
    }

    /// Index of the slot `soldier` holds.
    pub fn slot_of(&self, soldier: SoldierId) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.occupant.is_some_and(|o| o.id == soldier))
    }

    /// World position of `soldier`'s slot. `None` if it holds no slot or the formation is invalid.
    pub fn slot_position(&self, soldier: SoldierId) -> Option<Vec2> {
        if !self.valid {
            return None;
        }
        self.slot_of(soldier)
            .map(|index| self.anchor.position + self.slots[index].offset)
    }

    /// Place `member` in the cheapest free slot (first one on equal cost).
    ///
    /// Returns `false` and leaves the member untouched when no slot is free or the member is
    /// already here.
    pub fn add<M>(&mut self, member: &mut M, snap: bool) -> bool
    where
        M: FormationMember + ?Sized,
    {
        let id = member.member_id();
        if self.contains(id) {
            return false;
        }
        let Some(index) = self.place(Occupant {
            id,
            costs: member.slot_costs(),
        }) else {
            tracing::debug!(formation = %self.id, soldier = %id, "no free slot");
            return false;
        };

        member.join_formation(self.id, self.army);
        if snap {
            member.snap_to(self.anchor.position + self.slots[index].offset);
        }
        tracing::trace!(formation = %self.id, soldier = %id, slot = index, "joined formation");
        true
    }

    /// Free `soldier`'s slot and redistribute the remaining members.
    pub fn remove(&mut self, soldier: SoldierId) -> bool {
        let Some(index) = self.slot_of(soldier) else {
            return false;
        };
        self.slots[index].occupant = None;
        self.reassign();
        true
    }

    /// Clear every slot and re-place all members in id order, without moving them.
    ///
    /// The result depends only on the set of members and their costs, never on where they stood.
    pub fn reassign(&mut self) {
        let mut occupants: Vec<Occupant> = self
            .slots
            .iter_mut()
            .filter_map(|s| s.occupant.take())
            .collect();
        occupants.sort_by_key(|o| o.id);

        for occupant in occupants {
            // Everyone fit before the slots were cleared, so everyone fits again.
            if self.place(occupant).is_none() {
                tracing::warn!(formation = %self.id, soldier = %occupant.id, "lost slot during reassignment");
            }
        }
        tracing::debug!(formation = %self.id, members = self.len(), "reassigned slots");
    }

    /// Empty the formation, returning the former members in id order.
    pub fn release_all(&mut self) -> Vec<SoldierId> {
        let mut released: Vec<SoldierId> = self
            .slots
            .iter_mut()
            .filter_map(|s| s.occupant.take().map(|o| o.id))
            .collect();
        released.sort();
        released
    }

    /// Steer the anchor toward the army waypoint and integrate it.
    pub fn follow(&mut self, army_waypoint: Vec2, dt_seconds: f32) {
        let destination = army_waypoint + self.army_offset;
        self.anchor.reset_steering();
        arrive(&mut self.anchor, destination, ArriveRadii::WAYPOINT, false);
        if self.anchor.distance_to(destination) > ArriveRadii::WAYPOINT.stop {
            aim(&mut self.anchor, destination, AimRadii::WAYPOINT);
        }
        self.anchor.apply(dt_seconds);
    }

    fn place(&mut self, occupant: Occupant) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;
        for (index, slot) in self.slots.iter().enumerate() {
            let Some(cost) = slot.score(&occupant.costs) else {
                continue;
            };
            if best.map_or(true, |(_, c)| cost < c) {
                best = Some((index, cost));
            }
        }
        let (index, _) = best?;
        self.slots[index].occupant = Some(occupant);
        Some(index)
    }
}

impl Steerable for Formation {
    fn movable(&self) -> &Movable {
        &self.anchor
    }

    fn movable_mut(&mut self) -> &mut Movable {
        &mut self.anchor
    }
}
