use phalanx_core::{SoldierId, Vec2};
use phalanx_steer::Movable;

/// Per-soldier values leaves need besides kinematics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoldierStatus {
    pub alive: bool,
    pub radius: f32,
    pub sight_range: f32,
    pub attack_range: f32,
    pub flee_range: f32,
}

/// The host's view of its soldiers, as seen from inside a tree evaluation.
///
/// Reads are live: a soldier already integrated this tick reports its new position, the rest still
/// report last tick's.
pub trait TacticalWorld {
    fn body(&self, soldier: SoldierId) -> Option<&Movable>;

    fn body_mut(&mut self, soldier: SoldierId) -> Option<&mut Movable>;

    fn status(&self, soldier: SoldierId) -> Option<SoldierStatus>;

    /// Trigger the soldier's weapon. Returns `false` when the soldier has no usable weapon.
    fn attack(&mut self, soldier: SoldierId) -> bool;

    /// World position of the soldier's formation slot, if it holds one and the formation is valid.
    fn slot_position(&self, soldier: SoldierId) -> Option<Vec2>;
}
