use phalanx_formation::SlotCosts;
use phalanx_steer::SteeringLimits;
use serde::{Deserialize, Serialize};

use crate::weapon::WeaponSpec;

/// Static configuration shared by every soldier of one kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    /// Filled in from the archetype table key when loaded from config.
    #[serde(default)]
    pub name: String,
    /// Behavior tree definition name.
    pub tree: String,
    #[serde(default)]
    pub limits: SteeringLimits,
    pub max_health: f32,
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default = "default_sight_range")]
    pub sight_range: f32,
    /// Enemies closer than this make the soldier run. Zero never flees.
    #[serde(default)]
    pub flee_range: f32,
    #[serde(default)]
    pub slot_costs: SlotCosts,
    pub weapon: WeaponSpec,
}

fn default_radius() -> f32 {
    10.0
}
fn default_sight_range() -> f32 {
    300.0
}

impl Archetype {
    pub fn swordsperson() -> Self {
        Self {
            name: "swordsperson".to_string(),
            tree: "swordsperson".to_string(),
            limits: SteeringLimits::new(80.0, 300.0),
            max_health: 120.0,
            radius: default_radius(),
            sight_range: default_sight_range(),
            flee_range: 0.0,
            slot_costs: SlotCosts::new(10, 0, 100),
            weapon: WeaponSpec::sword(),
        }
    }

    pub fn archer() -> Self {
        Self {
            name: "archer".to_string(),
            tree: "archer".to_string(),
            limits: SteeringLimits::new(80.0, 300.0),
            max_health: 60.0,
            radius: default_radius(),
            sight_range: default_sight_range(),
            flee_range: 100.0,
            slot_costs: SlotCosts::new(10, 100, 0),
            weapon: WeaponSpec::bow(),
        }
    }
}
