//! Battle setups, loaded from YAML.
//!
//! ```yaml
//! name: skirmish
//! armies:
//!   - name: red
//!     color: [200, 40, 40]
//!     waypoint: { x: 200, y: 360 }
//!     march_to: { x: 640, y: 360 }
//!     formations:
//!       - template: line
//!         position: { x: 200, y: 360 }
//!         soldiers:
//!           - { archetype: swordsperson, count: 8 }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use phalanx_core::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    pub armies: Vec<ArmySpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmySpec {
    pub name: String,
    #[serde(default = "default_color")]
    pub color: [u8; 3],
    /// Initial waypoint; formation offsets are measured from here.
    pub waypoint: Vec2,
    /// Waypoint given once everything is spawned, setting the army in motion.
    #[serde(default)]
    pub march_to: Option<Vec2>,
    #[serde(default)]
    pub formations: Vec<FormationSpec>,
    /// Soldiers that start outside any formation.
    #[serde(default)]
    pub soldiers: Vec<SquadSpec>,
}

fn default_color() -> [u8; 3] {
    [255, 255, 255]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormationSpec {
    pub template: String,
    /// Starting anchor position.
    pub position: Vec2,
    /// Offset from the army waypoint the anchor keeps. Defaults to the starting offset.
    #[serde(default)]
    pub army_offset: Option<Vec2>,
    #[serde(default)]
    pub soldiers: Vec<SquadSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SquadSpec {
    pub archetype: String,
    #[serde(default = "default_count")]
    pub count: usize,
    /// Spawn point for unattached soldiers; formation members snap to their slot instead.
    #[serde(default)]
    pub position: Option<Vec2>,
}

fn default_count() -> usize {
    1
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse scenario from {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn soldier_count(&self) -> usize {
        self.armies
            .iter()
            .flat_map(|army| {
                army.formations
                    .iter()
                    .flat_map(|f| f.soldiers.iter())
                    .chain(army.soldiers.iter())
            })
            .map(|squad| squad.count)
            .sum()
    }
}
