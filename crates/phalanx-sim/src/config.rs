//! Simulation configuration, loaded from `data/config.yaml`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use phalanx_core::DEFAULT_MAX_FRAME_SECONDS;
use phalanx_steer::SteeringLimits;
use serde::{Deserialize, Serialize};

use crate::archetype::Archetype;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Longest frame a single tick may integrate
    #[serde(default = "default_max_frame_seconds")]
    pub max_frame_seconds: f32,

    /// Health regained per second by living soldiers
    #[serde(default = "default_healing")]
    pub healing_per_second: f32,

    /// Seconds a dead soldier lingers before removal
    #[serde(default = "default_cleanup")]
    pub cleanup_seconds: f32,

    /// Behavior tree definitions (`<name>.json`)
    #[serde(default = "default_trees_dir")]
    pub trees_dir: PathBuf,

    /// Formation grids (`<name>.txt`)
    #[serde(default = "default_formations_dir")]
    pub formations_dir: PathBuf,

    /// Steering limits for formation anchors
    #[serde(default = "default_formation_limits")]
    pub formation_limits: SteeringLimits,

    /// Soldier archetypes by name. A config that lists archetypes replaces the built-in table.
    #[serde(default = "default_archetypes")]
    pub archetypes: BTreeMap<String, Archetype>,
}

fn default_max_frame_seconds() -> f32 {
    DEFAULT_MAX_FRAME_SECONDS
}
fn default_healing() -> f32 {
    1.0
}
fn default_cleanup() -> f32 {
    10.0
}
fn default_trees_dir() -> PathBuf {
    PathBuf::from("data/trees")
}
fn default_formations_dir() -> PathBuf {
    PathBuf::from("data/formations")
}
fn default_formation_limits() -> SteeringLimits {
    SteeringLimits::new(60.0, 90.0)
}
fn default_archetypes() -> BTreeMap<String, Archetype> {
    [Archetype::swordsperson(), Archetype::archer()]
        .into_iter()
        .map(|a| (a.name.clone(), a))
        .collect()
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_frame_seconds: default_max_frame_seconds(),
            healing_per_second: default_healing(),
            cleanup_seconds: default_cleanup(),
            trees_dir: default_trees_dir(),
            formations_dir: default_formations_dir(),
            formation_limits: default_formation_limits(),
            archetypes: default_archetypes(),
        }
    }
}

impl SimConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let mut config: Self = serde_yaml::from_str(content)?;
        for (name, archetype) in &mut config.archetypes {
            archetype.name.clone_from(name);
        }
        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve data directories relative to `root`
    pub fn resolve_paths(&mut self, root: &Path) {
        self.trees_dir = root.join(&self.trees_dir);
        self.formations_dir = root.join(&self.formations_dir);
    }

    pub fn archetype(&self, name: &str) -> Option<&Archetype> {
        self.archetypes.get(name)
    }
}
