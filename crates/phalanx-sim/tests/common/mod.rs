#![allow(dead_code)]

use std::path::PathBuf;

use phalanx_bt::{TreeLoader, TreeSource};
use phalanx_core::Vec2;
use phalanx_formation::FormationTemplate;
use phalanx_sim::{Archetype, Battlefield, SimConfig};

pub const DUEL: &str = r#"["Sequence", "TargetEnemy",
    ["Selector",
        ["Sequence", "TargetInAttackRange", "AimTarget", "FacingTarget", "Attack"],
        ["Sequence", "ArriveTarget", "AimTarget"]]]"#;

pub const VOLLEY: &str =
    r#"["Sequence", "TargetEnemy", "TargetInAttackRange", "AimTarget", "FacingTarget", "Attack"]"#;

pub const MARCH: &str = r#"["Sequence", "TakeFormationWaypoint", "ArriveWaypoint"]"#;

pub fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// Config whose archetypes use in-memory trees: `swordsperson` duels, `archer` volleys,
/// `dummy` stands still and `marcher` walks to its slot.
pub fn config() -> SimConfig {
    let mut config = SimConfig::default();
    let mut sword = Archetype::swordsperson();
    sword.tree = "duel".to_string();
    let mut archer = Archetype::archer();
    archer.tree = "volley".to_string();
    let dummy = Archetype {
        name: "dummy".to_string(),
        tree: "idle".to_string(),
        ..Archetype::swordsperson()
    };
    let marcher = Archetype {
        name: "marcher".to_string(),
        tree: "march".to_string(),
        ..Archetype::swordsperson()
    };
    config.archetypes = [sword, archer, dummy, marcher]
        .into_iter()
        .map(|a| (a.name.clone(), a))
        .collect();
    config
}

pub fn battlefield_with(config: SimConfig) -> Battlefield {
    let trees = TreeLoader::new(TreeSource::memory([
        ("duel", DUEL),
        ("volley", VOLLEY),
        ("march", MARCH),
        ("idle", r#""Sequence""#),
    ]));
    Battlefield::with_trees(config, trees)
}

pub fn battlefield() -> Battlefield {
    battlefield_with(config())
}

pub fn template(grid: &str) -> FormationTemplate {
    FormationTemplate::parse("test", grid).unwrap()
}

pub const EAST: f32 = 90.0;
pub const WEST: f32 = -90.0;

pub fn at(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}
