mod common;

use std::path::PathBuf;

use common::workspace_root;
use phalanx_sim::{Archetype, SimConfig, WeaponSpec};

#[test]
fn defaults_match_the_built_in_archetypes() {
    let config = SimConfig::default();
    assert!((config.max_frame_seconds - 0.1).abs() < 1e-6);
    assert_eq!(config.healing_per_second, 1.0);
    assert_eq!(config.cleanup_seconds, 10.0);
    assert_eq!(config.trees_dir, PathBuf::from("data/trees"));
    assert_eq!(config.archetype("swordsperson"), Some(&Archetype::swordsperson()));
    assert_eq!(config.archetype("archer"), Some(&Archetype::archer()));
    assert_eq!(config.archetypes.len(), 2);
}

#[test]
fn partial_yaml_keeps_defaults() {
    let config = SimConfig::from_yaml("cleanup_seconds: 3.5\n").unwrap();
    assert_eq!(config.cleanup_seconds, 3.5);
    assert_eq!(config.healing_per_second, 1.0);
    assert_eq!(config.archetypes.len(), 2);
}

#[test]
fn archetype_names_come_from_their_keys() {
    let yaml = r#"
archetypes:
  pikeman:
    tree: swordsperson
    max_health: 150
    slot_costs: { melee: 0, any: 5, ranged: 200 }
    weapon: { kind: sword, damage: 20, attack_range: 40 }
"#;
    let config = SimConfig::from_yaml(yaml).unwrap();
    assert_eq!(config.archetypes.len(), 1);
    let pike = config.archetype("pikeman").unwrap();
    assert_eq!(pike.name, "pikeman");
    assert_eq!(pike.radius, 10.0);
    assert_eq!(pike.sight_range, 300.0);
    assert_eq!(pike.limits.max_vel_accel, 60.0);
    assert_eq!(pike.slot_costs.any, 5);
    assert_eq!(pike.weapon.attack_range(), 40.0);
    assert_eq!(pike.weapon.stationary_time(), 0.75);
}

#[test]
fn unknown_weapon_kinds_are_rejected() {
    let yaml = r#"
archetypes:
  mage:
    tree: mage
    max_health: 10
    weapon: { kind: staff, damage: 1, attack_range: 1 }
"#;
    assert!(SimConfig::from_yaml(yaml).is_err());
}

#[test]
fn load_reports_the_path_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "max_frame_seconds: [oops\n").unwrap();

    let err = SimConfig::load(&path).unwrap_err();
    assert!(format!("{err}").contains("config.yaml"), "{err}");

    let missing = dir.path().join("absent.yaml");
    assert!(SimConfig::load(&missing).is_err());
    let fallback = SimConfig::load_or_default(&missing).unwrap();
    assert_eq!(fallback.cleanup_seconds, 10.0);
}

#[test]
fn resolve_paths_prefixes_data_dirs() {
    let mut config = SimConfig::default();
    config.resolve_paths(std::path::Path::new("/srv/battle"));
    assert_eq!(config.trees_dir, PathBuf::from("/srv/battle/data/trees"));
    assert_eq!(config.formations_dir, PathBuf::from("/srv/battle/data/formations"));
}

#[test]
fn shipped_config_matches_the_built_ins() {
    let config = SimConfig::load(&workspace_root().join("data/config.yaml")).unwrap();
    assert_eq!(config.archetypes, SimConfig::default().archetypes);
    assert!(matches!(
        config.archetype("archer").map(|a| &a.weapon),
        Some(WeaponSpec::Bow { .. })
    ));
}
