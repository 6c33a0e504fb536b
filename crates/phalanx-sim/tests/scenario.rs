mod common;

use common::workspace_root;
use phalanx_core::Vec2;
use phalanx_sim::{Battlefield, Outcome, Scenario, SimConfig};

fn shipped() -> (SimConfig, Scenario) {
    let root = workspace_root();
    let mut config = SimConfig::load(&root.join("data/config.yaml")).unwrap();
    config.resolve_paths(&root);
    let scenario = Scenario::load(&root.join("data/scenarios/skirmish.yaml")).unwrap();
    (config, scenario)
}

#[test]
fn parses_minimal_scenarios() {
    let yaml = r#"
armies:
  - name: red
    waypoint: { x: 10, y: 20 }
    soldiers:
      - archetype: archer
"#;
    let scenario = Scenario::from_yaml(yaml).unwrap();
    let red = &scenario.armies[0];
    assert_eq!(red.color, [255, 255, 255]);
    assert_eq!(red.waypoint, Vec2::new(10.0, 20.0));
    assert_eq!(red.march_to, None);
    assert_eq!(red.soldiers[0].count, 1);
    assert_eq!(scenario.soldier_count(), 1);
}

#[test]
fn skirmish_populates_every_slot() {
    let (config, scenario) = shipped();
    let field = Battlefield::from_scenario(config, &scenario).unwrap();

    assert_eq!(field.armies().count(), 2);
    assert_eq!(field.roster().formations().count(), 4);
    assert_eq!(field.roster().soldiers().count(), scenario.soldier_count());
    for soldier in field.roster().soldiers() {
        let formation = soldier.formation().expect("every soldier has a slot");
        let formation = field.formation(formation).unwrap();
        assert_eq!(formation.army(), soldier.army());
        assert_eq!(formation.slot_position(soldier.id()), Some(soldier.body.position));
    }
    for formation in field.roster().formations() {
        assert!(formation.is_full());
    }
}

#[test]
fn skirmish_armies_advance() {
    let (config, scenario) = shipped();
    let mut field = Battlefield::from_scenario(config, &scenario).unwrap();
    let red = field.armies().find(|a| a.name == "red").unwrap().id;
    assert_eq!(field.army(red).unwrap().waypoint, Vec2::new(560.0, 360.0));

    let start: f32 = field
        .roster()
        .soldiers()
        .filter(|s| s.army() == red)
        .map(|s| s.body.position.x)
        .sum();
    for _ in 0..30 {
        field.tick(0.1);
    }
    let end: f32 = field
        .roster()
        .soldiers()
        .filter(|s| s.army() == red)
        .map(|s| s.body.position.x)
        .sum();
    assert!(end > start, "{start} -> {end}");
    assert_eq!(field.outcome(), Outcome::Ongoing);
}

#[test]
fn unknown_templates_fail_to_load() {
    let (config, _) = shipped();
    let yaml = r#"
armies:
  - name: red
    waypoint: { x: 0, y: 0 }
    formations:
      - template: phalanx_of_doom
        position: { x: 0, y: 0 }
"#;
    let scenario = Scenario::from_yaml(yaml).unwrap();
    let err = Battlefield::from_scenario(config, &scenario).err().unwrap();
    assert!(err.to_string().contains("phalanx_of_doom"), "{err}");
}
