use phalanx_core::{ArmyId, FormationId, SoldierId, Vec2};
use phalanx_formation::{Formation, FormationMember, FormationTemplate, Slot, SlotCosts, SlotType};

const SWORD: SlotCosts = SlotCosts::new(10, 0, 100);
const BOW: SlotCosts = SlotCosts::new(10, 100, 0);

#[derive(Debug)]
struct Recruit {
    id: SoldierId,
    costs: SlotCosts,
    formation: Option<(FormationId, ArmyId)>,
    position: Vec2,
}

impl Recruit {
    fn new(id: u64, costs: SlotCosts) -> Self {
        Self {
            id: SoldierId(id),
            costs,
            formation: None,
            position: Vec2::new(-1.0, -1.0),
        }
    }
}

impl FormationMember for Recruit {
    fn member_id(&self) -> SoldierId {
        self.id
    }

    fn slot_costs(&self) -> SlotCosts {
        self.costs
    }

    fn join_formation(&mut self, formation: FormationId, army: ArmyId) {
        self.formation = Some((formation, army));
    }

    fn snap_to(&mut self, position: Vec2) {
        self.position = position;
    }
}

fn formation(grid: &str) -> Formation {
    let template = FormationTemplate::parse("test", grid).unwrap();
    Formation::from_template(FormationId(1), ArmyId(7), &template)
}

#[test]
fn picks_the_cheapest_slot_and_records_membership() {
    // Reading order: R(0) A(1) F(2)
    let mut f = formation("RAF");
    let mut sword = Recruit::new(1, SWORD);
    assert!(f.add(&mut sword, false));
    assert_eq!(f.slot_of(sword.id), Some(2));
    assert_eq!(sword.formation, Some((FormationId(1), ArmyId(7))));
    assert_eq!(sword.position, Vec2::new(-1.0, -1.0));

    let mut bow = Recruit::new(2, BOW);
    assert!(f.add(&mut bow, false));
    assert_eq!(f.slot_of(bow.id), Some(0));
}

#[test]
fn equal_costs_go_to_the_first_slot_in_scan_order() {
    let mut f = Formation::new(
        FormationId(1),
        ArmyId(1),
        vec![
            Slot::new(SlotType::Any, Vec2::new(0.0, 0.0)),
            Slot::new(SlotType::Melee, Vec2::new(20.0, 0.0)),
            Slot::new(SlotType::Melee, Vec2::new(40.0, 0.0)),
        ],
    );
    let mut a = Recruit::new(5, SlotCosts::new(1_000, 0, 1_000));
    let mut b = Recruit::new(6, SlotCosts::new(1_000, 0, 1_000));
    assert!(f.add(&mut a, false));
    assert!(f.add(&mut b, false));
    assert_eq!(f.slot_of(a.id), Some(1));
    assert_eq!(f.slot_of(b.id), Some(2));

    // Unsuitable but free is still a slot.
    let mut c = Recruit::new(7, SlotCosts::new(1_000, 0, 1_000));
    assert!(f.add(&mut c, false));
    assert_eq!(f.slot_of(c.id), Some(0));
}

#[test]
fn full_formation_rejects_without_touching_the_member() {
    let mut f = formation("FF");
    assert!(f.add(&mut Recruit::new(1, SWORD), false));
    assert!(f.add(&mut Recruit::new(2, SWORD), false));
    assert!(f.is_full());

    let mut late = Recruit::new(3, SWORD);
    assert!(!f.add(&mut late, true));
    assert_eq!(late.formation, None);
    assert_eq!(late.position, Vec2::new(-1.0, -1.0));
    assert_eq!(f.len(), 2);
}

#[test]
fn adding_twice_is_refused() {
    let mut f = formation("FFF");
    let mut sword = Recruit::new(1, SWORD);
    assert!(f.add(&mut sword, false));
    assert!(!f.add(&mut sword, false));
    assert_eq!(f.len(), 1);
    assert_eq!(f.vacancies(), 2);
}

#[test]
fn snapping_moves_the_member_onto_its_slot() {
    let mut f = formation("F\nR");
    f.anchor.position = Vec2::new(100.0, 100.0);
    let mut bow = Recruit::new(1, BOW);
    assert!(f.add(&mut bow, true));
    assert_eq!(bow.position, Vec2::new(100.0, 110.0));
    assert_eq!(f.slot_position(bow.id), Some(Vec2::new(100.0, 110.0)));
}

#[test]
fn slot_position_is_unavailable_while_invalid_or_unassigned() {
    let mut f = formation("F");
    let mut sword = Recruit::new(1, SWORD);
    assert_eq!(f.slot_position(sword.id), None);
    f.add(&mut sword, false);
    assert!(f.slot_position(sword.id).is_some());

    f.set_valid(false);
    assert_eq!(f.slot_position(sword.id), None);
    f.set_valid(true);
    assert!(f.slot_position(sword.id).is_some());
}

#[test]
fn removal_compacts_members_in_id_order() {
    let mut f = formation("FFFF");
    for id in [4, 2, 3, 1] {
        assert!(f.add(&mut Recruit::new(id, SWORD), false));
    }
    assert_eq!(
        f.members().collect::<Vec<_>>(),
        vec![SoldierId(4), SoldierId(2), SoldierId(3), SoldierId(1)]
    );

    assert!(f.remove(SoldierId(2)));
    assert_eq!(
        f.members().collect::<Vec<_>>(),
        vec![SoldierId(1), SoldierId(3), SoldierId(4)]
    );
    assert_eq!(f.slot_of(SoldierId(1)), Some(0));
    assert!(!f.remove(SoldierId(2)));
}

#[test]
fn reassignment_is_deterministic() {
    let run = || {
        let mut f = formation("RRR\nFFF");
        let mut recruits: Vec<Recruit> = (1..=6)
            .map(|id| Recruit::new(id, if id % 2 == 0 { BOW } else { SWORD }))
            .collect();
        for r in &mut recruits {
            assert!(f.add(r, false));
        }
        assert!(f.remove(SoldierId(3)));
        let mut newcomer = Recruit::new(10, SWORD);
        assert!(f.add(&mut newcomer, false));
        (0..f.slots().len())
            .map(|i| f.slots()[i].occupant.map(|o| o.id))
            .collect::<Vec<_>>()
    };

    let first = run();
    assert_eq!(first, run());
    assert!(first.iter().all(Option::is_some));
    // The newcomer takes the melee slot freed by soldier 3.
    assert!(first[3..].contains(&Some(SoldierId(10))));
}

#[test]
fn reassignment_keeps_roles() {
    let mut f = formation("RF\nRF");
    let ids: Vec<u64> = vec![1, 2, 3, 4];
    for &id in &ids {
        let costs = if id <= 2 { SWORD } else { BOW };
        assert!(f.add(&mut Recruit::new(id, costs), false));
    }
    f.remove(SoldierId(1));
    for slot in f.slots() {
        if let Some(o) = slot.occupant {
            let preferred = if o.costs == SWORD { SlotType::Melee } else { SlotType::Ranged };
            assert_eq!(slot.slot_type, preferred, "{:?}", o.id);
        }
    }
}

#[test]
fn release_all_empties_the_formation() {
    let mut f = formation("AAA");
    for id in [9, 3, 5] {
        f.add(&mut Recruit::new(id, SWORD), false);
    }
    assert_eq!(
        f.release_all(),
        vec![SoldierId(3), SoldierId(5), SoldierId(9)]
    );
    assert!(f.is_empty());
    assert_eq!(f.vacancies(), 3);
}

#[test]
fn anchor_follows_the_army_waypoint() {
    let mut f = formation("F").with_army_offset(Vec2::new(0.0, 40.0));
    f.anchor.limits = phalanx_steer::SteeringLimits::new(80.0, 300.0);
    let waypoint = Vec2::new(200.0, -40.0);

    let before = f.anchor.position.distance(waypoint + f.army_offset());
    for _ in 0..50 {
        f.follow(waypoint, 0.1);
    }
    let after = f.anchor.position.distance(waypoint + f.army_offset());
    assert!(after < before, "{before} -> {after}");
    assert!(f.anchor.velocity.length() <= 80.0 + 1e-3);
}
