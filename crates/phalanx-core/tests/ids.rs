use phalanx_core::{ArmyId, FormationId, SoldierId};

#[test]
fn ids_order_by_raw_value() {
    let mut ids = vec![SoldierId(12), SoldierId(3), SoldierId(7)];
    ids.sort();
    assert_eq!(ids, vec![SoldierId(3), SoldierId(7), SoldierId(12)]);
    assert!(ArmyId(1) < ArmyId(2));
}

#[test]
fn ids_display_with_their_kind() {
    assert_eq!(SoldierId(4).to_string(), "soldier#4");
    assert_eq!(ArmyId(2).to_string(), "army#2");
    assert_eq!(FormationId(9).to_string(), "formation#9");
}
