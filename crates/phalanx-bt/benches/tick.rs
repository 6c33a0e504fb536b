use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use phalanx_bt::{SoldierStatus, TacticalWorld, TreeLoader, TreeSource, SOLDIERS};
use phalanx_core::{ArmyId, Blackboard, SoldierId, TickContext, Vec2};
use phalanx_steer::{Movable, SteeringLimits};

const MELEE: &str = r#"["Selector",
    ["Sequence", "TargetEnemy",
        ["Selector",
            ["Sequence", "TargetInAttackRange", "AimTarget", "FacingTarget", "Attack"],
            ["Sequence", "ArriveTarget", "AimTarget"]]],
    "SpreadOut"]"#;

#[derive(Default)]
struct World {
    bodies: BTreeMap<SoldierId, Movable>,
}

impl TacticalWorld for World {
    fn body(&self, soldier: SoldierId) -> Option<&Movable> {
        self.bodies.get(&soldier)
    }

    fn body_mut(&mut self, soldier: SoldierId) -> Option<&mut Movable> {
        self.bodies.get_mut(&soldier)
    }

    fn status(&self, soldier: SoldierId) -> Option<SoldierStatus> {
        self.bodies.contains_key(&soldier).then_some(SoldierStatus {
            alive: true,
            radius: 10.0,
            sight_range: 300.0,
            attack_range: 30.0,
            flee_range: 100.0,
        })
    }

    fn attack(&mut self, _soldier: SoldierId) -> bool {
        true
    }

    fn slot_position(&self, _soldier: SoldierId) -> Option<Vec2> {
        None
    }
}

fn battle(count: u64) -> (World, Blackboard) {
    let mut world = World::default();
    let mut bb = Blackboard::new();
    for i in 0..count {
        let id = SoldierId(i);
        let army = ArmyId((i % 2) as u32);
        let x = (i / 2) as f32 * 25.0;
        let y = if i % 2 == 0 { 0.0 } else { 120.0 };
        let body = Movable::new(SteeringLimits::new(80.0, 300.0)).at(Vec2::new(x, y), 180.0);
        world.bodies.insert(id, body);
        bb.set_for(SOLDIERS, id, army);
    }
    (world, bb)
}

fn bench_tree_tick(c: &mut Criterion) {
    let mut loader = TreeLoader::new(TreeSource::memory([("melee", MELEE)]));
    let tree = loader.load("melee").expect("bench tree loads");

    let mut group = c.benchmark_group("phalanx-bt/tick");
    for &n in &[16u64, 256u64] {
        let (mut world, mut bb) = battle(n);
        let mut tick: u64 = 0;
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let ctx = TickContext::new(tick, 0.1);
                for i in 0..n {
                    black_box(tree.run(&ctx, SoldierId(i), &mut world, &mut bb));
                }
                tick = tick.wrapping_add(1);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tree_tick);
criterion_main!(benches);
