use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use phalanx_core::{ArmyId, FormationId, SoldierId, Vec2};
use phalanx_formation::{Formation, FormationMember, FormationTemplate, SlotCosts};

struct Member(SoldierId, SlotCosts);

impl FormationMember for Member {
    fn member_id(&self) -> SoldierId {
        self.0
    }

    fn slot_costs(&self) -> SlotCosts {
        self.1
    }

    fn join_formation(&mut self, _formation: FormationId, _army: ArmyId) {}

    fn snap_to(&mut self, _position: Vec2) {}
}

fn grid(rows: usize, columns: usize) -> String {
    (0..rows)
        .map(|row| if row % 2 == 0 { "R" } else { "F" }.repeat(columns))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_reassign(c: &mut Criterion) {
    let mut group = c.benchmark_group("phalanx-formation/reassign");

    for &(rows, columns) in &[(4usize, 8usize), (10, 20)] {
        let template = FormationTemplate::parse("bench", &grid(rows, columns)).expect("grid parses");
        let mut formation = Formation::from_template(FormationId(1), ArmyId(1), &template);
        let count = (rows * columns) as u64;
        for id in 0..count {
            let costs = if id % 2 == 0 {
                SlotCosts::new(10, 0, 100)
            } else {
                SlotCosts::new(10, 100, 0)
            };
            formation.add(&mut Member(SoldierId(id), costs), false);
        }

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                formation.reassign();
                black_box(formation.len());
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reassign);
criterion_main!(benches);
