use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tinywast_types::Opcode;

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("opcode/from_code", |b| {
        b.iter(|| {
            for &op in Opcode::all() {
                let info = op.info();
                black_box(Opcode::from_code(black_box(info.prefix), black_box(info.code)));
            }
        })
    });

    c.bench_function("opcode/from_name", |b| {
        b.iter(|| {
            for &op in Opcode::all() {
                black_box(Opcode::from_name(black_box(op.text())));
            }
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
