use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use linarith::{parse_problem, Linarith, ProofState, Tactic, Trace};

/// `k` disequalities on top of contradictory bounds: all `2^k` scenarios are
/// infeasible, so the whole space is walked
fn disequality_chain(k: usize) -> ProofState {
    let mut source = String::new();
    for i in 0..k {
        source.push_str(&format!("(var x{} real)\n", i));
    }
    for i in 0..k {
        source.push_str(&format!("(hyp (!= x{} {}))\n", i, i));
    }
    source.push_str("(hyp (> (+ x0 x1) 1))\n(hyp (< (+ x0 x1) 0))\n");
    parse_problem(&source).unwrap()
}

fn bench_disequality_chains(c: &mut Criterion) {
    let mut group = c.benchmark_group("disequality_chain");
    let tactic = Linarith::default();

    for k in [2usize, 4, 6, 8].iter() {
        let state = disequality_chain(*k);
        group.bench_with_input(BenchmarkId::new("activate", k), &state, |b, state| {
            b.iter(|| {
                let remaining = tactic
                    .activate(black_box(state), &mut Trace::new())
                    .unwrap();
                assert!(remaining.is_empty());
            })
        });
    }

    group.finish();
}

fn bench_problem_parsing(c: &mut Criterion) {
    let source = r#"
        (var x real)
        (var n integer positive)
        (hyp h1 (> x 0))
        (hyp (< (+ x (* 2 n)) 10.5))
        (goal (!= x 1))
    "#;

    c.bench_function("parse small problem", |b| {
        b.iter(|| parse_problem(black_box(source)).unwrap())
    });
}

criterion_group!(benches, bench_disequality_chains, bench_problem_parsing);
criterion_main!(benches);
