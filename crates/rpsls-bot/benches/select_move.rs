use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rpsls_bot::engine::{EngineParams, OpponentEngine};
use rpsls_core::model::moves::Move;

fn engine_after(history: &[Move], params: EngineParams) -> OpponentEngine {
    let mut engine = OpponentEngine::with_params_and_seed(params, 1040);
    for mv in history {
        engine.record_opponent_move(*mv);
    }
    engine
}

fn select_move_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_move");
    let long_history: Vec<Move> = (0..1_000)
        .map(|i| Move::ALL[(i * 7 + i / 3) % Move::COUNT])
        .collect();

    for (label, history, params) in [
        ("warmup", Vec::new(), EngineParams::default()),
        (
            "alternation",
            vec![Move::Rock, Move::Paper, Move::Rock, Move::Paper, Move::Rock],
            EngineParams::default(),
        ),
        ("long_history", long_history.clone(), EngineParams::default()),
        (
            "frequency",
            long_history,
            EngineParams::default().with_reactive(false),
        ),
    ] {
        let mut engine = engine_after(&history, params);
        group.bench_function(label, |b| b.iter(|| black_box(engine.select_move())));
    }
    group.finish();
}

criterion_group!(benches, select_move_bench);
criterion_main!(benches);
