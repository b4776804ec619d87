use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

use flanker::board::{Action, BoardState, Color};
use flanker::eval::{evaluate, Heuristic};
use flanker::movegen::generate_moves;
use flanker::protocol::parse_layout;
use flanker::search::{alphabeta_cutoff_search, SearchLimits, SearchNode};
use flanker::strategy::{captures_opponent, greedy_capture_move};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// A crowded early moving-phase position, twelve pieces a side.
const MIDGAME: &str = "X-O--O-X/-O-O--O-/O-@O-O@-/-O@-@OO-/@-O@-@--/-@@--@--/--@-@---/X------X";

fn midgame() -> BoardState {
    parse_layout(MIDGAME).unwrap()
}

fn bench_movegen(c: &mut Criterion) {
    let board = midgame();
    c.bench_function("generate_moves_white", |b| {
        b.iter(|| generate_moves(black_box(&board), black_box(Color::White)))
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let board = midgame();
    c.bench_function("evaluate_heuristic", |b| {
        b.iter(|| evaluate(black_box(&board), black_box(Color::White)))
    });
}

fn bench_apply_move(c: &mut Criterion) {
    let board = midgame();
    let moves = generate_moves(&board, Color::White);
    c.bench_function("apply_all_white_moves", |b| {
        b.iter(|| {
            for mv in &moves {
                let mut scratch = board.clone();
                scratch.modify(&Action::Move(*mv), Color::White);
                black_box(&scratch);
            }
        })
    });
}

fn bench_greedy(c: &mut Criterion) {
    let board = midgame();
    let moves = generate_moves(&board, Color::Black);
    c.bench_function("capture_check_all_black_moves", |b| {
        b.iter(|| {
            moves
                .iter()
                .filter(|mv| captures_opponent(&board, Color::Black, mv))
                .count()
        })
    });
    c.bench_function("greedy_capture_move", |b| {
        let mut rng = SmallRng::seed_from_u64(1);
        b.iter(|| greedy_capture_move(black_box(&board), Color::Black, &mut rng))
    });
}

fn bench_search(c: &mut Criterion) {
    let node = SearchNode::new(midgame(), Color::White);
    let heuristic = Heuristic::default();
    let mut group = c.benchmark_group("alphabeta");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(10));
    for depth in [1u32, 2, 3] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut out = Vec::new();
                alphabeta_cutoff_search(
                    black_box(&node),
                    &SearchLimits::depth(depth),
                    &heuristic,
                    &mut out,
                )
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_movegen,
    bench_evaluate,
    bench_apply_move,
    bench_greedy,
    bench_search,
);

criterion_main!(benches);
