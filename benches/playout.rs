//! Benchmarks for the tussle rules engine.
//!
//! Run with: `cargo bench`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tussle_engine::{
    codec, evaluate_sequence, Engine, GameSetup, GameState, PlayerSetup, RulesEngine,
};

const DECK: [&str; 6] = ["Knight", "Ka", "Umbruh", "Snuggles", "Rush", "Archer"];
const OTHER: [&str; 6] = ["Beary", "Gloom", "Wizard", "Stall", "Toynado", "Raggy"];

fn new_game(engine: &Engine, seed: u64) -> GameState {
    let setup = GameSetup::new(
        PlayerSetup::new("Ada", &DECK),
        PlayerSetup::new("Bo", &OTHER),
        seed,
    );
    engine.new_game(&setup).expect("standard decks are valid")
}

/// Random legal actions until someone wins or the step cap is hit.
fn playout(engine: &Engine, state: &GameState, seed: u64, max_steps: usize) -> GameState {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = state.clone();
    for _ in 0..max_steps {
        let Some(player) = engine.current_player(&state) else {
            break;
        };
        let actions = engine.legal_actions(&state, player);
        let action = &actions[rng.gen_range(0..actions.len())];
        state = engine
            .apply_action(&state, player, action)
            .expect("legal actions apply");
    }
    state
}

fn benchmark_playouts(c: &mut Criterion) {
    let engine = Engine::standard().expect("standard catalog loads");
    let initial = new_game(&engine, 1);

    let mut group = c.benchmark_group("Playout");
    for steps in [25, 100, 400] {
        group.bench_with_input(BenchmarkId::new("random/steps", steps), &steps, |b, &steps| {
            b.iter(|| black_box(playout(&engine, black_box(&initial), 7, steps)));
        });
    }
    group.finish();
}

fn benchmark_queries(c: &mut Criterion) {
    let engine = Engine::standard().expect("standard catalog loads");
    let midgame = playout(&engine, &new_game(&engine, 3), 11, 30);
    let player = engine.current_player(&midgame);

    let mut group = c.benchmark_group("Queries");
    if let Some(player) = player {
        group.bench_function("legal_actions", |b| {
            b.iter(|| black_box(engine.legal_actions(black_box(&midgame), player)));
        });

        let actions = engine.legal_actions(&midgame, player);
        group.bench_function("evaluate_sequence", |b| {
            b.iter(|| black_box(evaluate_sequence(&engine, &midgame, player, &actions[..1])));
        });
    }
    group.bench_function("state_clone", |b| {
        b.iter(|| black_box(midgame.clone()));
    });
    group.bench_function("encode_binary", |b| {
        b.iter(|| black_box(codec::to_bytes(black_box(&midgame))));
    });
    group.finish();
}

criterion_group!(benches, benchmark_playouts, benchmark_queries);
criterion_main!(benches);
