use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use tui_bingo::core::{check_win, generate_card, EngineConfig, FixedReward, GameController, MarkedSet, RoundSnapshot};
use tui_bingo::types::CellPos;

fn bench_card_generation(c: &mut Criterion) {
    c.bench_function("generate_card", |b| {
        let mut seed = 0i64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(generate_card(black_box(seed)))
        })
    });
}

fn bench_win_check(c: &mut Criterion) {
    let mut near_miss = MarkedSet::new();
    for col in 0..4 {
        near_miss.insert(CellPos::at(col, 1));
        near_miss.insert(CellPos::at(col, 3));
    }
    c.bench_function("check_win_miss", |b| b.iter(|| black_box(check_win(black_box(&near_miss)))));
}

fn bench_full_round(c: &mut Criterion) {
    let config = EngineConfig {
        countdown_secs: 0,
        ..EngineConfig::default()
    };
    c.bench_function("auto_marked_round_16ms_ticks", |b| {
        b.iter(|| {
            let mut controller = GameController::with_rng(config.clone(), StdRng::seed_from_u64(1))
                .with_reward_policy(FixedReward(100));
            controller.set_auto_mark(true);
            controller.start_round(42).ok();
            let mut snap = RoundSnapshot::default();
            for _ in 0..25_000 {
                controller.advance(16);
                controller.drain_events().for_each(drop);
                if controller.phase().is_terminal() {
                    break;
                }
            }
            controller.snapshot_into(&mut snap);
            black_box(snap.called.len())
        })
    });
}

criterion_group!(benches, bench_card_generation, bench_win_check, bench_full_round);
criterion_main!(benches);
