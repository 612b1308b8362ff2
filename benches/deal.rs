use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use doudizhu_rs::bidding::BidDecision;
use doudizhu_rs::config::MatchConfig;
use doudizhu_rs::deal::deal;
use doudizhu_rs::deck::{build_deck, shuffle};
use doudizhu_rs::game::MatchController;
use doudizhu_rs::seat::Seat;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn bench_shuffle_and_deal(c: &mut Criterion) {
    let mut g = c.benchmark_group("deal");
    g.bench_function(BenchmarkId::new("shuffle", "chacha8"), |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        b.iter(|| shuffle(black_box(build_deck()), &mut rng))
    });
    let shuffled = shuffle(build_deck(), &mut ChaCha8Rng::seed_from_u64(7));
    g.bench_with_input(BenchmarkId::new("deal", "54"), &shuffled, |b, input| {
        b.iter(|| deal(black_box(input)))
    });
    g.finish();
}

fn bench_full_bidding(c: &mut Criterion) {
    let mut game = MatchController::new(MatchConfig::default().with_seed(7));
    c.bench_function("start_hand_and_bid", |b| {
        b.iter(|| {
            game.start_hand();
            for seat in Seat::ALL {
                let _ = game.submit_bid(seat, BidDecision::Claim);
            }
            black_box(game.state().landlord())
        })
    });
}

criterion_group!(benches, bench_shuffle_and_deal, bench_full_bidding);
criterion_main!(benches);
