//! Headless simulator: bots play every seat, timers run on a manual clock.

use clap::{Parser, ValueEnum};
use doudizhu_rs::agents::{AgentTable, BotAgent, BotProfile, Difficulty};
use doudizhu_rs::config::MatchConfig;
use doudizhu_rs::game::MatchController;
use doudizhu_rs::seat::Seat;
use doudizhu_rs::state::{Outcome, Phase};
use doudizhu_rs::telemetry;
use doudizhu_rs::timer::ManualClock;
use std::sync::Arc;
use tracing::{info, warn};

/// Steps after which a hand is abandoned. Bots always act, so this only trips on a bug.
const MAX_STEPS_PER_HAND: usize = 10_000;

#[derive(Parser)]
#[command(name = "ddz-sim")]
#[command(about = "Play Dou Dizhu hands between bots and report the score table")]
struct Args {
    /// Number of hands to play
    #[arg(short = 'n', long, default_value = "100")]
    hands: u32,

    /// Shuffle seed (falls back to DDZ_SEED, then random)
    #[arg(long)]
    seed: Option<u64>,

    /// Bot difficulty for all three seats
    #[arg(long, default_value = "medium")]
    difficulty: BotLevel,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BotLevel {
    Easy,
    Medium,
    Hard,
}

impl From<BotLevel> for Difficulty {
    fn from(level: BotLevel) -> Self {
        match level {
            BotLevel::Easy => Difficulty::Easy,
            BotLevel::Medium => Difficulty::Medium,
            BotLevel::Hard => Difficulty::Hard,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    telemetry::init_tracing();

    let mut config = MatchConfig::from_env()?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    let bid_timeout = config.bid_timeout;
    let play_timeout = config.play_timeout;
    let base_seed = config.seed;

    let clock = Arc::new(ManualClock::new());
    let mut game = MatchController::with_clock(config, clock.clone());
    let mut table = AgentTable::new();
    for seat in Seat::ALL {
        let mut profile = BotProfile::for_difficulty(args.difficulty.into());
        if let Some(seed) = base_seed {
            profile = profile.with_seed(seed.wrapping_add(seat.index() as u64));
        }
        table.set_agent(seat, Some(Box::new(BotAgent::new(profile))));
    }

    let mut landlord_wins = 0u32;
    let mut farmer_wins = 0u32;
    let mut abandoned = 0u32;
    for _ in 0..args.hands {
        game.start_hand();
        let mut steps = 0;
        while game.phase() != Phase::Ended {
            steps += 1;
            if steps > MAX_STEPS_PER_HAND {
                warn!(hand = game.state().hand_number(), "hand abandoned");
                abandoned += 1;
                break;
            }
            match table.on_turn(&mut game) {
                Ok(true) => {}
                Ok(false) | Err(_) => {
                    // Let the clock decide for a seat that did not act.
                    let wait = match game.phase() {
                        Phase::Bidding => bid_timeout,
                        _ => play_timeout,
                    };
                    clock.advance(wait);
                    game.tick();
                }
            }
        }
        match game.state().result() {
            Some(Outcome::LandlordWin) => landlord_wins += 1,
            Some(Outcome::FarmerWin) => farmer_wins += 1,
            _ => {}
        }
    }

    let scores = game.state().scores();
    info!(hands = args.hands, landlord_wins, farmer_wins, abandoned, ?scores, "simulation done");
    println!("hands: {}", args.hands);
    println!("landlord wins: {landlord_wins}  farmer wins: {farmer_wins}  abandoned: {abandoned}");
    for seat in Seat::ALL {
        println!("{seat}: {:+}", scores[seat.index()]);
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
    }
    Ok(())
}
