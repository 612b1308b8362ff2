//! doudizhu-rs: Dou Dizhu (landlord) match engine
//!
//! Goals:
//! - One authoritative controller per table: deal, landlord bidding, play and pass turns, scoring
//! - Deterministic under a fixed seed and an injected clock
//! - No panics on bad input; every rejected intent is a `Result` and leaves state untouched
//!
//! ## Quick start: bid and play a hand
//! ```
//! use doudizhu_rs::bidding::BidDecision;
//! use doudizhu_rs::config::MatchConfig;
//! use doudizhu_rs::game::MatchController;
//! use doudizhu_rs::seat::Seat;
//! use doudizhu_rs::state::Phase;
//!
//! let mut game = MatchController::new(MatchConfig::default().with_seed(42));
//! game.start_hand();
//!
//! let [p1, p2, p3] = Seat::ALL;
//! game.submit_bid(p1, BidDecision::Decline).unwrap();
//! game.submit_bid(p2, BidDecision::Claim).unwrap();
//! game.submit_bid(p3, BidDecision::Decline).unwrap();
//! assert_eq!(game.state().landlord(), Some(p2));
//! assert_eq!(game.state().hand_sizes(), [17, 20, 17]);
//!
//! game.submit_play(p2, &[0]).unwrap();
//! assert_eq!(game.phase(), Phase::Playing);
//! assert_eq!(game.state().current(), p3);
//! ```
//!
//! ## TUI
//! Run the interactive table with:
//! ```sh
//! cargo run --bin doudizhu-rs
//! ```
//! or a headless bot run with `cargo run --bin ddz-sim -- --hands 1000`.

pub mod agents;
pub mod bidding;
pub mod cards;
pub mod config;
pub mod deal;
pub mod deck;
pub mod engine;
pub mod error;
pub mod game;
pub mod hand;
pub mod intent;
pub mod room;
pub mod seat;
pub mod snapshot;
pub mod state;
pub mod telemetry;
pub mod timer;
pub mod tui;
pub mod turn;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
