//! # tablesight-engine: Detection-Stream Blackjack State Core
//!
//! Turns noisy per-frame card detections from a table camera into a
//! consistent, temporally stable model of an in-progress blackjack round:
//! which cards belong to which seat, what phase the round is in, the
//! running counts for advantage play, and the textbook action for each
//! hand. There is no authoritative "card was dealt" event anywhere in the
//! input; every fact is inferred from a sliding window of single-frame
//! evidence.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card identities, detector-label parsing, blackjack values
//! - [`frame`] - Raw observation records and per-frame duplicate merging
//! - [`buffer`] - Temporal stability window over all 52 identities
//! - [`cluster`] - Spatial pile grouping and quadrant seat assignment
//! - [`player`] - Hand, Player and Dealer ownership primitives
//! - [`tracker`] - Pile-to-hand reconciliation (deal, hit, split)
//! - [`engine`] - Configuration, phase machine and the `update` cycle
//! - [`counting`] - Hi-Lo / Omega II / Wong Halves / Zen running counts
//! - [`strategy`] - Basic-strategy tables and the action resolver
//! - [`events`] - Structured diagnostics drained by the host
//! - [`errors`] - Error types for input and configuration failures
//!
//! ## Quick Start
//!
//! ```rust
//! use tablesight_engine::engine::{Engine, EngineConfig, Phase};
//!
//! let mut engine = Engine::new(EngineConfig::default()).unwrap();
//!
//! // One call per camera frame; detections arrive as the detector's JSON.
//! let frame = r#"{"predictions": [
//!     {"x": 282.0, "y": 801.5, "width": 44, "height": 41,
//!      "confidence": 0.944, "class": "7S"}
//! ]}"#;
//! engine.update_document(frame).unwrap();
//! // A card must be seen in more than one frame before it counts.
//! let phase = engine.update_document(frame).unwrap();
//! assert_eq!(phase, Phase::Deal);
//! ```
//!
//! ## Reading the Round
//!
//! After each update the host reads whatever it needs: `engine.players()`
//! and `engine.dealer()` for hand composition, `engine.counts()` for the
//! four counting systems, `engine.drain_events()` for anomalies and phase
//! changes. Strategy advice is a separate pure lookup:
//!
//! ```rust
//! use tablesight_engine::cards::Card;
//! use tablesight_engine::player::{Hand, Player};
//! use tablesight_engine::strategy::{player_actions, Action};
//!
//! let mut player = Player::new(5);
//! player.add_hand(Hand::with_cards(vec![
//!     "8C".parse::<Card>().unwrap(),
//!     "8D".parse::<Card>().unwrap(),
//! ]));
//! let dealer_up: Card = "5H".parse().unwrap();
//! assert_eq!(player_actions(&player, dealer_up), vec![Action::Split]);
//! ```
//!
//! The engine is single-threaded by design: each `update` is one complete
//! transaction against the round state, and the only suspension point
//! (waiting for the next frame) belongs to the caller.

pub mod buffer;
pub mod cards;
pub mod cluster;
pub mod counting;
pub mod engine;
pub mod errors;
pub mod events;
pub mod frame;
pub mod player;
pub mod strategy;
pub mod tracker;
