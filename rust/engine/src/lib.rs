//! # holdem-engine: Texas Hold'em Game Engine Core
//!
//! A deterministic no-limit Texas Hold'em engine for 2 to 10 seats. Covers
//! card modeling, seven-card hand ranking, per-street betting, main and side
//! pot settlement and a hand orchestrator that talks to players through a
//! synchronous decision contract with a timeout.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Seeded deck shuffling with ChaCha20 RNG
//! - [`hand`] - Best-five-of-seven evaluation and the `HandRank` total order
//! - [`player`] - Player state, action variants and seat positions
//! - [`rules`] - Legal action sets and action validation
//! - [`betting`] - Per-street betting round state machine
//! - [`pot`] - Main/side pot construction and settlement
//! - [`game`] - Hand phases and the per-hand `GameState`
//! - [`decision`] - Decision request/response contract and timeout adapter
//! - [`engine`] - Hand orchestration across a table session
//! - [`logger`] - HandRecord serialization and JSONL logging
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::Card;
//! use holdem_engine::hand::{evaluate, Category};
//!
//! let parse = |s: &str| s.parse::<Card>().unwrap();
//! let hole = [parse("Ah"), parse("Kh")];
//! let board = [parse("Qh"), parse("Jh"), parse("Th"), parse("2c"), parse("3d")];
//!
//! let rank = evaluate(hole, &board);
//! assert_eq!(rank.category, Category::StraightFlush);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! All shuffles are reproducible from a seed:
//!
//! ```rust
//! use holdem_engine::deck::Deck;
//!
//! let mut a = Deck::new_shuffled(42);
//! let mut b = Deck::new_shuffled(42);
//! assert_eq!(a.deal(52).unwrap(), b.deal(52).unwrap());
//! ```

pub mod betting;
pub mod cards;
pub mod decision;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;
