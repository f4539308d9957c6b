//! # holdem-ai: Rule-Based Decision Policies
//!
//! Decision collaborators for the Hold'em engine. Every policy sees only the
//! [`DecisionRequest`] the engine sends and answers with a [`PlayerAction`];
//! [`Seating`] maps player ids to policies and plugs them into the engine's
//! [`DecisionMaker`](holdem_engine::decision::DecisionMaker) contract.
//!
//! ## Core Components
//!
//! - [`AIOpponent`] - Trait defining the interface for AI decision-making
//! - [`baseline`] - Hand strength and pot odds
//! - [`aggressive`] - Same reads, larger and more frequent bets
//! - [`conservative`] - Same reads, tight and passive
//! - [`random`] - Seeded uniform choice among legal actions
//! - [`seating`] - Player-id to policy table implementing `DecisionMaker`
//! - [`create_ai`] - Factory function for creating AI opponents
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_ai::{create_ai, Seating};
//! use holdem_engine::engine::{Engine, TableConfig};
//! use holdem_engine::player::Player;
//!
//! let players = vec![Player::new("hero", 1000), Player::new("villain", 1000)];
//! let mut engine = Engine::new(TableConfig::default(), players, 42).unwrap();
//!
//! let mut seating = Seating::new();
//! seating.seat("hero", create_ai("baseline").unwrap());
//! seating.seat("villain", create_ai("aggressive").unwrap());
//!
//! let record = engine.play_hand(&mut seating).unwrap();
//! assert_eq!(record.net_sum(), 0);
//! ```
//!
//! ## AI Types
//!
//! - `"baseline"` - Deterministic hand-strength player
//! - `"aggressive"` - Deterministic loose-aggressive player
//! - `"conservative"` - Deterministic tight-passive player
//! - `"random"` - Seeded random legal actions

use holdem_engine::decision::DecisionRequest;
use holdem_engine::player::{ActionKind, PlayerAction};

pub mod aggressive;
pub mod baseline;
pub mod conservative;
pub mod random;
pub mod seating;

pub use seating::Seating;

/// Names accepted by [`create_ai`].
pub const AI_NAMES: [&str; 4] = ["baseline", "aggressive", "conservative", "random"];

/// Trait defining the interface for AI opponents in poker games.
///
/// # Example Implementation
///
/// ```rust
/// use holdem_ai::AIOpponent;
/// use holdem_engine::decision::DecisionRequest;
/// use holdem_engine::player::PlayerAction;
///
/// struct CallingStation;
///
/// impl AIOpponent for CallingStation {
///     fn get_action(&mut self, request: &DecisionRequest) -> PlayerAction {
///         if request.to_call == 0 { PlayerAction::Check } else { PlayerAction::Call }
///     }
///
///     fn name(&self) -> &str {
///         "CallingStation"
///     }
/// }
/// ```
pub trait AIOpponent: Send {
    /// Chooses an action for the request. Policies should stay inside
    /// `request.legal_actions`; the engine rejects anything else.
    fn get_action(&mut self, request: &DecisionRequest) -> PlayerAction;

    /// Return the name/identifier of this AI implementation.
    fn name(&self) -> &str;
}

/// Factory function to create AI opponents by type string.
///
/// ```rust
/// use holdem_ai::create_ai;
///
/// let ai = create_ai("baseline").unwrap();
/// assert_eq!(ai.name(), "BaselineAI");
/// assert!(create_ai("psychic").is_err());
/// ```
pub fn create_ai(ai_type: &str) -> Result<Box<dyn AIOpponent>, String> {
    create_ai_with_seed(ai_type, 0)
}

/// Like [`create_ai`]; `seed` drives the randomized policies.
pub fn create_ai_with_seed(ai_type: &str, seed: u64) -> Result<Box<dyn AIOpponent>, String> {
    match ai_type.trim().to_ascii_lowercase().as_str() {
        "baseline" => Ok(Box::new(baseline::BaselineAI::new())),
        "aggressive" => Ok(Box::new(aggressive::AggressiveAI::new())),
        "conservative" => Ok(Box::new(conservative::ConservativeAI::new())),
        "random" => Ok(Box::new(random::RandomAI::new(seed))),
        other => Err(format!(
            "Unknown AI type: {} (expected one of: {})",
            other,
            AI_NAMES.join(", ")
        )),
    }
}

/// Check when free, otherwise call.
pub fn check_or_call(request: &DecisionRequest) -> PlayerAction {
    if request.can(ActionKind::Check) {
        PlayerAction::Check
    } else if request.can(ActionKind::Call) {
        PlayerAction::Call
    } else {
        PlayerAction::Fold
    }
}

/// Check when free, otherwise fold.
pub fn check_or_fold(request: &DecisionRequest) -> PlayerAction {
    if request.can(ActionKind::Check) {
        PlayerAction::Check
    } else {
        PlayerAction::Fold
    }
}

/// Bets or raises to `target` (a street total), clamped into the legal range.
/// Reaching the top of the range becomes an all-in. Falls back to
/// [`check_or_call`] when neither bet nor raise is available.
pub fn bet_or_raise_to(request: &DecisionRequest, target: u32) -> PlayerAction {
    let legal = request
        .legal(ActionKind::Bet)
        .or_else(|| request.legal(ActionKind::Raise));
    match legal {
        Some(range) => {
            let to = target.clamp(range.min, range.max);
            if to == range.max {
                PlayerAction::AllIn
            } else if range.kind == ActionKind::Bet {
                PlayerAction::Bet(to)
            } else {
                PlayerAction::Raise(to)
            }
        }
        None => check_or_call(request),
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use holdem_engine::cards::Card;
    use holdem_engine::decision::DecisionRequest;
    use holdem_engine::logger::Street;
    use holdem_engine::player::Position;
    use holdem_engine::rules::BetContext;

    /// Request for `hole` on `board` with the given betting context.
    pub fn request(hole: &str, board: &str, ctx: BetContext, pot: u32) -> DecisionRequest {
        let parse = |s: &str| -> Vec<Card> {
            s.split_whitespace().map(|t| t.parse().unwrap()).collect()
        };
        let h = parse(hole);
        let community = parse(board);
        let street = match community.len() {
            0 => Street::Preflop,
            3 => Street::Flop,
            4 => Street::Turn,
            _ => Street::River,
        };
        DecisionRequest {
            player_id: "p".to_string(),
            seat: 0,
            position: Position::Button,
            street,
            hole_cards: [h[0], h[1]],
            community,
            pot,
            current_bet: ctx.current_bet,
            to_call: ctx.to_call(),
            min_raise: ctx.min_raise,
            stack: ctx.stack,
            committed: ctx.committed,
            legal_actions: ctx.legal_actions(),
            retry_reason: None,
        }
    }
}
