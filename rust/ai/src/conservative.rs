//! Tight-passive policy: folds anything but strong hands to a bet, calls
//! rather than raises, and only puts in a minimum raise with premium holdings.

use crate::baseline::{calculate_pot_odds, hand_strength};
use crate::{bet_or_raise_to, check_or_call, check_or_fold, AIOpponent};
use holdem_engine::decision::DecisionRequest;
use holdem_engine::player::{ActionKind, PlayerAction};

/// Strength needed to continue against a bet.
const CALL_THRESHOLD: u8 = 7;
/// Strength needed to raise.
const RAISE_THRESHOLD: u8 = 9;

#[derive(Debug, Clone, Default)]
pub struct ConservativeAI;

impl ConservativeAI {
    pub fn new() -> Self {
        Self
    }
}

impl AIOpponent for ConservativeAI {
    fn get_action(&mut self, request: &DecisionRequest) -> PlayerAction {
        let strength = hand_strength(request);
        let min_raise_to = request.current_bet + request.min_raise;

        if request.to_call == 0 {
            return if strength >= RAISE_THRESHOLD {
                bet_or_raise_to(request, min_raise_to)
            } else {
                PlayerAction::Check
            };
        }

        if request.to_call >= request.stack {
            return if strength >= RAISE_THRESHOLD && request.can(ActionKind::AllIn) {
                PlayerAction::AllIn
            } else {
                PlayerAction::Fold
            };
        }

        if strength >= RAISE_THRESHOLD {
            return bet_or_raise_to(request, min_raise_to);
        }
        // strong hands still let go of bets that dwarf the pot
        if strength >= CALL_THRESHOLD && calculate_pot_odds(request.pot, request.to_call) >= 0.5 {
            return check_or_call(request);
        }
        check_or_fold(request)
    }

    fn name(&self) -> &str {
        "ConservativeAI"
    }
}
