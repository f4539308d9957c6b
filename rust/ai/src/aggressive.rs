//! Loose-aggressive policy: plays more hands than the baseline and prefers
//! betting and raising to calling.

use crate::baseline::{calculate_pot_odds, hand_strength};
use crate::{bet_or_raise_to, check_or_call, check_or_fold, AIOpponent};
use holdem_engine::decision::DecisionRequest;
use holdem_engine::logger::Street;
use holdem_engine::player::{ActionKind, PlayerAction};

#[derive(Debug, Clone, Default)]
pub struct AggressiveAI;

impl AggressiveAI {
    pub fn new() -> Self {
        Self
    }
}

impl AIOpponent for AggressiveAI {
    fn get_action(&mut self, request: &DecisionRequest) -> PlayerAction {
        let strength = hand_strength(request);
        let pot_sized = request.current_bet + request.pot.max(request.min_raise);
        let preflop = request.street == Street::Preflop;

        if strength >= 8 && request.can(ActionKind::AllIn) && request.stack <= request.pot {
            return PlayerAction::AllIn;
        }
        if strength >= 6 || (preflop && strength >= 4) {
            return bet_or_raise_to(request, pot_sized);
        }
        if request.to_call == 0 {
            // stab at small pots
            return if strength >= 2 && request.pot <= request.min_raise * 4 {
                bet_or_raise_to(request, request.current_bet + request.min_raise)
            } else {
                PlayerAction::Check
            };
        }
        let odds = calculate_pot_odds(request.pot, request.to_call);
        if strength >= 3 || odds >= 0.75 {
            check_or_call(request)
        } else {
            check_or_fold(request)
        }
    }

    fn name(&self) -> &str {
        "AggressiveAI"
    }
}
