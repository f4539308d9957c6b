use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::AIOpponent;
use holdem_engine::decision::DecisionRequest;
use holdem_engine::player::{ActionKind, PlayerAction};

/// Picks uniformly among the legal actions; bet and raise totals are drawn
/// uniformly from their legal range. Reproducible for a given seed.
#[derive(Debug, Clone)]
pub struct RandomAI {
    rng: ChaCha20Rng,
}

impl RandomAI {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl AIOpponent for RandomAI {
    fn get_action(&mut self, request: &DecisionRequest) -> PlayerAction {
        let legal = &request.legal_actions;
        if legal.is_empty() {
            return PlayerAction::Fold;
        }
        let pick = legal[self.rng.random_range(0..legal.len())];
        match pick.kind {
            ActionKind::Fold => PlayerAction::Fold,
            ActionKind::Check => PlayerAction::Check,
            ActionKind::Call => PlayerAction::Call,
            ActionKind::AllIn => PlayerAction::AllIn,
            ActionKind::Bet => PlayerAction::Bet(self.rng.random_range(pick.min..=pick.max)),
            ActionKind::Raise => PlayerAction::Raise(self.rng.random_range(pick.min..=pick.max)),
        }
    }

    fn name(&self) -> &str {
        "RandomAI"
    }
}
