use std::collections::VecDeque;

use tracing::debug;

use crate::errors::GameError;
use crate::logger::Street;
use crate::player::{Player, PlayerAction};
use crate::pot::PotManager;
use crate::rules::{validate_action, BetContext, LegalAction, ValidatedAction};

/// Outcome of one applied action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub action: ValidatedAction,
    /// Player's street total after the action
    pub to: u32,
    /// The action raised the bet to match
    pub aggressive: bool,
}

/// One street of betting.
///
/// Tracks the bet to match, the minimum raise increment and the queue of
/// seats that still owe a decision. Street contributions live on the
/// [`Player`] values passed into each call. The round is closed once the
/// queue is empty: every player who can act has responded to the last raise
/// and matched it.
///
/// An all-in that raises by less than the minimum does not reopen the
/// betting: a player who already acted may only call or fold it, until the
/// bet has grown by a full raise since their last action.
#[derive(Debug, Clone)]
pub struct BettingRound {
    street: Street,
    current_bet: u32,
    min_raise: u32,
    queue: VecDeque<usize>,
    last_aggressor: Option<usize>,
    /// Bet to match right after each seat's last action this street
    acted_at: Vec<Option<u32>>,
}

impl BettingRound {
    /// Opens a round with `first_to_act` at the head of the queue.
    ///
    /// `current_bet` is the total to match (the big blind preflop, zero after)
    /// and `min_raise` starts at the big blind. If at most one player can act
    /// and nobody left is owed a decision, the round opens already closed.
    pub fn new(
        street: Street,
        players: &[Player],
        first_to_act: usize,
        current_bet: u32,
        min_raise: u32,
    ) -> Self {
        let n = players.len();
        let actors: Vec<usize> = (0..n)
            .map(|i| (first_to_act + i) % n)
            .filter(|&s| players[s].can_act())
            .collect();
        let queue: VecDeque<usize> = match actors.as_slice() {
            [] => VecDeque::new(),
            [only] if players[*only].street_committed() >= current_bet => VecDeque::new(),
            _ => actors.into_iter().collect(),
        };
        debug!(%street, current_bet, min_raise, queued = queue.len(), "betting round opened");
        Self {
            street,
            current_bet,
            min_raise,
            queue,
            last_aggressor: None,
            acted_at: vec![None; n],
        }
    }

    pub fn street(&self) -> Street {
        self.street
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn min_raise(&self) -> u32 {
        self.min_raise
    }
    pub fn last_aggressor(&self) -> Option<usize> {
        self.last_aggressor
    }

    pub fn next_to_act(&self) -> Option<usize> {
        self.queue.front().copied()
    }

    /// Seats still owed a decision, in acting order.
    pub fn pending(&self) -> Vec<usize> {
        self.queue.iter().copied().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn context(&self, player: &Player) -> BetContext {
        BetContext {
            stack: player.stack(),
            committed: player.street_committed(),
            current_bet: self.current_bet,
            min_raise: self.min_raise,
        }
    }

    /// Whether `seat` may bet or raise: it has not acted yet this street, or
    /// the bet has risen by a full raise since it did.
    pub fn may_raise(&self, seat: usize) -> bool {
        match self.acted_at.get(seat).copied().flatten() {
            None => true,
            Some(faced) => self.current_bet.saturating_sub(faced) >= self.min_raise,
        }
    }

    pub fn legal_actions(&self, seat: usize, player: &Player) -> Vec<LegalAction> {
        if !player.can_act() {
            return Vec::new();
        }
        let mut legal = self.context(player).legal_actions();
        if !self.may_raise(seat) {
            legal.retain(|a| a.max <= self.current_bet);
        }
        legal
    }

    /// [`validate_action`] plus the reopening rule: a seat that may not raise
    /// can only put in chips up to the bet to match.
    pub fn validate(
        &self,
        seat: usize,
        player: &Player,
        action: PlayerAction,
    ) -> Result<ValidatedAction, GameError> {
        let ctx = self.context(player);
        let validated = validate_action(player.id(), &ctx, action)?;
        if !self.may_raise(seat) && ctx.committed + validated.chips() > self.current_bet {
            return Err(GameError::IllegalAction {
                player: player.id().to_string(),
                reason: format!(
                    "a short all-in does not reopen the betting; call {} or fold",
                    ctx.to_call()
                ),
            });
        }
        Ok(validated)
    }

    /// Validates and applies the action of the seat at the head of the queue,
    /// moving any chips into `pots`.
    ///
    /// A raise of at least the minimum increment becomes the new minimum and
    /// re-queues every other player who can still act. An all-in that raises
    /// by less re-queues them too but leaves the minimum unchanged.
    pub fn apply(
        &mut self,
        players: &mut [Player],
        seat: usize,
        action: PlayerAction,
        pots: &mut PotManager,
    ) -> Result<Applied, GameError> {
        let expected = match self.queue.front() {
            Some(&s) => s,
            None => {
                let player = players.get(seat).map(|p| p.id().to_string());
                return Err(GameError::IllegalAction {
                    player: player.unwrap_or_else(|| seat.to_string()),
                    reason: format!("{} betting is closed", self.street),
                });
            }
        };
        if expected != seat {
            return Err(GameError::NotPlayersTurn {
                expected,
                actual: seat,
            });
        }
        let n = players.len();
        let player = players.get_mut(seat).ok_or_else(|| {
            GameError::InvariantViolation(format!("seat {} is not at the table", seat))
        })?;
        let validated = self.validate(seat, player, action)?;
        self.queue.pop_front();

        match validated {
            ValidatedAction::Fold => {
                player.fold();
                pots.mark_folded(seat);
            }
            ValidatedAction::Check => {}
            other => {
                let chips = other.chips();
                player.commit(chips)?;
                pots.add(seat, chips);
            }
        }

        let to = player.street_committed();
        let aggressive = to > self.current_bet;
        if aggressive {
            let raise_by = to - self.current_bet;
            if raise_by >= self.min_raise {
                self.min_raise = raise_by;
            }
            self.current_bet = to;
            self.last_aggressor = Some(seat);
            self.queue = (1..n)
                .map(|i| (seat + i) % n)
                .filter(|&s| players[s].can_act())
                .collect();
        }
        if let Some(slot) = self.acted_at.get_mut(seat) {
            *slot = Some(self.current_bet);
        }
        debug!(
            street = %self.street,
            seat,
            action = %validated.kind(),
            to,
            current_bet = self.current_bet,
            "action applied"
        );
        Ok(Applied {
            action: validated,
            to,
            aggressive,
        })
    }
}
