use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::{ActionKind, PlayerAction as A};

/// An action that passed validation. The amount is the number of chips the
/// action moves from the player's stack into the pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    Call(u32),
    Bet(u32),
    Raise(u32),
    AllIn(u32),
}

impl ValidatedAction {
    pub fn chips(self) -> u32 {
        match self {
            ValidatedAction::Fold | ValidatedAction::Check => 0,
            ValidatedAction::Call(c)
            | ValidatedAction::Bet(c)
            | ValidatedAction::Raise(c)
            | ValidatedAction::AllIn(c) => c,
        }
    }

    pub fn kind(self) -> ActionKind {
        match self {
            ValidatedAction::Fold => ActionKind::Fold,
            ValidatedAction::Check => ActionKind::Check,
            ValidatedAction::Call(_) => ActionKind::Call,
            ValidatedAction::Bet(_) => ActionKind::Bet,
            ValidatedAction::Raise(_) => ActionKind::Raise,
            ValidatedAction::AllIn(_) => ActionKind::AllIn,
        }
    }
}

/// One entry of a player's legal action set. `min` and `max` are street
/// totals ("to" amounts); fold and check carry the player's current commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalAction {
    pub kind: ActionKind,
    pub min: u32,
    pub max: u32,
}

/// Betting situation of one player at the moment they act.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetContext {
    /// Chips behind
    pub stack: u32,
    /// Already committed on this street
    pub committed: u32,
    /// Street total everyone must match
    pub current_bet: u32,
    /// Minimum raise increment
    pub min_raise: u32,
}

impl BetContext {
    pub fn to_call(&self) -> u32 {
        self.current_bet.saturating_sub(self.committed)
    }

    /// Street total if the player puts in every chip.
    pub fn max_to(&self) -> u32 {
        self.committed + self.stack
    }

    /// Smallest legal bet or raise total.
    pub fn min_to(&self) -> u32 {
        self.current_bet + self.min_raise
    }

    /// The legal actions for a player who can still act, in a stable order.
    /// A player with no chips behind has none.
    pub fn legal_actions(&self) -> Vec<LegalAction> {
        if self.stack == 0 {
            return Vec::new();
        }
        let here = self.committed;
        let max_to = self.max_to();
        let mut v = vec![LegalAction {
            kind: ActionKind::Fold,
            min: here,
            max: here,
        }];
        if self.to_call() == 0 {
            v.push(LegalAction {
                kind: ActionKind::Check,
                min: here,
                max: here,
            });
        } else {
            let to = self.current_bet.min(max_to);
            v.push(LegalAction {
                kind: ActionKind::Call,
                min: to,
                max: to,
            });
        }
        if self.min_to() <= max_to {
            let kind = if self.current_bet == 0 {
                ActionKind::Bet
            } else {
                ActionKind::Raise
            };
            v.push(LegalAction {
                kind,
                min: self.min_to(),
                max: max_to,
            });
        }
        v.push(LegalAction {
            kind: ActionKind::AllIn,
            min: max_to,
            max: max_to,
        });
        v
    }
}

/// Validates a player action against the betting situation.
///
/// Bet and raise amounts are street totals. The legal range for either is
/// `[current_bet + min_raise, committed + stack]`; a total equal to the upper
/// bound is converted to an all-in. A call the stack cannot cover becomes an
/// all-in as well. Every other violation is reported as
/// [`GameError::IllegalAction`] and nothing is coerced.
///
/// # Examples
///
/// ```
/// use holdem_engine::rules::{validate_action, BetContext, ValidatedAction};
/// use holdem_engine::player::PlayerAction;
///
/// let ctx = BetContext { stack: 990, committed: 10, current_bet: 20, min_raise: 20 };
///
/// // calling puts in the 10 chips still owed
/// let result = validate_action("p1", &ctx, PlayerAction::Call);
/// assert_eq!(result, Ok(ValidatedAction::Call(10)));
///
/// // raising to 60 moves 50 more chips
/// let result = validate_action("p1", &ctx, PlayerAction::Raise(60));
/// assert_eq!(result, Ok(ValidatedAction::Raise(50)));
/// ```
///
/// ```
/// use holdem_engine::rules::{validate_action, BetContext};
/// use holdem_engine::player::PlayerAction;
/// use holdem_engine::errors::GameError;
///
/// let ctx = BetContext { stack: 990, committed: 10, current_bet: 20, min_raise: 20 };
///
/// // cannot check facing a bet
/// let result = validate_action("p1", &ctx, PlayerAction::Check);
/// assert!(matches!(result, Err(GameError::IllegalAction { .. })));
///
/// // raise below the minimum total of 40
/// let result = validate_action("p1", &ctx, PlayerAction::Raise(30));
/// assert!(matches!(result, Err(GameError::IllegalAction { .. })));
/// ```
pub fn validate_action(
    player: &str,
    ctx: &BetContext,
    action: A,
) -> Result<ValidatedAction, GameError> {
    let illegal = |reason: String| GameError::IllegalAction {
        player: player.to_string(),
        reason,
    };
    if ctx.stack == 0 {
        return Err(illegal("player has no chips behind".to_string()));
    }
    let to_call = ctx.to_call();
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(illegal(format!("cannot check facing {} to call", to_call)))
            }
        }
        A::Call => {
            if to_call == 0 {
                Err(illegal("nothing to call; check instead".to_string()))
            } else if ctx.stack <= to_call {
                Ok(ValidatedAction::AllIn(ctx.stack))
            } else {
                Ok(ValidatedAction::Call(to_call))
            }
        }
        A::Bet(to) | A::Raise(to) => {
            let is_bet = matches!(action, A::Bet(_));
            if is_bet && ctx.current_bet > 0 {
                return Err(illegal(format!(
                    "cannot bet into a bet of {}; raise instead",
                    ctx.current_bet
                )));
            }
            if !is_bet && ctx.current_bet == 0 {
                return Err(illegal("nothing to raise; bet instead".to_string()));
            }
            if to > ctx.max_to() {
                return Err(illegal(format!(
                    "total {} exceeds available {}",
                    to,
                    ctx.max_to()
                )));
            }
            if to == ctx.max_to() {
                return Ok(ValidatedAction::AllIn(ctx.stack));
            }
            if to < ctx.min_to() {
                return Err(illegal(format!(
                    "total {} is below the minimum of {}",
                    to,
                    ctx.min_to()
                )));
            }
            let chips = to - ctx.committed;
            Ok(if is_bet {
                ValidatedAction::Bet(chips)
            } else {
                ValidatedAction::Raise(chips)
            })
        }
        A::AllIn => Ok(ValidatedAction::AllIn(ctx.stack)),
    }
}
