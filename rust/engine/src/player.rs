use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

/// Seat label relative to the button, derived fresh each hand.
/// Heads-up the button is also the small blind and the other seat is the big blind.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Button,
    SmallBlind,
    BigBlind,
    UnderTheGun,
    Middle,
    Cutoff,
}

impl Position {
    /// `offset` is the number of seats clockwise from the button among the
    /// `seated` players dealt into the hand.
    pub fn from_offset(offset: usize, seated: usize) -> Position {
        match (offset, seated) {
            (0, _) => Position::Button,
            (_, 2) => Position::BigBlind,
            (1, _) => Position::SmallBlind,
            (2, _) => Position::BigBlind,
            (o, n) if n >= 5 && o == n - 1 => Position::Cutoff,
            (3, _) => Position::UnderTheGun,
            _ => Position::Middle,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::Button => "BTN",
            Position::SmallBlind => "SB",
            Position::BigBlind => "BB",
            Position::UnderTheGun => "UTG",
            Position::Middle => "MP",
            Position::Cutoff => "CO",
        };
        f.write_str(s)
    }
}

/// Represents a player action during a betting round.
///
/// `Bet` and `Raise` carry the total the player will have committed on the
/// current street once the action is applied ("raise to 60"), not the increment.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (no bet, only valid if no bet to call)
    Check,
    /// Call the current bet
    Call,
    /// Open the betting on a street, to the given total
    Bet(u32),
    /// Raise the current bet to the given total
    Raise(u32),
    /// Commit every remaining chip
    AllIn,
}

impl PlayerAction {
    pub fn kind(self) -> ActionKind {
        match self {
            PlayerAction::Fold => ActionKind::Fold,
            PlayerAction::Check => ActionKind::Check,
            PlayerAction::Call => ActionKind::Call,
            PlayerAction::Bet(_) => ActionKind::Bet,
            PlayerAction::Raise(_) => ActionKind::Raise,
            PlayerAction::AllIn => ActionKind::AllIn,
        }
    }
}

/// Action tag without an amount, as it appears in decision requests and hand records.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call => "call",
            ActionKind::Bet => "bet",
            ActionKind::Raise => "raise",
            ActionKind::AllIn => "all_in",
        }
    }

    /// Accepts the tags collaborators commonly send: `"all-in"`, `"allin"`, `"ALL_IN"`.
    pub fn parse(tag: &str) -> Option<ActionKind> {
        let t: String = tag
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match t.as_str() {
            "fold" => Some(ActionKind::Fold),
            "check" => Some(ActionKind::Check),
            "call" => Some(ActionKind::Call),
            "bet" => Some(ActionKind::Bet),
            "raise" => Some(ActionKind::Raise),
            "allin" => Some(ActionKind::AllIn),
            _ => None,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    Active,
    Folded,
    AllIn,
    SittingOut,
}

/// Default starting stack used by the command-line tools
pub const STARTING_STACK: u32 = 1_000;

/// A seated player: persistent identity and stack, plus per-hand state
/// (hole cards, street and hand commitments, status) reset by the orchestrator.
#[derive(Debug, Clone)]
pub struct Player {
    id: String,
    stack: u32,
    hole: Option<[Card; 2]>,
    street_committed: u32,
    hand_committed: u32,
    status: PlayerStatus,
}

impl Player {
    pub fn new(id: impl Into<String>, stack: u32) -> Self {
        Self {
            id: id.into(),
            stack,
            hole: None,
            street_committed: 0,
            hand_committed: 0,
            status: if stack > 0 {
                PlayerStatus::Active
            } else {
                PlayerStatus::SittingOut
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn hole_cards(&self) -> Option<[Card; 2]> {
        self.hole
    }
    pub fn street_committed(&self) -> u32 {
        self.street_committed
    }
    pub fn hand_committed(&self) -> u32 {
        self.hand_committed
    }
    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    /// Still contesting the pot (active or all-in).
    pub fn in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    /// Can still be asked for a decision.
    pub fn can_act(&self) -> bool {
        self.status == PlayerStatus::Active && self.stack > 0
    }

    pub fn set_hole_cards(&mut self, cards: [Card; 2]) {
        self.hole = Some(cards);
    }

    /// Moves `chips` from the stack into this street's commitment.
    /// Committing the last chip marks the player all-in.
    pub fn commit(&mut self, chips: u32) -> Result<(), GameError> {
        if chips > self.stack {
            return Err(GameError::InvariantViolation(format!(
                "{} cannot commit {} with a stack of {}",
                self.id, chips, self.stack
            )));
        }
        self.stack -= chips;
        self.street_committed += chips;
        self.hand_committed += chips;
        if self.stack == 0 && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        Ok(())
    }

    pub fn fold(&mut self) {
        if self.status == PlayerStatus::Active {
            self.status = PlayerStatus::Folded;
        }
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    /// Clears per-hand state; players without chips sit the hand out.
    pub fn reset_for_hand(&mut self) {
        self.hole = None;
        self.street_committed = 0;
        self.hand_committed = 0;
        self.status = if self.stack > 0 {
            PlayerStatus::Active
        } else {
            PlayerStatus::SittingOut
        };
    }

    pub fn reset_street(&mut self) {
        self.street_committed = 0;
    }

    /// Puts the stack back to `stack` and clears hand state after an aborted hand.
    pub fn restore(&mut self, stack: u32) {
        self.stack = stack;
        self.reset_for_hand();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_heads_up() {
        assert_eq!(Position::from_offset(0, 2), Position::Button);
        assert_eq!(Position::from_offset(1, 2), Position::BigBlind);
    }

    #[test]
    fn positions_full_ring() {
        let labels: Vec<Position> = (0..6).map(|o| Position::from_offset(o, 6)).collect();
        assert_eq!(
            labels,
            vec![
                Position::Button,
                Position::SmallBlind,
                Position::BigBlind,
                Position::UnderTheGun,
                Position::Middle,
                Position::Cutoff
            ]
        );
    }

    #[test]
    fn action_tags_parse_loosely() {
        assert_eq!(ActionKind::parse("All-In"), Some(ActionKind::AllIn));
        assert_eq!(ActionKind::parse(" RAISE "), Some(ActionKind::Raise));
        assert_eq!(ActionKind::parse("shove"), None);
    }
}
