use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Illegal action by {player}: {reason}")]
    IllegalAction { player: String, reason: String },
    #[error("Malformed decision response: {0}")]
    MalformedResponse(String),
    #[error("Player {player} did not respond within {waited_ms}ms")]
    DecisionTimeout { player: String, waited_ms: u64 },
    #[error("Decision collaborator for {player} unavailable: {reason}")]
    CollaboratorUnavailable { player: String, reason: String },
    #[error("Deck exhausted: requested {requested}, remaining {remaining}")]
    DeckExhausted { requested: usize, remaining: usize },
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
    #[error("It's not seat {actual}'s turn (expected seat {expected})")]
    NotPlayersTurn { expected: usize, actual: usize },
    #[error("Not enough players with chips to start a hand ({seated})")]
    NotEnoughPlayers { seated: usize },
    #[error("Invalid table configuration: {0}")]
    InvalidConfig(String),
}

impl GameError {
    /// Stable snake_case name used in hand records.
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::IllegalAction { .. } => "illegal_action",
            GameError::MalformedResponse(_) => "malformed_response",
            GameError::DecisionTimeout { .. } => "decision_timeout",
            GameError::CollaboratorUnavailable { .. } => "collaborator_unavailable",
            GameError::DeckExhausted { .. } => "deck_exhausted",
            GameError::InvariantViolation(_) => "invariant_violation",
            GameError::NotPlayersTurn { .. } => "not_players_turn",
            GameError::NotEnoughPlayers { .. } => "not_enough_players",
            GameError::InvalidConfig(_) => "invalid_config",
        }
    }

    /// Errors the orchestrator resolves locally with a fold fallback.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GameError::IllegalAction { .. }
                | GameError::MalformedResponse(_)
                | GameError::DecisionTimeout { .. }
                | GameError::CollaboratorUnavailable { .. }
        )
    }
}
