use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::logger::Street;

/// Stages of one hand. Any betting phase may jump straight to `Settled`
/// once a single player remains.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    PostBlinds,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Settled,
}

impl Phase {
    pub fn street(self) -> Option<Street> {
        match self {
            Phase::Preflop => Some(Street::Preflop),
            Phase::Flop => Some(Street::Flop),
            Phase::Turn => Some(Street::Turn),
            Phase::River => Some(Street::River),
            _ => None,
        }
    }

    pub fn from_street(street: Street) -> Phase {
        match street {
            Street::Preflop => Phase::Preflop,
            Street::Flop => Phase::Flop,
            Street::Turn => Phase::Turn,
            Street::River => Phase::River,
        }
    }
}

/// Per-hand table state, created when a hand starts and dropped after settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub phase: Phase,
    pub board: Vec<Card>,
    pub button: usize,
    pub current_bet: u32,
    pub min_raise: u32,
    pub to_act: Option<usize>,
}

impl GameState {
    pub fn new(button: usize) -> Self {
        Self {
            phase: Phase::PostBlinds,
            board: Vec::with_capacity(5),
            button,
            current_bet: 0,
            min_raise: 0,
            to_act: None,
        }
    }

    /// Moves to the next betting phase with a fresh bet level.
    pub fn enter_street(&mut self, street: Street, current_bet: u32, min_raise: u32) {
        self.phase = Phase::from_street(street);
        self.current_bet = current_bet;
        self.min_raise = min_raise;
        self.to_act = None;
    }

    pub fn finish(&mut self, phase: Phase) {
        self.phase = phase;
        self.to_act = None;
    }
}
